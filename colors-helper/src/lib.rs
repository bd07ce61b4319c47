//! A named color palette backed by a remote CSV table.
//!
//! [`ColorStore`] fetches the table on first use, answers name lookups
//! against it and writes edits back to a local `good_colors.csv`.

pub mod error;
pub mod fetch;
pub mod hex;
pub mod store;
pub mod table;

pub use error::{ColorsError, FormatError};
pub use fetch::{Fetcher, HttpFetcher};
pub use hex::{hex_to_rgb, ColorValue, Rgb, LIGHTEN_AMOUNT};
pub use store::{ColorStore, StoreConfig, DEFAULT_CSV_PATH, DEFAULT_CSV_URL};
pub use table::{ColorRecord, ColorTable, CSV_HEADER, LIGHT_PREFIX};
