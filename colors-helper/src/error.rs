//! Error types shared by the color table, the fetcher and the store.

use std::io;

use thiserror::Error;

/// A hex code or a color table that does not have the expected shape.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("hex code '{input}' must hold exactly 6 hex digits")]
    InvalidLength { input: String },
    #[error("hex code '{input}' contains a non-hex digit")]
    InvalidDigit { input: String },
    #[error("color value '{input}' is neither an RGB triple nor a '#'-prefixed hex code")]
    MissingHashPrefix { input: String },
    #[error("unexpected color table header: expected '{expected}', found '{found}'")]
    Header {
        expected: &'static str,
        found: String,
    },
    #[error("malformed color table row: {0}")]
    Row(#[source] csv::Error),
}

#[derive(Debug, Error)]
pub enum ColorsError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("failed to fetch color table from {url}: {reason}")]
    Network { url: String, reason: String },
    #[error("Color '{0}' not found in the color table")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
