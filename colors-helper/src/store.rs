use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ColorsError;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::hex::{ColorValue, Rgb};
use crate::table::ColorTable;

pub const DEFAULT_CSV_URL: &str = "https://harchaoui.org/warith/colors/good_colors.csv";
pub const DEFAULT_CSV_PATH: &str = "good_colors.csv";

const LOG_TARGET: &str = "colors_helper::store";

/// Where the palette comes from and where it is written back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub url: String,
    pub csv_path: PathBuf,
}

impl StoreConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_csv_path(mut self, csv_path: impl Into<PathBuf>) -> Self {
        self.csv_path = csv_path.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CSV_URL.to_string(),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
        }
    }
}

/// Owns the palette for a session.
///
/// The table is fetched on first access and reused until [`ColorStore::reset`]
/// or [`ColorStore::save`] replaces it; the local file is never read back.
#[derive(Debug)]
pub struct ColorStore<F = HttpFetcher> {
    config: StoreConfig,
    fetcher: F,
    cache: Option<ColorTable>,
}

impl ColorStore<HttpFetcher> {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_fetcher(config, HttpFetcher::new())
    }
}

impl Default for ColorStore<HttpFetcher> {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl<F: Fetcher> ColorStore<F> {
    pub fn with_fetcher(config: StoreConfig, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            cache: None,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cached(&self) -> Option<&ColorTable> {
        self.cache.as_ref()
    }

    /// Drops the cached table so the next access fetches it again.
    pub fn reset(&mut self) {
        self.cache = None;
    }

    pub fn load(&mut self) -> Result<&ColorTable, ColorsError> {
        let table = match self.cache.take() {
            Some(table) => {
                debug!(target: LOG_TARGET, rows = table.len(), "using cached color table");
                table
            }
            None => self.fetch_table()?,
        };
        Ok(&*self.cache.insert(table))
    }

    fn fetch_table(&self) -> Result<ColorTable, ColorsError> {
        // Removed when dropped, whether or not parsing succeeds.
        let staging = tempfile::Builder::new()
            .prefix("good_colors")
            .suffix(".csv")
            .tempfile()?;

        let bytes = self.fetcher.fetch_to(&self.config.url, staging.path())?;
        let table = ColorTable::load_from_path(staging.path())?;

        debug!(
            target: LOG_TARGET,
            url = %self.config.url,
            bytes,
            rows = table.len(),
            "fetched color table"
        );

        Ok(table)
    }

    /// Replaces the cached table with `table` and writes it to the local CSV.
    ///
    /// The cache is replaced even when writing fails.
    pub fn save(&mut self, table: ColorTable) -> Result<PathBuf, ColorsError> {
        let written = table.save_to_path(&self.config.csv_path);
        self.cache = Some(table);
        written?;

        let path = absolute_path(&self.config.csv_path)?;
        info!(
            target: LOG_TARGET,
            path = %path.display(),
            "color data saved to {}",
            path.display()
        );
        Ok(path)
    }

    /// Inserts `name` and a "Light " variant at `position`, then saves.
    ///
    /// The variant adds 70 to each channel, clamped at 255. A position past
    /// the end of the table appends.
    pub fn add_color_with_light_counterpart(
        &mut self,
        name: &str,
        value: impl Into<ColorValue>,
        position: usize,
    ) -> Result<(), ColorsError> {
        let mut table = self.load()?.clone();
        let rgb = value.into().to_rgb()?;

        let index = table.insert_with_light_counterpart(name, rgb, position);
        debug!(
            target: LOG_TARGET,
            color = name,
            index,
            hex = %rgb,
            "added color with light counterpart"
        );

        self.save(table)?;
        Ok(())
    }

    pub fn name2rgb(&mut self, name: &str) -> Result<Rgb, ColorsError> {
        self.load()?
            .find(name)
            .map(|record| record.rgb())
            .ok_or_else(|| ColorsError::NotFound(name.to_string()))
    }

    /// Stored hex code for `name`, returned as written in the table.
    pub fn name2hexcode(&mut self, name: &str) -> Result<String, ColorsError> {
        self.load()?
            .find(name)
            .map(|record| record.hex_code.clone())
            .ok_or_else(|| ColorsError::NotFound(name.to_string()))
    }

    /// Names of every color that is not a light variant.
    pub fn colors(&mut self) -> Result<Vec<String>, ColorsError> {
        Ok(self.load()?.true_color_names())
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf, ColorsError> {
    Ok(fs::canonicalize(path)?)
}
