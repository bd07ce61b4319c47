use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ColorsError, FormatError};
use crate::hex::{Rgb, LIGHTEN_AMOUNT};

pub const CSV_HEADER: [&str; 5] = ["Name", "R", "G", "B", "Hex Code"];

/// Prefix given to the generated light variant of a color.
pub const LIGHT_PREFIX: &str = "Light ";

// Matched anywhere in a lowercased name, so "Moonlight Blue" is also treated
// as a light variant.
const LIGHT_MARKER: &str = "light ";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "R")]
    pub r: u8,
    #[serde(rename = "G")]
    pub g: u8,
    #[serde(rename = "B")]
    pub b: u8,
    #[serde(rename = "Hex Code")]
    pub hex_code: String,
}

impl ColorRecord {
    /// Builds a record whose hex code is derived from `rgb`.
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            hex_code: rgb.to_hex(),
        }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub fn is_light_variant(&self) -> bool {
        self.name.to_lowercase().contains(LIGHT_MARKER)
    }
}

/// Ordered palette rows. Order is kept on every insert and on save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorTable {
    records: Vec<ColorRecord>,
}

impl ColorTable {
    pub fn new(records: Vec<ColorRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ColorRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorRecord> {
        self.records.iter()
    }

    /// First record whose name equals `name`, ignoring case.
    pub fn find(&self, name: &str) -> Option<&ColorRecord> {
        self.records.iter().find(|record| record.matches_name(name))
    }

    /// Names of every record that is not a light variant, in table order.
    pub fn true_color_names(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| !record.is_light_variant())
            .map(|record| record.name.clone())
            .collect()
    }

    /// Inserts `name` and its light variant at `position`.
    ///
    /// A position past the end appends. Returns the index the base color
    /// landed at.
    pub fn insert_with_light_counterpart(
        &mut self,
        name: &str,
        rgb: Rgb,
        position: usize,
    ) -> usize {
        let index = position.min(self.records.len());
        let base = ColorRecord::new(name, rgb);
        let light = ColorRecord::new(
            format!("{LIGHT_PREFIX}{name}"),
            rgb.lighten(LIGHTEN_AMOUNT),
        );
        self.records.insert(index, light);
        self.records.insert(index, base);
        index
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FormatError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Fields)
            .from_reader(reader);
        let headers = reader.headers().map_err(FormatError::Row)?;
        if !headers.iter().eq(CSV_HEADER) {
            return Err(FormatError::Header {
                expected: "Name,R,G,B,Hex Code",
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }

        let records = reader
            .deserialize::<ColorRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(FormatError::Row)?;
        Ok(Self { records })
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ColorsError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(BufReader::new(file))?)
    }

    /// Writes the header row followed by every record, even when empty.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(CSV_HEADER)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ColorsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        self.write_to(io::BufWriter::new(file))?;
        Ok(())
    }
}

impl FromIterator<ColorRecord> for ColorTable {
    fn from_iter<I: IntoIterator<Item = ColorRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ColorTable {
    type Item = &'a ColorRecord;
    type IntoIter = std::slice::Iter<'a, ColorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ColorTable {
    type Item = ColorRecord;
    type IntoIter = std::vec::IntoIter<ColorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
