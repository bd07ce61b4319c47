//! Hex color codes and the 8-bit RGB triple they encode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Amount added to every channel when deriving a light variant.
pub const LIGHTEN_AMOUNT: u8 = 70;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase, zero-padded `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Adds `amount` to each channel independently, clamping at 255.
    pub fn lighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(rgb: Rgb) -> Self {
        (rgb.r, rgb.g, rgb.b)
    }
}

/// Parses `#RRGGBB` (leading `#`s are optional) into its three channels.
///
/// Exactly six hex digits must follow the stripped `#` prefix; shorter or
/// longer input is rejected rather than truncated.
pub fn hex_to_rgb(hex_code: &str) -> Result<Rgb, FormatError> {
    let digits = hex_code.trim_start_matches('#');
    let bytes = digits.as_bytes();
    if bytes.len() != 6 {
        return Err(FormatError::InvalidLength {
            input: hex_code.to_string(),
        });
    }

    let channel = |offset: usize| -> Result<u8, FormatError> {
        let invalid = || FormatError::InvalidDigit {
            input: hex_code.to_string(),
        };
        let hi = nibble(bytes[offset]).ok_or_else(invalid)?;
        let lo = nibble(bytes[offset + 1]).ok_or_else(invalid)?;
        Ok(hi << 4 | lo)
    };

    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// A color given either as channels or as a `#`-prefixed hex code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorValue {
    Rgb(Rgb),
    Hex(String),
}

impl ColorValue {
    pub fn to_rgb(&self) -> Result<Rgb, FormatError> {
        match self {
            ColorValue::Rgb(rgb) => Ok(*rgb),
            ColorValue::Hex(code) if code.starts_with('#') => hex_to_rgb(code),
            ColorValue::Hex(code) => Err(FormatError::MissingHashPrefix {
                input: code.clone(),
            }),
        }
    }
}

impl From<Rgb> for ColorValue {
    fn from(rgb: Rgb) -> Self {
        ColorValue::Rgb(rgb)
    }
}

impl From<(u8, u8, u8)> for ColorValue {
    fn from(triple: (u8, u8, u8)) -> Self {
        ColorValue::Rgb(triple.into())
    }
}

impl From<&str> for ColorValue {
    fn from(code: &str) -> Self {
        ColorValue::Hex(code.to_string())
    }
}

impl From<String> for ColorValue {
    fn from(code: String) -> Self {
        ColorValue::Hex(code)
    }
}
