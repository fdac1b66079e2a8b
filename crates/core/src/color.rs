use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::StudyError;

/// An RGB color stored as a `#RRGGBB` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorTag {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Palette cycled through for map pins without a stored color.
pub const PIN_PALETTE: [ColorTag; 6] = [
    ColorTag::rgb(0x2E, 0xCC, 0x71),
    ColorTag::rgb(0xE7, 0x4C, 0x3C),
    ColorTag::rgb(0x34, 0x98, 0xDB),
    ColorTag::rgb(0xF1, 0xC4, 0x0F),
    ColorTag::rgb(0x9B, 0x59, 0xB6),
    ColorTag::rgb(0xE6, 0x7E, 0x22),
];

impl ColorTag {
    /// Used when a stored tag is absent or unparseable.
    pub const FALLBACK: ColorTag = ColorTag::rgb(0x4B, 0x7B, 0xEC);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    pub fn parse_or_fallback(tag: Option<&str>) -> Self {
        tag.and_then(|t| t.parse().ok()).unwrap_or(Self::FALLBACK)
    }

    pub fn from_palette(index: usize) -> Self {
        PIN_PALETTE[index % PIN_PALETTE.len()]
    }
}

impl Default for ColorTag {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ColorTag {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StudyError::Validation(format!("Invalid color tag: {:?}", s));

        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for ColorTag {
    type Error = StudyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorTag> for String {
    fn from(color: ColorTag) -> Self {
        color.to_hex()
    }
}
