//! sRGB color type used for palettes and triangle fills.
//!
//! Colors are stored as 8-bit channels so that a palette entry parsed from
//! `"#27272a"` compares equal, bit for bit, to the color a triangle carries.
//! Serializes as a `"#rrggbb"` hex string.

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb::new(0, 0, 0);
    pub const WHITE: Srgb = Srgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa", "ff00aa" or the shorthand
    /// "#f0a" (case insensitive).
    ///
    /// Returns `PatternError::InvalidColor` if the input is not a 3- or
    /// 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, PatternError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return Err(PatternError::InvalidColor(format!(
                "non-ascii hex color '{hex}'"
            )));
        }
        let channel = |s: &str, name: &str| {
            u8::from_str_radix(s, 16).map_err(|e| {
                PatternError::InvalidColor(format!("invalid {name} component in '{hex}': {e}"))
            })
        };
        match digits.len() {
            6 => Ok(Srgb {
                r: channel(&digits[0..2], "red")?,
                g: channel(&digits[2..4], "green")?,
                b: channel(&digits[4..6], "blue")?,
            }),
            // "#abc" expands to "#aabbcc"
            3 => Ok(Srgb {
                r: channel(&digits[0..1], "red")? * 17,
                g: channel(&digits[1..2], "green")? * 17,
                b: channel(&digits[2..3], "blue")? * 17,
            }),
            n => Err(PatternError::InvalidColor(format!(
                "expected 3 or 6 hex digits in '{hex}', got {n}"
            ))),
        }
    }

    /// Converts the color to a lowercase hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Composites `over` on top of `self` with coverage `alpha` in [0, 1].
    ///
    /// Blending happens directly on the 8-bit sRGB values, the way a 2D
    /// canvas applies a translucent stroke.
    pub fn blend(self, over: Srgb, alpha: f64) -> Srgb {
        let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        let mix = |base: u8, top: u8| {
            (f64::from(base) + (f64::from(top) - f64::from(base)) * a).round() as u8
        };
        Srgb {
            r: mix(self.r, over.r),
            g: mix(self.g, over.g),
            b: mix(self.b, over.b),
        }
    }

    /// Returns the color as `[r, g, b, 255]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Srgb {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::from_hex(s.trim())
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
