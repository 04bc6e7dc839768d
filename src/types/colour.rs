//! Colour type, hex parsing and the packed pixel layout.
//!
//! Every buffer in pxed stores pixels as packed `u32` values laid out as
//! `0xRRGGBBAA`: red in the most significant byte, alpha in the least.
//! `Colour::pack` and `Colour::unpack` are the only places that know this.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PxedError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour. Packs to `0`, the value new buffers hold.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Pack into the `0xRRGGBBAA` pixel layout.
    pub const fn pack(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Unpack from the `0xRRGGBBAA` pixel layout.
    pub const fn unpack(value: u32) -> Self {
        let [r, g, b, a] = value.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        match hex.len() {
            3 | 4 => {
                let mut nibbles = [0xF_u8; 4];
                for (slot, c) in nibbles.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b, a] = nibbles.map(|n| n << 4 | n);
                Ok(Self::new(r, g, b, a))
            }
            6 | 8 => {
                let mut bytes = [0xFF_u8; 4];
                for (i, slot) in bytes.iter_mut().enumerate().take(hex.len() / 2) {
                    *slot = parse_hex_byte(hex.get(i * 2..i * 2 + 2).unwrap_or(""))?;
                }
                let [r, g, b, a] = bytes;
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(PxedError::Parse {
                message: format!("Invalid hex colour: {}", s),
                help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
            }),
        }
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Alpha normalized to `0.0..=1.0`.
    pub fn alpha(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Squared Euclidean distance over the RGB channels. Alpha is ignored.
    pub fn distance_sq(self, other: Colour) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<Colour> for u32 {
    fn from(colour: Colour) -> Self {
        colour.pack()
    }
}

impl From<u32> for Colour {
    fn from(value: u32) -> Self {
        Colour::unpack(value)
    }
}

impl FromStr for Colour {
    type Err = PxedError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Colour::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| PxedError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| PxedError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
