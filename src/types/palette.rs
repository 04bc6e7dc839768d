//! Ordered palettes.
//!
//! A palette is a fixed, ordered list of colours addressed by index. Index 0
//! is reserved for "no colour / erased": quantization only produces it for
//! transparent pixels and never picks it as a nearest match. Because of that
//! every palette needs at least one real colour after the reserved slot.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PxedError, Result};

use super::Colour;

/// The minimum number of entries: the reserved slot plus one real colour.
pub const MIN_PALETTE_LEN: usize = 2;

/// The reserved "no colour" index.
pub const RESERVED_INDEX: usize = 0;

/// The PICO-8 16-colour palette.
const PICO8_COLOURS: [Colour; 16] = [
    Colour::rgb(0, 0, 0),       // black
    Colour::rgb(29, 43, 83),    // dark blue
    Colour::rgb(126, 37, 83),   // dark purple
    Colour::rgb(0, 135, 81),    // dark green
    Colour::rgb(171, 82, 54),   // brown
    Colour::rgb(95, 87, 79),    // dark grey
    Colour::rgb(194, 195, 199), // light grey
    Colour::rgb(255, 241, 232), // white
    Colour::rgb(255, 0, 77),    // red
    Colour::rgb(255, 163, 0),   // orange
    Colour::rgb(255, 236, 39),  // yellow
    Colour::rgb(0, 228, 54),    // green
    Colour::rgb(41, 173, 255),  // blue
    Colour::rgb(131, 118, 156), // indigo
    Colour::rgb(255, 119, 168), // pink
    Colour::rgb(255, 204, 170), // peach
];

/// An ordered colour palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteFile", into = "PaletteFile")]
pub struct Palette {
    /// Palette name
    pub name: String,

    colours: Vec<Colour>,
}

/// On-disk shape of a palette file, validated into a `Palette`.
#[derive(Debug, Serialize, Deserialize)]
struct PaletteFile {
    #[serde(default)]
    name: String,
    colours: Vec<Colour>,
}

impl TryFrom<PaletteFile> for Palette {
    type Error = PxedError;

    fn try_from(file: PaletteFile) -> Result<Self> {
        Palette::new(file.name, file.colours)
    }
}

impl From<Palette> for PaletteFile {
    fn from(palette: Palette) -> Self {
        Self {
            name: palette.name,
            colours: palette.colours,
        }
    }
}

impl Palette {
    /// Create a palette. The first colour occupies the reserved slot.
    pub fn new(name: impl Into<String>, colours: Vec<Colour>) -> Result<Self> {
        let name = name.into();
        if colours.len() < MIN_PALETTE_LEN {
            return Err(PxedError::Palette {
                message: format!(
                    "Palette '{}' has {} colour(s), at least {} are required",
                    name,
                    colours.len(),
                    MIN_PALETTE_LEN
                ),
                help: Some(
                    "Index 0 is reserved for erased pixels; add at least one real colour after it"
                        .to_string(),
                ),
            });
        }
        Ok(Self { name, colours })
    }

    /// The PICO-8 palette behind a transparent reserved slot (17 entries).
    pub fn pico8() -> Self {
        let mut colours = Vec::with_capacity(PICO8_COLOURS.len() + 1);
        colours.push(Colour::TRANSPARENT);
        colours.extend_from_slice(&PICO8_COLOURS);
        Self {
            name: "pico8".to_string(),
            colours,
        }
    }

    /// An evenly spaced black-to-white ramp of `shades` real colours
    /// behind a transparent reserved slot.
    pub fn greyscale(shades: usize) -> Self {
        let shades = shades.max(1);
        let mut colours = vec![Colour::TRANSPARENT];
        for i in 0..shades {
            let level = if shades == 1 {
                0
            } else {
                (i * 255 / (shades - 1)) as u8
            };
            colours.push(Colour::rgb(level, level, level));
        }
        Self {
            name: format!("grey{}", shades),
            colours,
        }
    }

    /// Parse a palette from YAML.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| PxedError::Parse {
            message: format!("Invalid palette file: {}", e),
            help: Some("Expected `name:` and a `colours:` list of hex values".to_string()),
        })
    }

    /// Load a palette from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| PxedError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read palette: {}", e),
        })?;
        Self::from_yaml(&source)
    }

    /// Serialize the palette to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| PxedError::Parse {
            message: format!("Failed to serialize palette: {}", e),
            help: None,
        })
    }

    /// Get a colour by index.
    pub fn get(&self, index: usize) -> Option<Colour> {
        self.colours.get(index).copied()
    }

    /// The colours in palette order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Iterate over the colours in palette order.
    pub fn iter(&self) -> impl Iterator<Item = Colour> + '_ {
        self.colours.iter().copied()
    }

    /// The colours packed into the buffer pixel layout.
    pub fn packed(&self) -> Vec<u32> {
        self.colours.iter().map(|c| c.pack()).collect()
    }

    /// Get the number of colours, including the reserved slot.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Always false: construction rejects short palettes.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::pico8()
    }
}
