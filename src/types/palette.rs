//! Palette type: a named, ordered set of colours plus its rendering rules.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{AvatarError, Result};

use super::Colour;

/// How an arbitrary colour is mapped onto a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuantizeMode {
    /// Joint 3-D nearest neighbour by squared RGB distance; first match wins ties.
    Nearest,
    /// Luma above 128 selects the lighter of two colours.
    Threshold2,
    /// Luma bucketed in steps of 64 over four colours.
    Threshold4,
}

impl QuantizeMode {
    /// Number of colours the mode requires, if fixed.
    pub fn required_colours(self) -> Option<usize> {
        match self {
            QuantizeMode::Nearest => None,
            QuantizeMode::Threshold2 => Some(2),
            QuantizeMode::Threshold4 => Some(4),
        }
    }
}

impl fmt::Display for QuantizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeMode::Nearest => write!(f, "nearest colour"),
            QuantizeMode::Threshold2 => write!(f, "2-way luma threshold"),
            QuantizeMode::Threshold4 => write!(f, "4-way luma threshold"),
        }
    }
}

/// How the quantized grid is enlarged to the output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpscaleMode {
    /// Crisp blocky edges.
    Hard,
    /// Interpolated, soft transitions.
    Smooth,
}

impl UpscaleMode {
    /// The resampling kernel used for this upscale mode.
    pub fn kernel(self) -> ResizeKernel {
        match self {
            UpscaleMode::Hard => ResizeKernel::Nearest,
            UpscaleMode::Smooth => ResizeKernel::Lanczos,
        }
    }
}

impl fmt::Display for UpscaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpscaleMode::Hard => write!(f, "hard-edged"),
            UpscaleMode::Smooth => write!(f, "smooth"),
        }
    }
}

/// Resampling kernel for resizing an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeKernel {
    /// Area average: every source pixel contributes to the target pixel it covers.
    Area,
    /// Nearest neighbour.
    Nearest,
    /// Lanczos (3 lobes).
    Lanczos,
}

/// A named, ordered collection of distinct colours with its style rules.
///
/// Palettes are immutable once built; [`Palette::new`] enforces:
/// - at least 2 colours, all distinct
/// - threshold modes have exactly 2 or 4 colours, ordered darkest to lightest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    /// Style identifier (e.g. "8bit")
    pub id: String,

    /// Display name (e.g. "8-Bit")
    pub name: String,

    /// Short description (e.g. "NES")
    pub label: String,

    pub quantize: QuantizeMode,

    pub upscale: UpscaleMode,

    colours: Vec<Colour>,
}

impl Palette {
    /// Create a palette, validating its invariants.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        label: impl Into<String>,
        colours: Vec<Colour>,
        quantize: QuantizeMode,
        upscale: UpscaleMode,
    ) -> Result<Self> {
        let id = id.into();
        validate_colours(&id, &colours, quantize)?;

        Ok(Self {
            id,
            name: name.into(),
            label: label.into(),
            quantize,
            upscale,
            colours,
        })
    }

    /// Colours in enumeration order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    /// Get a colour by index.
    pub fn get(&self, index: usize) -> Option<Colour> {
        self.colours.get(index).copied()
    }

    /// Index of a colour, if it is a palette member.
    pub fn index_of(&self, colour: Colour) -> Option<usize> {
        self.colours.iter().position(|&c| c == colour)
    }

    /// Check if a colour is a palette member.
    pub fn contains(&self, colour: Colour) -> bool {
        self.index_of(colour).is_some()
    }

    /// Get the number of colours.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Always false for a validated palette.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

/// Generate the full cross-product of `levels` over the three channels.
///
/// Enumeration order is red (outermost), then green, then blue.
pub fn level_cube(levels: &[u8]) -> Vec<Colour> {
    let mut colours = Vec::with_capacity(levels.len().pow(3));
    for &r in levels {
        for &g in levels {
            for &b in levels {
                colours.push(Colour::rgb(r, g, b));
            }
        }
    }
    colours
}

fn validate_colours(id: &str, colours: &[Colour], quantize: QuantizeMode) -> Result<()> {
    if colours.len() < 2 {
        return Err(AvatarError::InvalidParameter {
            message: format!("Palette '{}' needs at least 2 colours, got {}", id, colours.len()),
            help: None,
        });
    }

    let mut seen = HashSet::with_capacity(colours.len());
    for colour in colours {
        if !seen.insert(*colour) {
            return Err(AvatarError::InvalidParameter {
                message: format!("Palette '{}' lists {} more than once", id, colour),
                help: Some("Palette colours must be distinct".to_string()),
            });
        }
    }

    if let Some(required) = quantize.required_colours() {
        if colours.len() != required {
            return Err(AvatarError::InvalidParameter {
                message: format!(
                    "Palette '{}' uses {} and needs exactly {} colours, got {}",
                    id,
                    quantize,
                    required,
                    colours.len()
                ),
                help: None,
            });
        }

        let ordered = colours
            .windows(2)
            .all(|pair| pair[0].luma_milli() < pair[1].luma_milli());
        if !ordered {
            return Err(AvatarError::InvalidParameter {
                message: format!("Palette '{}' must be ordered from darkest to lightest", id),
                help: Some("Threshold palettes are indexed by brightness".to_string()),
            });
        }
    }

    Ok(())
}
