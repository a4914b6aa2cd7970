//! Palette quantization.
//!
//! Rewrites a packed RGB pixel buffer in place so every pixel is a member of
//! the active palette. Each pixel is mapped independently of its neighbours.

use crate::error::{AvatarError, Result};
use crate::registry;
use crate::types::{Colour, Palette, QuantizeMode};

/// Bytes per pixel in a packed RGB buffer.
pub const CHANNELS: usize = 3;

/// Luma (x1000) above which the 2-way threshold picks the light colour.
const THRESHOLD_2_MILLI: u32 = 128_000;

/// Luma (x1000) width of each 4-way threshold bucket.
const BUCKET_4_MILLI: u32 = 64_000;

/// Find the index of the palette colour nearest to `colour`.
///
/// Distance is squared Euclidean over all three channels jointly. When two
/// entries are equally close the one listed first wins.
pub fn nearest_index(colour: Colour, colours: &[Colour]) -> usize {
    let mut best_index = 0;
    let mut best_dist = u32::MAX;

    for (i, pc) in colours.iter().enumerate() {
        let dist = colour.distance_squared(*pc);
        if dist < best_dist {
            best_dist = dist;
            best_index = i;
            if dist == 0 {
                break;
            }
        }
    }

    best_index
}

/// Palette index for a colour under the 2-way luma threshold.
///
/// Luma of exactly 128 stays dark.
pub fn threshold2_index(colour: Colour) -> usize {
    if colour.luma_milli() > THRESHOLD_2_MILLI {
        1
    } else {
        0
    }
}

/// Palette index for a colour under the 4-way luma threshold: `floor(luma / 64)`, at most 3.
pub fn threshold4_index(colour: Colour) -> usize {
    ((colour.luma_milli() / BUCKET_4_MILLI) as usize).min(3)
}

/// Palette index a colour maps to under the palette's quantization mode.
pub fn quantize_index(colour: Colour, palette: &Palette) -> usize {
    match palette.quantize {
        QuantizeMode::Nearest => nearest_index(colour, palette.colours()),
        QuantizeMode::Threshold2 => threshold2_index(colour),
        QuantizeMode::Threshold4 => threshold4_index(colour),
    }
}

/// Map a single colour onto the palette.
pub fn quantize_colour(colour: Colour, palette: &Palette) -> Colour {
    palette.colours()[quantize_index(colour, palette)]
}

/// Quantize a packed RGB buffer in place against `palette`.
///
/// The buffer must hold exactly `width * height * 3` bytes, row-major.
pub fn quantize_buffer(pixels: &mut [u8], width: u32, height: u32, palette: &Palette) -> Result<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| AvatarError::InvalidParameter {
            message: format!("Image dimensions {}x{} are too large", width, height),
            help: None,
        })?;
    if pixels.len() != expected {
        return Err(AvatarError::BufferLengthMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    for px in pixels.chunks_exact_mut(CHANNELS) {
        if let Some(colour) = Colour::from_slice(px) {
            px.copy_from_slice(&quantize_colour(colour, palette).to_rgb());
        }
    }

    Ok(())
}

/// Quantize a packed RGB buffer in place using a builtin style.
pub fn quantize(pixels: &mut [u8], width: u32, height: u32, style: &str) -> Result<()> {
    let palette = registry::style(style)?;
    quantize_buffer(pixels, width, height, palette)
}
