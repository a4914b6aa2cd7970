//! Core domain types.
//!
//! - `Colour` - opaque RGB colour values
//! - `Palette` - named colour collections with quantization and upscale rules

mod colour;
mod palette;

pub use colour::Colour;
pub use palette::{level_cube, Palette, QuantizeMode, ResizeKernel, UpscaleMode};
