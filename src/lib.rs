//! retro-avatar - Photo to retro pixel-art avatar generator
//!
//! Crops a photo to a square, shrinks it to a coarse pixel grid, snaps every
//! pixel to a retro palette and scales the result back up.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod registry;
pub mod render;
pub mod types;

pub use discovery::{load_config, LoadedConfig, Manifest};
pub use error::{AvatarError, Result};
pub use registry::{style, StyleRegistry, DEFAULT_STYLE};
pub use render::{
    generate, quantize, render_avatar, AvatarOptions, AvatarRequest, AvatarResult, ImageSource,
    OutputTarget,
};
pub use types::{Colour, Palette, QuantizeMode, UpscaleMode};
