//! Rendering module.
//!
//! Turns a decoded photo into a quantized, upscaled avatar: crop geometry,
//! palette quantization, resampling and PNG output.

pub mod crop;
mod pipeline;
mod png;
pub mod quantize;

pub use crop::CropRect;
pub use pipeline::{
    generate, pixel_grid, render_avatar, AvatarOptions, AvatarRequest, AvatarResult, ImageSource,
    OutputTarget, DEFAULT_OUTPUT_SIZE, DEFAULT_PIXEL_SIZE, MAX_OUTPUT_SIZE, MAX_PIXEL_SIZE,
    MIN_OUTPUT_SIZE, MIN_PIXEL_SIZE,
};
pub use png::{encode_png, resize, write_bytes, write_png};
pub use quantize::{quantize, quantize_buffer, quantize_colour};
