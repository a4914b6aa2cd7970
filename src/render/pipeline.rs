//! Avatar pipeline: crop, downscale, quantize, upscale, encode.
//!
//! Only [`ImageSource::load`] and the final write touch the outside world;
//! everything in between is an in-memory transform on `image` buffers.

use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbImage};
use serde::Serialize;

use crate::discovery::{is_supported_image, SUPPORTED_EXTENSIONS};
use crate::error::{AvatarError, Result};
use crate::registry::{self, DEFAULT_STYLE};
use crate::types::{Palette, ResizeKernel};

use super::crop::CropRect;
use super::png::{encode_png, resize, write_bytes};
use super::quantize::quantize_buffer;

pub const MIN_PIXEL_SIZE: u32 = 8;
pub const MAX_PIXEL_SIZE: u32 = 128;
pub const DEFAULT_PIXEL_SIZE: u32 = 32;

pub const MIN_OUTPUT_SIZE: u32 = 32;
pub const MAX_OUTPUT_SIZE: u32 = 2048;
pub const DEFAULT_OUTPUT_SIZE: u32 = 512;

/// Per-request rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarOptions {
    /// Side of the pixel grid (8..=128).
    pub pixel_size: u32,
    /// Side of the final image (32..=2048).
    pub output_size: u32,
    /// Style identifier from the registry.
    pub style: String,
}

impl Default for AvatarOptions {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
            output_size: DEFAULT_OUTPUT_SIZE,
            style: DEFAULT_STYLE.to_string(),
        }
    }
}

impl AvatarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixel_size(mut self, pixel_size: u32) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    pub fn output_size(mut self, output_size: u32) -> Self {
        self.output_size = output_size;
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Check sizes and resolve the style's palette.
    pub fn validate(&self) -> Result<&'static Palette> {
        check_range(
            "Pixel size",
            self.pixel_size,
            MIN_PIXEL_SIZE,
            MAX_PIXEL_SIZE,
        )?;
        check_range(
            "Output size",
            self.output_size,
            MIN_OUTPUT_SIZE,
            MAX_OUTPUT_SIZE,
        )?;
        registry::style(&self.style)
    }
}

fn check_range(what: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(AvatarError::InvalidParameter {
        message: format!("{} must be between {} and {}, got {}", what, min, max, value),
        help: None,
    })
}

/// Where the source image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// The source path, if the image is read from disk.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ImageSource::Path(path) => Some(path),
            ImageSource::Bytes(_) => None,
        }
    }

    /// Decode the source image.
    pub fn load(&self) -> Result<DynamicImage> {
        let (img, path) = match self {
            ImageSource::Path(path) => {
                if !path.is_file() {
                    return Err(AvatarError::InputNotFound {
                        path: path.clone(),
                        message: "File not found".to_string(),
                    });
                }
                if !is_supported_image(path) {
                    return Err(AvatarError::InputNotFound {
                        path: path.clone(),
                        message: format!(
                            "Unsupported format. Use: {}",
                            SUPPORTED_EXTENSIONS.join(", ")
                        ),
                    });
                }
                (image::open(path), path.clone())
            }
            ImageSource::Bytes(bytes) => {
                (image::load_from_memory(bytes), PathBuf::from("<memory>"))
            }
        };

        let img = img.map_err(|e| AvatarError::ImageLoad {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if img.width() == 0 || img.height() == 0 {
            return Err(AvatarError::ImageLoad {
                path,
                message: "Image has no pixels".to_string(),
            });
        }

        Ok(img)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

/// Where the encoded PNG goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to a file.
    Path(PathBuf),
    /// Return the bytes in [`AvatarResult::png`].
    Memory,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResult {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub pixel_size: u32,
    pub output_size: u32,
    pub style: String,
    /// Encoded PNG size in bytes.
    pub file_size: u64,
    /// Encoded PNG, for [`OutputTarget::Memory`].
    #[serde(skip)]
    pub png: Option<Vec<u8>>,
}

/// A complete avatar request.
#[derive(Debug, Clone)]
pub struct AvatarRequest {
    pub source: ImageSource,
    pub target: OutputTarget,
    pub options: AvatarOptions,
}

impl AvatarRequest {
    /// Create a request with default options.
    pub fn new(source: impl Into<ImageSource>, target: OutputTarget) -> Self {
        Self {
            source: source.into(),
            target,
            options: AvatarOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AvatarOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the pipeline for this request.
    pub fn generate(&self) -> Result<AvatarResult> {
        generate(&self.source, &self.target, &self.options)
    }
}

/// Generate an avatar from `source` and deliver it to `target`.
///
/// Parameters are validated before the source is read; a failed request
/// writes nothing.
pub fn generate(
    source: &ImageSource,
    target: &OutputTarget,
    options: &AvatarOptions,
) -> Result<AvatarResult> {
    let palette = options.validate()?;

    let img = source.load()?;
    let avatar = render_avatar(&img, palette, options.pixel_size, options.output_size)?;
    let bytes = encode_png(&avatar)?;
    let file_size = bytes.len() as u64;

    let (output_path, png) = match target {
        OutputTarget::Path(path) => {
            write_bytes(&bytes, path)?;
            (Some(path.clone()), None)
        }
        OutputTarget::Memory => (None, Some(bytes)),
    };

    Ok(AvatarResult {
        input_path: source.path().map(Path::to_path_buf),
        output_path,
        pixel_size: options.pixel_size,
        output_size: options.output_size,
        style: options.style.clone(),
        file_size,
        png,
    })
}

/// Crop to a centered square and area-average down to `pixel_size` x `pixel_size`.
///
/// Any alpha channel is dropped.
pub fn pixel_grid(img: &DynamicImage, pixel_size: u32) -> RgbImage {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let rect = CropRect::center_square(width, height);

    if rect.is_full(width, height) {
        return resize(&rgb, pixel_size, pixel_size, ResizeKernel::Area);
    }

    let square = image::imageops::crop_imm(&rgb, rect.x, rect.y, rect.width, rect.height).to_image();
    resize(&square, pixel_size, pixel_size, ResizeKernel::Area)
}

/// Render the final avatar image without any I/O.
pub fn render_avatar(
    img: &DynamicImage,
    palette: &Palette,
    pixel_size: u32,
    output_size: u32,
) -> Result<RgbImage> {
    let mut grid = pixel_grid(img, pixel_size);
    let (width, height) = grid.dimensions();
    quantize_buffer(&mut grid, width, height, palette)?;

    Ok(resize(&grid, output_size, output_size, palette.upscale.kernel()))
}
