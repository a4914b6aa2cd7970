//! Resampling and PNG output.
//!
//! Wraps the `image` crate's resize kernels and PNG encoder. Files are written
//! through a temporary sibling and renamed into place, so a failed write never
//! leaves a truncated PNG behind.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use tempfile::NamedTempFile;

use crate::error::{AvatarError, Result};
use crate::types::ResizeKernel;

/// Resize an RGB image to exactly `width` x `height` with the given kernel.
pub fn resize(img: &RgbImage, width: u32, height: u32, kernel: ResizeKernel) -> RgbImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }

    match kernel {
        ResizeKernel::Area => imageops::thumbnail(img, width, height),
        ResizeKernel::Nearest => imageops::resize(img, width, height, FilterType::Nearest),
        ResizeKernel::Lanczos => imageops::resize(img, width, height, FilterType::Lanczos3),
    }
}

/// Encode an RGB image as PNG bytes.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| AvatarError::OutputWrite {
            path: "<memory>".into(),
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(bytes)
}

/// Write encoded bytes to `path`, creating parent directories as needed.
pub fn write_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    let io_err = |message: String| AvatarError::OutputWrite {
        path: path.to_path_buf(),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir)
        .map_err(|e| io_err(format!("Failed to create output directory: {}", e)))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| io_err(format!("Failed to create temporary file: {}", e)))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.flush())
        .map_err(|e| io_err(format!("Failed to write PNG: {}", e)))?;
    if let Some(perms) = output_permissions(path) {
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| io_err(format!("Failed to set permissions: {}", e)))?;
    }
    tmp.persist(path)
        .map_err(|e| io_err(format!("Failed to move PNG into place: {}", e.error)))?;

    Ok(())
}

/// Permissions for the finished file: an existing target keeps its mode,
/// a new one is world-readable (0644).
#[cfg(unix)]
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => Some(fs::Permissions::from_mode(0o644)),
    }
}

#[cfg(not(unix))]
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    fs::metadata(path).ok().map(|meta| meta.permissions())
}

/// Encode an RGB image and write it to a PNG file. Returns the encoded size in bytes.
pub fn write_png(img: &RgbImage, path: &Path) -> Result<u64> {
    let bytes = encode_png(img)?;
    write_bytes(&bytes, path)?;
    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::tempdir;

    fn checker(size: u32) -> RgbImage {
        ImageBuffer::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn test_write_png_simple() {
        let img = checker(2);

        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        let size = write_png(&img, &path).unwrap();

        assert!(path.exists());
        assert_eq!(size, fs::metadata(&path).unwrap().len());

        // Read back and verify
        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (2, 2));
        assert_eq!(back.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(back.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_write_png_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.png");

        write_png(&checker(4), &path).unwrap();

        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.png");

        write_png(&checker(4), &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("existing.png");
        fs::write(&path, b"old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o664)).unwrap();

        write_png(&checker(4), &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("only.png");

        write_png(&checker(4), &path).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = write_png(&checker(2), &blocker.join("out.png")).unwrap_err();
        assert!(matches!(err, AvatarError::OutputWrite { .. }));
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = encode_png(&checker(2)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_resize_nearest_keeps_blocks() {
        let img = checker(2);
        let up = resize(&img, 8, 8, ResizeKernel::Nearest);

        assert_eq!(up.dimensions(), (8, 8));
        assert_eq!(up.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(up.get_pixel(3, 3).0, [0, 0, 0]);
        assert_eq!(up.get_pixel(4, 0).0, [255, 255, 255]);
        for px in up.pixels() {
            assert!(px.0 == [0, 0, 0] || px.0 == [255, 255, 255]);
        }
    }

    #[test]
    fn test_resize_lanczos_blends_edges() {
        let img = checker(4);
        let up = resize(&img, 32, 32, ResizeKernel::Lanczos);

        assert_eq!(up.dimensions(), (32, 32));
        assert!(up
            .pixels()
            .any(|px| px.0 != [0, 0, 0] && px.0 != [255, 255, 255]));
    }

    #[test]
    fn test_resize_area_averages() {
        let img = checker(8);
        let down = resize(&img, 1, 1, ResizeKernel::Area);

        let [r, g, b] = down.get_pixel(0, 0).0;
        assert!((120..=135).contains(&r), "got {}", r);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_resize_same_size_is_identity() {
        let img = checker(4);
        assert_eq!(resize(&img, 4, 4, ResizeKernel::Lanczos), img);
    }
}
