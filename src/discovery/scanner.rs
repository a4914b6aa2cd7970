//! Input path handling.
//!
//! Cleans pasted or dropped paths, recognises image files by extension,
//! expands directories into their images and names the output files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::registry::StyleRegistry;

/// Image extensions accepted as input (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "tiff", "bmp"];

/// Clean a path typed or dragged into a terminal.
///
/// Trims whitespace, drops a surrounding quote on either end and unescapes
/// `\ ` to a plain space.
pub fn clean_path(raw: &str) -> String {
    let s = raw.trim();
    let s = s.strip_prefix(['\'', '"']).unwrap_or(s);
    let s = s.strip_suffix(['\'', '"']).unwrap_or(s);
    s.replace("\\ ", " ")
}

/// Check if a path has a supported image extension.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// File name for an avatar: `<stem>_<style>.png`.
pub fn output_file_name(input: &Path, style: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "avatar".to_string());
    format!("{}_{}.png", stem, style)
}

/// Default output path: next to the input, named `<stem>_<style>.png`.
pub fn default_output_path(input: &Path, style: &str) -> PathBuf {
    input.with_file_name(output_file_name(input, style))
}

/// Output path inside `dir`, named `<stem>_<style>.png`.
pub fn output_path_in(dir: &Path, input: &Path, style: &str) -> PathBuf {
    dir.join(output_file_name(input, style))
}

/// Check if a path looks like an avatar this tool wrote: a PNG whose stem
/// ends in `_<style>` for a builtin style.
pub fn is_generated_avatar(path: &Path) -> bool {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };

    is_png
        && StyleRegistry::builtin()
            .map(|registry| {
                registry.ids().any(|id| {
                    stem.strip_suffix(id)
                        .is_some_and(|rest| rest.len() > 1 && rest.ends_with('_'))
                })
            })
            .unwrap_or(false)
}

/// Recursively find supported images under `root`, sorted by path.
///
/// Avatars from an earlier run (see [`is_generated_avatar`]) are skipped.
pub fn scan_directory(root: &Path) -> Vec<PathBuf> {
    let mut images: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_supported_image(p) && !is_generated_avatar(p))
        .collect();

    images.sort();
    images
}

/// One input image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,

    /// Directory of the file relative to the scanned root. Empty for files
    /// named directly.
    pub subdir: PathBuf,
}

impl InputFile {
    fn direct(path: PathBuf) -> Self {
        Self {
            path,
            subdir: PathBuf::new(),
        }
    }
}

/// Expand input arguments into individual files.
///
/// Directories are replaced by the images inside them. Everything else is
/// passed through untouched so the pipeline can report it.
pub fn collect_inputs(paths: &[PathBuf]) -> Vec<InputFile> {
    let mut inputs = Vec::new();

    for path in paths {
        if !path.is_dir() {
            inputs.push(InputFile::direct(path.clone()));
            continue;
        }

        for image in scan_directory(path) {
            let subdir = image
                .strip_prefix(path)
                .ok()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
                .unwrap_or_default();
            inputs.push(InputFile {
                path: image,
                subdir,
            });
        }
    }

    inputs
}
