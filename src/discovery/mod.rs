//! Input discovery and configuration lookup.
//!
//! Finds the images to convert (files, directories, dropped paths) and the
//! optional `avatar.yaml` config that supplies generate defaults.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use retro_avatar::discovery::load_config;
//!
//! let config = load_config(Path::new("."), None)?;
//! let options = config.manifest.resolve_options(None, None, Some("retro"));
//! # Ok::<(), retro_avatar::AvatarError>(())
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::{AvatarError, Result};

pub use manifest::Manifest;
pub use scanner::{
    clean_path, collect_inputs, default_output_path, is_generated_avatar, is_supported_image,
    output_file_name, output_path_in, scan_directory, InputFile, SUPPORTED_EXTENSIONS,
};

/// The name of the config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "avatar.yaml";

/// A config file together with where it came from.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    /// The loaded manifest (default if no config file was found).
    pub manifest: Manifest,

    /// Path of the config file, if one was read.
    pub path: Option<PathBuf>,
}

/// Load the generate config.
///
/// An `explicit` path must exist. Otherwise `avatar.yaml` in `root` is used
/// when present, and built-in defaults when not.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AvatarError::Config {
                    message: format!("Config file not found: {}", path.display()),
                    help: None,
                });
            }
            path.to_path_buf()
        }
        None => {
            let path = root.join(CONFIG_FILENAME);
            if !path.is_file() {
                return Ok(LoadedConfig::default());
            }
            path
        }
    };

    Ok(LoadedConfig {
        manifest: Manifest::load(&path)?,
        path: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_no_config_uses_defaults() {
        let dir = tempdir().unwrap();

        let config = load_config(dir.path(), None).unwrap();

        assert!(config.path.is_none());
        assert_eq!(config.manifest, Manifest::default());
    }

    #[test]
    fn test_config_in_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "style: 4bit\npixel_size: 24\n").unwrap();

        let config = load_config(dir.path(), None).unwrap();

        assert_eq!(config.path, Some(dir.path().join(CONFIG_FILENAME)));
        assert_eq!(config.manifest.style.as_deref(), Some("4bit"));
        assert_eq!(config.manifest.pixel_size, Some(24));
    }

    #[test]
    fn test_explicit_config_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "style: 4bit\n").unwrap();
        let other = dir.path().join("other.yaml");
        fs::write(&other, "style: notion\n").unwrap();

        let config = load_config(dir.path(), Some(&other)).unwrap();

        assert_eq!(config.manifest.style.as_deref(), Some("notion"));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");

        let err = load_config(dir.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, AvatarError::Config { .. }));
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "pixel_size: [1, 2").unwrap();

        assert!(load_config(dir.path(), None).is_err());
    }
}
