//! Configuration file (avatar.yaml) parsing.
//!
//! The config file supplies defaults for the generate command. Every key is
//! optional; command-line flags take precedence over it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AvatarError, Result};
use crate::render::AvatarOptions;

/// Defaults loaded from avatar.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Default pixel grid size.
    pub pixel_size: Option<u32>,

    /// Default output image size.
    pub output_size: Option<u32>,

    /// Default style identifier.
    pub style: Option<String>,

    /// Directory for generated avatars (default: next to each input).
    pub output_dir: Option<PathBuf>,
}

impl Manifest {
    /// Load manifest from an avatar.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AvatarError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
            help: None,
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| AvatarError::Config {
            message: format!("Invalid config: {}", e),
            help: Some("Valid keys: pixel_size, output_size, style, output_dir".to_string()),
        })
    }

    /// Merge command-line values over the config and built-in defaults.
    pub fn resolve_options(
        &self,
        pixel_size: Option<u32>,
        output_size: Option<u32>,
        style: Option<&str>,
    ) -> AvatarOptions {
        let defaults = AvatarOptions::default();

        AvatarOptions {
            pixel_size: pixel_size.or(self.pixel_size).unwrap_or(defaults.pixel_size),
            output_size: output_size.or(self.output_size).unwrap_or(defaults.output_size),
            style: style
                .map(str::to_string)
                .or_else(|| self.style.clone())
                .unwrap_or(defaults.style),
        }
    }
}
