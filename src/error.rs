use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for avatar operations
#[derive(Error, Diagnostic, Debug)]
pub enum AvatarError {
    #[error("Invalid parameter: {message}")]
    #[diagnostic(code(avatar::invalid_parameter))]
    InvalidParameter {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unknown style: {style}")]
    #[diagnostic(code(avatar::invalid_parameter::style))]
    InvalidStyle {
        style: String,
        #[help]
        help: Option<String>,
    },

    #[error("Input not found: {path}: {message}")]
    #[diagnostic(code(avatar::input))]
    InputNotFound { path: PathBuf, message: String },

    #[error("Failed to load image {path}: {message}")]
    #[diagnostic(code(avatar::load))]
    ImageLoad { path: PathBuf, message: String },

    #[error("Pixel buffer length mismatch: expected {expected} bytes, got {actual}")]
    #[diagnostic(code(avatar::buffer))]
    BufferLengthMismatch { expected: usize, actual: usize },

    #[error("Failed to write {path}: {message}")]
    #[diagnostic(code(avatar::output))]
    OutputWrite { path: PathBuf, message: String },

    #[error("Config error: {message}")]
    #[diagnostic(code(avatar::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("{failed} of {total} avatars failed")]
    #[diagnostic(code(avatar::batch))]
    Batch { failed: usize, total: usize },
}

impl AvatarError {
    /// True for errors raised by request validation, before any I/O.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            AvatarError::InvalidParameter { .. } | AvatarError::InvalidStyle { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AvatarError>;
