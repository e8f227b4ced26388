//! Error types for brightness analysis operations

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for brightness analysis operations
pub type Result<T> = std::result::Result<T, BrightnessError>;

/// Error taxonomy for loading and analyzing images
#[derive(Error, Debug)]
pub enum BrightnessError {
    /// The image path is missing or unreadable
    #[error("Could not open [{}]: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a recognized or supported image format
    #[error("Failed to decode image ({context})")]
    Decode {
        context: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// A segment was requested outside the image's horizontal extent
    #[error("Segment [{x_min}, {x_max}) is outside image width {width}")]
    SegmentOutOfBounds { x_min: u32, x_max: u32, width: u32 },

    /// The partial results did not cover every pixel exactly once
    #[error("Partition coverage mismatch: expected {expected} pixels, summed {actual}")]
    PixelCountMismatch { expected: u64, actual: u64 },

    /// A partition task panicked or never delivered its result
    #[error("Partition task failed: {0}")]
    TaskFailed(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BrightnessError {
    /// Create a file access error for the given path
    pub fn file_access<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a decode error carrying the decoder's cause
    pub fn decode<S: Into<String>>(context: S, source: image::ImageError) -> Self {
        Self::Decode {
            context: context.into(),
            source: Some(source),
        }
    }

    /// Create a decode error for content whose format could not be recognized
    pub fn unrecognized_format<S: Into<String>>(context: S) -> Self {
        Self::Decode {
            context: context.into(),
            source: None,
        }
    }

    /// Create a new task failure error
    pub fn task_failed<S: Into<String>>(msg: S) -> Self {
        Self::TaskFailed(msg.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
        recommended: Option<T>,
    ) -> Self {
        let recommendation = match recommended {
            Some(rec) => format!(" Recommended: {}", rec),
            None => String::new(),
        };

        Self::InvalidConfig(format!(
            "Invalid {}: {} (valid range: {}).{}",
            parameter, value, valid_range, recommendation
        ))
    }

    /// Whether this error came from loading an image rather than analyzing it
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::FileAccess { .. } | Self::Decode { .. })
    }
}
