//! # Error Types
//!
//! A single error enum covers the codec core and the image/config layers
//! around it. The binary maps each variant to its own process exit code via
//! [`StegoError::exit_code`].

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StegoError>;

#[derive(Debug, Error)]
pub enum StegoError {
    /// Payload (message plus terminator) needs more bits than the grid has slots.
    #[error("message is too long to be encoded in the given image: need {required} bits but only {available} are available")]
    CapacityExceeded { required: usize, available: usize },

    /// Invalid mode, delimiter, or a mode the image layout cannot support.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Character that cannot be expressed as a single 8-bit code point,
    /// or a NUL under zero-byte termination.
    #[error("character {ch:?} at position {index} cannot be encoded as a single byte")]
    UnsupportedCharacter { ch: char, index: usize },

    /// Pixel buffer does not match its declared dimensions.
    #[error("invalid pixel grid: {0}")]
    InvalidGrid(String),

    #[error("failed to open image {}: {source}", path.display())]
    ImageAccess {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save image {}: {source}", path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to load config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl StegoError {
    /// Process exit code for this error kind. `2` is left to clap for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            StegoError::CapacityExceeded { .. } => 3,
            StegoError::Configuration(_) | StegoError::Config { .. } => 4,
            StegoError::ImageAccess { .. } => 5,
            StegoError::UnsupportedFormat(_) => 6,
            StegoError::UnsupportedCharacter { .. } => 7,
            StegoError::InvalidGrid(_) | StegoError::ImageSave { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let capacity = StegoError::CapacityExceeded { required: 10, available: 5 };
        let config = StegoError::Configuration("bad mode".to_string());
        let format = StegoError::UnsupportedFormat("webp".to_string());
        let ch = StegoError::UnsupportedCharacter { ch: '€', index: 0 };

        assert_eq!(capacity.exit_code(), 3);
        assert_eq!(config.exit_code(), 4);
        assert_eq!(format.exit_code(), 6);
        assert_eq!(ch.exit_code(), 7);
    }

    #[test]
    fn test_capacity_message_mentions_sizes() {
        let err = StegoError::CapacityExceeded { required: 480, available: 75 };
        let text = err.to_string();
        assert!(text.contains("480"));
        assert!(text.contains("75"));
    }
}
