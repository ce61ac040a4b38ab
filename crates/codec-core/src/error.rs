//! Error handling for the codec library

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Missing or malformed input to an encoder
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Unsupported codec type
    #[error("Unsupported codec type: {codec_type}")]
    UnsupportedCodec { codec_type: String },

    /// Invalid frame size
    #[error("Invalid frame size: expected {expected}, got {actual}")]
    InvalidFrameSize { expected: usize, actual: usize },

    /// Output buffer too small for an encoded frame
    #[error("Buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
}

impl CodecError {
    /// Create a new invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a new unsupported codec error
    pub fn unsupported_codec(codec_type: impl Into<String>) -> Self {
        Self::UnsupportedCodec {
            codec_type: codec_type.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// A recoverable error affects one frame; the encoder can be used again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::UnsupportedCodec { .. } => false,
            Self::InvalidArgument { .. }
            | Self::InvalidFrameSize { .. }
            | Self::BufferTooSmall { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedCodec { .. } => ErrorCategory::Configuration,
            Self::InvalidArgument { .. } | Self::InvalidFrameSize { .. } => ErrorCategory::Processing,
            Self::BufferTooSmall { .. } => ErrorCategory::Memory,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration and parameter errors
    Configuration,
    /// Audio processing errors
    Processing,
    /// Buffer sizing errors
    Memory,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Processing => write!(f, "Processing"),
            Self::Memory => write!(f, "Memory"),
        }
    }
}
