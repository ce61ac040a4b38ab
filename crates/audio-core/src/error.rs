//! Error handling for waveform generation

use thiserror::Error;

/// Result type alias for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Error type for audio operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Generator name not recognized
    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),
}
