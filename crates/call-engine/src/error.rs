//! Error handling for the call engine

use std::net::SocketAddrV4;

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Header codec failure
    #[error("Packet error: {0}")]
    Packet(#[from] ddgen_packet_core::Error),

    /// Audio encoder failure
    #[error("Codec error: {0}")]
    Codec(#[from] ddgen_codec_core::CodecError),

    /// A sink could not deliver a frame
    #[error("Sink write failed: {reason}")]
    SinkWriteFailure { reason: String },

    /// A raw socket could not be created or configured
    #[error("Socket setup failed for {destination}: {reason}")]
    SocketSetupFailure {
        destination: SocketAddrV4,
        reason: String,
    },

    /// File or socket I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Call parameters could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Create a sink write failure
    pub fn sink_write(reason: impl Into<String>) -> Self {
        Self::SinkWriteFailure {
            reason: reason.into(),
        }
    }

    /// Create a socket setup failure
    pub fn socket_setup(destination: SocketAddrV4, reason: impl ToString) -> Self {
        Self::SocketSetupFailure {
            destination,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EngineError::sink_write("closed").to_string(),
            "Sink write failed: closed"
        );

        let setup = EngineError::socket_setup(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 5004), "permission denied");
        assert_eq!(
            setup.to_string(),
            "Socket setup failed for 127.0.0.1:5004: permission denied"
        );
    }
}
