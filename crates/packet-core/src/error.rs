use thiserror::Error;

/// Error type for header encoding and decoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer too small
    #[error("Buffer too small for header: need {required} but have {available}")]
    BufferTooSmall {
        required: usize,
        available: usize,
    },

    /// Invalid packet format
    #[error("Invalid packet format: {0}")]
    InvalidPacket(String),

    /// Frame would exceed the largest capturable frame
    #[error("Frame of {size} bytes exceeds the maximum of {max}")]
    FrameTooLarge { size: usize, max: usize },
}

impl Error {
    /// Fails with [`Error::BufferTooSmall`] unless `available >= required`
    pub(crate) fn ensure_len(required: usize, available: usize) -> Result<(), Error> {
        if available < required {
            return Err(Error::BufferTooSmall {
                required,
                available,
            });
        }
        Ok(())
    }
}
