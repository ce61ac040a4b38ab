//! Core types and traits for the codec library

use crate::error::{CodecError, Result};
use std::fmt;
use std::str::FromStr;

/// Primary trait for audio encoders
///
/// One instance encodes one stream. Encoders with internal state (G.722)
/// carry it from one frame to the next until [`AudioCodec::reset`].
pub trait AudioCodec: Send + Sync {
    /// Encode one frame of 16-bit PCM into `output`
    ///
    /// # Arguments
    ///
    /// * `samples` - exactly [`AudioCodec::frame_size`] samples
    /// * `output` - at least [`AudioCodec::payload_size`] bytes
    ///
    /// # Returns
    ///
    /// Number of bytes written to `output`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for empty input, `InvalidFrameSize` for a short or
    /// long frame, `BufferTooSmall` when `output` cannot hold the payload.
    fn encode(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize>;

    /// Encode one frame into a freshly allocated buffer
    fn encode_frame(&mut self, samples: &[i16]) -> Result<Vec<u8>> {
        let mut output = vec![0u8; self.payload_size()];
        let written = self.encode(samples, &mut output)?;
        output.truncate(written);
        Ok(output)
    }

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state to its documented initial values
    fn reset(&mut self);

    /// Samples consumed per frame
    fn frame_size(&self) -> usize {
        self.info().frame_size
    }

    /// Bytes produced per frame
    fn payload_size(&self) -> usize {
        self.info().payload_size
    }

    /// RTP payload type
    fn payload_type(&self) -> u8 {
        self.info().payload_type
    }

    /// Duration of one frame in milliseconds
    fn frame_duration_ms(&self) -> u32 {
        let info = self.info();
        (info.frame_size as u32 * 1000) / info.sample_rate
    }
}

/// Checks shared by every encoder before it touches its input
pub(crate) fn validate_frame(samples: &[i16], output: &[u8], frame_size: usize, payload_size: usize) -> Result<()> {
    if samples.is_empty() {
        return Err(CodecError::invalid_argument("no PCM samples supplied"));
    }
    if samples.len() != frame_size {
        return Err(CodecError::InvalidFrameSize {
            expected: frame_size,
            actual: samples.len(),
        });
    }
    if output.len() < payload_size {
        return Err(CodecError::BufferTooSmall {
            needed: payload_size,
            actual: output.len(),
        });
    }
    Ok(())
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name (e.g., "PCMU", "PCMA", "G722")
    pub name: &'static str,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u8,
    /// Bitrate in bits per second
    pub bitrate: u32,
    /// Frame size in samples
    pub frame_size: usize,
    /// Encoded frame size in bytes
    pub payload_size: usize,
    /// RTP payload type
    pub payload_type: u8,
}

/// Audio codec types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodecType {
    /// G.711 A-law (PCMA)
    #[default]
    G711Pcma,
    /// G.711 μ-law (PCMU)
    G711Pcmu,
    /// G.722 wideband, mode 1 (64 kbit/s)
    G722,
}

impl CodecType {
    /// All supported codec types
    pub const ALL: [CodecType; 3] = [Self::G711Pcma, Self::G711Pcmu, Self::G722];

    /// Get the codec name
    pub fn name(self) -> &'static str {
        match self {
            Self::G711Pcmu => "PCMU",
            Self::G711Pcma => "PCMA",
            Self::G722 => "G722",
        }
    }

    /// Get the sample rate
    pub fn sample_rate(self) -> u32 {
        match self {
            Self::G711Pcmu | Self::G711Pcma => 8000,
            Self::G722 => 16000,
        }
    }

    /// Get the standard RTP payload type
    pub fn payload_type(self) -> u8 {
        match self {
            Self::G711Pcmu => 0,
            Self::G711Pcma => 8,
            Self::G722 => 9,
        }
    }

    /// Samples per 20 ms frame
    pub fn frame_size(self) -> usize {
        match self {
            Self::G711Pcmu | Self::G711Pcma => 160,
            Self::G722 => 320,
        }
    }

    /// Encoded bytes per 20 ms frame
    pub fn payload_size(self) -> usize {
        match self {
            Self::G711Pcmu | Self::G711Pcma => 160,
            // one byte per sample pair
            Self::G722 => 160,
        }
    }

    /// Codec information for this type
    pub fn info(self) -> CodecInfo {
        CodecInfo {
            name: self.name(),
            sample_rate: self.sample_rate(),
            channels: 1,
            bitrate: 64000,
            frame_size: self.frame_size(),
            payload_size: self.payload_size(),
            payload_type: self.payload_type(),
        }
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CodecType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PCMA" | "ALAW" | "G711A" => Ok(Self::G711Pcma),
            "PCMU" | "ULAW" | "MULAW" | "G711U" => Ok(Self::G711Pcmu),
            "G722" => Ok(Self::G722),
            _ => Err(CodecError::unsupported_codec(s)),
        }
    }
}
