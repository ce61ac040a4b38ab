//! G.711 A-law and μ-law encoders
//!
//! 160 samples (20 ms at 8 kHz) in, 160 bytes out.

pub mod reference;

use crate::error::Result;
use crate::types::{validate_frame, AudioCodec, CodecInfo, CodecType};

pub use reference::{alaw_compress, ulaw_compress};

/// G.711 companding law
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum G711Variant {
    /// A-law (PCMA)
    ALaw,
    /// μ-law (PCMU)
    MuLaw,
}

/// Stateless G.711 encoder
#[derive(Debug, Clone)]
pub struct G711Codec {
    variant: G711Variant,
}

impl G711Codec {
    /// Create an A-law encoder
    pub fn new_pcma() -> Self {
        Self {
            variant: G711Variant::ALaw,
        }
    }

    /// Create a μ-law encoder
    pub fn new_pcmu() -> Self {
        Self {
            variant: G711Variant::MuLaw,
        }
    }

    /// Companding law of this encoder
    pub fn variant(&self) -> G711Variant {
        self.variant
    }

    fn codec_type(&self) -> CodecType {
        match self.variant {
            G711Variant::ALaw => CodecType::G711Pcma,
            G711Variant::MuLaw => CodecType::G711Pcmu,
        }
    }
}

impl AudioCodec for G711Codec {
    fn encode(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize> {
        let info = self.info();
        validate_frame(samples, output, info.frame_size, info.payload_size)?;

        let compress: fn(i16) -> u8 = match self.variant {
            G711Variant::ALaw => alaw_compress,
            G711Variant::MuLaw => ulaw_compress,
        };
        for (out, &sample) in output.iter_mut().zip(samples) {
            *out = compress(sample);
        }

        Ok(samples.len())
    }

    fn info(&self) -> CodecInfo {
        self.codec_type().info()
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_pcma_frame() {
        let mut codec = G711Codec::new_pcma();
        assert_eq!(codec.frame_size(), 160);
        assert_eq!(codec.payload_type(), 8);
        assert_eq!(codec.frame_duration_ms(), 20);

        let encoded = codec.encode_frame(&[0i16; 160]).unwrap();
        assert_eq!(encoded.len(), 160);
        assert!(encoded.iter().all(|&b| b == 0xD5));
    }

    #[test]
    fn test_pcmu_frame() {
        let mut codec = G711Codec::new_pcmu();
        assert_eq!(codec.payload_type(), 0);

        let samples: Vec<i16> = (0..160).map(|i| if i % 2 == 0 { 1024 } else { -1024 }).collect();
        let encoded = codec.encode_frame(&samples).unwrap();
        assert_eq!(&encoded[..4], &[0xCE, 0x4E, 0xCE, 0x4E]);
    }

    #[test]
    fn test_invalid_input() {
        let mut codec = G711Codec::new_pcma();
        let mut out = [0u8; 160];
        assert!(matches!(
            codec.encode(&[], &mut out),
            Err(CodecError::InvalidArgument { .. })
        ));
        assert!(matches!(
            codec.encode(&[0; 159], &mut out),
            Err(CodecError::InvalidFrameSize { .. })
        ));
        assert!(matches!(
            codec.encode(&[0; 160], &mut out[..10]),
            Err(CodecError::BufferTooSmall { .. })
        ));
    }
}
