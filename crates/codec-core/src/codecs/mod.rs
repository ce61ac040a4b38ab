//! Codec implementations and factory

use crate::types::{AudioCodec, CodecType};

pub mod g711;
pub mod g722;

/// Codec factory for creating encoder instances
pub struct CodecFactory;

impl CodecFactory {
    /// Create a fresh encoder of the given type
    pub fn create(codec_type: CodecType) -> Box<dyn AudioCodec> {
        match codec_type {
            CodecType::G711Pcma => Box::new(g711::G711Codec::new_pcma()),
            CodecType::G711Pcmu => Box::new(g711::G711Codec::new_pcmu()),
            CodecType::G722 => Box::new(g722::G722Codec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_creation() {
        for codec_type in CodecType::ALL {
            let codec = CodecFactory::create(codec_type);
            assert_eq!(codec.info(), codec_type.info());
            assert_eq!(codec.frame_duration_ms(), 20);
        }
    }

    #[test]
    fn test_codec_creation_from_parsed_name() {
        let codec = CodecFactory::create("pcmu".parse().unwrap());
        assert_eq!(codec.payload_type(), 0);
        assert_eq!(CodecFactory::create("g722".parse().unwrap()).info().name, "G722");
    }
}
