//! Property tests across every encoder

use ddgen_codec_core::codecs::g711::{alaw_compress, ulaw_compress};
use ddgen_codec_core::{AudioCodec, CodecFactory, CodecType};
use proptest::prelude::*;

proptest! {
    #[test]
    fn g711_sign_follows_input(sample in any::<i16>()) {
        let expected = if sample >= 0 { 0x80 } else { 0x00 };
        prop_assert_eq!(ulaw_compress(sample) & 0x80, expected);
        prop_assert_eq!((alaw_compress(sample) ^ 0x55) & 0x80, expected);
    }

    #[test]
    fn g711_frames_encode_samplewise(samples in proptest::collection::vec(any::<i16>(), 160)) {
        let mut pcma = CodecFactory::create(CodecType::G711Pcma);
        let mut pcmu = CodecFactory::create(CodecType::G711Pcmu);
        let a = pcma.encode_frame(&samples).unwrap();
        let u = pcmu.encode_frame(&samples).unwrap();
        for (i, &sample) in samples.iter().enumerate() {
            prop_assert_eq!(a[i], alaw_compress(sample));
            prop_assert_eq!(u[i], ulaw_compress(sample));
        }
    }

    #[test]
    fn g722_accepts_any_frame(samples in proptest::collection::vec(any::<i16>(), 320)) {
        let mut codec = CodecFactory::create(CodecType::G722);
        let encoded = codec.encode_frame(&samples).unwrap();
        prop_assert_eq!(encoded.len(), 160);
    }
}

#[test]
fn every_codec_reports_a_twenty_millisecond_frame() {
    for codec_type in CodecType::ALL {
        let codec = CodecFactory::create(codec_type);
        assert_eq!(codec.frame_duration_ms(), 20, "{}", codec_type);
        assert_eq!(codec.payload_size(), 160, "{}", codec_type);
    }
}
