//! One mirror call stepped for its whole lifetime

use std::net::Ipv4Addr;
use std::sync::Arc;

use ddgen_audio_core::GeneratorKind;
use ddgen_call_engine::{Call, CallOptions, MemorySink, NullCallLogger};
use ddgen_codec_core::CodecType;
use ddgen_packet_core::{verify_frame_checksums, Ipv4Header, RtpHeader};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn mirror_call_emits_fifty_frames_per_leg_in_one_second() {
    let sink = Arc::new(MemorySink::new());
    let options = CallOptions {
        duration_ms: 1000,
        codec: CodecType::G711Pcma,
        generator: GeneratorKind::SingleTone,
        sink: sink.clone(),
        logger: Arc::new(NullCallLogger),
    };
    let a = Ipv4Addr::new(172, 24, 101, 54);
    let b = Ipv4Addr::new(172, 24, 101, 55);
    let mut call = Call::mirror(a, b, &options, &mut SmallRng::seed_from_u64(2024)).unwrap();

    let mut still_running = Vec::new();
    for _ in 0..50 {
        still_running.push(call.step(20));
    }
    assert!(still_running[..49].iter().all(|&r| r));
    assert!(!still_running[49]);
    assert_eq!(call.remaining_ms(), 0);

    let frames = sink.take();
    assert_eq!(frames.len(), 100);

    let mut from_a = Vec::new();
    let mut from_b = Vec::new();
    for frame in &frames {
        assert_eq!(frame.len(), 14 + 20 + 8 + 12 + 160);
        assert!(verify_frame_checksums(frame));

        let ip = Ipv4Header::parse(&mut &frame[14..34]).unwrap();
        let rtp = RtpHeader::parse(&mut &frame[42..54]).unwrap();
        if ip.source == a {
            assert_eq!(ip.destination, b);
            from_a.push(rtp);
        } else {
            assert_eq!(ip.source, b);
            assert_eq!(ip.destination, a);
            from_b.push(rtp);
        }
    }
    assert_eq!(from_a.len(), 50);
    assert_eq!(from_b.len(), 50);

    for stream in [&from_a, &from_b] {
        for pair in stream.windows(2) {
            assert_eq!(pair[1].sequence_number, pair[0].sequence_number.wrapping_add(1));
            assert_eq!(pair[1].timestamp, pair[0].timestamp.wrapping_add(160));
            assert_eq!(pair[1].ssrc, pair[0].ssrc);
            assert_eq!(pair[1].payload_type, 8);
        }
    }
}

#[test]
fn every_codec_produces_valid_frames() {
    for codec in CodecType::ALL {
        let sink = Arc::new(MemorySink::new());
        let options = CallOptions {
            duration_ms: 100,
            codec,
            generator: GeneratorKind::SingleTone,
            sink: sink.clone(),
            logger: Arc::new(NullCallLogger),
        };
        let mut call = Call::mirror(
            Ipv4Addr::new(10, 1, 0, 1),
            Ipv4Addr::new(10, 1, 0, 2),
            &options,
            &mut SmallRng::seed_from_u64(1),
        )
        .unwrap();
        while call.step(20) {}

        let frames = sink.take();
        assert_eq!(frames.len(), 10, "{}", codec);
        for frame in &frames {
            assert_eq!(frame.len(), 54 + codec.payload_size());
            assert!(verify_frame_checksums(frame), "{}", codec);
            assert_eq!(frame[43] & 0x7f, codec.payload_type());
        }
    }
}
