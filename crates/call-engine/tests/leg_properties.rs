//! Frame cadence of a single leg

use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;

use ddgen_audio_core::SilenceGenerator;
use ddgen_call_engine::{CallLeg, LegIdentifiers, MemorySink};
use ddgen_codec_core::{CodecFactory, CodecType};
use proptest::prelude::*;

fn leg(ids: LegIdentifiers, codec: CodecType, sink: Arc<MemorySink>) -> CallLeg {
    CallLeg::new(
        SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 32514),
        SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 2), 32514),
        ids,
        CodecFactory::create(codec),
        Box::new(SilenceGenerator),
        sink,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn frames_follow_elapsed_time(
        deltas in prop::collection::vec(0u32..100, 1..40),
        timestamp in any::<u32>(),
        sequence_number in any::<u16>(),
        g722 in any::<bool>(),
    ) {
        let codec = if g722 { CodecType::G722 } else { CodecType::G711Pcma };
        let ids = LegIdentifiers { ip_identification: 1, timestamp, ssrc: 7, sequence_number };
        let sink = Arc::new(MemorySink::new());
        let mut leg = leg(ids, codec, sink.clone());

        let mut total = 0u32;
        let mut emitted = 0usize;
        for delta in deltas {
            total += delta;
            emitted += leg.step(delta).unwrap();
        }

        let expected = (total / 20) as usize;
        prop_assert_eq!(emitted, expected);
        prop_assert_eq!(sink.len(), expected);
        prop_assert_eq!(leg.accumulated_ms(), total % 20);
        prop_assert_eq!(
            leg.rtp_header().sequence_number,
            sequence_number.wrapping_add(expected as u16)
        );
        prop_assert_eq!(
            leg.rtp_header().timestamp,
            timestamp.wrapping_add(expected as u32 * codec.frame_size() as u32)
        );
        prop_assert_eq!(leg.ip_identification(), 1u16.wrapping_add(expected as u16));
    }
}
