//! One directional RTP stream
//!
//! A leg owns its encoder, its waveform generator and a frame buffer whose
//! headers are built once. Every [`CallLeg::step`] adds wall time to the
//! leg's budget and emits one frame for every full codec frame interval:
//!
//! ```text
//! generate PCM -> encode payload -> RTP header -> UDP checksum
//!     -> IPv4 checksum -> Ethernet header -> sink
//! ```

use std::net::SocketAddrV4;
use std::sync::Arc;

use ddgen_audio_core::WaveformGenerator;
use ddgen_codec_core::AudioCodec;
use ddgen_packet_core::{EthernetHeader, Frame, Ipv4Header, RtpHeader, UdpHeader, UDP_HEADER_SIZE};
use rand::{Rng, RngCore};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::params::StreamParameters;
use crate::sink::PacketSink;

/// Starting identifiers of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegIdentifiers {
    /// IPv4 identification of the first frame
    pub ip_identification: u16,
    /// RTP timestamp of the first frame
    pub timestamp: u32,
    /// RTP synchronization source
    pub ssrc: u32,
    /// RTP sequence number of the first frame
    pub sequence_number: u16,
}

impl LegIdentifiers {
    /// Random RTP identifiers with a fixed IPv4 identification
    pub fn random(ip_identification: u16, rng: &mut dyn RngCore) -> Self {
        let timestamp = rng.gen_range(0..=u32::MAX);
        let ssrc = rng.gen_range(0..=u32::MAX);
        let sequence_number = rng.gen_range(0..=u16::MAX);
        Self {
            ip_identification,
            timestamp,
            ssrc,
            sequence_number,
        }
    }
}

/// Packet stream from one address:port to another
pub struct CallLeg {
    source: SocketAddrV4,
    destination: SocketAddrV4,
    ethernet: EthernetHeader,
    ip: Ipv4Header,
    udp: UdpHeader,
    rtp: RtpHeader,
    frame: Frame,
    pcm: Vec<i16>,
    codec: Box<dyn AudioCodec>,
    generator: Box<dyn WaveformGenerator>,
    sink: Arc<dyn PacketSink>,
    frame_duration_ms: u32,
    samples_per_frame: u32,
    accumulated_ms: u32,
    frames_emitted: u64,
    sink_failures: u64,
}

impl CallLeg {
    /// Build the leg and its header template
    pub fn new(
        source: SocketAddrV4,
        destination: SocketAddrV4,
        ids: LegIdentifiers,
        codec: Box<dyn AudioCodec>,
        generator: Box<dyn WaveformGenerator>,
        sink: Arc<dyn PacketSink>,
    ) -> Result<Self> {
        let frame_duration_ms = codec.frame_duration_ms();
        if frame_duration_ms == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "codec {} has a zero frame duration",
                codec.info().name
            )));
        }

        let frame = Frame::new(codec.payload_size())?;
        let udp = UdpHeader::new(
            source.port(),
            destination.port(),
            (frame.udp_len() - UDP_HEADER_SIZE) as u16,
        );
        let ip = Ipv4Header::udp(*source.ip(), *destination.ip(), udp.length, ids.ip_identification);
        let rtp = RtpHeader::new(codec.payload_type(), ids.sequence_number, ids.timestamp, ids.ssrc);
        let ethernet = EthernetHeader::for_ipv4(*source.ip(), *destination.ip());

        Ok(Self {
            source,
            destination,
            ethernet,
            ip,
            udp,
            rtp,
            frame,
            pcm: vec![0; codec.frame_size()],
            samples_per_frame: codec.frame_size() as u32,
            codec,
            generator,
            sink,
            frame_duration_ms,
            accumulated_ms: 0,
            frames_emitted: 0,
            sink_failures: 0,
        })
    }

    /// Advance the leg by `delta_ms` and emit every frame that became due
    ///
    /// Returns the number of frames emitted. A header or codec failure stops
    /// this step; the failed frame is not emitted and its time stays pending.
    /// A sink failure is logged and the frame counts as sent.
    pub fn step(&mut self, delta_ms: u32) -> Result<usize> {
        self.accumulated_ms = self.accumulated_ms.saturating_add(delta_ms);

        let mut emitted = 0;
        while self.accumulated_ms >= self.frame_duration_ms {
            self.emit()?;
            emitted += 1;
        }
        Ok(emitted)
    }

    fn emit(&mut self) -> Result<()> {
        self.generator.generate(&mut self.pcm, self.frame_duration_ms);
        self.codec.encode(&self.pcm, self.frame.payload_mut())?;

        self.rtp.write_to(self.frame.rtp_mut())?;
        let pseudo = self.ip.pseudo_header();
        self.udp.update_checksum_and_write(self.frame.udp_segment_mut(), &pseudo)?;
        self.ip.update_checksum_and_write(self.frame.ipv4_mut())?;
        self.ethernet.write_to(self.frame.ethernet_mut())?;

        if let Err(e) = self.sink.consume(self.frame.as_bytes()) {
            self.sink_failures += 1;
            warn!("Frame {} -> {} dropped: {}", self.source, self.destination, e);
        }

        self.accumulated_ms -= self.frame_duration_ms;
        self.rtp.advance(self.samples_per_frame);
        self.ip.identification = self.ip.identification.wrapping_add(1);
        self.frames_emitted += 1;
        Ok(())
    }

    /// Snapshot of the leg's identifiers for the call log
    pub fn parameters(&self) -> StreamParameters {
        StreamParameters {
            source_ip: self.source.ip().to_string(),
            source_port: self.source.port(),
            destination_ip: self.destination.ip().to_string(),
            destination_port: self.destination.port(),
            payload: self.rtp.payload_type,
            timestamp: self.rtp.timestamp,
            ssrc: self.rtp.ssrc,
            sequence_number: self.rtp.sequence_number,
            tones: self.generator.tone_parameters(),
        }
    }

    pub fn source(&self) -> SocketAddrV4 {
        self.source
    }

    pub fn destination(&self) -> SocketAddrV4 {
        self.destination
    }

    /// RTP header of the next frame
    pub fn rtp_header(&self) -> &RtpHeader {
        &self.rtp
    }

    /// IPv4 identification of the next frame
    pub fn ip_identification(&self) -> u16 {
        self.ip.identification
    }

    /// Time carried over to the next step
    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    pub fn frame_duration_ms(&self) -> u32 {
        self.frame_duration_ms
    }

    pub fn samples_per_frame(&self) -> u32 {
        self.samples_per_frame
    }

    /// Length of every emitted frame
    pub fn frame_len(&self) -> usize {
        self.frame.len()
    }

    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// Frames the sink refused
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures
    }
}

impl std::fmt::Debug for CallLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallLeg")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("codec", &self.codec.info().name)
            .field("rtp", &self.rtp)
            .field("accumulated_ms", &self.accumulated_ms)
            .field("frames_emitted", &self.frames_emitted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use ddgen_audio_core::SilenceGenerator;
    use ddgen_codec_core::{CodecFactory, CodecType};
    use ddgen_packet_core::verify_frame_checksums;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::net::Ipv4Addr;

    struct RejectingSink;

    impl PacketSink for RejectingSink {
        fn consume(&self, _frame: &[u8]) -> Result<()> {
            Err(EngineError::sink_write("rejected"))
        }
    }

    fn addr(last: u8, port: u16) -> SocketAddrV4 {
        SocketAddrV4::new(Ipv4Addr::new(172, 24, 101, last), port)
    }

    fn leg(codec: CodecType, sink: Arc<dyn PacketSink>) -> CallLeg {
        let ids = LegIdentifiers {
            ip_identification: 1,
            timestamp: 1000,
            ssrc: 0x0102_0304,
            sequence_number: 65534,
        };
        CallLeg::new(
            addr(54, 32514),
            addr(55, 32514),
            ids,
            CodecFactory::create(codec),
            Box::new(SilenceGenerator),
            sink,
        )
        .unwrap()
    }

    #[test]
    fn test_accumulates_partial_intervals() {
        let sink = Arc::new(MemorySink::new());
        let mut leg = leg(CodecType::G711Pcma, sink.clone());

        assert_eq!(leg.step(15).unwrap(), 0);
        assert_eq!(leg.accumulated_ms(), 15);
        assert_eq!(leg.step(15).unwrap(), 1);
        assert_eq!(leg.accumulated_ms(), 10);
        assert_eq!(leg.step(50).unwrap(), 3);
        assert_eq!(leg.accumulated_ms(), 0);
        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn test_emitted_frame_contents() {
        let sink = Arc::new(MemorySink::new());
        let mut leg = leg(CodecType::G711Pcma, sink.clone());
        leg.step(40).unwrap();

        let frames = sink.take();
        assert_eq!(frames.len(), 2);
        for frame in &frames {
            assert_eq!(frame.len(), 214);
            assert!(verify_frame_checksums(frame));
            // A-law silence
            assert!(frame[54..].iter().all(|&b| b == 0xD5));
        }

        let first = RtpHeader::parse(&mut &frames[0][42..54]).unwrap();
        let second = RtpHeader::parse(&mut &frames[1][42..54]).unwrap();
        assert_eq!(first.payload_type, 8);
        assert_eq!(first.sequence_number, 65534);
        assert_eq!(second.sequence_number, 65535);
        assert_eq!(second.timestamp, 1160);
        assert_eq!(leg.rtp_header().sequence_number, 0);

        let first_ip = Ipv4Header::parse(&mut &frames[0][14..34]).unwrap();
        let second_ip = Ipv4Header::parse(&mut &frames[1][14..34]).unwrap();
        assert_eq!(first_ip.identification, 1);
        assert_eq!(second_ip.identification, 2);
        assert_eq!(first_ip.total_length, 200);
    }

    #[test]
    fn test_g722_timestamp_advances_by_frame_samples() {
        let sink = Arc::new(MemorySink::new());
        let mut leg = leg(CodecType::G722, sink.clone());
        leg.step(20).unwrap();

        assert_eq!(leg.samples_per_frame(), 320);
        assert_eq!(leg.rtp_header().timestamp, 1320);
        let frames = sink.take();
        assert_eq!(frames[0].len(), 214);
        assert_eq!(RtpHeader::parse(&mut &frames[0][42..54]).unwrap().payload_type, 9);
    }

    #[test]
    fn test_sink_failure_does_not_stop_leg() {
        let mut leg = leg(CodecType::G711Pcmu, Arc::new(RejectingSink));
        assert_eq!(leg.step(60).unwrap(), 3);
        assert_eq!(leg.sink_failures(), 3);
        assert_eq!(leg.frames_emitted(), 3);
    }

    #[test]
    fn test_parameters_snapshot() {
        let leg = leg(CodecType::G711Pcmu, Arc::new(MemorySink::new()));
        let params = leg.parameters();
        assert_eq!(params.source_ip, "172.24.101.54");
        assert_eq!(params.destination_ip, "172.24.101.55");
        assert_eq!(params.payload, 0);
        assert_eq!(params.ssrc, 0x0102_0304);
        assert!(params.tones.is_empty());
    }

    #[test]
    fn test_random_identifiers_follow_seed() {
        let a = LegIdentifiers::random(1, &mut SmallRng::seed_from_u64(9));
        let b = LegIdentifiers::random(1, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.ip_identification, 1);
    }
}
