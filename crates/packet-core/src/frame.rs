//! Ethernet/IPv4/UDP/RTP frame buffer
//!
//! A frame is laid out as
//!
//! ```text
//! | ethernet (14) | ipv4 (20) | udp (8) | rtp (12) | payload (n) |
//! ```
//!
//! and is allocated once per call leg, then rewritten in place for every
//! emitted packet.

use crate::error::Error;
use crate::ethernet::ETHERNET_HEADER_SIZE;
use crate::ipv4::IPV4_HEADER_SIZE;
use crate::rtp::RTP_HEADER_SIZE;
use crate::udp::UDP_HEADER_SIZE;
use crate::Result;

/// Largest frame that fits a capture record (snaplen 65535 plus slack)
pub const MAX_FRAME_SIZE: usize = 65536;

/// Offset of the IPv4 header
pub const IPV4_OFFSET: usize = ETHERNET_HEADER_SIZE;
/// Offset of the UDP header
pub const UDP_OFFSET: usize = IPV4_OFFSET + IPV4_HEADER_SIZE;
/// Offset of the RTP header
pub const RTP_OFFSET: usize = UDP_OFFSET + UDP_HEADER_SIZE;
/// Offset of the RTP payload
pub const PAYLOAD_OFFSET: usize = RTP_OFFSET + RTP_HEADER_SIZE;

/// Size of all headers in front of the payload
pub const HEADERS_SIZE: usize = PAYLOAD_OFFSET;

/// Owned frame buffer with typed views onto each layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    buf: Vec<u8>,
}

impl Frame {
    /// Allocate a zeroed frame for `payload_size` payload bytes
    pub fn new(payload_size: usize) -> Result<Self> {
        let size = HEADERS_SIZE + payload_size;
        if size > MAX_FRAME_SIZE {
            return Err(Error::FrameTooLarge {
                size,
                max: MAX_FRAME_SIZE,
            });
        }
        Ok(Self { buf: vec![0; size] })
    }

    /// Total frame length
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Payload length
    pub fn payload_len(&self) -> usize {
        self.buf.len() - PAYLOAD_OFFSET
    }

    /// Length of the UDP segment (UDP header, RTP header and payload)
    pub fn udp_len(&self) -> usize {
        self.buf.len() - UDP_OFFSET
    }

    /// Whole frame
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Ethernet header bytes
    pub fn ethernet_mut(&mut self) -> &mut [u8] {
        &mut self.buf[..IPV4_OFFSET]
    }

    /// IPv4 header bytes
    pub fn ipv4_mut(&mut self) -> &mut [u8] {
        &mut self.buf[IPV4_OFFSET..UDP_OFFSET]
    }

    /// UDP header plus everything it carries
    pub fn udp_segment_mut(&mut self) -> &mut [u8] {
        &mut self.buf[UDP_OFFSET..]
    }

    /// RTP header bytes
    pub fn rtp_mut(&mut self) -> &mut [u8] {
        &mut self.buf[RTP_OFFSET..PAYLOAD_OFFSET]
    }

    /// Payload bytes
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.buf[PAYLOAD_OFFSET..]
    }
}
