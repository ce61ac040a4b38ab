//! # Packet-Core: header codecs for synthetic RTP traffic
//!
//! Reads and writes the four headers of a captured RTP frame in network byte
//! order and computes their checksums:
//!
//! - **Ethernet II**: 14 bytes, synthetic MACs derived from IPv4 addresses
//! - **IPv4**: 20 bytes, no options, header checksum
//! - **UDP**: 8 bytes, checksum over the pseudo-header, header and data
//! - **RTP**: 12 bytes, fixed header only
//!
//! ## Usage
//!
//! ```rust
//! use std::net::Ipv4Addr;
//! use ddgen_packet_core::{Frame, Ipv4Header, UdpHeader, RtpHeader, EthernetHeader};
//!
//! let src = Ipv4Addr::new(10, 0, 0, 1);
//! let dst = Ipv4Addr::new(10, 0, 0, 2);
//! let mut frame = Frame::new(160)?;
//!
//! RtpHeader::new(8, 1, 0, 0x1234).write_to(frame.rtp_mut())?;
//! let mut udp = UdpHeader::new(32514, 32514, (frame.udp_len() - 8) as u16);
//! let mut ip = Ipv4Header::udp(src, dst, udp.length, 1);
//! udp.update_checksum_and_write(frame.udp_segment_mut(), &ip.pseudo_header())?;
//! ip.update_checksum_and_write(frame.ipv4_mut())?;
//! EthernetHeader::for_ipv4(src, dst).write_to(frame.ethernet_mut())?;
//!
//! assert_eq!(frame.len(), 214);
//! # Ok::<(), ddgen_packet_core::Error>(())
//! ```

pub mod checksum;
pub mod error;
pub mod ethernet;
pub mod frame;
pub mod ipv4;
pub mod rtp;
pub mod udp;

pub use checksum::Checksum;
pub use error::Error;
pub use ethernet::{EthernetHeader, ETHERNET_HEADER_SIZE};
pub use frame::{Frame, MAX_FRAME_SIZE};
pub use ipv4::{Ipv4Header, PseudoHeader, IPV4_HEADER_SIZE};
pub use rtp::{RtpHeader, RTP_HEADER_SIZE};
pub use udp::{UdpHeader, UDP_HEADER_SIZE};

/// Result type for header operations
pub type Result<T> = std::result::Result<T, Error>;

/// Check both checksums of a complete Ethernet frame
///
/// Returns false when the frame is too short to hold the headers.
pub fn verify_frame_checksums(frame: &[u8]) -> bool {
    if frame.len() < frame::HEADERS_SIZE {
        return false;
    }
    let ip_bytes = &frame[frame::IPV4_OFFSET..frame::UDP_OFFSET];
    if !ipv4::verify_header_checksum(ip_bytes) {
        return false;
    }
    match Ipv4Header::parse(&mut &ip_bytes[..]) {
        Ok(ip) => udp::verify_segment_checksum(&frame[frame::UDP_OFFSET..], &ip.pseudo_header()),
        Err(e) => {
            tracing::debug!("Frame does not carry an IPv4 header: {}", e);
            false
        }
    }
}
