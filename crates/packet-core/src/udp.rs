//! UDP header

use bytes::{Buf, BufMut};

use crate::checksum::Checksum;
use crate::error::Error;
use crate::ipv4::PseudoHeader;
use crate::Result;

/// UDP header size in bytes
pub const UDP_HEADER_SIZE: usize = 8;

const CHECKSUM_OFFSET: usize = 6;

/// UDP header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UdpHeader {
    /// Source port
    pub source_port: u16,
    /// Destination port
    pub destination_port: u16,
    /// Length of header and data
    pub length: u16,
    /// Checksum over pseudo-header, header and data
    pub checksum: u16,
}

impl UdpHeader {
    /// Header for a datagram carrying `payload_length` bytes
    pub fn new(source_port: u16, destination_port: u16, payload_length: u16) -> Self {
        Self {
            source_port,
            destination_port,
            length: UDP_HEADER_SIZE as u16 + payload_length,
            checksum: 0,
        }
    }

    /// Parse a UDP header from bytes
    pub fn parse(buf: &mut impl Buf) -> Result<Self> {
        Error::ensure_len(UDP_HEADER_SIZE, buf.remaining())?;

        Ok(Self {
            source_port: buf.get_u16(),
            destination_port: buf.get_u16(),
            length: buf.get_u16(),
            checksum: buf.get_u16(),
        })
    }

    /// Write the header, checksum field included as stored, into `out`
    pub fn write_to(&self, out: &mut [u8]) -> Result<()> {
        Error::ensure_len(UDP_HEADER_SIZE, out.len())?;

        let mut buf = &mut out[..UDP_HEADER_SIZE];
        buf.put_u16(self.source_port);
        buf.put_u16(self.destination_port);
        buf.put_u16(self.length);
        buf.put_u16(self.checksum);
        Ok(())
    }

    /// Recompute the checksum and write the header
    ///
    /// `segment` holds the UDP header followed by the already written data;
    /// the header goes into its first 8 bytes. A computed checksum of zero is
    /// transmitted as 0xFFFF.
    pub fn update_checksum_and_write(&mut self, segment: &mut [u8], pseudo: &PseudoHeader) -> Result<()> {
        self.checksum = 0;
        self.write_to(segment)?;

        let mut sum = Checksum::new();
        pseudo.add_to(&mut sum);
        sum.add(segment);

        self.checksum = match sum.finish() {
            0 => 0xFFFF,
            value => value,
        };
        segment[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&self.checksum.to_be_bytes());
        Ok(())
    }
}

/// True when the UDP segment (header and data) carries a valid checksum
pub fn verify_segment_checksum(segment: &[u8], pseudo: &PseudoHeader) -> bool {
    if segment.len() < UDP_HEADER_SIZE {
        return false;
    }
    let mut sum = Checksum::new();
    pseudo.add_to(&mut sum);
    sum.add(segment);
    sum.sum() == 0xFFFF
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipv4::PROTOCOL_UDP;
    use std::net::Ipv4Addr;

    fn pseudo(udp_length: u16) -> PseudoHeader {
        PseudoHeader {
            source: Ipv4Addr::new(192, 168, 1, 10),
            destination: Ipv4Addr::new(192, 168, 1, 20),
            protocol: PROTOCOL_UDP,
            udp_length,
        }
    }

    #[test]
    fn test_checksum_validates() {
        let payload = b"synthetic rtp payload";
        let mut header = UdpHeader::new(32514, 32514, payload.len() as u16);
        let mut segment = vec![0u8; UDP_HEADER_SIZE + payload.len()];
        segment[UDP_HEADER_SIZE..].copy_from_slice(payload);

        let pseudo = pseudo(header.length);
        header.update_checksum_and_write(&mut segment, &pseudo).unwrap();

        assert_ne!(header.checksum, 0);
        assert!(verify_segment_checksum(&segment, &pseudo));
        assert_eq!(UdpHeader::parse(&mut &segment[..]).unwrap(), header);

        segment[UDP_HEADER_SIZE + 3] ^= 0x10;
        assert!(!verify_segment_checksum(&segment, &pseudo));
    }

    #[test]
    fn test_zero_checksum_sent_as_all_ones() {
        // Choose the data word so that the complemented sum is zero
        let mut header = UdpHeader::new(1, 2, 2);
        let pseudo = pseudo(header.length);
        let mut probe = Checksum::new();
        pseudo.add_to(&mut probe);
        probe.add(&[0, 1, 0, 2, 0, 10, 0, 0]);
        let filler = !probe.sum();
        let mut segment = vec![0u8; 10];
        segment[8..].copy_from_slice(&filler.to_be_bytes());

        header.update_checksum_and_write(&mut segment, &pseudo).unwrap();
        assert_eq!(header.checksum, 0xFFFF);
        assert_eq!(&segment[6..8], &[0xFF, 0xFF]);
        assert!(verify_segment_checksum(&segment, &pseudo));
    }

    #[test]
    fn test_odd_payload_length() {
        let mut header = UdpHeader::new(5000, 6000, 3);
        let mut segment = vec![0u8, 0, 0, 0, 0, 0, 0, 0, 0xde, 0xad, 0xbe];
        let pseudo = pseudo(header.length);
        header.update_checksum_and_write(&mut segment, &pseudo).unwrap();
        assert!(verify_segment_checksum(&segment, &pseudo));
    }
}
