//! IPv4 header and the UDP pseudo-header

use std::net::Ipv4Addr;

use bytes::{Buf, BufMut};

use crate::checksum::{self, Checksum};
use crate::error::Error;
use crate::Result;

/// IPv4 header size in bytes (no options)
pub const IPV4_HEADER_SIZE: usize = 20;

/// Pseudo-header size in bytes
pub const PSEUDO_HEADER_SIZE: usize = 12;

/// IP protocol number of UDP
pub const PROTOCOL_UDP: u8 = 17;

/// Default type-of-service byte (DSCP EF)
pub const DEFAULT_TOS: u8 = 0xB8;

/// Default time to live
pub const DEFAULT_TTL: u8 = 128;

const CHECKSUM_OFFSET: usize = 10;

/// IPv4 header without options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    /// IP version (always 4)
    pub version: u8,
    /// Header length in 32-bit words (always 5)
    pub header_length: u8,
    /// Type of service
    pub tos: u8,
    /// Length of header and data in bytes
    pub total_length: u16,
    /// Identification
    pub identification: u16,
    /// Flags (3 bits) and fragment offset (13 bits)
    pub fragment: u16,
    /// Time to live
    pub ttl: u8,
    /// Protocol of the payload
    pub protocol: u8,
    /// Header checksum
    pub checksum: u16,
    /// Source address
    pub source: Ipv4Addr,
    /// Destination address
    pub destination: Ipv4Addr,
}

impl Ipv4Header {
    /// UDP datagram header with the default TOS and TTL
    pub fn udp(source: Ipv4Addr, destination: Ipv4Addr, payload_length: u16, identification: u16) -> Self {
        Self {
            version: 4,
            header_length: 5,
            tos: DEFAULT_TOS,
            total_length: IPV4_HEADER_SIZE as u16 + payload_length,
            identification,
            fragment: 0,
            ttl: DEFAULT_TTL,
            protocol: PROTOCOL_UDP,
            checksum: 0,
            source,
            destination,
        }
    }

    /// Parse an IPv4 header from bytes
    pub fn parse(buf: &mut impl Buf) -> Result<Self> {
        Error::ensure_len(IPV4_HEADER_SIZE, buf.remaining())?;

        let first_byte = buf.get_u8();
        let version = first_byte >> 4;
        let header_length = first_byte & 0x0F;
        if version != 4 {
            return Err(Error::InvalidPacket(format!("Invalid IP version: {}", version)));
        }
        if header_length != 5 {
            return Err(Error::InvalidPacket(format!(
                "Unsupported IPv4 header length: {} words",
                header_length
            )));
        }

        Ok(Self {
            version,
            header_length,
            tos: buf.get_u8(),
            total_length: buf.get_u16(),
            identification: buf.get_u16(),
            fragment: buf.get_u16(),
            ttl: buf.get_u8(),
            protocol: buf.get_u8(),
            checksum: buf.get_u16(),
            source: Ipv4Addr::from(buf.get_u32()),
            destination: Ipv4Addr::from(buf.get_u32()),
        })
    }

    /// Write the header, checksum field included as stored, into `out`
    pub fn write_to(&self, out: &mut [u8]) -> Result<()> {
        Error::ensure_len(IPV4_HEADER_SIZE, out.len())?;

        let mut buf = &mut out[..IPV4_HEADER_SIZE];
        buf.put_u8((self.version << 4) | (self.header_length & 0x0F));
        buf.put_u8(self.tos);
        buf.put_u16(self.total_length);
        buf.put_u16(self.identification);
        buf.put_u16(self.fragment);
        buf.put_u8(self.ttl);
        buf.put_u8(self.protocol);
        buf.put_u16(self.checksum);
        buf.put_u32(u32::from(self.source));
        buf.put_u32(u32::from(self.destination));
        Ok(())
    }

    /// Recompute the header checksum and write the header into `out`
    pub fn update_checksum_and_write(&mut self, out: &mut [u8]) -> Result<()> {
        self.checksum = 0;
        self.write_to(out)?;

        self.checksum = checksum::internet_checksum(&out[..IPV4_HEADER_SIZE]);
        out[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&self.checksum.to_be_bytes());
        Ok(())
    }

    /// Pseudo-header for the UDP checksum of this datagram
    pub fn pseudo_header(&self) -> PseudoHeader {
        PseudoHeader {
            source: self.source,
            destination: self.destination,
            protocol: self.protocol,
            udp_length: self.total_length.saturating_sub(IPV4_HEADER_SIZE as u16),
        }
    }
}

/// True when the header at the start of `bytes` carries a valid checksum
pub fn verify_header_checksum(bytes: &[u8]) -> bool {
    bytes.len() >= IPV4_HEADER_SIZE && checksum::verify(&bytes[..IPV4_HEADER_SIZE])
}

/// UDP pseudo-header: source, destination, zero, protocol, UDP length
///
/// Never transmitted, only summed into the UDP checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoHeader {
    /// Source address
    pub source: Ipv4Addr,
    /// Destination address
    pub destination: Ipv4Addr,
    /// Protocol number
    pub protocol: u8,
    /// Length of UDP header and data
    pub udp_length: u16,
}

impl PseudoHeader {
    /// Wire form of the pseudo-header
    pub fn to_bytes(&self) -> [u8; PSEUDO_HEADER_SIZE] {
        let mut bytes = [0u8; PSEUDO_HEADER_SIZE];
        let mut buf = &mut bytes[..];
        buf.put_u32(u32::from(self.source));
        buf.put_u32(u32::from(self.destination));
        buf.put_u8(0);
        buf.put_u8(self.protocol);
        buf.put_u16(self.udp_length);
        bytes
    }

    /// Feed the pseudo-header into a running checksum
    pub fn add_to(&self, checksum: &mut Checksum) {
        checksum.add(&self.to_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Ipv4Header {
        Ipv4Header::udp(Ipv4Addr::new(172, 24, 101, 54), Ipv4Addr::new(172, 24, 101, 55), 180, 1)
    }

    #[test]
    fn test_defaults() {
        let header = sample_header();
        assert_eq!(header.version, 4);
        assert_eq!(header.header_length, 5);
        assert_eq!(header.tos, 0xB8);
        assert_eq!(header.ttl, 128);
        assert_eq!(header.protocol, 17);
        assert_eq!(header.total_length, 200);
    }

    #[test]
    fn test_checksum_validates() {
        let mut header = sample_header();
        let mut out = [0u8; IPV4_HEADER_SIZE];
        header.update_checksum_and_write(&mut out).unwrap();

        assert_eq!(out[0], 0x45);
        assert_eq!(out[1], 0xB8);
        assert_ne!(header.checksum, 0);
        assert!(verify_header_checksum(&out));

        let parsed = Ipv4Header::parse(&mut &out[..]).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_corruption_detected() {
        let mut header = sample_header();
        let mut out = [0u8; IPV4_HEADER_SIZE];
        header.update_checksum_and_write(&mut out).unwrap();

        out[15] ^= 0x40;
        assert!(!verify_header_checksum(&out));
    }

    #[test]
    fn test_rejects_other_versions() {
        let mut out = [0u8; IPV4_HEADER_SIZE];
        sample_header().write_to(&mut out).unwrap();
        out[0] = 0x65;
        assert!(matches!(Ipv4Header::parse(&mut &out[..]), Err(Error::InvalidPacket(_))));
    }

    #[test]
    fn test_pseudo_header_bytes() {
        let pseudo = sample_header().pseudo_header();
        assert_eq!(pseudo.udp_length, 180);
        assert_eq!(
            pseudo.to_bytes(),
            [0xac, 0x18, 0x65, 0x36, 0xac, 0x18, 0x65, 0x37, 0x00, 17, 0x00, 180]
        );
    }

    #[test]
    fn test_short_output_buffer() {
        let mut out = [0u8; 19];
        assert_eq!(
            sample_header().update_checksum_and_write(&mut out),
            Err(Error::BufferTooSmall { required: 20, available: 19 })
        );
    }
}
