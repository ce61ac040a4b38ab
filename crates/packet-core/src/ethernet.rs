//! Ethernet II header

use std::net::Ipv4Addr;

use bytes::{Buf, BufMut};

use crate::error::Error;
use crate::Result;

/// Ethernet header size in bytes
pub const ETHERNET_HEADER_SIZE: usize = 14;

/// Ethertype of an IPv4 payload
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Ethernet II header (destination MAC, source MAC, ethertype)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    /// Destination MAC address
    pub destination: [u8; 6],
    /// Source MAC address
    pub source: [u8; 6],
    /// Ethertype of the payload
    pub ethertype: u16,
}

impl EthernetHeader {
    /// Header for an IPv4 frame between two synthetic hosts
    ///
    /// The MAC addresses are derived from the IPv4 addresses, see [`mac_for_ipv4`].
    pub fn for_ipv4(source: Ipv4Addr, destination: Ipv4Addr) -> Self {
        Self {
            destination: mac_for_ipv4(destination),
            source: mac_for_ipv4(source),
            ethertype: ETHERTYPE_IPV4,
        }
    }

    /// Parse an Ethernet header from bytes
    pub fn parse(buf: &mut impl Buf) -> Result<Self> {
        Error::ensure_len(ETHERNET_HEADER_SIZE, buf.remaining())?;

        let mut destination = [0u8; 6];
        buf.copy_to_slice(&mut destination);
        let mut source = [0u8; 6];
        buf.copy_to_slice(&mut source);
        let ethertype = buf.get_u16();

        Ok(Self {
            destination,
            source,
            ethertype,
        })
    }

    /// Write the header into the first 14 bytes of `out`
    pub fn write_to(&self, out: &mut [u8]) -> Result<()> {
        Error::ensure_len(ETHERNET_HEADER_SIZE, out.len())?;

        let mut buf = &mut out[..ETHERNET_HEADER_SIZE];
        buf.put_slice(&self.destination);
        buf.put_slice(&self.source);
        buf.put_u16(self.ethertype);
        Ok(())
    }
}

/// Synthetic MAC address for an IPv4 host: two zero bytes followed by the
/// address in network byte order
pub fn mac_for_ipv4(addr: Ipv4Addr) -> [u8; 6] {
    let octets = addr.octets();
    [0, 0, octets[0], octets[1], octets[2], octets[3]]
}
