//! Raw IPv4 socket output
//!
//! Frames leave with their own IPv4 and UDP headers (`IP_HDRINCL`); the
//! Ethernet header is dropped before sending.

use std::net::{Ipv4Addr, SocketAddrV4};

use ddgen_packet_core::frame::{IPV4_OFFSET, UDP_OFFSET};
use ddgen_packet_core::ETHERNET_HEADER_SIZE;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tracing::{debug, info};

use super::PacketSink;
use crate::error::{EngineError, Result};

const IPPROTO_RAW: i32 = 255;

struct Peer {
    address: SocketAddrV4,
    sock_addr: SockAddr,
    socket: Socket,
}

/// Transmits frames through raw IPv4 sockets
///
/// The Ethernet header is stripped and the IPv4 datagram is sent as built.
/// Each frame goes to the peer matching its destination address and UDP
/// port, or to the first peer when none matches.
pub struct RawSocketSink {
    peers: Vec<Peer>,
}

impl RawSocketSink {
    /// Open one raw socket per peer
    ///
    /// Fails with [`EngineError::SocketSetupFailure`] when a socket cannot be
    /// created or `IP_HDRINCL` cannot be set, usually for lack of privileges.
    pub fn new(peers: &[SocketAddrV4]) -> Result<Self> {
        if peers.is_empty() {
            return Err(EngineError::InvalidConfig(
                "raw socket output needs at least one peer".into(),
            ));
        }

        let mut opened = Vec::with_capacity(peers.len());
        for &address in peers {
            let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::from(IPPROTO_RAW)))
                .map_err(|e| EngineError::socket_setup(address, e))?;
            socket
                .set_header_included(true)
                .map_err(|e| EngineError::socket_setup(address, format!("IP_HDRINCL: {}", e)))?;

            info!("Raw socket ready for {}", address);
            opened.push(Peer {
                address,
                sock_addr: SockAddr::from(address),
                socket,
            });
        }

        Ok(Self { peers: opened })
    }

    /// Configured peers in order
    pub fn peers(&self) -> Vec<SocketAddrV4> {
        self.peers.iter().map(|p| p.address).collect()
    }

    fn route(&self, frame: &[u8]) -> Option<&Peer> {
        destination_of(frame)
            .and_then(|dst| self.peers.iter().find(|p| p.address == dst))
            .or_else(|| self.peers.first())
    }
}

/// Destination address and UDP port of an Ethernet frame
pub(crate) fn destination_of(frame: &[u8]) -> Option<SocketAddrV4> {
    if frame.len() < UDP_OFFSET + 4 {
        return None;
    }
    let ip = &frame[IPV4_OFFSET + 16..IPV4_OFFSET + 20];
    let port = u16::from_be_bytes([frame[UDP_OFFSET + 2], frame[UDP_OFFSET + 3]]);
    Some(SocketAddrV4::new(Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]), port))
}

impl PacketSink for RawSocketSink {
    fn consume(&self, frame: &[u8]) -> Result<()> {
        if frame.len() <= ETHERNET_HEADER_SIZE {
            return Err(EngineError::sink_write(format!(
                "frame of {} bytes carries no IPv4 datagram",
                frame.len()
            )));
        }

        let peer = self
            .route(frame)
            .ok_or_else(|| EngineError::sink_write("no peer configured"))?;
        let datagram = &frame[ETHERNET_HEADER_SIZE..];

        let sent = peer
            .socket
            .send_to(datagram, &peer.sock_addr)
            .map_err(|e| EngineError::sink_write(format!("sendto {}: {}", peer.address, e)))?;
        if sent != datagram.len() {
            debug!("Short send to {}: {} of {} bytes", peer.address, sent, datagram.len());
        }
        Ok(())
    }
}

impl std::fmt::Debug for RawSocketSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawSocketSink")
            .field("peers", &self.peers())
            .finish()
    }
}
