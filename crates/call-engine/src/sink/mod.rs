//! Packet sinks
//!
//! Every call leg hands each finished frame to a shared [`PacketSink`]. A
//! sink is invoked synchronously from the simulation thread and reports
//! failures per frame; the leg logs them and keeps going.

mod pcap;
mod socket;

use parking_lot::Mutex;

use crate::error::Result;

pub use pcap::{capture_file_name, PcapSink, PCAP_LINKTYPE_ETHERNET, PCAP_MAGIC, PCAP_SNAPLEN};
pub use socket::RawSocketSink;

/// Consumer of complete Ethernet frames
pub trait PacketSink: Send + Sync {
    /// Take one frame
    ///
    /// The slice is only valid for the duration of the call.
    fn consume(&self, frame: &[u8]) -> Result<()>;

    /// Flush and release the sink
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Sink that keeps every frame in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    frames: Mutex<Vec<Vec<u8>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every frame consumed so far
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().clone()
    }

    /// Number of frames consumed so far
    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    /// Remove and return all frames
    pub fn take(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.frames.lock())
    }
}

impl PacketSink for MemorySink {
    fn consume(&self, frame: &[u8]) -> Result<()> {
        self.frames.lock().push(frame.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink() {
        let sink = MemorySink::new();
        sink.consume(&[1, 2, 3]).unwrap();
        sink.consume(&[4]).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.take(), vec![vec![1, 2, 3], vec![4]]);
        assert_eq!(sink.len(), 0);
        assert!(sink.close().is_ok());
    }
}
