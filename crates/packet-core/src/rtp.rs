//! Fixed RTP header (RFC 3550, no CSRC list or extension)

use bytes::{Buf, BufMut};

use crate::error::Error;
use crate::Result;

/// RTP protocol version
pub const RTP_VERSION: u8 = 2;

/// Fixed RTP header size in bytes
pub const RTP_HEADER_SIZE: usize = 12;

/// RTP header as emitted by a call leg
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtpHeader {
    /// RTP version (always 2)
    pub version: u8,
    /// Padding flag
    pub padding: bool,
    /// Extension flag
    pub extension: bool,
    /// CSRC count
    pub csrc_count: u8,
    /// Marker bit
    pub marker: bool,
    /// Payload type
    pub payload_type: u8,
    /// Sequence number
    pub sequence_number: u16,
    /// Timestamp
    pub timestamp: u32,
    /// Synchronization source identifier
    pub ssrc: u32,
}

impl RtpHeader {
    /// Create a new RTP header with no flags set
    pub fn new(payload_type: u8, sequence_number: u16, timestamp: u32, ssrc: u32) -> Self {
        Self {
            version: RTP_VERSION,
            padding: false,
            extension: false,
            csrc_count: 0,
            marker: false,
            payload_type,
            sequence_number,
            timestamp,
            ssrc,
        }
    }

    /// Parse an RTP header from bytes
    pub fn parse(buf: &mut impl Buf) -> Result<Self> {
        Error::ensure_len(RTP_HEADER_SIZE, buf.remaining())?;

        // version (2 bits), padding (1 bit), extension (1 bit), CSRC count (4 bits)
        let first_byte = buf.get_u8();
        let version = first_byte >> 6;
        if version != RTP_VERSION {
            return Err(Error::InvalidPacket(format!("Invalid RTP version: {}", version)));
        }

        // marker (1 bit), payload type (7 bits)
        let second_byte = buf.get_u8();

        Ok(Self {
            version,
            padding: first_byte & 0x20 != 0,
            extension: first_byte & 0x10 != 0,
            csrc_count: first_byte & 0x0F,
            marker: second_byte & 0x80 != 0,
            payload_type: second_byte & 0x7F,
            sequence_number: buf.get_u16(),
            timestamp: buf.get_u32(),
            ssrc: buf.get_u32(),
        })
    }

    /// Write the header into the first 12 bytes of `out`
    pub fn write_to(&self, out: &mut [u8]) -> Result<()> {
        Error::ensure_len(RTP_HEADER_SIZE, out.len())?;

        let mut first_byte = (self.version & 0x03) << 6;
        if self.padding {
            first_byte |= 1 << 5;
        }
        if self.extension {
            first_byte |= 1 << 4;
        }
        first_byte |= self.csrc_count & 0x0F;

        let mut second_byte = self.payload_type & 0x7F;
        if self.marker {
            second_byte |= 1 << 7;
        }

        let mut buf = &mut out[..RTP_HEADER_SIZE];
        buf.put_u8(first_byte);
        buf.put_u8(second_byte);
        buf.put_u16(self.sequence_number);
        buf.put_u32(self.timestamp);
        buf.put_u32(self.ssrc);
        Ok(())
    }

    /// Move to the next frame: sequence +1, timestamp + `samples`
    ///
    /// Both fields wrap.
    pub fn advance(&mut self, samples: u32) {
        self.sequence_number = self.sequence_number.wrapping_add(1);
        self.timestamp = self.timestamp.wrapping_add(samples);
    }
}
