//! Internet checksum (RFC 1071)
//!
//! 16-bit ones-complement arithmetic with end-around carry. A trailing odd
//! byte is treated as the high byte of a word whose low byte is zero.

/// Incremental ones-complement accumulator
///
/// Data may be fed in several slices (pseudo-header, header, payload); word
/// alignment is kept across slice boundaries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    sum: u32,
    pending: Option<u8>,
}

impl Checksum {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slice of bytes to the running sum
    pub fn add(&mut self, data: &[u8]) -> &mut Self {
        let mut data = data;

        if let Some(high) = self.pending.take() {
            match data.split_first() {
                Some((&low, rest)) => {
                    self.add_word(u16::from_be_bytes([high, low]));
                    data = rest;
                }
                None => {
                    self.pending = Some(high);
                    return self;
                }
            }
        }

        let mut words = data.chunks_exact(2);
        for word in &mut words {
            self.add_word(u16::from_be_bytes([word[0], word[1]]));
        }
        if let [last] = words.remainder() {
            self.pending = Some(*last);
        }

        self
    }

    fn add_word(&mut self, word: u16) {
        self.sum += u32::from(word);
        self.sum = (self.sum & 0xFFFF) + (self.sum >> 16);
    }

    /// Folded ones-complement sum of everything added so far
    pub fn sum(&self) -> u16 {
        let mut sum = self.sum;
        if let Some(high) = self.pending {
            sum += u32::from(high) << 8;
        }
        while sum >> 16 != 0 {
            sum = (sum & 0xFFFF) + (sum >> 16);
        }
        sum as u16
    }

    /// Complemented sum, as written into a header
    pub fn finish(&self) -> u16 {
        !self.sum()
    }
}

/// Folded ones-complement sum of `data`
pub fn ones_complement_sum(data: &[u8]) -> u16 {
    Checksum::new().add(data).sum()
}

/// Internet checksum of `data`
pub fn internet_checksum(data: &[u8]) -> u16 {
    Checksum::new().add(data).finish()
}

/// True when the ones-complement sum over data that already carries its
/// checksum field equals 0xFFFF
pub fn verify(data: &[u8]) -> bool {
    ones_complement_sum(data) == 0xFFFF
}
