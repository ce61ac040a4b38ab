//! G.722 Codec Implementation
//!
//! Mode 1 (64 kbit/s) encoder: 320 samples at 16 kHz in, 160 bytes out.

use crate::codecs::g722::adpcm::{hsbcod, lsbcod};
use crate::codecs::g722::qmf::qmf_tx;
use crate::codecs::g722::reference::{add, shl};
use crate::codecs::g722::state::G722State;
use crate::error::Result;
use crate::types::{validate_frame, AudioCodec, CodecInfo, CodecType};

/// G.722 frame size in samples (20 ms at 16 kHz)
pub const G722_FRAME_SIZE: usize = 320;

/// G.722 encoded frame size in bytes (one byte per sample pair)
pub const G722_ENCODED_FRAME_SIZE: usize = 160;

/// G.722 mode 1 encoder
///
/// # Example
/// ```
/// use ddgen_codec_core::codecs::g722::G722Codec;
/// use ddgen_codec_core::AudioCodec;
///
/// let mut codec = G722Codec::new();
/// let encoded = codec.encode_frame(&vec![0i16; 320]).unwrap();
/// assert_eq!(encoded.len(), 160);
/// ```
#[derive(Debug, Clone)]
pub struct G722Codec {
    state: G722State,
}

impl G722Codec {
    /// Create an encoder in its initial state
    pub fn new() -> Self {
        Self {
            state: G722State::new(),
        }
    }

    /// Encoder state
    pub fn state(&self) -> &G722State {
        &self.state
    }

    /// Encode one sample pair into a codeword
    ///
    /// `first` precedes `second` in time. Bits 0..5 carry the low band,
    /// bits 6..7 the high band.
    pub fn encode_pair(&mut self, first: i16, second: i16) -> u8 {
        let (xl, xh) = qmf_tx(second, first, &mut self.state.qmf_tx_delay);
        let il = lsbcod(xl, &mut self.state.low_band);
        let ih = hsbcod(xh, &mut self.state.high_band);
        add(shl(ih, 6), il) as u8
    }
}

impl Default for G722Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCodec for G722Codec {
    fn encode(&mut self, samples: &[i16], output: &mut [u8]) -> Result<usize> {
        validate_frame(samples, output, G722_FRAME_SIZE, G722_ENCODED_FRAME_SIZE)?;

        for (out, pair) in output.iter_mut().zip(samples.chunks_exact(2)) {
            *out = self.encode_pair(pair[0], pair[1]);
        }

        Ok(G722_ENCODED_FRAME_SIZE)
    }

    fn info(&self) -> CodecInfo {
        CodecType::G722.info()
    }

    fn reset(&mut self) {
        self.state.reset();
    }
}
