//! G.722 Wideband Audio Encoder
//!
//! Sub-band ADPCM encoder, mode 1 (64 kbit/s).
//!
//! # Architecture
//!
//! - `codec`: frame-level encoder
//! - `qmf`: QMF analysis filter
//! - `adpcm`: low- and high-band quantizers and predictor adaptation
//! - `reference`: saturating fixed-point operators
//! - `tables`: quantization tables and constants
//! - `state`: encoder state

pub mod adpcm;
pub mod codec;
pub mod qmf;
pub mod reference;
pub mod state;
pub mod tables;

#[cfg(test)]
mod tests;

pub use codec::{G722Codec, G722_ENCODED_FRAME_SIZE, G722_FRAME_SIZE};
pub use state::{G722State, SubBandState};
