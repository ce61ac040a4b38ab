//! # Codec-Core: audio encoders for synthetic RTP streams
//!
//! Encoders that turn 20 ms of 16-bit PCM into an RTP payload:
//!
//! - **G.711 (PCMA/PCMU)**: 160 samples at 8 kHz into 160 bytes, payload types 8 and 0
//! - **G.722**: 320 samples at 16 kHz into 160 bytes, payload type 9, mode 1 sub-band ADPCM
//!
//! ## Usage
//!
//! ```rust
//! use ddgen_codec_core::{AudioCodec, CodecFactory, CodecType};
//!
//! let mut codec = CodecFactory::create(CodecType::G711Pcma);
//!
//! let samples = vec![0i16; 160]; // 20ms at 8kHz
//! let mut payload = vec![0u8; codec.payload_size()];
//! let written = codec.encode(&samples, &mut payload)?;
//! assert_eq!(written, 160);
//! # Ok::<(), ddgen_codec_core::CodecError>(())
//! ```

#![warn(missing_docs)]

pub mod codecs;
pub mod error;
pub mod types;

pub use codecs::CodecFactory;
pub use error::{CodecError, Result};
pub use types::{AudioCodec, CodecInfo, CodecType};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
