//! # Audio-Core: synthetic PCM for load generation
//!
//! Waveform generators that fill one frame of 16-bit PCM at a time. Each
//! generator keeps its own phase so consecutive frames join without
//! discontinuity.
//!
//! ```rust
//! use ddgen_audio_core::{GeneratorKind, WaveformGenerator};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(1);
//! let mut generator = GeneratorKind::SingleTone.create(&mut rng);
//!
//! let mut frame = [0i16; 160];
//! generator.generate(&mut frame, 20);
//! assert_eq!(generator.tone_parameters().len(), 1);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod generator;
pub mod types;

pub use error::{AudioError, Result};
pub use generator::{
    GeneratorKind, SilenceGenerator, SingleToneGenerator, SinusoidalGenerator, WaveformGenerator,
};
pub use types::{wrap_phase, ToneParameters};
