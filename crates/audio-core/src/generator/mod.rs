//! PCM waveform generators
//!
//! Each call leg owns one generator and asks it for one frame of samples
//! per emitted packet.

mod silence;
mod sinusoidal;
mod tone;

use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use crate::error::AudioError;
use crate::types::ToneParameters;

pub use silence::SilenceGenerator;
pub use sinusoidal::SinusoidalGenerator;
pub use tone::SingleToneGenerator;

/// Source of synthetic 16-bit PCM
pub trait WaveformGenerator: Send {
    /// Fill `output` with the next samples of the waveform
    ///
    /// `duration_hint_ms` is the wall-clock span the buffer represents.
    fn generate(&mut self, output: &mut [i16], duration_hint_ms: u32);

    /// Tones this generator emits, for the call log
    fn tone_parameters(&self) -> Vec<ToneParameters> {
        Vec::new()
    }
}

/// Generator variants selectable per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorKind {
    /// All-zero samples
    Silence,
    /// One sinusoid with random parameters
    #[default]
    SingleTone,
    /// Reserved multi-tone variant
    Sinusoidal,
}

impl GeneratorKind {
    /// Build a generator of this kind, drawing any random parameters from `rng`
    pub fn create(self, rng: &mut dyn RngCore) -> Box<dyn WaveformGenerator> {
        match self {
            Self::Silence => Box::new(SilenceGenerator),
            Self::SingleTone => Box::new(SingleToneGenerator::random(rng)),
            Self::Sinusoidal => Box::new(SinusoidalGenerator::new()),
        }
    }

    /// Get the generator name
    pub fn name(self) -> &'static str {
        match self {
            Self::Silence => "silence",
            Self::SingleTone => "tone",
            Self::Sinusoidal => "sinusoidal",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "silence" => Ok(Self::Silence),
            "tone" | "single-tone" | "singletone" => Ok(Self::SingleTone),
            "sinusoidal" => Ok(Self::Sinusoidal),
            _ => Err(AudioError::UnknownGenerator(s.to_string())),
        }
    }
}
