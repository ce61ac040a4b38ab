use std::f32::consts::PI;

use rand::{Rng, RngCore};

use super::WaveformGenerator;
use crate::types::{wrap_phase, ToneParameters};

const AMPLITUDE_RANGE: (f32, f32) = (0.2, 0.8);
const FREQUENCY_RANGE: (f32, f32) = (0.2 * PI, 0.8 * PI);

/// Single sinusoid with persistent phase
///
/// Sample `n` of a buffer is `amplitude * i16::MAX * sin(phase + n * frequency)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleToneGenerator {
    amplitude: f32,
    frequency: f32,
    phase: f32,
}

impl SingleToneGenerator {
    /// Create a tone, replacing out-of-range parameters
    ///
    /// - amplitude outside [0, 1]: random in [0.2, 0.8)
    /// - frequency outside (0.2π, 0.8π) rad/sample: random in that band
    /// - phase outside (-π, π): wrapped into (-π, π], random if not finite
    pub fn new(amplitude: f32, frequency: f32, phase: f32, rng: &mut dyn RngCore) -> Self {
        let amplitude = if (0.0..=1.0).contains(&amplitude) {
            amplitude
        } else {
            rng.gen_range(AMPLITUDE_RANGE.0..AMPLITUDE_RANGE.1)
        };

        let frequency = if frequency > FREQUENCY_RANGE.0 && frequency < FREQUENCY_RANGE.1 {
            frequency
        } else {
            rng.gen_range(FREQUENCY_RANGE.0..FREQUENCY_RANGE.1)
        };

        let phase = if phase > -PI && phase < PI {
            phase
        } else if phase.is_finite() {
            wrap_phase(phase)
        } else {
            rng.gen_range(-PI..PI)
        };

        Self {
            amplitude,
            frequency,
            phase,
        }
    }

    /// Create a tone with every parameter drawn from `rng`
    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self {
            amplitude: rng.gen_range(AMPLITUDE_RANGE.0..AMPLITUDE_RANGE.1),
            frequency: rng.gen_range(FREQUENCY_RANGE.0..FREQUENCY_RANGE.1),
            phase: rng.gen_range(-PI..PI),
        }
    }

    /// Current tone parameters
    pub fn parameters(&self) -> ToneParameters {
        ToneParameters {
            amplitude: self.amplitude,
            frequency: self.frequency,
            phase: self.phase,
        }
    }
}

impl WaveformGenerator for SingleToneGenerator {
    fn generate(&mut self, output: &mut [i16], _duration_hint_ms: u32) {
        let scale = self.amplitude * f32::from(i16::MAX);
        for sample in output.iter_mut() {
            *sample = (scale * self.phase.sin()) as i16;
            self.phase += self.frequency;
        }
        self.phase = wrap_phase(self.phase);
    }

    fn tone_parameters(&self) -> Vec<ToneParameters> {
        vec![self.parameters()]
    }
}
