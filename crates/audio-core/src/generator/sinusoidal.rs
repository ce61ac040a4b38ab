use super::WaveformGenerator;

/// Reserved multi-tone generator
///
/// Emits silence until a tone mix is defined for it.
#[derive(Debug, Clone, Default)]
pub struct SinusoidalGenerator {
    _private: (),
}

impl SinusoidalGenerator {
    /// Create the generator
    pub fn new() -> Self {
        Self::default()
    }
}

impl WaveformGenerator for SinusoidalGenerator {
    fn generate(&mut self, output: &mut [i16], _duration_hint_ms: u32) {
        output.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_silence() {
        let mut buf = [-3i16; 320];
        SinusoidalGenerator::new().generate(&mut buf, 20);
        assert!(buf.iter().all(|&s| s == 0));
    }
}
