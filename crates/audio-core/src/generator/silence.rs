use super::WaveformGenerator;

/// Emits all-zero samples
#[derive(Debug, Clone, Copy, Default)]
pub struct SilenceGenerator;

impl WaveformGenerator for SilenceGenerator {
    fn generate(&mut self, output: &mut [i16], _duration_hint_ms: u32) {
        output.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrites_buffer() {
        let mut buf = [7i16; 160];
        SilenceGenerator.generate(&mut buf, 20);
        assert!(buf.iter().all(|&s| s == 0));
    }
}
