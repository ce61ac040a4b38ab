//! G.722 encoder state

/// ADPCM state for a single sub-band (low or high)
///
/// Index 0 of each history array holds the current value, higher indices
/// older ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubBandState {
    /// Quantizer scale factor (detl / deth)
    pub det: i16,
    /// Logarithmic quantizer scale factor (nbl / nbh)
    pub nb: i16,
    /// Signal estimate (sl / sh)
    pub s: i16,
    /// Pole section of the signal estimate (spl / sph)
    pub sp: i16,
    /// Zero section of the signal estimate (szl / szh)
    pub sz: i16,
    /// Pole predictor coefficients, a[1] and a[2] used
    pub a: [i16; 3],
    /// Partially reconstructed signal history
    pub p: [i16; 3],
    /// Reconstructed signal history
    pub r: [i16; 3],
    /// Zero predictor coefficients, b[1]..b[6] used
    pub b: [i16; 7],
    /// Quantized difference signal history
    pub d: [i16; 7],
}

impl SubBandState {
    /// Initial scale factor of the low band
    pub const LOW_BAND_DET: i16 = 32;
    /// Initial scale factor of the high band
    pub const HIGH_BAND_DET: i16 = 8;

    /// Zeroed state with the given initial scale factor
    pub fn new(det: i16) -> Self {
        Self {
            det,
            nb: 0,
            s: 0,
            sp: 0,
            sz: 0,
            a: [0; 3],
            p: [0; 3],
            r: [0; 3],
            b: [0; 7],
            d: [0; 7],
        }
    }

    /// Initial low-band state
    pub fn low_band() -> Self {
        Self::new(Self::LOW_BAND_DET)
    }

    /// Initial high-band state
    pub fn high_band() -> Self {
        Self::new(Self::HIGH_BAND_DET)
    }
}

/// Complete encoder state: both sub-bands and the analysis QMF delay line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct G722State {
    /// Low-band ADPCM state
    pub low_band: SubBandState,
    /// High-band ADPCM state
    pub high_band: SubBandState,
    /// QMF transmit delay line, 24 samples
    pub qmf_tx_delay: [i16; 24],
}

impl G722State {
    /// Initial state (detl = 32, deth = 8, everything else zero)
    pub fn new() -> Self {
        Self {
            low_band: SubBandState::low_band(),
            high_band: SubBandState::high_band(),
            qmf_tx_delay: [0; 24],
        }
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for G722State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = G722State::new();
        assert_eq!(state.low_band.det, 32);
        assert_eq!(state.high_band.det, 8);
        assert_eq!(state.low_band.nb, 0);
        assert_eq!(state.qmf_tx_delay, [0; 24]);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = G722State::new();
        state.low_band.a[2] = 77;
        state.high_band.d[6] = -5;
        state.qmf_tx_delay[23] = 1000;
        state.reset();
        assert_eq!(state, G722State::default());
    }
}
