//! G.722 QMF analysis filter
//!
//! Splits a pair of 16 kHz input samples into one low-band and one
//! high-band sample using the 24-tap quadrature mirror filter.

use crate::codecs::g722::reference::{clamp_15, l_add, l_mac, l_shr, l_sub};
use crate::codecs::g722::tables::COEF_QMF;

/// QMF analysis filter (encoder)
///
/// The new pair is stored at the head of the delay line before filtering
/// and the line is shifted by two afterwards.
///
/// # Arguments
/// * `xin0` - second sample of the pair in time order
/// * `xin1` - first sample of the pair in time order
/// * `delay` - 24-sample transmit delay line
///
/// # Returns
/// * `(xl, xh)` - low-band and high-band samples
pub fn qmf_tx(xin0: i16, xin1: i16, delay: &mut [i16; 24]) -> (i16, i16) {
    delay[1] = xin1;
    delay[0] = xin0;

    let mut accum_a = i32::from(COEF_QMF[0]) * i32::from(delay[0]);
    let mut accum_b = i32::from(COEF_QMF[1]) * i32::from(delay[1]);
    for i in 1..12 {
        accum_a = l_mac(accum_a, COEF_QMF[2 * i], delay[2 * i]);
        accum_b = l_mac(accum_b, COEF_QMF[2 * i + 1], delay[2 * i + 1]);
    }

    delay.copy_within(0..22, 2);

    let comp_low = l_add(accum_a, accum_b);
    let comp_low = l_add(comp_low, comp_low);
    let comp_high = l_sub(accum_a, accum_b);
    let comp_high = l_add(comp_high, comp_high);

    (clamp_15(l_shr(comp_low, 16)), clamp_15(l_shr(comp_high, 16)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_stays_silent() {
        let mut delay = [0i16; 24];
        for _ in 0..50 {
            assert_eq!(qmf_tx(0, 0, &mut delay), (0, 0));
        }
    }

    #[test]
    fn test_delay_line_shifts_by_pairs() {
        let mut delay = [0i16; 24];
        qmf_tx(2, 1, &mut delay);
        assert_eq!(&delay[..4], &[2, 1, 2, 1]);
        qmf_tx(4, 3, &mut delay);
        assert_eq!(&delay[..6], &[4, 3, 4, 3, 2, 1]);
    }

    #[test]
    fn test_impulse_response() {
        let mut delay = [0i16; 24];
        // xin0 = 16384 meets coefficient 6 in accumulator A
        let (xl, xh) = qmf_tx(16384, 0, &mut delay);
        let accum = 6 * 16384 * 2;
        assert_eq!(xl, (accum >> 16) as i16);
        assert_eq!(xh, (accum >> 16) as i16);
    }

    #[test]
    fn test_output_is_clamped() {
        let mut delay = [0i16; 24];
        let mut last = (0, 0);
        for _ in 0..12 {
            last = qmf_tx(i16::MAX, i16::MAX, &mut delay);
        }
        assert!(last.0 <= 16383 && last.0 >= -16384);
        assert!(last.1 <= 16383 && last.1 >= -16384);
    }
}
