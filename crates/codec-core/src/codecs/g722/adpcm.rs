//! G.722 ADPCM band coders
//!
//! Low band: 6-bit adaptive quantizer. High band: 2-bit adaptive quantizer.
//! Both share the pole/zero predictor adaptation.

use crate::codecs::g722::reference::{add, mult, shl, shr, sub, MAX_16};
use crate::codecs::g722::state::SubBandState;
use crate::codecs::g722::tables::*;

/// Low-band quantizer: 6-bit codeword for difference `el` at scale `detl`
pub fn quantl(el: i16, detl: i16) -> i16 {
    let sil = shr(el, 15);
    let wd = if sil == 0 { el } else { sub(MAX_16, el & MAX_16) };

    let mut mil: usize = 0;
    let mut val = mult(shl(Q6[mil], 3), detl);
    while sub(val, wd) <= 0 {
        if mil == 30 {
            break;
        }
        mil += 1;
        val = mult(shl(Q6[mil], 3), detl);
    }

    let row = add(sil, 1).max(0) as usize;
    MISIL[row][mil]
}

/// High-band quantizer: 2-bit codeword for difference `eh` at scale `deth`
pub fn quanth(eh: i16, deth: i16) -> i16 {
    let sih = shr(eh, 15);
    let wd = if sih == 0 { eh } else { sub(MAX_16, eh & MAX_16) };

    let mih = if sub(wd, mult(shl(564, 3), deth)) >= 0 { 2 } else { 1 };

    let row = add(sih, 1).max(0) as usize;
    MISIH[row][mih]
}

/// Low-band inverse quantizer (4-bit truncated codeword)
pub fn invqal(il: i16, detl: i16) -> i16 {
    let ril = shr(il, 2) as usize;
    let wd1 = shl(OQ4[RIL4[ril] as usize], 3);
    let wd2 = if RISIL[ril] == 0 { wd1 } else { wd1.wrapping_neg() };
    mult(detl, wd2)
}

/// High-band inverse quantizer
pub fn invqah(ih: i16, deth: i16) -> i16 {
    let ih = ih as usize;
    let wd1 = shl(OQ2[IH2[ih] as usize], 3);
    let wd2 = if SIH[ih] == 0 { wd1 } else { wd1.wrapping_neg() };
    mult(wd2, deth)
}

/// Low-band log scale factor update, bounded to [0, 18432]
pub fn logscl(il: i16, nbl: i16) -> i16 {
    let ril = shr(il, 2) as usize;
    let wd = mult(nbl, 32512);
    let il4 = RIL4[ril] as usize;
    let nbpl = add(wd, WL[il4]);
    nbpl.clamp(0, NBL_MAX)
}

/// High-band log scale factor update, bounded to [0, 22528]
pub fn logsch(ih: i16, nbh: i16) -> i16 {
    let wd = mult(nbh, 32512);
    let nbph = add(wd, WH[IH2[ih as usize] as usize]);
    nbph.clamp(0, NBH_MAX)
}

/// Low-band linear scale factor from its log form
pub fn scalel(nbpl: i16) -> i16 {
    let wd1 = shr(nbpl, 6) & 511;
    let wd2 = add(wd1, 64).max(0) as usize;
    shl(add(ILA[wd2], 1), 2)
}

/// High-band linear scale factor from its log form
pub fn scaleh(nbph: i16) -> i16 {
    let wd = (shr(nbph, 6) & 511) as usize;
    shl(add(ILA[wd], 1), 2)
}

/// Zero predictor coefficient update; also ages the difference history
pub fn upzero(dlt: &mut [i16; 7], bl: &mut [i16; 7]) {
    let wd1 = if dlt[0] == 0 { 0 } else { 128 };
    let sg0 = shr(dlt[0], 15);

    for i in (1..=6).rev() {
        let wd2 = if sg0 == shr(dlt[i], 15) { add(0, wd1) } else { sub(0, wd1) };
        bl[i] = add(wd2, mult(bl[i], 32640));
        dlt[i] = dlt[i - 1];
    }
}

/// First pole predictor coefficient update; also ages the partial signal history
pub fn uppol1(al: &mut [i16; 3], plt: &mut [i16; 3]) {
    let sg0 = shr(plt[0], 15);
    let sg1 = shr(plt[1], 15);
    let wd1 = if sub(sg0, sg1) == 0 { 192 } else { -192 };

    let wd2 = mult(al[1], 32640);
    let mut apl1 = add(wd1, wd2);
    let wd3 = sub(15360, al[2]);

    if sub(apl1, wd3) > 0 {
        apl1 = wd3;
    } else if add(apl1, wd3) < 0 {
        apl1 = wd3.wrapping_neg();
    }

    plt[2] = plt[1];
    plt[1] = plt[0];
    al[1] = apl1;
}

/// Second pole predictor coefficient update, bounded to [-12288, 12288]
pub fn uppol2(al: &mut [i16; 3], plt: &[i16; 3]) {
    let sg0 = shr(plt[0], 15);
    let sg1 = shr(plt[1], 15);
    let sg2 = shr(plt[2], 15);

    let wd1 = shl(al[1], 2);
    let wd2 = if sub(sg0, sg1) == 0 { sub(0, wd1) } else { add(0, wd1) };
    let wd2 = shr(wd2, 7);
    let wd3 = if sub(sg0, sg2) == 0 { 128 } else { -128 };

    let wd4 = add(wd2, wd3);
    let wd5 = mult(al[2], 32512);
    let apl2 = add(wd4, wd5);

    al[2] = apl2.clamp(-12288, 12288);
}

/// Zero section of the predictor
pub fn filtez(dlt: &[i16; 7], bl: &[i16; 7]) -> i16 {
    (1..=6).rev().fold(0, |szl, i| {
        let wd = add(dlt[i], dlt[i]);
        add(szl, mult(wd, bl[i]))
    })
}

/// Pole section of the predictor; also ages the reconstructed signal history
pub fn filtep(rlt: &mut [i16; 3], al: &[i16; 3]) -> i16 {
    rlt[2] = rlt[1];
    rlt[1] = rlt[0];

    let wd1 = mult(al[1], add(rlt[1], rlt[1]));
    let wd2 = mult(al[2], add(rlt[2], rlt[2]));
    add(wd1, wd2)
}

/// Predictor adaptation shared by both bands, run after the new difference
/// `state.d[0]` is known
fn adapt_predictor(state: &mut SubBandState) {
    state.p[0] = add(state.d[0], state.sz);
    state.r[0] = add(state.s, state.d[0]);
    upzero(&mut state.d, &mut state.b);
    uppol2(&mut state.a, &state.p);
    uppol1(&mut state.a, &mut state.p);
    state.sz = filtez(&state.d, &state.b);
    state.sp = filtep(&mut state.r, &state.a);
    state.s = add(state.sp, state.sz);
}

/// Encode one low-band sample, returning its 6-bit codeword
pub fn lsbcod(xl: i16, state: &mut SubBandState) -> i16 {
    let il = quantl(sub(xl, state.s), state.det);
    state.d[0] = invqal(il, state.det);
    state.nb = logscl(il, state.nb);
    state.det = scalel(state.nb);
    adapt_predictor(state);
    il
}

/// Encode one high-band sample, returning its 2-bit codeword
pub fn hsbcod(xh: i16, state: &mut SubBandState) -> i16 {
    let ih = quanth(sub(xh, state.s), state.det);
    state.d[0] = invqah(ih, state.det);
    state.nb = logsch(ih, state.nb);
    state.det = scaleh(state.nb);
    adapt_predictor(state);
    ih
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantl_zero_difference() {
        // Smallest positive interval at the initial scale factor
        assert_eq!(quantl(0, 32), 0x3A);
    }

    #[test]
    fn test_quantl_sign() {
        let positive = quantl(2000, 32);
        let negative = quantl(-2000, 32);
        assert!(positive >= 0x20);
        assert!(negative < 0x20);
    }

    #[test]
    fn test_quanth_zero_difference() {
        assert_eq!(quanth(0, 8), 3);
        assert_eq!(quanth(-1000, 8), 0);
    }

    #[test]
    fn test_invqal_of_first_codeword() {
        assert_eq!(invqal(0x3A, 32), 1);
    }

    #[test]
    fn test_log_scale_bounds() {
        let mut nbl = 0;
        for _ in 0..1000 {
            nbl = logscl(0x04, nbl);
        }
        assert!(nbl <= NBL_MAX);
        assert!(logscl(0x3F, 0) >= 0);

        let mut nbh = 0;
        for _ in 0..1000 {
            nbh = logsch(2, nbh);
        }
        assert!(nbh <= NBH_MAX);
    }

    #[test]
    fn test_scale_factors_at_rest() {
        assert_eq!(scalel(0), shl(add(ILA[64], 1), 2));
        assert_eq!(scaleh(0), 8);
    }

    #[test]
    fn test_uppol2_bounds() {
        let mut al = [0, 32767, 32767];
        uppol2(&mut al, &[1, 1, 1]);
        assert!(al[2] <= 12288);
    }

    #[test]
    fn test_upzero_ages_history() {
        let mut dlt = [7, 6, 5, 4, 3, 2, 1];
        let mut bl = [0; 7];
        upzero(&mut dlt, &mut bl);
        assert_eq!(dlt, [7, 7, 6, 5, 4, 3, 2]);
        assert!(bl[1..].iter().all(|&b| b == 128));
    }

    #[test]
    fn test_filtep_ages_history() {
        let mut rlt = [3, 2, 1];
        filtep(&mut rlt, &[0, 0, 0]);
        assert_eq!(rlt, [3, 3, 2]);
    }
}
