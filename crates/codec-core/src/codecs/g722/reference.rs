//! Fixed-point basic operators used by the G.722 encoder
//!
//! 16- and 32-bit saturating arithmetic in the style of the ITU-T basic
//! operator set. Every band function is expressed with these so that the
//! encoder is bit-exact on any target.

/// Largest 16-bit value
pub const MAX_16: i16 = i16::MAX;
/// Smallest 16-bit value
pub const MIN_16: i16 = i16::MIN;

/// Saturate a 32-bit value to 16 bits
pub fn saturate(value: i32) -> i16 {
    value.clamp(i32::from(MIN_16), i32::from(MAX_16)) as i16
}

/// 16-bit saturating addition
pub fn add(a: i16, b: i16) -> i16 {
    saturate(i32::from(a) + i32::from(b))
}

/// 16-bit saturating subtraction
pub fn sub(a: i16, b: i16) -> i16 {
    saturate(i32::from(a) - i32::from(b))
}

/// 32-bit saturating addition
pub fn l_add(a: i32, b: i32) -> i32 {
    a.saturating_add(b)
}

/// 32-bit saturating subtraction
pub fn l_sub(a: i32, b: i32) -> i32 {
    a.saturating_sub(b)
}

/// Multiply two 16-bit values and accumulate into 32 bits with saturation
pub fn l_mac(acc: i32, a: i16, b: i16) -> i32 {
    l_add(acc, i32::from(a) * i32::from(b))
}

/// 32-bit arithmetic right shift
pub fn l_shr(value: i32, shift: i16) -> i32 {
    if shift >= 31 {
        if value < 0 { -1 } else { 0 }
    } else {
        value >> shift
    }
}

/// 16-bit left shift with saturation
pub fn shl(value: i16, shift: i16) -> i16 {
    if shift > 15 {
        return match value {
            0 => 0,
            v if v > 0 => MAX_16,
            _ => MIN_16,
        };
    }
    let result = i32::from(value) << shift;
    if result != i32::from(result as i16) {
        if value > 0 { MAX_16 } else { MIN_16 }
    } else {
        result as i16
    }
}

/// 16-bit arithmetic right shift
pub fn shr(value: i16, shift: i16) -> i16 {
    if shift >= 15 {
        if value < 0 { -1 } else { 0 }
    } else {
        value >> shift
    }
}

/// Clamp a 32-bit value into the 15-bit range [-16384, 16383]
pub fn clamp_15(value: i32) -> i16 {
    value.clamp(-16384, 16383) as i16
}

/// Q15 multiply: `(a * b) >> 15` with the low 15 bits of the product cleared
/// and bit 16 sign-extended into the upper half
pub fn mult(a: i16, b: i16) -> i16 {
    let mut product = ((i32::from(a) * i32::from(b)) & (0xffff_8000_u32 as i32)) >> 15;
    if product & 0x0001_0000 != 0 {
        product |= 0xffff_0000_u32 as i32;
    }
    product as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_16_bit() {
        assert_eq!(add(MAX_16, 1), MAX_16);
        assert_eq!(sub(MIN_16, 1), MIN_16);
        assert_eq!(add(-5, 3), -2);
        assert_eq!(saturate(100_000), MAX_16);
    }

    #[test]
    fn test_saturating_32_bit() {
        assert_eq!(l_add(i32::MAX, 1), i32::MAX);
        assert_eq!(l_sub(i32::MIN, 1), i32::MIN);
        assert_eq!(l_mac(10, 3, 4), 22);
        assert_eq!(l_mac(i32::MAX - 1, 2, 2), i32::MAX);
    }

    #[test]
    fn test_shifts() {
        assert_eq!(shl(1, 3), 8);
        assert_eq!(shl(0x4000, 1), MAX_16);
        assert_eq!(shl(-0x4000, 2), MIN_16);
        assert_eq!(shl(0, 20), 0);
        assert_eq!(shr(-1, 3), -1);
        assert_eq!(shr(-16, 2), -4);
        assert_eq!(shr(-16, 15), -1);
        assert_eq!(shr(16, 15), 0);
        assert_eq!(l_shr(-65536, 16), -1);
        assert_eq!(l_shr(123, 31), 0);
    }

    #[test]
    fn test_mult() {
        assert_eq!(mult(1200, 32), 1);
        assert_eq!(mult(16384, 16384), 8192);
        assert_eq!(mult(-16384, 16384), -8192);
        assert_eq!(mult(32767, 32767), 32766);
        assert_eq!(mult(0, -300), 0);
    }

    #[test]
    fn test_clamp_15() {
        assert_eq!(clamp_15(20000), 16383);
        assert_eq!(clamp_15(-20000), -16384);
        assert_eq!(clamp_15(42), 42);
    }
}
