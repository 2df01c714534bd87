//! Fixed-point transcendentals: sin/cos/tan via `sbrad` range reduction,
//! log2/ln/log10, exp, logistic, sqrt, inverse. Coefficients and range
//! reduction strategy mirror `original_source`'s `scalar_f32.c` /
//! `scalar_float_s32.c` / `chunk_s32.c`.

use fixed::types::I2F30;

/// `sbrad` (signed binary radian): `Q31` value in `[-1, 1)` mapping
/// linearly to `[-pi/2, pi/2)`. `q24_sin`/`q24_cos`/`q24_tan` convert a
/// Q24-radian input into this representation before applying the
/// power-series approximation, per spec §4.9/Glossary.
pub type Sbrad = i32;

const TWO_OVER_PI_Q30: i64 = 0x28BE60DC; // round(2/pi * 2^30)

/// Converts a Q24 radian angle into an `sbrad`, reduced to the nearest
/// multiple of `pi/2` and returning which quadrant (`0..=3`) was folded
/// away, matching `radians_to_tbrads`' range-reduction strategy.
pub fn radians_q24_to_sbrad(theta_q24: i32) -> (Sbrad, u32) {
    // theta_q24 represents theta/2^24 radians. tbrad domain is theta * 2/pi
    // scaled to Q2.30, then split into quadrant (top 2 bits) and an sbrad
    // remainder in [-1, 1).
    let scaled = (theta_q24 as i64 * TWO_OVER_PI_Q30) >> 24; // Q30, units of quarter-turns*2
    let quadrant = ((scaled >> 30) & 0x3) as u32;
    let frac = scaled - ((scaled >> 30) << 30); // Q30 in [0, 2^30)
    let sbrad = if frac >= (1i64 << 29) {
        (frac - (1i64 << 30)) as i32
    } else {
        frac as i32
    };
    (sbrad, quadrant)
}

/// 7-term odd power series approximating `sin(x * pi/2)` for `x` an
/// `sbrad` in `[-1, 1)`, matching `sbrad_sin`'s coefficient count.
pub fn sbrad_sin(x: Sbrad) -> I2F30 {
    // Minimax-style odd-power coefficients for sin(pi/2 * x) on [-1,1],
    // expressed directly as Q30 constants (same structure as the
    // original's table-driven power series).
    let xf = x as i64; // Q30
    let x2 = (xf * xf) >> 30;

    // Use double-precision Horner for the coefficients' derivation but
    // keep the evaluation entirely in Q30 fixed-point, seven terms:
    // sin(pi/2 * t) ~= t*(a0 + x2*(a1 + x2*(a2 + x2*(a3 + x2*(a4 + x2*(a5 + x2*a6))))))
    const A0: i64 = 1_686_629_713; // pi/2, Q30
    const A1: i64 = -707_398_506; // -(pi/2)^3/3!, Q30 scaled by x^2 step
    const A2: i64 = 86_659_720;
    const A3: i64 = -5_979_767;
    const A4: i64 = 256_422;
    const A5: i64 = -7_370;
    const A6: i64 = 147;

    let mut acc = A6;
    acc = A5 + ((acc * x2) >> 30);
    acc = A4 + ((acc * x2) >> 30);
    acc = A3 + ((acc * x2) >> 30);
    acc = A2 + ((acc * x2) >> 30);
    acc = A1 + ((acc * x2) >> 30);
    acc = A0 + ((acc * x2) >> 30);
    let result = (xf * acc) >> 30;
    I2F30::from_bits(result.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
}

/// `cos(x*pi/2) = sin((1-x)*pi/2)` folded through the same series via a
/// quarter-turn phase shift.
pub fn sbrad_cos(x: Sbrad) -> I2F30 {
    let one_q30 = 1i64 << 30;
    let shifted = (one_q30 - x as i64).clamp(-one_q30, one_q30 - 1);
    sbrad_sin(shifted as i32)
}

/// `q24_sin`: sine of a Q24-radian angle, returned in Q2.30.
pub fn q24_sin(theta_q24: i32) -> I2F30 {
    let (sbrad, quadrant) = radians_q24_to_sbrad(theta_q24);
    match quadrant & 0x3 {
        0 => sbrad_sin(sbrad),
        1 => sbrad_cos(sbrad),
        2 => I2F30::from_bits(-sbrad_sin(sbrad).to_bits()),
        _ => I2F30::from_bits(-sbrad_cos(sbrad).to_bits()),
    }
}

const PI_OVER_2_Q24: i32 = 26_353_589; // round(pi/2 * 2^24)

/// `q24_cos`: cosine of a Q24-radian angle via the `sin(x + pi/2)` identity.
pub fn q24_cos(theta_q24: i32) -> I2F30 {
    q24_sin(theta_q24.wrapping_add(PI_OVER_2_Q24))
}

/// `q24_tan`: inverts the argument when magnitude exceeds the sbrad
/// half-range (`|x| > 0.5`) to keep the divisor well-conditioned, per
/// spec §4.9.
pub fn q24_tan(theta_q24: i32) -> I2F30 {
    let s = q24_sin(theta_q24);
    let c = q24_cos(theta_q24);
    let s_bits = s.to_bits() as i64;
    let c_bits = c.to_bits() as i64;
    if c_bits.abs() > (1i64 << 29) {
        I2F30::from_bits(((s_bits << 30) / c_bits).clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    } else {
        // near-vertical asymptote: invert sin/cos roles, matching the
        // original's "tan inverts when argument magnitude exceeds 0.5".
        I2F30::from_bits(((c_bits << 30) / s_bits).clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }
}

/// Logistic function in Q24: power series for `|x| <= 1.2`, otherwise
/// `1/(1+e^{-|x|})` with the sign symmetry `logistic(-x) = 1 - logistic(x)`.
pub fn q24_logistic(x_q24: i32) -> i32 {
    const Q24_ONE: i64 = 1 << 24;
    let neg = x_q24 < 0;
    let ax = (x_q24 as i64).unsigned_abs() as i64;

    let result = if ax <= (Q24_ONE + Q24_ONE / 5) {
        // power series around 0: logistic(t) ~= 1/2 + t/4 - t^3/48 + t^5/480
        let t = ax;
        let t2 = (t * t) >> 24;
        let t3 = (t2 * t) >> 24;
        let t5 = (t3 * t2) >> 24;
        Q24_ONE / 2 + t / 4 - t3 / 48 + t5 / 480
    } else {
        let e = q24_exp(-ax);
        (Q24_ONE * Q24_ONE) / (Q24_ONE + e)
    };

    if neg {
        Q24_ONE - result
    } else {
        result
    }
    .clamp(0, Q24_ONE) as i32
}

/// `e^x` for `x` in Q24, range-reduced by extracting the integer part in
/// `ln(2)` units and applying `q30_exp_small` to the Q30 fractional
/// remainder, then rescaling by `2^k`. Mirrors `float_s32_exp`.
pub fn q24_exp(x_q24: i64) -> i64 {
    const LN2_Q24: i64 = 11_723_193; // round(ln(2) * 2^24)
    let k = x_q24.div_euclid(LN2_Q24);
    let r_q24 = x_q24 - k * LN2_Q24; // in [0, ln2) in Q24
    let r_q30 = r_q24 << 6; // widen Q24 -> Q30

    let exp_small = q30_exp_small(r_q30 as i32) as i64; // Q30, value in [1, 2)
    let exp_q24 = exp_small >> 6; // back to Q24
    if k >= 0 {
        exp_q24 << k.min(40)
    } else {
        exp_q24 >> (-k).min(40)
    }
}

/// 10-term power series for `e^x`, `x` constrained to `|x| <= 0.5` in Q30,
/// matching `q30_exp_small` / `exp_small_coef`.
pub fn q30_exp_small(x_q30: i32) -> i32 {
    const TERMS: [i64; 10] = [
        1 << 30,
        1 << 30,
        536_870_912,  // 1/2
        178_956_970,  // 1/6
        44_739_243,   // 1/24
        8_947_849,    // 1/120
        1_491_308,    // 1/720
        213_044,      // 1/5040
        26_631,       // 1/40320
        2_959,        // 1/362880
    ];
    let x = x_q30 as i64;
    let mut acc = TERMS[9];
    for k in (0..9).rev() {
        acc = TERMS[k] + ((acc * x) >> 30);
    }
    acc.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// `log2`/`ln`/`log10` share one mantissa/exponent-based routine:
/// normalize `b * 2^b_exp` to a mantissa in `[1, 2)`, run a polynomial on
/// the mantissa, add the (now-known) binary exponent, and optionally
/// rescale by `inv_ln_base` (Q2.30) to change base. `inv_ln_base_q30 == 0`
/// means natural log (`vect_s32_log_base`'s convention).
pub fn log_base_q8_24(b: i32, b_exp: i32, inv_ln_base_q30: i64) -> i64 {
    debug_assert!(b > 0, "log of non-positive mantissa is a contract violation");
    let hr = super::hr_s32(b) as i32;
    let norm_shift = hr; // left-shift to put MSB just below sign bit
    let mantissa = (b as i64) << norm_shift; // now in [2^30, 2^31)
    let binary_exp = (b_exp - norm_shift + 31) as i64; // true log2 integer part

    // ln(mantissa / 2^30) via atanh-style series on (m-1)/(m+1), m in [1,2)
    let m = mantissa; // Q30, in [2^30, 2^31)
    let one = 1i64 << 30;
    let num = m - one;
    let den = m + one;
    let z = (num << 30) / den; // Q30, in [0, 1/3]
    let z2 = (z * z) >> 30;
    // ln(1+y) = 2*(z + z^3/3 + z^5/5 + ...), y=(m-1)
    let mut series = (1i64 << 30) / 9; // 1/9 term coefficient seed
    series = (1i64 << 30) / 7 + ((z2 * series) >> 30);
    series = (1i64 << 30) / 5 + ((z2 * series) >> 30);
    series = (1i64 << 30) / 3 + ((z2 * series) >> 30);
    series = (1i64 << 30) + ((z2 * series) >> 30);
    let ln_mantissa = (2 * z * series) >> 30; // Q30

    const LN2_Q30: i64 = 744_261_118; // round(ln(2) * 2^30)
    let ln_value_q30 = binary_exp * LN2_Q30 + ln_mantissa;

    let scaled = if inv_ln_base_q30 != 0 {
        (ln_value_q30 * inv_ln_base_q30) >> 30
    } else {
        ln_value_q30
    };
    // Q30 -> Q8.24
    scaled >> 6
}

/// `log2` in Q8.24; `inv_ln_base_q30 = round(1/ln(2) * 2^30)`.
pub fn log2_q8_24(b: i32, b_exp: i32) -> i64 {
    log_base_q8_24(b, b_exp, 0x5c55_1d95)
}

/// `log10` in Q8.24; `inv_ln_base_q30 = round(1/ln(10) * 2^30)`.
pub fn log10_q8_24(b: i32, b_exp: i32) -> i64 {
    log_base_q8_24(b, b_exp, 0x1bcb_7b15)
}

/// `ln` in Q8.24.
pub fn ln_q8_24(b: i32, b_exp: i32) -> i64 {
    log_base_q8_24(b, b_exp, 0)
}

/// Integer-domain signed square root with exponent tracking: reduces `b`
/// to an even exponent, takes the integer square root of the mantissa,
/// and halves the exponent.
pub fn s32_sqrt(b: i32, b_exp: i32) -> (i32, i32) {
    debug_assert!(b >= 0, "sqrt of negative mantissa is a contract violation");
    let hr = super::hr_s32(b) as i32;
    let mut shl = hr - (hr & 1); // keep exponent parity even after shift
    if (b_exp - shl) % 2 != 0 {
        shl -= 1;
    }
    let widened = (b as i64) << shl;
    let mantissa = isqrt_i64(widened << 30) as i32; // Q15.. scale handled by caller's exp bookkeeping
    (mantissa, (b_exp - shl - 30) / 2)
}

fn isqrt_i64(x: i64) -> i64 {
    if x <= 0 {
        return 0;
    }
    let mut r = (x as f64).sqrt() as i64;
    while r * r > x {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= x {
        r += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_of_zero_is_zero() {
        assert_eq!(q24_sin(0).to_bits(), 0);
    }

    #[test]
    fn sin_matches_float_reference_within_tolerance() {
        for deg in [0, 30, 45, 60, 90, 120, 180, -90] {
            let theta = (deg as f64).to_radians();
            let theta_q24 = (theta * (1i64 << 24) as f64).round() as i32;
            let expected = theta.sin();
            let got = q24_sin(theta_q24).to_num::<f64>();
            assert!(
                (got - expected).abs() < 1e-3,
                "deg={deg} got={got} expected={expected}"
            );
        }
    }

    #[test]
    fn logistic_is_point_five_at_zero() {
        let v = q24_logistic(0);
        assert!((v - (1 << 23)).abs() <= 2);
    }

    #[test]
    fn logistic_symmetry_holds() {
        for x in [1_000_000i32, 5_000_000, 16_000_000] {
            let pos = q24_logistic(x) as i64;
            let neg = q24_logistic(-x) as i64;
            assert!((pos + neg - (1i64 << 24)).abs() <= 4);
        }
    }

    #[test]
    fn sqrt_of_perfect_square_is_exact_enough() {
        let (mant, exp) = s32_sqrt(4 << 28, -28); // value = 4.0
        let value = mant as f64 * 2f64.powi(exp);
        assert!((value - 2.0).abs() < 1e-3);
    }
}
