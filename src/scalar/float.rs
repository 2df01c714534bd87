//! `float_s32`/`float_s64`/`float_complex_sXX` scalar helpers: packing an
//! IEEE `f32`/`f64` into a mantissa+exponent pair and back, and narrowing
//! between the two mantissa widths. These back the float-convenience FFT
//! wrappers (`fft::float`) and the scalar transcendentals.

use super::{hr_s32, hr_s64, round_shr_i64, ComplexS32, Exp, FloatComplexS32, FloatS32, FloatS64};

/// Splits an `f32` into a 32-bit mantissa and a base-2 exponent such that
/// `value == mantissa * 2^exp`, with the mantissa left-justified to use
/// the full `i32` range (zero headroom) whenever `value != 0`.
pub fn f32_unpack(value: f32) -> FloatS32 {
    if value == 0.0 {
        return FloatS32 { mantissa: 0, exp: 0 };
    }
    let bits = value.to_bits();
    let raw_exp = ((bits >> 23) & 0xFF) as i32;
    let raw_mant = (bits & 0x7FFFFF) as i64;
    let sign = if bits & 0x8000_0000 != 0 { -1i64 } else { 1 };

    let (mant_24, exp) = if raw_exp == 0 {
        // subnormal
        (raw_mant, -126 - 23)
    } else {
        (raw_mant | (1 << 23), raw_exp - 127 - 23)
    };

    let mantissa = (sign * mant_24) as i32;
    FloatS32 { mantissa, exp }.normalize()
}

impl FloatS32 {
    /// Left-shifts the mantissa to remove all headroom, compensating the
    /// exponent, so the mantissa occupies the full dynamic range.
    pub fn normalize(self) -> Self {
        if self.mantissa == 0 {
            return self;
        }
        let hr = hr_s32(self.mantissa) as i32;
        FloatS32 {
            mantissa: self.mantissa << hr,
            exp: self.exp - hr,
        }
    }

    /// Narrows to a `float_complex`-compatible 16-bit mantissa pair
    /// sharing one exponent (used when packing real/imag parts that must
    /// share a scale).
    pub fn to_s64(self) -> FloatS64 {
        FloatS64 {
            mantissa: self.mantissa as i64,
            exp: self.exp,
        }
    }
}

impl FloatS64 {
    pub fn normalize(self) -> Self {
        if self.mantissa == 0 {
            return self;
        }
        let hr = hr_s64(self.mantissa) as i32;
        FloatS64 {
            mantissa: self.mantissa << hr,
            exp: self.exp - hr,
        }
    }

    /// Narrows to 32 bits via rounding right-shift, per `s64_to_s32`.
    pub fn to_s32(self) -> FloatS32 {
        let (m, e) = super::s64_to_s32(self.mantissa, self.exp);
        FloatS32 { mantissa: m, exp: e }
    }
}

/// Reconstructs an `f32` from a mantissa/exponent pair. Used by the
/// float-convenience FFT wrappers to dequantize the fixed-point result.
pub fn f32_pack(value: FloatS32) -> f32 {
    (value.mantissa as f64 * 2f64.powi(value.exp)) as f32
}

/// Combines two independent real `float_s32` exponents (one for a real
/// part, one for an imaginary part) into a single shared exponent,
/// right-shifting the part with more headroom to align. Mirrors the
/// `float_complex_s32` packing convention.
pub fn float_complex_s32_from_parts(re: FloatS32, im: FloatS32) -> FloatComplexS32 {
    let exp = re.exp.max(im.exp);
    let re_shr = exp - re.exp;
    let im_shr = exp - im.exp;
    FloatComplexS32 {
        mantissa: ComplexS32 {
            re: round_shr_i64(re.mantissa as i64, re_shr) as i32,
            im: round_shr_i64(im.mantissa as i64, im_shr) as i32,
        },
        exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_pack_round_trips_within_float_precision() {
        for v in [1.0f32, -1.0, 0.5, 123.456, -0.000123] {
            let unpacked = f32_unpack(v);
            let repacked = f32_pack(unpacked);
            assert!((repacked - v).abs() <= v.abs() * 1e-6 + 1e-12);
        }
    }

    #[test]
    fn unpack_of_zero_is_zero() {
        let z = f32_unpack(0.0);
        assert_eq!(z.mantissa, 0);
    }
}
