//! `f32` convenience wrappers over the fixed-point mono real FFT: pack
//! a float buffer down to a `BfpReal32`, run the transform, and unpack the
//! spectrum back to `f32` magnitude/phase pairs. These exist for callers
//! who want FFT results without managing BFP exponents themselves, the
//! same role `fft_f32.c`'s float API plays over the fixed-point core.

use crate::bfp::{BfpComplex32, BfpReal32};
use crate::error::BfpResult;
use crate::scalar::float::{f32_pack, f32_unpack};
use crate::scalar::{ComplexS32, Exp, FloatS32};

/// Forward real FFT of an `f32` signal. `out` must have length
/// `x.len()/2`; entry `k`'s value is `(out[k].0, out[k].1)` where the
/// first element is the real part and the second the imaginary part,
/// except `out[0].1` which holds the Nyquist bin's real part, matching
/// the fixed-point packing [`super::real::forward_mono`] produces.
pub fn forward_f32(x: &[f32], out: &mut [(f32, f32)]) -> BfpResult<()> {
    debug_assert_eq!(out.len(), x.len() / 2);

    let unpacked: Vec<FloatS32> = x.iter().map(|&v| f32_unpack(v)).collect();
    let exp = unpacked.iter().map(|v| v.exp).min().unwrap_or(0);
    let mut mantissas: Vec<i32> = unpacked
        .iter()
        .map(|v| {
            let shr = exp.min(v.exp) - v.exp;
            crate::scalar::round_shr_i32(v.mantissa, shr)
        })
        .collect();
    // `mantissas[k]` is scaled so every sample shares `exp`; widen toward
    // the top of the range before handing off to the fixed-point FFT.
    let hr = crate::vect::s32::headroom(&mantissas);
    let shl = hr as i32;
    for m in mantissas.iter_mut() {
        *m <<= shl;
    }
    let working_exp = exp - shl;

    let real = BfpReal32::init(&mut mantissas, working_exp, true);
    let mut spec = vec![ComplexS32::default(); x.len() / 2];
    let mut spectrum = BfpComplex32::init(&mut spec, 0, false);
    super::real::forward_mono(&real, &mut spectrum)?;

    for (o, c) in out.iter_mut().zip(spectrum.data.iter()) {
        *o = (
            f32_pack(FloatS32 { mantissa: c.re, exp: spectrum.exp }),
            f32_pack(FloatS32 { mantissa: c.im, exp: spectrum.exp }),
        );
    }
    Ok(())
}

/// Inverse of [`forward_f32`]: a packed spectrum back to an `f32` signal
/// of length `2*spectrum.len()`.
pub fn inverse_f32(spectrum: &[(f32, f32)], out: &mut [f32]) -> BfpResult<()> {
    debug_assert_eq!(out.len(), 2 * spectrum.len());

    let unpacked: Vec<FloatS32> = spectrum
        .iter()
        .flat_map(|&(re, im)| [f32_unpack(re), f32_unpack(im)])
        .collect();
    let exp: Exp = unpacked.iter().map(|v| v.exp).min().unwrap_or(0);
    let mut mantissas: Vec<i32> = unpacked
        .iter()
        .map(|v| {
            let shr = exp.min(v.exp) - v.exp;
            crate::scalar::round_shr_i32(v.mantissa, shr)
        })
        .collect();

    let mut data: Vec<ComplexS32> = mantissas
        .chunks_exact(2)
        .map(|p| ComplexS32::new(p[0], p[1]))
        .collect();

    let x = BfpComplex32::init(&mut data, exp, true);
    let mut time_domain = vec![0i32; out.len()];
    let mut real = BfpReal32::init(&mut time_domain, 0, false);
    super::real::inverse_mono(&x, &mut real)?;

    for (dst, &m) in out.iter_mut().zip(real.data.iter()) {
        *dst = f32_pack(FloatS32 { mantissa: m, exp: real.exp });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_f32_of_impulse_is_flat_spectrum() {
        let x = [1.0f32, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut out = [(0.0f32, 0.0f32); 4];
        forward_f32(&x, &mut out).unwrap();
        for &(re, im) in out.iter().skip(1) {
            assert!(re.abs() <= 0.2);
            assert!(im.abs() <= 0.2);
        }
    }
}
