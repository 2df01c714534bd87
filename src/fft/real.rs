//! Real-signal FFT entry points: mono (one real signal via a half-length
//! complex FFT) and stereo (two real signals via one full-length complex
//! FFT). Ported from `original_source/.../fft/fft_bfp.c`'s
//! `bfp_fft_forward_mono`/`bfp_fft_inverse_mono`/`bfp_fft_forward_stereo`/
//! `bfp_fft_inverse_stereo`/`bfp_fft_pack_mono`/`bfp_fft_unpack_mono`. Both
//! entry points are built on [`super::dit`] exclusively — the BFP level of
//! the original library never calls the DIF transform.

use crate::bfp::{BfpComplex32, BfpReal32};
use crate::error::{BfpError, BfpResult};
use crate::scalar::{sat_round_shr_s32, ComplexS32};
use crate::vect::complex_s32;

use super::twiddle::MAX_FFT_LEN;
use super::{dit, util};

fn check_len(n: usize) -> BfpResult<()> {
    if n < 16 || n > MAX_FFT_LEN || !n.is_power_of_two() {
        return Err(BfpError::InvalidFftLength(n, MAX_FFT_LEN));
    }
    Ok(())
}

/// Forward real FFT of `x` (length `n`, `n` a power of two `>= 16`) into
/// `out` (length `n/2`), packed so `out[0].im` holds the Nyquist bin's
/// real part (spec §4.5.2).
pub fn forward_mono(x: &BfpReal32, out: &mut BfpComplex32) -> BfpResult<()> {
    check_len(x.len())?;
    debug_assert_eq!(out.len(), x.len() / 2);

    let shr = (2 - x.hr as i32).max(0);
    for (o, pair) in out.data.iter_mut().zip(x.data.chunks_exact(2)) {
        o.re = sat_round_shr_s32(pair[0] as i64, shr);
        o.im = sat_round_shr_s32(pair[1] as i64, shr);
    }
    out.exp = x.exp + shr;

    util::bit_reversal(&mut out.data);
    let hr = complex_s32::headroom(&out.data);
    let (hr, exp) = dit::forward(&mut out.data, hr, out.exp);
    out.hr = hr;
    out.exp = exp;

    util::mono_adjust(&mut out.data, x.len(), false);
    out.headroom();
    Ok(())
}

/// Inverse of [`forward_mono`]: `x` (length `n/2`, packed) back to `out`
/// (length `n`).
pub fn inverse_mono(x: &BfpComplex32, out: &mut BfpReal32) -> BfpResult<()> {
    let n = out.len();
    check_len(n)?;
    debug_assert_eq!(x.len(), n / 2);

    let shr = (2 - x.hr as i32).max(0);
    let mut work: Vec<ComplexS32> = x
        .data
        .iter()
        .map(|c| {
            ComplexS32::new(
                sat_round_shr_s32(c.re as i64, shr),
                sat_round_shr_s32(c.im as i64, shr),
            )
        })
        .collect();
    let mut work_exp = x.exp + shr;

    util::mono_adjust(&mut work, n, true);

    util::bit_reversal(&mut work);
    let hr = complex_s32::headroom(&work);
    let (_, exp) = dit::inverse(&mut work, hr, work_exp);
    work_exp = exp;

    for (pair, c) in out.data.chunks_exact_mut(2).zip(work.iter()) {
        pair[0] = c.re;
        pair[1] = c.im;
    }
    out.exp = work_exp;
    out.headroom();
    Ok(())
}

/// Forward real FFT of two same-length signals `a`/`b` at once, via one
/// complex FFT of length `a.len()` (spec §4.5.3). `scratch` must have
/// length `a.len()`. Results land packed in `out_a`/`out_b`, each length
/// `a.len()/2`.
#[allow(clippy::too_many_arguments)]
pub fn forward_stereo(
    a: &BfpReal32,
    b: &BfpReal32,
    out_a: &mut BfpComplex32,
    out_b: &mut BfpComplex32,
    scratch: &mut BfpComplex32,
) -> BfpResult<()> {
    debug_assert_eq!(a.len(), b.len());
    check_len(a.len())?;
    debug_assert_eq!(scratch.len(), a.len());
    debug_assert_eq!(out_a.len(), a.len() / 2);
    debug_assert_eq!(out_b.len(), a.len() / 2);

    let common_hr = a.hr.min(b.hr) as i32;
    let zip_exp = a.exp.max(b.exp) - common_hr + 2;
    let a_shr = zip_exp - a.exp;
    let b_shr = zip_exp - b.exp;
    util::zip(&mut scratch.data, &a.data, &b.data, a_shr, b_shr);
    scratch.exp = zip_exp;

    util::bit_reversal(&mut scratch.data);
    let hr = complex_s32::headroom(&scratch.data);
    let (_, exp) = dit::forward(&mut scratch.data, hr, scratch.exp);
    scratch.exp = exp;

    let n = scratch.len();
    let out_hr = util::spectra_split(&mut scratch.data, n);
    scratch.hr = out_hr;

    let half = n / 2;
    out_a.data.copy_from_slice(&scratch.data[..half]);
    out_b.data.copy_from_slice(&scratch.data[half..]);
    out_a.exp = scratch.exp;
    out_b.exp = scratch.exp;
    out_a.headroom();
    out_b.headroom();
    Ok(())
}

/// Inverse of [`forward_stereo`]. Needs 3 bits of headroom per channel
/// (one more than the forward direction) because [`util::spectra_merge`]
/// can itself reduce headroom before the inverse transform runs.
#[allow(clippy::too_many_arguments)]
pub fn inverse_stereo(
    x_a: &BfpComplex32,
    x_b: &BfpComplex32,
    out_a: &mut BfpReal32,
    out_b: &mut BfpReal32,
    scratch: &mut BfpComplex32,
) -> BfpResult<()> {
    debug_assert_eq!(x_a.len(), x_b.len());
    let half = x_a.len();
    let n = 2 * half;
    check_len(n)?;
    debug_assert_eq!(scratch.len(), n);
    debug_assert_eq!(out_a.len(), n);
    debug_assert_eq!(out_b.len(), n);

    let common_hr = x_a.hr.min(x_b.hr) as i32;
    let common_exp = x_a.exp.max(x_b.exp) - common_hr + 3;
    let a_shr = common_exp - x_a.exp;
    let b_shr = common_exp - x_b.exp;
    for (o, c) in scratch.data[..half].iter_mut().zip(x_a.data.iter()) {
        o.re = sat_round_shr_s32(c.re as i64, a_shr);
        o.im = sat_round_shr_s32(c.im as i64, a_shr);
    }
    for (o, c) in scratch.data[half..].iter_mut().zip(x_b.data.iter()) {
        o.re = sat_round_shr_s32(c.re as i64, b_shr);
        o.im = sat_round_shr_s32(c.im as i64, b_shr);
    }
    scratch.exp = common_exp;

    util::spectra_merge(&mut scratch.data, n);
    scratch.headroom();

    util::bit_reversal(&mut scratch.data);
    let hr = complex_s32::headroom(&scratch.data);
    let (_, exp) = dit::inverse(&mut scratch.data, hr, scratch.exp);
    scratch.exp = exp;

    util::unzip(&mut out_a.data, &mut out_b.data, &scratch.data);
    out_a.exp = scratch.exp;
    out_b.exp = scratch.exp;
    out_a.headroom();
    out_b.headroom();
    Ok(())
}

/// Repacks an unpacked length-`n/2+1` mono spectrum (DC and Nyquist as
/// separate, fully-complex bins with zero imaginary part) down to the
/// dense length-`n/2` form [`forward_mono`] produces, by folding the
/// Nyquist bin's real part into `x[0]`'s imaginary slot.
pub fn pack_mono(x: &mut [ComplexS32]) -> ComplexS32 {
    let half = x.len() - 1;
    let nyquist = x[half];
    x[0].im = nyquist.re;
    x[half]
}

/// Inverse of [`pack_mono`]: expands a dense length-`n/2` spectrum back
/// to length `n/2+1` by moving `x[0].im` out into its own bin. Caller
/// supplies the destination slice (one element longer than `x`).
pub fn unpack_mono(x: &[ComplexS32], out: &mut [ComplexS32]) {
    debug_assert_eq!(out.len(), x.len() + 1);
    out[..x.len()].copy_from_slice(x);
    out[0].im = 0;
    out[x.len()] = ComplexS32::new(x[0].im, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_forward_then_inverse_round_trips_up_to_shift() {
        let mut xd = [1i32 << 20, 2 << 20, -1 << 20, 0, 1 << 18, 0, 0, 0];
        let original = xd;
        let x = BfpReal32::init(&mut xd, 0, true);
        let mut spec = [ComplexS32::default(); 4];
        let mut spectrum = BfpComplex32::init(&mut spec, 0, false);
        forward_mono(&x, &mut spectrum).unwrap();

        let mut rt = [0i32; 8];
        {
            let mut out = BfpReal32::init(&mut rt, 0, false);
            inverse_mono(&spectrum, &mut out).unwrap();
        }
        for (&a, &b) in rt.iter().zip(original.iter()) {
            let af = a as f64;
            let bf = b as f64;
            assert!((af - bf).abs() <= bf.abs() * 0.1 + 8.0);
        }
    }

    #[test]
    fn pack_then_unpack_mono_round_trips() {
        let mut packed = [
            ComplexS32::new(1, 99),
            ComplexS32::new(2, 3),
            ComplexS32::new(4, 5),
        ];
        let mut unpacked = [ComplexS32::default(); 4];
        unpack_mono(&packed, &mut unpacked);
        assert_eq!(unpacked[0].im, 0);
        assert_eq!(unpacked[3], ComplexS32::new(99, 0));

        pack_mono(&mut unpacked);
        assert_eq!(unpacked[0], packed[0]);
        packed[0] = unpacked[0];
        assert_eq!(&unpacked[..3], &packed[..]);
    }
}
