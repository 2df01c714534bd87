//! FFT support routines: bit-reversal permutation, the mono real-FFT
//! pack/unpack recombination, and the stereo real-FFT spectrum
//! split/merge. Grounded in
//! `original_source/.../arch/ref/fft/fft_util.c`.

use crate::scalar::{bitrev, ceil_log2, round_shr_i64, sat_round_shr_s32, ComplexS32, Headroom};
use crate::vect::complex_s32;

use super::twiddle::{mono_adjust_offset, MONO_ADJUST_TWIDDLES};

/// Permutes `x` into bit-reversed index order (ignoring any bits above
/// `ceil_log2(x.len())`). Required before a DIT transform and after a DIF
/// transform.
pub fn bit_reversal(x: &mut [ComplexS32]) {
    let n = x.len();
    if n <= 1 {
        return;
    }
    let logn = ceil_log2(n as u32);
    for i in 0..n {
        let rev = bitrev(i as u32, logn) as usize;
        if rev < i {
            continue;
        }
        x.swap(i, rev);
    }
}

/// `e^{-2*pi*i*k/30-bit}` complex multiply at the twiddle table's native
/// Q2.30 scale: `(a.re*b.re - a.im*b.im, a.re*b.im + a.im*b.re) >> 30`.
fn q30_mul(a: ComplexS32, b: ComplexS32) -> ComplexS32 {
    let ar = a.re as i64;
    let ai = a.im as i64;
    let br = b.re as i64;
    let bi = b.im as i64;
    ComplexS32 {
        re: sat_round_shr_s32(ar * br - ai * bi, 30),
        im: sat_round_shr_s32(ar * bi + ai * br, 30),
    }
}

fn q30_add(a: ComplexS32, b: ComplexS32) -> ComplexS32 {
    ComplexS32 {
        re: sat_round_shr_s32(a.re as i64 + b.re as i64, 0),
        im: sat_round_shr_s32(a.im as i64 + b.im as i64, 0),
    }
}

/// Recombines (or un-recombines) the half-length complex FFT used to
/// implement a real, mono FFT of length `fft_n` (spec §4.5.2). `x` has
/// length `fft_n/2`. When `inverse` is set, performs the reverse
/// recombination expected before a real IFFT's half-length complex IFFT.
///
/// `A = 0.5*(1 - jW)`, `B = 0.5*(1 + jW)`, `W[k] = e^{-2*pi*i*k/fft_n}`:
/// `new_lo[k] = A[k]*lo[k] + B[k]*conj(hi[k])`,
/// `new_hi[k] = conj(A[k])*hi[k] + conj(B[k]*lo[k])`.
pub fn mono_adjust(x: &mut [ComplexS32], fft_n: usize, inverse: bool) {
    debug_assert!(fft_n >= 16);
    debug_assert_eq!(x.len(), fft_n / 2);
    let quarter = fft_n / 4;

    let x0 = x[0];
    let xq = x[quarter];

    complex_s32::tail_reverse(&mut x[quarter..]);

    let (lo_base, hi_base) = if inverse { (quarter, 0) } else { (0, quarter) };

    let w_off = mono_adjust_offset(fft_n);
    let w = &MONO_ADJUST_TWIDDLES[w_off..w_off + quarter];

    const ONE_Q30: i32 = 1 << 30;
    for k in 0..quarter {
        let wk = w[k];
        let jw = ComplexS32 { re: -wk.im, im: wk.re };
        let a = ComplexS32 {
            re: round_shr_i64(ONE_Q30 as i64 - jw.re as i64, 1) as i32,
            im: round_shr_i64(0 - jw.im as i64, 1) as i32,
        };
        let b = ComplexS32 {
            re: round_shr_i64(ONE_Q30 as i64 + jw.re as i64, 1) as i32,
            im: round_shr_i64(0 + jw.im as i64, 1) as i32,
        };

        let x_lo = x[lo_base + k];
        let x_hi = x[hi_base + k];

        let new_lo = q30_add(q30_mul(x_lo, a), q30_mul(b, x_hi.conj()));
        let new_hi = q30_add(q30_mul(x_hi, a.conj()), q30_mul(b, x_lo).conj());

        x[lo_base + k] = new_lo;
        x[hi_base + k] = new_hi;
    }

    let x0 = if inverse {
        ComplexS32 {
            re: sat_round_shr_s32(x0.re as i64, 1),
            im: sat_round_shr_s32(x0.im as i64, 1),
        }
    } else {
        x0
    };

    x[0] = ComplexS32::new(
        sat_round_shr_s32(x0.re as i64 + x0.im as i64, 0),
        sat_round_shr_s32(x0.re as i64 - x0.im as i64, 0),
    );
    x[quarter] = ComplexS32::new(xq.re, -xq.im);

    complex_s32::tail_reverse(&mut x[quarter..]);
}

/// Splits the half-length complex spectrum `X` (length `n`, the FFT of
/// two real signals interleaved re/im) into two packed real-signal
/// spectra occupying `X[0..n/2]` and `X[n/2..n]` (spec §4.5.3). Returns
/// the headroom of the resulting `2*n`-element buffer viewed as `i32`s.
pub fn spectra_split(x: &mut [ComplexS32], n: usize) -> Headroom {
    let k = n / 2;

    for f in 1..n / 4 {
        x.swap(k + f, n - f);
    }

    let x0 = x[0];
    let xn = x[k];
    x[0] = ComplexS32::new(x0.re - xn.im, x0.im + xn.re);
    x[k] = ComplexS32::new(x0.re + xn.im, x0.im - xn.re);

    for f in 0..k {
        let xp = ComplexS32::new(
            sat_round_shr_s32(x[f].re as i64, 1),
            sat_round_shr_s32(x[f].im as i64, 1),
        );
        let xn = ComplexS32::new(
            sat_round_shr_s32(x[k + f].re as i64, 1),
            sat_round_shr_s32(x[k + f].im as i64, 1),
        );
        x[f] = ComplexS32::new(xp.re + xn.re, xp.im - xn.im);
        x[k + f] = ComplexS32::new(xp.im + xn.im, -xp.re + xn.re);
    }

    headroom_as_i32(x)
}

/// Inverse of [`spectra_split`]: re-jumbles the two packed spectra back
/// into the single half-length complex spectrum a real stereo IFFT needs.
pub fn spectra_merge(x: &mut [ComplexS32], n: usize) -> Headroom {
    let k = n / 2;

    {
        let dc = ComplexS32::new(
            sat_round_shr_s32(x[0].re as i64, 1),
            sat_round_shr_s32(x[0].im as i64, 1),
        );
        let ny = ComplexS32::new(
            sat_round_shr_s32(x[k].re as i64, 1),
            sat_round_shr_s32(x[k].im as i64, 1),
        );
        x[0] = ComplexS32::new(dc.re + dc.im, ny.re - ny.im);
        x[k] = ComplexS32::new(ny.re + ny.im, -dc.re + dc.im);
    }

    for f in 0..k {
        let a = x[f];
        let b = x[k + f];
        x[f] = ComplexS32::new(a.re - b.im, a.im + b.re);
        x[k + f] = ComplexS32::new(b.im + a.re, b.re - a.im);
    }

    for f in 1..n / 4 {
        x.swap(k + f, n - f);
    }

    headroom_as_i32(x)
}

fn headroom_as_i32(x: &[ComplexS32]) -> Headroom {
    let mut flat = Vec::with_capacity(x.len() * 2);
    for c in x {
        flat.push(c.re);
        flat.push(c.im);
    }
    crate::vect::s32::headroom(&flat)
}

/// Interleaves two real signals `a`/`b` into one complex buffer
/// (`re = shr(a)`, `im = shr(b)`), the stereo FFT's first step.
pub fn zip(out: &mut [ComplexS32], a: &[i32], b: &[i32], a_shr: i32, b_shr: i32) {
    debug_assert_eq!(out.len(), a.len());
    debug_assert_eq!(out.len(), b.len());
    for (o, (&av, &bv)) in out.iter_mut().zip(a.iter().zip(b)) {
        o.re = sat_round_shr_s32(av as i64, a_shr);
        o.im = sat_round_shr_s32(bv as i64, b_shr);
    }
}

/// Inverse of [`zip`]: splits a complex buffer back into two real ones.
pub fn unzip(a: &mut [i32], b: &mut [i32], x: &[ComplexS32]) {
    debug_assert_eq!(a.len(), x.len());
    debug_assert_eq!(b.len(), x.len());
    for (i, c) in x.iter().enumerate() {
        a[i] = c.re;
        b[i] = c.im;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_reversal_is_involution() {
        let mut x: Vec<ComplexS32> = (0..8).map(|i| ComplexS32::new(i, 0)).collect();
        let original = x.clone();
        bit_reversal(&mut x);
        bit_reversal(&mut x);
        assert_eq!(x, original);
    }

    #[test]
    fn zip_then_unzip_round_trips() {
        let a = [1, 2, 3, 4];
        let b = [10, 20, 30, 40];
        let mut x = [ComplexS32::default(); 4];
        zip(&mut x, &a, &b, 0, 0);
        let mut a2 = [0; 4];
        let mut b2 = [0; 4];
        unzip(&mut a2, &mut b2, &x);
        assert_eq!(a, a2);
        assert_eq!(b, b2);
    }
}
