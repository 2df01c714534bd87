//! Radix-4 decimation-in-frequency complex FFT, forward and inverse.
//! Ported from `original_source/.../arch/ref/fft/fft_dif.c`: stage order is
//! the mirror image of [`super::dit`] — big-block combines happen first,
//! the independent 4-point butterflies last — and the twiddle table is
//! read starting at an offset that shrinks as the transform length grows
//! (`XMATH_DIF_FFT_LUT`), rather than always from index 0.

use crate::scalar::{ceil_log2, sat_round_shr_s32, ComplexS32, Exp, Headroom};
use crate::vect::complex_s32;

use super::twiddle::{dif_offset, DIF_TWIDDLES};

fn shift_mode_for(hr: Headroom) -> i32 {
    match hr.cmp(&3) {
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Less => 1,
        std::cmp::Ordering::Greater => -1,
    }
}

fn ashr(x: i64, shift_mode: i32) -> i32 {
    sat_round_shr_s32(x, shift_mode)
}

/// Final-pass 4-point butterfly, forward transform.
fn vftff(v: &mut [ComplexS32; 4], shift_mode: i32) {
    let s0 = (v[0].re as i64 + v[2].re as i64, v[0].im as i64 + v[2].im as i64);
    let s1 = (v[1].re as i64 + v[3].re as i64, v[1].im as i64 + v[3].im as i64);
    let s2 = (v[0].re as i64 - v[2].re as i64, v[0].im as i64 - v[2].im as i64);
    let s3 = (v[1].im as i64 - v[3].im as i64, v[3].re as i64 - v[1].re as i64);

    v[0].re = ashr(s0.0 + s1.0, shift_mode);
    v[0].im = ashr(s0.1 + s1.1, shift_mode);
    v[1].re = ashr(s0.0 - s1.0, shift_mode);
    v[1].im = ashr(s0.1 - s1.1, shift_mode);
    v[2].re = ashr(s2.0 + s3.0, shift_mode);
    v[2].im = ashr(s2.1 + s3.1, shift_mode);
    v[3].re = ashr(s2.0 - s3.0, shift_mode);
    v[3].im = ashr(s2.1 - s3.1, shift_mode);
}

/// Final-pass 4-point butterfly, inverse transform.
fn vftfb(v: &mut [ComplexS32; 4], shift_mode: i32) {
    let s0 = (v[0].re as i64 + v[2].re as i64, v[0].im as i64 + v[2].im as i64);
    let s1 = (v[1].re as i64 + v[3].re as i64, v[1].im as i64 + v[3].im as i64);
    let s2 = (v[0].re as i64 - v[2].re as i64, v[0].im as i64 - v[2].im as i64);
    let s3 = (v[3].im as i64 - v[1].im as i64, v[1].re as i64 - v[3].re as i64);

    v[0].re = ashr(s0.0 + s1.0, shift_mode);
    v[0].im = ashr(s0.1 + s1.1, shift_mode);
    v[1].re = ashr(s0.0 - s1.0, shift_mode);
    v[1].im = ashr(s0.1 - s1.1, shift_mode);
    v[2].re = ashr(s2.0 + s3.0, shift_mode);
    v[2].im = ashr(s2.1 + s3.1, shift_mode);
    v[3].re = ashr(s2.0 - s3.0, shift_mode);
    v[3].im = ashr(s2.1 - s3.1, shift_mode);
}

fn combine_stage(x: &mut [ComplexS32], b: usize, a: usize, w: &[ComplexS32], conj: bool, shift_mode: i32) {
    let mut w_idx = 0usize;
    let mut k = b as isize - 4;
    while k >= 0 {
        let kk = k as usize;
        let vc: [ComplexS32; 4] = [w[w_idx], w[w_idx + 1], w[w_idx + 2], w[w_idx + 3]];
        w_idx += 4;

        for j in 0..(a / 4) {
            let s = 2 * j * b + kk;
            let mut vr: [ComplexS32; 4] = [x[s], x[s + 1], x[s + 2], x[s + 3]];
            let mut vd = [ComplexS32::default(); 4];
            for i in 0..4 {
                let hi_r = x[s + b + i].re as i64;
                let hi_i = x[s + b + i].im as i64;
                let lo_r = vr[i].re as i64;
                let lo_i = vr[i].im as i64;
                vd[i].re = ashr(hi_r - lo_r, shift_mode);
                vd[i].im = ashr(hi_i - lo_i, shift_mode);
                vr[i].re = ashr(hi_r + lo_r, shift_mode);
                vr[i].im = ashr(hi_i + lo_i, shift_mode);
            }
            x[s..s + 4].copy_from_slice(&vr);

            let mut vr2 = [ComplexS32::default(); 4];
            if conj {
                complex_s32::conj_mul(&mut vr2, &vd, &vc, 0, 0);
            } else {
                complex_s32::mul(&mut vr2, &vd, &vc, 0, 0);
            }
            x[s + b..s + b + 4].copy_from_slice(&vr2);
        }
        k -= 4;
    }
}

/// Forward complex DIF FFT in place.
pub fn forward(x: &mut [ComplexS32], hr: Headroom, exp: Exp) -> (Headroom, Exp) {
    dif_transform(x, hr, exp, false)
}

/// Inverse complex DIF FFT in place.
pub fn inverse(x: &mut [ComplexS32], hr: Headroom, exp: Exp) -> (Headroom, Exp) {
    dif_transform(x, hr, exp, true)
}

fn dif_transform(x: &mut [ComplexS32], mut hr: Headroom, exp: Exp, inverse: bool) -> (Headroom, Exp) {
    let n = x.len();
    debug_assert!(n.is_power_of_two() && n >= 4);
    let fft_n_log2 = ceil_log2(n as u32) as i32;

    let mut exp_modifier: Exp = if inverse { -fft_n_log2 } else { 0 };
    let mut shift_mode = shift_mode_for(hr);
    exp_modifier += shift_mode;

    if n != 4 {
        let base = dif_offset(n);
        let mut w_offset = base;
        for n_stage in 0..(fft_n_log2 - 2) {
            let b = 1usize << (fft_n_log2 as usize - 1 - n_stage as usize);
            let a = 1usize << (2 + n_stage);

            let w_len = b;
            let w = &DIF_TWIDDLES[w_offset..w_offset + w_len];
            combine_stage(x, b, a, w, inverse, shift_mode);
            w_offset += w_len;

            hr = complex_s32::headroom(x);
            shift_mode = shift_mode_for(hr);
            exp_modifier += shift_mode;
        }
    }

    for j in 0..(n / 4) {
        let mut v: [ComplexS32; 4] = [x[4 * j], x[4 * j + 1], x[4 * j + 2], x[4 * j + 3]];
        if inverse {
            vftfb(&mut v, shift_mode);
        } else {
            vftff(&mut v, shift_mode);
        }
        x[4 * j..4 * j + 4].copy_from_slice(&v);
    }

    hr = complex_s32::headroom(x);
    (hr, exp + exp_modifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_point_impulse_is_flat_spectrum() {
        let mut x = [
            ComplexS32::new(1 << 28, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
        ];
        forward(&mut x, 3, 0);
        for c in x.iter() {
            assert_eq!(c.re, x[0].re);
            assert_eq!(c.im, 0);
        }
    }
}
