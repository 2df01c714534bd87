//! Radix-4 decimation-in-time complex FFT, forward and inverse. Ported
//! from `original_source/.../arch/ref/fft/fft_dit.c`: the first pass runs
//! independent 4-point butterflies over the whole vector, then each
//! subsequent pass combines pairs of same-size blocks with a twiddle
//! multiply, doubling the block size each time. A *shift mode* in
//! `{-1, 0, 1}` is chosen every pass from the vector's current headroom so
//! intermediate values never saturate; the cumulative shift is folded into
//! the returned exponent instead of being applied as a scale.

use crate::scalar::{ceil_log2, sat_round_shr_s32, ComplexS32, Exp, Headroom};
use crate::vect::complex_s32;

use super::twiddle::DIT_TWIDDLES;

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

/// First-pass 4-point butterfly, forward transform.
fn vfttf(v: &mut [ComplexS32; 4], shift_mode: i32) {
    let s0 = (v[0].re as i64 + v[1].re as i64, v[0].im as i64 + v[1].im as i64);
    let s1 = (v[0].re as i64 - v[1].re as i64, v[0].im as i64 - v[1].im as i64);
    let s2 = (v[2].re as i64 + v[3].re as i64, v[2].im as i64 + v[3].im as i64);
    let s3 = (v[2].im as i64 - v[3].im as i64, v[3].re as i64 - v[2].re as i64);

    v[0].re = ashr(s0.0 + s2.0, shift_mode);
    v[0].im = ashr(s0.1 + s2.1, shift_mode);
    v[1].re = ashr(s1.0 + s3.0, shift_mode);
    v[1].im = ashr(s1.1 + s3.1, shift_mode);
    v[2].re = ashr(s0.0 - s2.0, shift_mode);
    v[2].im = ashr(s0.1 - s2.1, shift_mode);
    v[3].re = ashr(s1.0 - s3.0, shift_mode);
    v[3].im = ashr(s1.1 - s3.1, shift_mode);
}

/// First-pass 4-point butterfly, inverse transform (`s3`'s rotation sign
/// flips relative to [`vfttf`]).
fn vfttb(v: &mut [ComplexS32; 4], shift_mode: i32) {
    let s0 = (v[0].re as i64 + v[1].re as i64, v[0].im as i64 + v[1].im as i64);
    let s1 = (v[0].re as i64 - v[1].re as i64, v[0].im as i64 - v[1].im as i64);
    let s2 = (v[2].re as i64 + v[3].re as i64, v[2].im as i64 + v[3].im as i64);
    let s3 = (v[3].im as i64 - v[2].im as i64, v[2].re as i64 - v[3].re as i64);

    v[0].re = ashr(s0.0 + s2.0, shift_mode);
    v[0].im = ashr(s0.1 + s2.1, shift_mode);
    v[1].re = ashr(s1.0 + s3.0, shift_mode);
    v[1].im = ashr(s1.1 + s3.1, shift_mode);
    v[2].re = ashr(s0.0 - s2.0, shift_mode);
    v[2].im = ashr(s0.1 - s2.1, shift_mode);
    v[3].re = ashr(s1.0 - s3.0, shift_mode);
    v[3].im = ashr(s1.1 - s3.1, shift_mode);
}

/// Shared stage loop for passes beyond the first, parameterized by
/// whether twiddle multiplication conjugates (inverse transform). `k`
/// descends from `b-4` to `0` in steps of 4 while the twiddle pointer
/// walks forward through `w`, matching the original's pointer increment
/// running opposite the butterfly-offset counter.
fn combine_stage(x: &mut [ComplexS32], b: usize, a: usize, w: &[ComplexS32], conj: bool, shift_mode: i32) {
    let mut w_idx = 0usize;
    let mut k = b as isize - 4;
    while k >= 0 {
        let k = k as usize;
        let vc: [ComplexS32; 4] = [w[w_idx], w[w_idx + 1], w[w_idx + 2], w[w_idx + 3]];
        w_idx += 4;

        let mut s = k;
        for _ in 0..a {
            let mut vd: [ComplexS32; 4] = [x[s + b], x[s + b + 1], x[s + b + 2], x[s + b + 3]];
            let mut vr = [ComplexS32::default(); 4];
            if conj {
                complex_s32::conj_mul(&mut vr, &vd, &vc, 0, 0);
            } else {
                complex_s32::mul(&mut vr, &vd, &vc, 0, 0);
            }
            for i in 0..4 {
                let xr = x[s + i].re as i64;
                let xi = x[s + i].im as i64;
                vd[i].re = ashr(xr - vr[i].re as i64, shift_mode);
                vd[i].im = ashr(xi - vr[i].im as i64, shift_mode);
                vr[i].re = ashr(xr + vr[i].re as i64, shift_mode);
                vr[i].im = ashr(xi + vr[i].im as i64, shift_mode);
            }
            x[s..s + 4].copy_from_slice(&vr);
            x[s + b..s + b + 4].copy_from_slice(&vd);
            s += 2 * b;
        }
        k -= 4;
    }
}

/// Forward complex DIT FFT in place. `x.len()` must be a power of two
/// `>= 4`. Returns the updated `(headroom, exponent)`.
pub fn forward(x: &mut [ComplexS32], hr: Headroom, exp: Exp) -> (Headroom, Exp) {
    dit_transform(x, hr, exp, false)
}

/// Inverse complex DIT FFT in place, with the `1/N` scaling folded into
/// the returned exponent rather than applied as a multiply.
pub fn inverse(x: &mut [ComplexS32], hr: Headroom, exp: Exp) -> (Headroom, Exp) {
    dit_transform(x, hr, exp, true)
}

fn dit_transform(x: &mut [ComplexS32], mut hr: Headroom, exp: Exp, inverse: bool) -> (Headroom, Exp) {
    let n = x.len();
    debug_assert!(n.is_power_of_two() && n >= 4);
    let fft_n_log2 = ceil_log2(n as u32) as i32;

    let mut exp_modifier: Exp = 0;
    let mut shift_mode = shift_mode_for(hr);
    exp_modifier += shift_mode;
    if inverse {
        exp_modifier += -2;
    }

    for j in 0..(n / 4) {
        let mut v: [ComplexS32; 4] = [x[4 * j], x[4 * j + 1], x[4 * j + 2], x[4 * j + 3]];
        if inverse {
            vfttb(&mut v, shift_mode);
        } else {
            vfttf(&mut v, shift_mode);
        }
        x[4 * j..4 * j + 4].copy_from_slice(&v);
    }

    if n != 4 {
        let mut w_offset = 0usize;
        for n_stage in 0..(fft_n_log2 - 2) {
            let b = 1usize << (n_stage + 2);
            let a = 1usize << ((fft_n_log2 - 3) - n_stage);

            hr = complex_s32::headroom(x);
            shift_mode = shift_mode_for(hr);
            exp_modifier += shift_mode;
            if inverse {
                exp_modifier += -1;
            }

            let w = &DIT_TWIDDLES[w_offset..w_offset + b];
            combine_stage(x, b, a, w, inverse, shift_mode);
            w_offset += b;
        }
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
        let (_, _) = forward(&mut x, 3, 0);
        for c in x.iter() {
            assert_eq!(c.re, x[0].re);
            assert_eq!(c.im, 0);
        }
    }

    #[test]
    fn forward_then_inverse_round_trips_up_to_shift() {
        let mut x = [
            ComplexS32::new(1 << 24, 0),
            ComplexS32::new(2 << 24, 1 << 23),
            ComplexS32::new(-1 << 24, 0),
            ComplexS32::new(0, -(1 << 23)),
            ComplexS32::new(1 << 22, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
        ];
        let original = x;
        let (hr1, exp1) = forward(&mut x, 3, 0);
        let (_, exp2) = inverse(&mut x, hr1, exp1);
        let total_shift = exp2;
        for (a, b) in x.iter().zip(original.iter()) {
            let ar = (a.re as f64) * 2f64.powi(total_shift);
            let br = b.re as f64;
            assert!((ar - br).abs() <= br.abs() * 0.05 + 4.0);
        }
    }
}
