//! Complex 16-bit element-wise kernels over separate, word-aligned real/
//! imaginary buffers. Grounded in
//! `original_source/.../vect/vect_complex_s16.c`: every operation here
//! reduces to a pair of `vect::s16` calls on the real and imaginary
//! buffers independently, taking the `MIN` of the two returned headrooms.

use crate::scalar::{round_shr_i64, sat_round_shr_s16, Headroom};

pub fn headroom(real: &[i16], imag: &[i16]) -> Headroom {
    crate::vect::s16::headroom(real).min(crate::vect::s16::headroom(imag))
}

pub fn add(
    a_re: &mut [i16],
    a_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c_re: &[i16],
    c_im: &[i16],
    b_shr: i32,
    c_shr: i32,
) -> Headroom {
    let re_hr = crate::vect::s16::add(a_re, b_re, c_re, b_shr, c_shr);
    let im_hr = crate::vect::s16::add(a_im, b_im, c_im, b_shr, c_shr);
    re_hr.min(im_hr)
}

pub fn sub(
    a_re: &mut [i16],
    a_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c_re: &[i16],
    c_im: &[i16],
    b_shr: i32,
    c_shr: i32,
) -> Headroom {
    let re_hr = crate::vect::s16::sub(a_re, b_re, c_re, b_shr, c_shr);
    let im_hr = crate::vect::s16::sub(a_im, b_im, c_im, b_shr, c_shr);
    re_hr.min(im_hr)
}

pub fn real_scale(
    a_re: &mut [i16],
    a_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c: i16,
    shr: i32,
) -> Headroom {
    let re_hr = crate::vect::s16::scale(a_re, b_re, c, shr);
    let im_hr = crate::vect::s16::scale(a_im, b_im, c, shr);
    re_hr.min(im_hr)
}

/// Complex-scalar multiply: every element of `b` times the single complex
/// scalar `(alpha_re, alpha_im)`, output right-shifted by `a_shr` per the
/// 16-bit multiply convention (spec §6.1 complex `scale`, distinct from
/// [`real_scale`]'s real-scalar multiply).
#[allow(clippy::too_many_arguments)]
pub fn scale(
    a_re: &mut [i16],
    a_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    alpha_re: i16,
    alpha_im: i16,
    a_shr: i32,
) -> Headroom {
    for (((ar, ai), &br), &bi) in a_re.iter_mut().zip(a_im.iter_mut()).zip(b_re).zip(b_im) {
        let prod_re = (br as i64) * (alpha_re as i64) - (bi as i64) * (alpha_im as i64);
        let prod_im = (br as i64) * (alpha_im as i64) + (bi as i64) * (alpha_re as i64);
        *ar = sat_round_shr_s16(prod_re, a_shr);
        *ai = sat_round_shr_s16(prod_im, a_shr);
    }
    headroom(a_re, a_im)
}

/// Complex dot product: raw (unsaturated) sum of `b[i] * c[i]`.
pub fn dot(b_re: &[i16], b_im: &[i16], c_re: &[i16], c_im: &[i16]) -> (i64, i64) {
    let mut re = 0i64;
    let mut im = 0i64;
    for (((&br, &bi), &cr), &ci) in b_re.iter().zip(b_im).zip(c_re).zip(c_im) {
        re += (br as i64) * (cr as i64) - (bi as i64) * (ci as i64);
        im += (br as i64) * (ci as i64) + (bi as i64) * (cr as i64);
    }
    (re, im)
}

/// `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`, computed directly on the paired
/// buffers since (unlike add/sub) multiply doesn't decompose into
/// independent real/imag `vect::s16` calls.
#[allow(clippy::too_many_arguments)]
pub fn mul(
    a_re: &mut [i16],
    a_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c_re: &[i16],
    c_im: &[i16],
    a_shr: i32,
) -> Headroom {
    for (((((ar, ai), &br), &bi), &cr), &ci) in a_re
        .iter_mut()
        .zip(a_im.iter_mut())
        .zip(b_re)
        .zip(b_im)
        .zip(c_re)
        .zip(c_im)
    {
        let prod_re = (br as i64) * (cr as i64) - (bi as i64) * (ci as i64);
        let prod_im = (br as i64) * (ci as i64) + (bi as i64) * (cr as i64);
        *ar = sat_round_shr_s16(prod_re, a_shr);
        *ai = sat_round_shr_s16(prod_im, a_shr);
    }
    headroom(a_re, a_im)
}

/// `b * conj(c)`.
#[allow(clippy::too_many_arguments)]
pub fn conj_mul(
    a_re: &mut [i16],
    a_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c_re: &[i16],
    c_im: &[i16],
    a_shr: i32,
) -> Headroom {
    let c_im_neg: Vec<i16> = c_im.iter().map(|&x| x.saturating_neg()).collect();
    mul(a_re, a_im, b_re, b_im, c_re, &c_im_neg, a_shr)
}

/// Complex multiply-accumulate: `acc += b * c`.
#[allow(clippy::too_many_arguments)]
pub fn macc(
    acc_re: &mut [i16],
    acc_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c_re: &[i16],
    c_im: &[i16],
    b_shr: i32,
    acc_shr: i32,
) -> Headroom {
    for (((((acc_re, acc_im), &br), &bi), &cr), &ci) in acc_re
        .iter_mut()
        .zip(acc_im.iter_mut())
        .zip(b_re)
        .zip(b_im)
        .zip(c_re)
        .zip(c_im)
    {
        let prod_re = round_shr_i64((br as i64) * (cr as i64) - (bi as i64) * (ci as i64), b_shr);
        let prod_im = round_shr_i64((br as i64) * (ci as i64) + (bi as i64) * (cr as i64), b_shr);
        let prev_re = round_shr_i64(*acc_re as i64, acc_shr);
        let prev_im = round_shr_i64(*acc_im as i64, acc_shr);
        *acc_re = sat_round_shr_s16(prev_re + prod_re, 0);
        *acc_im = sat_round_shr_s16(prev_im + prod_im, 0);
    }
    headroom(acc_re, acc_im)
}

/// `acc -= b * c`.
#[allow(clippy::too_many_arguments)]
pub fn nmacc(
    acc_re: &mut [i16],
    acc_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c_re: &[i16],
    c_im: &[i16],
    b_shr: i32,
    acc_shr: i32,
) -> Headroom {
    for (((((acc_re, acc_im), &br), &bi), &cr), &ci) in acc_re
        .iter_mut()
        .zip(acc_im.iter_mut())
        .zip(b_re)
        .zip(b_im)
        .zip(c_re)
        .zip(c_im)
    {
        let prod_re = round_shr_i64((br as i64) * (cr as i64) - (bi as i64) * (ci as i64), b_shr);
        let prod_im = round_shr_i64((br as i64) * (ci as i64) + (bi as i64) * (cr as i64), b_shr);
        let prev_re = round_shr_i64(*acc_re as i64, acc_shr);
        let prev_im = round_shr_i64(*acc_im as i64, acc_shr);
        *acc_re = sat_round_shr_s16(prev_re - prod_re, 0);
        *acc_im = sat_round_shr_s16(prev_im - prod_im, 0);
    }
    headroom(acc_re, acc_im)
}

/// `acc += b * conj(c)`.
#[allow(clippy::too_many_arguments)]
pub fn conj_macc(
    acc_re: &mut [i16],
    acc_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c_re: &[i16],
    c_im: &[i16],
    b_shr: i32,
    acc_shr: i32,
) -> Headroom {
    let c_im_neg: Vec<i16> = c_im.iter().map(|&x| x.saturating_neg()).collect();
    macc(acc_re, acc_im, b_re, b_im, c_re, &c_im_neg, b_shr, acc_shr)
}

/// `acc -= b * conj(c)`.
#[allow(clippy::too_many_arguments)]
pub fn conj_nmacc(
    acc_re: &mut [i16],
    acc_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c_re: &[i16],
    c_im: &[i16],
    b_shr: i32,
    acc_shr: i32,
) -> Headroom {
    let c_im_neg: Vec<i16> = c_im.iter().map(|&x| x.saturating_neg()).collect();
    nmacc(acc_re, acc_im, b_re, b_im, c_re, &c_im_neg, b_shr, acc_shr)
}

pub fn squared_mag(out: &mut [i32], b_re: &[i16], b_im: &[i16]) -> crate::scalar::Headroom {
    for ((o, &br), &bi) in out.iter_mut().zip(b_re).zip(b_im) {
        *o = (br as i32) * (br as i32) + (bi as i32) * (bi as i32);
    }
    crate::vect::s32::headroom(out)
}

pub fn conjugate(a_im: &mut [i16], b_im: &[i16]) {
    for (a, &b) in a_im.iter_mut().zip(b_im) {
        *a = b.saturating_neg();
    }
}

pub fn shr(
    a_re: &mut [i16],
    a_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    shr: i32,
) -> Headroom {
    let re_hr = crate::vect::s16::shr(a_re, b_re, shr);
    let im_hr = crate::vect::s16::shr(a_im, b_im, shr);
    re_hr.min(im_hr)
}

pub fn shl(
    a_re: &mut [i16],
    a_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    shl: i32,
) -> Headroom {
    shr(a_re, a_im, b_re, b_im, -shl)
}

pub fn set(real: &mut [i16], imag: &mut [i16], re_value: i16, im_value: i16) {
    crate::vect::s16::set(real, re_value);
    crate::vect::s16::set(imag, im_value);
}

pub fn sum(b_re: &[i16], b_im: &[i16]) -> (i64, i64) {
    (crate::vect::s16::sum(b_re), crate::vect::s16::sum(b_im))
}

pub fn add_scalar(
    a_re: &mut [i16],
    a_im: &mut [i16],
    b_re: &[i16],
    b_im: &[i16],
    c_re: i16,
    c_im: i16,
    b_shr: i32,
) -> Headroom {
    let re_hr = crate::vect::s16::add_scalar(a_re, b_re, c_re, b_shr);
    let im_hr = crate::vect::s16::add_scalar(a_im, b_im, c_im, b_shr);
    re_hr.min(im_hr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_takes_min_of_both_headrooms() {
        let b_re = [100i16, 200];
        let b_im = [1i16, 1];
        let c_re = [0i16, 0];
        let c_im = [0i16, 0];
        let mut a_re = [0i16; 2];
        let mut a_im = [0i16; 2];
        let hr = add(&mut a_re, &mut a_im, &b_re, &b_im, &c_re, &c_im, 0, 0);
        assert_eq!(hr, crate::vect::s16::headroom(&a_re).min(crate::vect::s16::headroom(&a_im)));
    }
}
