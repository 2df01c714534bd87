//! Complex 32-bit element-wise kernels. Per
//! `original_source/.../vect/vect_complex_s32.c`, most of these reduce to
//! the real `vect::s32` kernels by viewing the packed `ComplexS32` array as
//! a doubled-length `i32` array (`2*length` real elements); multiply and
//! conjugate-multiply are the exceptions, done directly on complex pairs.

use crate::scalar::{round_shr_i64, sat_round_shr_s32, ComplexS32, Headroom};

fn as_real(a: &[ComplexS32]) -> Vec<i32> {
    let mut out = Vec::with_capacity(a.len() * 2);
    for c in a {
        out.push(c.re);
        out.push(c.im);
    }
    out
}

fn from_real(a: &mut [ComplexS32], flat: &[i32]) {
    for (c, pair) in a.iter_mut().zip(flat.chunks_exact(2)) {
        c.re = pair[0];
        c.im = pair[1];
    }
}

pub fn headroom(a: &[ComplexS32]) -> Headroom {
    crate::vect::s32::headroom(&as_real(a))
}

pub fn add(
    a: &mut [ComplexS32],
    b: &[ComplexS32],
    c: &[ComplexS32],
    b_shr: i32,
    c_shr: i32,
) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), c.len());
    let mut flat = vec![0i32; a.len() * 2];
    let hr = crate::vect::s32::add(&mut flat, &as_real(b), &as_real(c), b_shr, c_shr);
    from_real(a, &flat);
    hr
}

pub fn sub(
    a: &mut [ComplexS32],
    b: &[ComplexS32],
    c: &[ComplexS32],
    b_shr: i32,
    c_shr: i32,
) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), c.len());
    let mut flat = vec![0i32; a.len() * 2];
    let hr = crate::vect::s32::sub(&mut flat, &as_real(b), &as_real(c), b_shr, c_shr);
    from_real(a, &flat);
    hr
}

/// `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`, with the extra bit spec §4.2 calls
/// out for the sum/difference of two products.
pub fn mul(
    a: &mut [ComplexS32],
    b: &[ComplexS32],
    c: &[ComplexS32],
    b_shr: i32,
    c_shr: i32,
) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), c.len());
    for ((a, b), c) in a.iter_mut().zip(b).zip(c) {
        let br = round_shr_i64(b.re as i64, b_shr);
        let bi = round_shr_i64(b.im as i64, b_shr);
        let cr = round_shr_i64(c.re as i64, c_shr);
        let ci = round_shr_i64(c.im as i64, c_shr);
        a.re = sat_round_shr_s32(br * cr - bi * ci, 30);
        a.im = sat_round_shr_s32(br * ci + bi * cr, 30);
    }
    headroom(a)
}

/// `b * conj(c)`.
pub fn conj_mul(
    a: &mut [ComplexS32],
    b: &[ComplexS32],
    c: &[ComplexS32],
    b_shr: i32,
    c_shr: i32,
) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), c.len());
    for ((a, b), c) in a.iter_mut().zip(b).zip(c) {
        let br = round_shr_i64(b.re as i64, b_shr);
        let bi = round_shr_i64(b.im as i64, b_shr);
        let cr = round_shr_i64(c.re as i64, c_shr);
        let ci = round_shr_i64(c.im as i64, c_shr);
        a.re = sat_round_shr_s32(br * cr + bi * ci, 30);
        a.im = sat_round_shr_s32(bi * cr - br * ci, 30);
    }
    headroom(a)
}

/// Complex multiply-accumulate: `acc += b * c`, shifts from
/// `prepare::complex_macc_prepare`.
pub fn macc(
    acc: &mut [ComplexS32],
    b: &[ComplexS32],
    c: &[ComplexS32],
    b_shr: i32,
    c_shr: i32,
    acc_shr: i32,
) -> Headroom {
    debug_assert_eq!(acc.len(), b.len());
    debug_assert_eq!(acc.len(), c.len());
    for ((acc, b), c) in acc.iter_mut().zip(b).zip(c) {
        let br = round_shr_i64(b.re as i64, b_shr);
        let bi = round_shr_i64(b.im as i64, b_shr);
        let cr = round_shr_i64(c.re as i64, c_shr);
        let ci = round_shr_i64(c.im as i64, c_shr);
        let prod_re = round_shr_i64(br * cr - bi * ci, 30);
        let prod_im = round_shr_i64(br * ci + bi * cr, 30);
        let prev_re = round_shr_i64(acc.re as i64, acc_shr);
        let prev_im = round_shr_i64(acc.im as i64, acc_shr);
        acc.re = sat_round_shr_s32(prev_re + prod_re, 0);
        acc.im = sat_round_shr_s32(prev_im + prod_im, 0);
    }
    headroom(acc)
}

/// `acc -= b * c`.
pub fn nmacc(
    acc: &mut [ComplexS32],
    b: &[ComplexS32],
    c: &[ComplexS32],
    b_shr: i32,
    c_shr: i32,
    acc_shr: i32,
) -> Headroom {
    debug_assert_eq!(acc.len(), b.len());
    debug_assert_eq!(acc.len(), c.len());
    for ((acc, b), c) in acc.iter_mut().zip(b).zip(c) {
        let br = round_shr_i64(b.re as i64, b_shr);
        let bi = round_shr_i64(b.im as i64, b_shr);
        let cr = round_shr_i64(c.re as i64, c_shr);
        let ci = round_shr_i64(c.im as i64, c_shr);
        let prod_re = round_shr_i64(br * cr - bi * ci, 30);
        let prod_im = round_shr_i64(br * ci + bi * cr, 30);
        let prev_re = round_shr_i64(acc.re as i64, acc_shr);
        let prev_im = round_shr_i64(acc.im as i64, acc_shr);
        acc.re = sat_round_shr_s32(prev_re - prod_re, 0);
        acc.im = sat_round_shr_s32(prev_im - prod_im, 0);
    }
    headroom(acc)
}

/// `acc += b * conj(c)`.
pub fn conj_macc(
    acc: &mut [ComplexS32],
    b: &[ComplexS32],
    c: &[ComplexS32],
    b_shr: i32,
    c_shr: i32,
    acc_shr: i32,
) -> Headroom {
    let conj: Vec<ComplexS32> = c.iter().map(|c| c.conj()).collect();
    macc(acc, b, &conj, b_shr, c_shr, acc_shr)
}

/// `acc -= b * conj(c)`.
pub fn conj_nmacc(
    acc: &mut [ComplexS32],
    b: &[ComplexS32],
    c: &[ComplexS32],
    b_shr: i32,
    c_shr: i32,
    acc_shr: i32,
) -> Headroom {
    let conj: Vec<ComplexS32> = c.iter().map(|c| c.conj()).collect();
    nmacc(acc, b, &conj, b_shr, c_shr, acc_shr)
}

/// Element-wise complex-times-real: `a[k] = b[k] * c[k]` where `c` is a
/// real vector of the same length, unlike [`real_scale`]'s single shared
/// scalar.
pub fn real_mul(a: &mut [ComplexS32], b: &[ComplexS32], c: &[i32], b_shr: i32, c_shr: i32) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), c.len());
    for ((a, b), &c) in a.iter_mut().zip(b).zip(c) {
        let br = round_shr_i64(b.re as i64, b_shr);
        let bi = round_shr_i64(b.im as i64, b_shr);
        let cc = round_shr_i64(c as i64, c_shr);
        a.re = sat_round_shr_s32(br * cc, 30);
        a.im = sat_round_shr_s32(bi * cc, 30);
    }
    headroom(a)
}

pub fn real_scale(
    a: &mut [ComplexS32],
    b: &[ComplexS32],
    c: i32,
    b_shr: i32,
    c_shr: i32,
) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    let mut flat = vec![0i32; a.len() * 2];
    let hr = crate::vect::s32::scale(&mut flat, &as_real(b), c, b_shr, c_shr);
    from_real(a, &flat);
    hr
}

/// Complex-scalar multiply: every element of `b` times the single complex
/// scalar `alpha`, shifts from `prepare::complex_mul_prepare` (spec §6.1
/// complex `scale`, distinct from [`real_scale`]'s real-scalar multiply).
pub fn scale(
    a: &mut [ComplexS32],
    b: &[ComplexS32],
    alpha: ComplexS32,
    b_shr: i32,
    alpha_shr: i32,
) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    let ar = round_shr_i64(alpha.re as i64, alpha_shr);
    let ai = round_shr_i64(alpha.im as i64, alpha_shr);
    for (a, b) in a.iter_mut().zip(b) {
        let br = round_shr_i64(b.re as i64, b_shr);
        let bi = round_shr_i64(b.im as i64, b_shr);
        a.re = sat_round_shr_s32(br * ar - bi * ai, 30);
        a.im = sat_round_shr_s32(br * ai + bi * ar, 30);
    }
    headroom(a)
}

/// Complex dot product: raw (unsaturated) sum of `b[i] * c[i]`, mirroring
/// `s32::dot`'s widened-but-unclamped accumulator convention.
pub fn dot(b: &[ComplexS32], c: &[ComplexS32]) -> (i64, i64) {
    debug_assert_eq!(b.len(), c.len());
    let mut re = 0i64;
    let mut im = 0i64;
    for (b, c) in b.iter().zip(c) {
        let br = b.re as i64;
        let bi = b.im as i64;
        let cr = c.re as i64;
        let ci = c.im as i64;
        re += br * cr - bi * ci;
        im += br * ci + bi * cr;
    }
    (re, im)
}

pub fn shl(a: &mut [ComplexS32], b: &[ComplexS32], shl: i32) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    let mut flat = vec![0i32; a.len() * 2];
    let hr = crate::vect::s32::shl(&mut flat, &as_real(b), shl);
    from_real(a, &flat);
    hr
}

pub fn shr(a: &mut [ComplexS32], b: &[ComplexS32], shr: i32) -> Headroom {
    shl(a, b, -shr)
}

pub fn sum(b: &[ComplexS32]) -> ComplexS32 {
    let re: i64 = b.iter().map(|c| c.re as i64).sum();
    let im: i64 = b.iter().map(|c| c.im as i64).sum();
    ComplexS32 {
        re: sat_round_shr_s32(re, 0),
        im: sat_round_shr_s32(im, 0),
    }
}

pub fn conjugate(a: &mut [ComplexS32], b: &[ComplexS32]) {
    debug_assert_eq!(a.len(), b.len());
    for (a, &b) in a.iter_mut().zip(b) {
        *a = b.conj();
    }
}

pub fn squared_mag(a: &mut [i32], b: &[ComplexS32], b_shr: i32) -> Headroom {
    debug_assert_eq!(a.len(), b.len());
    for (a, b) in a.iter_mut().zip(b) {
        let br = round_shr_i64(b.re as i64, b_shr);
        let bi = round_shr_i64(b.im as i64, b_shr);
        *a = sat_round_shr_s32(br * br + bi * bi, 30);
    }
    crate::vect::s32::headroom(a)
}

/// Swaps `x[i]` with `x[N-i]` for `i` in `1..N/2`, used by `fft::util`'s
/// mono-adjust to fold the second half of a half-length spectrum.
pub fn tail_reverse(x: &mut [ComplexS32]) {
    let n = x.len();
    let mut i = 1;
    while i < n / 2 {
        let k = n - i;
        x.swap(i, k);
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conj_mul_matches_manual_conjugate_then_mul() {
        let b = [ComplexS32::new(3, 4)];
        let c = [ComplexS32::new(1, 2)];
        let mut a = [ComplexS32::default()];
        conj_mul(&mut a, &b, &c, 0, 0);

        let c_conj = [c[0].conj()];
        let mut expected = [ComplexS32::default()];
        mul(&mut expected, &b, &c_conj, 0, 0);
        assert_eq!(a[0], expected[0]);
    }

    #[test]
    fn tail_reverse_is_involution() {
        let mut x = [
            ComplexS32::new(0, 0),
            ComplexS32::new(1, 0),
            ComplexS32::new(2, 0),
            ComplexS32::new(3, 0),
        ];
        let original = x;
        tail_reverse(&mut x);
        tail_reverse(&mut x);
        assert_eq!(x, original);
    }
}
