//! BFP complex-32 vector wrapper: packed `ComplexS32` mantissas sharing
//! one exponent/headroom. This is the flavor the FFT pipeline operates
//! on directly (spec §4.5).

use super::MantissaBuf;
use crate::error::{BfpError, BfpResult};
use crate::prepare;
use crate::scalar::{ComplexS32, Exp, Headroom};
use crate::vect::complex_s32;

pub struct BfpComplex32<'a> {
    pub data: MantissaBuf<'a, ComplexS32>,
    pub exp: Exp,
    pub hr: Headroom,
}

impl<'a> BfpComplex32<'a> {
    pub fn init(data: &'a mut [ComplexS32], exp: Exp, compute_hr: bool) -> Self {
        debug_assert!(!data.is_empty(), "BFP vectors must have nonzero length");
        let hr = if compute_hr {
            complex_s32::headroom(data)
        } else {
            0
        };
        Self {
            data: MantissaBuf::Borrowed(data),
            exp,
            hr,
        }
    }

    pub fn alloc(length: usize, exp: Exp) -> BfpResult<Self> {
        if length == 0 {
            return Err(BfpError::AllocFailed);
        }
        Ok(Self {
            data: MantissaBuf::Owned(vec![ComplexS32::default(); length]),
            exp,
            hr: 31,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn headroom(&mut self) -> Headroom {
        self.hr = complex_s32::headroom(&self.data);
        self.hr
    }

    /// Builds a complex vector from two real vectors sharing one exponent
    /// (spec §6.1 complex-only `make`). The caller supplies `exp` directly
    /// to `BfpComplex32::init` alongside the returned mantissas.
    pub fn make(re: &[i32], im: &[i32]) -> Vec<ComplexS32> {
        debug_assert_eq!(re.len(), im.len());
        re.iter()
            .zip(im)
            .map(|(&re, &im)| ComplexS32 { re, im })
            .collect()
    }

    pub fn real_part(&self, out: &mut [i32]) {
        debug_assert_eq!(out.len(), self.len());
        for (o, c) in out.iter_mut().zip(self.data.iter()) {
            *o = c.re;
        }
    }

    pub fn imag_part(&self, out: &mut [i32]) {
        debug_assert_eq!(out.len(), self.len());
        for (o, c) in out.iter_mut().zip(self.data.iter()) {
            *o = c.im;
        }
    }

    pub fn use_exponent(&mut self, exp: Exp) {
        if exp == self.exp {
            return;
        }
        let shr = exp - self.exp;
        let src: Vec<ComplexS32> = self.data.to_vec();
        self.hr = complex_s32::shr(&mut self.data, &src, shr);
        self.exp = exp;
    }

    pub fn shl(&mut self, shl: i32) {
        let src: Vec<ComplexS32> = self.data.to_vec();
        self.hr = complex_s32::shl(&mut self.data, &src, shl);
    }

    pub fn add(&mut self, b: &BfpComplex32, c: &BfpComplex32) {
        let (a_exp, b_shr, c_shr) = prepare::add_sub_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = complex_s32::add(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    pub fn sub(&mut self, b: &BfpComplex32, c: &BfpComplex32) {
        let (a_exp, b_shr, c_shr) = prepare::add_sub_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = complex_s32::sub(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    pub fn mul(&mut self, b: &BfpComplex32, c: &BfpComplex32) {
        let (a_exp, b_shr, c_shr) = prepare::complex_mul_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = complex_s32::mul(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    pub fn conj_mul(&mut self, b: &BfpComplex32, c: &BfpComplex32) {
        let (a_exp, b_shr, c_shr) = prepare::complex_mul_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = complex_s32::conj_mul(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    /// `self += b * c` (spec §4.4, complex macc).
    pub fn macc(&mut self, b: &BfpComplex32, c: &BfpComplex32) {
        let (a_exp, b_shr, c_shr, acc_shr) =
            prepare::complex_macc_prepare(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = complex_s32::macc(&mut self.data, &b.data, &c.data, b_shr, c_shr, acc_shr);
        self.exp = a_exp;
    }

    /// `self -= b * c`.
    pub fn nmacc(&mut self, b: &BfpComplex32, c: &BfpComplex32) {
        let (a_exp, b_shr, c_shr, acc_shr) =
            prepare::complex_macc_prepare(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = complex_s32::nmacc(&mut self.data, &b.data, &c.data, b_shr, c_shr, acc_shr);
        self.exp = a_exp;
    }

    /// `self += b * conj(c)`.
    pub fn conj_macc(&mut self, b: &BfpComplex32, c: &BfpComplex32) {
        let (a_exp, b_shr, c_shr, acc_shr) =
            prepare::complex_macc_prepare(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = complex_s32::conj_macc(&mut self.data, &b.data, &c.data, b_shr, c_shr, acc_shr);
        self.exp = a_exp;
    }

    /// `self -= b * conj(c)`.
    pub fn conj_nmacc(&mut self, b: &BfpComplex32, c: &BfpComplex32) {
        let (a_exp, b_shr, c_shr, acc_shr) =
            prepare::complex_macc_prepare(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = complex_s32::conj_nmacc(&mut self.data, &b.data, &c.data, b_shr, c_shr, acc_shr);
        self.exp = a_exp;
    }

    /// `self = b * c` where `c` is a real-valued `BfpReal32` of the same
    /// length (spec §6.1 complex-only `real_mul`).
    pub fn real_mul(&mut self, b: &BfpComplex32, c: &super::real32::BfpReal32) {
        debug_assert_eq!(b.len(), c.len());
        let (a_exp, b_shr, c_shr) = prepare::mul_prepare_s32(b.exp, c.exp, b.hr, c.hr);
        self.hr = complex_s32::real_mul(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    /// Sum of squared magnitudes, i.e. signal energy (spec §6.1 complex
    /// `energy`).
    pub fn energy(&self) -> (i64, Exp) {
        let sum: i64 = self
            .data
            .iter()
            .map(|c| (c.re as i64) * (c.re as i64) + (c.im as i64) * (c.im as i64))
            .sum();
        (sum, 2 * self.exp)
    }

    /// Per-element magnitude via [`Self::squared_mag`] followed by a
    /// scalar `sqrt` (spec §6.1 complex `mag`).
    pub fn mag(&self, out: &mut [i32]) -> Exp {
        debug_assert_eq!(out.len(), self.len());
        let mut sq = vec![0i32; self.len()];
        let (_, sq_exp) = self.squared_mag(&mut sq);
        let mut out_exp = 0;
        for (o, &s) in out.iter_mut().zip(sq.iter()) {
            let (m, e) = crate::scalar::transcendental::s32_sqrt(s.max(0), sq_exp);
            *o = m;
            out_exp = e;
        }
        out_exp
    }

    /// Root-mean-square magnitude over the whole vector (spec §6.1
    /// complex `rms`).
    pub fn rms(&self) -> (i32, Exp) {
        let (sum_sq, e) = self.energy();
        let mean_sq = sum_sq / self.len() as i64;
        crate::scalar::transcendental::s32_sqrt(mean_sq.clamp(0, i32::MAX as i64) as i32, e)
    }

    pub fn real_scale(&mut self, b: &BfpComplex32, alpha: i32, alpha_exp: Exp, alpha_hr: Headroom) {
        let (a_exp, shr) = prepare::scale_prepare(b.exp, alpha_exp, b.hr, alpha_hr);
        self.hr = complex_s32::real_scale(&mut self.data, &b.data, alpha, shr, 0);
        self.exp = a_exp;
    }

    /// `self = b * alpha` where `alpha` is a single complex scalar (spec
    /// §6.1 complex `scale`, as opposed to [`Self::real_scale`]'s
    /// real-scalar form).
    pub fn scale(&mut self, b: &BfpComplex32, alpha: ComplexS32, alpha_exp: Exp, alpha_hr: Headroom) {
        let (a_exp, b_shr, alpha_shr) = prepare::complex_mul_prepare(b.exp, alpha_exp, b.hr, alpha_hr);
        self.hr = complex_s32::scale(&mut self.data, &b.data, alpha, b_shr, alpha_shr);
        self.exp = a_exp;
    }

    /// Complex dot product (spec §6.1 common `dot`), raw unsaturated sums
    /// per [`super::real32::BfpReal32::dot`]'s convention.
    pub fn dot(&self, other: &BfpComplex32) -> ((i64, i64), Exp) {
        debug_assert_eq!(self.len(), other.len());
        (complex_s32::dot(&self.data, &other.data), self.exp + other.exp)
    }

    pub fn conjugate(&mut self, b: &BfpComplex32) {
        complex_s32::conjugate(&mut self.data, &b.data);
        self.exp = b.exp;
        self.hr = b.hr;
    }

    pub fn squared_mag(&self, out: &mut [i32]) -> (Headroom, Exp) {
        let hr = complex_s32::squared_mag(out, &self.data, 0);
        (hr, 2 * self.exp)
    }

    /// Widens a complex-16 vector up to complex-32, no shift, per
    /// [`super::real32::BfpReal32::from_real16`].
    pub fn from_complex16(&mut self, b: &super::complex16::BfpComplex16) {
        debug_assert_eq!(self.len(), b.len());
        for (a, (&re, &im)) in self.data.iter_mut().zip(b.real.iter().zip(b.imag.iter())) {
            a.re = re as i32;
            a.im = im as i32;
        }
        self.exp = b.exp;
        self.hr = b.hr as Headroom + 16;
    }

    pub fn sum(&self) -> (ComplexS32, Exp) {
        (complex_s32::sum(&self.data), self.exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_headroom_matches_rescan() {
        let mut bd = [ComplexS32::new(100, 50), ComplexS32::new(-20, 30)];
        let mut cd = [ComplexS32::new(2, 1), ComplexS32::new(1, -1)];
        let b = BfpComplex32::init(&mut bd, 0, true);
        let c = BfpComplex32::init(&mut cd, 0, true);
        let mut out = [ComplexS32::default(); 2];
        let mut a = BfpComplex32::init(&mut out, 0, false);
        a.mul(&b, &c);
        assert_eq!(a.hr, complex_s32::headroom(&a.data));
    }
}
