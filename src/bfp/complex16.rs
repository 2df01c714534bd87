//! BFP complex-16 vector wrapper over separate real/imaginary mantissa
//! buffers (spec §4.3 16-bit complex flavor).

use super::MantissaBuf;
use crate::error::{BfpError, BfpResult};
use crate::prepare;
use crate::scalar::{ComplexS16, Exp, Headroom};
use crate::vect::complex_s16;

pub struct BfpComplex16<'a> {
    pub real: MantissaBuf<'a, i16>,
    pub imag: MantissaBuf<'a, i16>,
    pub exp: Exp,
    pub hr: Headroom,
}

impl<'a> BfpComplex16<'a> {
    pub fn init(real: &'a mut [i16], imag: &'a mut [i16], exp: Exp, compute_hr: bool) -> Self {
        debug_assert_eq!(real.len(), imag.len());
        debug_assert!(!real.is_empty(), "BFP vectors must have nonzero length");
        let hr = if compute_hr {
            complex_s16::headroom(real, imag)
        } else {
            0
        };
        Self {
            real: MantissaBuf::Borrowed(real),
            imag: MantissaBuf::Borrowed(imag),
            exp,
            hr,
        }
    }

    pub fn alloc(length: usize, exp: Exp) -> BfpResult<Self> {
        if length == 0 {
            return Err(BfpError::AllocFailed);
        }
        Ok(Self {
            real: MantissaBuf::Owned(vec![0i16; length]),
            imag: MantissaBuf::Owned(vec![0i16; length]),
            exp,
            hr: 15,
        })
    }

    pub fn len(&self) -> usize {
        self.real.len()
    }

    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    pub fn headroom(&mut self) -> Headroom {
        self.hr = complex_s16::headroom(&self.real, &self.imag);
        self.hr
    }

    pub fn set(&mut self, value: ComplexS16, exp: Exp) {
        complex_s16::set(&mut self.real, &mut self.imag, value.re, value.im);
        self.exp = exp;
        self.headroom();
    }

    pub fn use_exponent(&mut self, exp: Exp) {
        if exp == self.exp {
            return;
        }
        let shr = exp - self.exp;
        let re_src: Vec<i16> = self.real.to_vec();
        let im_src: Vec<i16> = self.imag.to_vec();
        self.hr = complex_s16::shr(&mut self.real, &mut self.imag, &re_src, &im_src, shr);
        self.exp = exp;
    }

    pub fn shl(&mut self, shl: i32) {
        let re_src: Vec<i16> = self.real.to_vec();
        let im_src: Vec<i16> = self.imag.to_vec();
        self.hr = complex_s16::shl(&mut self.real, &mut self.imag, &re_src, &im_src, shl);
    }

    pub fn add(&mut self, b: &BfpComplex16, c: &BfpComplex16) {
        let (a_exp, b_shr, c_shr) = prepare::add_sub_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = complex_s16::add(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            &c.real,
            &c.imag,
            b_shr,
            c_shr,
        );
        self.exp = a_exp;
    }

    pub fn sub(&mut self, b: &BfpComplex16, c: &BfpComplex16) {
        let (a_exp, b_shr, c_shr) = prepare::add_sub_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = complex_s16::sub(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            &c.real,
            &c.imag,
            b_shr,
            c_shr,
        );
        self.exp = a_exp;
    }

    pub fn real_scale(&mut self, b: &BfpComplex16, alpha: i16, alpha_exp: Exp, alpha_hr: Headroom) {
        let (a_exp, shr) = prepare::scale_prepare(b.exp, alpha_exp, b.hr, alpha_hr);
        self.hr = complex_s16::real_scale(&mut self.real, &mut self.imag, &b.real, &b.imag, alpha, shr);
        self.exp = a_exp;
    }

    /// `self = b * alpha` where `alpha` is a single complex scalar (spec
    /// §6.1 complex `scale`, as opposed to [`Self::real_scale`]'s
    /// real-scalar form).
    pub fn scale(&mut self, b: &BfpComplex16, alpha: ComplexS16, alpha_exp: Exp, alpha_hr: Headroom) {
        let (a_exp, a_shr) = prepare::mul_prepare_s16(b.exp, alpha_exp, b.hr, alpha_hr);
        self.hr = complex_s16::scale(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            alpha.re,
            alpha.im,
            a_shr,
        );
        self.exp = a_exp;
    }

    /// Complex dot product (spec §6.1 common `dot`), raw unsaturated sums
    /// per [`super::real32::BfpReal32::dot`]'s convention.
    pub fn dot(&self, other: &BfpComplex16) -> ((i64, i64), Exp) {
        debug_assert_eq!(self.len(), other.len());
        (
            complex_s16::dot(&self.real, &self.imag, &other.real, &other.imag),
            self.exp + other.exp,
        )
    }

    pub fn add_scalar(&mut self, b: &BfpComplex16, c: ComplexS16, c_exp: Exp) {
        let (a_exp, b_shr, _) = prepare::add_sub_prepare(b.exp, c_exp, b.hr, 15);
        self.hr = complex_s16::add_scalar(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            c.re,
            c.im,
            b_shr,
        );
        self.exp = a_exp;
    }

    pub fn mul(&mut self, b: &BfpComplex16, c: &BfpComplex16) {
        let (a_exp, a_shr) = prepare::mul_prepare_s16(b.exp, c.exp, b.hr, c.hr);
        self.hr = complex_s16::mul(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            &c.real,
            &c.imag,
            a_shr,
        );
        self.exp = a_exp;
    }

    pub fn conj_mul(&mut self, b: &BfpComplex16, c: &BfpComplex16) {
        let (a_exp, a_shr) = prepare::mul_prepare_s16(b.exp, c.exp, b.hr, c.hr);
        self.hr = complex_s16::conj_mul(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            &c.real,
            &c.imag,
            a_shr,
        );
        self.exp = a_exp;
    }

    /// `self += b * c` (spec §4.4, complex 16-bit macc).
    pub fn macc(&mut self, b: &BfpComplex16, c: &BfpComplex16) {
        let (a_exp, b_shr, acc_shr) =
            prepare::complex_macc_prepare_s16(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = complex_s16::macc(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            &c.real,
            &c.imag,
            b_shr,
            acc_shr,
        );
        self.exp = a_exp;
    }

    /// `self -= b * c`.
    pub fn nmacc(&mut self, b: &BfpComplex16, c: &BfpComplex16) {
        let (a_exp, b_shr, acc_shr) =
            prepare::complex_macc_prepare_s16(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = complex_s16::nmacc(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            &c.real,
            &c.imag,
            b_shr,
            acc_shr,
        );
        self.exp = a_exp;
    }

    /// `self += b * conj(c)`.
    pub fn conj_macc(&mut self, b: &BfpComplex16, c: &BfpComplex16) {
        let (a_exp, b_shr, acc_shr) =
            prepare::complex_macc_prepare_s16(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = complex_s16::conj_macc(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            &c.real,
            &c.imag,
            b_shr,
            acc_shr,
        );
        self.exp = a_exp;
    }

    /// `self -= b * conj(c)`.
    pub fn conj_nmacc(&mut self, b: &BfpComplex16, c: &BfpComplex16) {
        let (a_exp, b_shr, acc_shr) =
            prepare::complex_macc_prepare_s16(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = complex_s16::conj_nmacc(
            &mut self.real,
            &mut self.imag,
            &b.real,
            &b.imag,
            &c.real,
            &c.imag,
            b_shr,
            acc_shr,
        );
        self.exp = a_exp;
    }

    pub fn conjugate(&mut self, b: &BfpComplex16) {
        self.real.copy_from_slice(&b.real);
        complex_s16::conjugate(&mut self.imag, &b.imag);
        self.exp = b.exp;
        self.hr = b.hr;
    }

    pub fn squared_mag(&self, out: &mut [i32]) -> (Headroom, Exp) {
        let hr = complex_s16::squared_mag(out, &self.real, &self.imag);
        (hr, 2 * self.exp)
    }

    /// Per-element magnitude, spec §6.1 complex `mag`.
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

    pub fn energy(&self) -> (i64, Exp) {
        let sum: i64 = self
            .real
            .iter()
            .zip(self.imag.iter())
            .map(|(&re, &im)| (re as i64) * (re as i64) + (im as i64) * (im as i64))
            .sum();
        (sum, 2 * self.exp)
    }

    pub fn rms(&self) -> (i32, Exp) {
        let (sum_sq, e) = self.energy();
        let mean_sq = sum_sq / self.len() as i64;
        crate::scalar::transcendental::s32_sqrt(mean_sq.clamp(0, i32::MAX as i64) as i32, e)
    }

    pub fn make(re: &[i16], im: &[i16]) -> (Vec<i16>, Vec<i16>) {
        debug_assert_eq!(re.len(), im.len());
        (re.to_vec(), im.to_vec())
    }

    pub fn real_part(&self, out: &mut [i16]) {
        out.copy_from_slice(&self.real);
    }

    pub fn imag_part(&self, out: &mut [i16]) {
        out.copy_from_slice(&self.imag);
    }

    /// Narrows a complex-32 vector down to complex-16, mirroring
    /// [`super::real16::BfpReal16::from_real32`].
    pub fn from_complex32(&mut self, b: &super::complex32::BfpComplex32) {
        debug_assert_eq!(self.len(), b.len());
        let shr = (16 - b.hr as i32).max(0);
        for ((ar, ai), c) in self
            .real
            .iter_mut()
            .zip(self.imag.iter_mut())
            .zip(b.data.iter())
        {
            *ar = crate::scalar::sat_round_shr_s16(c.re as i64, shr);
            *ai = crate::scalar::sat_round_shr_s16(c.im as i64, shr);
        }
        self.exp = b.exp + shr;
        self.headroom();
    }

    pub fn sum(&self) -> (ComplexS16, Exp) {
        let (re, im) = complex_s16::sum(&self.real, &self.imag);
        (
            ComplexS16 {
                re: crate::scalar::sat_round_shr_s16(re, 0),
                im: crate::scalar::sat_round_shr_s16(im, 0),
            },
            self.exp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_headroom_matches_rescan() {
        let mut b_re = [100i16, 200];
        let mut b_im = [1i16, 1];
        let mut c_re = [0i16, 0];
        let mut c_im = [0i16, 0];
        let b = BfpComplex16::init(&mut b_re, &mut b_im, 0, true);
        let c = BfpComplex16::init(&mut c_re, &mut c_im, 0, true);
        let mut a_re = [0i16; 2];
        let mut a_im = [0i16; 2];
        let mut a = BfpComplex16::init(&mut a_re, &mut a_im, 0, false);
        a.add(&b, &c);
        assert_eq!(a.hr, complex_s16::headroom(&a.real, &a.imag));
    }
}
