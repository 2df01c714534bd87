//! BFP real-32 vector wrapper. Grounded in
//! `original_source/.../bfp/bfp_alloc.c` and `bfp_init.c`.

use super::MantissaBuf;
use crate::error::{BfpError, BfpResult};
use crate::prepare;
use crate::scalar::{Exp, Headroom};
use crate::vect::s32;

pub struct BfpReal32<'a> {
    pub data: MantissaBuf<'a, i32>,
    pub exp: Exp,
    pub hr: Headroom,
}

impl<'a> BfpReal32<'a> {
    /// Wraps a caller-provided, already-populated buffer. `compute_hr`
    /// controls whether the headroom is scanned immediately or left at
    /// its (pessimistic) default of `0`, matching the original's
    /// static-initializer "optional headroom-compute flag" (spec §3.6).
    pub fn init(data: &'a mut [i32], exp: Exp, compute_hr: bool) -> Self {
        debug_assert!(!data.is_empty(), "BFP vectors must have nonzero length");
        let hr = if compute_hr { s32::headroom(data) } else { 0 };
        #[cfg(feature = "trace")]
        log::trace!("BfpReal32::init len={} exp={} hr={}", data.len(), exp, hr);
        Self {
            data: MantissaBuf::Borrowed(data),
            exp,
            hr,
        }
    }

    /// Heap-allocates a zero-filled buffer of `length`. Mirrors the
    /// allocation-failure contract of spec §7 bullet 2: on failure
    /// (here, only a zero `length` request) the returned error leaves no
    /// struct to free.
    pub fn alloc(length: usize, exp: Exp) -> BfpResult<Self> {
        if length == 0 {
            return Err(BfpError::AllocFailed);
        }
        #[cfg(feature = "trace")]
        log::trace!("BfpReal32::alloc length={length} exp={exp}");
        Ok(Self {
            data: MantissaBuf::Owned(vec![0i32; length]),
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

    /// Recomputes `hr` from a full scan of the mantissas (spec P2).
    pub fn headroom(&mut self) -> Headroom {
        self.hr = s32::headroom(&self.data);
        self.hr
    }

    pub fn set(&mut self, value: i32, exp: Exp) {
        self.data.fill(value);
        self.exp = exp;
        self.headroom();
    }

    /// Renormalizes in place to a caller-specified exponent. Idempotent
    /// when `exp == self.exp` (spec P5).
    pub fn use_exponent(&mut self, exp: Exp) {
        if exp == self.exp {
            return;
        }
        let shr = exp - self.exp;
        let src: Vec<i32> = self.data.to_vec();
        self.hr = s32::shr(&mut self.data, &src, shr);
        self.exp = exp;
    }

    pub fn shl(&mut self, shl: i32) {
        let src: Vec<i32> = self.data.to_vec();
        self.hr = s32::shl(&mut self.data, &src, shl);
    }

    pub fn add(&mut self, b: &BfpReal32, c: &BfpReal32) {
        debug_assert_eq!(b.len(), c.len());
        let (a_exp, b_shr, c_shr) = prepare::add_sub_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = s32::add(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    pub fn sub(&mut self, b: &BfpReal32, c: &BfpReal32) {
        debug_assert_eq!(b.len(), c.len());
        let (a_exp, b_shr, c_shr) = prepare::add_sub_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = s32::sub(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    pub fn add_scalar(&mut self, b: &BfpReal32, c: i32, c_exp: Exp) {
        let (a_exp, b_shr, _) = prepare::add_sub_prepare(b.exp, c_exp, b.hr, 31);
        self.hr = s32::add_scalar(&mut self.data, &b.data, c, b_shr);
        self.exp = a_exp;
    }

    pub fn mul(&mut self, b: &BfpReal32, c: &BfpReal32) {
        debug_assert_eq!(b.len(), c.len());
        let (a_exp, b_shr, c_shr) = prepare::mul_prepare_s32(b.exp, c.exp, b.hr, c.hr);
        self.hr = s32::mul(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    pub fn scale(&mut self, b: &BfpReal32, alpha: i32, alpha_exp: Exp, alpha_hr: Headroom) {
        let (a_exp, shr) = prepare::scale_prepare(b.exp, alpha_exp, b.hr, alpha_hr);
        self.hr = s32::scale(&mut self.data, &b.data, alpha, shr, 0);
        self.exp = a_exp;
    }

    /// `self += b * c`, re-exponentiating `self` in place so the
    /// accumulator keeps whatever headroom the running sum allows
    /// (spec §4.4, real 32-bit macc).
    pub fn macc(&mut self, b: &BfpReal32, c: &BfpReal32) {
        debug_assert_eq!(b.len(), c.len());
        debug_assert_eq!(self.len(), b.len());
        let (a_exp, b_shr, c_shr, acc_shr) =
            prepare::macc_prepare(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = s32::macc(&mut self.data, &b.data, &c.data, b_shr, c_shr, acc_shr);
        self.exp = a_exp;
    }

    /// `self -= b * c`.
    pub fn nmacc(&mut self, b: &BfpReal32, c: &BfpReal32) {
        debug_assert_eq!(b.len(), c.len());
        debug_assert_eq!(self.len(), b.len());
        let (a_exp, b_shr, c_shr, acc_shr) =
            prepare::macc_prepare(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = s32::nmacc(&mut self.data, &b.data, &c.data, b_shr, c_shr, acc_shr);
        self.exp = a_exp;
    }

    pub fn dot(&self, other: &BfpReal32) -> (i64, Exp) {
        debug_assert_eq!(self.len(), other.len());
        (s32::dot(&self.data, &other.data), self.exp + other.exp)
    }

    pub fn sum(&self) -> (i64, Exp) {
        (s32::sum(&self.data), self.exp)
    }

    pub fn abs_sum(&self) -> (i64, Exp) {
        (s32::abs_sum(&self.data), self.exp)
    }

    pub fn mean(&self) -> (i64, Exp) {
        let (sum, exp) = self.sum();
        (sum / self.len() as i64, exp)
    }

    pub fn energy(&self) -> (i64, Exp) {
        (s32::dot(&self.data, &self.data), 2 * self.exp)
    }

    /// Root-mean-square over the whole vector (spec §6.1 common `rms`).
    pub fn rms(&self) -> (i32, Exp) {
        let (sum_sq, e) = self.energy();
        let mean_sq = sum_sq / self.len() as i64;
        crate::scalar::transcendental::s32_sqrt(mean_sq.clamp(0, i32::MAX as i64) as i32, e)
    }

    pub fn max(&self) -> i32 {
        s32::max(&self.data)
    }

    pub fn min(&self) -> i32 {
        s32::min(&self.data)
    }

    pub fn argmax(&self) -> usize {
        s32::argmax(&self.data)
    }

    pub fn argmin(&self) -> usize {
        s32::argmin(&self.data)
    }

    pub fn max_elementwise(&mut self, b: &BfpReal32, c: &BfpReal32) {
        self.hr = s32::max_elementwise(&mut self.data, &b.data, &c.data);
        self.exp = b.exp.max(c.exp);
    }

    pub fn min_elementwise(&mut self, b: &BfpReal32, c: &BfpReal32) {
        self.hr = s32::min_elementwise(&mut self.data, &b.data, &c.data);
        self.exp = b.exp.min(c.exp);
    }

    pub fn clip(&mut self, b: &BfpReal32, lo: i32, hi: i32) {
        self.hr = s32::clip(&mut self.data, &b.data, lo, hi);
        self.exp = b.exp;
    }

    pub fn rect(&mut self, b: &BfpReal32) {
        self.hr = s32::rect(&mut self.data, &b.data);
        self.exp = b.exp;
    }

    pub fn abs(&mut self, b: &BfpReal32) {
        self.hr = s32::abs(&mut self.data, &b.data);
        self.exp = b.exp;
    }

    /// `sqrt` and `inverse` operate element-by-element through the
    /// scalar transcendentals (spec §6.1, real-only ops).
    pub fn sqrt(&mut self, b: &BfpReal32) {
        debug_assert_eq!(self.len(), b.len());
        let mut out_exp = 0;
        for (a, &bv) in self.data.iter_mut().zip(b.data.iter()) {
            let (m, e) = crate::scalar::transcendental::s32_sqrt(bv.max(0), b.exp);
            *a = m;
            out_exp = e;
        }
        self.exp = out_exp;
        self.headroom();
    }

    /// Narrows a 16-bit vector up to 32 bits, widening with no shift
    /// (spec §6.1 depth-conversion). The source's headroom carries over
    /// unchanged since widening never loses precision.
    pub fn from_real16(&mut self, b: &super::real16::BfpReal16) {
        debug_assert_eq!(self.len(), b.len());
        for (a, &bv) in self.data.iter_mut().zip(b.data.iter()) {
            *a = bv as i32;
        }
        self.exp = b.exp;
        self.hr = b.hr as Headroom + 16;
    }

    pub fn inverse(&mut self, b: &BfpReal32) {
        debug_assert_eq!(self.len(), b.len());
        let mut out_exp = 0;
        for (a, &bv) in self.data.iter_mut().zip(b.data.iter()) {
            let (m, e) = crate::scalar::s32_inverse(bv);
            *a = m;
            out_exp = e - b.exp;
        }
        self.exp = out_exp;
        self.headroom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_of_zero_length_fails() {
        assert_eq!(BfpReal32::alloc(0, 0).unwrap_err(), BfpError::AllocFailed);
    }

    #[test]
    fn use_exponent_is_idempotent() {
        let mut data = [100, -50, 25];
        let mut v = BfpReal32::init(&mut data, -4, true);
        let before: Vec<i32> = v.data.to_vec();
        let before_exp = v.exp;
        v.use_exponent(v.exp);
        assert_eq!(v.data.to_vec(), before);
        assert_eq!(v.exp, before_exp);
    }

    #[test]
    fn add_then_headroom_matches_rescan() {
        let mut bd = [1, 1, 1, 1];
        let mut cd = [2, 2, 2, 2];
        let b = BfpReal32::init(&mut bd, 0, true);
        let c = BfpReal32::init(&mut cd, 1, true);
        let mut out_data = [0; 4];
        let mut a = BfpReal32::init(&mut out_data, 0, false);
        a.add(&b, &c);
        let reported_hr = a.hr;
        let scanned_hr = s32::headroom(&a.data);
        assert_eq!(reported_hr, scanned_hr);
    }

    #[test]
    fn scenario_add_exponents() {
        // spec §8 end-to-end scenario 1
        let mut bd = [1, 1, 1, 1];
        let mut cd = [2, 2, 2, 2];
        let b = BfpReal32::init(&mut bd, 0, true);
        let c = BfpReal32::init(&mut cd, 1, true);
        let mut out_data = [0; 4];
        let mut a = BfpReal32::init(&mut out_data, 0, false);
        a.add(&b, &c);
        for &v in a.data.iter() {
            let real = v as f64 * 2f64.powi(a.exp);
            assert!((real - 5.0).abs() <= 1.0);
        }
    }

    #[test]
    fn scenario_overflow_avoiding_add() {
        // spec §8 end-to-end scenario 2
        let mut bd = [i32::MAX];
        let mut cd = [i32::MAX];
        let b = BfpReal32::init(&mut bd, 0, true);
        let c = BfpReal32::init(&mut cd, 0, true);
        let mut out_data = [0];
        let mut a = BfpReal32::init(&mut out_data, 0, false);
        a.add(&b, &c);
        assert_eq!(a.data[0], i32::MAX);
        assert_eq!(a.exp, 1);
    }
}
