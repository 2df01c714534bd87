//! BFP real-16 vector wrapper. Mirrors `real32`'s structure at half the
//! element width; grounded the same way in
//! `original_source/.../bfp/bfp_alloc.c` / `bfp_init.c`.

use super::MantissaBuf;
use crate::error::{BfpError, BfpResult};
use crate::prepare;
use crate::scalar::{Exp, Headroom};
use crate::vect::s16;

pub struct BfpReal16<'a> {
    pub data: MantissaBuf<'a, i16>,
    pub exp: Exp,
    pub hr: Headroom,
}

impl<'a> BfpReal16<'a> {
    pub fn init(data: &'a mut [i16], exp: Exp, compute_hr: bool) -> Self {
        debug_assert!(!data.is_empty(), "BFP vectors must have nonzero length");
        let hr = if compute_hr { s16::headroom(data) } else { 0 };
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
            data: MantissaBuf::Owned(vec![0i16; length]),
            exp,
            hr: 15,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn headroom(&mut self) -> Headroom {
        self.hr = s16::headroom(&self.data);
        self.hr
    }

    pub fn set(&mut self, value: i16, exp: Exp) {
        self.data.fill(value);
        self.exp = exp;
        self.headroom();
    }

    pub fn use_exponent(&mut self, exp: Exp) {
        if exp == self.exp {
            return;
        }
        let shr = exp - self.exp;
        let src: Vec<i16> = self.data.to_vec();
        self.hr = s16::shr(&mut self.data, &src, shr);
        self.exp = exp;
    }

    pub fn shl(&mut self, shl: i32) {
        let src: Vec<i16> = self.data.to_vec();
        self.hr = s16::shl(&mut self.data, &src, shl);
    }

    pub fn add(&mut self, b: &BfpReal16, c: &BfpReal16) {
        let (a_exp, b_shr, c_shr) = prepare::add_sub_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = s16::add(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    pub fn sub(&mut self, b: &BfpReal16, c: &BfpReal16) {
        let (a_exp, b_shr, c_shr) = prepare::add_sub_prepare(b.exp, c.exp, b.hr, c.hr);
        self.hr = s16::sub(&mut self.data, &b.data, &c.data, b_shr, c_shr);
        self.exp = a_exp;
    }

    pub fn mul(&mut self, b: &BfpReal16, c: &BfpReal16) {
        let (a_exp, a_shr) = prepare::mul_prepare_s16(b.exp, c.exp, b.hr, c.hr);
        self.hr = s16::mul(&mut self.data, &b.data, &c.data, a_shr);
        self.exp = a_exp;
    }

    pub fn scale(&mut self, b: &BfpReal16, alpha: i16, alpha_exp: Exp, alpha_hr: Headroom) {
        let (a_exp, shr) = prepare::scale_prepare(b.exp, alpha_exp, b.hr, alpha_hr);
        self.hr = s16::scale(&mut self.data, &b.data, alpha, shr);
        self.exp = a_exp;
    }

    /// `self += b * c` (spec §4.4, real 16-bit macc).
    pub fn macc(&mut self, b: &BfpReal16, c: &BfpReal16) {
        let (a_exp, b_shr, acc_shr) =
            prepare::macc_prepare_s16(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = s16::macc(&mut self.data, &b.data, &c.data, b_shr, acc_shr);
        self.exp = a_exp;
    }

    /// `self -= b * c`.
    pub fn nmacc(&mut self, b: &BfpReal16, c: &BfpReal16) {
        let (a_exp, b_shr, acc_shr) =
            prepare::macc_prepare_s16(b.exp, c.exp, b.hr, c.hr, self.exp, self.hr);
        self.hr = s16::nmacc(&mut self.data, &b.data, &c.data, b_shr, acc_shr);
        self.exp = a_exp;
    }

    pub fn sum(&self) -> (i64, Exp) {
        (s16::sum(&self.data), self.exp)
    }

    pub fn abs_sum(&self) -> (i64, Exp) {
        (s16::abs_sum(&self.data), self.exp)
    }

    pub fn mean(&self) -> (i64, Exp) {
        let (sum, exp) = self.sum();
        (sum / self.len() as i64, exp)
    }

    pub fn dot(&self, other: &BfpReal16) -> (i64, Exp) {
        debug_assert_eq!(self.len(), other.len());
        (s16::dot(&self.data, &other.data), self.exp + other.exp)
    }

    pub fn rms(&self) -> (i32, Exp) {
        let (sum_sq, e) = self.energy();
        let mean_sq = sum_sq / self.len() as i64;
        crate::scalar::transcendental::s32_sqrt(mean_sq.clamp(0, i32::MAX as i64) as i32, e)
    }

    pub fn max_elementwise(&mut self, b: &BfpReal16, c: &BfpReal16) {
        self.hr = s16::max_elementwise(&mut self.data, &b.data, &c.data);
        self.exp = b.exp.max(c.exp);
    }

    pub fn min_elementwise(&mut self, b: &BfpReal16, c: &BfpReal16) {
        self.hr = s16::min_elementwise(&mut self.data, &b.data, &c.data);
        self.exp = b.exp.min(c.exp);
    }

    pub fn energy(&self) -> (i64, Exp) {
        (s16::dot(&self.data, &self.data), 2 * self.exp)
    }

    pub fn max(&self) -> i16 {
        s16::max(&self.data)
    }

    pub fn min(&self) -> i16 {
        s16::min(&self.data)
    }

    pub fn argmax(&self) -> usize {
        s16::argmax(&self.data)
    }

    pub fn argmin(&self) -> usize {
        s16::argmin(&self.data)
    }

    /// Narrows a 32-bit vector down to 16 bits (spec §6.1
    /// depth-conversion), shifting down by whatever the source's headroom
    /// leaves short of 16 bits.
    pub fn from_real32(&mut self, b: &super::real32::BfpReal32) {
        debug_assert_eq!(self.len(), b.len());
        let shr = (16 - b.hr as i32).max(0);
        for (a, &bv) in self.data.iter_mut().zip(b.data.iter()) {
            *a = crate::scalar::sat_round_shr_s16(bv as i64, shr);
        }
        self.exp = b.exp + shr;
        self.headroom();
    }

    pub fn clip(&mut self, b: &BfpReal16, lo: i16, hi: i16) {
        self.hr = s16::clip(&mut self.data, &b.data, lo, hi);
        self.exp = b.exp;
    }

    pub fn rect(&mut self, b: &BfpReal16) {
        self.hr = s16::rect(&mut self.data, &b.data);
        self.exp = b.exp;
    }

    pub fn abs(&mut self, b: &BfpReal16) {
        self.hr = s16::abs(&mut self.data, &b.data);
        self.exp = b.exp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_symmetric_abs() {
        // spec §8 end-to-end scenario 3
        let mut bd = [i16::MIN, 1, -3, 5];
        let b = BfpReal16::init(&mut bd, 0, true);
        let mut out = [0i16; 4];
        let mut a = BfpReal16::init(&mut out, 0, false);
        a.abs(&b);
        assert_eq!(a.data.to_vec(), vec![i16::MAX, 1, 3, 5]);
        assert_eq!(a.exp, 0);
    }
}
