//! Circular-buffer FIR filters, 16- and 32-bit. Ported from
//! `original_source/.../filter/filters.c`'s `filter_fir_s16`/
//! `filter_fir_s32` structs and init/add_sample entry points.

use crate::scalar::{round_shr_i64, sat_round_shr_s16, sat_round_shr_s32, sat_symmetric, Shr};

/// 32-bit FIR: Q2.30 coefficients, circular sample history, a single
/// output right-shift. Each tap's product is rounded into a 40-bit lane
/// before the lanes are summed, mirroring the 8-lane saturating
/// accumulator spec §4.8 describes.
pub struct FilterFirS32 {
    state: Vec<i32>,
    coef: Vec<i32>,
    head: usize,
    shift: Shr,
}

impl FilterFirS32 {
    pub fn new(coef: Vec<i32>, shift: Shr) -> Self {
        assert!(!coef.is_empty());
        let taps = coef.len();
        Self {
            state: vec![0i32; taps],
            coef,
            head: taps - 1,
            shift,
        }
    }

    pub fn add_sample(&mut self, new_sample: i32) {
        self.state[self.head] = new_sample;
        self.head = if self.head == 0 {
            self.state.len() - 1
        } else {
            self.head - 1
        };
    }

    /// Computes the filter's current output from its history, without
    /// advancing state (matches `filter_fir_s32_run` being callable any
    /// number of times between `add_sample`s).
    pub fn run(&self) -> i32 {
        let taps = self.coef.len();
        let mut total: i64 = 0;
        for t in 0..taps {
            let idx = (self.head + 1 + t) % taps;
            let lane = round_shr_i64(self.state[idx] as i64 * self.coef[t] as i64, 30);
            total += sat_symmetric(lane, 40);
        }
        sat_round_shr_s32(total, self.shift)
    }
}

/// 16-bit FIR: a plain 32-bit saturating accumulator, single output
/// shift. Callers must keep `sum(|coef|) <= 2^16` to avoid the
/// accumulator saturating (spec §4.8).
pub struct FilterFirS16 {
    state: Vec<i16>,
    coef: Vec<i16>,
    head: usize,
    shift: Shr,
}

impl FilterFirS16 {
    pub fn new(coef: Vec<i16>, shift: Shr) -> Self {
        assert!(!coef.is_empty());
        let taps = coef.len();
        Self {
            state: vec![0i16; taps],
            coef,
            head: taps - 1,
            shift,
        }
    }

    pub fn add_sample(&mut self, new_sample: i16) {
        self.state[self.head] = new_sample;
        self.head = if self.head == 0 {
            self.state.len() - 1
        } else {
            self.head - 1
        };
    }

    pub fn run(&self) -> i16 {
        let taps = self.coef.len();
        let mut acc: i64 = 0;
        for t in 0..taps {
            let idx = (self.head + 1 + t) % taps;
            let prod = self.state[idx] as i64 * self.coef[t] as i64;
            acc = sat_symmetric(acc + prod, 32);
        }
        sat_round_shr_s16(acc, self.shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_fir_32_passes_through_delayed() {
        let mut f = FilterFirS32::new(vec![1 << 30, 0, 0], 0);
        f.add_sample(5);
        f.add_sample(7);
        f.add_sample(11);
        assert_eq!(f.run(), 11);
    }

    #[test]
    fn moving_average_fir_16_smooths() {
        let third = (1i16 << 14) / 3; // ~1/3 in Q14; sum(|coef|) well under 2^16
        let mut f = FilterFirS16::new(vec![third, third, third], 14);
        f.add_sample(100);
        f.add_sample(100);
        f.add_sample(100);
        let out = f.run();
        assert!((out - 100).abs() <= 2);
    }
}
