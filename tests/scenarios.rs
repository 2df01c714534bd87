//! The six literal end-to-end scenarios from spec §8, run against the
//! public API rather than as unit tests beside the implementation, so
//! they exercise the crate the way a downstream caller would.

use bfp_dsp::bfp::{BfpComplex32, BfpReal16, BfpReal32};
use bfp_dsp::fft;
use bfp_dsp::gradient_constraint::gradient_constraint_mono;
use bfp_dsp::scalar::transcendental::q24_sin;
use bfp_dsp::scalar::ComplexS32;

#[test]
fn scenario_1_add_exponents() {
    let mut bd = [1i32, 1, 1, 1];
    let mut cd = [2i32, 2, 2, 2];
    let b = BfpReal32::init(&mut bd, 0, true);
    let c = BfpReal32::init(&mut cd, 1, true);
    let mut out = [0i32; 4];
    let mut a = BfpReal32::init(&mut out, 0, false);
    a.add(&b, &c);

    for &v in a.data.iter() {
        let real = v as f64 * 2f64.powi(a.exp);
        assert!((real - 5.0).abs() <= 1.0);
    }
    assert_eq!(a.hr, bfp_dsp::vect::s32::headroom(&a.data));
}

#[test]
fn scenario_2_overflow_avoiding_add() {
    let mut bd = [i32::from(i16::MAX)];
    let mut cd = [i32::from(i16::MAX)];
    let b = BfpReal32::init(&mut bd, 0, true);
    let c = BfpReal32::init(&mut cd, 0, true);
    let mut out = [0i32];
    let mut a = BfpReal32::init(&mut out, 0, false);
    a.add(&b, &c);

    assert_eq!(a.data[0], i32::from(i16::MAX));
    assert_eq!(a.exp, 1);
}

#[test]
fn scenario_3_symmetric_abs() {
    let mut bd = [i16::MIN, 1, -3, 5];
    let b = BfpReal16::init(&mut bd, 0, true);
    let mut out = [0i16; 4];
    let mut a = BfpReal16::init(&mut out, 0, false);
    a.abs(&b);

    assert_eq!(a.data.to_vec(), vec![i16::MAX, 1, 3, 5]);
    assert_eq!(a.exp, 0);
}

#[test]
fn scenario_4_fft_round_trip_128_point() {
    const N: usize = 128;
    // deterministic pseudo-random signal, no external rng dependency
    let mut state: u32 = 0x1234_5678;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    let original: Vec<i32> = (0..N)
        .map(|_| (next() as i32) >> 1) // keep well inside i32 range
        .collect();

    let exp = -31;
    let mut xd = original.clone();
    let x = BfpReal32::init(&mut xd, exp, true);

    let mut spec_buf = vec![ComplexS32::default(); N / 2];
    let mut spectrum = BfpComplex32::init(&mut spec_buf, 0, false);
    fft::real::forward_mono(&x, &mut spectrum).unwrap();

    let mut rt = vec![0i32; N];
    let mut out = BfpReal32::init(&mut rt, 0, false);
    fft::real::inverse_mono(&spectrum, &mut out).unwrap();

    for (&got, &want) in out.data.iter().zip(original.iter()) {
        let got_real = got as f64 * 2f64.powi(out.exp);
        let want_real = want as f64 * 2f64.powi(exp);
        let bound = 20.0 * 2f64.powi(exp);
        assert!(
            (got_real - want_real).abs() <= bound.max(want_real.abs() * 1e-3),
            "got={got_real} want={want_real} bound={bound}"
        );
    }
}

#[test]
fn scenario_5_gradient_constraint() {
    const N: usize = 64;
    let mut state: u32 = 0xabcd_ef01;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    let original: Vec<i32> = (0..N).map(|_| (next() as i32) >> 2).collect();

    let exp = -20;
    let mut xd = original;
    let x = BfpReal32::init(&mut xd, exp, true);

    let mut spec_buf = vec![ComplexS32::default(); N / 2];
    let mut spectrum = BfpComplex32::init(&mut spec_buf, 0, false);
    fft::real::forward_mono(&x, &mut spectrum).unwrap();

    gradient_constraint_mono(&mut spectrum, 16);

    let mut rt = vec![0i32; N];
    let mut out = BfpReal32::init(&mut rt, 0, false);
    fft::real::inverse_mono(&spectrum, &mut out).unwrap();

    let bound = 25.0 * 2f64.powi(out.exp);
    for &v in out.data[16..].iter() {
        let real = v as f64 * 2f64.powi(out.exp);
        assert!(real.abs() <= bound, "tail sample {real} exceeds bound {bound}");
    }
}

#[test]
fn scenario_6_q24_sin_matches_float_sin() {
    const ULP_Q2_30: f64 = 1.0 / (1i64 << 30) as f64;
    let mut theta = i32::MIN;
    let mut checked = 0;
    // sweep the full Q24 range in a bounded number of steps.
    let step: i64 = (1i64 << 32) / 4000;
    let mut t: i64 = theta as i64;
    while t <= i32::MAX as i64 {
        theta = t as i32;
        let expected = (theta as f64 / (1i64 << 24) as f64).sin();
        let got = q24_sin(theta).to_num::<f64>();
        assert!(
            (got - expected).abs() <= 10000.0 * ULP_Q2_30,
            "theta={theta} got={got} expected={expected}"
        );
        checked += 1;
        t += step;
    }
    assert!(checked > 100);
}
