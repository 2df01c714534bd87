//! Short fixed-point FIR convolution with odd tap counts up to 7 (spec
//! §4.7). Ported from `original_source/.../vect/convolve.c`; the per-tap
//! compute loop itself (`vect_s32_convolve_valid`) is assembly-only in the
//! retrieved source, so its body here follows the formula spec §4.7
//! states directly: `out[k] = sum_t sig_in[k+t] * filter[t]` at Q2.30.

use crate::scalar::{sat_round_shr_s32, Headroom};
use crate::vect::s32;

/// Padding applied by [`convolve_same`] to the first/last `filter_taps/2`
/// output samples, which [`convolve_valid`] alone can't produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadMode {
    Zero,
    Extend,
    Reflect,
}

/// Convolves `sig_in` (length `n`) with `filter_q30` (`filter_taps` Q2.30
/// coefficients, odd and `<= 7`), writing `n - filter_taps + 1` samples to
/// `out`. Returns the output's headroom.
pub fn convolve_valid(out: &mut [i32], sig_in: &[i32], filter_q30: &[i32]) -> Headroom {
    let taps = filter_q30.len();
    debug_assert!(taps % 2 == 1 && taps <= 7);
    debug_assert_eq!(out.len(), sig_in.len() - taps + 1);

    for (k, o) in out.iter_mut().enumerate() {
        let mut acc = 0i64;
        for (t, &c) in filter_q30.iter().enumerate() {
            acc += sig_in[k + t] as i64 * c as i64;
        }
        *o = sat_round_shr_s32(acc, 30);
    }
    s32::headroom(out)
}

fn pad_reflect(buf: &mut [i32], p: usize, sig_in: &[i32], right: bool) {
    let n = sig_in.len();
    for i in 0..p {
        buf[i] = if !right { sig_in[p - i] } else { sig_in[n - 2 - i] };
    }
}

fn pad_constant(buf: &mut [i32], value: i32) {
    buf.fill(value);
}

/// Same-length convolution: the main body via one [`convolve_valid`] call,
/// plus head and tail runs over padded buffers to cover the `taps/2`
/// samples at each edge that the valid-mode convolution can't reach.
pub fn convolve_same(
    out: &mut [i32],
    sig_in: &[i32],
    filter_q30: &[i32],
    padding_mode: PadMode,
) -> Headroom {
    let taps = filter_q30.len();
    let p = taps / 2;
    let n = sig_in.len();
    debug_assert_eq!(out.len(), n);

    let mut res_hr = convolve_valid(&mut out[p..n - p], sig_in, filter_q30);

    let copy_count = taps + p - 1;
    let mut buf = [0i32; 13];

    for i in p..copy_count {
        buf[i] = sig_in[i - p];
    }
    match padding_mode {
        PadMode::Reflect => pad_reflect(&mut buf[..p], p, sig_in, false),
        PadMode::Extend => pad_constant(&mut buf[..p], sig_in[0]),
        PadMode::Zero => pad_constant(&mut buf[..p], 0),
    }
    let left_hr = convolve_valid(&mut out[..p], &buf[..copy_count], filter_q30);
    res_hr = res_hr.min(left_hr);

    for i in 0..taps - 1 {
        buf[i] = sig_in[n + 1 - taps + i];
    }
    match padding_mode {
        PadMode::Reflect => pad_reflect(&mut buf[taps - 1..taps - 1 + p], p, sig_in, true),
        PadMode::Extend => pad_constant(&mut buf[taps - 1..taps - 1 + p], sig_in[n - 1]),
        PadMode::Zero => pad_constant(&mut buf[taps - 1..taps - 1 + p], 0),
    }
    let right_hr = convolve_valid(&mut out[n - p..], &buf[..copy_count], filter_q30);
    res_hr.min(right_hr)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_Q30: i32 = 1 << 30;

    #[test]
    fn identity_filter_is_passthrough() {
        let sig = [10, -20, 30, -40, 50];
        let filter = [ONE_Q30];
        let mut out = [0i32; 5];
        convolve_valid(&mut out, &sig, &filter);
        assert_eq!(out, sig);
    }

    #[test]
    fn three_tap_average_smooths() {
        let sig = [0, 0, 1 << 20, 0, 0];
        let third = ONE_Q30 / 3;
        let filter = [third, third, third];
        let mut out = [0i32; 3];
        convolve_valid(&mut out, &sig, &filter);
        assert!(out[0] > 0 && out[1] > 0 && out[2] > 0);
        assert!(out[1] >= out[0] && out[1] >= out[2]);
    }

    #[test]
    fn same_mode_preserves_length_with_zero_padding() {
        let sig = [1 << 16, 2 << 16, 3 << 16, 4 << 16, 5 << 16];
        let filter = [ONE_Q30 / 3, ONE_Q30 / 3, ONE_Q30 / 3];
        let mut out = [0i32; 5];
        convolve_same(&mut out, &sig, &filter, PadMode::Zero);
        assert_eq!(out.len(), sig.len());
    }
}
