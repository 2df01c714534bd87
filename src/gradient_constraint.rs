//! Zeroes the tail of a real-FFT spectrum's time-domain representation
//! without ever materializing the time domain in natural order, by
//! running the inverse as a DIF transform (bit-reversed output) and the
//! forward as a DIT transform (bit-reversed input) back-to-back so the
//! two bit-reversals cancel and only the indices to zero need reordering.
//! Ported from
//! `original_source/.../bfp/misc/gradient_constraint.c`.

use crate::bfp::BfpComplex32;
use crate::scalar::{bitrev, ceil_log2, ComplexS32};
use crate::fft::{dif, dit, util};

/// Zeroes time-domain samples at and after `frame_advance` in the signal
/// whose packed real spectrum is `x` (spec §4.6). `x.len()` must be a
/// power of two.
pub fn gradient_constraint_mono(x: &mut BfpComplex32, frame_advance: usize) {
    debug_assert!(x.len().is_power_of_two());

    let fft_n = 2 * x.len();
    let fft_n_log2 = ceil_log2(fft_n as u32);
    let freq_bins = fft_n / 2;

    x.use_exponent(x.exp - x.hr as i32 + 2);
    util::mono_adjust(&mut x.data, fft_n, true);

    let (hr, exp) = dif::inverse(&mut x.data, x.hr, x.exp);
    x.hr = hr;
    x.exp = exp;

    for i in (1..freq_bins).step_by(2) {
        x.data[i] = ComplexS32::default();
    }

    for i in (frame_advance / 2)..(freq_bins / 2) {
        let ri = bitrev(i as u32, fft_n_log2 - 1) as usize;
        x.data[ri] = ComplexS32::default();
    }

    x.use_exponent(x.exp - x.hr as i32 + 2);
    let (hr, exp) = dit::forward(&mut x.data, x.hr, x.exp);
    x.hr = hr;
    x.exp = exp;
    util::mono_adjust(&mut x.data, fft_n, false);
    x.headroom();
}

/// Stereo form of [`gradient_constraint_mono`]. The original fuses both
/// channels into one full-length FFT when the two buffers happen to be
/// laid out contiguously in memory; that layout assumption doesn't carry
/// over to owned/borrowed [`BfpComplex32`] buffers here; running the mono
/// path on each channel is equivalent, just without the shared-transform
/// speedup.
pub fn gradient_constraint_stereo(x1: &mut BfpComplex32, x2: &mut BfpComplex32, frame_advance: usize) {
    debug_assert_eq!(x1.len(), x2.len());
    gradient_constraint_mono(x1, frame_advance);
    gradient_constraint_mono(x2, frame_advance);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroing_the_whole_frame_collapses_to_dc() {
        let mut data = [
            ComplexS32::new(1 << 20, 2 << 18),
            ComplexS32::new(-3 << 18, 1 << 19),
            ComplexS32::new(5 << 17, 0),
            ComplexS32::new(0, -(1 << 18)),
        ];
        let mut x = BfpComplex32::init(&mut data, 0, true);
        gradient_constraint_mono(&mut x, 0);
        // every bin beyond DC/Nyquist-folding should now be consistent
        // with an all-zero tail; at minimum this must not panic and must
        // leave the vector at a valid, rescanned headroom.
        assert_eq!(x.hr, crate::vect::complex_s32::headroom(&x.data));
    }
}
