//! Build-time-generated Q2.30 twiddle tables. The actual arrays (and
//! `MAX_FFT_LEN`) are written to `OUT_DIR/twiddle_tables.rs` by `build.rs`;
//! this module just gives them a stable path and the lookup helpers that
//! translate "which stage of which transform length" into a table offset,
//! mirroring `xmath_fft_lut.h`'s `XMATH_DIT_REAL_FFT_LUT`/
//! `XMATH_DIF_FFT_LUT` macros.

include!(concat!(env!("OUT_DIR"), "/twiddle_tables.rs"));

/// Offset of the DIF table for a transform of length `n` (spec §4.5.1:
/// "twiddle pointer advances forward for forward DIF"). Ported from
/// `XMATH_DIF_FFT_LUT(N) = &xmath_dif_fft_lut[MAX_DIF_FFT_LEN - N]`.
pub fn dif_offset(n: usize) -> usize {
    debug_assert!(n >= 4 && n <= MAX_FFT_LEN);
    MAX_FFT_LEN - n
}

/// Offset of the mono real-FFT recombination block for a transform of
/// length `n` (`n >= 16`), sized `n/4`.
pub fn mono_adjust_offset(n: usize) -> usize {
    debug_assert!(n >= 16 && n <= MAX_FFT_LEN);
    n / 4 - 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dit_table_starts_with_unity() {
        // stage b=4's first twiddle is always e^0 = (1,0) in Q2.30.
        assert_eq!(DIT_TWIDDLES[0].re, 1 << 30);
        assert_eq!(DIT_TWIDDLES[0].im, 0);
    }

    #[test]
    fn dif_offset_is_within_bounds() {
        assert_eq!(dif_offset(MAX_FFT_LEN), 0);
        assert!(dif_offset(4) < DIF_TWIDDLES.len());
    }

    #[test]
    fn mono_adjust_offset_is_within_bounds() {
        assert_eq!(mono_adjust_offset(16), 0);
        assert!(mono_adjust_offset(32) < MONO_ADJUST_TWIDDLES.len());
    }
}
