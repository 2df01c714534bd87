//! # bfp_dsp
//!
//! A block floating-point (BFP) fixed-point DSP engine: vectors of
//! integer mantissas sharing one exponent and a tracked headroom count,
//! the element-wise kernels and "prepare" functions that keep them from
//! overflowing, a radix-4 FFT, short FIR convolution, and stream-style
//! FIR/biquad filters.
//!
//! ## Layout
//!
//! - [`scalar`] — scalar types (`Exp`, `Headroom`, `ComplexS32`, ...) and
//!   the saturating arithmetic every kernel reduces to.
//! - [`vect`] — element-wise vector kernels over raw mantissa slices.
//! - [`prepare`] — pure functions computing the output exponent and
//!   per-operand shifts a kernel call needs.
//! - [`bfp`] — the `BfpReal16`/`BfpReal32`/`BfpComplex16`/`BfpComplex32`
//!   wrapper structs that tie a mantissa buffer to `(exp, hr)` and expose
//!   `prepare`-then-kernel operations.
//! - [`fft`] — radix-4 decimation-in-time/-frequency complex FFTs, the
//!   real-signal (mono/stereo) entry points built on them, and an `f32`
//!   convenience layer.
//! - [`gradient_constraint`] — zeroes the tail of a real-FFT spectrum's
//!   time-domain signal without leaving the frequency domain.
//! - [`convolve`] — short (`<= 7`-tap) fixed-point FIR convolution.
//! - [`filter`] — stateful circular-buffer FIR and biquad filters.
//! - [`error`] — the few fallible entry points' error type.
//!
//! Everything below the `bfp` wrapper layer is a total function: kernels
//! and prepare functions cannot fail, and contract violations (mismatched
//! lengths, zero-length buffers reaching a kernel directly) are
//! `debug_assert!`-only. The wrapper layer's `alloc` constructors and the
//! FFT's length validation are the library's only `Result`-returning
//! surface (spec'd in [`error::BfpError`]).

pub mod bfp;
pub mod convolve;
pub mod error;
pub mod fft;
pub mod filter;
pub mod gradient_constraint;
pub mod prepare;
pub mod scalar;
pub mod vect;

pub use bfp::{BfpComplex16, BfpComplex32, BfpReal16, BfpReal32};
pub use error::{BfpError, BfpResult};
pub use scalar::{ComplexS16, ComplexS32, Exp, Headroom, Shl, Shr};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real32_add_scenario_matches_top_level_reexports() {
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
}
