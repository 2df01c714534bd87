//! Fast Fourier Transform: radix-4 complex kernels ([`dit`], [`dif`]),
//! their shared support routines ([`util`]), the real-signal BFP entry
//! points ([`real`]), and an `f32` convenience layer ([`float`]). Grounded
//! in `original_source/.../fft/fft_bfp.c` and
//! `original_source/.../arch/ref/fft/{fft_dit,fft_dif,fft_util}.c`.

pub mod dif;
pub mod dit;
pub mod float;
pub mod real;
pub mod twiddle;
pub mod util;

use crate::bfp::BfpComplex32;
use crate::error::BfpResult;
use crate::vect::complex_s32;

use twiddle::MAX_FFT_LEN;

fn check_len(n: usize) -> BfpResult<()> {
    if n < 4 || n > MAX_FFT_LEN || !n.is_power_of_two() {
        return Err(crate::error::BfpError::InvalidFftLength(n, MAX_FFT_LEN));
    }
    Ok(())
}

/// Forward complex FFT in place, the BFP-level entry point for a signal
/// that is already complex (spec §4.5.1). Shifts `x` to 2 bits of
/// headroom, bit-reverses, then runs the DIT transform — matching
/// `bfp_fft_forward_complex`.
pub fn forward_complex(x: &mut BfpComplex32) -> BfpResult<()> {
    check_len(x.len())?;

    let shr = (2 - x.hr as i32).max(0);
    if shr != 0 {
        let src: Vec<_> = x.data.to_vec();
        x.hr = complex_s32::shr(&mut x.data, &src, shr);
        x.exp += shr;
    }

    util::bit_reversal(&mut x.data);
    let (hr, exp) = dit::forward(&mut x.data, x.hr, x.exp);
    x.hr = hr;
    x.exp = exp;
    Ok(())
}

/// Inverse complex FFT in place. Matches `bfp_fft_inverse_complex`.
pub fn inverse_complex(x: &mut BfpComplex32) -> BfpResult<()> {
    check_len(x.len())?;

    let shr = (2 - x.hr as i32).max(0);
    if shr != 0 {
        let src: Vec<_> = x.data.to_vec();
        x.hr = complex_s32::shr(&mut x.data, &src, shr);
        x.exp += shr;
    }

    util::bit_reversal(&mut x.data);
    let (hr, exp) = dit::inverse(&mut x.data, x.hr, x.exp);
    x.hr = hr;
    x.exp = exp;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::ComplexS32;

    #[test]
    fn forward_complex_of_impulse_is_flat() {
        let mut data = [
            ComplexS32::new(1 << 20, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
            ComplexS32::new(0, 0),
        ];
        let mut x = BfpComplex32::init(&mut data, 0, true);
        forward_complex(&mut x).unwrap();
        for c in x.data.iter() {
            assert_eq!(c.re, x.data[0].re);
            assert_eq!(c.im, 0);
        }
    }
}
