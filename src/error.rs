//! Errors surfaced at the library's few fallible entry points.
//!
//! Everything else in this crate is a total function: kernels and prepare
//! functions cannot fail, and contract violations (misaligned buffers, zero
//! length reaching a kernel directly) are `debug_assert!`-only, per the
//! library's no-runtime-error-channel design on the compute path.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BfpError {
    #[error("length must be nonzero")]
    ZeroLength,
    #[error("fft length {0} is not a power of two in [4, {1}]")]
    InvalidFftLength(usize, usize),
    #[error("allocation failed")]
    AllocFailed,
}

pub type BfpResult<T> = Result<T, BfpError>;
