//! VPU-style vector kernels: element-wise add/sub/mul/scale/shift/clip/
//! rect/abs/min/max/dot/sum over {16-bit, 32-bit} x {real, complex}, plus
//! headroom scan and split-accumulator chunk primitives. Every kernel is
//! total (spec §4.1.1): it saturates rather than erroring, and its only
//! precondition is non-zero, length-matched slices, checked with
//! `debug_assert!` at the wrapper layer.

pub mod chunk;
pub mod complex_s16;
pub mod complex_s32;
pub mod kernel;
pub mod s16;
pub mod s32;

pub use kernel::VectorKernel;
