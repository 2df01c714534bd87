//! Trait seam separating kernel *policy* (what a kernel computes) from
//! *implementation* (scalar reference vs a future SIMD backend), replacing
//! the original's function-pointer dispatch between reference and
//! VPU-accelerated kernels (spec §9 Design Notes).

/// Marker trait for the scalar reference implementation. Every kernel
/// function in `vect::{s16,s32,complex_s16,complex_s32}` is written
/// against this; a SIMD backend would implement the same free-function
/// surface and the BFP wrappers in `bfp::*` would depend on a type
/// parameter bounded by `VectorKernel` rather than calling the scalar
/// functions directly. No such backend exists today, so `Scalar` is the
/// only implementation, but the seam is where one would plug in.
pub trait VectorKernel {
    /// Human-readable backend name, useful in benchmark labels.
    fn name() -> &'static str;
}

/// The reference (non-SIMD) kernel backend.
pub struct Scalar;

impl VectorKernel for Scalar {
    fn name() -> &'static str {
        "scalar"
    }
}
