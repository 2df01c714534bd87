//! Stateful circular-buffer FIR and biquad filters (spec §4.8), the
//! simpler "stream" counterpart to the block-based BFP API. Ported from
//! `original_source/.../filter/filters.c`; the per-sample compute loops
//! (`filter_fir_s16_run`/`filter_fir_s32_run`/`filter_biquad_s32`) are
//! assembly-only in the retrieved source, so their bodies here follow
//! spec §4.8's bit-level description directly.

pub mod biquad;
pub mod fir;

pub use biquad::{BiquadSection, FilterBiquadsS32};
pub use fir::{FilterFirS16, FilterFirS32};
