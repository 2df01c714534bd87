//! Prepare functions: pure, data-independent helpers that, given input
//! exponents and headrooms, compute the output exponent and per-operand
//! shifts a kernel needs to avoid overflowing its symmetric range while
//! keeping headroom low. Every function here is total and branch-free
//! wherever the underlying formula allows it, and none loop over a
//! vector — the actual vector is never touched (spec §4.2). Formulas are
//! grounded in `original_source/.../vect/complex_prepare.c` and spec
//! §4.2's worked rules.

use crate::scalar::{Exp, Headroom, Shr};

/// Add/sub prepare, shared by real-16 and real-32 (and, doubled up, by
/// the complex flavors): `a_exp = max(b_exp, c_exp) - bc_hr + 1`, then
/// `b_shr`/`c_shr` fall out of the exponent difference. The `+1` reserves
/// a bit for the worst-case sum of two full-scale operands.
pub fn add_sub_prepare(
    b_exp: Exp,
    c_exp: Exp,
    b_hr: Headroom,
    c_hr: Headroom,
) -> (Exp, Shr, Shr) {
    let bc_hr = b_hr.min(c_hr) as Exp;
    let a_exp = b_exp.max(c_exp) - bc_hr + 1;
    (a_exp, a_exp - b_exp, a_exp - c_exp)
}

/// 32-bit multiply prepare: total headroom `H = b_hr + c_hr` drives a
/// `2 - H` combined right-shift (negative = left-shift), split as evenly
/// as possible between the two operands so neither is shifted further
/// than necessary.
pub fn mul_prepare_s32(
    b_exp: Exp,
    c_exp: Exp,
    b_hr: Headroom,
    c_hr: Headroom,
) -> (Exp, Shr, Shr) {
    let h = b_hr as Exp + c_hr as Exp;
    let total_shr = 2 - h;
    let b_shr = total_shr - total_shr / 2;
    let c_shr = total_shr - b_shr;
    let a_exp = b_exp + c_exp + b_shr + c_shr + 30;
    (a_exp, b_shr, c_shr)
}

/// 16-bit multiply prepare: single output shift, 32-bit intermediate
/// accumulator so no input shift is needed.
pub fn mul_prepare_s16(b_exp: Exp, c_exp: Exp, b_hr: Headroom, c_hr: Headroom) -> (Exp, Shr) {
    let h = b_hr as Exp + c_hr as Exp;
    let a_shr = (16 - h).max(0);
    let a_exp = b_exp + c_exp + a_shr;
    (a_exp, a_shr)
}

/// Complex multiply prepare: as `mul_prepare_s32`, but reserves one extra
/// bit for the `ac - bd` / `ad + bc` sums (spec §4.2 "Complex multiply").
pub fn complex_mul_prepare(
    b_exp: Exp,
    c_exp: Exp,
    b_hr: Headroom,
    c_hr: Headroom,
) -> (Exp, Shr, Shr) {
    let h = b_hr as Exp + c_hr as Exp;
    let total_shr = 3 - h;
    let b_shr = total_shr - total_shr / 2;
    let c_shr = total_shr - b_shr;
    let a_exp = b_exp + c_exp + b_shr + c_shr + 30;
    (a_exp, b_shr, c_shr)
}

/// Scale prepare: only `b` is shifted (the scalar is a compile-time-known
/// constant operand in the kernel, not a second vector), so the combined
/// headroom of `b` and the scalar drives one shift.
pub fn scale_prepare(
    b_exp: Exp,
    scalar_exp: Exp,
    b_hr: Headroom,
    scalar_hr: Headroom,
) -> (Exp, Shr) {
    let h = b_hr as Exp + scalar_hr as Exp;
    let shr = 2 - h;
    let a_exp = b_exp + scalar_exp + shr + 30;
    (a_exp, shr)
}

/// Multiply-accumulate prepare: takes the accumulator's own (exponent,
/// headroom) in addition to the product operands'. The output exponent is
/// the larger of "the product's natural exponent" and "the accumulator's
/// exponent after using up its headroom", so that neither path needs a
/// left-shift beyond what its own headroom allows.
pub fn macc_prepare(
    b_exp: Exp,
    c_exp: Exp,
    b_hr: Headroom,
    c_hr: Headroom,
    acc_exp: Exp,
    acc_hr: Headroom,
) -> (Exp, Shr, Shr, Shr) {
    let (bc_prod_exp, b_shr, c_shr) = mul_prepare_s32(b_exp, c_exp, b_hr, c_hr);
    let acc_headroom_exp = acc_exp - acc_hr as Exp + 1;
    let a_exp = bc_prod_exp.max(acc_headroom_exp);
    let acc_shr = a_exp - acc_exp;
    let extra = a_exp - bc_prod_exp;
    (a_exp, b_shr + extra, c_shr + extra, acc_shr)
}

/// 16-bit multiply-accumulate prepare: as [`macc_prepare`], but the
/// product has only one shift (its 32-bit intermediate already absorbs
/// both operands' headroom, per [`mul_prepare_s16`]).
pub fn macc_prepare_s16(
    b_exp: Exp,
    c_exp: Exp,
    b_hr: Headroom,
    c_hr: Headroom,
    acc_exp: Exp,
    acc_hr: Headroom,
) -> (Exp, Shr, Shr) {
    let (bc_prod_exp, prod_shr) = mul_prepare_s16(b_exp, c_exp, b_hr, c_hr);
    let acc_headroom_exp = acc_exp - acc_hr as Exp + 1;
    let a_exp = bc_prod_exp.max(acc_headroom_exp);
    let acc_shr = a_exp - acc_exp;
    let extra = a_exp - bc_prod_exp;
    (a_exp, prod_shr + extra, acc_shr)
}

/// 16-bit complex multiply-accumulate prepare: same accumulator-vs-product
/// exponent reconciliation as [`macc_prepare_s16`], but the product
/// reserves one extra bit for the `ac-bd`/`ad+bc` sum as
/// [`complex_mul_prepare`] does for the 32-bit case, scaled down to
/// 16-bit multiply's single-shift convention.
pub fn complex_macc_prepare_s16(
    b_exp: Exp,
    c_exp: Exp,
    b_hr: Headroom,
    c_hr: Headroom,
    acc_exp: Exp,
    acc_hr: Headroom,
) -> (Exp, Shr, Shr) {
    let h = b_hr as Exp + c_hr as Exp;
    let prod_shr = (17 - h).max(0);
    let bc_prod_exp = b_exp + c_exp + prod_shr;
    let acc_headroom_exp = acc_exp - acc_hr as Exp + 1;
    let a_exp = bc_prod_exp.max(acc_headroom_exp);
    let acc_shr = a_exp - acc_exp;
    let extra = a_exp - bc_prod_exp;
    (a_exp, prod_shr + extra, acc_shr)
}

/// Complex multiply-accumulate prepare, ported directly from
/// `vect_complex_s32_macc_prepare`: the worst-case complex product
/// (`{-2^31,-2^31} * {-2^31,-2^31}`) needs 3 bits of headroom rather than
/// the 2 bits a real product needs, so `b_shr`/`c_shr` start one bit
/// higher than `mul_prepare_s32`'s split before the accumulator's own
/// shift is folded in.
pub fn complex_macc_prepare(
    b_exp: Exp,
    c_exp: Exp,
    b_hr: Headroom,
    c_hr: Headroom,
    acc_exp: Exp,
    acc_hr: Headroom,
) -> (Exp, Shr, Shr, Shr) {
    let mut b_shr = 1 - b_hr as Exp;
    let mut c_shr = 2 - c_hr as Exp;
    let p_exp = b_exp + c_exp - b_hr as Exp - c_hr as Exp + 33;
    let d_exp = acc_exp - acc_hr as Exp + 1;
    let a_exp = d_exp.max(p_exp);
    let acc_shr = a_exp - acc_exp;
    let p_shr = a_exp - p_exp;
    b_shr += p_shr >> 1;
    c_shr += p_shr - (p_shr >> 1);
    (a_exp, b_shr, c_shr, acc_shr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_prepare_gives_room_for_worst_case_sum() {
        // Two full-scale (zero headroom) same-exponent operands: the
        // output exponent must grow by at least one bit.
        let (a_exp, b_shr, c_shr) = add_sub_prepare(0, 0, 0, 0);
        assert_eq!(a_exp, 1);
        assert_eq!(b_shr, 1);
        assert_eq!(c_shr, 1);
    }

    #[test]
    fn mul_prepare_s32_shifts_by_total_headroom_deficit() {
        let (a_exp, b_shr, c_shr) = mul_prepare_s32(0, 0, 0, 0);
        assert_eq!(b_shr + c_shr, 2);
        assert_eq!(a_exp, b_shr + c_shr + 30);
    }

    #[test]
    fn mul_prepare_s16_needs_no_shift_with_full_headroom() {
        let (a_exp, a_shr) = mul_prepare_s16(0, 0, 15, 15);
        assert_eq!(a_shr, 0);
        assert_eq!(a_exp, 0);
    }

    #[test]
    fn complex_macc_prepare_leaves_accumulator_headroom() {
        let (a_exp, _, _, acc_shr) = complex_macc_prepare(0, 0, 0, 0, 0, 31);
        // a freshly-zeroed (full-headroom) accumulator shouldn't need to
        // shift down to make room for the worst-case product.
        assert!(a_exp >= 33);
        assert_eq!(acc_shr, a_exp);
    }

    #[test]
    fn scale_prepare_is_symmetric_in_shift_direction() {
        let (_, shr_low_hr) = scale_prepare(0, 0, 0, 0);
        let (_, shr_high_hr) = scale_prepare(0, 0, 15, 15);
        assert!(shr_low_hr > shr_high_hr);
    }
}
