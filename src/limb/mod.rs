//! Definitions and arithmetic primitives related to [LimbType], the basic storage unit of the
//! fixed-width multiprecision integers, and to its two digit halves.

/// The basic storage unit of a multiprecision integer word buffer.
///
/// # Notes
///
/// The multiplication and division algorithms operate on base-2<sup>16</sup> digits, i.e. on
/// the two halves of a [`LimbType`]: a digit times a digit plus two more digits always fits a
/// single [`LimbType`], so no double precision arithmetic is needed anywhere.
///
pub type LimbType = u32;

/// The bit width of a [`LimbType`].
pub const LIMB_BITS: u32 = LimbType::BITS;

/// A base-2<sup>16</sup> digit, i.e. half a [`LimbType`].
pub type DigitType = u16;

/// The bit width of a [`DigitType`].
pub const DIGIT_BITS: u32 = DigitType::BITS;
/// Mask selecting the low digit of a [`LimbType`].
pub const DIGIT_MASK: LimbType = lsb_mask_l(DIGIT_BITS);
/// The number of digits stored in a single [`LimbType`].
pub const DIGITS_PER_LIMB: usize = (LIMB_BITS / DIGIT_BITS) as usize;

pub const fn lsb_mask_l(nbits: u32) -> LimbType {
    debug_assert!(nbits <= LIMB_BITS);
    // (1 << nbits) - 1 would overflow the shift for nbits == LIMB_BITS.
    if nbits == LIMB_BITS {
        !0
    } else {
        (1 << nbits) - 1
    }
}

#[test]
fn test_lsb_mask_l() {
    for i in 0..LIMB_BITS {
        let mask = lsb_mask_l(i);
        assert_eq!(mask, (1 << i) - 1);
    }
    assert_eq!(lsb_mask_l(LIMB_BITS), !0);
}

/// Construct a limb from its high and low digits.
///
/// # Arguments
///
/// * `vh` - the high digit.
/// * `vl` - the low digit.
///
pub fn digits_to_l(vh: LimbType, vl: LimbType) -> LimbType {
    debug_assert!(vh <= DIGIT_MASK && vl <= DIGIT_MASK);
    vh << DIGIT_BITS | vl
}

#[test]
fn test_digits_to_l() {
    assert_eq!(digits_to_l(0, 0), 0);
    assert_eq!(digits_to_l(DIGIT_MASK, DIGIT_MASK), !0);
    assert_eq!(digits_to_l(0x1234, 0x5678), 0x1234_5678);
    assert_eq!(digits_to_l(DIGIT_MASK, 0), 0xffff_0000);
}

/// Add two limbs.
///
/// Returns a pair of carry and the [`LimbType::BITS`] lower bits of the sum.
///
/// # Arguments:
///
/// * `v0` - first operand
/// * `v1` - second operand
///
pub fn add_l_l(v0: LimbType, v1: LimbType) -> (LimbType, LimbType) {
    let (r, carry) = v0.overflowing_add(v1);
    (carry as LimbType, r)
}

#[test]
fn test_add_l_l() {
    assert_eq!(add_l_l(0, 0), (0, 0));
    assert_eq!(add_l_l(1, 0), (0, 1));
    assert_eq!(add_l_l(!0 - 1, 1), (0, !0));
    assert_eq!(add_l_l(!0, 1), (1, 0));
    assert_eq!(add_l_l(1 << (LIMB_BITS - 1), 1 << (LIMB_BITS - 1)), (1, 0));
    assert_eq!(add_l_l(!0, 1 << (LIMB_BITS - 1)), (1, lsb_mask_l(LIMB_BITS - 1)));
    assert_eq!(add_l_l(!0, !0), (1, !0 - 1));
}

pub fn add_l_l_c(v0: LimbType, v1: LimbType, carry: LimbType) -> (LimbType, LimbType) {
    debug_assert!(carry <= 1);
    let (carry0, r) = add_l_l(v0, carry);
    let (carry1, r) = add_l_l(r, v1);
    let carry = carry0 + carry1;
    debug_assert!(carry <= 1);
    (carry, r)
}

/// Subtract two limbs.
///
/// Returns a pair of borrow and the [`LimbType::BITS`] lower bits of the difference.
///
/// # Arguments:
///
/// * `v0` - first operand
/// * `v1` - second operand
///
pub fn sub_l_l(v0: LimbType, v1: LimbType) -> (LimbType, LimbType) {
    let (r, borrow) = v0.overflowing_sub(v1);
    (borrow as LimbType, r)
}

#[test]
fn test_sub_l_l() {
    assert_eq!(sub_l_l(0, 0), (0, 0));
    assert_eq!(sub_l_l(1, 0), (0, 1));
    assert_eq!(sub_l_l(0, 1), (1, !0));
    assert_eq!(sub_l_l(1 << (LIMB_BITS - 1), 1 << (LIMB_BITS - 1)), (0, 0));
    assert_eq!(sub_l_l(0, 1 << (LIMB_BITS - 1)), (1, 1 << (LIMB_BITS - 1)));
    assert_eq!(sub_l_l(1 << (LIMB_BITS - 1), (1 << (LIMB_BITS - 1)) + 1), (1, !0));
}

pub fn sub_l_l_b(v0: LimbType, v1: LimbType, borrow: LimbType) -> (LimbType, LimbType) {
    debug_assert!(borrow <= 1);
    let (borrow0, r) = sub_l_l(v0, borrow);
    let (borrow1, r) = sub_l_l(r, v1);
    let borrow = borrow0 + borrow1;
    debug_assert!(borrow <= 1);
    (borrow, r)
}

/// Multiply two digits and accumulate another digit and a digit carry.
///
/// Returns a pair of the new digit carry and the resulting digit. Computes `op0 + op10 * op11 +
/// carry`, which can't overflow a [`LimbType`] as long as all inputs are digits: (b - 1)^2 + 2 *
/// (b - 1) = b^2 - 1.
///
pub fn mul_add_d_d_d_c(
    op0: LimbType,
    op10: LimbType,
    op11: LimbType,
    carry: LimbType,
) -> (LimbType, LimbType) {
    debug_assert!(op0 <= DIGIT_MASK && op10 <= DIGIT_MASK);
    debug_assert!(op11 <= DIGIT_MASK && carry <= DIGIT_MASK);
    let t = op10 * op11 + op0 + carry;
    (t >> DIGIT_BITS, t & DIGIT_MASK)
}

#[test]
fn test_mul_add_d_d_d_c() {
    assert_eq!(mul_add_d_d_d_c(0, 0, 0, 0), (0, 0));
    assert_eq!(mul_add_d_d_d_c(1, 2, 3, 4), (0, 11));
    assert_eq!(mul_add_d_d_d_c(0, 0x100, 0x100, 0), (1, 0));
    assert_eq!(
        mul_add_d_d_d_c(DIGIT_MASK, DIGIT_MASK, DIGIT_MASK, DIGIT_MASK),
        (DIGIT_MASK, DIGIT_MASK)
    );
}

/// Count the leading zero bits of a limb.
///
/// Unlike a bare count-leading-zeros CPU instruction, this is defined for zero, for which
/// [`LIMB_BITS`] is returned.
pub fn leading_zeros_l(v: LimbType) -> u32 {
    if v == 0 {
        return LIMB_BITS;
    }
    v.leading_zeros()
}

// Position of MSB + 1, if any, zero otherwise.
pub fn find_last_set_bit_l(v: LimbType) -> usize {
    (LIMB_BITS - leading_zeros_l(v)) as usize
}

#[test]
fn test_find_last_set_bit_l() {
    assert_eq!(leading_zeros_l(0), LIMB_BITS);
    assert_eq!(find_last_set_bit_l(0), 0);

    for i in 0..LIMB_BITS as usize {
        let v = 1 << i;
        assert_eq!(find_last_set_bit_l(v), i + 1);
        assert_eq!(find_last_set_bit_l(v - 1), i);
        assert_eq!(find_last_set_bit_l(v | 1), i + 1);
    }
    assert_eq!(find_last_set_bit_l(!0), LIMB_BITS as usize);
}
