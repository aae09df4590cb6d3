//! Implementation of multiprecision integer addition related primitives.

use super::limb::{add_l_l_c, sub_l_l_b, LimbType};
use super::words_buffer::{MpWordsCommon, MpWordsMut};

/// Add two multiprecision integers.
///
/// The first operand's contents will be replaced by the resulting sum, truncated to its width,
/// and the carry, if any, returned from the function. `op0`'s cached significant bit count gets
/// updated.
///
/// # Arguments:
///
/// * `op0` - The first input addend. It will be overwritten by the resulting sum.
/// * `op1` - The second input addend. It may be wider than `op0`, but any of its words beyond
///   `op0`'s width must be zero.
///
pub fn add_mp_mp<T0: MpWordsMut, T1: MpWordsCommon>(op0: &mut T0, op1: &T1) -> LimbType {
    let op0_nwords = op0.nwords();
    let op1_nwords = op1.nwords();
    debug_assert!((op0_nwords..op1_nwords).all(|i| op1.load_w(i) == 0));
    let common_nwords = op0_nwords.min(op1_nwords);

    let mut carry = 0;
    for i in 0..common_nwords {
        let mut op0_val = op0.load_w(i);
        (carry, op0_val) = add_l_l_c(op0_val, op1.load_w(i), carry);
        op0.store_w(i, op0_val);
    }

    // Propagate the carry upwards.
    let mut i = common_nwords;
    while carry != 0 && i < op0_nwords {
        let mut op0_val = op0.load_w(i);
        (carry, op0_val) = add_l_l_c(op0_val, 0, carry);
        op0.store_w(i, op0_val);
        i += 1;
    }

    op0.refresh_nsb();
    carry
}

#[test]
fn test_add_mp_mp() {
    use super::words_buffer::{MpMutWords, MpWords};

    let mut op0_words = tst_mk_words!(2);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    op0.store_w(0, !0);
    op0.refresh_nsb();
    let op1_words: [u32; 2] = [!0, 0];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    let carry = add_mp_mp(&mut op0, &op1);
    assert_eq!(carry, 0);
    assert_eq!(op0.words(), &[!1, 1]);
    assert_eq!(op0.nsb(), 33);

    let mut op0_words = tst_mk_words!(2);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    op0.store_w(0, !0);
    op0.store_w(1, !0);
    op0.refresh_nsb();
    let op1_words: [u32; 2] = [!0, !0];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    let carry = add_mp_mp(&mut op0, &op1);
    assert_eq!(carry, 1);
    assert_eq!(op0.words(), &[!1, !0]);
    assert_eq!(op0.nsb(), 64);

    // Narrower second operand, the carry propagates through all of op0.
    let mut op0_words = tst_mk_words!(3);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    op0.store_w(0, 1);
    op0.store_w(1, !0);
    op0.store_w(2, !0);
    op0.refresh_nsb();
    let op1_words: [u32; 1] = [!0];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    let carry = add_mp_mp(&mut op0, &op1);
    assert_eq!(carry, 1);
    assert_eq!(op0.words(), &[0, 0, 0]);
    assert_eq!(op0.nsb(), 0);

    // Wider second operand with zero excess words.
    let mut op0_words = tst_mk_words!(1);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    op0.store_w(0, 2);
    op0.refresh_nsb();
    let op1_words: [u32; 3] = [3, 0, 0];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    let carry = add_mp_mp(&mut op0, &op1);
    assert_eq!(carry, 0);
    assert_eq!(op0.words(), &[5]);
    assert_eq!(op0.nsb(), 3);
}

/// Subtract two multiprecision integers.
///
/// The first operand's contents will be replaced by the resulting difference, modulo
/// 2<sup>`op0.width()`</sup>, and the borrow, if any, returned from the function. `op0`'s cached
/// significant bit count gets updated.
///
/// # Arguments:
///
/// * `op0` - The minuend. It will be overwritten by the resulting difference.
/// * `op1` - The subtrahend. It may be wider than `op0`, but any of its words beyond `op0`'s width
///   must be zero.
///
pub fn sub_mp_mp<T0: MpWordsMut, T1: MpWordsCommon>(op0: &mut T0, op1: &T1) -> LimbType {
    let op0_nwords = op0.nwords();
    let op1_nwords = op1.nwords();
    debug_assert!((op0_nwords..op1_nwords).all(|i| op1.load_w(i) == 0));
    let common_nwords = op0_nwords.min(op1_nwords);

    let mut borrow = 0;
    for i in 0..common_nwords {
        let mut op0_val = op0.load_w(i);
        (borrow, op0_val) = sub_l_l_b(op0_val, op1.load_w(i), borrow);
        op0.store_w(i, op0_val);
    }

    // Propagate the borrow upwards.
    let mut i = common_nwords;
    while borrow != 0 && i < op0_nwords {
        let mut op0_val = op0.load_w(i);
        (borrow, op0_val) = sub_l_l_b(op0_val, 0, borrow);
        op0.store_w(i, op0_val);
        i += 1;
    }

    op0.refresh_nsb();
    borrow
}

#[test]
fn test_sub_mp_mp() {
    use super::words_buffer::{MpMutWords, MpWords};

    let mut op0_words = tst_mk_words!(2);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    op0.store_w(0, !0);
    op0.refresh_nsb();
    let op1_words: [u32; 2] = [!0, 0];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    let borrow = sub_mp_mp(&mut op0, &op1);
    assert_eq!(borrow, 0);
    assert_eq!(op0.words(), &[0, 0]);
    assert_eq!(op0.nsb(), 0);

    let mut op0_words = tst_mk_words!(2);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    op0.store_w(0, !1);
    op0.store_w(1, 1);
    op0.refresh_nsb();
    let op1_words: [u32; 1] = [!0];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    let borrow = sub_mp_mp(&mut op0, &op1);
    assert_eq!(borrow, 0);
    assert_eq!(op0.words(), &[!0, 0]);
    assert_eq!(op0.nsb(), 32);

    let mut op0_words = tst_mk_words!(2);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    op0.store_w(0, !1);
    op0.refresh_nsb();
    let op1_words: [u32; 2] = [!0, 1];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    let borrow = sub_mp_mp(&mut op0, &op1);
    assert_eq!(borrow, 1);
    assert_eq!(op0.words(), &[!0, !1]);
    assert_eq!(op0.nsb(), 64);
}

#[test]
fn test_add_sub_mp_mp_inverse() {
    use super::cmp_impl::eq_mp_mp;
    use super::test_helpers::tst_words_from_u128;
    use super::words_buffer::{MpMutWords, MpWords};

    let values: [u128; 6] = [
        0,
        1,
        0xffff_ffff,
        0x1_0000_0000,
        0x8000_0000_0000_0000_ffff_0000,
        !0,
    ];
    for a in values {
        for b in values {
            let orig_words = tst_words_from_u128(4, a);
            let orig = MpWords::from_words(&orig_words).unwrap();
            let op1_words = tst_words_from_u128(4, b);
            let op1 = MpWords::from_words(&op1_words).unwrap();
            let mut op0_words = orig_words.clone();
            let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
            let carry = add_mp_mp(&mut op0, &op1);
            assert_eq!(carry != 0, a.checked_add(b).is_none());
            let borrow = sub_mp_mp(&mut op0, &op1);
            assert_eq!(borrow, carry);
            assert!(eq_mp_mp(&op0, &orig));
        }
    }
}
