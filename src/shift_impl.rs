//! Implementation of multiprecision integer logical shift primitives.

use super::limb::{LimbType, LIMB_BITS};
use super::words_buffer::{MpWordsCommon, MpWordsMut};

fn fill_l(fill: bool) -> LimbType {
    if fill {
        !0
    } else {
        0
    }
}

// Words beyond either end of op0 read as the fill pattern.
fn load_w_or_fill<T0: MpWordsCommon>(op0: &T0, i: Option<usize>, fill: LimbType) -> LimbType {
    match i {
        Some(i) if i < op0.nwords() => op0.load_w(i),
        _ => fill,
    }
}

/// Shift a multiprecision integer left in place.
///
/// The vacated low bits are all set to `fill`. A `distance` larger than the integer's width is
/// equivalent to shifting by exactly the width, i.e. the result will have all bits set to `fill`.
///
/// # Arguments
///
/// * `op0` - The multiprecision integer to shift.
/// * `distance` - The shift distance in bits.
/// * `fill` - The value to shift in from the right.
///
pub fn lshift_mp<T0: MpWordsMut>(op0: &mut T0, distance: usize, fill: bool) {
    let distance = distance.min(op0.width());
    let fill = fill_l(fill);
    let distance_nwords = distance / LIMB_BITS as usize;
    let lshift = (distance % LIMB_BITS as usize) as u32;

    // Going from most to least significant, the source words are never above the destination.
    let mut dst_word_index = op0.nwords();
    while dst_word_index > 0 {
        dst_word_index -= 1;
        let src_high_index = dst_word_index.checked_sub(distance_nwords);
        let src_high = load_w_or_fill(op0, src_high_index, fill);
        let dst_val = if lshift != 0 {
            let src_low_index = src_high_index.and_then(|i| i.checked_sub(1));
            let src_low = load_w_or_fill(op0, src_low_index, fill);
            src_high << lshift | src_low >> (LIMB_BITS - lshift)
        } else {
            src_high
        };
        op0.store_w(dst_word_index, dst_val);
    }

    op0.refresh_nsb();
}

/// Shift a multiprecision integer right in place.
///
/// The vacated high bits are all set to `fill`. A `distance` larger than the integer's width is
/// equivalent to shifting by exactly the width, i.e. the result will have all bits set to `fill`.
///
/// # Arguments
///
/// * `op0` - The multiprecision integer to shift.
/// * `distance` - The shift distance in bits.
/// * `fill` - The value to shift in from the left.
///
pub fn rshift_mp<T0: MpWordsMut>(op0: &mut T0, distance: usize, fill: bool) {
    let distance = distance.min(op0.width());
    let fill = fill_l(fill);
    let distance_nwords = distance / LIMB_BITS as usize;
    let rshift = (distance % LIMB_BITS as usize) as u32;

    // Going from least to most significant, the source words are never below the destination.
    for dst_word_index in 0..op0.nwords() {
        let src_low_index = dst_word_index + distance_nwords;
        let src_low = load_w_or_fill(op0, Some(src_low_index), fill);
        let dst_val = if rshift != 0 {
            let src_high = load_w_or_fill(op0, Some(src_low_index + 1), fill);
            src_low >> rshift | src_high << (LIMB_BITS - rshift)
        } else {
            src_low
        };
        op0.store_w(dst_word_index, dst_val);
    }

    op0.refresh_nsb();
}

#[cfg(test)]
fn tst_fill_words_with_seq(words: &mut [LimbType]) {
    // Bytes counting up from 1, least significant first.
    for (k, w) in words.iter_mut().enumerate() {
        let first = (4 * k + 1) as LimbType;
        *w = first | (first + 1) << 8 | (first + 2) << 16 | (first + 3) << 24;
    }
}

#[test]
fn test_lshift_mp() {
    use super::test_helpers::{tst_words_from_u128, tst_words_to_u128};
    use super::words_buffer::{significant_bits_mp, MpMutWords};

    let mut words = tst_mk_words!(4);
    tst_fill_words_with_seq(&mut words);
    let value = tst_words_to_u128(&words);
    for distance in 0..4 * LIMB_BITS as usize + 3 {
        for fill in [false, true] {
            let mut op0_words = tst_words_from_u128(4, value);
            let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
            lshift_mp(&mut op0, distance, fill);

            let expected = if distance >= 128 {
                if fill {
                    !0
                } else {
                    0
                }
            } else if distance == 0 {
                value
            } else {
                let fill_bits = if fill { (1u128 << distance) - 1 } else { 0 };
                value << distance | fill_bits
            };
            assert_eq!(tst_words_to_u128(op0.words()), expected);
            assert_eq!(op0.nsb(), significant_bits_mp(&op0));
        }
    }

    let mut op0_words = tst_mk_words!(2);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    op0.store_w(0, 0x8000_0001);
    op0.refresh_nsb();
    lshift_mp(&mut op0, 1, false);
    assert_eq!(op0.words(), &[2, 1]);
    assert_eq!(op0.nsb(), 33);
    lshift_mp(&mut op0, 32, true);
    assert_eq!(op0.words(), &[!0, 2]);
    assert_eq!(op0.nsb(), 34);
}

#[test]
fn test_rshift_mp() {
    use super::test_helpers::{tst_words_from_u128, tst_words_to_u128};
    use super::words_buffer::{significant_bits_mp, MpMutWords};

    let mut words = tst_mk_words!(4);
    tst_fill_words_with_seq(&mut words);
    let value = tst_words_to_u128(&words);
    for distance in 0..4 * LIMB_BITS as usize + 3 {
        for fill in [false, true] {
            let mut op0_words = tst_words_from_u128(4, value);
            let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
            rshift_mp(&mut op0, distance, fill);

            let expected = if distance >= 128 {
                if fill {
                    !0
                } else {
                    0
                }
            } else if distance == 0 {
                value
            } else {
                let fill_bits = if fill { !0u128 << (128 - distance) } else { 0 };
                value >> distance | fill_bits
            };
            assert_eq!(tst_words_to_u128(op0.words()), expected);
            assert_eq!(op0.nsb(), significant_bits_mp(&op0));
        }
    }

    let mut op0_words = tst_mk_words!(2);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    op0.store_w(1, 0x8000_0001);
    op0.refresh_nsb();
    rshift_mp(&mut op0, 1, false);
    assert_eq!(op0.words(), &[0x8000_0000, 0x4000_0000]);
    assert_eq!(op0.nsb(), 63);
    rshift_mp(&mut op0, 33, true);
    assert_eq!(op0.words(), &[0xa000_0000, !0]);
    assert_eq!(op0.nsb(), 64);
}

#[test]
fn test_shift_saturation() {
    use super::words_buffer::MpMutWords;

    for nwords in 1..4 {
        for distance in [nwords * LIMB_BITS as usize, nwords * LIMB_BITS as usize + 1, usize::MAX] {
            let mut op0_words = tst_mk_words!(nwords);
            op0_words[0] = 0x1234_5678;
            let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
            lshift_mp(&mut op0, distance, true);
            assert!(op0.words().iter().all(|w| *w == !0));
            assert_eq!(op0.nsb(), op0.width());
            rshift_mp(&mut op0, distance, false);
            assert!(op0.words().iter().all(|w| *w == 0));
            assert_eq!(op0.nsb(), 0);
            rshift_mp(&mut op0, distance, true);
            assert_eq!(op0.nsb(), op0.width());
            lshift_mp(&mut op0, distance, false);
            assert_eq!(op0.nsb(), 0);
        }
    }
}

#[test]
fn test_shift_roundtrip() {
    use super::cmp_impl::eq_mp_mp;
    use super::words_buffer::{MpMutWords, MpWords};

    let mut words = tst_mk_words!(3);
    tst_fill_words_with_seq(&mut words);
    words[2] &= 0x0000_ffff;
    let orig = MpWords::from_words(&words).unwrap();
    let headroom = orig.width() - orig.nsb();
    for distance in 0..headroom + 1 {
        let mut op0_words = words.clone();
        let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
        lshift_mp(&mut op0, distance, false);
        assert_eq!(op0.nsb(), orig.nsb() + distance);
        rshift_mp(&mut op0, distance, false);
        assert!(eq_mp_mp(&op0, &orig));
    }
}
