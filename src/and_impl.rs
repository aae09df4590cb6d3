//! Implementation of multiprecision integer bitwise masking.

use super::words_buffer::{MpWordsCommon, MpWordsMut};

/// Bitwise AND a multiprecision integer with a mask in place.
///
/// Only the words common to both operands take part: if `mask` is narrower than `op0`, then
/// `op0`'s words beyond `mask`'s width are left alone rather than being cleared. Excess words of a
/// wider `mask` are ignored.
///
/// # Arguments
///
/// * `op0` - The multiprecision integer to mask.
/// * `mask` - The mask to apply.
///
pub fn and_mp_mp<T0: MpWordsMut, T1: MpWordsCommon>(op0: &mut T0, mask: &T1) {
    let common_nwords = op0.nwords().min(mask.nwords());
    for i in 0..common_nwords {
        let op0_val = op0.load_w(i);
        op0.store_w(i, op0_val & mask.load_w(i));
    }
    op0.refresh_nsb();
}

#[test]
fn test_and_mp_mp() {
    use super::words_buffer::{MpMutWords, MpWords};

    let mut op0_words = tst_mk_words!(3);
    op0_words.copy_from_slice(&[0x1234_5678, 0x9abc_def0, 0x0fed_cba9]);
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();

    let mask_words: [u32; 3] = [!0, !0, !0];
    let mask = MpWords::from_words(&mask_words).unwrap();
    and_mp_mp(&mut op0, &mask);
    assert_eq!(op0.words(), &[0x1234_5678, 0x9abc_def0, 0x0fed_cba9]);
    assert_eq!(op0.nsb(), 92);

    let mask_words: [u32; 3] = [0x0000_ffff, 0xff00_ff00, 0xffff_0000];
    let mask = MpWords::from_words(&mask_words).unwrap();
    and_mp_mp(&mut op0, &mask);
    assert_eq!(op0.words(), &[0x0000_5678, 0x9a00_de00, 0x0fed_0000]);
    assert_eq!(op0.nsb(), 92);

    // A narrower mask leaves the excess high words alone.
    let mask_words: [u32; 1] = [0];
    let mask = MpWords::from_words(&mask_words).unwrap();
    and_mp_mp(&mut op0, &mask);
    assert_eq!(op0.words(), &[0, 0x9a00_de00, 0x0fed_0000]);
    assert_eq!(op0.nsb(), 92);

    let mask_words: [u32; 3] = [!0, !0, 0];
    let mask = MpWords::from_words(&mask_words).unwrap();
    and_mp_mp(&mut op0, &mask);
    assert_eq!(op0.words(), &[0, 0x9a00_de00, 0]);
    assert_eq!(op0.nsb(), 64);

    // A wider mask's excess words don't matter.
    let mut op0_words = tst_mk_words!(1);
    op0_words[0] = 0xff;
    let mut op0 = MpMutWords::from_words(&mut op0_words).unwrap();
    let mask_words: [u32; 2] = [0x0f, !0];
    let mask = MpWords::from_words(&mask_words).unwrap();
    and_mp_mp(&mut op0, &mask);
    assert_eq!(op0.words(), &[0x0f]);
    assert_eq!(op0.nsb(), 4);

    let mask_words: [u32; 1] = [0];
    let mask = MpWords::from_words(&mask_words).unwrap();
    and_mp_mp(&mut op0, &mask);
    assert_eq!(op0.nsb(), 0);
}
