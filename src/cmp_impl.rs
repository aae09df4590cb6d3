//! Implementation of multiprecision integer comparison primitives.

use super::words_buffer::MpWordsCommon;

/// Compare two multiprecision integers for `==`.
///
/// Evaluates to `true` iff `op0` is equal to `op1` in value. The operands may have different
/// widths, excess words of the wider one must be zero for the two to compare equal.
///
/// # Arguments
///
/// * `op0` - The first operand.
/// * `op1` - The second operand.
///
pub fn eq_mp_mp<T0: MpWordsCommon, T1: MpWordsCommon>(op0: &T0, op1: &T1) -> bool {
    let op0_nwords = op0.nwords();
    let op1_nwords = op1.nwords();
    let common_nwords = op0_nwords.min(op1_nwords);

    (0..common_nwords).all(|i| op0.load_w(i) == op1.load_w(i))
        && (common_nwords..op0_nwords).all(|i| op0.load_w(i) == 0)
        && (common_nwords..op1_nwords).all(|i| op1.load_w(i) == 0)
}

#[test]
fn test_eq_mp_mp() {
    use super::words_buffer::MpWords;

    let op0_words: [u32; 2] = [1, 0];
    let op0 = MpWords::from_words(&op0_words).unwrap();
    let op1_words: [u32; 2] = [1, 0];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    assert!(eq_mp_mp(&op0, &op1));
    let op1_words: [u32; 1] = [1];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    assert!(eq_mp_mp(&op0, &op1));
    assert!(eq_mp_mp(&op1, &op0));

    let op0_words: [u32; 2] = [1, 2];
    let op0 = MpWords::from_words(&op0_words).unwrap();
    let op1_words: [u32; 2] = [1, 2];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    assert!(eq_mp_mp(&op0, &op1));
    let op1_words: [u32; 1] = [1];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    assert!(!eq_mp_mp(&op0, &op1));
    assert!(!eq_mp_mp(&op1, &op0));

    let op0_words: [u32; 2] = [1, 0];
    let op0 = MpWords::from_words(&op0_words).unwrap();
    let op1_words: [u32; 3] = [2, 0, 0];
    let op1 = MpWords::from_words(&op1_words).unwrap();
    assert!(!eq_mp_mp(&op0, &op1));
    assert!(!eq_mp_mp(&op1, &op0));
}

/// Compare two multiprecision integers for `<=`.
///
/// Evaluates to `true` iff `op0` is less or equal than `op1` in value.
///
/// # Arguments
///
/// * `op0` - The first operand.
/// * `op1` - The second operand.
///
pub fn leq_mp_mp<T0: MpWordsCommon, T1: MpWordsCommon>(op0: &T0, op1: &T1) -> bool {
    let op0_nwords = op0.nwords();
    let op1_nwords = op1.nwords();
    let common_nwords = op0_nwords.min(op1_nwords);

    if (common_nwords..op0_nwords).any(|i| op0.load_w(i) != 0) {
        return false;
    } else if (common_nwords..op1_nwords).any(|i| op1.load_w(i) != 0) {
        return true;
    }

    let mut i = common_nwords;
    while i > 0 {
        i -= 1;
        let op0_val = op0.load_w(i);
        let op1_val = op1.load_w(i);
        if op0_val != op1_val {
            return op0_val < op1_val;
        }
    }
    true
}

/// Compare two multiprecision integers for `<`.
///
/// Evaluates to `true` iff `op0` is less than `op1` in value.
///
/// # Arguments
///
/// * `op0` - The first operand.
/// * `op1` - The second operand.
///
pub fn lt_mp_mp<T0: MpWordsCommon, T1: MpWordsCommon>(op0: &T0, op1: &T1) -> bool {
    !leq_mp_mp(op1, op0)
}

#[test]
fn test_leq_lt_mp_mp() {
    use super::words_buffer::MpWords;

    fn tst_check(op0_words: &[u32], op1_words: &[u32], expected_leq: bool, expected_lt: bool) {
        let op0 = MpWords::from_words(op0_words).unwrap();
        let op1 = MpWords::from_words(op1_words).unwrap();
        assert_eq!(leq_mp_mp(&op0, &op1), expected_leq);
        assert_eq!(lt_mp_mp(&op0, &op1), expected_lt);
    }

    tst_check(&[1, 0], &[1, 0], true, false);
    tst_check(&[1], &[1, 0], true, false);
    tst_check(&[1, 0], &[1], true, false);
    tst_check(&[1, 0], &[2, 0], true, true);
    tst_check(&[2, 0], &[1, 0], false, false);
    tst_check(&[1, 0], &[0, 1], true, true);
    tst_check(&[1], &[0, 1], true, true);
    tst_check(&[0, 1], &[1], false, false);
    tst_check(&[!0, 0], &[0, 1], true, true);
    tst_check(&[1, 1], &[1], false, false);
    tst_check(&[1, 1], &[2, 1], true, true);
    tst_check(&[0, 0, 0], &[0], true, false);
}

/// Test a multiprecision integer for zero.
///
/// Evaluates to `true` iff all of `op0`'s words are zero. Doesn't depend on the cached
/// significant bit count, which might be stale.
///
/// # Arguments
///
/// * `op0` - The operand to test.
///
pub fn is_zero_mp<T0: MpWordsCommon>(op0: &T0) -> bool {
    (0..op0.nwords()).all(|i| op0.load_w(i) == 0)
}

#[test]
fn test_is_zero_mp() {
    use super::words_buffer::MpWords;

    let op0_words: [u32; 3] = [0, 0, 0];
    let op0 = MpWords::from_words(&op0_words).unwrap();
    assert!(is_zero_mp(&op0));
    let op0_words: [u32; 3] = [0, 0, 1];
    let op0 = MpWords::from_words(&op0_words).unwrap();
    assert!(!is_zero_mp(&op0));
    let op0_words: [u32; 1] = [1];
    let op0 = MpWords::from_words(&op0_words).unwrap();
    assert!(!is_zero_mp(&op0));
}
