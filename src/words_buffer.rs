//! Accessors for fixed-width multiprecision integers stored in caller-owned word buffers.
//!
//! A multiprecision integer is stored as a slice of [`LimbType`] words in little-endian word
//! order, i.e. the word at index 0 holds the least significant bits. The total bit width is
//! thereby always a multiple of [`LIMB_BITS`]. The same storage is also addressable in units of
//! base-2<sup>16</sup> digits, again least significant first: digit `2k` is the low half of word
//! `k` and digit `2k + 1` its high half.
//!
//! Each buffer view caches the number of significant bits of the value it holds, see
//! [`MpWordsCommon::nsb()`]. The arithmetic primitives rely on that cached count for sizing their
//! loops and refresh it on all of their destination operands before returning.

use super::limb::{find_last_set_bit_l, LimbType, DIGITS_PER_LIMB, DIGIT_BITS, DIGIT_MASK, LIMB_BITS};

/// Translate a digit index into the index of the containing word and the digit's shift
/// within it.
fn digit_index(i: usize) -> (usize, u32) {
    (i / DIGITS_PER_LIMB, (i % DIGITS_PER_LIMB) as u32 * DIGIT_BITS)
}

/// Error returned when attempting to view an empty slice as a multiprecision integer.
///
/// A zero bit width is not a valid fixed-width integer.
#[derive(PartialEq, Eq, Debug)]
pub struct EmptyWordsBufferError;

/// Error returned when the cached significant bit count of an operand doesn't match its contents.
///
/// This happens only if the operand's words had been altered through the raw
/// [`MpWordsMut::store_w()`] or [`MpWordsMut::store_digit()`] accessors without a subsequent
/// [`MpWordsMut::refresh_nsb()`].
#[derive(PartialEq, Eq, Debug)]
pub struct StaleSignificantBitsError;

#[derive(PartialEq, Eq, Debug)]
pub enum CopyMpError {
    InsufficientDestinationSpace,
}

/// Read access to a multiprecision integer word buffer.
pub trait MpWordsCommon {
    /// The number of [`LimbType`] words in the buffer.
    fn nwords(&self) -> usize;

    /// Load the word at position `i`, counted from least to most significant.
    fn load_w(&self, i: usize) -> LimbType;

    /// The cached number of significant bits.
    ///
    /// Equals the position of the most significant set bit plus one, or zero for a value of
    /// zero.
    fn nsb(&self) -> usize;

    /// The total bit width of the buffer.
    fn width(&self) -> usize {
        self.nwords() * LIMB_BITS as usize
    }

    /// The number of base-2<sup>16</sup> digits in the buffer.
    fn ndigits(&self) -> usize {
        self.nwords() * DIGITS_PER_LIMB
    }

    /// Load the digit at position `i`, counted from least to most significant.
    ///
    /// The digit is returned zero-extended to a [`LimbType`].
    fn load_digit(&self, i: usize) -> LimbType {
        let (word_index, shift) = digit_index(i);
        (self.load_w(word_index) >> shift) & DIGIT_MASK
    }
}

/// Write access to a multiprecision integer word buffer.
///
/// The raw stores don't update the cached significant bit count, it's up to the user to invoke
/// [`refresh_nsb()`](Self::refresh_nsb) when done. All arithmetic primitives do that on their
/// destination operands.
pub trait MpWordsMut: MpWordsCommon {
    fn store_w(&mut self, i: usize, value: LimbType);

    /// Recompute the cached significant bit count from the buffer's contents.
    fn refresh_nsb(&mut self);

    fn store_digit(&mut self, i: usize, value: LimbType) {
        debug_assert!(value <= DIGIT_MASK);
        let (word_index, shift) = digit_index(i);
        let w = self.load_w(word_index) & !(DIGIT_MASK << shift);
        self.store_w(word_index, w | value << shift);
    }

    /// Set all words at positions `>= begin` to zero.
    fn clear_words_above(&mut self, begin: usize) {
        for i in begin..self.nwords() {
            self.store_w(i, 0);
        }
    }

    /// Set all digits at positions `>= begin` to zero.
    fn clear_digits_above(&mut self, begin: usize) {
        if begin % DIGITS_PER_LIMB != 0 && begin < self.ndigits() {
            self.store_digit(begin, 0);
        }
        self.clear_words_above((begin + DIGITS_PER_LIMB - 1) / DIGITS_PER_LIMB);
    }

    /// Copy the value of `src` over, zero-extending it to the full width.
    ///
    /// `src` may be wider than `self` as long as its value fits.
    fn copy_from<S: MpWordsCommon>(&mut self, src: &S) -> Result<(), CopyMpError> {
        if src.nsb() > self.width() {
            return Err(CopyMpError::InsufficientDestinationSpace);
        }
        let common_nwords = self.nwords().min(src.nwords());
        for i in 0..common_nwords {
            self.store_w(i, src.load_w(i));
        }
        self.clear_words_above(common_nwords);
        self.refresh_nsb();
        Ok(())
    }
}

/// Read-only view on a caller-owned multiprecision integer word buffer.
#[derive(Clone, Copy, Debug)]
pub struct MpWords<'a> {
    words: &'a [LimbType],
    nsb: usize,
}

impl<'a> MpWords<'a> {
    pub fn from_words(words: &'a [LimbType]) -> Result<Self, EmptyWordsBufferError> {
        if words.is_empty() {
            return Err(EmptyWordsBufferError);
        }
        let mut op0 = Self { words, nsb: 0 };
        op0.nsb = significant_bits_mp(&op0);
        Ok(op0)
    }

    pub fn words(&self) -> &'a [LimbType] {
        self.words
    }
}

impl<'a> MpWordsCommon for MpWords<'a> {
    fn nwords(&self) -> usize {
        self.words.len()
    }

    fn load_w(&self, i: usize) -> LimbType {
        self.words[i]
    }

    fn nsb(&self) -> usize {
        self.nsb
    }
}

/// Mutable view on a caller-owned multiprecision integer word buffer.
///
/// Used for the destination operands of the arithmetic primitives.
#[derive(Debug)]
pub struct MpMutWords<'a> {
    words: &'a mut [LimbType],
    nsb: usize,
}

impl<'a> MpMutWords<'a> {
    pub fn from_words(words: &'a mut [LimbType]) -> Result<Self, EmptyWordsBufferError> {
        if words.is_empty() {
            return Err(EmptyWordsBufferError);
        }
        let mut op0 = Self { words, nsb: 0 };
        op0.nsb = significant_bits_mp(&op0);
        Ok(op0)
    }

    pub fn words(&self) -> &[LimbType] {
        self.words
    }

    /// Reborrow as a read-only view, e.g. for passing as an input operand.
    pub fn as_words(&self) -> MpWords<'_> {
        MpWords { words: self.words, nsb: self.nsb }
    }

    pub fn into_words(self) -> &'a mut [LimbType] {
        self.words
    }
}

impl<'a> MpWordsCommon for MpMutWords<'a> {
    fn nwords(&self) -> usize {
        self.words.len()
    }

    fn load_w(&self, i: usize) -> LimbType {
        self.words[i]
    }

    fn nsb(&self) -> usize {
        self.nsb
    }
}

impl<'a> MpWordsMut for MpMutWords<'a> {
    fn store_w(&mut self, i: usize, value: LimbType) {
        self.words[i] = value;
    }

    fn refresh_nsb(&mut self) {
        self.nsb = significant_bits_mp(&*self);
    }
}

/// Determine the number of significant bits in a multiprecision integer.
///
/// Scans the words from most to least significant and returns the position of the most
/// significant set bit plus one, or zero if all words are zero. In contrast to
/// [`MpWordsCommon::nsb()`], the result is always computed afresh from the buffer's contents.
///
/// # Arguments
///
/// * `op0` - The multiprecision integer to examine.
///
pub fn significant_bits_mp<T0: MpWordsCommon>(op0: &T0) -> usize {
    let mut i = op0.nwords();
    while i > 0 {
        i -= 1;
        let op0_val = op0.load_w(i);
        if op0_val != 0 {
            return i * LIMB_BITS as usize + find_last_set_bit_l(op0_val);
        }
    }
    0
}

#[cfg(feature = "nsb_checks")]
fn check_nsb<T0: MpWordsCommon>(op0: &T0) -> Result<(), StaleSignificantBitsError> {
    if op0.nsb() != significant_bits_mp(op0) {
        return Err(StaleSignificantBitsError);
    }
    Ok(())
}

#[cfg(not(feature = "nsb_checks"))]
fn check_nsb<T0: MpWordsCommon>(op0: &T0) -> Result<(), StaleSignificantBitsError> {
    debug_assert_eq!(op0.nsb(), significant_bits_mp(op0));
    Ok(())
}

/// Determine the number of digits needed to represent a multiprecision integer's value.
///
/// Based on the cached significant bit count, which gets verified against the actual contents
/// first if the `nsb_checks` feature is enabled.
pub fn used_digits<T0: MpWordsCommon>(op0: &T0) -> Result<usize, StaleSignificantBitsError> {
    check_nsb(op0)?;
    Ok((op0.nsb() + DIGIT_BITS as usize - 1) / DIGIT_BITS as usize)
}

#[test]
fn test_empty_words_buffer() {
    let mut words: [LimbType; 0] = [];
    assert_eq!(MpWords::from_words(&words).unwrap_err(), EmptyWordsBufferError);
    assert_eq!(MpMutWords::from_words(&mut words).unwrap_err(), EmptyWordsBufferError);
}

#[test]
fn test_digit_view() {
    let mut words = tst_mk_words!(2);
    let mut op0 = MpMutWords::from_words(&mut words).unwrap();
    assert_eq!(op0.width(), 64);
    assert_eq!(op0.ndigits(), 4);
    op0.store_w(0, 0x1234_5678);
    op0.store_w(1, 0x9abc_def0);
    assert_eq!(op0.load_digit(0), 0x5678);
    assert_eq!(op0.load_digit(1), 0x1234);
    assert_eq!(op0.load_digit(2), 0xdef0);
    assert_eq!(op0.load_digit(3), 0x9abc);

    op0.store_digit(1, 0xffff);
    op0.store_digit(2, 0);
    assert_eq!(op0.load_w(0), 0xffff_5678);
    assert_eq!(op0.load_w(1), 0x9abc_0000);

    op0.clear_digits_above(3);
    assert_eq!(op0.load_w(1), 0);
    assert_eq!(op0.load_w(0), 0xffff_5678);
    op0.clear_digits_above(1);
    assert_eq!(op0.load_w(0), 0x5678);
}

#[test]
fn test_significant_bits_mp() {
    for nwords in 1..4 {
        let words = tst_mk_words!(nwords);
        let op0 = MpWords::from_words(&words).unwrap();
        assert_eq!(significant_bits_mp(&op0), 0);
        assert_eq!(op0.nsb(), 0);
        assert_eq!(used_digits(&op0).unwrap(), 0);
    }

    let nwords = 3;
    for i in 0..nwords * LIMB_BITS as usize {
        let mut words = tst_mk_words!(nwords);
        words[i / LIMB_BITS as usize] = 1 << (i % LIMB_BITS as usize);
        words[0] |= 1;
        let op0 = MpWords::from_words(&words).unwrap();
        assert_eq!(significant_bits_mp(&op0), i + 1);
        assert_eq!(op0.nsb(), i + 1);
        assert_eq!(used_digits(&op0).unwrap(), i / DIGIT_BITS as usize + 1);
        assert!(op0.nsb() <= op0.width());
    }
}

#[test]
fn test_refresh_nsb() {
    let mut words = tst_mk_words!(2);
    let mut op0 = MpMutWords::from_words(&mut words).unwrap();
    assert_eq!(op0.nsb(), 0);
    op0.store_w(1, 1);
    assert_eq!(significant_bits_mp(&op0), 33);
    #[cfg(feature = "nsb_checks")]
    assert_eq!(used_digits(&op0), Err(StaleSignificantBitsError));
    op0.refresh_nsb();
    assert_eq!(op0.nsb(), 33);
    assert_eq!(used_digits(&op0), Ok(3));
    assert_eq!(op0.as_words().nsb(), 33);
}

#[test]
fn test_copy_from() {
    let src_words: [LimbType; 3] = [1, 2, 0];
    let src = MpWords::from_words(&src_words).unwrap();

    let mut words = [!0 as LimbType; 4];
    let mut dst = MpMutWords::from_words(&mut words).unwrap();
    dst.copy_from(&src).unwrap();
    assert_eq!(dst.words(), &[1, 2, 0, 0]);
    assert_eq!(dst.nsb(), 34);

    let mut words = tst_mk_words!(2);
    let mut dst = MpMutWords::from_words(&mut words).unwrap();
    dst.copy_from(&src).unwrap();
    assert_eq!(dst.words(), &[1, 2]);

    let mut words = tst_mk_words!(1);
    let mut dst = MpMutWords::from_words(&mut words).unwrap();
    assert_eq!(dst.copy_from(&src), Err(CopyMpError::InsufficientDestinationSpace));
}
