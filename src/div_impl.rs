// SPDX-License-Identifier: Apache-2.0

//! Implementation of multiprecision integer division primitives.

extern crate alloc;

use alloc::vec;

use super::limb::{
    digits_to_l, leading_zeros_l, sub_l_l_b, DigitType, LimbType, DIGIT_BITS,
    DIGIT_MASK, LIMB_BITS,
};
use super::words_buffer::{used_digits, MpWordsCommon, MpWordsMut};
use super::zeroize::Zeroizing;

#[derive(PartialEq, Eq, Debug)]
pub enum DivMpError {
    StaleSignificantBits,
    DivisionByZero,
    DividendTooShort,
    InsufficientQuotientSpace,
    InsufficientRemainderSpace,
}

/// Divide two multiprecision integers.
///
/// Computes the quotient `u / v` into `q` and, if requested, the remainder `u % v` into `r`. Both
/// destinations get completely overwritten, including all of their digits above the result.
///
/// With `m` and `n` denoting the number of significant base-2<sup>16</sup> digits in `u` and `v`
/// respectively, `q` must provide space for at least `m - n + 1` digits and `r` for at least `n`
/// digits. All parameters are validated before anything gets written to the destinations, but on
/// error their contents are to be considered invalid nonetheless.
///
/// # Errors
///
/// * [`DivMpError::DivisionByZero`] - `v` is zero.
/// * [`DivMpError::DividendTooShort`] - `u` has fewer significant digits than `v`.
/// * [`DivMpError::InsufficientQuotientSpace`] - `q` is narrower than `m - n + 1` digits.
/// * [`DivMpError::InsufficientRemainderSpace`] - `r` is narrower than `n` digits.
/// * [`DivMpError::StaleSignificantBits`] - the cached significant bit count of `u` or `v` is
///   out of sync with its contents.
///
/// # Arguments
///
/// * `u` - The dividend.
/// * `v` - The divisor.
/// * `q` - The destination receiving the quotient.
/// * `r` - The optional destination receiving the remainder.
///
pub fn div_mp_mp<UT: MpWordsCommon, VT: MpWordsCommon, QT: MpWordsMut, RT: MpWordsMut>(
    u: &UT,
    v: &VT,
    q: &mut QT,
    mut r: Option<&mut RT>,
) -> Result<(), DivMpError> {
    let u_ndigits = used_digits(u).map_err(|_| DivMpError::StaleSignificantBits)?;
    let v_ndigits = used_digits(v).map_err(|_| DivMpError::StaleSignificantBits)?;
    if v_ndigits == 0 {
        return Err(DivMpError::DivisionByZero);
    }
    if u_ndigits < v_ndigits {
        return Err(DivMpError::DividendTooShort);
    }

    let q_ndigits = u_ndigits - v_ndigits + 1;
    if q.ndigits() < q_ndigits {
        return Err(DivMpError::InsufficientQuotientSpace);
    }
    if let Some(r) = &r {
        if r.ndigits() < v_ndigits {
            return Err(DivMpError::InsufficientRemainderSpace);
        }
    }

    q.clear_digits_above(q_ndigits);
    if v_ndigits == 1 {
        div_mp_d(u, u_ndigits, v.load_digit(0), q, r.as_deref_mut());
    } else {
        div_mp_mp_normalized(u, u_ndigits, v, v_ndigits, q, r.as_deref_mut());
    }

    q.refresh_nsb();
    if let Some(r) = r {
        r.refresh_nsb();
    }
    Ok(())
}

// Short division of u by a single nonzero digit.
fn div_mp_d<UT: MpWordsCommon, QT: MpWordsMut, RT: MpWordsMut>(
    u: &UT,
    u_ndigits: usize,
    v: LimbType,
    q: &mut QT,
    r: Option<&mut RT>,
) {
    debug_assert!(v != 0 && v <= DIGIT_MASK);
    let mut rem = 0;
    let mut j = u_ndigits;
    while j > 0 {
        j -= 1;
        let cur = digits_to_l(rem, u.load_digit(j));
        q.store_digit(j, cur / v);
        rem = cur % v;
    }

    if let Some(r) = r {
        r.clear_words_above(0);
        r.store_digit(0, rem);
    }
}

// Long division according to D. E. Knuth, "The Art of Computer Programming", vol 2,
// Algorithm D. Works for any v_ndigits >= 1, a missing second most significant divisor digit
// reads as zero.
fn div_mp_mp_normalized<UT: MpWordsCommon, VT: MpWordsCommon, QT: MpWordsMut, RT: MpWordsMut>(
    u: &UT,
    u_ndigits: usize,
    v: &VT,
    v_ndigits: usize,
    q: &mut QT,
    r: Option<&mut RT>,
) {
    let m = u_ndigits;
    let n = v_ndigits;
    debug_assert!(n >= 1 && m >= n);

    // Normalize such that the divisor's high digit has its MSB set. The extra high digit in the
    // normalized dividend absorbs what gets shifted out at the top.
    let v_high = v.load_digit(n - 1);
    debug_assert!(v_high != 0);
    let shift = leading_zeros_l(v_high) - (LIMB_BITS - DIGIT_BITS);
    let mut vn: Zeroizing<vec::Vec<DigitType>> = Zeroizing::new(vec![0; n]);
    let mut un: Zeroizing<vec::Vec<DigitType>> = Zeroizing::new(vec![0; m + 1]);
    // A shift by DIGIT_BITS of a zero-extended digit yields zero, which is what's needed for
    // shift == 0.
    for i in (1..n).rev() {
        let val = v.load_digit(i) << shift | v.load_digit(i - 1) >> (DIGIT_BITS - shift);
        vn[i] = (val & DIGIT_MASK) as DigitType;
    }
    vn[0] = ((v.load_digit(0) << shift) & DIGIT_MASK) as DigitType;
    un[m] = (u.load_digit(m - 1) >> (DIGIT_BITS - shift)) as DigitType;
    for i in (1..m).rev() {
        let val = u.load_digit(i) << shift | u.load_digit(i - 1) >> (DIGIT_BITS - shift);
        un[i] = (val & DIGIT_MASK) as DigitType;
    }
    un[0] = ((u.load_digit(0) << shift) & DIGIT_MASK) as DigitType;

    let vn_high = vn[n - 1] as LimbType;
    let vn_tail_high = if n >= 2 { vn[n - 2] as LimbType } else { 0 };
    debug_assert!(vn_high >> (DIGIT_BITS - 1) == 1);

    let mut j = m - n + 1;
    while j > 0 {
        j -= 1;

        // Estimate q from the two most significant digits of the current window. The loop
        // invariant un[j + n] <= vn_high bounds the estimate by 2 * b - 1.
        let (mut qh, mut rh) = {
            let u_cur = digits_to_l(un[j + n] as LimbType, un[j + n - 1] as LimbType);
            (u_cur / vn_high, u_cur % vn_high)
        };
        // u[j + n - 2] is undefined only for n == 1 and j == 0. But then vn_tail_high is zero
        // and the comparison comes out negative no matter what.
        let u_tail_high = if j + n >= 2 { un[j + n - 2] as LimbType } else { 0 };
        let mut ncorrections = 0;
        while qh > DIGIT_MASK || qh * vn_tail_high > (rh << DIGIT_BITS | u_tail_high) {
            qh -= 1;
            rh += vn_high;
            ncorrections += 1;
            if rh > DIGIT_MASK {
                break;
            }
        }
        debug_assert!(ncorrections <= 2);
        debug_assert!(qh <= DIGIT_MASK);

        // Multiply and subtract qh * vn from the window.
        let mut qv_carry = 0;
        let mut borrow = 0;
        for i in 0..n {
            let qv = qh * vn[i] as LimbType + qv_carry;
            qv_carry = qv >> DIGIT_BITS;
            let u_val;
            (borrow, u_val) = sub_l_l_b(un[i + j] as LimbType, qv & DIGIT_MASK, borrow);
            un[i + j] = (u_val & DIGIT_MASK) as DigitType;
        }
        let u_val;
        (borrow, u_val) = sub_l_l_b(un[j + n] as LimbType, qv_carry, borrow);
        un[j + n] = (u_val & DIGIT_MASK) as DigitType;

        // The subtraction went negative, qh had still been one too large. Add one vn back in,
        // the carry out of the top digit cancels the borrow.
        if borrow != 0 {
            qh -= 1;
            let mut carry = 0;
            for i in 0..n {
                let u_val = un[i + j] as LimbType + vn[i] as LimbType + carry;
                carry = u_val >> DIGIT_BITS;
                un[i + j] = (u_val & DIGIT_MASK) as DigitType;
            }
            un[j + n] = ((un[j + n] as LimbType + carry) & DIGIT_MASK) as DigitType;
        }
        debug_assert_eq!(un[j + n], 0);

        q.store_digit(j, qh);
    }

    // The remainder is in the n least significant digits of un, shift it back.
    if let Some(r) = r {
        r.clear_words_above(0);
        for i in 0..n {
            let val = (un[i] as LimbType) >> shift | (un[i + 1] as LimbType) << (DIGIT_BITS - shift);
            r.store_digit(i, val & DIGIT_MASK);
        }
    }
}

#[cfg(test)]
fn tst_div_and_check(u: u128, v: u128, u_nwords: usize, v_nwords: usize) {
    use super::add_impl::add_mp_mp;
    use super::cmp_impl::{eq_mp_mp, lt_mp_mp};
    use super::mul_impl::mul_mp_mp;
    use super::test_helpers::{tst_words_from_u128, tst_words_to_u128};
    use super::words_buffer::{MpMutWords, MpWords};

    let u_words = tst_words_from_u128(u_nwords, u);
    let u = MpWords::from_words(&u_words).unwrap();
    let v_words = tst_words_from_u128(v_nwords, v);
    let v = MpWords::from_words(&v_words).unwrap();

    let mut q_words = tst_mk_words!(u_nwords);
    q_words.fill(!0);
    let mut q = MpMutWords::from_words(&mut q_words).unwrap();
    let mut r_words = tst_mk_words!(v_nwords);
    r_words.fill(!0);
    let mut r = MpMutWords::from_words(&mut r_words).unwrap();
    div_mp_mp(&u, &v, &mut q, Some(&mut r)).unwrap();

    // Compare against the native arithmetic.
    let u_val = tst_words_to_u128(&u_words);
    let v_val = tst_words_to_u128(&v_words);
    assert_eq!(tst_words_to_u128(q.words()), u_val / v_val);
    assert_eq!(tst_words_to_u128(r.words()), u_val % v_val);
    assert!(lt_mp_mp(&r, &v));

    // Multiply q by v again and add the remainder back, the result should match the initial u.
    let mut result_words = tst_mk_words!(u_nwords + v_nwords);
    let mut result = MpMutWords::from_words(&mut result_words).unwrap();
    mul_mp_mp(&q, &v, &mut result).unwrap();
    let carry = add_mp_mp(&mut result, &r);
    assert_eq!(carry, 0);
    assert!(eq_mp_mp(&u, &result));

    // Without a remainder destination, the quotient must come out the same.
    let mut q2_words = tst_mk_words!(u_nwords);
    let mut q2 = MpMutWords::from_words(&mut q2_words).unwrap();
    div_mp_mp(&u, &v, &mut q2, None::<&mut MpMutWords>).unwrap();
    assert!(eq_mp_mp(&q, &q2));
    assert_eq!(q.nsb(), q2.nsb());
}

#[test]
fn test_div_mp_mp() {
    use super::words_buffer::{MpMutWords, MpWords};

    // 2^32 / 3
    let u_words: [LimbType; 2] = [0, 1];
    let u = MpWords::from_words(&u_words).unwrap();
    let v_words: [LimbType; 2] = [3, 0];
    let v = MpWords::from_words(&v_words).unwrap();
    let mut q_words = tst_mk_words!(2);
    let mut q = MpMutWords::from_words(&mut q_words).unwrap();
    let mut r_words = tst_mk_words!(2);
    let mut r = MpMutWords::from_words(&mut r_words).unwrap();
    div_mp_mp(&u, &v, &mut q, Some(&mut r)).unwrap();
    assert_eq!(q.words(), &[0x5555_5555, 0]);
    assert_eq!(q.nsb(), 31);
    assert_eq!(r.words(), &[1, 0]);
    assert_eq!(r.nsb(), 1);

    tst_div_and_check(1 << 16, 1, 2, 1);
    tst_div_and_check(1 << 16, 3, 2, 1);
    tst_div_and_check(0xffff_fffe_ffff_ffff, 0xffff_ffff, 2, 1);
    tst_div_and_check(0xffff_fffe_ffff_fffe, 0xffff_ffff, 2, 1);
    tst_div_and_check(0xffff_ffff_ffff, 0xffff_ffff_ffff, 2, 2);
    tst_div_and_check(0xffff_ffff_fffe_ffff_ffff_fffe, 0xffff_ffff_ffff, 3, 2);
    tst_div_and_check(0xffff_ffff_ffff_0000, 0x1_0000, 2, 1);
    tst_div_and_check(0xffff_fffe_ffff_0000, 0x2_0000, 2, 1);
    tst_div_and_check(0x8000_0000_0000_0000_0000_0000_0000_0000, 0x8000_0000_0000_0001, 4, 2);
    // Quotient digit estimates still one too large after the correction loop, requiring the
    // add-back step.
    tst_div_and_check(0x7fff_8000_0000_0000, 0x8000_0000_0001, 2, 2);
    tst_div_and_check(0x7fff_8000_0000_0000_0000_0000, 0x8000_0000_0000_0001, 3, 2);
    // The multiply-and-subtract intermediate exceeds the signed range of a digit.
    tst_div_and_check(0x8000_fffe_0000, 0x8000_0000_ffff, 2, 2);
    tst_div_and_check(0x8000_0000_0000_0000_0000_0000, 0x8000_0000_0000_0001, 3, 2);
    tst_div_and_check(0x0000_7fff_0000_0000_0000_0000_0003, 0x0000_8000_0000_0000_0000_0001, 4, 4);

    // All-ones dividends of every bit length, divisors with one or two bits set.
    const N_MAX_WORDS: usize = 3;
    for i in 1..N_MAX_WORDS * LIMB_BITS as usize + 1 {
        let u = !0u128 >> (128 - i);
        for j1 in 0..i {
            for j2 in 0..j1 + 1 {
                let v = 1u128 << j1 | 1u128 << j2;
                tst_div_and_check(u, v, N_MAX_WORDS, N_MAX_WORDS);
                tst_div_and_check(u, v, N_MAX_WORDS, j1 / LIMB_BITS as usize + 1);
            }
        }
    }
}

#[test]
fn test_div_mp_mp_errors() {
    use super::words_buffer::{MpMutWords, MpWords};

    let u_words: [LimbType; 2] = [0, 1];
    let u = MpWords::from_words(&u_words).unwrap();
    let zero_words: [LimbType; 2] = [0, 0];
    let zero = MpWords::from_words(&zero_words).unwrap();
    let mut q_words = tst_mk_words!(2);
    let mut q = MpMutWords::from_words(&mut q_words).unwrap();
    let mut r_words = tst_mk_words!(2);
    let mut r = MpMutWords::from_words(&mut r_words).unwrap();

    assert_eq!(
        div_mp_mp(&u, &zero, &mut q, Some(&mut r)),
        Err(DivMpError::DivisionByZero)
    );
    assert_eq!(
        div_mp_mp(&zero, &zero, &mut q, None::<&mut MpMutWords>),
        Err(DivMpError::DivisionByZero)
    );
    // 0 / u and 1 / 2^32: fewer significant dividend digits.
    assert_eq!(
        div_mp_mp(&zero, &u, &mut q, Some(&mut r)),
        Err(DivMpError::DividendTooShort)
    );
    let one_words: [LimbType; 1] = [1];
    let one = MpWords::from_words(&one_words).unwrap();
    assert_eq!(
        div_mp_mp(&one, &u, &mut q, Some(&mut r)),
        Err(DivMpError::DividendTooShort)
    );

    // 2^32 has three significant digits, dividing by 1 needs all three quotient digits.
    let mut q_words = tst_mk_words!(1);
    let mut q = MpMutWords::from_words(&mut q_words).unwrap();
    assert_eq!(
        div_mp_mp(&u, &one, &mut q, Some(&mut r)),
        Err(DivMpError::InsufficientQuotientSpace)
    );

    // A divisor of three digits needs a remainder of three digits.
    let big_words: [LimbType; 2] = [!0, !0];
    let big = MpWords::from_words(&big_words).unwrap();
    let mut q_words = tst_mk_words!(2);
    let mut q = MpMutWords::from_words(&mut q_words).unwrap();
    let mut r_words = tst_mk_words!(1);
    let mut r = MpMutWords::from_words(&mut r_words).unwrap();
    assert_eq!(
        div_mp_mp(&big, &u, &mut q, Some(&mut r)),
        Err(DivMpError::InsufficientRemainderSpace)
    );
    div_mp_mp(&big, &u, &mut q, None::<&mut MpMutWords>).unwrap();
    assert_eq!(q.words(), &[!0, 0]);
}

#[test]
fn test_div_mp_mp_stale_nsb() {
    use super::words_buffer::{MpMutWords, MpWords};

    let u_words: [LimbType; 1] = [100];
    let u = MpWords::from_words(&u_words).unwrap();
    let mut v_words = tst_mk_words!(1);
    let mut v = MpMutWords::from_words(&mut v_words).unwrap();
    v.store_w(0, 7);
    let mut q_words = tst_mk_words!(1);
    let mut q = MpMutWords::from_words(&mut q_words).unwrap();
    #[cfg(feature = "nsb_checks")]
    assert_eq!(
        div_mp_mp(&u, &v, &mut q, None::<&mut MpMutWords>),
        Err(DivMpError::StaleSignificantBits)
    );
    v.refresh_nsb();
    div_mp_mp(&u, &v, &mut q, None::<&mut MpMutWords>).unwrap();
    assert_eq!(q.words(), &[14]);
}

#[test]
fn test_div_mp_d_vs_normalized() {
    use super::cmp_impl::eq_mp_mp;
    use super::test_helpers::tst_words_from_u128;
    use super::words_buffer::{MpMutWords, MpWords};

    // The single digit short division and Algorithm D must agree.
    let nwords = 3;
    for i in 1..nwords * LIMB_BITS as usize + 1 {
        let u_words = tst_words_from_u128(nwords, !0u128 >> (128 - i));
        let u = MpWords::from_words(&u_words).unwrap();
        let m = used_digits(&u).unwrap();
        for v in [1, 2, 3, 7, 0x7fff, 0x8000, 0x8001, 0xfffe, 0xffff] {
            let mut q0_words = tst_mk_words!(nwords);
            let mut q0 = MpMutWords::from_words(&mut q0_words).unwrap();
            let mut r0_words = tst_mk_words!(1);
            let mut r0 = MpMutWords::from_words(&mut r0_words).unwrap();
            div_mp_d(&u, m, v, &mut q0, Some(&mut r0));
            q0.refresh_nsb();
            r0.refresh_nsb();

            let v_words: [LimbType; 1] = [v];
            let v = MpWords::from_words(&v_words).unwrap();
            let mut q1_words = tst_mk_words!(nwords);
            let mut q1 = MpMutWords::from_words(&mut q1_words).unwrap();
            let mut r1_words = tst_mk_words!(1);
            let mut r1 = MpMutWords::from_words(&mut r1_words).unwrap();
            div_mp_mp_normalized(&u, m, &v, 1, &mut q1, Some(&mut r1));
            q1.refresh_nsb();
            r1.refresh_nsb();

            assert!(eq_mp_mp(&q0, &q1));
            assert!(eq_mp_mp(&r0, &r1));
        }
    }
}

#[test]
fn test_mul_div_roundtrip() {
    use super::cmp_impl::is_zero_mp;
    use super::mul_impl::mul_mp_mp;
    use super::test_helpers::{tst_words_from_u128, tst_words_to_u128};
    use super::words_buffer::{MpMutWords, MpWords};

    let factors: [u128; 8] = [
        1,
        3,
        0xffff,
        0x1_0001,
        0xffff_ffff,
        0x8000_0000_0000_0001,
        0xffff_ffff_ffff_ffff,
        0x1234_5678_9abc_def0_0fed_cba9,
    ];
    for u in factors {
        for v in factors {
            let u_words = tst_words_from_u128(3, u);
            let u = MpWords::from_words(&u_words).unwrap();
            let v_words = tst_words_from_u128(3, v);
            let v = MpWords::from_words(&v_words).unwrap();
            let mut w_words = tst_mk_words!(6);
            let mut w = MpMutWords::from_words(&mut w_words).unwrap();
            mul_mp_mp(&u, &v, &mut w).unwrap();

            let mut q_words = tst_mk_words!(6);
            let mut q = MpMutWords::from_words(&mut q_words).unwrap();
            let mut r_words = tst_mk_words!(3);
            let mut r = MpMutWords::from_words(&mut r_words).unwrap();
            div_mp_mp(&w, &u, &mut q, Some(&mut r)).unwrap();
            assert!(is_zero_mp(&r));
            assert_eq!(r.nsb(), 0);
            assert_eq!(tst_words_to_u128(q.words()), tst_words_to_u128(&v_words));
            assert_eq!(q.nsb(), v.nsb());
        }
    }
}
