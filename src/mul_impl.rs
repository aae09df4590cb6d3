//! Implementation of multiprecision integer multiplication primitives.

use super::limb::mul_add_d_d_d_c;
use super::words_buffer::{used_digits, MpWordsCommon, MpWordsMut};

#[derive(PartialEq, Eq, Debug)]
pub enum MulMpError {
    StaleSignificantBits,
    ProductOverflow,
}

/// Multiply two multiprecision integers.
///
/// The destination `w` gets completely overwritten with the product `u * v`. If the product
/// exceeds `w`'s width, [`MulMpError::ProductOverflow`] is returned and the partial result left in
/// `w` must be considered invalid. The product is guaranteed to fit if `w.width() >= u.nsb() +
/// v.nsb()`.
///
/// Implements the classic schoolbook multiplication in base 2<sup>16</sup>, i.e. D. E. Knuth,
/// "The Art of Computer Programming", vol 2, Algorithm M, iterating only over the significant
/// digits of either factor.
///
/// # Arguments
///
/// * `u` - The first factor.
/// * `v` - The second factor.
/// * `w` - The destination receiving the product.
///
pub fn mul_mp_mp<UT: MpWordsCommon, VT: MpWordsCommon, WT: MpWordsMut>(
    u: &UT,
    v: &VT,
    w: &mut WT,
) -> Result<(), MulMpError> {
    let u_ndigits = used_digits(u).map_err(|_| MulMpError::StaleSignificantBits)?;
    let v_ndigits = used_digits(v).map_err(|_| MulMpError::StaleSignificantBits)?;
    let w_ndigits = w.ndigits();

    w.clear_words_above(0);
    for j in 0..v_ndigits {
        let v_val = v.load_digit(j);
        if v_val == 0 {
            // w[j + u_ndigits] had been cleared above already.
            continue;
        }

        let mut carry = 0;
        for i in 0..u_ndigits {
            // All of the product's digits at positions beyond w's width must come out as zero,
            // so that's what gets accumulated into.
            let w_val = if i + j < w_ndigits {
                w.load_digit(i + j)
            } else {
                0
            };
            let w_val = {
                let (c, w_val) = mul_add_d_d_d_c(w_val, u.load_digit(i), v_val, carry);
                carry = c;
                w_val
            };
            if i + j < w_ndigits {
                w.store_digit(i + j, w_val);
            } else if w_val != 0 {
                w.refresh_nsb();
                return Err(MulMpError::ProductOverflow);
            }
        }

        if j + u_ndigits < w_ndigits {
            w.store_digit(j + u_ndigits, carry);
        } else if carry != 0 {
            w.refresh_nsb();
            return Err(MulMpError::ProductOverflow);
        }
    }

    w.refresh_nsb();
    Ok(())
}

#[cfg(test)]
fn tst_mul_and_check(u: u128, v: u128, u_nwords: usize, v_nwords: usize, w_nwords: usize) {
    use super::test_helpers::{tst_words_from_u128, tst_words_to_u128};
    use super::words_buffer::{MpMutWords, MpWords};

    let u_words = tst_words_from_u128(u_nwords, u);
    let u = MpWords::from_words(&u_words).unwrap();
    let v_words = tst_words_from_u128(v_nwords, v);
    let v = MpWords::from_words(&v_words).unwrap();
    let mut w_words = tst_mk_words!(w_nwords);
    // Destination garbage must get overwritten.
    w_words.fill(!0);
    let mut w = MpMutWords::from_words(&mut w_words).unwrap();

    let expected = tst_words_to_u128(&u_words).checked_mul(tst_words_to_u128(&v_words));
    let fits = match expected {
        Some(expected) => 128 - expected.leading_zeros() as usize <= w.width(),
        None => false,
    };
    match mul_mp_mp(&u, &v, &mut w) {
        Ok(()) => {
            assert!(fits);
            let nsb = w.nsb();
            assert_eq!(tst_words_to_u128(w.words()), expected.unwrap());
            assert_eq!(nsb, super::words_buffer::significant_bits_mp(&w));
            assert!(nsb <= u.nsb() + v.nsb());
        }
        Err(e) => {
            assert_eq!(e, MulMpError::ProductOverflow);
            assert!(!fits);
        }
    }
}

#[test]
fn test_mul_mp_mp() {
    use super::test_helpers::tst_words_to_u128;
    use super::words_buffer::{MpMutWords, MpWords};

    let u_words: [u32; 1] = [!0];
    let u = MpWords::from_words(&u_words).unwrap();
    let v_words: [u32; 1] = [!0];
    let v = MpWords::from_words(&v_words).unwrap();
    let mut w_words = tst_mk_words!(2);
    let mut w = MpMutWords::from_words(&mut w_words).unwrap();
    mul_mp_mp(&u, &v, &mut w).unwrap();
    assert_eq!(w.words(), &[0x0000_0001, 0xffff_fffe]);
    assert_eq!(w.nsb(), 64);
    assert_eq!(tst_words_to_u128(&w_words), 0xffff_fffe_0000_0001);

    tst_mul_and_check(0, 0, 1, 1, 1);
    tst_mul_and_check(0, !0, 1, 4, 1);
    tst_mul_and_check(1, 1, 1, 1, 1);
    tst_mul_and_check(0xffff, 0xffff, 1, 1, 1);
    tst_mul_and_check(0x1_0000, 0x1_0000, 1, 1, 1);
    tst_mul_and_check(0x1_0000, 0x1_0000, 1, 1, 2);
    tst_mul_and_check(0xffff_ffff, 0xffff_ffff, 1, 1, 1);
    tst_mul_and_check(0xffff_ffff, 0xffff_ffff, 1, 1, 3);
    tst_mul_and_check(0xffff_ffff_ffff_ffff, 0xffff_ffff_ffff_ffff, 2, 2, 4);
    tst_mul_and_check(0xffff_ffff_ffff_ffff, 0xffff_ffff_ffff_ffff, 2, 2, 3);
    tst_mul_and_check(0x1_0000_0000, 0x1_0000_0000, 2, 2, 2);
    tst_mul_and_check(0x1_0000_0000, 0x8000_0000, 2, 1, 2);
    tst_mul_and_check(0x1_0000_0000, 0xffff_ffff, 2, 1, 2);
    tst_mul_and_check(0x1234_5678_9abc_def0, 0x0fed_cba9, 3, 1, 3);

    // Factors of all bit lengths, products straddling the destination boundary.
    for i in 0..64 {
        for j in 0..64 {
            let u = !0u128 >> (127 - i);
            let v = (1u128 << j) | 1;
            tst_mul_and_check(u, v, 2, 2, 2);
            tst_mul_and_check(u, v, 2, 2, 3);
            tst_mul_and_check(v, u, 2, 2, 2);
        }
    }
}

#[test]
fn test_mul_mp_mp_stale_nsb() {
    use super::words_buffer::{MpMutWords, MpWords};

    let mut u_words = tst_mk_words!(1);
    let mut u = MpMutWords::from_words(&mut u_words).unwrap();
    u.store_w(0, 3);
    let v_words: [u32; 1] = [5];
    let v = MpWords::from_words(&v_words).unwrap();
    let mut w_words = tst_mk_words!(2);
    let mut w = MpMutWords::from_words(&mut w_words).unwrap();
    #[cfg(feature = "nsb_checks")]
    assert_eq!(mul_mp_mp(&u, &v, &mut w), Err(MulMpError::StaleSignificantBits));
    u.refresh_nsb();
    mul_mp_mp(&u, &v, &mut w).unwrap();
    assert_eq!(w.words(), &[15, 0]);
}
