//! Fixed-width multiprecision unsigned integer arithmetic primitives.
//!
//! All integers live in caller-owned slices of [`LimbType`] words, least significant word first,
//! wrapped in the [`MpWords`] and [`MpMutWords`] views. Each view caches its value's number of
//! significant bits, which the primitives use to bound their work and keep current on every
//! destination they write. Nothing ever grows a buffer: results that don't fit their destination
//! are reported as errors instead.
//!
//! Multiplication and division operate on base-2<sup>16</sup> digits, so that every intermediate
//! product fits a single [`LimbType`].

#[cfg(test)]
#[macro_use]
mod test_helpers;

mod add_impl;
mod and_impl;
mod cmp_impl;
mod div_impl;
mod limb;
mod mul_impl;
mod shift_impl;
mod words_buffer;
mod zeroize;

pub use limb::{DigitType, LimbType, DIGIT_BITS, LIMB_BITS};

pub use words_buffer::{
    significant_bits_mp, used_digits, CopyMpError, EmptyWordsBufferError, MpMutWords, MpWords,
    MpWordsCommon, MpWordsMut, StaleSignificantBitsError,
};

pub use add_impl::{add_mp_mp, sub_mp_mp};

pub use and_impl::and_mp_mp;

pub use cmp_impl::{eq_mp_mp, is_zero_mp, leq_mp_mp, lt_mp_mp};

pub use div_impl::{div_mp_mp, DivMpError};

pub use mul_impl::{mul_mp_mp, MulMpError};

pub use shift_impl::{lshift_mp, rshift_mp};
