// SPDX-License-Identifier: Apache-2.0

#![macro_use]

extern crate alloc;

use super::limb::{LimbType, LIMB_BITS};

macro_rules! tst_mk_words {
    ($nwords:expr) => {{
        extern crate alloc;
        let mut v = alloc::vec::Vec::<$crate::limb::LimbType>::new();
        v.resize($nwords, 0);
        v
    }};
}

/// Spread a native integer over `nwords` words, truncating what doesn't fit.
pub fn tst_words_from_u128(nwords: usize, value: u128) -> alloc::vec::Vec<LimbType> {
    let mut v = tst_mk_words!(nwords);
    for (i, w) in v.iter_mut().enumerate().take(128 / LIMB_BITS as usize) {
        *w = (value >> (i * LIMB_BITS as usize)) as LimbType;
    }
    v
}

/// Collect the value of a word buffer into a native integer, all words above the first 128 bits
/// must be zero.
pub fn tst_words_to_u128(words: &[LimbType]) -> u128 {
    let mut value = 0u128;
    for (i, w) in words.iter().enumerate() {
        if i >= 128 / LIMB_BITS as usize {
            assert_eq!(*w, 0);
            continue;
        }
        value |= (*w as u128) << (i * LIMB_BITS as usize);
    }
    value
}
