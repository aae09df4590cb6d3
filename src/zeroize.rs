//! Internal shim for [`Zeroizing`], usable whether or not the `zeroize` feature is enabled.
//!
//! Without the feature, [`Zeroizing`] is a plain transparent wrapper and nothing gets scrubbed.

#[cfg(feature = "zeroize")]
pub use ::zeroize::Zeroizing;

#[cfg(not(feature = "zeroize"))]
pub struct Zeroizing<T>(T);

#[cfg(not(feature = "zeroize"))]
impl<T> Zeroizing<T> {
    pub fn new(v: T) -> Self {
        Self(v)
    }
}

#[cfg(not(feature = "zeroize"))]
impl<T> core::ops::Deref for Zeroizing<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

#[cfg(not(feature = "zeroize"))]
impl<T> core::ops::DerefMut for Zeroizing<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}
