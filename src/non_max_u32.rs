//! [`NonMaxU32`], a 32-bit value that can be anything except [`u32::MAX`].
//!
//! We want `Option<Handle<T>>` to stay a 32-bit value, which means some index
//! value must be sacrificed to represent [`None`]. Zero is far too useful as
//! an index, so instead of [`NonZeroU32`] we exclude the value at the other
//! end of the range. Under the hood this is a [`NonZeroU32`] storing the
//! index plus one, but that bias never leaks out of this module.
//!
//! [`Handle`]: crate::Handle
//! [`NonZeroU32`]: std::num::NonZeroU32

use std::num::NonZeroU32;

/// An unsigned 32-bit value known not to be [`u32::MAX`].
///
/// `NonMaxU32` can represent any value in `0 .. u32::MAX`, and
/// `Option<NonMaxU32>` still occupies 32 bits.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NonMaxU32(NonZeroU32);

impl NonMaxU32 {
    /// Construct a [`NonMaxU32`] whose value is `n`, if possible.
    pub const fn new(n: u32) -> Option<Self> {
        // If `n` is `u32::MAX`, then `n.wrapping_add(1)` is zero, so
        // `NonZeroU32::new` rejects exactly the value we must reject.
        match NonZeroU32::new(n.wrapping_add(1)) {
            Some(non_zero) => Some(NonMaxU32(non_zero)),
            None => None,
        }
    }

    /// Return the value of `self` as a [`u32`].
    pub const fn get(self) -> u32 {
        self.0.get() - 1
    }

    /// Construct a [`NonMaxU32`] whose value is `n`.
    ///
    /// # Safety
    ///
    /// The value of `n` must not be [`u32::MAX`].
    pub const unsafe fn new_unchecked(n: u32) -> NonMaxU32 {
        NonMaxU32(unsafe { NonZeroU32::new_unchecked(n + 1) })
    }

}

impl std::fmt::Debug for NonMaxU32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl std::fmt::Display for NonMaxU32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

#[test]
fn size() {
    use core::mem::size_of;
    assert_eq!(size_of::<Option<NonMaxU32>>(), size_of::<u32>());
}
