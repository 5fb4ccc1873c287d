//! The [`UniqueArena`] type and associated definitions.

use super::handle::Handle;
use crate::FastIndexSet;

use std::{fmt, hash, ops};

/// An arena whose elements are guaranteed to be unique.
///
/// A `UniqueArena` holds a set of unique values of type `T`, each with an
/// associated [`Handle`].
///
/// When inserting a value into a `UniqueArena`, the insertion returns the
/// handle of the value already present if there is one; otherwise the value
/// is added and a fresh handle is returned. Once inserted, elements are never
/// mutated or removed, so a handle obtained from an `insert` stays valid for
/// the arena's lifetime.
///
/// `UniqueArena` is used to intern the module's types: since every distinct
/// structural shape is stored exactly once, structural equality between
/// already-interned subcomponents reduces to handle equality. Deduplicating
/// compound values therefore only needs to compare the handles they carry,
/// which is what makes the derived `Eq`/`Hash` of [`Type`] a valid identity.
///
/// [`Type`]: crate::Type
pub struct UniqueArena<T> {
    set: FastIndexSet<T>,
}

impl<T> Default for UniqueArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UniqueArena<T> {
    /// Create a new, empty arena.
    pub fn new() -> Self {
        UniqueArena {
            set: FastIndexSet::default(),
        }
    }

    /// Return the current number of items stored in this arena.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Return `true` if the arena contains no elements.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Clears the arena, keeping all allocations.
    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Return an iterator over the items stored in this arena, returning both
    /// the item's handle and a reference to it.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Handle<T>, &T)> {
        self.set
            .iter()
            .enumerate()
            .map(|(i, v)| unsafe { (Handle::from_usize_unchecked(i), v) })
    }
}

impl<T: Eq + hash::Hash> UniqueArena<T> {
    /// Insert a new value into the arena.
    ///
    /// Return a [`Handle<T>`], which can be used to index this arena to get a
    /// shared reference to the element.
    ///
    /// If this arena already contains an element that is `Eq` to `value`,
    /// return a `Handle` to the existing element, and drop `value`.
    ///
    /// [`Handle<T>`]: Handle
    pub fn insert(&mut self, value: T) -> Handle<T> {
        let (index, _) = self.set.insert_full(value);
        Handle::from_usize(index)
    }

    /// Return this arena's handle for `value`, if present.
    ///
    /// If this arena already contains an element equal to `value`, return its
    /// handle. Otherwise, return `None`.
    pub fn get(&self, value: &T) -> Option<Handle<T>> {
        self.set
            .get_index_of(value)
            .map(|index| unsafe { Handle::from_usize_unchecked(index) })
    }

    /// Return this arena's value at `handle`, if that is a valid handle.
    pub fn get_handle(&self, handle: Handle<T>) -> Option<&T> {
        self.set.get_index(handle.index())
    }
}

impl<T> ops::Index<Handle<T>> for UniqueArena<T> {
    type Output = T;
    fn index(&self, handle: Handle<T>) -> &T {
        &self.set[handle.index()]
    }
}

impl<T: fmt::Debug> fmt::Debug for UniqueArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
