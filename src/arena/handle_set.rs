//! The [`HandleSet`] type and associated definitions.

use super::{Arena, Handle};

/// A set of `Handle<T>` values.
pub struct HandleSet<T> {
    /// `members[i]` is true if the handle with index `i` is a member.
    members: bit_set::BitSet,

    /// This type is indexed by values of type `T`.
    as_keys: std::marker::PhantomData<T>,
}

impl<T> HandleSet<T> {
    /// Create an empty set, sized to hold handles of `arena`.
    pub fn for_arena(arena: &Arena<T>) -> Self {
        Self {
            members: bit_set::BitSet::with_capacity(arena.len()),
            as_keys: std::marker::PhantomData,
        }
    }

    /// Add `handle` to the set.
    ///
    /// Return `true` if `handle` was not already present in the set.
    pub fn insert(&mut self, handle: Handle<T>) -> bool {
        self.members.insert(handle.index())
    }

    /// Add handles from `iter` to the set.
    pub fn insert_iter(&mut self, iter: impl IntoIterator<Item = Handle<T>>) {
        for handle in iter {
            self.insert(handle);
        }
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.members.contains(handle.index())
    }
}
