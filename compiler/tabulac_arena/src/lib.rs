//! Contains the definition of [`Arena`] and [`ID`].
//!
//! [`Arena`] is an append-only store for items of type `T` referenced through
//! the strongly-typed [`ID<T>`] index. Declaration trees and symbol stores
//! keep their nodes in an [`Arena`] and wire them together with [`ID`]s,
//! which keeps the borrow checker out of the way when a pass walks one node
//! while mutating another.

use std::{
    fmt::Debug,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

/// Represents a unique identifier to a particular entry in the [`Arena`] of
/// type `T`.
pub struct ID<T> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T> ID<T> {
    /// Creates a new [`ID`] with the given raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self { Self { index, _marker: PhantomData } }

    /// Returns the raw index of this [`ID`].
    #[must_use]
    pub const fn into_index(self) -> usize { self.index }
}

// `T` is phantom; the ID itself is always plain data.
unsafe impl<T> Send for ID<T> {}
unsafe impl<T> Sync for ID<T> {}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ty_name = std::any::type_name::<T>();
        f.debug_tuple(format!("ID<{ty_name}>").as_str())
            .field(&self.index)
            .finish()
    }
}

impl<T> Clone for ID<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for ID<T> {}

impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool { self.index == other.index }
}

impl<T> Eq for ID<T> {}

impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> std::hash::Hash for ID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// Represents an append-only collection of items of type `T` referenced by
/// [`ID<T>`].
///
/// Items are stored in a [`Vec`] and never removed, so every [`ID`] handed
/// out stays valid for the lifetime of the [`Arena`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arena<T> {
    items: Vec<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self { Self { items: Vec::new() } }
}

impl<T> Arena<T> {
    /// Creates a new empty [`Arena`].
    #[must_use]
    pub const fn new() -> Self { Self { items: Vec::new() } }

    /// Returns the number of items in the [`Arena`].
    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns `true` if the [`Arena`] contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Inserts a new item into the [`Arena`] and returns its [`ID`].
    pub fn insert(&mut self, item: T) -> ID<T> {
        let index = self.items.len();
        self.items.push(item);
        ID::new(index)
    }

    /// Returns `true` if the given [`ID`] points to an item in this
    /// [`Arena`].
    #[must_use]
    pub fn contains_id(&self, id: ID<T>) -> bool {
        id.into_index() < self.items.len()
    }

    /// Returns a reference to the item with the given [`ID`].
    #[must_use]
    pub fn get(&self, id: ID<T>) -> Option<&T> {
        self.items.get(id.into_index())
    }

    /// Returns a mutable reference to the item with the given [`ID`].
    #[must_use]
    pub fn get_mut(&mut self, id: ID<T>) -> Option<&mut T> {
        self.items.get_mut(id.into_index())
    }

    /// Returns an iterator over the items in the [`Arena`] in insertion
    /// order.
    #[must_use]
    pub fn items(&self) -> impl ExactSizeIterator<Item = &T> {
        self.items.iter()
    }

    /// Returns a mutable iterator over the items in the [`Arena`] in
    /// insertion order.
    pub fn items_mut(&mut self) -> impl ExactSizeIterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Returns an iterator over the [`ID`]s of the items in the [`Arena`] in
    /// insertion order.
    #[must_use]
    pub fn ids(&self) -> impl ExactSizeIterator<Item = ID<T>> {
        (0..self.items.len()).map(ID::new)
    }

    /// Returns an iterator over `(ID, &T)` pairs in insertion order.
    #[must_use]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (ID<T>, &T)> {
        self.items.iter().enumerate().map(|(index, item)| (ID::new(index), item))
    }
}

impl<T> Index<ID<T>> for Arena<T> {
    type Output = T;

    fn index(&self, id: ID<T>) -> &Self::Output {
        match self.get(id) {
            Some(item) => item,
            None => panic!("invalid {id:?}"),
        }
    }
}

impl<T> IndexMut<ID<T>> for Arena<T> {
    fn index_mut(&mut self, id: ID<T>) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(item) => item,
            None => panic!("invalid {id:?}"),
        }
    }
}

impl<T> IntoIterator for Arena<T> {
    type IntoIter = std::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter { self.items.into_iter() }
}

impl<'a, T> IntoIterator for &'a Arena<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

impl<'a, T> IntoIterator for &'a mut Arena<T> {
    type IntoIter = std::slice::IterMut<'a, T>;
    type Item = &'a mut T;

    fn into_iter(self) -> Self::IntoIter { self.items.iter_mut() }
}

#[cfg(test)]
mod tests;
