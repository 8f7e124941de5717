//! Ordered storage addressed by stable ids
//!
//! [`IdVec`] keeps items in a `Vec` (the authoritative order) and maintains an
//! id to index map next to it. Every mutation that shifts positions rebuilds
//! the affected part of the map.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Items that carry their own stable key
pub trait Keyed {
    /// Key type
    type Key: Copy + Eq + Hash + Debug;

    /// Returns the item's key
    fn key(&self) -> Self::Key;
}

/// Ordered collection with O(1) lookup by key
#[derive(Debug, Clone)]
pub struct IdVec<T: Keyed> {
    items: Vec<T>,
    index: HashMap<T::Key, usize>,
}

impl<T: Keyed> Default for IdVec<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> IdVec<T> {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an item and returns its key
    pub fn push(&mut self, item: T) -> T::Key {
        let key = item.key();
        self.index.insert(key, self.items.len());
        self.items.push(item);
        key
    }

    /// Current position of `key`
    pub fn position(&self, key: T::Key) -> Option<usize> {
        self.index.get(&key).copied()
    }

    /// Looks an item up by key
    pub fn get(&self, key: T::Key) -> Option<&T> {
        self.position(key).map(|i| &self.items[i])
    }

    /// Looks an item up by key, mutably
    pub fn get_mut(&mut self, key: T::Key) -> Option<&mut T> {
        match self.position(key) {
            Some(i) => Some(&mut self.items[i]),
            None => None,
        }
    }

    /// Item at `index`
    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Removes the item with `key`, shifting later items up
    pub fn remove(&mut self, key: T::Key) -> Option<T> {
        let position = self.index.remove(&key)?;
        let item = self.items.remove(position);
        self.reindex_from(position);
        Some(item)
    }

    /// Swaps the items at two positions
    ///
    /// Returns false when either position is out of range.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.items.len() || b >= self.items.len() {
            return false;
        }
        self.items.swap(a, b);
        self.index.insert(self.items[a].key(), a);
        self.index.insert(self.items[b].key(), b);
        true
    }

    /// Iterates items in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Items in order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Keys in order
    pub fn keys(&self) -> Vec<T::Key> {
        self.items.iter().map(Keyed::key).collect()
    }

    fn reindex_from(&mut self, start: usize) {
        for (offset, item) in self.items[start..].iter().enumerate() {
            self.index.insert(item.key(), start + offset);
        }
    }
}

impl<'a, T: Keyed> IntoIterator for &'a IdVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
