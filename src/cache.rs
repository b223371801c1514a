// Copyright 2019-2026 CH Graph Store Authors
// SPDX-License-Identifier: Apache-2.0, MIT

//! The fixed-capacity LRU cache fronting each of the three on-disk
//! structures.
//!
//! Wraps `hashlink::LruCache` in a `RefCell`: the reader owns its caches
//! exclusively, so there is no concurrent access to guard against.

use hashlink::LruCache;
use std::cell::RefCell;
use std::hash::Hash;
use std::num::NonZeroUsize;

pub(crate) struct BoundedCache<K, V> {
    inner: RefCell<LruCache<K, V>>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: RefCell::new(LruCache::new(capacity.get())),
        }
    }

    /// `tryGet`: returns a clone of the cached value and marks it
    /// most-recently-used, or `None` on a miss.
    pub(crate) fn try_get(&self, key: &K) -> Option<V> {
        self.inner.borrow_mut().get(key).cloned()
    }

    /// `insert`: evicts the least-recently-used entry if at capacity, and
    /// marks the new entry most-recently-used.
    pub(crate) fn insert(&self, key: K, value: V) {
        self.inner.borrow_mut().insert(key, value);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.borrow().len()
    }
}
