// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sharded accumulator for parallel scoring.
//!
//! The scoring loop wants `relevance[id] += tf * idf` from many rayon tasks
//! at once. One big mutex would serialize the whole loop; this map shards the
//! key space over independently locked buckets instead, so tasks touching
//! different buckets never contend. Keys land in bucket `key as u64 %
//! bucket_count`, which spreads scattered document ids evenly.
//!
//! **Invariant**: a slot handle holds its bucket's lock for the handle's
//! whole lifetime. Two handles for the same bucket cannot coexist on
//! different tasks - the second blocks until the first drops. Handles for
//! different buckets proceed in parallel.
//!
//! Finalization consumes the map, so the borrow checker rules out the
//! finalize-while-handles-outstanding race instead of documentation ruling
//! it out.

use crate::types::DocumentId;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

/// A `DocumentId → f64` map sharded over independently locked buckets.
pub struct ConcurrentMap {
    buckets: Vec<Mutex<BTreeMap<DocumentId, f64>>>,
}

impl ConcurrentMap {
    /// Create a map with `bucket_count` shards (clamped to at least one).
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        ConcurrentMap {
            buckets: (0..bucket_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    #[inline]
    fn bucket_of(&self, key: DocumentId) -> usize {
        (key as u64 % self.buckets.len() as u64) as usize
    }

    /// Lock the bucket owning `key` and return a handle to its value slot,
    /// zero-initialized on first touch. The lock is held until the handle
    /// drops.
    pub fn slot(&self, key: DocumentId) -> MappedMutexGuard<'_, f64> {
        let guard = self.buckets[self.bucket_of(key)].lock();
        MutexGuard::map(guard, |bucket| bucket.entry(key).or_insert(0.0))
    }

    /// Drop `key` from the map, if present.
    pub fn remove(&self, key: DocumentId) {
        self.buckets[self.bucket_of(key)].lock().remove(&key);
    }

    /// Merge every bucket into a single map ordered by ascending key.
    pub fn into_ordered(self) -> BTreeMap<DocumentId, f64> {
        let mut merged = BTreeMap::new();
        for bucket in self.buckets {
            merged.extend(bucket.into_inner());
        }
        merged
    }
}
