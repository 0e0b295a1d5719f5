use core::{
    fmt::{Debug, Formatter, Result as FmtResult},
    hash::Hash,
    num::NonZeroUsize,
};
use std::{collections::HashMap, sync::Arc};

use bls::PublicKeyBytes;
use lru::LruCache;
use nonzero_ext::nonzero;
use once_cell::sync::OnceCell;
use types::phase0::primitives::{Epoch, Gwei, ValidatorIndex, H256};

pub const ACTIVE_INDICES_CAPACITY: NonZeroUsize = nonzero!(5_usize);
pub const SHUFFLED_INDICES_CAPACITY: NonZeroUsize = nonzero!(5_usize);
pub const COMMITTEES_CAPACITY: NonZeroUsize = nonzero!(256_usize);

/// Least-recently-used map with a fixed number of entries.
///
/// Cloning produces an independent cache with the same entries in the same recency order.
pub struct BoundedCache<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
}

impl<K: Hash + Eq + Clone, V: Clone> Clone for BoundedCache<K, V> {
    fn clone(&self) -> Self {
        let mut entries = LruCache::new(self.entries.cap());

        // `LruCache::iter` starts at the most recently used entry.
        for (key, value) in self.entries.iter().rev() {
            entries.put(key.clone(), value.clone());
        }

        Self { entries }
    }
}

impl<K: Hash + Eq, V> Debug for BoundedCache<K, V> {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        formatter
            .debug_struct("BoundedCache")
            .field("capacity", &self.entries.cap())
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<K: Hash + Eq, V> BoundedCache<K, V> {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Looks up `key` and marks it as the most recently used entry.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Stores `value`, evicting the least recently used entry if the cache is full.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.put(key, value);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.entries.cap()
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }
}

/// Identifies a beacon committee. `slot_in_epoch` is the slot relative to the start of `epoch`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CommitteeKey {
    pub epoch: Epoch,
    pub slot_in_epoch: u64,
    pub index: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TotalActiveBalance {
    pub epoch: Epoch,
    pub total: Gwei,
    pub square_root: u64,
}

// Index sets are stored behind `Arc` and never mutated after insertion,
// so cloning a state only copies pointers to them.
#[derive(Clone, Debug)]
pub struct Caches {
    pub active_indices: BoundedCache<Epoch, Arc<[ValidatorIndex]>>,
    pub shuffled_indices: BoundedCache<H256, Arc<[ValidatorIndex]>>,
    pub committees: BoundedCache<CommitteeKey, Arc<[ValidatorIndex]>>,
    pub total_active_balance: Option<TotalActiveBalance>,
    pub proposer_index: Option<ValidatorIndex>,
    pub validator_indices: OnceCell<HashMap<PublicKeyBytes, ValidatorIndex>>,
}

impl Default for Caches {
    fn default() -> Self {
        Self {
            active_indices: BoundedCache::new(ACTIVE_INDICES_CAPACITY),
            shuffled_indices: BoundedCache::new(SHUFFLED_INDICES_CAPACITY),
            committees: BoundedCache::new(COMMITTEES_CAPACITY),
            total_active_balance: None,
            proposer_index: None,
            validator_indices: OnceCell::new(),
        }
    }
}

impl Caches {
    /// Drops everything derived from the validator registry.
    pub fn invalidate_registry(&mut self) {
        self.active_indices.clear();
        self.shuffled_indices.clear();
        self.committees.clear();
        self.total_active_balance = None;
        self.proposer_index = None;
        self.validator_indices.take();
    }

    /// Drops everything derived from RANDAO mixes.
    ///
    /// Shuffled sets are keyed by their seed and stay valid.
    pub fn invalidate_randomness(&mut self) {
        self.committees.clear();
        self.proposer_index = None;
    }

    pub fn advance_slot(&mut self) {
        self.proposer_index = None;
    }
}
