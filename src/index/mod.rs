//! # Associative Index
//!
//! `ProbeTable` maps a key extracted from each item to the item itself, using
//! open addressing with linear probing. The graph keeps one per instance to
//! resolve vertex identifiers to vertex keys in O(1) on average.
//!
//! ## Load factor
//!
//! The table keeps `3 · len ≤ 2 · capacity` at all times, so a probe always
//! reaches an empty slot. An insert that would cross that bound doubles the
//! capacity until the table is at most a third full. A removal that leaves the
//! table less than a sixth full halves it while it stays under a third full,
//! never below [`MIN_CAPACITY`]. The gap between the two bounds keeps an
//! insert/remove pair at a boundary from resizing twice.
//!
//! ## Removal
//!
//! Linear probing cannot leave holes: an item further down the same cluster
//! may have probed past the freed slot. Every item after the freed slot, up to
//! the next empty one, is reinserted on removal.

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use hashbrown::DefaultHashBuilder;

use crate::{Error, Result};

/// Smallest slot count a table ever has.
pub const MIN_CAPACITY: usize = 3;

/// Extracts the lookup key from a stored item.
pub trait Keyed {
    type Key: ?Sized + Hash + Eq;

    fn key(&self) -> &Self::Key;
}

impl<K: Hash + Eq, V> Keyed for (K, V) {
    type Key = K;

    fn key(&self) -> &K {
        &self.0
    }
}

// ============================================================================
// ProbeTable
// ============================================================================

/// Open-addressing hash table keyed by [`Keyed::key`].
pub struct ProbeTable<T, S = DefaultHashBuilder> {
    slots: Vec<Option<T>>,
    len: usize,
    hasher: S,
}

impl<T: Keyed> ProbeTable<T> {
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Table that holds `capacity` items without resizing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<T: Keyed> Default for ProbeTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed, S: BuildHasher> ProbeTable<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        let slots = (capacity.saturating_mul(3).div_ceil(2)).max(MIN_CAPACITY);
        Self { slots: empty_slots(slots), len: 0, hasher }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots, occupied or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Insert an item under its own key.
    ///
    /// Fails with `DuplicateKey` if the key is already present, or with
    /// `Allocation` if the table had to grow and could not. The table is
    /// unchanged on failure.
    pub fn insert(&mut self, item: T) -> Result<()> {
        let free = match self.probe(item.key()) {
            Ok(_) => return Err(Error::DuplicateKey),
            Err(free) => free,
        };

        if 3 * (self.len + 1) > 2 * self.slots.len() {
            let target = grown_capacity(self.len + 1, self.slots.len())?;
            self.resize(target)?;
            place(&mut self.slots, &self.hasher, item);
        } else {
            self.slots[free] = Some(item);
        }
        self.len += 1;
        Ok(())
    }

    /// Remove and return the item stored under `key`.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<T>
    where
        T::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.probe(key).map_err(|_| Error::NoSuchKey)?;
        let item = self.slots[idx].take().ok_or(Error::NoSuchKey)?;
        self.len -= 1;
        self.close_gap(idx);

        if 6 * self.len < self.slots.len() {
            let target = shrunk_capacity(self.len, self.slots.len());
            if target < self.slots.len() {
                if let Err(err) = self.resize(target) {
                    tracing::warn!(
                        len = self.len,
                        capacity = self.slots.len(),
                        error = %err,
                        "probe table shrink failed, keeping current capacity"
                    );
                }
            }
        }
        Ok(item)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.probe(key).is_ok()
    }

    /// Look up by key, failing with `NoSuchKey` if absent.
    pub fn get<Q>(&self, key: &Q) -> Result<&T>
    where
        T::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).ok_or(Error::NoSuchKey)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut T>
    where
        T::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.probe(key).map_err(|_| Error::NoSuchKey)?;
        self.slots[idx].as_mut().ok_or(Error::NoSuchKey)
    }

    pub fn find<Q>(&self, key: &Q) -> Option<&T>
    where
        T::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.probe(key).ok()?;
        self.slots[idx].as_ref()
    }

    /// Items in slot order. Order changes whenever the table resizes.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Drop every item and return to the minimum capacity.
    pub fn clear(&mut self) {
        self.slots = empty_slots(MIN_CAPACITY);
        self.len = 0;
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// `Ok(slot)` holding `key`, or `Err(slot)` of the empty slot ending its probe.
    fn probe<Q>(&self, key: &Q) -> std::result::Result<usize, usize>
    where
        T::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let size = self.slots.len();
        let mut idx = home(&self.hasher, key, size);
        loop {
            match &self.slots[idx] {
                None => return Err(idx),
                Some(item) if item.key().borrow() == key => return Ok(idx),
                Some(_) => idx = (idx + 1) % size,
            }
        }
    }

    /// Reinsert the rest of the cluster that followed a freed slot.
    fn close_gap(&mut self, freed: usize) {
        let size = self.slots.len();
        let mut idx = (freed + 1) % size;
        while let Some(item) = self.slots[idx].take() {
            place(&mut self.slots, &self.hasher, item);
            idx = (idx + 1) % size;
        }
    }

    /// Move every item into a fresh table of `capacity` slots.
    ///
    /// The new slot vector is fully allocated before the current one is
    /// touched, so an allocation failure leaves the table as it was.
    fn resize(&mut self, capacity: usize) -> Result<()> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);

        let from = self.slots.len();
        for item in std::mem::take(&mut self.slots).into_iter().flatten() {
            place(&mut slots, &self.hasher, item);
        }
        self.slots = slots;
        tracing::debug!(from, to = capacity, len = self.len, "probe table resized");
        Ok(())
    }
}

impl<T: Keyed + std::fmt::Debug, S> std::fmt::Debug for ProbeTable<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.slots.iter().filter_map(Option::as_ref)).finish()
    }
}

fn empty_slots<T>(capacity: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

fn home<Q: ?Sized + Hash, S: BuildHasher>(hasher: &S, key: &Q, size: usize) -> usize {
    (hasher.hash_one(key) % size as u64) as usize
}

/// Store `item` in the first empty slot of its probe sequence.
fn place<T: Keyed, S: BuildHasher>(slots: &mut [Option<T>], hasher: &S, item: T) {
    let size = slots.len();
    let mut idx = home(hasher, item.key(), size);
    while slots[idx].is_some() {
        idx = (idx + 1) % size;
    }
    slots[idx] = Some(item);
}

fn grown_capacity(len: usize, current: usize) -> Result<usize> {
    let mut capacity = current.max(MIN_CAPACITY);
    while capacity < len.saturating_mul(3) {
        capacity = capacity
            .checked_mul(2)
            .ok_or_else(|| Error::Allocation("probe table capacity overflow".into()))?;
    }
    Ok(capacity)
}

fn shrunk_capacity(len: usize, current: usize) -> usize {
    let mut capacity = current;
    while capacity / 2 >= MIN_CAPACITY && 3 * len < capacity {
        capacity /= 2;
    }
    capacity
}

// ============================================================================
// Tests
// ============================================================================
