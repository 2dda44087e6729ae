//! # Indexed Priority Queue
//!
//! `IndexedHeap` is a binary heap over a dense array (parent of `i` is
//! `(i - 1) / 2`, children `2i + 1` and `2i + 2`) that hands out a [`Handle`]
//! per item. The handle lets a caller lower an item's key in O(log n) without
//! searching for it, which is what Dijkstra's relaxation step needs.
//!
//! Items live in a slab; the heap array holds slab slots and each slab entry
//! records its current heap position. A handle names a slab slot plus the
//! generation the slot had when the item went in. The generation is bumped
//! when the item leaves the queue, so a stale handle is rejected rather than
//! silently addressing whatever took the slot next.

use std::cmp::Ordering;

use crate::{Error, Result};

/// Opaque reference to an item inside one `IndexedHeap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: u32,
    generation: u64,
}

struct Entry<T, K> {
    generation: u64,
    /// Position in `heap` while occupied.
    position: usize,
    value: Option<(T, K)>,
}

/// Binary heap ordered by a comparator over caller-supplied keys.
///
/// The item whose key compares `Less` than every other is the optimum; with
/// the default comparator this is a min-heap. Equal keys leave no guaranteed
/// order.
pub struct IndexedHeap<T, K, C = fn(&K, &K) -> Ordering> {
    heap: Vec<u32>,
    entries: Vec<Entry<T, K>>,
    free: Vec<u32>,
    compare: C,
}

impl<T, K: Ord> IndexedHeap<T, K> {
    /// Min-heap over `K`'s natural order.
    pub fn new() -> Self {
        Self::with_comparator(K::cmp)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut heap = Self::new();
        heap.heap.reserve(capacity);
        heap.entries.reserve(capacity);
        heap
    }

    /// Build a min-heap from `items` in O(n).
    ///
    /// Returns one handle per item, in input order.
    pub fn from_items<I>(items: I) -> (Self, Vec<Handle>)
    where
        I: IntoIterator<Item = (T, K)>,
    {
        Self::from_items_with(items, K::cmp)
    }
}

impl<T, K: Ord> Default for IndexedHeap<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K, C> IndexedHeap<T, K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(compare: C) -> Self {
        Self { heap: Vec::new(), entries: Vec::new(), free: Vec::new(), compare }
    }

    /// Bulk construction: place every item, then sift down each non-leaf
    /// from the last one to the root.
    pub fn from_items_with<I>(items: I, compare: C) -> (Self, Vec<Handle>)
    where
        I: IntoIterator<Item = (T, K)>,
    {
        let mut queue = Self::with_comparator(compare);
        let mut handles = Vec::new();
        for (position, (item, key)) in items.into_iter().enumerate() {
            queue.entries.push(Entry { generation: 0, position, value: Some((item, key)) });
            queue.heap.push(position as u32);
            handles.push(Handle { slot: position as u32, generation: 0 });
        }
        for position in (0..queue.heap.len() / 2).rev() {
            queue.sift_down(position);
        }
        (queue, handles)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert an item and return its handle.
    ///
    /// Fails with `Allocation` if the queue cannot grow; nothing changes then.
    pub fn push(&mut self, item: T, key: K) -> Result<Handle> {
        self.heap.try_reserve(1)?;
        let position = self.heap.len();
        let handle = match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.entries[slot as usize];
                entry.position = position;
                entry.value = Some((item, key));
                Handle { slot, generation: entry.generation }
            }
            None => {
                self.entries.try_reserve(1)?;
                let slot = self.entries.len() as u32;
                self.entries.push(Entry { generation: 0, position, value: Some((item, key)) });
                Handle { slot, generation: 0 }
            }
        };
        self.heap.push(handle.slot);
        self.sift_up(position);
        Ok(handle)
    }

    /// The optimal item and its key, without removing it.
    pub fn peek(&self) -> Result<(&T, &K)> {
        let slot = *self.heap.first().ok_or(Error::EmptyQueue)?;
        let (item, key) = self.entries[slot as usize].value.as_ref().ok_or(Error::EmptyQueue)?;
        Ok((item, key))
    }

    /// Remove the optimal item. Its handle expires.
    pub fn pop(&mut self) -> Result<(T, K)> {
        if self.heap.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let slot = self.heap.pop().ok_or(Error::EmptyQueue)?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        self.release(slot).ok_or(Error::EmptyQueue)
    }

    /// Replace the key behind `handle` with a strictly better one.
    ///
    /// Fails with `KeyNotImproved` if `key` does not compare `Less` than the
    /// current key, and with `InvalidHandle` if the item already left the queue.
    pub fn improve_key(&mut self, handle: Handle, key: K) -> Result<()> {
        let entry = self.entries
            .get_mut(handle.slot as usize)
            .filter(|e| e.generation == handle.generation)
            .ok_or(Error::InvalidHandle)?;
        let position = entry.position;
        let current = entry.value.as_mut().map(|(_, k)| k).ok_or(Error::InvalidHandle)?;
        if (self.compare)(&key, current) != Ordering::Less {
            return Err(Error::KeyNotImproved);
        }
        *current = key;
        self.sift_up(position);
        Ok(())
    }

    /// Current key of a queued item.
    pub fn key(&self, handle: Handle) -> Result<&K> {
        let entry = self.entry(handle)?;
        entry.value.as_ref().map(|(_, k)| k).ok_or(Error::InvalidHandle)
    }

    pub fn get(&self, handle: Handle) -> Result<&T> {
        let entry = self.entry(handle)?;
        entry.value.as_ref().map(|(item, _)| item).ok_or(Error::InvalidHandle)
    }

    /// Whether `handle` still names an item in this queue.
    pub fn contains(&self, handle: Handle) -> bool {
        self.entry(handle).is_ok()
    }

    /// Remove every item. Every outstanding handle expires.
    pub fn clear(&mut self) {
        while let Some(slot) = self.heap.pop() {
            self.release(slot);
        }
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn entry(&self, handle: Handle) -> Result<&Entry<T, K>> {
        self.entries
            .get(handle.slot as usize)
            .filter(|e| e.generation == handle.generation && e.value.is_some())
            .ok_or(Error::InvalidHandle)
    }

    /// Empty a slab slot that is no longer in `heap`.
    fn release(&mut self, slot: u32) -> Option<(T, K)> {
        let entry = &mut self.entries[slot as usize];
        entry.generation += 1;
        let value = entry.value.take();
        self.free.push(slot);
        value
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let key_a = self.entries[self.heap[a] as usize].value.as_ref().map(|(_, k)| k);
        let key_b = self.entries[self.heap[b] as usize].value.as_ref().map(|(_, k)| k);
        match (key_a, key_b) {
            (Some(a), Some(b)) => (self.compare)(a, b) == Ordering::Less,
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.entries[self.heap[a] as usize].position = a;
        self.entries[self.heap[b] as usize].position = b;
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if self.less(node, parent) {
                self.swap(node, parent);
                node = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * node + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut best = left;
            if right < len && self.less(right, left) {
                best = right;
            }

            if self.less(best, node) {
                self.swap(node, best);
                node = best;
            } else {
                break;
            }
        }
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        for (position, &slot) in self.heap.iter().enumerate() {
            assert_eq!(self.entries[slot as usize].position, position, "stale position");
            if position > 0 {
                assert!(!self.less(position, (position - 1) / 2), "heap order broken at {position}");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
