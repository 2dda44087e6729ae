//! Vertex storage shared by both graph variants.
//!
//! Vertices live in a dense `Vec` so iteration has no holes and removal is a
//! swap with the last element. Keys go through a generational slot table, so a
//! vertex keeps its `VertexId` when a removal moves it to a new position. The
//! identifier index maps names to keys.
//!
//! Invariants, restored before every method returns:
//! - `slots[v.key.slot].dense == Some(i)` for the vertex `v` at position `i`
//! - the index and the dense vector hold the same vertex set

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::index::{Keyed, ProbeTable};
use crate::model::{VertexId, Weight};
use crate::{Error, Result};

static NEXT_GRAPH_TAG: AtomicU64 = AtomicU64::new(1);

/// Outgoing edge record, owned by its source vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub(crate) target: VertexId,
    pub(crate) weight: Weight,
}

pub(crate) type AdjacencyList = SmallVec<[Edge; 4]>;

#[derive(Debug)]
pub(crate) struct Vertex {
    pub(crate) name: Arc<str>,
    pub(crate) key: VertexId,
    pub(crate) out: AdjacencyList,
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    dense: Option<usize>,
}

#[derive(Debug)]
struct IndexEntry {
    name: Arc<str>,
    key: VertexId,
}

impl Keyed for IndexEntry {
    type Key = str;

    fn key(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
pub(crate) struct VertexStore {
    tag: u64,
    vertices: Vec<Vertex>,
    slots: Vec<Slot>,
    free: Vec<u32>,
    index: ProbeTable<IndexEntry>,
    /// Logical edges; the variant decides what one logical edge is.
    pub(crate) edge_count: usize,
    /// Edge records that may still be pushed before `push_edge` fails.
    #[cfg(test)]
    pub(crate) push_budget: Option<usize>,
}

impl VertexStore {
    pub(crate) fn new() -> Self {
        Self {
            tag: NEXT_GRAPH_TAG.fetch_add(1, Ordering::Relaxed),
            vertices: Vec::new(),
            slots: Vec::new(),
            free: Vec::new(),
            index: ProbeTable::new(),
            edge_count: 0,
            #[cfg(test)]
            push_budget: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    pub(crate) fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub(crate) fn at(&self, position: usize) -> &Vertex {
        &self.vertices[position]
    }

    /// Dense position of an owned vertex.
    ///
    /// Rejects keys from other graphs, keys of removed vertices (generation
    /// mismatch) and keys whose slot does not point back at the same vertex.
    pub(crate) fn position(&self, key: VertexId) -> Result<usize> {
        if key.graph != self.tag {
            return Err(Error::ForeignVertex(key));
        }
        let slot = self.slots.get(key.slot as usize).ok_or(Error::ForeignVertex(key))?;
        if slot.generation != key.generation {
            return Err(Error::ForeignVertex(key));
        }
        match slot.dense {
            Some(position) if self.vertices.get(position).is_some_and(|v| v.key == key) => {
                Ok(position)
            }
            _ => Err(Error::ForeignVertex(key)),
        }
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<VertexId> {
        self.index
            .find(name)
            .map(|entry| entry.key)
            .ok_or_else(|| Error::NoSuchVertex(name.to_string()))
    }

    /// Name of an owned vertex, for error messages.
    pub(crate) fn name(&self, key: VertexId) -> String {
        self.position(key)
            .map(|p| self.vertices[p].name.to_string())
            .unwrap_or_else(|_| key.to_string())
    }

    // ------------------------------------------------------------------------
    // Vertex lifecycle
    // ------------------------------------------------------------------------

    /// Add a vertex with no edges.
    ///
    /// Every allocation happens before the first write, so a failure leaves
    /// the store untouched.
    pub(crate) fn insert(&mut self, name: &str) -> Result<VertexId> {
        if name.is_empty() {
            return Err(Error::EmptyIdentifier);
        }
        if self.index.contains(name) {
            return Err(Error::DuplicateVertex(name.to_string()));
        }

        self.vertices.try_reserve(1)?;
        let reused = self.free.last().copied();
        let key = match reused {
            Some(slot) => VertexId::new(self.tag, slot, self.slots[slot as usize].generation),
            None => {
                self.slots.try_reserve(1)?;
                VertexId::new(self.tag, self.slots.len() as u32, 0)
            }
        };

        let name: Arc<str> = Arc::from(name);
        self.index.insert(IndexEntry { name: Arc::clone(&name), key })?;

        let position = self.vertices.len();
        match reused {
            Some(slot) => {
                self.free.pop();
                self.slots[slot as usize].dense = Some(position);
            }
            None => self.slots.push(Slot { generation: 0, dense: Some(position) }),
        }
        self.vertices.push(Vertex { name, key, out: AdjacencyList::new() });
        Ok(key)
    }

    /// Reserve what `detach` needs, so the variant can strip edges knowing the
    /// removal itself cannot fail afterwards.
    pub(crate) fn prepare_detach(&mut self, key: VertexId) -> Result<usize> {
        let position = self.position(key)?;
        self.free.try_reserve(1)?;
        Ok(position)
    }

    /// Swap-and-compact removal of the vertex at `position`.
    ///
    /// Incident edges must already be gone.
    pub(crate) fn detach(&mut self, position: usize) -> Result<Vertex> {
        let key = self.vertices[position].key;
        self.index.remove(&*self.vertices[position].name)?;

        let vertex = self.vertices.swap_remove(position);
        if let Some(moved) = self.vertices.get(position) {
            self.slots[moved.key.slot as usize].dense = Some(position);
        }

        let slot = &mut self.slots[key.slot as usize];
        slot.dense = None;
        slot.generation += 1;
        self.free.push(key.slot);
        Ok(vertex)
    }

    // ------------------------------------------------------------------------
    // Edge records
    // ------------------------------------------------------------------------

    pub(crate) fn find_edge(&self, position: usize, target: VertexId) -> Option<usize> {
        self.vertices[position].out.iter().position(|e| e.target == target)
    }

    pub(crate) fn push_edge(&mut self, position: usize, target: VertexId, weight: Weight) -> Result<()> {
        self.spend_push_budget()?;
        let out = &mut self.vertices[position].out;
        out.try_reserve(1)?;
        out.push(Edge { target, weight });
        Ok(())
    }

    #[cfg(test)]
    fn spend_push_budget(&mut self) -> Result<()> {
        match self.push_budget.as_mut() {
            Some(0) => Err(Error::Allocation("edge record budget exhausted".to_string())),
            Some(budget) => {
                *budget -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    #[cfg(not(test))]
    fn spend_push_budget(&mut self) -> Result<()> {
        Ok(())
    }

    /// Remove the record `position -> target`, returning where it was.
    pub(crate) fn take_edge(&mut self, position: usize, target: VertexId) -> Option<(usize, Edge)> {
        let idx = self.find_edge(position, target)?;
        Some((idx, self.vertices[position].out.remove(idx)))
    }

    /// Put back a record removed by `take_edge`. Never allocates: the list
    /// still has the capacity the record occupied.
    pub(crate) fn restore_edge(&mut self, position: usize, idx: usize, edge: Edge) {
        self.vertices[position].out.insert(idx, edge);
    }

    /// Drop every record pointing at `target`, across all vertices.
    pub(crate) fn strip_edges_to(&mut self, target: VertexId) -> usize {
        let mut removed = 0;
        for vertex in &mut self.vertices {
            let before = vertex.out.len();
            vertex.out.retain(|e| e.target != target);
            removed += before - vertex.out.len();
        }
        removed
    }
}

// ============================================================================
// Tests
// ============================================================================
