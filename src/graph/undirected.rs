//! Undirected graph: each edge is a pair of mirrored adjacency records.
//!
//! Both records are added or removed together. If the second half of a pair
//! cannot be written, the first is rolled back before the error is returned,
//! so a half edge is never observable. A self-loop is a single record.
//!
//! Removing a vertex only walks its own adjacency list, since every neighbour
//! pointing at it is also in that list: O(degree).

use smallvec::SmallVec;

use crate::model::{VertexId, Weight};
use crate::{Error, Result};
use super::store::VertexStore;
use super::{Graph, GraphKind, VertexRef, Vertices};

pub struct UndirectedGraph {
    id: String,
    store: VertexStore,
}

impl UndirectedGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), store: VertexStore::new() }
    }

    fn no_such_edge(&self, from: VertexId, to: VertexId) -> Error {
        Error::NoSuchEdge { from: self.store.name(from), to: self.store.name(to) }
    }
}

impl std::fmt::Debug for UndirectedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndirectedGraph")
            .field("id", &self.id)
            .field("vertices", &self.store.len())
            .field("edges", &self.store.edge_count)
            .finish()
    }
}

impl Graph for UndirectedGraph {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> GraphKind {
        GraphKind::Undirected
    }

    // ========================================================================
    // Vertices
    // ========================================================================

    fn add_vertex(&mut self, id: &str) -> Result<VertexId> {
        let key = self.store.insert(id)?;
        tracing::debug!(graph = %self.id, vertex = id, "vertex added");
        Ok(key)
    }

    fn remove_vertex(&mut self, vertex: VertexId) -> Result<()> {
        let position = self.store.prepare_detach(vertex)?;
        let neighbours: SmallVec<[VertexId; 8]> = self
            .store
            .at(position)
            .out
            .iter()
            .map(|e| e.target)
            .filter(|&target| target != vertex)
            .collect();

        for &neighbour in &neighbours {
            let at = self.store.position(neighbour)?;
            self.store.take_edge(at, vertex);
        }
        let degree = self.store.at(position).out.len();
        self.store.edge_count -= degree;

        let removed = self.store.detach(position)?;
        tracing::debug!(
            graph = %self.id,
            vertex = %removed.name,
            degree,
            "vertex removed"
        );
        Ok(())
    }

    fn vertex_with_id(&self, id: &str) -> Result<VertexId> {
        self.store.lookup(id)
    }

    fn vertex(&self, vertex: VertexId) -> Result<VertexRef<'_>> {
        let position = self.store.position(vertex)?;
        Ok(VertexRef::new(self.store.at(position), position))
    }

    fn vertices(&self) -> Vertices<'_> {
        Vertices::new(self.store.vertices())
    }

    fn vertex_count(&self) -> usize {
        self.store.len()
    }

    // ========================================================================
    // Edges
    // ========================================================================

    fn add_edge(&mut self, from: VertexId, to: VertexId, weight: Weight) -> Result<()> {
        if weight == 0 {
            return Err(Error::InvalidWeight(weight));
        }
        let a = self.store.position(from)?;
        let b = self.store.position(to)?;
        if self.store.find_edge(a, to).is_some() || self.store.find_edge(b, from).is_some() {
            return Err(Error::DuplicateEdge {
                from: self.store.name(from),
                to: self.store.name(to),
            });
        }

        self.store.push_edge(a, to, weight)?;
        if from != to {
            if let Err(err) = self.store.push_edge(b, from, weight) {
                self.store.take_edge(a, to);
                return Err(err);
            }
        }
        self.store.edge_count += 1;
        tracing::trace!(graph = %self.id, from = %from, to = %to, weight, "edge added");
        Ok(())
    }

    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        let a = self.store.position(from)?;
        let b = self.store.position(to)?;
        let (idx, edge) = self
            .store
            .take_edge(a, to)
            .ok_or_else(|| self.no_such_edge(from, to))?;
        if from != to && self.store.take_edge(b, from).is_none() {
            self.store.restore_edge(a, idx, edge);
            return Err(self.no_such_edge(to, from));
        }
        self.store.edge_count -= 1;
        tracing::trace!(graph = %self.id, from = %from, to = %to, "edge removed");
        Ok(())
    }

    fn has_edge(&self, from: VertexId, to: VertexId) -> Result<bool> {
        let a = self.store.position(from)?;
        self.store.position(to)?;
        Ok(self.store.find_edge(a, to).is_some())
    }

    fn edge_count(&self) -> usize {
        self.store.edge_count
    }
}

// ============================================================================
// Tests
// ============================================================================
