//! Directed graph: one adjacency record per edge.
//!
//! Removing a vertex has to find edges pointing at it from anywhere, so it
//! scans every adjacency list: O(V + E).

use crate::model::{VertexId, Weight};
use crate::{Error, Result};
use super::store::VertexStore;
use super::{Graph, GraphKind, VertexRef, Vertices};

pub struct DirectedGraph {
    id: String,
    store: VertexStore,
}

impl DirectedGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), store: VertexStore::new() }
    }
}

impl std::fmt::Debug for DirectedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectedGraph")
            .field("id", &self.id)
            .field("vertices", &self.store.len())
            .field("edges", &self.store.edge_count)
            .finish()
    }
}

impl Graph for DirectedGraph {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> GraphKind {
        GraphKind::Directed
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
        let incoming = self.store.strip_edges_to(vertex);
        let outgoing = self.store.at(position).out.len();
        self.store.edge_count -= incoming + outgoing;

        let removed = self.store.detach(position)?;
        tracing::debug!(
            graph = %self.id,
            vertex = %removed.name,
            incoming,
            outgoing,
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
        let source = self.store.position(from)?;
        self.store.position(to)?;
        if self.store.find_edge(source, to).is_some() {
            return Err(Error::DuplicateEdge {
                from: self.store.name(from),
                to: self.store.name(to),
            });
        }

        self.store.push_edge(source, to, weight)?;
        self.store.edge_count += 1;
        tracing::trace!(graph = %self.id, from = %from, to = %to, weight, "edge added");
        Ok(())
    }

    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        let source = self.store.position(from)?;
        self.store.position(to)?;
        if self.store.take_edge(source, to).is_none() {
            return Err(Error::NoSuchEdge {
                from: self.store.name(from),
                to: self.store.name(to),
            });
        }
        self.store.edge_count -= 1;
        tracing::trace!(graph = %self.id, from = %from, to = %to, "edge removed");
        Ok(())
    }

    fn has_edge(&self, from: VertexId, to: VertexId) -> Result<bool> {
        let source = self.store.position(from)?;
        self.store.position(to)?;
        Ok(self.store.find_edge(source, to).is_some())
    }

    fn edge_count(&self) -> usize {
        self.store.edge_count
    }
}

// ============================================================================
// Tests
// ============================================================================
