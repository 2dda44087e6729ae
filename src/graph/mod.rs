//! # Graph Trait
//!
//! This is THE contract between graph storage and everything that reads or
//! mutates it: the shortest-path algorithms, the text loader/saver and any
//! command layer on top.
//!
//! ## Implementations
//!
//! | Graph | Module | Description |
//! |-------|--------|-------------|
//! | `DirectedGraph` | `directed` | One record per edge |
//! | `UndirectedGraph` | `undirected` | Two mirrored records per edge, added and removed as a pair |
//!
//! ## Vertex lifecycle
//!
//! ```text
//! absent --add_vertex--> no edges --add_edge--> with edges
//!    ^                                               |
//!    +-------------remove_vertex (strips edges)------+
//! ```
//!
//! Iterators borrow the graph, so the borrow checker rules out mutation
//! while one is alive.

pub mod directed;
pub mod undirected;
mod store;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{VertexId, Weight};
use crate::{Error, Result};
use store::{Edge, Vertex};

pub use directed::DirectedGraph;
pub use undirected::UndirectedGraph;

// ============================================================================
// Graph kind
// ============================================================================

/// Immutable type tag chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    Directed,
    Undirected,
}

impl GraphKind {
    pub const ALL: [GraphKind; 2] = [GraphKind::Directed, GraphKind::Undirected];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::Directed => "directed",
            GraphKind::Undirected => "undirected",
        }
    }
}

impl std::fmt::Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphKind {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        GraphKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| Error::UnsupportedGraphType(tag.to_string()))
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Create an empty graph of the given kind.
pub fn create_graph(kind: GraphKind, id: &str) -> Result<Box<dyn Graph>> {
    tracing::debug!(graph = id, %kind, "creating graph");
    Ok(match kind {
        GraphKind::Directed => Box::new(DirectedGraph::new(id)),
        GraphKind::Undirected => Box::new(UndirectedGraph::new(id)),
    })
}

/// Create an empty graph from its type tag (`"directed"` or `"undirected"`).
pub fn create_graph_from_tag(tag: &str, id: &str) -> Result<Box<dyn Graph>> {
    create_graph(tag.parse()?, id)
}

// ============================================================================
// Graph Trait
// ============================================================================

/// A graph with named vertices and positive integer edge weights.
///
/// Every method that takes a `VertexId` first checks that the vertex is alive
/// and owned by this graph, failing with `ForeignVertex` otherwise.
pub trait Graph: std::fmt::Debug {
    fn id(&self) -> &str;

    fn kind(&self) -> GraphKind;

    // ========================================================================
    // Vertices
    // ========================================================================

    /// Add a vertex with no edges.
    ///
    /// Fails with `EmptyIdentifier` or `DuplicateVertex`.
    fn add_vertex(&mut self, id: &str) -> Result<VertexId>;

    /// Remove a vertex and every edge that starts or ends at it.
    ///
    /// The last vertex in iteration order takes the removed one's place.
    fn remove_vertex(&mut self, vertex: VertexId) -> Result<()>;

    /// Look up a vertex by identifier, failing with `NoSuchVertex`.
    fn vertex_with_id(&self, id: &str) -> Result<VertexId>;

    fn vertex(&self, vertex: VertexId) -> Result<VertexRef<'_>>;

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertex(vertex).is_ok()
    }

    /// All vertices in dense order. Stable between mutations.
    fn vertices(&self) -> Vertices<'_>;

    fn vertex_count(&self) -> usize;

    // ========================================================================
    // Edges
    // ========================================================================

    /// Add an edge, failing with `DuplicateEdge` if it already exists and
    /// with `InvalidWeight` for a zero weight.
    fn add_edge(&mut self, from: VertexId, to: VertexId, weight: Weight) -> Result<()>;

    /// Remove an edge, failing with `NoSuchEdge` if it does not exist.
    fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<()>;

    fn has_edge(&self, from: VertexId, to: VertexId) -> Result<bool>;

    /// Outgoing edges of a vertex.
    fn edges(&self, vertex: VertexId) -> Result<Edges<'_>> {
        Ok(self.vertex(vertex)?.edges())
    }

    /// Logical edge count. An undirected edge counts once.
    fn edge_count(&self) -> usize;
}

// ============================================================================
// Borrowed views
// ============================================================================

/// A vertex borrowed from its graph.
#[derive(Clone, Copy)]
pub struct VertexRef<'g> {
    vertex: &'g Vertex,
    position: usize,
}

impl<'g> VertexRef<'g> {
    pub(crate) fn new(vertex: &'g Vertex, position: usize) -> Self {
        Self { vertex, position }
    }

    pub fn id(&self) -> &'g str {
        &self.vertex.name
    }

    pub fn key(&self) -> VertexId {
        self.vertex.key
    }

    /// Position in the graph's dense vertex order, `0..vertex_count()`.
    ///
    /// Changes when another vertex is removed; use `key()` to hold on to a
    /// vertex across mutations.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn out_degree(&self) -> usize {
        self.vertex.out.len()
    }

    pub fn edges(&self) -> Edges<'g> {
        Edges { inner: self.vertex.out.iter() }
    }
}

impl std::fmt::Debug for VertexRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexRef")
            .field("id", &self.id())
            .field("key", &self.key())
            .field("position", &self.position)
            .finish()
    }
}

/// An outgoing edge: destination and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    pub target: VertexId,
    pub weight: Weight,
}

/// Iterator over a graph's vertices.
pub struct Vertices<'g> {
    inner: std::iter::Enumerate<std::slice::Iter<'g, Vertex>>,
}

impl<'g> Vertices<'g> {
    pub(crate) fn new(vertices: &'g [Vertex]) -> Self {
        Self { inner: vertices.iter().enumerate() }
    }
}

impl<'g> Iterator for Vertices<'g> {
    type Item = VertexRef<'g>;

    fn next(&mut self) -> Option<VertexRef<'g>> {
        self.inner.next().map(|(position, vertex)| VertexRef::new(vertex, position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Vertices<'_> {}

/// Iterator over one vertex's outgoing edges.
pub struct Edges<'g> {
    inner: std::slice::Iter<'g, Edge>,
}

impl Iterator for Edges<'_> {
    type Item = EdgeRef;

    fn next(&mut self) -> Option<EdgeRef> {
        self.inner.next().map(|e| EdgeRef { target: e.target, weight: e.weight })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Edges<'_> {}

// ============================================================================
// Tests
// ============================================================================
