//! # pathgraph: In-Memory Graph Engine and Shortest-Path Solver
//!
//! Directed and undirected graphs with named vertices and positive integer
//! edge weights, O(1)-average vertex lookup by identifier, and three
//! interchangeable shortest-path algorithms.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Graph` is the contract between mutation and search;
//!    `ShortestPath` is the contract between search and its callers
//! 2. **Generational keys**: a `VertexId` from another graph, or for a removed
//!    vertex, is rejected instead of aliasing whatever reused its slot
//! 3. **Search state is local**: algorithms never write to the graph, so any
//!    number of searches may borrow the same graph at once
//! 4. **Strong failure guarantee**: a failed mutation leaves every structure as
//!    it was before the call
//!
//! ## Quick Start
//!
//! ```rust
//! use pathgraph::{create_graph, algorithm, Graph, GraphKind};
//!
//! # fn example() -> pathgraph::Result<()> {
//! let mut graph = create_graph(GraphKind::Directed, "roads")?;
//! let a = graph.add_vertex("A")?;
//! let b = graph.add_vertex("B")?;
//! let c = graph.add_vertex("C")?;
//! graph.add_edge(a, b, 2)?;
//! graph.add_edge(b, c, 3)?;
//! graph.add_edge(a, c, 10)?;
//!
//! let path = algorithm("dijkstra")?.find_shortest_path(graph.as_ref(), a, c)?;
//! assert_eq!(path.length(), Some(5));
//! assert_eq!(path.to_string(), "A -> B -> C (length 5)");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Components
//!
//! | Component | Module | Description |
//! |-----------|--------|-------------|
//! | Associative index | `index` | Open-addressing table, linear probing |
//! | Indexed priority queue | `queue` | Binary min-heap with decrease-key handles |
//! | Graph ADT | `graph` | Directed / undirected adjacency-list graphs |
//! | Algorithms | `algo` | BFS, Dijkstra, iterative-deepening DFS |
//! | Load/save | `format` | Plain-text graph layout |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod index;
pub mod queue;
pub mod graph;
pub mod algo;
pub mod format;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Path, VertexId, Weight, Distance, INFINITY};

// ============================================================================
// Re-exports: Graph
// ============================================================================

pub use graph::{
    Graph, GraphKind, DirectedGraph, UndirectedGraph, VertexRef, EdgeRef,
    Vertices, Edges, create_graph, create_graph_from_tag,
};

// ============================================================================
// Re-exports: Algorithms
// ============================================================================

pub use algo::{ShortestPath, AlgorithmKind, Bfs, Dijkstra, Iddfs, algorithm};

// ============================================================================
// Re-exports: Load/save
// ============================================================================

pub use format::{read_graph, write_graph};

// ============================================================================
// Re-exports: Building blocks
// ============================================================================

pub use index::{ProbeTable, Keyed};
pub use queue::{IndexedHeap, Handle};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vertex identifier must not be empty")]
    EmptyIdentifier,

    #[error("duplicate vertex: {0}")]
    DuplicateVertex(String),

    #[error("no such vertex: {0}")]
    NoSuchVertex(String),

    #[error("foreign vertex: {0} is not owned by this graph")]
    ForeignVertex(VertexId),

    #[error("duplicate edge: {from} -> {to}")]
    DuplicateEdge { from: String, to: String },

    #[error("no such edge: {from} -> {to}")]
    NoSuchEdge { from: String, to: String },

    #[error("edge weight must be positive, got {0}")]
    InvalidWeight(u32),

    #[error("key already present")]
    DuplicateKey,

    #[error("no such key")]
    NoSuchKey,

    #[error("queue is empty")]
    EmptyQueue,

    #[error("invalid or expired queue handle")]
    InvalidHandle,

    #[error("key can't be worsened")]
    KeyNotImproved,

    #[error("unsupported graph type: {0}")]
    UnsupportedGraphType(String),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("allocation failed: {0}")]
    Allocation(String),

    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::collections::TryReserveError> for Error {
    fn from(err: std::collections::TryReserveError) -> Self {
        Error::Allocation(err.to_string())
    }
}

impl From<smallvec::CollectionAllocErr> for Error {
    fn from(err: smallvec::CollectionAllocErr) -> Self {
        Error::Allocation(format!("{err:?}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
