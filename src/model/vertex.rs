//! Vertex keys and edge weights.

use serde::{Deserialize, Serialize};

/// Edge weight. Always positive once stored in a graph.
pub type Weight = u32;

/// Accumulated path length. `INFINITY` marks an unreached vertex.
pub type Distance = u64;

/// Distance of a vertex no search has reached yet.
pub const INFINITY: Distance = Distance::MAX;

/// Generational vertex key.
///
/// Stays valid for as long as the vertex it was issued for is alive. Once the
/// vertex is removed its slot may be reused, but the generation differs, so
/// the old key is rejected rather than resolving to the new occupant. The
/// `graph` tag makes keys from one graph foreign to every other graph.
///
/// Tags and generations are 64-bit, so neither wraps within a process
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexId {
    pub(crate) graph: u64,
    pub(crate) slot: u32,
    pub(crate) generation: u64,
}

impl VertexId {
    pub(crate) fn new(graph: u64, slot: u32, generation: u64) -> Self {
        Self { graph, slot, generation }
    }

    /// Slot number inside the owning graph. Not a dense position.
    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}@g{}", self.slot, self.generation, self.graph)
    }
}
