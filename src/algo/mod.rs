//! # Shortest-Path Algorithms
//!
//! Every algorithm follows the same protocol:
//!
//! 1. check both endpoints belong to the graph
//! 2. answer `source == target` with the zero-length path
//! 3. run its own search over per-call decoration (visited flag, distance,
//!    parent), indexed by dense vertex position
//! 4. rebuild the path by following parents back from the target
//!
//! Decoration is owned by the call and dropped with it, so searches never
//! write to the graph and any number of them may share one.
//!
//! | Algorithm | Id | Length reported | Extra memory |
//! |-----------|----|-----------------|--------------|
//! | `Bfs` | `bfs` | edge count | O(V) |
//! | `Dijkstra` | `dijkstra` | summed weight | O(V) |
//! | `Iddfs` | `iddfs` | edge count | O(depth) |

pub mod bfs;
pub mod dijkstra;
pub mod iddfs;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, VertexRef};
use crate::model::{Distance, Path, VertexId, INFINITY};
use crate::{Error, Result};

pub use bfs::Bfs;
pub use dijkstra::Dijkstra;
pub use iddfs::Iddfs;

// ============================================================================
// ShortestPath Trait
// ============================================================================

/// A shortest-path strategy.
pub trait ShortestPath: std::fmt::Debug {
    /// Registry name, as accepted by [`algorithm`].
    fn id(&self) -> &'static str;

    /// Shortest path from `source` to `target`, or `Path::none()` if the
    /// target is unreachable.
    ///
    /// Fails with `ForeignVertex` if either endpoint is not a live vertex of
    /// `graph`. The graph is only read.
    fn find_shortest_path(
        &self,
        graph: &dyn Graph,
        source: VertexId,
        target: VertexId,
    ) -> Result<Path>;
}

// ============================================================================
// Registry
// ============================================================================

/// The algorithms this crate ships, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    Bfs,
    Dijkstra,
    Iddfs,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 3] = [AlgorithmKind::Bfs, AlgorithmKind::Dijkstra, AlgorithmKind::Iddfs];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "bfs",
            AlgorithmKind::Dijkstra => "dijkstra",
            AlgorithmKind::Iddfs => "iddfs",
        }
    }

    pub fn instance(&self) -> Box<dyn ShortestPath> {
        match self {
            AlgorithmKind::Bfs => Box::new(Bfs),
            AlgorithmKind::Dijkstra => Box::new(Dijkstra),
            AlgorithmKind::Iddfs => Box::new(Iddfs),
        }
    }
}

impl std::fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| Error::UnsupportedAlgorithm(name.to_string()))
    }
}

/// Look up an algorithm by name, failing with `UnsupportedAlgorithm`.
pub fn algorithm(name: &str) -> Result<Box<dyn ShortestPath>> {
    Ok(name.parse::<AlgorithmKind>()?.instance())
}

// ============================================================================
// Shared search state
// ============================================================================

/// Per-vertex search state for one call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decoration {
    pub(crate) visited: bool,
    pub(crate) distance: Distance,
    pub(crate) parent: Option<usize>,
}

impl Default for Decoration {
    fn default() -> Self {
        Self { visited: false, distance: INFINITY, parent: None }
    }
}

/// Resolve both endpoints through the graph's ownership check.
pub(crate) fn endpoints<'g>(
    graph: &'g dyn Graph,
    source: VertexId,
    target: VertexId,
) -> Result<(VertexRef<'g>, VertexRef<'g>)> {
    Ok((graph.vertex(source)?, graph.vertex(target)?))
}

/// Walk parent links back from `target`. No parent means no path.
pub(crate) fn reconstruct(vertices: &[VertexRef<'_>], marks: &[Decoration], target: usize) -> Path {
    if marks[target].parent.is_none() {
        return Path::none();
    }
    let mut ids = vec![vertices[target].id().to_string()];
    let mut current = target;
    while let Some(parent) = marks[current].parent {
        ids.push(vertices[parent].id().to_string());
        current = parent;
    }
    ids.reverse();
    Path::new(ids, marks[target].distance)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(algorithm(kind.as_str()).unwrap().id(), kind.as_str());
        }
    }

    #[test]
    fn test_unknown_algorithm() {
        let err = algorithm("a-star").unwrap_err();
        assert!(matches!(err, Error::UnsupportedAlgorithm(n) if n == "a-star"));
        assert_eq!(
            "Bfs".parse::<AlgorithmKind>().unwrap_err().to_string(),
            "unsupported algorithm: Bfs"
        );
    }

    #[test]
    fn test_fresh_decoration() {
        let mark = Decoration::default();
        assert!(!mark.visited);
        assert_eq!(mark.distance, INFINITY);
        assert!(mark.parent.is_none());
    }
}
