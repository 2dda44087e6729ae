//! Iterative deepening depth-first search.
//!
//! Runs a depth-limited search for limits `1..=V-1`, returning the first
//! path that reaches the target at exactly the current limit. The first
//! limit that succeeds is the fewest-edges distance. Live state is the
//! current path and its vertex set, O(depth), instead of per-vertex
//! decoration. The trade is time: shallow levels are re-explored on every
//! deeper pass, and simple paths are enumerated rather than vertices.
//!
//! Only vertices on the current path are excluded, so a vertex reached by a
//! longer prefix can still be tried again through a shorter one.

use hashbrown::HashSet;

use crate::graph::{Edges, Graph, VertexRef};
use crate::model::{Path, VertexId};
use crate::Result;
use super::{endpoints, ShortestPath};

#[derive(Debug, Clone, Copy, Default)]
pub struct Iddfs;

impl ShortestPath for Iddfs {
    fn id(&self) -> &'static str {
        "iddfs"
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(graph = graph.id(), source = %source, target = %target)
    )]
    fn find_shortest_path(
        &self,
        graph: &dyn Graph,
        source: VertexId,
        target: VertexId,
    ) -> Result<Path> {
        let (start, _) = endpoints(graph, source, target)?;
        if source == target {
            return Ok(Path::trivial(start.id()));
        }

        let mut on_path = HashSet::new();
        for limit in 1..graph.vertex_count() {
            if let Some(ids) = depth_limited(graph, start, target, limit, &mut on_path)? {
                tracing::debug!(limit, "iddfs found target");
                return Ok(Path::new(ids, limit as u64));
            }
            tracing::trace!(limit, "limit exhausted");
        }
        tracing::debug!("iddfs found no path");
        Ok(Path::none())
    }
}

/// Walk every simple path of exactly `limit` edges out of `start`, with an
/// explicit stack of edge cursors in place of recursion.
fn depth_limited<'g>(
    graph: &'g dyn Graph,
    start: VertexRef<'g>,
    target: VertexId,
    limit: usize,
    on_path: &mut HashSet<VertexId>,
) -> Result<Option<Vec<String>>> {
    on_path.clear();
    on_path.insert(start.key());
    let mut stack: Vec<(VertexRef<'g>, Edges<'g>)> = vec![(start, start.edges())];

    loop {
        let depth = stack.len();
        let step = match stack.last_mut() {
            Some((_, cursor)) => cursor.next(),
            None => return Ok(None),
        };

        let Some(edge) = step else {
            if let Some((done, _)) = stack.pop() {
                on_path.remove(&done.key());
            }
            continue;
        };
        if on_path.contains(&edge.target) {
            continue;
        }

        let next = graph.vertex(edge.target)?;
        if depth == limit {
            if edge.target == target {
                let ids = stack
                    .iter()
                    .map(|(v, _)| v.id())
                    .chain(std::iter::once(next.id()))
                    .map(str::to_string)
                    .collect();
                return Ok(Some(ids));
            }
            continue;
        }
        on_path.insert(next.key());
        stack.push((next, next.edges()));
    }
}
