//! Dijkstra's algorithm over positive integer weights.
//!
//! Every vertex is queued up front keyed by its tentative distance (zero for
//! the source, infinity for the rest), using the heap's bulk construction.
//! A popped vertex is settled: its distance is final and it is never relaxed
//! again. The search ends when the target is settled, or when the smallest
//! remaining distance is infinite, since nothing left can be reached.

use crate::graph::{Graph, VertexRef};
use crate::model::{Distance, Path, VertexId, INFINITY};
use crate::queue::IndexedHeap;
use crate::Result;
use super::{endpoints, reconstruct, Decoration, ShortestPath};

#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl ShortestPath for Dijkstra {
    fn id(&self) -> &'static str {
        "dijkstra"
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
        let (start, goal) = endpoints(graph, source, target)?;
        if source == target {
            return Ok(Path::trivial(start.id()));
        }

        let vertices: Vec<VertexRef<'_>> = graph.vertices().collect();
        let mut marks = vec![Decoration::default(); vertices.len()];
        marks[start.position()].distance = 0;

        let (mut queue, handles) =
            IndexedHeap::from_items(marks.iter().enumerate().map(|(position, m)| (position, m.distance)));

        let mut settled = 0usize;
        while let Ok((current, distance)) = queue.pop() {
            if distance == INFINITY {
                tracing::trace!(remaining = queue.len() + 1, "rest of the graph is unreachable");
                break;
            }
            marks[current].visited = true;
            settled += 1;
            if current == goal.position() {
                break;
            }

            for edge in vertices[current].edges() {
                let next = graph.vertex(edge.target)?.position();
                if marks[next].visited {
                    continue;
                }
                let candidate = distance.saturating_add(Distance::from(edge.weight));
                if candidate < marks[next].distance {
                    queue.improve_key(handles[next], candidate)?;
                    marks[next].distance = candidate;
                    marks[next].parent = Some(current);
                }
            }
        }

        let path = reconstruct(&vertices, &marks, goal.position());
        tracing::debug!(settled, found = path.exists(), length = ?path.length(), "dijkstra finished");
        Ok(path)
    }
}
