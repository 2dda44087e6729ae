//! Breadth-first search: fewest edges, weights ignored.
//!
//! Vertices are discovered in non-decreasing distance order, so the search
//! stops the first time the target is discovered. Each vertex enters the
//! frontier at most once, which bounds it by the vertex count.

use std::collections::VecDeque;

use crate::graph::{Graph, VertexRef};
use crate::model::{Path, VertexId};
use crate::Result;
use super::{endpoints, reconstruct, Decoration, ShortestPath};

#[derive(Debug, Clone, Copy, Default)]
pub struct Bfs;

impl ShortestPath for Bfs {
    fn id(&self) -> &'static str {
        "bfs"
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
        let mut frontier = VecDeque::with_capacity(vertices.len());

        marks[start.position()] = Decoration { visited: true, distance: 0, parent: None };
        frontier.push_back(start.position());

        'search: while let Some(current) = frontier.pop_front() {
            let distance = marks[current].distance + 1;
            for edge in vertices[current].edges() {
                let next = graph.vertex(edge.target)?.position();
                if marks[next].visited {
                    continue;
                }
                marks[next] = Decoration { visited: true, distance, parent: Some(current) };
                if next == goal.position() {
                    break 'search;
                }
                frontier.push_back(next);
            }
        }

        let path = reconstruct(&vertices, &marks, goal.position());
        tracing::debug!(found = path.exists(), length = ?path.length(), "bfs finished");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DirectedGraph, UndirectedGraph};

    #[test]
    fn test_fewest_edges_ignores_weight() {
        let mut g = DirectedGraph::new("g");
        let a = g.add_vertex("A").unwrap();
        let b = g.add_vertex("B").unwrap();
        let c = g.add_vertex("C").unwrap();
        g.add_edge(a, b, 2).unwrap();
        g.add_edge(b, c, 3).unwrap();
        g.add_edge(a, c, 10).unwrap();

        let path = Bfs.find_shortest_path(&g, a, c).unwrap();
        assert_eq!(path.vertices(), ["A", "C"]);
        assert_eq!(path.length(), Some(1));
    }

    #[test]
    fn test_respects_direction() {
        let mut g = DirectedGraph::new("g");
        let a = g.add_vertex("A").unwrap();
        let b = g.add_vertex("B").unwrap();
        g.add_edge(b, a, 1).unwrap();

        assert!(!Bfs.find_shortest_path(&g, a, b).unwrap().exists());
        assert_eq!(Bfs.find_shortest_path(&g, b, a).unwrap().length(), Some(1));
    }

    #[test]
    fn test_undirected_chain() {
        let mut g = UndirectedGraph::new("chain");
        let ids: Vec<VertexId> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|id| g.add_vertex(id).unwrap())
            .collect();
        for pair in ids.windows(2) {
            g.add_edge(pair[0], pair[1], 1).unwrap();
        }

        let path = Bfs.find_shortest_path(&g, ids[4], ids[0]).unwrap();
        assert_eq!(path.vertices(), ["E", "D", "C", "B", "A"]);
        assert_eq!(path.length(), Some(4));
    }

    #[test]
    fn test_cycle_back_to_source() {
        let mut g = DirectedGraph::new("cycle");
        let a = g.add_vertex("A").unwrap();
        let b = g.add_vertex("B").unwrap();
        let c = g.add_vertex("C").unwrap();
        g.add_edge(a, b, 1).unwrap();
        g.add_edge(b, a, 1).unwrap();
        g.add_edge(b, c, 1).unwrap();

        let path = Bfs.find_shortest_path(&g, a, c).unwrap();
        assert_eq!(path.vertices(), ["A", "B", "C"]);
    }
}
