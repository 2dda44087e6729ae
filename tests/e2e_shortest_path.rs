//! End-to-end tests for the shortest-path family.
//!
//! Every algorithm is driven through the registry and the `Graph` trait
//! object, the way a command layer would use them.

use pathgraph::{
    algorithm, create_graph, AlgorithmKind, Error, Graph, GraphKind, Path, ShortestPath, VertexId,
};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

/// A→B(2), B→C(3), A→C(10)
fn abc(kind: GraphKind) -> (Box<dyn Graph>, VertexId, VertexId, VertexId) {
    let mut g = create_graph(kind, "abc").unwrap();
    let a = g.add_vertex("A").unwrap();
    let b = g.add_vertex("B").unwrap();
    let c = g.add_vertex("C").unwrap();
    g.add_edge(a, b, 2).unwrap();
    g.add_edge(b, c, 3).unwrap();
    g.add_edge(a, c, 10).unwrap();
    (g, a, b, c)
}

fn run(name: &str, g: &dyn Graph, from: VertexId, to: VertexId) -> Path {
    algorithm(name).unwrap().find_shortest_path(g, from, to).unwrap()
}

/// 4x4 grid, unit weights.
fn grid() -> (Box<dyn Graph>, Vec<VertexId>) {
    let mut g = create_graph(GraphKind::Undirected, "grid").unwrap();
    let ids: Vec<VertexId> = (0..16)
        .map(|i| g.add_vertex(&format!("{},{}", i / 4, i % 4)).unwrap())
        .collect();
    for i in 0..16 {
        if i % 4 != 3 {
            g.add_edge(ids[i], ids[i + 1], 1).unwrap();
        }
        if i < 12 {
            g.add_edge(ids[i], ids[i + 4], 1).unwrap();
        }
    }
    (g, ids)
}

// ============================================================================
// 1. Weighted vs. unweighted answers
// ============================================================================

#[test]
fn test_dijkstra_takes_lighter_route() {
    let (g, a, _, c) = abc(GraphKind::Directed);
    let path = run("dijkstra", g.as_ref(), a, c);
    assert_eq!(path.vertices(), ["A", "B", "C"]);
    assert_eq!(path.length(), Some(5));
    assert_eq!(path.to_string(), "A -> B -> C (length 5)");
}

#[test]
fn test_bfs_takes_fewest_edges() {
    let (g, a, _, c) = abc(GraphKind::Directed);
    let path = run("bfs", g.as_ref(), a, c);
    assert_eq!(path.vertices(), ["A", "C"]);
    assert_eq!(path.length(), Some(1));
}

#[test]
fn test_iddfs_matches_bfs_hop_count() {
    let (g, a, _, c) = abc(GraphKind::Directed);
    assert_eq!(run("iddfs", g.as_ref(), a, c), run("bfs", g.as_ref(), a, c));
}

#[test]
fn test_undirected_reverse_direction() {
    let (g, a, _, c) = abc(GraphKind::Undirected);
    let path = run("dijkstra", g.as_ref(), c, a);
    assert_eq!(path.vertices(), ["C", "B", "A"]);
    assert_eq!(path.length(), Some(5));
}

// ============================================================================
// 2. Degenerate inputs
// ============================================================================

#[test]
fn test_disconnected_has_no_path() {
    for kind in GraphKind::ALL {
        let mut g = create_graph(kind, "split").unwrap();
        let a = g.add_vertex("A").unwrap();
        let b = g.add_vertex("B").unwrap();
        for algo in AlgorithmKind::ALL {
            let path = algo.instance().find_shortest_path(g.as_ref(), a, b).unwrap();
            assert!(!path.exists(), "{algo} on {kind}");
            assert_eq!(path, Path::none());
            assert_eq!(path.to_string(), "no path");
        }
    }
}

#[test]
fn test_source_equals_target() {
    let (g, _, b, _) = abc(GraphKind::Directed);
    for algo in AlgorithmKind::ALL {
        let path = algo.instance().find_shortest_path(g.as_ref(), b, b).unwrap();
        assert_eq!(path.vertices(), ["B"], "{algo}");
        assert_eq!(path.length(), Some(0));
    }
}

#[test]
fn test_foreign_endpoint_rejected() {
    let (g, a, _, _) = abc(GraphKind::Directed);
    let (_, other, _, _) = abc(GraphKind::Directed);
    for algo in AlgorithmKind::ALL {
        let err = algo.instance().find_shortest_path(g.as_ref(), a, other).unwrap_err();
        assert!(matches!(err, Error::ForeignVertex(v) if v == other), "{algo}");
    }
}

#[test]
fn test_removed_endpoint_rejected() {
    let (mut g, a, b, _) = abc(GraphKind::Directed);
    g.remove_vertex(b).unwrap();
    let err = algorithm("bfs").unwrap().find_shortest_path(g.as_ref(), a, b).unwrap_err();
    assert!(matches!(err, Error::ForeignVertex(_)));
}

#[test]
fn test_unknown_algorithm_before_search() {
    let err = algorithm("bellman-ford").unwrap_err();
    assert_eq!(err.to_string(), "unsupported algorithm: bellman-ford");
}

// ============================================================================
// 3. Agreement between algorithms
// ============================================================================

#[test]
fn test_unit_weights_all_agree_on_grid() {
    let (g, ids) = grid();
    for &target in &ids {
        let lengths: Vec<Option<u64>> = AlgorithmKind::ALL
            .iter()
            .map(|algo| algo.instance().find_shortest_path(g.as_ref(), ids[0], target).unwrap().length())
            .collect();
        assert!(lengths.iter().all(|l| *l == lengths[0]), "{lengths:?}");
    }
    // corner to corner is 6 steps on a 4x4 grid
    assert_eq!(run("bfs", g.as_ref(), ids[0], ids[15]).length(), Some(6));
}

#[test]
fn test_path_is_walkable() {
    let (g, ids) = grid();
    for algo in AlgorithmKind::ALL {
        let path = algo.instance().find_shortest_path(g.as_ref(), ids[3], ids[12]).unwrap();
        let keys: Vec<VertexId> = path
            .vertices()
            .iter()
            .map(|id| g.vertex_with_id(id).unwrap())
            .collect();
        for pair in keys.windows(2) {
            assert!(g.has_edge(pair[0], pair[1]).unwrap(), "{algo}: {path}");
        }
        assert_eq!(path.hops(), Some(6));
    }
}

// ============================================================================
// 4. Searches only read the graph
// ============================================================================

#[test]
fn test_concurrent_searches_share_graph() {
    let (g, ids) = grid();
    let g: &dyn Graph = g.as_ref();
    let first = run("dijkstra", g, ids[0], ids[15]);
    let second = run("bfs", g, ids[15], ids[0]);
    let third = run("dijkstra", g, ids[0], ids[15]);
    assert_eq!(first, third);
    assert_eq!(first.length(), second.length());
}

#[test]
fn test_search_after_mutation() {
    let (mut g, a, b, c) = abc(GraphKind::Directed);
    assert_eq!(run("dijkstra", g.as_ref(), a, c).length(), Some(5));

    g.remove_edge(b, c).unwrap();
    assert_eq!(run("dijkstra", g.as_ref(), a, c).vertices(), ["A", "C"]);

    g.remove_vertex(a).unwrap();
    let d = g.add_vertex("D").unwrap();
    g.add_edge(d, b, 1).unwrap();
    g.add_edge(b, c, 1).unwrap();
    assert_eq!(run("iddfs", g.as_ref(), d, c).vertices(), ["D", "B", "C"]);
}
