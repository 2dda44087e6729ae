//! End-to-end tests for graph construction and mutation through the
//! `Graph` trait object.

use pathgraph::{create_graph, create_graph_from_tag, Error, Graph, GraphKind, VertexId};
use pretty_assertions::assert_eq;

fn names(g: &dyn Graph) -> Vec<String> {
    g.vertices().map(|v| v.id().to_string()).collect()
}

// ============================================================================
// 1. Vertices
// ============================================================================

#[test]
fn test_vertex_lifecycle() {
    for kind in GraphKind::ALL {
        let mut g = create_graph(kind, "g").unwrap();
        let a = g.add_vertex("A").unwrap();
        let b = g.add_vertex("B").unwrap();
        let c = g.add_vertex("C").unwrap();
        assert_eq!(g.vertex_count(), 3);

        g.remove_vertex(a).unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert!(!g.contains_vertex(a));
        assert_eq!(g.vertex_with_id("B").unwrap(), b);
        assert_eq!(g.vertex_with_id("C").unwrap(), c);
        assert_eq!(names(g.as_ref()), vec!["C", "B"]);

        // the identifier is free again, under a fresh key
        let a2 = g.add_vertex("A").unwrap();
        assert_ne!(a2, a);
        assert_eq!(g.vertex(a2).unwrap().id(), "A");
    }
}

#[test]
fn test_vertex_usage_errors() {
    let mut g = create_graph_from_tag("directed", "g").unwrap();
    g.add_vertex("A").unwrap();

    assert!(matches!(g.add_vertex(""), Err(Error::EmptyIdentifier)));
    assert!(matches!(g.add_vertex("A"), Err(Error::DuplicateVertex(id)) if id == "A"));
    assert!(matches!(g.vertex_with_id("Z"), Err(Error::NoSuchVertex(id)) if id == "Z"));
    assert_eq!(g.vertex_count(), 1);
}

#[test]
fn test_many_vertices_stay_reachable() {
    let mut g = create_graph(GraphKind::Undirected, "big").unwrap();
    let keys: Vec<VertexId> = (0..500).map(|i| g.add_vertex(&format!("v{i}")).unwrap()).collect();
    for i in (0..500).step_by(3) {
        g.remove_vertex(keys[i]).unwrap();
    }
    for (i, &key) in keys.iter().enumerate() {
        let found = g.vertex_with_id(&format!("v{i}"));
        if i % 3 == 0 {
            assert!(found.is_err());
        } else {
            assert_eq!(found.unwrap(), key);
        }
    }
    assert_eq!(g.vertex_count(), 500 - 167);
}

// ============================================================================
// 2. Edges
// ============================================================================

#[test]
fn test_directed_vs_undirected_edges() {
    let mut d = create_graph(GraphKind::Directed, "d").unwrap();
    let mut u = create_graph(GraphKind::Undirected, "u").unwrap();
    for g in [&mut d, &mut u] {
        let a = g.add_vertex("A").unwrap();
        let b = g.add_vertex("B").unwrap();
        g.add_edge(a, b, 3).unwrap();
    }

    let (da, db) = (d.vertex_with_id("A").unwrap(), d.vertex_with_id("B").unwrap());
    let (ua, ub) = (u.vertex_with_id("A").unwrap(), u.vertex_with_id("B").unwrap());
    assert!(d.has_edge(da, db).unwrap());
    assert!(!d.has_edge(db, da).unwrap());
    assert!(u.has_edge(ua, ub).unwrap());
    assert!(u.has_edge(ub, ua).unwrap());
    assert_eq!(d.edge_count(), 1);
    assert_eq!(u.edge_count(), 1);
}

#[test]
fn test_remove_vertex_leaves_no_dangling_edges() {
    for kind in GraphKind::ALL {
        let mut g = create_graph(kind, "star").unwrap();
        let hub = g.add_vertex("hub").unwrap();
        let spokes: Vec<VertexId> = (0..6).map(|i| g.add_vertex(&format!("s{i}")).unwrap()).collect();
        for (i, &s) in spokes.iter().enumerate() {
            if i % 2 == 0 {
                g.add_edge(hub, s, 1).unwrap();
            } else {
                g.add_edge(s, hub, 1).unwrap();
            }
        }
        g.add_edge(spokes[0], spokes[1], 1).unwrap();

        g.remove_vertex(hub).unwrap();
        assert_eq!(g.edge_count(), 1, "{kind}");
        for v in g.vertices() {
            for e in v.edges() {
                assert!(g.contains_vertex(e.target), "{kind}: {} points at a removed vertex", v.id());
            }
        }
    }
}

#[test]
fn test_edge_errors_leave_graph_unchanged() {
    let mut g = create_graph(GraphKind::Undirected, "g").unwrap();
    let a = g.add_vertex("A").unwrap();
    let b = g.add_vertex("B").unwrap();
    g.add_edge(a, b, 1).unwrap();

    assert!(matches!(g.add_edge(b, a, 2), Err(Error::DuplicateEdge { .. })));
    assert!(matches!(g.add_edge(a, b, 0), Err(Error::InvalidWeight(0))));
    assert!(matches!(g.remove_edge(a, a), Err(Error::NoSuchEdge { .. })));
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edges(a).unwrap().map(|e| e.weight).collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_keys_are_scoped_to_their_graph() {
    let mut g = create_graph(GraphKind::Directed, "g").unwrap();
    let mut h = create_graph(GraphKind::Directed, "h").unwrap();
    let a = g.add_vertex("A").unwrap();
    let ha = h.add_vertex("A").unwrap();

    assert_ne!(a, ha);
    assert!(!g.contains_vertex(ha));
    assert!(matches!(g.add_edge(a, ha, 1), Err(Error::ForeignVertex(v)) if v == ha));
    assert!(matches!(h.remove_vertex(a), Err(Error::ForeignVertex(_))));
}
