//! The result of a shortest-path search.

use serde::{Deserialize, Serialize};
use super::Distance;

/// Ordered vertex identifiers from source to target, plus the total length.
///
/// An empty identifier list means no path exists. The length is the edge
/// count for unweighted searches and the summed weight for weighted ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    vertices: Vec<String>,
    length: Distance,
}

impl Path {
    /// Zero-length path from a vertex to itself.
    pub fn trivial(id: impl Into<String>) -> Self {
        Self { vertices: vec![id.into()], length: 0 }
    }

    /// The target is unreachable from the source.
    pub fn none() -> Self {
        Self { vertices: Vec::new(), length: 0 }
    }

    pub(crate) fn new(vertices: Vec<String>, length: Distance) -> Self {
        debug_assert!(!vertices.is_empty());
        Self { vertices, length }
    }

    pub fn exists(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// Total length, or `None` when there is no path.
    pub fn length(&self) -> Option<Distance> {
        self.exists().then_some(self.length)
    }

    /// Number of edges traversed, or `None` when there is no path.
    pub fn hops(&self) -> Option<usize> {
        self.vertices.len().checked_sub(1)
    }

    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    pub fn start(&self) -> Option<&str> {
        self.vertices.first().map(String::as_str)
    }

    pub fn end(&self) -> Option<&str> {
        self.vertices.last().map(String::as_str)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.exists() {
            return write!(f, "no path");
        }
        write!(f, "{} (length {})", self.vertices.join(" -> "), self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_path() {
        let path = Path::trivial("A");
        assert!(path.exists());
        assert_eq!(path.length(), Some(0));
        assert_eq!(path.hops(), Some(0));
        assert_eq!(path.start(), Some("A"));
        assert_eq!(path.end(), Some("A"));
        assert_eq!(path.to_string(), "A (length 0)");
    }

    #[test]
    fn test_no_path() {
        let path = Path::none();
        assert!(!path.exists());
        assert_eq!(path.length(), None);
        assert_eq!(path.hops(), None);
        assert_eq!(path.start(), None);
        assert_eq!(path.to_string(), "no path");
    }

    #[test]
    fn test_display_joins_vertices() {
        let path = Path::new(vec!["A".into(), "B".into(), "C".into()], 5);
        assert_eq!(path.to_string(), "A -> B -> C (length 5)");
        assert_eq!(path.hops(), Some(2));
    }

    #[test]
    fn test_serde_roundtrip() {
        let path = Path::new(vec!["A".into(), "C".into()], 10);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"{"vertices":["A","C"],"length":10}"#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
