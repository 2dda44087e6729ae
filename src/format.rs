//! Plain-text graph layout: save a graph, load it back.
//!
//! ```text
//! directed            <- type tag
//! roads               <- graph id
//! 3                   <- vertex count
//! A                   <- vertex ids, one per line, dense order
//! B
//! C
//! 2                   <- edge count
//! (0,1,2)             <- (start index, end index, weight)
//! (1,2,3)
//! ```
//!
//! Indices refer to the vertex lines, counted from zero. An undirected edge
//! is written once, from its lower-index end. Loading rebuilds the graph
//! through the ordinary `add_vertex` / `add_edge` calls, so everything those
//! reject is rejected here too, reported against the offending line.

use std::io::{BufRead, Write};

use crate::graph::{create_graph, Graph, GraphKind};
use crate::model::{VertexId, Weight};
use crate::{Error, Result};

// ============================================================================
// Save
// ============================================================================

/// Characters the reader treats as line endings; ids containing them cannot
/// be read back as written.
const LINE_BREAKS: [char; 2] = ['\n', '\r'];

/// Write `graph` in the text layout.
pub fn write_graph(graph: &dyn Graph, writer: &mut dyn Write) -> Result<()> {
    if graph.id().contains(LINE_BREAKS) {
        return Err(unwritable(format!("graph id {:?} contains a line break", graph.id())));
    }
    writeln!(writer, "{}", graph.kind())?;
    writeln!(writer, "{}", graph.id())?;
    writeln!(writer, "{}", graph.vertex_count())?;
    for vertex in graph.vertices() {
        if vertex.id().contains(LINE_BREAKS) {
            return Err(unwritable(format!("vertex id {:?} contains a line break", vertex.id())));
        }
        writeln!(writer, "{}", vertex.id())?;
    }

    let undirected = graph.kind() == GraphKind::Undirected;
    writeln!(writer, "{}", graph.edge_count())?;
    let mut written = 0usize;
    for vertex in graph.vertices() {
        for edge in vertex.edges() {
            let end = graph.vertex(edge.target)?.position();
            if undirected && end < vertex.position() {
                continue;
            }
            writeln!(writer, "({},{},{})", vertex.position(), end, edge.weight)?;
            written += 1;
        }
    }
    debug_assert_eq!(written, graph.edge_count());

    tracing::debug!(
        graph = graph.id(),
        vertices = graph.vertex_count(),
        edges = written,
        "graph written"
    );
    Ok(())
}

fn unwritable(message: String) -> Error {
    Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, message))
}

// ============================================================================
// Load
// ============================================================================

/// Read a graph in the text layout.
///
/// Fails with `Format { line, .. }` (1-based) for anything malformed,
/// including vertex or edge errors raised while rebuilding.
pub fn read_graph(reader: &mut dyn BufRead) -> Result<Box<dyn Graph>> {
    let mut lines = Lines { reader, number: 0, buffer: String::new() };

    let tag = lines.next_line("graph type")?;
    let kind: GraphKind = tag.parse().map_err(|e: Error| lines.error(e.to_string()))?;
    let id = lines.next_line("graph id")?;
    let mut graph = create_graph(kind, &id)?;

    let vertex_count = lines.next_count("vertex count")?;
    // grows with the lines actually read, not the declared count
    let mut keys: Vec<VertexId> = Vec::new();
    for _ in 0..vertex_count {
        let name = lines.next_line("vertex id")?;
        let key = graph.add_vertex(&name).map_err(|e| lines.error(e.to_string()))?;
        keys.push(key);
    }

    let edge_count = lines.next_count("edge count")?;
    for _ in 0..edge_count {
        let text = lines.next_line("edge")?;
        let (start, end, weight) = parse_edge(&text).map_err(|m| lines.error(m))?;
        let lookup = |index: usize| {
            keys.get(index)
                .copied()
                .ok_or_else(|| format!("vertex index {index} out of range 0..{}", keys.len()))
        };
        let from = lookup(start).map_err(|m| lines.error(m))?;
        let to = lookup(end).map_err(|m| lines.error(m))?;
        graph.add_edge(from, to, weight).map_err(|e| lines.error(e.to_string()))?;
    }

    while lines.read()? {
        if !lines.buffer.trim().is_empty() {
            return Err(lines.error("unexpected content after last edge".to_string()));
        }
    }

    tracing::debug!(
        graph = graph.id(),
        kind = %graph.kind(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph read"
    );
    Ok(graph)
}

/// Parse `(start,end,weight)`.
fn parse_edge(text: &str) -> std::result::Result<(usize, usize, Weight), String> {
    let inner = text
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| format!("expected (start,end,weight), got {text:?}"))?;

    let mut fields = inner.split(',').map(str::trim);
    let mut field = |name: &str| {
        fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| format!("missing {name} in {text:?}"))
    };
    let start = field("start index")?;
    let end = field("end index")?;
    let weight = field("weight")?;
    if fields.next().is_some() {
        return Err(format!("too many fields in {text:?}"));
    }

    Ok((
        start.parse().map_err(|_| format!("bad start index {start:?}"))?,
        end.parse().map_err(|_| format!("bad end index {end:?}"))?,
        weight.parse().map_err(|_| format!("bad weight {weight:?}"))?,
    ))
}

/// Line reader that remembers where it is.
struct Lines<'r> {
    reader: &'r mut dyn BufRead,
    number: usize,
    buffer: String,
}

impl Lines<'_> {
    /// Read the next line into the buffer, without its line ending.
    fn read(&mut self) -> Result<bool> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(false);
        }
        self.number += 1;
        let trimmed = self.buffer.trim_end_matches(LINE_BREAKS).len();
        self.buffer.truncate(trimmed);
        Ok(true)
    }

    fn next_line(&mut self, what: &str) -> Result<String> {
        if !self.read()? {
            self.number += 1;
            return Err(self.error(format!("unexpected end of input, expected {what}")));
        }
        Ok(self.buffer.clone())
    }

    fn next_count(&mut self, what: &str) -> Result<usize> {
        let text = self.next_line(what)?;
        text.trim()
            .parse()
            .map_err(|_| self.error(format!("bad {what} {text:?}")))
    }

    fn error(&self, message: String) -> Error {
        Error::Format { line: self.number, message }
    }
}

// ============================================================================
// Tests
// ============================================================================
