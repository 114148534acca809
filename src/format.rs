//! Text format for experiment graph files.
//!
//! A file holds any number of blocks:
//!
//! ```text
//! Graph: graph_10_vertices_25pct_edges
//! Vertices: 10, Density: 0.25
//! Nodes:
//! 0 523 87
//! 1 12 640
//! Edges:
//! 0 1
//!
//! ========================================
//! ```
//!
//! Node and edge lines may appear in any order within their sections, and
//! positions are carried through to the [`Graph`] untouched. Malformed
//! input is rejected with a line-numbered error; nothing is silently
//! skipped.

use crate::graph::{Graph, GraphError, Position, VertexId};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Separator line between blocks.
const SEPARATOR: &str = "========================================";

// ============================================================================
// Entry
// ============================================================================

/// One graph block from an experiment file: the graph plus the metadata the
/// generator recorded about it.
#[derive(Clone, Debug)]
pub struct GraphEntry {
    /// Block name, e.g. `graph_10_vertices_25pct_edges`.
    pub name: String,
    /// Declared vertex count from the block header.
    pub num_vertices: usize,
    /// Declared edge density from the block header.
    pub density: f64,
    /// The validated graph.
    pub graph: Graph,
}

// ============================================================================
// Parsing
// ============================================================================

#[derive(Clone, Copy, PartialEq)]
enum Section {
    None,
    Nodes,
    Edges,
}

struct PendingBlock {
    name: String,
    num_vertices: Option<usize>,
    density: Option<f64>,
    vertices: Vec<(VertexId, Option<Position>)>,
    edges: Vec<(VertexId, VertexId)>,
}

/// Parses every graph block in `text`.
///
/// # Errors
/// Returns a [`FormatError`] naming the offending line on any malformed
/// header, node, or edge, and a [`FormatError::Graph`] if a block violates
/// the simple-graph invariant.
pub fn parse_graphs(text: &str) -> Result<Vec<GraphEntry>, FormatError> {
    let mut entries = Vec::new();
    let mut pending: Option<PendingBlock> = None;
    let mut section = Section::None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('=') {
            if let Some(block) = pending.take() {
                entries.push(finish_block(block)?);
            }
            section = Section::None;
        } else if let Some(name) = line.strip_prefix("Graph:") {
            if let Some(block) = pending.take() {
                entries.push(finish_block(block)?);
            }
            pending = Some(PendingBlock {
                name: name.trim().to_owned(),
                num_vertices: None,
                density: None,
                vertices: Vec::new(),
                edges: Vec::new(),
            });
            section = Section::None;
        } else if line.starts_with("Vertices:") {
            let block = pending
                .as_mut()
                .ok_or(FormatError::DataOutsideBlock { line_no })?;
            let (n, d) = parse_header(line).ok_or_else(|| FormatError::BadHeader {
                line_no,
                content: line.to_owned(),
            })?;
            block.num_vertices = Some(n);
            block.density = Some(d);
        } else if line == "Nodes:" {
            if pending.is_none() {
                return Err(FormatError::DataOutsideBlock { line_no });
            }
            section = Section::Nodes;
        } else if line == "Edges:" {
            if pending.is_none() {
                return Err(FormatError::DataOutsideBlock { line_no });
            }
            section = Section::Edges;
        } else {
            let block = pending
                .as_mut()
                .ok_or(FormatError::DataOutsideBlock { line_no })?;
            match section {
                Section::Nodes => {
                    let (id, pos) = parse_node(line).ok_or_else(|| FormatError::BadNode {
                        line_no,
                        content: line.to_owned(),
                    })?;
                    block.vertices.push((id, pos));
                }
                Section::Edges => {
                    let pair = parse_edge(line).ok_or_else(|| FormatError::BadEdge {
                        line_no,
                        content: line.to_owned(),
                    })?;
                    block.edges.push(pair);
                }
                Section::None => {
                    return Err(FormatError::BadHeader {
                        line_no,
                        content: line.to_owned(),
                    })
                }
            }
        }
    }

    if let Some(block) = pending.take() {
        entries.push(finish_block(block)?);
    }
    Ok(entries)
}

/// Reads and parses an experiment file.
///
/// # Errors
/// Returns [`FormatError::Io`] if the file cannot be read, otherwise as
/// [`parse_graphs`].
pub fn load_graphs(path: impl AsRef<Path>) -> Result<Vec<GraphEntry>, FormatError> {
    let text = fs::read_to_string(path).map_err(|e| FormatError::Io(e.to_string()))?;
    parse_graphs(&text)
}

fn finish_block(block: PendingBlock) -> Result<GraphEntry, FormatError> {
    let graph = Graph::new(block.vertices, block.edges).map_err(FormatError::Graph)?;
    Ok(GraphEntry {
        num_vertices: block.num_vertices.unwrap_or_else(|| graph.vertex_count()),
        density: block.density.unwrap_or(0.0),
        name: block.name,
        graph,
    })
}

/// Parses `Vertices: N, Density: D`.
fn parse_header(line: &str) -> Option<(usize, f64)> {
    let (left, right) = line.split_once(',')?;
    let n = left.strip_prefix("Vertices:")?.trim().parse().ok()?;
    let d = right.trim().strip_prefix("Density:")?.trim().parse().ok()?;
    Some((n, d))
}

/// Parses `id x y` or a bare `id` for a position-less vertex.
fn parse_node(line: &str) -> Option<(VertexId, Option<Position>)> {
    let mut tokens = line.split_whitespace();
    let id = tokens.next()?.parse().ok()?;
    match (tokens.next(), tokens.next(), tokens.next()) {
        (None, _, _) => Some((id, None)),
        (Some(x), Some(y), None) => {
            let pos = Position::new(x.parse().ok()?, y.parse().ok()?);
            Some((id, Some(pos)))
        }
        _ => None,
    }
}

/// Parses `u v`.
fn parse_edge(line: &str) -> Option<(VertexId, VertexId)> {
    let mut tokens = line.split_whitespace();
    let u = tokens.next()?.parse().ok()?;
    let v = tokens.next()?.parse().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((u, v))
}

// ============================================================================
// Writing
// ============================================================================

/// Writes one graph block in the experiment-file format.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_graph<W: Write>(w: &mut W, entry: &GraphEntry) -> io::Result<()> {
    writeln!(w, "Graph: {}", entry.name)?;
    writeln!(
        w,
        "Vertices: {}, Density: {}",
        entry.num_vertices, entry.density
    )?;
    writeln!(w, "Nodes:")?;
    for (id, pos) in entry.graph.vertices() {
        match pos {
            Some(p) => writeln!(w, "{id} {} {}", p.x, p.y)?,
            None => writeln!(w, "{id}")?,
        }
    }
    writeln!(w, "Edges:")?;
    for edge in entry.graph.edges() {
        writeln!(w, "{} {}", edge.u(), edge.v())?;
    }
    writeln!(w)?;
    writeln!(w, "{SEPARATOR}")?;
    writeln!(w)
}

/// Writes a whole experiment file.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn save_graphs(path: impl AsRef<Path>, entries: &[GraphEntry]) -> io::Result<()> {
    let mut f = fs::File::create(path)?;
    for entry in entries {
        write_graph(&mut f, entry)?;
    }
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

/// Errors encountered while parsing an experiment file.
#[derive(Clone, Debug, PartialEq)]
pub enum FormatError {
    /// I/O error (file not found, etc.).
    Io(String),
    /// A `Vertices:` header that does not parse.
    BadHeader {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        content: String,
    },
    /// A node line that is not `id x y` (or a bare `id`).
    BadNode {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        content: String,
    },
    /// An edge line that is not `u v`.
    BadEdge {
        /// 1-based line number.
        line_no: usize,
        /// The offending line.
        content: String,
    },
    /// Content before any `Graph:` header.
    DataOutsideBlock {
        /// 1-based line number.
        line_no: usize,
    },
    /// The block parsed but the graph itself is invalid.
    Graph(GraphError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Io(msg) => write!(f, "I/O error: {msg}"),
            FormatError::BadHeader { line_no, content } => {
                write!(f, "line {line_no}: malformed header {content:?}")
            }
            FormatError::BadNode { line_no, content } => {
                write!(f, "line {line_no}: malformed node line {content:?}")
            }
            FormatError::BadEdge { line_no, content } => {
                write!(f, "line {line_no}: malformed edge line {content:?}")
            }
            FormatError::DataOutsideBlock { line_no } => {
                write!(f, "line {line_no}: content outside any graph block")
            }
            FormatError::Graph(err) => write!(f, "invalid graph: {err}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Graph(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
