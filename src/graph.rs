//! Graph model: vertices with optional 2D positions, canonical edges, and
//! construction-time validation.
//!
//! A [`Graph`] is immutable once built. Both search engines only read it, so
//! it can be cloned into a worker thread without further synchronization.

use std::collections::HashMap;
use std::fmt;

/// Vertex identifier. Ids are arbitrary non-negative integers; they are not
/// required to be dense or to start at zero.
pub type VertexId = u32;

// ============================================================================
// Position
// ============================================================================

/// Auxiliary 2D placement of a vertex.
///
/// Positions play no role in the search logic; they are carried through
/// unchanged so that rendering collaborators receive them exactly as read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ============================================================================
// Edge
// ============================================================================

/// An undirected edge in canonical form: the smaller endpoint always comes
/// first.
///
/// Canonical form is the sole comparison and hash basis for every edge-set
/// operation in the crate, so two edges over the same endpoint pair are
/// always identical regardless of construction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    u: VertexId,
    v: VertexId,
}

impl Edge {
    /// Builds the canonical edge over `{u, v}`.
    ///
    /// Idempotent and commutative: `Edge::new(u, v) == Edge::new(v, u)`.
    #[inline(always)]
    pub fn new(u: VertexId, v: VertexId) -> Self {
        if u <= v {
            Self { u, v }
        } else {
            Self { u: v, v: u }
        }
    }

    /// Smaller endpoint.
    #[inline(always)]
    pub fn u(&self) -> VertexId {
        self.u
    }

    /// Larger endpoint.
    #[inline(always)]
    pub fn v(&self) -> VertexId {
        self.v
    }

    /// Both endpoints, smaller first.
    #[inline(always)]
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.u, self.v)
    }

    /// Returns whether `vertex` is one of the endpoints.
    #[inline(always)]
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.u == vertex || self.v == vertex
    }
}

impl fmt::Display for Edge {
    /// Renders the tuple form `(u, v)` used by the result-file format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

// ============================================================================
// Graph
// ============================================================================

/// An immutable simple undirected graph.
///
/// Construction validates the full simple-graph invariant: every edge joins
/// two distinct, existing vertices and appears at most once. Nothing is
/// silently dropped; any violation is an error.
///
/// Internally the edge list is kept sorted in canonical order, and each
/// vertex carries the list of edges incident to it. Both engines rely on
/// that ordering for deterministic enumeration and tie-breaking.
#[derive(Clone, Debug)]
pub struct Graph {
    ids: Vec<VertexId>,
    positions: Vec<Option<Position>>,
    index_of: HashMap<VertexId, usize>,
    edges: Vec<Edge>,
    /// `incident[i]` holds indices into `edges` for vertex index `i`.
    incident: Vec<Vec<usize>>,
}

impl Graph {
    /// Builds a graph from vertices (id plus optional position) and endpoint
    /// pairs, both in arbitrary order.
    ///
    /// # Errors
    /// Returns a [`GraphError`] on duplicate vertex ids, edges referencing
    /// unknown vertices, self-loops, or parallel edges.
    pub fn new(
        vertices: Vec<(VertexId, Option<Position>)>,
        edge_pairs: Vec<(VertexId, VertexId)>,
    ) -> Result<Self, GraphError> {
        let mut ids = Vec::with_capacity(vertices.len());
        let mut positions = Vec::with_capacity(vertices.len());
        let mut index_of = HashMap::with_capacity(vertices.len());

        for (id, pos) in vertices {
            if index_of.insert(id, ids.len()).is_some() {
                return Err(GraphError::DuplicateVertex { id });
            }
            ids.push(id);
            positions.push(pos);
        }

        let mut edges = Vec::with_capacity(edge_pairs.len());
        for (a, b) in edge_pairs {
            if a == b {
                return Err(GraphError::SelfLoop { id: a });
            }
            for endpoint in [a, b] {
                if !index_of.contains_key(&endpoint) {
                    return Err(GraphError::UnknownEndpoint {
                        edge: (a, b),
                        vertex: endpoint,
                    });
                }
            }
            edges.push(Edge::new(a, b));
        }

        edges.sort_unstable();
        if let Some(w) = edges.windows(2).find(|w| w[0] == w[1]) {
            return Err(GraphError::DuplicateEdge { edge: w[0] });
        }

        let mut incident = vec![Vec::new(); ids.len()];
        for (e_idx, edge) in edges.iter().enumerate() {
            incident[index_of[&edge.u()]].push(e_idx);
            incident[index_of[&edge.v()]].push(e_idx);
        }

        Ok(Self {
            ids,
            positions,
            index_of,
            edges,
            incident,
        })
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges in ascending canonical order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Iterates vertices as `(id, position)` in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, Option<Position>)> + '_ {
        self.ids
            .iter()
            .zip(self.positions.iter())
            .map(|(&id, &pos)| (id, pos))
    }

    /// Returns whether the vertex exists.
    #[inline]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.index_of.contains_key(&id)
    }

    /// Dense index of a vertex id, if present.
    ///
    /// Indices run over `0..vertex_count()` and are stable for the lifetime
    /// of the graph; the domination predicate uses them for O(1) endpoint
    /// marking.
    #[inline]
    pub fn vertex_index(&self, id: VertexId) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    /// Position of a vertex, if one was supplied at construction.
    pub fn position(&self, id: VertexId) -> Option<Position> {
        self.index_of.get(&id).and_then(|&i| self.positions[i])
    }

    /// Indices into [`Self::edges`] of the edges incident to `id`.
    ///
    /// # Panics
    /// Panics if the vertex does not exist.
    #[inline]
    pub fn incident_edge_indices(&self, id: VertexId) -> &[usize] {
        &self.incident[self.index_of[&id]]
    }

    /// Degree of a vertex.
    ///
    /// # Panics
    /// Panics if the vertex does not exist.
    #[inline]
    pub fn degree(&self, id: VertexId) -> usize {
        self.incident[self.index_of[&id]].len()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Violations of the simple-graph invariant, detected at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The same vertex id was supplied twice.
    DuplicateVertex {
        /// The repeated id.
        id: VertexId,
    },
    /// An edge references a vertex that was never declared.
    UnknownEndpoint {
        /// The offending edge as supplied.
        edge: (VertexId, VertexId),
        /// The endpoint that does not exist.
        vertex: VertexId,
    },
    /// An edge joins a vertex to itself.
    SelfLoop {
        /// The vertex with the loop.
        id: VertexId,
    },
    /// The same undirected edge was supplied twice.
    DuplicateEdge {
        /// The repeated edge in canonical form.
        edge: Edge,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateVertex { id } => {
                write!(f, "duplicate vertex id {id}")
            }
            GraphError::UnknownEndpoint { edge, vertex } => write!(
                f,
                "edge ({}, {}) references unknown vertex {vertex}",
                edge.0, edge.1
            ),
            GraphError::SelfLoop { id } => {
                write!(f, "self-loop at vertex {id}")
            }
            GraphError::DuplicateEdge { edge } => {
                write!(f, "duplicate edge {edge}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(ids: &[VertexId]) -> Vec<(VertexId, Option<Position>)> {
        ids.iter().map(|&id| (id, None)).collect()
    }

    // -------------------------------------------------------------------------
    // Canonical edge tests
    // -------------------------------------------------------------------------

    #[test]
    fn edge_new_is_commutative() {
        for u in 0u32..10 {
            for v in 0u32..10 {
                assert_eq!(Edge::new(u, v), Edge::new(v, u));
            }
        }
    }

    #[test]
    fn edge_new_puts_smaller_endpoint_first() {
        let e = Edge::new(7, 2);
        assert_eq!(e.endpoints(), (2, 7));
        assert_eq!(e.u(), 2);
        assert_eq!(e.v(), 7);
    }

    #[test]
    fn edge_hash_and_ord_ignore_construction_order() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Edge::new(3, 1));
        set.insert(Edge::new(1, 3));
        assert_eq!(set.len(), 1);

        let mut edges = vec![Edge::new(2, 0), Edge::new(0, 1), Edge::new(1, 2)];
        edges.sort_unstable();
        assert_eq!(
            edges,
            vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 2)]
        );
    }

    #[test]
    fn edge_display_is_tuple_form() {
        assert_eq!(Edge::new(4, 1).to_string(), "(1, 4)");
    }

    #[test]
    fn edge_touches_both_endpoints_only() {
        let e = Edge::new(5, 9);
        assert!(e.touches(5));
        assert!(e.touches(9));
        assert!(!e.touches(7));
    }

    // -------------------------------------------------------------------------
    // Construction and validation tests
    // -------------------------------------------------------------------------

    #[test]
    fn builds_from_arbitrary_input_order() {
        let g = Graph::new(bare(&[3, 0, 2, 1]), vec![(2, 0), (1, 3), (0, 1)]).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 3);
        // Edge list is canonically sorted regardless of input order.
        assert_eq!(
            g.edges(),
            &[Edge::new(0, 1), Edge::new(0, 2), Edge::new(1, 3)]
        );
    }

    #[test]
    fn rejects_duplicate_vertex() {
        let err = Graph::new(bare(&[0, 1, 0]), vec![]).unwrap_err();
        assert_eq!(err, GraphError::DuplicateVertex { id: 0 });
    }

    #[test]
    fn rejects_unknown_endpoint() {
        let err = Graph::new(bare(&[0, 1]), vec![(0, 5)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownEndpoint {
                edge: (0, 5),
                vertex: 5
            }
        );
    }

    #[test]
    fn rejects_self_loop() {
        let err = Graph::new(bare(&[0, 1]), vec![(1, 1)]).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop { id: 1 });
    }

    #[test]
    fn rejects_parallel_edges_in_either_orientation() {
        let err = Graph::new(bare(&[0, 1]), vec![(0, 1), (1, 0)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateEdge {
                edge: Edge::new(0, 1)
            }
        );
    }

    #[test]
    fn graph_errors_render_descriptive_messages() {
        let msg = GraphError::UnknownEndpoint {
            edge: (2, 9),
            vertex: 9,
        }
        .to_string();
        assert!(msg.contains("unknown vertex 9"), "got: {msg}");
    }

    // -------------------------------------------------------------------------
    // Positions and ids
    // -------------------------------------------------------------------------

    #[test]
    fn positions_are_preserved_unchanged() {
        let g = Graph::new(
            vec![
                (10, Some(Position::new(1.5, -2.0))),
                (20, None),
                (30, Some(Position::new(0.0, 4.0))),
            ],
            vec![(10, 30)],
        )
        .unwrap();
        assert_eq!(g.position(10), Some(Position::new(1.5, -2.0)));
        assert_eq!(g.position(20), None);
        assert_eq!(g.position(30), Some(Position::new(0.0, 4.0)));
        assert_eq!(g.position(99), None);
    }

    #[test]
    fn vertex_ids_need_not_be_dense() {
        let g = Graph::new(bare(&[100, 7, 42]), vec![(100, 7), (7, 42)]).unwrap();
        assert!(g.contains_vertex(100));
        assert!(!g.contains_vertex(0));
        assert_eq!(g.degree(7), 2);
        assert_eq!(g.degree(42), 1);
    }

    #[test]
    fn position_distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    // -------------------------------------------------------------------------
    // Incidence precompute
    // -------------------------------------------------------------------------

    #[test]
    fn incidence_lists_cover_every_edge_twice() {
        // Triangle plus a pendant edge.
        let g = Graph::new(bare(&[0, 1, 2, 3]), vec![(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
        let total: usize = (0..4).map(|v| g.incident_edge_indices(v).len()).sum();
        assert_eq!(total, 2 * g.edge_count());

        // Vertex 2 sits on edges (1,2), (0,2) and (2,3).
        let incident: Vec<Edge> = g
            .incident_edge_indices(2)
            .iter()
            .map(|&i| g.edges()[i])
            .collect();
        assert!(incident.contains(&Edge::new(1, 2)));
        assert!(incident.contains(&Edge::new(0, 2)));
        assert!(incident.contains(&Edge::new(2, 3)));
        assert_eq!(incident.len(), 3);
    }

    #[test]
    fn empty_graph_is_valid() {
        let g = Graph::new(vec![], vec![]).unwrap();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn vertices_without_edges_are_valid() {
        let g = Graph::new(bare(&[0, 1, 2]), vec![]).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.degree(1), 0);
    }
}
