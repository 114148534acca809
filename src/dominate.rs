//! Domination predicate: decides whether an edge subset dominates all edges
//! of a graph.
//!
//! An edge subset `S` dominates `E` when every edge of `E \ S` shares an
//! endpoint with some member of `S`. The check is pure and independent of
//! the iteration order of either set: it marks the endpoints of `S` once and
//! then tests each edge against that mark set, so set layout can never
//! change the answer.

use crate::graph::{Edge, Graph};

/// Reusable predicate evaluator.
///
/// Holds a per-vertex scratch buffer so repeated checks over the same graph
/// (millions of them, in the exhaustive engine) allocate nothing. The
/// buffer is keyed by the graph's dense vertex indices.
#[derive(Clone, Debug)]
pub struct DominationChecker {
    /// `touched[i]` is true when vertex index `i` is an endpoint of some
    /// candidate edge in the check currently being evaluated.
    touched: Vec<bool>,
}

impl DominationChecker {
    /// Creates a checker sized for `graph`.
    pub fn new(graph: &Graph) -> Self {
        Self {
            touched: vec![false; graph.vertex_count()],
        }
    }

    /// Returns whether `candidate` dominates every edge of `all_edges`.
    ///
    /// Edges belonging to `candidate` dominate themselves; every other edge
    /// must touch an endpoint of a candidate edge. Each edge test is O(1)
    /// after the single endpoint-marking pass.
    pub fn dominates(&mut self, candidate: &[Edge], all_edges: &[Edge], graph: &Graph) -> bool {
        debug_assert_eq!(self.touched.len(), graph.vertex_count());

        for edge in candidate {
            for endpoint in [edge.u(), edge.v()] {
                if let Some(i) = graph.vertex_index(endpoint) {
                    self.touched[i] = true;
                }
            }
        }

        let mut result = true;
        for edge in all_edges {
            let u_hit = graph
                .vertex_index(edge.u())
                .is_some_and(|i| self.touched[i]);
            let v_hit = graph
                .vertex_index(edge.v())
                .is_some_and(|i| self.touched[i]);
            if !(u_hit || v_hit) {
                result = false;
                break;
            }
        }

        // Unmark only what was marked; cheaper than clearing the whole buffer
        // when candidates are small, which they are at every k the exhaustive
        // engine reaches in practice.
        for edge in candidate {
            for endpoint in [edge.u(), edge.v()] {
                if let Some(i) = graph.vertex_index(endpoint) {
                    self.touched[i] = false;
                }
            }
        }

        result
    }
}

/// One-shot convenience wrapper around [`DominationChecker`].
///
/// `candidate` and `all_edges` may be in any order; the result depends only
/// on their contents.
pub fn dominates(candidate: &[Edge], all_edges: &[Edge], graph: &Graph) -> bool {
    DominationChecker::new(graph).dominates(candidate, all_edges, graph)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;
    use rand::prelude::*;
    use rand_xorshift::XorShiftRng;

    fn graph(n: u32, edges: &[(u32, u32)]) -> Graph {
        let vertices: Vec<(u32, Option<Position>)> = (0..n).map(|id| (id, None)).collect();
        Graph::new(vertices, edges.to_vec()).unwrap()
    }

    #[test]
    fn empty_candidate_fails_on_nonempty_graph() {
        let g = graph(2, &[(0, 1)]);
        assert!(!dominates(&[], g.edges(), &g));
    }

    #[test]
    fn empty_candidate_dominates_empty_edge_set() {
        let g = graph(3, &[]);
        assert!(dominates(&[], g.edges(), &g));
    }

    #[test]
    fn full_edge_set_dominates_itself() {
        let g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)]);
        let all: Vec<Edge> = g.edges().to_vec();
        assert!(dominates(&all, g.edges(), &g));
    }

    #[test]
    fn single_edge_dominates_triangle() {
        let g = graph(3, &[(0, 1), (1, 2), (0, 2)]);
        for &e in g.edges() {
            assert!(dominates(&[e], g.edges(), &g), "edge {e} should dominate");
        }
    }

    #[test]
    fn disjoint_edges_do_not_dominate_each_other() {
        let g = graph(4, &[(0, 1), (2, 3)]);
        assert!(!dominates(&[Edge::new(0, 1)], g.edges(), &g));
        assert!(!dominates(&[Edge::new(2, 3)], g.edges(), &g));
        assert!(dominates(
            &[Edge::new(0, 1), Edge::new(2, 3)],
            g.edges(),
            &g
        ));
    }

    #[test]
    fn path_center_edge_dominates() {
        // Path 0-1-2-3: the middle edge (1,2) touches both outer edges.
        let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        assert!(dominates(&[Edge::new(1, 2)], g.edges(), &g));
        assert!(!dominates(&[Edge::new(0, 1)], g.edges(), &g));
    }

    #[test]
    fn result_is_invariant_under_permutation() {
        const TRIALS: usize = 200;
        let mut rng = XorShiftRng::seed_from_u64(0x0D0B);
        let g = graph(
            7,
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (0, 6), (1, 4)],
        );

        let mut checker = DominationChecker::new(&g);
        for _ in 0..TRIALS {
            // Random candidate subset.
            let mut candidate: Vec<Edge> = g
                .edges()
                .iter()
                .copied()
                .filter(|_| rng.random_bool(0.4))
                .collect();
            let mut all: Vec<Edge> = g.edges().to_vec();

            let baseline = checker.dominates(&candidate, &all, &g);
            for _ in 0..5 {
                candidate.shuffle(&mut rng);
                all.shuffle(&mut rng);
                assert_eq!(
                    checker.dominates(&candidate, &all, &g),
                    baseline,
                    "predicate must not depend on iteration order"
                );
            }
        }
    }

    #[test]
    fn checker_scratch_is_clean_between_calls() {
        let g = graph(4, &[(0, 1), (2, 3)]);
        let mut checker = DominationChecker::new(&g);

        // First call marks vertices 0 and 1; a stale mark would make the
        // second call pass incorrectly.
        assert!(!checker.dominates(&[Edge::new(0, 1)], g.edges(), &g));
        assert!(!checker.dominates(&[Edge::new(2, 3)], g.edges(), &g));
        assert!(!checker.dominates(&[Edge::new(0, 1)], g.edges(), &g));
    }

    #[test]
    fn checker_agrees_with_naive_definition() {
        // Cross-check against a literal restatement of the definition.
        fn naive(candidate: &[Edge], all: &[Edge]) -> bool {
            all.iter().all(|e| {
                candidate.contains(e)
                    || candidate
                        .iter()
                        .any(|c| c.touches(e.u()) || c.touches(e.v()))
            })
        }

        let mut rng = XorShiftRng::seed_from_u64(0xA11CE);
        for _ in 0..100 {
            let n = rng.random_range(2..8u32);
            let mut pairs = Vec::new();
            for u in 0..n {
                for v in (u + 1)..n {
                    if rng.random_bool(0.5) {
                        pairs.push((u, v));
                    }
                }
            }
            let g = graph(n, &pairs);
            let candidate: Vec<Edge> = g
                .edges()
                .iter()
                .copied()
                .filter(|_| rng.random_bool(0.3))
                .collect();
            assert_eq!(
                dominates(&candidate, g.edges(), &g),
                naive(&candidate, g.edges()),
                "mismatch on n={n}, edges={:?}, candidate={candidate:?}",
                g.edges()
            );
        }
    }
}
