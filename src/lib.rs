//! # Edge Dominating Set Search
//!
//! A library for computing edge dominating sets of simple undirected
//! graphs, comparing an exhaustive (exact, minimum-size) search against a
//! greedy heuristic.
//!
//! This crate provides:
//! - An immutable [`graph::Graph`] with canonical edge identity and
//!   construction-time validation.
//! - A pure, order-independent [domination predicate](dominate).
//! - An [exhaustive engine](exhaustive) guaranteeing minimum cardinality,
//!   with cooperative cancellation.
//! - A [greedy engine](greedy) with a deterministic tie-break.
//! - A [bounded-time harness](harness) that enforces a wall-clock deadline
//!   on the exhaustive engine without ever blocking the caller past it.
//!
//! ## Quick Start
//!
//! ```
//! use edomset::graph::Graph;
//! use edomset::{exhaustive, greedy};
//!
//! // A triangle: any single edge dominates the other two.
//! let g = Graph::new(
//!     vec![(0, None), (1, None), (2, None)],
//!     vec![(0, 1), (1, 2), (0, 2)],
//! )
//! .unwrap();
//!
//! let exact = exhaustive::search(&g);
//! let heuristic = greedy::search(&g);
//! assert_eq!(exact.dominating_set.len(), 1);
//! assert!(heuristic.dominating_set.len() >= exact.dominating_set.len());
//! ```
//!
//! ## Running Under a Deadline
//!
//! ```
//! use edomset::graph::Graph;
//! use edomset::harness::{run_with_timeout, HarnessConfig};
//! use edomset::record::SearchStatus;
//!
//! let g = Graph::new(vec![(0, None), (1, None)], vec![(0, 1)]).unwrap();
//! let record = run_with_timeout(&g, "tiny", &HarnessConfig::default());
//! assert_eq!(record.status, SearchStatus::Completed);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Graph model, canonical edges, validation.
//! - [`dominate`]: the domination predicate.
//! - [`exhaustive`]: exact minimum-cardinality search.
//! - [`greedy`]: maximum-coverage heuristic.
//! - [`harness`]: deadline enforcement around the exhaustive engine.
//! - [`record`]: result records and their stable text rendering.
//! - [`format`]: the experiment graph-file text format.
//! - [`gen`]: seeded random graph generation with geometric placement.
//!
//! ## Performance Notes
//!
//! - The exhaustive engine's cost is a sum of binomial coefficients up to
//!   the true minimum size; it is exponential in the edge count, which is
//!   inherent to exact edge-dominating-set computation. Wrap it in the
//!   harness for anything beyond toy graphs.
//! - The greedy engine is polynomial and runs synchronously on the
//!   caller's thread.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

pub mod dominate;
pub mod exhaustive;
pub mod format;
pub mod gen;
pub mod graph;
pub mod greedy;
pub mod harness;
pub mod record;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::dominate::dominates;
    pub use crate::exhaustive::CancelToken;
    pub use crate::format::{load_graphs, GraphEntry};
    pub use crate::graph::{Edge, Graph, Position, VertexId};
    pub use crate::harness::{run_with_timeout, HarnessConfig};
    pub use crate::record::{SearchOutcome, SearchRecord, SearchStatus};
}
