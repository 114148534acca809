//! Exhaustive search engine: minimum-cardinality edge dominating sets.
//!
//! Candidate sizes are tried in strictly increasing order, and within each
//! size all combinations are enumerated lexicographically over the graph's
//! canonically sorted edge list. The first feasible subset therefore has
//! minimum cardinality, and — because the enumeration order is fixed — it
//! is the lexicographically first such subset, making results and operation
//! counts reproducible across runs.
//!
//! Worst-case cost is exponential in the edge count (the problem is
//! NP-hard), which is why [`crate::harness`] wraps this engine in a
//! deadline.

use crate::dominate::DominationChecker;
use crate::graph::Graph;
use crate::record::SearchOutcome;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// How many subsets are examined between cancellation checks.
///
/// Must be a power of two; the check is a cheap mask on the operation
/// counter.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

// ============================================================================
// Cancellation token
// ============================================================================

/// Shared flag for cooperatively stopping an in-flight exhaustive search.
///
/// Cloning yields a handle to the same flag, so the harness can keep one
/// side and hand the other to the worker thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Search
// ============================================================================

/// Finds a minimum-cardinality edge dominating set.
///
/// One basic operation is counted per subset examined, whether or not it
/// dominates. An empty edge set returns the empty set with zero operations.
pub fn search(graph: &Graph) -> SearchOutcome {
    match run(graph, None) {
        Some(outcome) => outcome,
        // Without a token there is no cancellation path.
        None => unreachable!("exhaustive search without a cancel token always completes"),
    }
}

/// Like [`search`], but checks `cancel` every [`CANCEL_CHECK_INTERVAL`]
/// subsets and returns `None` once cancellation is observed.
///
/// A cancelled search surfaces no partial result.
pub fn search_cancellable(graph: &Graph, cancel: &CancelToken) -> Option<SearchOutcome> {
    run(graph, Some(cancel))
}

fn run(graph: &Graph, cancel: Option<&CancelToken>) -> Option<SearchOutcome> {
    let start = Instant::now();
    let all = graph.edges();
    let m = all.len();

    if m == 0 {
        // The empty set trivially dominates an empty edge set.
        return Some(SearchOutcome {
            dominating_set: Vec::new(),
            basic_operations: 0,
            elapsed: start.elapsed(),
        });
    }

    let mut checker = DominationChecker::new(graph);
    let mut ops: u64 = 0;
    let mut candidate = Vec::with_capacity(m);

    for k in 1..=m {
        // Lexicographic enumeration of all C(m, k) index combinations.
        let mut idx: Vec<usize> = (0..k).collect();
        loop {
            ops += 1;
            if ops % CANCEL_CHECK_INTERVAL == 0
                && cancel.is_some_and(CancelToken::is_cancelled)
            {
                return None;
            }

            candidate.clear();
            candidate.extend(idx.iter().map(|&i| all[i]));
            if checker.dominates(&candidate, all, graph) {
                return Some(SearchOutcome {
                    dominating_set: candidate,
                    basic_operations: ops,
                    elapsed: start.elapsed(),
                });
            }

            if !next_combination(&mut idx, m) {
                break;
            }
        }
    }

    // k = m is the full edge set, which always dominates itself.
    unreachable!("the full edge set dominates itself; the loop above must return")
}

/// Advances `idx` to the next k-combination of `0..m` in lexicographic
/// order. Returns `false` when `idx` was already the last combination.
fn next_combination(idx: &mut [usize], m: usize) -> bool {
    let k = idx.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if idx[i] != i + m - k {
            idx[i] += 1;
            for j in (i + 1)..k {
                idx[j] = idx[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

// ============================================================================
// Tests
// ============================================================================
