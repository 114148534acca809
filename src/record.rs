//! Result records: the strongly-typed outcome of one search invocation and
//! its stable textual rendering.
//!
//! The text block keeps three labels verbatim — `Edge Dominating Set:`,
//! `Basic Operations:` and `Time Taken: ... seconds` — because the
//! downstream tabular-analysis collaborator recovers those fields by
//! pattern matching on the label text.

use crate::graph::Edge;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

/// Separator line closing each rendered record block.
const SEPARATOR: &str = "========================================";

// ============================================================================
// Engine outcome
// ============================================================================

/// Raw output of one engine run: the set it found plus its cost counters.
///
/// Produced by [`crate::exhaustive::search`] and [`crate::greedy::search`];
/// the harness wraps it into a [`SearchRecord`].
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// The dominating set, in ascending canonical order.
    pub dominating_set: Vec<Edge>,
    /// Number of basic operations performed (subset or candidate
    /// evaluations, depending on the engine).
    pub basic_operations: u64,
    /// Wall time spent inside the engine.
    pub elapsed: Duration,
}

// ============================================================================
// Search record
// ============================================================================

/// How a search invocation concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The engine ran to completion and produced a dominating set.
    Completed,
    /// The deadline elapsed before the engine finished. No set is reported.
    TimedOut,
    /// The worker crashed. Distinct from a timeout so callers can tell
    /// "ran out of time" from "broke".
    Failed,
}

/// Immutable record of exactly one search invocation.
#[derive(Clone, Debug)]
pub struct SearchRecord {
    /// Name of the graph the search ran on.
    pub graph_name: String,
    /// The dominating set, absent on timeout or failure.
    pub dominating_set: Option<Vec<Edge>>,
    /// Basic-operation count (zero when the engine never reported).
    pub basic_operations: u64,
    /// Elapsed wall time; equals the configured deadline on timeout.
    pub elapsed: Duration,
    /// Completion status.
    pub status: SearchStatus,
}

impl SearchRecord {
    /// Record for a run that finished normally.
    pub fn completed(graph_name: &str, outcome: SearchOutcome) -> Self {
        let mut dominating_set = outcome.dominating_set;
        dominating_set.sort_unstable();
        Self {
            graph_name: graph_name.to_owned(),
            dominating_set: Some(dominating_set),
            basic_operations: outcome.basic_operations,
            elapsed: outcome.elapsed,
            status: SearchStatus::Completed,
        }
    }

    /// Record for a run cut off at `deadline`.
    pub fn timed_out(graph_name: &str, deadline: Duration) -> Self {
        Self {
            graph_name: graph_name.to_owned(),
            dominating_set: None,
            basic_operations: 0,
            elapsed: deadline,
            status: SearchStatus::TimedOut,
        }
    }

    /// Record for a run whose worker crashed.
    pub fn failed(graph_name: &str, elapsed: Duration) -> Self {
        Self {
            graph_name: graph_name.to_owned(),
            dominating_set: None,
            basic_operations: 0,
            elapsed,
            status: SearchStatus::Failed,
        }
    }

    /// Size of the dominating set, if one was produced.
    pub fn set_size(&self) -> Option<usize> {
        self.dominating_set.as_ref().map(Vec::len)
    }

    /// Appends the rendered record block to a results file, creating the
    /// file if needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written.
    pub fn append_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut f = OpenOptions::new().create(true).append(true).open(path)?;
        write!(f, "{self}")
    }
}

impl fmt::Display for SearchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph: {}", self.graph_name)?;
        match self.status {
            SearchStatus::Completed => {
                write!(f, "Edge Dominating Set: [")?;
                if let Some(set) = &self.dominating_set {
                    for (i, edge) in set.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{edge}")?;
                    }
                }
                writeln!(f, "]")?;
                writeln!(f, "Basic Operations: {}", self.basic_operations)?;
                writeln!(f, "Time Taken: {:.4} seconds", self.elapsed.as_secs_f64())?;
            }
            SearchStatus::TimedOut => {
                // Fractional seconds, so a sub-second deadline does not
                // render as "0 seconds"; whole-second deadlines still print
                // without a decimal point.
                writeln!(
                    f,
                    "Result: Timed out after {} seconds.",
                    self.elapsed.as_secs_f64()
                )?;
            }
            SearchStatus::Failed => {
                writeln!(f, "Result: Search worker failed.")?;
            }
        }
        writeln!(f, "{SEPARATOR}")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(edges: Vec<Edge>, ops: u64, millis: u64) -> SearchOutcome {
        SearchOutcome {
            dominating_set: edges,
            basic_operations: ops,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn completed_record_renders_greppable_labels() {
        let rec = SearchRecord::completed(
            "graph_10_vertices_25pct_edges",
            outcome(vec![Edge::new(2, 3), Edge::new(0, 1)], 42, 1234),
        );
        let text = rec.to_string();
        assert!(text.contains("Graph: graph_10_vertices_25pct_edges\n"));
        // The three labels the analysis collaborator greps for.
        assert!(text.contains("Edge Dominating Set: [(0, 1), (2, 3)]\n"));
        assert!(text.contains("Basic Operations: 42\n"));
        assert!(text.contains("Time Taken: 1.2340 seconds\n"));
        assert!(text.ends_with("========================================\n"));
    }

    #[test]
    fn completed_record_sorts_edges_canonically() {
        let rec = SearchRecord::completed(
            "g",
            outcome(vec![Edge::new(5, 4), Edge::new(1, 0), Edge::new(2, 3)], 1, 0),
        );
        assert_eq!(
            rec.dominating_set,
            Some(vec![Edge::new(0, 1), Edge::new(2, 3), Edge::new(4, 5)])
        );
    }

    #[test]
    fn empty_set_renders_empty_brackets() {
        let rec = SearchRecord::completed("g", outcome(vec![], 0, 0));
        assert!(rec.to_string().contains("Edge Dominating Set: []\n"));
    }

    #[test]
    fn timed_out_record_has_no_set_and_deadline_elapsed() {
        let rec = SearchRecord::timed_out("g", Duration::from_secs(240));
        assert_eq!(rec.status, SearchStatus::TimedOut);
        assert_eq!(rec.dominating_set, None);
        assert_eq!(rec.set_size(), None);
        assert_eq!(rec.elapsed, Duration::from_secs(240));
        let text = rec.to_string();
        assert!(text.contains("Result: Timed out after 240 seconds.\n"));
        // Timeout blocks must not carry the completion labels.
        assert!(!text.contains("Edge Dominating Set:"));
        assert!(!text.contains("Basic Operations:"));
    }

    #[test]
    fn sub_second_timeout_renders_fractional_seconds() {
        let rec = SearchRecord::timed_out("g", Duration::from_millis(250));
        let text = rec.to_string();
        assert!(
            text.contains("Result: Timed out after 0.25 seconds.\n"),
            "{text}"
        );
    }

    #[test]
    fn failed_record_is_distinct_from_timeout() {
        let rec = SearchRecord::failed("g", Duration::from_millis(7));
        assert_eq!(rec.status, SearchStatus::Failed);
        let text = rec.to_string();
        assert!(text.contains("Result: Search worker failed.\n"));
        assert!(!text.contains("Timed out"));
    }

    #[test]
    fn append_to_file_accumulates_blocks() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("edomset_record_test_{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let a = SearchRecord::completed("a", outcome(vec![Edge::new(0, 1)], 1, 10));
        let b = SearchRecord::timed_out("b", Duration::from_secs(1));
        a.append_to_file(&path).unwrap();
        b.append_to_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, format!("{a}{b}"));
        assert_eq!(text.matches("Graph: ").count(), 2);

        let _ = std::fs::remove_file(&path);
    }
}
