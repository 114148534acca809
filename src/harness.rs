//! Bounded-time execution harness for the exhaustive engine.
//!
//! The engine runs in a worker thread that owns its own copy of the graph
//! and reports back through a single-use channel. The caller waits at most
//! the configured deadline: a finished worker yields `Completed`, a missed
//! deadline yields `TimedOut` with cancellation actively delivered to the
//! worker, and a crashed worker yields `Failed`. Exactly one record is
//! produced per invocation, whatever the worker does.

use crate::exhaustive::{self, CancelToken};
use crate::graph::Graph;
use crate::record::{SearchOutcome, SearchRecord};
use crossbeam::channel::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// Configuration
// ============================================================================

/// Harness parameters, passed explicitly per invocation.
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// Wall-clock deadline for the exhaustive search.
    pub timeout: Duration,
    /// After cancellation, how long to wait for the worker to acknowledge
    /// before detaching it and reporting it as orphaned.
    pub cancel_grace: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(240),
            cancel_grace: Duration::from_millis(50),
        }
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Runs the exhaustive engine on `graph` under the configured deadline.
///
/// The graph is cloned into the worker, so the caller's copy is untouched
/// no matter how the run ends. Status semantics:
///
/// - `Completed`: worker finished in time; its outcome is relayed.
/// - `TimedOut`: deadline elapsed; the worker is cancelled, no partial set
///   is surfaced, and the reported elapsed time is the deadline itself.
/// - `Failed`: worker panicked before reporting.
pub fn run_with_timeout(graph: &Graph, graph_name: &str, config: &HarnessConfig) -> SearchRecord {
    let worker_graph = graph.clone();
    run_worker_with_timeout(graph_name, config, move |token| {
        exhaustive::search_cancellable(&worker_graph, &token)
    })
}

/// Spawns `worker` on its own thread and supervises it under the deadline.
///
/// The worker receives a cancellation token and returns `Some(outcome)` on a
/// full run or `None` after acknowledging a cancel request.
fn run_worker_with_timeout<F>(graph_name: &str, config: &HarnessConfig, worker: F) -> SearchRecord
where
    F: FnOnce(CancelToken) -> Option<SearchOutcome> + Send + 'static,
{
    let start = Instant::now();
    let token = CancelToken::new();
    let (tx, rx) = channel::bounded(1);

    let worker_token = token.clone();
    let handle = thread::spawn(move || {
        // A cancelled worker sends nothing; dropping the sender is its
        // acknowledgement either way.
        if let Some(outcome) = worker(worker_token) {
            let _ = tx.send(outcome);
        }
    });

    match rx.recv_timeout(config.timeout) {
        Ok(outcome) => {
            let _ = handle.join();
            SearchRecord::completed(graph_name, outcome)
        }
        Err(RecvTimeoutError::Timeout) => {
            token.cancel();
            reap_or_orphan(handle, graph_name, config.cancel_grace);
            SearchRecord::timed_out(graph_name, config.timeout)
        }
        Err(RecvTimeoutError::Disconnected) => {
            // Sender dropped without a result and without a cancel request:
            // the worker panicked.
            let _ = handle.join();
            SearchRecord::failed(graph_name, start.elapsed())
        }
    }
}

/// Waits up to `grace` for a cancelled worker to stop, then detaches it.
///
/// Threads cannot be force-killed, so a worker that ignores cancellation is
/// left to finish on its own; it is reported for operational visibility and
/// its eventual result goes nowhere (the channel's receive side is gone).
fn reap_or_orphan(handle: thread::JoinHandle<()>, graph_name: &str, grace: Duration) {
    let poll = Duration::from_millis(1);
    let deadline = Instant::now() + grace;
    while Instant::now() < deadline {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(poll);
    }
    eprintln!(
        "Warning: exhaustive search worker for {graph_name} did not stop within {} ms; \
         detaching it as orphaned.",
        grace.as_millis()
    );
    drop(handle);
}

// ============================================================================
// Tests
// ============================================================================
