//! Cube-and-conquer coordination (§4.9): `EPSSolver` walks a cube stream,
//! handing each cube to the next available worker, and aggregates the
//! verdicts.
//!
//! Grounded on `original_source/source/solver/EPSSolver.cpp`: the dispatch
//! loop checks the global result *before* popping a worker (so it never
//! blocks on an emptied pool once a SAT event has already cleared it), and
//! `onSatisfiableFound`/`onUnsatisfiableFound` are exactly
//! [`AbstractParallelSolver::on_satisfiable_found`]/
//! [`AbstractParallelSolver::on_unsatisfiable_found`].

use crate::coordinator::{AbstractParallelSolver, GlobalResult};
use crate::worker::WorkerLoop;
use panoramyx_core::{BigInt, Cube, PanoramyxError, UniverseSolver};
use panoramyx_transport::Transport;
use std::sync::Arc;
use std::thread;

/// A cube-and-conquer coordinator. Each worker is driven exclusively
/// through its [`crate::RemoteSolverProxy`]; the cube stream is consumed
/// eagerly by a single dispatch thread, exactly as the original's detached
/// `solvingThread` does.
pub struct EPSSolver {
    inner: Arc<AbstractParallelSolver>,
}

impl EPSSolver {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(AbstractParallelSolver::new(transport)),
        }
    }

    pub fn ready(&self, worker_index: usize) {
        self.inner.ready(worker_index);
    }

    pub fn result(&self) -> GlobalResult {
        self.inner.result()
    }

    pub fn model(&self) -> Option<Vec<BigInt>> {
        self.inner.model()
    }

    pub fn interrupt(&self) {
        self.inner.interrupt();
    }

    pub fn finalize(&self) {
        self.inner.finalize();
    }

    /// `EPSSolver` already spends its assumptions on the cube stream
    /// itself; starting it with caller-supplied assumptions on top would be
    /// ambiguous, so this is always rejected.
    pub fn start_search_with_assumptions(&self, _assumptions: &Cube) -> Result<(), PanoramyxError> {
        Err(PanoramyxError::UnsupportedOperation(
            "cannot use assumptions in EPS mode".to_string(),
        ))
    }

    /// Spawns the dispatch thread and returns immediately; call
    /// [`Self::wait_for_completion`] to block for the final verdict. `cubes`
    /// is consumed eagerly up front by every generator in this workspace
    /// (see `panoramyx_hypergraph::cubes`), so iterating it here never
    /// blocks on further search.
    pub fn start_search(&self, cubes: impl IntoIterator<Item = Cube> + Send + 'static) {
        let inner = Arc::clone(&self.inner);
        thread::spawn(move || {
            let mut nb_dispatched = 0usize;

            for cube in cubes {
                if cube.is_empty() {
                    break;
                }
                if inner.result() != GlobalResult::Unknown {
                    log::info!("already solved, stopping dispatch");
                    break;
                }

                let worker_index = match inner.available.get() {
                    Ok(index) => index,
                    Err(_) => break,
                };
                nb_dispatched += 1;
                inner.mark_running(worker_index);
                let _ = inner.worker(worker_index).lock().dispatch_solve(&cube);
            }

            inner.wait_for_all_cubes(nb_dispatched);
            log::info!("dispatch finished");
        });
    }

    /// Blocks until the search has a final verdict.
    pub fn wait_for_completion(&self) -> GlobalResult {
        self.inner.solved.acquire();
        self.inner.result()
    }

    /// Runs one worker's request loop until `END`. Call this from each
    /// worker-side thread/process; it never returns before the coordinator
    /// sends `END`.
    pub fn run_worker(transport: Arc<dyn Transport>, coordinator_rank: i32, solver: Box<dyn UniverseSolver>) {
        WorkerLoop::new(transport, coordinator_rank, solver).run();
    }

    /// Called by the listener when a `RESULT` frame reports a verdict for
    /// `worker_index`'s cube.
    pub fn on_worker_result(&self, worker_index: usize, verdict: panoramyx_core::UniverseSolverResult) {
        use panoramyx_core::UniverseSolverResult::*;
        match verdict {
            Satisfiable => self.inner.on_satisfiable_found(worker_index),
            Unsatisfiable | Unknown => self.inner.on_unsatisfiable_found(worker_index),
        }
    }
}
