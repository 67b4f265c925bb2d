//! The abstract parallel-solver skeleton shared by [`crate::EPSSolver`] and
//! [`crate::PortfolioSolver`] (§4.9): per-worker state, the one-way global
//! result, and the `cubes`/`solved` semaphores that let a dispatch thread
//! hand cubes off to workers and later learn the final verdict.
//!
//! Grounded on `original_source/source/solver/EPSSolver.cpp`, generalized
//! to the parts both coordinators share (worker bookkeeping,
//! `onSatisfiableFound`/`onUnsatisfiableFound`, `waitForAllCubes`-style
//! blocking) — the cube-stream-specific dispatch loop lives in
//! [`crate::EPSSolver`] itself.

use crate::queue::AvailableSolvers;
use crate::remote::RemoteSolverProxy;
use crate::semaphore::CountingSemaphore;
use panoramyx_core::{BigInt, UniverseSolver};
use panoramyx_transport::Transport;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Running,
    Interrupted,
}

/// The coordinator's view of the overall search. Transitions are one-way
/// out of `Unknown` (`spec.md` §4.9 "idempotence"): once set to anything
/// else, later SAT/UNSAT events from stragglers are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalResult {
    Unknown,
    Satisfiable,
    Unsatisfiable,
    Optimum,
    Timeout,
}

impl GlobalResult {
    pub fn is_final(self) -> bool {
        self != GlobalResult::Unknown
    }
}

/// Shared coordination state and the worker proxies it drives. Both
/// concrete coordinators hold one of these and build their own dispatch
/// loop around it.
pub struct AbstractParallelSolver {
    transport: Arc<dyn Transport>,
    workers: Vec<Mutex<RemoteSolverProxy>>,
    worker_states: Mutex<Vec<WorkerState>>,
    result: Mutex<GlobalResult>,
    model: Mutex<Option<Vec<BigInt>>>,
    pub(crate) available: AvailableSolvers,
    pub(crate) cubes: CountingSemaphore,
    pub(crate) solved: CountingSemaphore,
}

impl AbstractParallelSolver {
    /// `transport.size() - 1` workers are addressed, at ranks `1..size()`;
    /// rank `0` is always the coordinator itself.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let num_workers = (transport.size() - 1).max(0) as usize;
        let workers = (1..=num_workers as i32)
            .map(|rank| Mutex::new(RemoteSolverProxy::new(Arc::clone(&transport), rank)))
            .collect();
        Self {
            transport,
            workers,
            worker_states: Mutex::new(vec![WorkerState::Idle; num_workers]),
            result: Mutex::new(GlobalResult::Unknown),
            model: Mutex::new(None),
            available: AvailableSolvers::new(),
            cubes: CountingSemaphore::new(0),
            solved: CountingSemaphore::new(0),
        }
    }

    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn worker(&self, index: usize) -> &Mutex<RemoteSolverProxy> {
        &self.workers[index]
    }

    pub fn result(&self) -> GlobalResult {
        *self.result.lock()
    }

    pub fn model(&self) -> Option<Vec<BigInt>> {
        self.model.lock().clone()
    }

    /// Direct access to the stored model, for coordinators (like
    /// [`crate::PortfolioSolver`]) that record a best-known solution
    /// outside of [`Self::on_satisfiable_found`]'s one-way SAT transition.
    pub fn model_override(&self) -> &Mutex<Option<Vec<BigInt>>> {
        &self.model
    }

    /// A worker has signaled `READY` after loading the instance: it joins
    /// the pool of solvers the dispatcher can hand cubes to.
    pub fn ready(&self, worker_index: usize) {
        self.worker_states.lock()[worker_index] = WorkerState::Idle;
        self.available.add(worker_index);
    }

    pub fn mark_running(&self, worker_index: usize) {
        self.worker_states.lock()[worker_index] = WorkerState::Running;
    }

    /// A worker found a model. The first such event wins: it clears the
    /// pool (so the dispatcher cannot hand out any more cubes), interrupts
    /// every other worker, and records the model. Later events are no-ops
    /// on `result`/`model`, matching the one-way transition rule, but still
    /// release `cubes` so a blocked `wait_for_all_cubes` is never starved.
    pub fn on_satisfiable_found(&self, worker_index: usize) {
        let mut result = self.result.lock();
        if !result.is_final() {
            *result = GlobalResult::Satisfiable;
            *self.model.lock() = self.workers[worker_index].lock().solution();
            drop(result);
            self.available.clear();
            self.interrupt_all_except(worker_index);
        }
        self.cubes.release();
    }

    pub fn on_unsatisfiable_found(&self, worker_index: usize) {
        self.worker_states.lock()[worker_index] = WorkerState::Idle;
        self.available.add(worker_index);
        self.cubes.release();
    }

    /// Sends `INTERRUPT` to every `Running` worker other than `except`
    /// (pass an out-of-range index to interrupt everyone).
    pub fn interrupt_all_except(&self, except: usize) {
        let states = self.worker_states.lock().clone();
        for (index, state) in states.iter().enumerate() {
            if index != except && *state == WorkerState::Running {
                self.workers[index].lock().interrupt();
                self.worker_states.lock()[index] = WorkerState::Interrupted;
            }
        }
    }

    pub fn interrupt(&self) {
        self.interrupt_all_except(usize::MAX);
    }

    /// Blocks until `nb_dispatched` cubes have been accounted for (either
    /// returned UNSAT, one at a time, or the search ended early because one
    /// came back SAT). Sets the final result to `Unsatisfiable` only if
    /// every dispatched cube was accounted for without a SAT event.
    pub fn wait_for_all_cubes(&self, nb_dispatched: usize) {
        for _ in 0..nb_dispatched {
            self.cubes.acquire();
            if self.result() == GlobalResult::Satisfiable {
                self.solved.release();
                return;
            }
        }
        let mut result = self.result.lock();
        if !result.is_final() {
            *result = GlobalResult::Unsatisfiable;
        }
        drop(result);
        self.solved.release();
    }

    pub fn finalize(&self) {
        for worker in &self.workers {
            let _ = worker.lock().send_end();
        }
        self.transport.finalize();
    }

    /// Forces the final result (used by [`crate::PortfolioSolver`], whose
    /// termination condition — every worker exhausting its slice, or one
    /// proving optimality — doesn't fit the cube-counting rule
    /// [`Self::wait_for_all_cubes`] implements for [`crate::EPSSolver`]).
    /// A no-op once the result is already final, and always wakes anyone
    /// blocked waiting for completion.
    pub fn finish_with(&self, outcome: GlobalResult) {
        let mut result = self.result.lock();
        if !result.is_final() {
            *result = outcome;
            drop(result);
            self.available.clear();
            self.interrupt();
        }
        self.solved.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panoramyx_transport::thread::ThreadTransportGroup;

    #[test]
    fn on_satisfiable_found_is_idempotent_after_the_first_call() {
        let group = ThreadTransportGroup::new(3);
        let coordinator = AbstractParallelSolver::new(Arc::new(group.handle(0)));
        coordinator.ready(0);
        coordinator.ready(1);
        coordinator.mark_running(0);
        coordinator.mark_running(1);

        coordinator.on_satisfiable_found(0);
        assert_eq!(coordinator.result(), GlobalResult::Satisfiable);

        coordinator.on_satisfiable_found(1);
        assert_eq!(coordinator.result(), GlobalResult::Satisfiable);
    }

    #[test]
    fn wait_for_all_cubes_reports_unsat_once_every_cube_is_accounted_for() {
        let group = ThreadTransportGroup::new(2);
        let coordinator = Arc::new(AbstractParallelSolver::new(Arc::new(group.handle(0))));
        coordinator.cubes.release();
        coordinator.cubes.release();

        let waiter = Arc::clone(&coordinator);
        let handle = std::thread::spawn(move || waiter.wait_for_all_cubes(2));
        handle.join().unwrap();

        assert_eq!(coordinator.result(), GlobalResult::Unsatisfiable);
    }
}
