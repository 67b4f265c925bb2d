//! Portfolio coordination (§4.9): every worker attacks the same instance,
//! each with its own slice of the optimization range; the coordinator
//! reallocates bounds as better ones are found and declares optimality
//! once every remaining worker's range is exhausted.
//!
//! Grounded on `original_source/source/solver/PortfolioSolverBuilder.cpp`
//! (`PortfolioSolver(networkCommunication, allocationStrategy)`) and
//! `spec.md` §4.9's portfolio paragraph; `EPSSolver.cpp` supplies the
//! shared one-way-result idiom reused here via
//! [`AbstractParallelSolver`].

use crate::coordinator::{AbstractParallelSolver, GlobalResult};
use crate::worker::WorkerLoop;
use panoramyx_core::{BigInt, UniverseSolver};
use panoramyx_optim::BoundAllocationStrategy;
use panoramyx_transport::Transport;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct PortfolioSolver {
    inner: Arc<AbstractParallelSolver>,
    allocation_strategy: Box<dyn BoundAllocationStrategy + Send + Sync>,
    current_bounds: Mutex<Vec<BigInt>>,
    current_min: Mutex<BigInt>,
    current_max: Mutex<BigInt>,
    unsat_count: Mutex<usize>,
}

impl PortfolioSolver {
    pub fn new(
        transport: Arc<dyn Transport>,
        allocation_strategy: Box<dyn BoundAllocationStrategy + Send + Sync>,
        initial_min: BigInt,
        initial_max: BigInt,
    ) -> Self {
        let inner = Arc::new(AbstractParallelSolver::new(transport));
        let current_bounds = Mutex::new(vec![initial_min; inner.num_workers()]);
        Self {
            inner,
            allocation_strategy,
            current_bounds,
            current_min: Mutex::new(initial_min),
            current_max: Mutex::new(initial_max),
            unsat_count: Mutex::new(0),
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

    /// Lays out the initial bound allocation and dispatches every ready
    /// worker against the unassumed instance.
    pub fn start_search(&self) {
        let min = *self.current_min.lock();
        let max = *self.current_max.lock();
        let bounds = self
            .allocation_strategy
            .compute_bound_allocation(&self.current_bounds.lock(), min, max);
        *self.current_bounds.lock() = bounds.clone();

        for (worker_index, bound) in bounds.iter().enumerate() {
            self.inner.mark_running(worker_index);
            let worker = self.inner.worker(worker_index).lock();
            let _ = worker.send_bound_update(*bound);
            let _ = worker.dispatch_solve(&panoramyx_core::Cube::new());
        }
    }

    /// A worker reported a new best bound. Recomputes the allocation and
    /// pushes `BOUND_UPDATE` only to workers whose assigned bound actually
    /// changed.
    pub fn on_new_best_bound(&self, bound: BigInt, minimization: bool) {
        let mut current_min = self.current_min.lock();
        let mut current_max = self.current_max.lock();
        if minimization {
            *current_max = bound;
        } else {
            *current_min = bound;
        }

        let mut bounds = self.current_bounds.lock();
        let new_bounds = self
            .allocation_strategy
            .compute_bound_allocation(&bounds, *current_min, *current_max);

        for (worker_index, (old, new)) in bounds.iter().zip(new_bounds.iter()).enumerate() {
            if old != new {
                let _ = self.inner.worker(worker_index).lock().send_bound_update(*new);
            }
        }
        *bounds = new_bounds;
    }

    /// A worker proved its slice has no better solution than the current
    /// best. Once every worker has done so, the search is over: optimal if
    /// a model was ever found, unsatisfiable otherwise.
    pub fn on_worker_unsat(&self, _worker_index: usize) {
        let mut unsat_count = self.unsat_count.lock();
        *unsat_count += 1;
        if *unsat_count >= self.inner.num_workers() {
            let has_model = self.inner.model().is_some();
            self.inner.finish_with(if has_model {
                GlobalResult::Optimum
            } else {
                GlobalResult::Unsatisfiable
            });
        }
    }

    /// A worker proved its current candidate is optimal outright (no other
    /// worker can beat it): record the model and end the search.
    pub fn on_worker_optimum(&self, worker_index: usize) {
        *self.inner.model_override().lock() = self.inner.worker(worker_index).lock().solution();
        self.inner.finish_with(GlobalResult::Optimum);
    }

    pub fn run_worker(transport: Arc<dyn Transport>, coordinator_rank: i32, solver: Box<dyn UniverseSolver>) {
        WorkerLoop::new(transport, coordinator_rank, solver).run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panoramyx_optim::{LinearRangeIterator, RangeBasedAllocationStrategy};
    use panoramyx_transport::thread::ThreadTransportGroup;

    fn strategy() -> Box<dyn BoundAllocationStrategy + Send + Sync> {
        Box::new(RangeBasedAllocationStrategy::new(Box::new(|min, max, steps| {
            Box::new(LinearRangeIterator::new(min, max, steps)) as Box<dyn Iterator<Item = BigInt>>
        })))
    }

    #[test]
    fn on_worker_unsat_declares_unsatisfiable_once_every_worker_has_reported() {
        let group = ThreadTransportGroup::new(3);
        let solver = PortfolioSolver::new(Arc::new(group.handle(0)), strategy(), 0, 100);
        solver.on_worker_unsat(0);
        assert_eq!(solver.result(), GlobalResult::Unknown);
        solver.on_worker_unsat(1);
        assert_eq!(solver.result(), GlobalResult::Unsatisfiable);
    }

    #[test]
    fn on_worker_unsat_declares_optimum_when_a_model_was_already_found() {
        let group = ThreadTransportGroup::new(2);
        let solver = PortfolioSolver::new(Arc::new(group.handle(0)), strategy(), 0, 100);
        *solver.inner.model_override().lock() = Some(vec![1, 2, 3]);
        solver.on_worker_unsat(0);
        assert_eq!(solver.result(), GlobalResult::Optimum);
        assert_eq!(solver.model(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn new_best_bound_only_rewrites_workers_whose_allocation_changed() {
        let group = ThreadTransportGroup::new(4);
        let solver = PortfolioSolver::new(Arc::new(group.handle(0)), strategy(), 0, 100);
        solver.start_search();
        for worker in 1..=3 {
            group.handle(worker).receive(panoramyx_codec::tags::TAG_BOUND_UPDATE, 0).unwrap();
            group.handle(worker).receive(panoramyx_codec::tags::TAG_SOLVE, 0).unwrap();
        }

        solver.on_new_best_bound(40, true);
        // At least the worker nearest the old maximum must have been
        // re-notified, since the range just shrank out from under it.
        let updated = group.handle(3).receive(panoramyx_codec::tags::TAG_BOUND_UPDATE, 0);
        assert!(updated.is_ok());
    }
}
