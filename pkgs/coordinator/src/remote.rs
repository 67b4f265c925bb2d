//! Remote-solver proxy and remote constraint (§4.7): the coordinator's view
//! of a worker, as a plain [`UniverseSolver`] backed by message round trips
//! instead of in-process calls.
//!
//! Grounded on `original_source/source/problem/RemoteConstraint.cpp` for
//! the constraint half (fire-and-forget `set_ignored`, round-tripping
//! `is_ignored`/`score` under a shared response mutex) and on the worker
//! wire contract of `spec.md` §6 for the solver half.

use panoramyx_codec::{tags, MessageBuilder, MessageReader};
use panoramyx_core::{BigInt, Cube, PanoramyxError, UniverseSolver, UniverseSolverResult, Variable, VariableId};
use panoramyx_transport::Transport;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A worker, addressed by rank, seen through the `UniverseSolver` contract.
/// Every call that must return a value takes `response_mutex` so the
/// solving thread and a listener thread never interleave requests to the
/// same worker.
pub struct RemoteSolverProxy {
    transport: Arc<dyn Transport>,
    worker_rank: i32,
    response_mutex: Arc<Mutex<()>>,
    last_solution: Option<Vec<BigInt>>,
}

impl RemoteSolverProxy {
    pub fn new(transport: Arc<dyn Transport>, worker_rank: i32) -> Self {
        Self {
            transport,
            worker_rank,
            response_mutex: Arc::new(Mutex::new(())),
            last_solution: None,
        }
    }

    pub fn worker_rank(&self) -> i32 {
        self.worker_rank
    }

    pub fn response_mutex(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.response_mutex)
    }

    /// Sends `SOLVE(cube)` without waiting for the result. Used by the
    /// coordinators' dispatch loops, which receive the verdict later via a
    /// dedicated listener rather than blocking the dispatcher on it.
    pub fn dispatch_solve(&self, cube: &Cube) -> Result<(), PanoramyxError> {
        let frame = MessageBuilder::new()
            .named(tags::MESSAGE_SOLVE)
            .with_tag(tags::TAG_SOLVE)
            .with_cube(cube)
            .build();
        self.transport.send(frame, self.worker_rank)
    }

    pub fn send_bound_update(&self, bound: BigInt) -> Result<(), PanoramyxError> {
        let frame = MessageBuilder::new()
            .named(tags::MESSAGE_BOUND_UPDATE)
            .with_tag(tags::TAG_BOUND_UPDATE)
            .with_bigint(bound)
            .build();
        self.transport.send(frame, self.worker_rank)
    }

    pub fn send_end(&self) -> Result<(), PanoramyxError> {
        let frame = MessageBuilder::new()
            .named(tags::MESSAGE_END)
            .with_tag(tags::TAG_END)
            .build();
        self.transport.send(frame, self.worker_rank)
    }
}

impl UniverseSolver for RemoteSolverProxy {
    /// No-op: the worker loop resets its local solver itself as part of
    /// handling `SOLVE` (`spec.md` §4.10), so there is no wire message for
    /// a standalone reset.
    fn reset(&mut self) {}

    fn solve(&mut self, cube: &Cube) -> UniverseSolverResult {
        let _guard = self.response_mutex.lock();
        if self.dispatch_solve(cube).is_err() {
            return UniverseSolverResult::Unknown;
        }
        match self.transport.receive(tags::TAG_RESULT, self.worker_rank) {
            Ok(frame) => {
                let mut reader = MessageReader::new(frame.payload());
                let verdict = reader.read_int().unwrap_or(2);
                let solution = reader.read_long_vec().ok().filter(|v| !v.is_empty());
                self.last_solution = solution;
                match verdict {
                    0 => UniverseSolverResult::Satisfiable,
                    1 => UniverseSolverResult::Unsatisfiable,
                    _ => UniverseSolverResult::Unknown,
                }
            }
            Err(_) => UniverseSolverResult::Unknown,
        }
    }

    fn interrupt(&mut self) {
        let frame = MessageBuilder::new()
            .named(tags::MESSAGE_INTERRUPT)
            .with_tag(tags::TAG_INTERRUPT)
            .build();
        let _ = self.transport.send(frame, self.worker_rank);
    }

    /// A remote worker's full domain mapping is never round-tripped: doing
    /// so for every branching decision would be as expensive as running the
    /// search locally. Cube generation always runs against a local solver
    /// (the decomposition preprocessor or an embedded solver), never
    /// against a `RemoteSolverProxy`.
    fn variables_mapping(&self) -> BTreeMap<VariableId, Variable> {
        BTreeMap::new()
    }

    fn solution(&self) -> Option<Vec<BigInt>> {
        self.last_solution.clone()
    }

    /// Not part of the wire protocol's reserved tags; a timeout is instead
    /// enforced coordinator-side via `interrupt()` (`spec.md` §5).
    fn set_timeout_ms(&mut self, _timeout_ms: u64) {}

    fn set_verbosity(&mut self, _level: i32) {}
}

/// A single constraint of a remote worker's instance, indexed by its
/// position. `scope()` is intentionally unsupported: the variables it
/// touches are only known to the remote worker, and round-tripping that
/// scope for every constraint would defeat the purpose of decomposing the
/// instance in the first place.
pub struct RemoteConstraint {
    transport: Arc<dyn Transport>,
    response_mutex: Arc<Mutex<()>>,
    worker_rank: i32,
    constraint_index: i32,
}

impl RemoteConstraint {
    pub fn new(
        transport: Arc<dyn Transport>,
        response_mutex: Arc<Mutex<()>>,
        worker_rank: i32,
        constraint_index: i32,
    ) -> Self {
        Self {
            transport,
            response_mutex,
            worker_rank,
            constraint_index,
        }
    }

    pub fn scope(&self) -> Result<(), PanoramyxError> {
        Err(PanoramyxError::UnsupportedOperation(
            "a remote constraint's scope is too expensive to round-trip".to_string(),
        ))
    }

    /// Fire-and-forget: the worker applies the flag to its own copy of the
    /// constraint and never reports back.
    pub fn set_ignored(&self, ignored: bool) -> Result<(), PanoramyxError> {
        let frame = MessageBuilder::new()
            .named(tags::MESSAGE_CONSTRAINT_SET_IGNORED)
            .with_tag(tags::TAG_SOLVE)
            .with_int(self.constraint_index)
            .with_bool(ignored)
            .build();
        self.transport.send(frame, self.worker_rank)
    }

    pub fn is_ignored(&self) -> Result<bool, PanoramyxError> {
        let _guard = self.response_mutex.lock();
        let frame = MessageBuilder::new()
            .named(tags::MESSAGE_CONSTRAINT_IS_IGNORED)
            .with_tag(tags::TAG_SOLVE)
            .with_int(self.constraint_index)
            .build();
        self.transport.send(frame, self.worker_rank)?;
        let response = self.transport.receive(tags::TAG_RESPONSE, self.worker_rank)?;
        MessageReader::new(response.payload())
            .read_bool()
            .map_err(|e| PanoramyxError::TransportFailure(e.to_string()))
    }

    pub fn score(&self) -> Result<f64, PanoramyxError> {
        let _guard = self.response_mutex.lock();
        let frame = MessageBuilder::new()
            .named(tags::MESSAGE_CONSTRAINT_SCORE)
            .with_tag(tags::TAG_SOLVE)
            .with_int(self.constraint_index)
            .build();
        self.transport.send(frame, self.worker_rank)?;
        let response = self.transport.receive(tags::TAG_RESPONSE, self.worker_rank)?;
        MessageReader::new(response.payload())
            .read_double()
            .map_err(|e| PanoramyxError::TransportFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::WorkerLoop;
    use panoramyx_testkit::ToySolver;
    use panoramyx_transport::thread::ThreadTransportGroup;
    use std::thread;

    #[test]
    fn dispatch_solve_sends_a_tagged_frame_the_worker_can_decode() {
        let group = ThreadTransportGroup::new(2);
        let coordinator = group.handle(0);
        let worker = group.handle(1);

        let proxy = RemoteSolverProxy::new(Arc::new(coordinator), 1);
        let cube = vec![panoramyx_core::Assumption::eq_value("x", 1)];
        proxy.dispatch_solve(&cube).unwrap();

        let frame = worker.receive(tags::TAG_SOLVE, 0).unwrap();
        let mut reader = MessageReader::new(frame.payload());
        assert_eq!(reader.read_string().unwrap(), tags::MESSAGE_SOLVE);
        assert_eq!(reader.read_cube().unwrap(), cube);
    }

    #[test]
    fn remote_constraint_set_ignored_is_fire_and_forget() {
        let group = ThreadTransportGroup::new(2);
        let coordinator = group.handle(0);
        let worker = group.handle(1);

        let constraint = RemoteConstraint::new(Arc::new(coordinator), Arc::new(Mutex::new(())), 1, 3);
        constraint.set_ignored(true).unwrap();

        let frame = worker.receive(tags::TAG_SOLVE, 0).unwrap();
        let mut reader = MessageReader::new(frame.payload());
        assert_eq!(reader.read_string().unwrap(), tags::MESSAGE_CONSTRAINT_SET_IGNORED);
        assert_eq!(reader.read_int().unwrap(), 3);
        assert!(reader.read_bool().unwrap());
    }

    #[test]
    fn remote_constraint_is_ignored_round_trips_through_a_real_worker_loop() {
        let group = ThreadTransportGroup::new(2);
        let coordinator_transport: Arc<dyn Transport> = Arc::new(group.handle(0));
        let worker_transport: Arc<dyn Transport> = Arc::new(group.handle(1));

        let worker_handle = thread::spawn(move || {
            WorkerLoop::new(worker_transport, 0, Box::new(ToySolver::trivially_satisfiable())).run();
        });

        let constraint = RemoteConstraint::new(Arc::clone(&coordinator_transport), Arc::new(Mutex::new(())), 1, 3);
        assert!(!constraint.is_ignored().unwrap());
        constraint.set_ignored(true).unwrap();
        assert!(constraint.is_ignored().unwrap());

        coordinator_transport
            .send(MessageBuilder::new().named(tags::MESSAGE_END).with_tag(tags::TAG_END).build(), 1)
            .unwrap();
        worker_handle.join().unwrap();
    }

    #[test]
    fn remote_constraint_score_round_trips_through_a_real_worker_loop() {
        let group = ThreadTransportGroup::new(2);
        let coordinator_transport: Arc<dyn Transport> = Arc::new(group.handle(0));
        let worker_transport: Arc<dyn Transport> = Arc::new(group.handle(1));

        let worker_handle = thread::spawn(move || {
            WorkerLoop::new(worker_transport, 0, Box::new(ToySolver::trivially_satisfiable())).run();
        });

        let constraint = RemoteConstraint::new(Arc::clone(&coordinator_transport), Arc::new(Mutex::new(())), 1, 0);
        assert_eq!(constraint.score().unwrap(), 0.0);

        coordinator_transport
            .send(MessageBuilder::new().named(tags::MESSAGE_END).with_tag(tags::TAG_END).build(), 1)
            .unwrap();
        worker_handle.join().unwrap();
    }
}
