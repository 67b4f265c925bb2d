//! Worker loop (§4.10): each worker owns a sequential solver and services
//! one request at a time, decoded off messages from the coordinator.
//!
//! The thread transport has no wildcard receive (`spec.md` §9(b)), and a
//! single blocking `receive` can only watch one `(tag, src)` pair at a
//! time, so a worker cannot simply call `receive(TAG_SOLVE, ANY_SOURCE)`
//! and expect `INTERRUPT`/`BOUND_UPDATE`/`END` to also show up on it.
//! Instead one thread per reserved tag blocks on that tag alone and
//! forwards whatever arrives into a single local channel; the loop itself
//! just drains that channel, so messages on different tags are never
//! starved by one another (`spec.md` §5: "`INTERRUPT`... may arrive
//! concurrently with a pending `SOLVE`") while still being handled one at a
//! time against the single `&mut` solver.

use crossbeam_channel::{unbounded, Receiver};
use panoramyx_codec::{tags, Frame, MessageBuilder, MessageReader};
use panoramyx_core::{BigInt, UniverseSolver, UniverseSolverResult};
use panoramyx_transport::Transport;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

const LISTENED_TAGS: [i16; 4] = [
    tags::TAG_SOLVE,
    tags::TAG_INTERRUPT,
    tags::TAG_BOUND_UPDATE,
    tags::TAG_END,
];

pub struct WorkerLoop {
    transport: Arc<dyn Transport>,
    coordinator_rank: i32,
    solver: Box<dyn UniverseSolver>,
    ignored_constraints: BTreeSet<i32>,
}

impl WorkerLoop {
    pub fn new(transport: Arc<dyn Transport>, coordinator_rank: i32, solver: Box<dyn UniverseSolver>) -> Self {
        Self {
            transport,
            coordinator_rank,
            solver,
            ignored_constraints: BTreeSet::new(),
        }
    }

    /// Services requests until `END` arrives or every listener tag's
    /// transport fails. Each reserved tag gets its own blocking listener
    /// thread so a slow or absent message on one tag never delays another.
    pub fn run(&mut self) {
        let (tx, rx): (_, Receiver<(i16, Frame)>) = unbounded();
        // Each listener blocks forever on its own tag with no way to
        // cancel a pending `receive` (the transport exposes no such
        // primitive), so these are detached rather than joined — the same
        // choice the original dispatch thread makes for itself
        // (`EPSSolver::startSearch`'s `solvingThread.detach()`).
        for tag in LISTENED_TAGS {
            let transport = Arc::clone(&self.transport);
            let coordinator_rank = self.coordinator_rank;
            let tx = tx.clone();
            thread::spawn(move || loop {
                match transport.receive(tag, coordinator_rank) {
                    Ok(frame) => {
                        if tx.send((tag, frame)).is_err() {
                            return;
                        }
                    }
                    Err(_) => return,
                }
            });
        }
        drop(tx);

        while let Ok((tag, frame)) = rx.recv() {
            match tag {
                tags::TAG_SOLVE => self.handle_solve(frame),
                tags::TAG_INTERRUPT => self.solver.interrupt(),
                tags::TAG_BOUND_UPDATE => self.handle_bound_update(frame),
                tags::TAG_END => {
                    log::info!("worker loop terminating");
                    break;
                }
                _ => unreachable!("only listened-for tags are ever forwarded"),
            }
        }
    }

    fn handle_solve(&mut self, frame: Frame) {
        let mut reader = MessageReader::new(frame.payload());
        let name = reader.read_string().unwrap_or_default();
        if name == tags::MESSAGE_CONSTRAINT_SCORE {
            let index = reader.read_int().unwrap_or(0);
            self.handle_constraint_score(index);
            return;
        }
        if name == tags::MESSAGE_CONSTRAINT_IS_IGNORED {
            let index = reader.read_int().unwrap_or(0);
            self.handle_constraint_is_ignored(index);
            return;
        }
        if name == tags::MESSAGE_CONSTRAINT_SET_IGNORED {
            let index = reader.read_int().unwrap_or(0);
            let ignored = reader.read_bool().unwrap_or(false);
            if ignored {
                self.ignored_constraints.insert(index);
            } else {
                self.ignored_constraints.remove(&index);
            }
            return;
        }

        let cube = reader.read_cube().unwrap_or_default();
        self.solver.reset();
        let verdict = self.solver.solve(&cube);

        let mut response = MessageBuilder::new()
            .named(tags::MESSAGE_RESULT)
            .with_tag(tags::TAG_RESULT)
            .with_int(verdict_code(verdict));
        response = response.with_long_vec(&self.solver.solution().unwrap_or_default());

        if let Err(err) = self.transport.send(response.build(), self.coordinator_rank) {
            log::error!("failed to report solve result: {err}");
        }
    }

    fn handle_bound_update(&self, frame: Frame) {
        let mut reader = MessageReader::new(frame.payload());
        let _name = reader.read_string();
        let bound: BigInt = reader.read_bigint().unwrap_or(0);
        log::debug!("received bound update {bound}, no optimization backend attached to apply it");
    }

    fn handle_constraint_score(&self, constraint_index: i32) {
        log::debug!("constraint score requested for index {constraint_index}, no scoring backend attached");
        let response = MessageBuilder::new().with_tag(tags::TAG_RESPONSE).with_double(0.0).build();
        let _ = self.transport.send(response, self.coordinator_rank);
    }

    fn handle_constraint_is_ignored(&self, constraint_index: i32) {
        let ignored = self.ignored_constraints.contains(&constraint_index);
        let response = MessageBuilder::new().with_tag(tags::TAG_RESPONSE).with_bool(ignored).build();
        let _ = self.transport.send(response, self.coordinator_rank);
    }
}

fn verdict_code(verdict: UniverseSolverResult) -> i32 {
    match verdict {
        UniverseSolverResult::Satisfiable => 0,
        UniverseSolverResult::Unsatisfiable => 1,
        UniverseSolverResult::Unknown => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panoramyx_testkit::ToySolver;
    use panoramyx_transport::thread::ThreadTransportGroup;

    #[test]
    fn solve_request_round_trips_a_satisfiable_verdict() {
        let group = ThreadTransportGroup::new(2);
        let coordinator = group.handle(0);
        let worker_transport = group.handle(1);

        let cube = vec![panoramyx_core::Assumption::eq_value("x", 1)];
        let solve_frame = MessageBuilder::new()
            .named(tags::MESSAGE_SOLVE)
            .with_tag(tags::TAG_SOLVE)
            .with_cube(&cube)
            .build();
        coordinator.send(solve_frame, 1).unwrap();
        let end_frame = MessageBuilder::new().named(tags::MESSAGE_END).with_tag(tags::TAG_END).build();
        coordinator.send(end_frame, 1).unwrap();

        let solver = Box::new(ToySolver::trivially_satisfiable());
        let mut worker = WorkerLoop::new(Arc::new(worker_transport), 0, solver);
        worker.run();

        let result = coordinator.receive(tags::TAG_RESULT, 1).unwrap();
        let mut reader = MessageReader::new(result.payload());
        assert_eq!(reader.read_string().unwrap(), tags::MESSAGE_RESULT);
        assert_eq!(reader.read_int().unwrap(), 0);
    }

    #[test]
    fn interrupt_is_not_starved_by_a_pending_solve_listener() {
        let group = ThreadTransportGroup::new(2);
        let coordinator = group.handle(0);
        let worker_transport = group.handle(1);

        let interrupt_frame = MessageBuilder::new().with_tag(tags::TAG_INTERRUPT).build();
        coordinator.send(interrupt_frame, 1).unwrap();
        let end_frame = MessageBuilder::new().named(tags::MESSAGE_END).with_tag(tags::TAG_END).build();
        coordinator.send(end_frame, 1).unwrap();

        let solver = Box::new(ToySolver::trivially_satisfiable());
        let mut worker = WorkerLoop::new(Arc::new(worker_transport), 0, solver);
        worker.run();
    }
}
