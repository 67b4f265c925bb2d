//! Scenario 2: an instance whose two branches are both unsatisfiable.
//! Every dispatched cube must report UNSAT before the coordinator declares
//! the overall result UNSAT — one straggler is not enough.

use panoramyx_codec::{tags, MessageReader};
use panoramyx_core::{Cube, UniverseSolverResult};
use panoramyx_coordinator::{EPSSolver, GlobalResult};
use panoramyx_hypergraph::cubes::LexicographicCubeGenerator;
use panoramyx_testkit::ToySolver;
use panoramyx_transport::thread::ThreadTransportGroup;
use panoramyx_transport::Transport;
use std::sync::Arc;
use std::thread;

fn relay_results(coordinator: Arc<EPSSolver>, transport: Arc<dyn Transport>, worker_rank: i32) {
    thread::spawn(move || {
        while let Ok(frame) = transport.receive(tags::TAG_RESULT, worker_rank) {
            let mut reader = MessageReader::new(frame.payload());
            let _ = reader.read_string();
            let verdict = match reader.read_int().unwrap_or(2) {
                0 => UniverseSolverResult::Satisfiable,
                1 => UniverseSolverResult::Unsatisfiable,
                _ => UniverseSolverResult::Unknown,
            };
            coordinator.on_worker_result((worker_rank - 1) as usize, verdict);
        }
    });
}

#[test]
fn every_cube_reporting_unsat_drives_the_overall_result_to_unsatisfiable() {
    let group = ThreadTransportGroup::new(3);
    let coordinator_transport: Arc<dyn Transport> = Arc::new(group.handle(0));
    let coordinator = Arc::new(EPSSolver::new(Arc::clone(&coordinator_transport)));
    coordinator.ready(0);
    coordinator.ready(1);

    relay_results(Arc::clone(&coordinator), Arc::clone(&coordinator_transport), 1);
    relay_results(Arc::clone(&coordinator), Arc::clone(&coordinator_transport), 2);

    // Each worker's own copy of the instance is unconditionally
    // unsatisfiable (standing in for `x=0 AND x=1` conflicting with
    // whichever branch it was handed), independent of the simplified view
    // the cube generator itself searches under.
    let worker_handles: Vec<_> = (1..=2)
        .map(|rank| {
            let transport = Arc::new(group.handle(rank));
            thread::spawn(move || {
                let solver = ToySolver::new(vec!["x"], 2).with_unsat_predicate(|_cube| true);
                EPSSolver::run_worker(transport, 0, Box::new(solver));
            })
        })
        .collect();

    let cube_generator = Box::new(ToySolver::new(vec!["x"], 2));
    let cubes: Vec<Cube> = LexicographicCubeGenerator::new(cube_generator, 2).collect();
    assert_eq!(cubes.len(), 3); // {x=0}, {x=1}, and the sentinel
    coordinator.start_search(cubes);

    assert_eq!(coordinator.wait_for_completion(), GlobalResult::Unsatisfiable);
    coordinator.finalize();
    for handle in worker_handles {
        handle.join().unwrap();
    }
}
