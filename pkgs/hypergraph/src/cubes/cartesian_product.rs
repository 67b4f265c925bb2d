//! Cartesian-product iterative-refinement cube generation (§4.6): a
//! priority-queue frontier search, refining the highest-scored partial
//! assignment one variable at a time.
//!
//! Grounded on
//! `original_source/source/decomposition/AbstractProblemUnderAssumptionCubeGenerator.cpp`:
//! seed the queue with `(∅, 0)`; while the queue has fewer than
//! `nb_cubes_max` entries, pop the highest-scored entry, branch over every
//! value of the first variable with domain size > 1, score each child as
//! the product of every variable's current domain size (or `-1` on
//! UNSAT), and keep only non-negative-scored children. If nothing
//! refines, push the entry back unchanged and stop — this preserves the
//! original's guarantee that the frontier is never emptied by a terminal
//! node.

use super::materialize;
use panoramyx_core::{Assumption, Cube, ProblemUnderAssumption, UniverseSolver, UniverseSolverResult};
use std::collections::{BinaryHeap, HashSet};

pub struct CartesianProductCubeGenerator {
    inner: std::vec::IntoIter<Cube>,
}

fn compute_score(solver: &mut dyn UniverseSolver, assumptions: &Cube) -> i64 {
    solver.reset();
    if solver.solve(assumptions) == UniverseSolverResult::Unsatisfiable {
        return -1;
    }
    solver
        .variables_mapping()
        .values()
        .map(|variable| variable.domain().current_size() as i64)
        .product()
}

impl CartesianProductCubeGenerator {
    pub fn new(mut solver: Box<dyn UniverseSolver>, nb_cubes_max: usize) -> Self {
        let mut heap = BinaryHeap::new();
        heap.push(ProblemUnderAssumption::new(Cube::new(), 0));

        while heap.len() < nb_cubes_max {
            let Some(problem) = heap.pop() else {
                break;
            };

            solver.reset();
            solver.solve(&problem.assumptions);
            let mapping = solver.variables_mapping();
            let assumed: HashSet<&str> = problem
                .assumptions
                .iter()
                .map(|a| a.variable_id.as_str())
                .collect();

            let candidate = mapping
                .iter()
                .find(|(name, var)| !assumed.contains(name.as_str()) && var.domain().current_size() > 1);

            match candidate {
                Some((name, var)) => {
                    for value in var.domain().current_values() {
                        let mut new_assumptions = problem.assumptions.clone();
                        new_assumptions.push(Assumption::eq_value(name.clone(), *value));
                        let score = compute_score(solver.as_mut(), &new_assumptions);
                        if score >= 0 {
                            heap.push(ProblemUnderAssumption::new(new_assumptions, score));
                        }
                    }
                }
                None => {
                    heap.push(problem);
                    break;
                }
            }
        }

        let cubes: Vec<Cube> = heap
            .into_sorted_vec()
            .into_iter()
            .rev()
            .map(|p| p.assumptions)
            .collect();

        Self {
            inner: materialize(cubes),
        }
    }
}

impl Iterator for CartesianProductCubeGenerator {
    type Item = Cube;

    fn next(&mut self) -> Option<Cube> {
        self.inner.next()
    }
}
