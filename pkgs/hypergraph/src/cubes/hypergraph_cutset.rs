//! Hypergraph-cutset cube generation (§4.6): lexicographic cube
//! enumeration restricted to a cutset of variables, computed once over the
//! dual hypergraph built by the decomposition preprocessor.
//!
//! Grounded on
//! `original_source/source/decomposition/HypergraphDecompositionCubeGenerator.cpp`,
//! which wraps a plain lexicographic stream over
//! `decompositionSolver->cutset()`. Fixing a variable in the cutset can
//! split the rest of the instance into independent pieces, which is
//! exactly what makes this generator worth using over plain lexicographic
//! on a large instance.

use super::materialize;
use crate::{DecompositionPreprocessor, FinalConsistencyChecker, Partitioner};
use panoramyx_core::{Assumption, Cube, UniverseSolver, UniverseSolverResult, VariableId};
use std::collections::HashSet;

pub struct HypergraphCutsetCubeGenerator {
    inner: std::vec::IntoIter<Cube>,
}

impl HypergraphCutsetCubeGenerator {
    /// Enumerates lexicographic cubes restricted to `cutset`.
    pub fn new(mut solver: Box<dyn UniverseSolver>, cutset: Vec<VariableId>, nb_cubes_max: usize) -> Self {
        let cutset: HashSet<VariableId> = cutset.into_iter().collect();
        let checker = FinalConsistencyChecker::new();
        let mut frontier: Vec<Cube> = vec![Cube::new()];

        while frontier.len() < nb_cubes_max {
            let mut next_frontier = Vec::new();
            let mut expanded_any = false;

            for cube in &frontier {
                solver.reset();
                if solver.solve(cube) == UniverseSolverResult::Unsatisfiable {
                    continue;
                }
                let mapping = solver.variables_mapping();
                let assumed: HashSet<&str> =
                    cube.iter().map(|a| a.variable_id.as_str()).collect();

                let candidate = mapping.iter().find(|(name, var)| {
                    cutset.contains(name.as_str())
                        && !assumed.contains(name.as_str())
                        && var.domain().current_size() > 1
                });

                match candidate {
                    Some((name, var)) => {
                        expanded_any = true;
                        for value in var.domain().current_values() {
                            let mut child = cube.clone();
                            child.push(Assumption::eq_value(name.clone(), *value));
                            if checker.check_final(solver.as_mut(), &child) {
                                next_frontier.push(child);
                            }
                        }
                    }
                    None => next_frontier.push(cube.clone()),
                }
            }

            if next_frontier.is_empty() {
                frontier = next_frontier;
                break;
            }
            frontier = next_frontier;
            if !expanded_any {
                break;
            }
        }

        Self {
            inner: materialize(frontier),
        }
    }

    /// Computes the cutset from scratch via `preprocessor`'s recorded
    /// incidence and `partitioner`, then enumerates lexicographic cubes
    /// restricted to it.
    pub fn from_preprocessor(
        solver: Box<dyn UniverseSolver>,
        preprocessor: &DecompositionPreprocessor,
        partitioner: &dyn Partitioner,
        nb_cubes_max: usize,
    ) -> Self {
        let hypergraph = preprocessor.hypergraph();
        let cutset = partitioner.partition(&hypergraph, preprocessor.variables());
        Self::new(solver, cutset, nb_cubes_max)
    }
}

impl Iterator for HypergraphCutsetCubeGenerator {
    type Item = Cube;

    fn next(&mut self) -> Option<Cube> {
        self.inner.next()
    }
}
