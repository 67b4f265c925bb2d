//! Lexicographic cube generation (§4.6): enumerate assignments in lex
//! order of variable name, expanding one variable per round across the
//! whole frontier so generation stops at the first depth that has
//! produced enough cubes.

use super::materialize;
use crate::FinalConsistencyChecker;
use panoramyx_core::{Assumption, Cube, UniverseSolver, UniverseSolverResult};
use std::collections::HashSet;

pub struct LexicographicCubeGenerator {
    inner: std::vec::IntoIter<Cube>,
}

impl LexicographicCubeGenerator {
    pub fn new(mut solver: Box<dyn UniverseSolver>, nb_cubes_max: usize) -> Self {
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

                let candidate = mapping
                    .iter()
                    .find(|(name, var)| !assumed.contains(name.as_str()) && var.domain().current_size() > 1);

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
}

impl Iterator for LexicographicCubeGenerator {
    type Item = Cube;

    fn next(&mut self) -> Option<Cube> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panoramyx_testkit::ToySolver;

    #[test]
    fn stops_at_the_first_depth_with_enough_cubes() {
        let solver = Box::new(ToySolver::new(vec!["x", "y"], 2));
        let mut generator = LexicographicCubeGenerator::new(solver, 2);

        let first = generator.next().unwrap();
        assert_eq!(first.len(), 1);
        let second = generator.next().unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(generator.next(), Some(Cube::new()));
        assert_eq!(generator.next(), None);
    }

    #[test]
    fn unsatisfiable_solver_yields_only_the_sentinel() {
        let solver = Box::new(ToySolver::unsatisfiable());
        let mut generator = LexicographicCubeGenerator::new(solver, 4);
        assert_eq!(generator.next(), Some(Cube::new()));
        assert_eq!(generator.next(), None);
    }
}
