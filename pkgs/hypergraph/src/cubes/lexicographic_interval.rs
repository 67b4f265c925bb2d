//! Lexicographic-interval cube generation (§4.6): like
//! [`super::lexicographic`], but each branch restricts a variable to one
//! of `nb_intervals` equal sub-intervals of its current domain instead of
//! a single value — useful once domains are too large to enumerate value
//! by value.
//!
//! The data model's [`Assumption`] is a bare `(variableId, equal, value)`
//! triple (`spec.md` §3) with no range field, so a sub-interval is
//! expressed the way the triple's own documented `equal = false` meaning
//! ("variable != value") already allows: the cube excludes every domain
//! value that falls outside the chosen bucket. For a finite domain that is
//! exactly equivalent to restricting the variable to the bucket.

use super::materialize;
use crate::FinalConsistencyChecker;
use panoramyx_core::{Assumption, BigInt, Cube, UniverseSolver, UniverseSolverResult};
use std::collections::HashSet;

pub struct LexicographicIntervalCubeGenerator {
    inner: std::vec::IntoIter<Cube>,
}

/// Splits `values` (assumed already in domain order) into up to
/// `nb_intervals` contiguous, near-equal-size buckets.
fn bucket(values: &[BigInt], nb_intervals: usize) -> Vec<&[BigInt]> {
    let nb_intervals = nb_intervals.max(1);
    let chunk_size = values.len().div_ceil(nb_intervals).max(1);
    values.chunks(chunk_size).collect()
}

impl LexicographicIntervalCubeGenerator {
    pub fn new(mut solver: Box<dyn UniverseSolver>, nb_cubes_max: usize, nb_intervals: usize) -> Self {
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
                        let values = var.domain().current_values();
                        for chosen in bucket(values, nb_intervals) {
                            let excluded = values.iter().filter(|v| !chosen.contains(v));
                            let mut child = cube.clone();
                            child.extend(
                                excluded.map(|&value| Assumption::new(name.clone(), false, value)),
                            );
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

impl Iterator for LexicographicIntervalCubeGenerator {
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
    fn splits_a_domain_into_two_intervals() {
        let solver = Box::new(ToySolver::new(vec!["x"], 4));
        let mut generator = LexicographicIntervalCubeGenerator::new(solver, 2, 2);

        let first = generator.next().unwrap();
        assert_eq!(first.len(), 2); // excludes the other half of the domain
        let second = generator.next().unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(generator.next(), Some(Cube::new()));
    }

    #[test]
    fn bucket_splits_evenly_when_divisible() {
        let values = vec![0, 1, 2, 3];
        let buckets = bucket(&values, 2);
        assert_eq!(buckets, vec![&[0, 1][..], &[2, 3][..]]);
    }
}
