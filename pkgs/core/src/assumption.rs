use crate::{BigInt, VariableId};
use std::cmp::Ordering;

/// A single restriction on a variable's value: `variable == value` when
/// `equal` is `true`, `variable != value` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assumption {
    pub variable_id: VariableId,
    pub equal: bool,
    pub value: BigInt,
}

impl Assumption {
    pub fn new(variable_id: impl Into<VariableId>, equal: bool, value: BigInt) -> Self {
        Self {
            variable_id: variable_id.into(),
            equal,
            value,
        }
    }

    pub fn eq_value(variable_id: impl Into<VariableId>, value: BigInt) -> Self {
        Self::new(variable_id, true, value)
    }
}

/// An ordered sequence of assumptions. The order in which assumptions were
/// appended is preserved (it matters for reconstructing a search path) but
/// is not semantically meaningful beyond that: two cubes with the same
/// assumptions in a different order describe the same subproblem.
///
/// An empty cube is the sentinel a cube generator's stream uses to signal
/// "no more useful cubes" to the coordinator.
pub type Cube = Vec<Assumption>;

/// Checks the invariant shared by all cube generators: no variable appears
/// twice within a single cube.
pub fn assert_cube_is_well_formed(cube: &Cube) {
    let mut seen = std::collections::HashSet::with_capacity(cube.len());
    for assumption in cube {
        debug_assert!(
            seen.insert(assumption.variable_id.as_str()),
            "variable {} appears more than once in cube",
            assumption.variable_id
        );
    }
}

/// A partial assignment (as a cube) paired with a heuristic score, used as
/// a max-heap element by the cartesian-product iterative-refinement cube
/// generator. Ordering is purely by `score`; two elements with the same
/// score are considered equal by the heap (ties are broken arbitrarily,
/// matching the original `std::priority_queue<ProblemUnderAssumption>`).
#[derive(Debug, Clone)]
pub struct ProblemUnderAssumption {
    pub assumptions: Cube,
    pub score: i64,
}

impl ProblemUnderAssumption {
    pub fn new(assumptions: Cube, score: i64) -> Self {
        Self { assumptions, score }
    }
}

impl PartialEq for ProblemUnderAssumption {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for ProblemUnderAssumption {}

impl PartialOrd for ProblemUnderAssumption {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProblemUnderAssumption {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn max_heap_pops_highest_score_first() {
        let mut heap = BinaryHeap::new();
        heap.push(ProblemUnderAssumption::new(Vec::new(), 3));
        heap.push(ProblemUnderAssumption::new(Vec::new(), 10));
        heap.push(ProblemUnderAssumption::new(Vec::new(), 1));

        assert_eq!(heap.pop().unwrap().score, 10);
        assert_eq!(heap.pop().unwrap().score, 3);
        assert_eq!(heap.pop().unwrap().score, 1);
    }

    #[test]
    #[should_panic]
    fn well_formed_check_rejects_duplicate_variables() {
        let cube = vec![
            Assumption::eq_value("x", 0),
            Assumption::eq_value("x", 1),
        ];
        assert_cube_is_well_formed(&cube);
    }
}
