//! A minimal in-memory [`UniverseSolver`] used by integration tests across
//! the workspace, standing in for a real black-box constraint/SAT/PB
//! solver. It performs no actual propagation or search — it only tracks a
//! fixed set of variables with small integer domains, detects the
//! conflicting-assumption case, and otherwise reports satisfiable.
//!
//! Grounded on the teacher's `PartialAssignment`/`DPLLSolver` split
//! (`dpll::partial_assignment`, `dpll::dpll`) in spirit only: this crate's
//! Non-goals exclude real constraint solving, so what survives is the
//! *shape* of a worker solver — reset/solve/variables_mapping/solution —
//! not its search algorithm.

use panoramyx_core::{
    BigInt, Cube, UniverseSolver, UniverseSolverResult, Variable, VariableDomain, VariableId,
};
use std::collections::BTreeMap;

pub struct ToySolver {
    variable_order: Vec<VariableId>,
    domain_size: BigInt,
    forced_result: Option<UniverseSolverResult>,
    unsat_predicate: Option<Box<dyn Fn(&Cube) -> bool + Send>>,
    mapping: BTreeMap<VariableId, Variable>,
    solution: Option<Vec<BigInt>>,
    interrupted: bool,
}

impl ToySolver {
    pub fn new<I, S>(variables: I, domain_size: BigInt) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<VariableId>,
    {
        let variable_order: Vec<VariableId> = variables.into_iter().map(Into::into).collect();
        let mapping = full_domain_mapping(&variable_order, domain_size);
        Self {
            variable_order,
            domain_size,
            forced_result: None,
            unsat_predicate: None,
            mapping,
            solution: None,
            interrupted: false,
        }
    }

    /// Always reports unsatisfiable, regardless of the cube it is asked to
    /// solve.
    pub fn unsatisfiable() -> Self {
        let mut solver = Self::new(Vec::<String>::new(), 2);
        solver.forced_result = Some(UniverseSolverResult::Unsatisfiable);
        solver
    }

    /// Always reports satisfiable, regardless of the cube it is asked to
    /// solve.
    pub fn trivially_satisfiable() -> Self {
        let mut solver = Self::new(Vec::<String>::new(), 2);
        solver.forced_result = Some(UniverseSolverResult::Satisfiable);
        solver
    }

    /// Adds a custom rejection rule on top of the built-in
    /// conflicting-assumption check.
    pub fn with_unsat_predicate(mut self, predicate: impl Fn(&Cube) -> bool + Send + 'static) -> Self {
        self.unsat_predicate = Some(Box::new(predicate));
        self
    }
}

fn full_domain_mapping(variables: &[VariableId], domain_size: BigInt) -> BTreeMap<VariableId, Variable> {
    variables
        .iter()
        .map(|id| {
            let domain = VariableDomain::new((0..domain_size).collect());
            (id.clone(), Variable::new(id.clone(), domain))
        })
        .collect()
}

impl UniverseSolver for ToySolver {
    fn reset(&mut self) {
        self.interrupted = false;
        self.mapping = full_domain_mapping(&self.variable_order, self.domain_size);
        self.solution = None;
    }

    fn solve(&mut self, cube: &Cube) -> UniverseSolverResult {
        if self.interrupted {
            return UniverseSolverResult::Unknown;
        }
        if let Some(result) = self.forced_result {
            return result;
        }

        let mut forced: BTreeMap<&str, BigInt> = BTreeMap::new();
        for assumption in cube {
            if !assumption.equal {
                continue;
            }
            if let Some(&previous) = forced.get(assumption.variable_id.as_str()) {
                if previous != assumption.value {
                    self.mapping.clear();
                    return UniverseSolverResult::Unsatisfiable;
                }
            } else {
                forced.insert(&assumption.variable_id, assumption.value);
            }
        }

        if let Some(predicate) = &self.unsat_predicate {
            if predicate(cube) {
                return UniverseSolverResult::Unsatisfiable;
            }
        }

        for (id, value) in &forced {
            if let Some(variable) = self.mapping.get_mut(*id) {
                *variable = Variable::new(id.to_string(), VariableDomain::new(vec![*value]));
            }
        }

        self.solution = Some(
            self.variable_order
                .iter()
                .map(|id| forced.get(id.as_str()).copied().unwrap_or(0))
                .collect(),
        );
        UniverseSolverResult::Satisfiable
    }

    fn interrupt(&mut self) {
        self.interrupted = true;
    }

    fn variables_mapping(&self) -> BTreeMap<VariableId, Variable> {
        self.mapping.clone()
    }

    fn solution(&self) -> Option<Vec<BigInt>> {
        self.solution.clone()
    }

    fn set_timeout_ms(&mut self, _timeout_ms: u64) {}

    fn set_verbosity(&mut self, _level: i32) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use panoramyx_core::Assumption;

    #[test]
    fn unsatisfiable_ignores_the_cube() {
        let mut solver = ToySolver::unsatisfiable();
        assert_eq!(
            solver.solve(&vec![Assumption::eq_value("x", 0)]),
            UniverseSolverResult::Unsatisfiable
        );
    }

    #[test]
    fn conflicting_assumptions_are_unsatisfiable() {
        let mut solver = ToySolver::new(vec!["x"], 2);
        let cube = vec![
            Assumption::eq_value("x", 0),
            Assumption::eq_value("x", 1),
        ];
        assert_eq!(solver.solve(&cube), UniverseSolverResult::Unsatisfiable);
    }

    #[test]
    fn assumed_variables_collapse_to_a_singleton_domain() {
        let mut solver = ToySolver::new(vec!["x", "y"], 3);
        solver.solve(&vec![Assumption::eq_value("x", 1)]);
        let mapping = solver.variables_mapping();
        assert_eq!(mapping["x"].domain().current_size(), 1);
        assert_eq!(mapping["y"].domain().current_size(), 3);
    }

    #[test]
    fn interrupt_forces_unknown_until_reset() {
        let mut solver = ToySolver::new(vec!["x"], 2);
        solver.interrupt();
        assert_eq!(solver.solve(&Cube::new()), UniverseSolverResult::Unknown);
        solver.reset();
        assert_eq!(solver.solve(&Cube::new()), UniverseSolverResult::Satisfiable);
    }
}
