use crate::{assumption::Cube, BigInt, VariableId};
use std::collections::BTreeMap;

/// The verdict of a solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniverseSolverResult {
    Satisfiable,
    Unsatisfiable,
    /// Either interrupted, timed out, or otherwise inconclusive. Not an
    /// error: a worker reporting `Unknown` after an interrupt is a normal
    /// event, per §7 item 6 of the specification.
    Unknown,
}

/// A read-only snapshot of a variable's current domain, as exposed by a
/// worker after `reset(); solve(cube)`. Never mutated by the coordination
/// layer — only ever read to drive cube generation and score computation.
#[derive(Debug, Clone)]
pub struct VariableDomain {
    values: Vec<BigInt>,
}

impl VariableDomain {
    pub fn new(values: Vec<BigInt>) -> Self {
        debug_assert!(!values.is_empty(), "a domain must contain at least one value");
        Self { values }
    }

    pub fn current_size(&self) -> usize {
        self.values.len()
    }

    pub fn current_values(&self) -> &[BigInt] {
        &self.values
    }
}

/// A variable as exposed by a worker's variable mapping.
#[derive(Debug, Clone)]
pub struct Variable {
    name: VariableId,
    domain: VariableDomain,
}

impl Variable {
    pub fn new(name: impl Into<VariableId>, domain: VariableDomain) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &VariableDomain {
        &self.domain
    }
}

/// The thin black-box contract every worker solver must implement. The
/// coordination layer never reasons about constraint semantics: it only
/// loads an instance, pushes assumptions, asks for a verdict, and reads
/// back domain snapshots and solutions.
///
/// This is deliberately narrower than the ~200-method hierarchy the
/// original system exposes (`spec.md` §9): only the operations the core
/// coordination layer actually calls are part of the trait.
pub trait UniverseSolver: Send {
    /// Discards the current assignment, returning the solver to its state
    /// right after `load_instance`.
    fn reset(&mut self);

    /// Solves the loaded instance under the given assumptions.
    fn solve(&mut self, cube: &Cube) -> UniverseSolverResult;

    /// Solves the loaded instance with no assumptions.
    fn solve_unassumed(&mut self) -> UniverseSolverResult {
        self.solve(&Cube::new())
    }

    /// Cooperative, idempotent cancellation of the current `solve` call.
    /// Implementations must not panic when called with no solve in
    /// progress, and must eventually make `solve` return `Unknown`.
    fn interrupt(&mut self);

    /// The current variable mapping, including each variable's *current*
    /// domain (post unit-propagation / filtering from the last solve).
    fn variables_mapping(&self) -> BTreeMap<VariableId, Variable>;

    /// The full solution found by the last successful `solve`, if any.
    fn solution(&self) -> Option<Vec<BigInt>>;

    /// Sets a timeout for subsequent `solve` calls, in milliseconds.
    fn set_timeout_ms(&mut self, timeout_ms: u64);

    /// Sets the solver's verbosity level. No semantics are mandated beyond
    /// "higher is noisier"; most black-box solvers will map this onto
    /// their own logging configuration.
    fn set_verbosity(&mut self, level: i32);
}
