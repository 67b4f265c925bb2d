//! A thin pruning predicate over a worker solver (§4.5), used by the
//! lexicographic cube generators to drop provably-dead assumption
//! prefixes before they are ever dispatched.
//!
//! Grounded on `original_source/source/core/FinalConsistencyChecker.cpp`:
//! stateless beyond which solver it checks against, so it is kept
//! stateless here too — callers pass the solver in, rather than the
//! checker holding a reference to one (which would fight Rust's borrow
//! checker for no benefit, since every cube generator already owns the
//! solver it checks against).

use panoramyx_core::{Cube, UniverseSolver, UniverseSolverResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct FinalConsistencyChecker;

impl FinalConsistencyChecker {
    pub fn new() -> Self {
        Self
    }

    /// Partial cubes are never rejected — only a final, fully-propagated
    /// check is meaningful.
    pub fn check_partial(&self, _cube: &Cube) -> bool {
        true
    }

    /// Resets `solver` and solves it under `cube`; the cube is consistent
    /// unless the solver proves it unsatisfiable.
    pub fn check_final(&self, solver: &mut dyn UniverseSolver, cube: &Cube) -> bool {
        solver.reset();
        solver.solve(cube) != UniverseSolverResult::Unsatisfiable
    }
}
