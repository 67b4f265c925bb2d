//! Shared data model and contracts for the panoramyx parallel
//! constraint-problem orchestrator.
//!
//! This crate has no notion of constraint propagation or search: it only
//! defines the vocabulary (assumptions, cubes, the universe-solver contract)
//! that the transport, hypergraph, optimization and coordinator crates
//! build on.

pub mod assumption;
pub mod error;
pub mod loader;
pub mod solver;

pub use assumption::{Assumption, Cube, ProblemUnderAssumption};
pub use error::PanoramyxError;
pub use solver::{UniverseSolver, UniverseSolverResult, Variable, VariableDomain};

/// Arbitrary-precision values in the original specification are represented
/// as `i64` here: CSP/SAT/pseudo-Boolean domain values fit comfortably in
/// 64 bits, and nothing else in this workspace needs a bignum crate. See
/// DESIGN.md for the full rationale.
pub type BigInt = i64;

/// Identifier for a variable, as exposed by the universe-solver contract.
pub type VariableId = String;
