//! Dual-hypergraph construction, the decomposition preprocessor that feeds
//! it, a final-consistency pruning predicate, and the four cube
//! generators built on top of them (§4.3–§4.6).

mod builder;
pub mod consistency;
pub mod cubes;
mod decomposition;
mod partitioner;

pub use builder::{Hyperedge, Hypergraph, HypergraphBuilder};
pub use consistency::FinalConsistencyChecker;
pub use decomposition::DecompositionPreprocessor;
pub use partitioner::{GreedyDegreePartitioner, Partitioner};
