//! The four cube generators (§4.6).
//!
//! The original streams cubes lazily via a nightly coroutine
//! (`CubeGenerator` in the teacher's `pkgs/parallel/src/pool/cube_and_conquer.rs`)
//! or, for the priority-queue-backed generators, via a thin `Stream`
//! adapter over an already-fully-built queue (`StreamPriorityQueueAdapter.cpp`
//! in `original_source/`). Every generator here follows the latter shape:
//! the bounded search runs once, eagerly, at construction time — bounded
//! by `nb_cubes_max` either way — and is then replayed through a plain
//! `Iterator`. This avoids the unstable `std::iter::from_coroutine`
//! feature the teacher relies on.
//!
//! Every generator ends its stream with one empty [`Cube`] before
//! returning `None`, matching `spec.md` §4.6's "an empty cube signals
//! end-of-stream" invariant: consumers should `break` on an empty cube
//! rather than rely solely on iterator exhaustion.

pub mod cartesian_product;
pub mod hypergraph_cutset;
pub mod lexicographic;
pub mod lexicographic_interval;

pub use cartesian_product::CartesianProductCubeGenerator;
pub use hypergraph_cutset::HypergraphCutsetCubeGenerator;
pub use lexicographic::LexicographicCubeGenerator;
pub use lexicographic_interval::LexicographicIntervalCubeGenerator;

use panoramyx_core::Cube;

fn materialize(mut cubes: Vec<Cube>) -> std::vec::IntoIter<Cube> {
    cubes.push(Cube::new());
    cubes.into_iter()
}
