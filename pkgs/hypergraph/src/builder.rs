//! Unweighted hypergraph in compressed-sparse-row form.
//!
//! Grounded on `original_source/source/decomposition/HypergraphBuilder.cpp`
//! and `UnweightedHypergraph.cpp`: the public API is 1-indexed, internal
//! storage is 0-indexed, and edges are appended in order into a row-pointer
//! array plus a single growable vertex buffer — here a plain `Vec`, per
//! `spec.md` §9's note to replace the hand-rolled growable array with a
//! standard dynamic sequence while keeping the CSR shape.

/// Builds a [`Hypergraph`] one hyperedge at a time, in order.
pub struct HypergraphBuilder {
    num_vertices: usize,
    num_hyperedges: usize,
    vertex_weights: Option<Vec<i32>>,
    hyperedge_weights: Option<Vec<i32>>,
    hyperedge_indices: Vec<i64>,
    hyperedge_vertices: Vec<u32>,
}

impl HypergraphBuilder {
    pub fn new(num_vertices: usize, num_hyperedges: usize) -> Self {
        Self {
            num_vertices,
            num_hyperedges,
            vertex_weights: None,
            hyperedge_weights: None,
            hyperedge_indices: Vec::with_capacity(num_hyperedges + 1),
            hyperedge_vertices: Vec::new(),
        }
    }

    /// `vertex` is 1-indexed.
    pub fn with_vertex_weight(&mut self, vertex: usize, weight: i32) -> &mut Self {
        let num_vertices = self.num_vertices;
        let weights = self
            .vertex_weights
            .get_or_insert_with(|| vec![0; num_vertices]);
        weights[vertex - 1] = weight;
        self
    }

    pub fn with_hyperedge_weight(&mut self, hyperedge: usize, weight: i32) -> &mut Self {
        let num_hyperedges = self.num_hyperedges;
        let weights = self
            .hyperedge_weights
            .get_or_insert_with(|| vec![0; num_hyperedges]);
        weights[hyperedge - 1] = weight;
        self
    }

    /// Appends a hyperedge given its 1-indexed vertices, in the order
    /// hyperedges must be built.
    pub fn with_hyperedge(&mut self, vertices: &[usize]) -> &mut Self {
        self.hyperedge_indices.push(self.hyperedge_vertices.len() as i64);
        self.hyperedge_vertices
            .extend(vertices.iter().map(|&v| (v - 1) as u32));
        self
    }

    pub fn build(mut self) -> Hypergraph {
        self.hyperedge_indices.push(self.hyperedge_vertices.len() as i64);
        Hypergraph {
            num_vertices: self.num_vertices,
            num_hyperedges: self.num_hyperedges,
            vertex_weights: self.vertex_weights,
            hyperedge_weights: self.hyperedge_weights,
            hyperedge_indices: self.hyperedge_indices,
            hyperedge_vertices: self.hyperedge_vertices,
        }
    }
}

/// A single hyperedge, returned with 1-indexed vertices (see §6 rationale:
/// the public surface matches the 1-indexed vocabulary of the instance
/// formats this system loads).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hyperedge {
    vertices: Vec<usize>,
}

impl Hyperedge {
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// An unweighted hypergraph, stored as CSR row pointers over a flat vertex
/// buffer. `num_hyperedges()` is the number of hyperedges — unlike the
/// source this is grounded on, which returns the vertex count instead
/// (`spec.md` §9(a)).
#[derive(Debug, Clone)]
pub struct Hypergraph {
    num_vertices: usize,
    num_hyperedges: usize,
    vertex_weights: Option<Vec<i32>>,
    hyperedge_weights: Option<Vec<i32>>,
    hyperedge_indices: Vec<i64>,
    hyperedge_vertices: Vec<u32>,
}

impl Hypergraph {
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_hyperedges(&self) -> usize {
        self.num_hyperedges
    }

    pub fn vertex_weight(&self, vertex: usize) -> Option<i32> {
        self.vertex_weights.as_ref().map(|w| w[vertex - 1])
    }

    pub fn hyperedge_weight(&self, hyperedge: usize) -> Option<i32> {
        self.hyperedge_weights.as_ref().map(|w| w[hyperedge - 1])
    }

    /// Returns a fresh, owning copy of hyperedge `index` (0-indexed among
    /// hyperedges), with 1-indexed vertices.
    pub fn hyperedge(&self, index: usize) -> Hyperedge {
        let begin = self.hyperedge_indices[index] as usize;
        let end = self.hyperedge_indices[index + 1] as usize;
        let vertices = self.hyperedge_vertices[begin..end]
            .iter()
            .map(|&v| v as usize + 1)
            .collect();
        Hyperedge { vertices }
    }

    /// Raw CSR row pointers, for partitioners that want direct access.
    pub fn hyperedge_indices(&self) -> &[i64] {
        &self.hyperedge_indices
    }

    /// Raw, 0-indexed vertex buffer, for partitioners that want direct
    /// access.
    pub fn hyperedge_vertices(&self) -> &[u32] {
        &self.hyperedge_vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyperedges_round_trip_with_one_indexed_vertices() {
        let mut builder = HypergraphBuilder::new(4, 2);
        builder.with_hyperedge(&[1, 2]);
        builder.with_hyperedge(&[2, 3, 4]);
        let hypergraph = builder.build();

        assert_eq!(hypergraph.num_vertices(), 4);
        assert_eq!(hypergraph.num_hyperedges(), 2);
        assert_eq!(hypergraph.hyperedge(0).vertices(), &[1, 2]);
        assert_eq!(hypergraph.hyperedge(1).vertices(), &[2, 3, 4]);
    }

    #[test]
    fn num_hyperedges_does_not_replicate_the_vertex_count_bug() {
        let builder = HypergraphBuilder::new(10, 3);
        let hypergraph = builder.build();
        assert_eq!(hypergraph.num_hyperedges(), 3);
        assert_ne!(hypergraph.num_hyperedges(), hypergraph.num_vertices());
    }

    #[test]
    fn vertex_weights_default_to_none() {
        let mut builder = HypergraphBuilder::new(2, 1);
        builder.with_hyperedge(&[1, 2]);
        let hypergraph = builder.build();
        assert_eq!(hypergraph.vertex_weight(1), None);
    }

    #[test]
    fn vertex_weight_is_set_at_the_given_one_indexed_position() {
        let mut builder = HypergraphBuilder::new(3, 1);
        builder.with_vertex_weight(2, 7);
        builder.with_hyperedge(&[1, 2, 3]);
        let hypergraph = builder.build();
        assert_eq!(hypergraph.vertex_weight(1), Some(0));
        assert_eq!(hypergraph.vertex_weight(2), Some(7));
    }
}
