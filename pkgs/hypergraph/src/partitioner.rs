//! Cutset computation over the dual hypergraph (§4.4): "an external
//! partitioner, not specified here". This crate only needs something that
//! honors the contract well enough to drive the hypergraph-cutset cube
//! generator and its tests — not a real hypergraph-partitioning algorithm.

use crate::Hypergraph;
use panoramyx_core::VariableId;

/// Computes a cutset: a subset of variables whose fixing is expected to
/// split the remaining problem into more independent pieces.
pub trait Partitioner {
    fn partition(&self, hypergraph: &Hypergraph, variable_order: &[VariableId]) -> Vec<VariableId>;
}

/// Picks the `target_size` variables with the most incident constraints —
/// the hyperedges most likely to be load-bearing for the rest of the
/// instance. A real partitioner would minimize hyperedge cuts globally;
/// this is a greedy stand-in, not a faithful implementation of one.
pub struct GreedyDegreePartitioner {
    pub target_size: usize,
}

impl GreedyDegreePartitioner {
    pub fn new(target_size: usize) -> Self {
        Self { target_size }
    }
}

impl Partitioner for GreedyDegreePartitioner {
    fn partition(&self, hypergraph: &Hypergraph, variable_order: &[VariableId]) -> Vec<VariableId> {
        let mut by_degree: Vec<(usize, &VariableId)> = variable_order
            .iter()
            .enumerate()
            .map(|(index, id)| (hypergraph.hyperedge(index).len(), id))
            .collect();
        by_degree.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        by_degree
            .into_iter()
            .take(self.target_size.min(variable_order.len()))
            .map(|(_, id)| id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HypergraphBuilder;

    #[test]
    fn picks_the_highest_degree_variables_first() {
        let mut builder = HypergraphBuilder::new(5, 3);
        builder.with_hyperedge(&[1]); // "a": degree 1
        builder.with_hyperedge(&[1, 2, 3]); // "b": degree 3
        builder.with_hyperedge(&[1, 2]); // "c": degree 2
        let hypergraph = builder.build();

        let variables: Vec<VariableId> =
            ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let cutset = GreedyDegreePartitioner::new(2).partition(&hypergraph, &variables);
        assert_eq!(cutset, vec!["b".to_string(), "c".to_string()]);
    }
}
