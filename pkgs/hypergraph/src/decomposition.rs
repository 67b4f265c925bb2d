//! The hypergraph-decomposition preprocessor (§4.4): a stand-in "solver"
//! that never solves. It rides the normal instance-loading path purely to
//! record, for every constraint, which variables are in its scope, then
//! exposes the dual hypergraph built from that incidence.

use crate::HypergraphBuilder;
use crate::Hypergraph;
use panoramyx_core::loader::{scope, DomainSpec, IntensionNode, UniverseInstanceLoader};
use panoramyx_core::{Cube, UniverseSolver, UniverseSolverResult, Variable, VariableId};
use std::collections::{BTreeMap, BTreeSet};

/// Observes an instance being loaded and builds the dual hypergraph: one
/// vertex per constraint, one hyperedge per variable, whose vertices are
/// the constraints incident to that variable.
#[derive(Debug, Default)]
pub struct DecompositionPreprocessor {
    next_constraint_id: usize,
    variable_order: Vec<VariableId>,
    incidence: BTreeMap<VariableId, Vec<usize>>,
    cutset: Vec<VariableId>,
}

impl DecompositionPreprocessor {
    pub fn new() -> Self {
        Self {
            next_constraint_id: 1,
            ..Default::default()
        }
    }

    pub fn num_constraints(&self) -> usize {
        self.next_constraint_id - 1
    }

    pub fn variables(&self) -> &[VariableId] {
        &self.variable_order
    }

    /// Builds the dual hypergraph from everything observed so far.
    pub fn hypergraph(&self) -> Hypergraph {
        let mut builder =
            HypergraphBuilder::new(self.num_constraints(), self.variable_order.len());
        for variable in &self.variable_order {
            let constraints = self
                .incidence
                .get(variable)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            builder.with_hyperedge(constraints);
        }
        builder.build()
    }

    /// Set by an external partitioner after it has computed a cutset over
    /// [`hypergraph`](Self::hypergraph). Nothing in this crate computes a
    /// real cutset: see [`crate::Partitioner`].
    pub fn set_cutset(&mut self, cutset: Vec<VariableId>) {
        self.cutset = cutset;
    }

    pub fn cutset(&self) -> &[VariableId] {
        &self.cutset
    }

    fn record_scope(&mut self, scope: impl IntoIterator<Item = VariableId>) {
        let constraint_id = self.next_constraint_id;
        self.next_constraint_id += 1;
        for variable in scope {
            self.incidence.entry(variable).or_default().push(constraint_id);
        }
    }
}

impl UniverseInstanceLoader for DecompositionPreprocessor {
    fn new_variable(&mut self, id: VariableId, _domain: DomainSpec) {
        self.variable_order.push(id);
    }

    fn add_clause(&mut self, literals: &[i64]) {
        self.record_scope(literals.iter().map(|l| l.unsigned_abs().to_string()));
    }

    fn add_pseudo_boolean(&mut self, literals: &[i64], _coefficients: &[i64], _degree: i64) {
        self.record_scope(literals.iter().map(|l| l.unsigned_abs().to_string()));
    }

    fn add_primitive(&mut self, scopes: &[Vec<VariableId>]) {
        self.record_scope(scopes.iter().flatten().cloned());
    }

    fn add_intension(&mut self, expression: &IntensionNode) {
        let mut free_variables = BTreeSet::new();
        scope(expression, &mut free_variables);
        self.record_scope(free_variables);
    }
}

/// Every operation outside the loading path reports "unsupported" by
/// returning the most conservative answer the trait allows — this
/// preprocessor never actually solves anything (`spec.md` §4.4).
impl UniverseSolver for DecompositionPreprocessor {
    fn reset(&mut self) {}

    fn solve(&mut self, _cube: &Cube) -> UniverseSolverResult {
        UniverseSolverResult::Unknown
    }

    fn interrupt(&mut self) {}

    fn variables_mapping(&self) -> BTreeMap<VariableId, Variable> {
        BTreeMap::new()
    }

    fn solution(&self) -> Option<Vec<panoramyx_core::BigInt>> {
        None
    }

    fn set_timeout_ms(&mut self, _timeout_ms: u64) {}

    fn set_verbosity(&mut self, _level: i32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_variable_gets_one_hyperedge_listing_its_incident_constraints() {
        let mut pre = DecompositionPreprocessor::new();
        pre.new_variable("x".into(), DomainSpec::Range { min: 0, max: 1 });
        pre.new_variable("y".into(), DomainSpec::Range { min: 0, max: 1 });
        pre.new_variable("z".into(), DomainSpec::Range { min: 0, max: 1 });

        pre.add_clause(&[1, -2]); // constraint 1: x, y
        pre.add_primitive(&[vec!["y".to_string(), "z".to_string()]]); // constraint 2: y, z

        assert_eq!(pre.num_constraints(), 2);

        let hypergraph = pre.hypergraph();
        assert_eq!(hypergraph.num_hyperedges(), 3);
        assert_eq!(hypergraph.hyperedge(0).vertices(), &[1]); // x
        assert_eq!(hypergraph.hyperedge(1).vertices(), &[1, 2]); // y
        assert_eq!(hypergraph.hyperedge(2).vertices(), &[2]); // z
    }

    #[test]
    fn intension_constraints_only_count_free_variables() {
        let mut pre = DecompositionPreprocessor::new();
        pre.new_variable("a".into(), DomainSpec::Range { min: 0, max: 1 });
        pre.add_intension(&IntensionNode::Binary(
            Box::new(IntensionNode::Variable("a".into())),
            Box::new(IntensionNode::Constant(3)),
        ));
        assert_eq!(pre.num_constraints(), 1);
        assert_eq!(pre.hypergraph().hyperedge(0).vertices(), &[1]);
    }
}
