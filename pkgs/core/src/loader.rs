//! The universe instance-loader contract (§6, "produced" side) and the
//! intension-constraint scope walk it needs.
//!
//! This module does not parse any instance format — that remains an
//! external collaborator's job (CNF/OPB/XCSP3 parsers invoke these
//! callbacks). The core only needs the *scope* of each constraint: the set
//! of variables it touches.

use crate::VariableId;
use std::collections::BTreeSet;

/// The domain of a newly declared variable.
#[derive(Debug, Clone)]
pub enum DomainSpec {
    Range { min: i64, max: i64 },
    Values(Vec<i64>),
}

/// Callbacks invoked by parser adapters while loading an instance. A
/// listener only has to implement the handful of methods it actually
/// cares about; the core's own listener (the hypergraph-decomposition
/// preprocessor) only needs the scope of each call.
pub trait UniverseInstanceLoader {
    fn new_variable(&mut self, id: VariableId, domain: DomainSpec);

    /// A SAT/pseudo-Boolean clause given as signed integer literals. Scope
    /// is `{ |l| : l in literals }` (the absolute value of each literal,
    /// stringified).
    fn add_clause(&mut self, literals: &[i64]);

    /// A pseudo-Boolean constraint over literals with integer
    /// coefficients and a right-hand side; scope is the literals' variables.
    fn add_pseudo_boolean(&mut self, literals: &[i64], coefficients: &[i64], degree: i64);

    /// A constraint given directly as a variable scope (the common case
    /// for CSP "primitive"/table/global constraints): scope is the
    /// concatenation of the given variable-name vectors.
    fn add_primitive(&mut self, scopes: &[Vec<VariableId>]);

    /// An intension constraint given as an expression tree; scope is the
    /// set of free (leaf) variables.
    fn add_intension(&mut self, expression: &IntensionNode);
}

/// A tagged variant standing in for the original's eight-class intension
/// expression-tree hierarchy (`spec.md` §9's redesign note). Only the
/// `Variable` leaf contributes to scope; every other node is walked purely
/// to reach its children.
#[derive(Debug, Clone)]
pub enum IntensionNode {
    Constant(i64),
    Variable(VariableId),
    Unary(Box<IntensionNode>),
    Binary(Box<IntensionNode>, Box<IntensionNode>),
    Nary(Vec<IntensionNode>),
    IfThenElse(Box<IntensionNode>, Box<IntensionNode>, Box<IntensionNode>),
    Set(Vec<IntensionNode>),
    Range(Box<IntensionNode>, Box<IntensionNode>),
}

/// Collects the free variables of an intension expression tree into `out`.
pub fn scope(node: &IntensionNode, out: &mut BTreeSet<VariableId>) {
    match node {
        IntensionNode::Constant(_) => {}
        IntensionNode::Variable(id) => {
            out.insert(id.clone());
        }
        IntensionNode::Unary(a) => scope(a, out),
        IntensionNode::Binary(a, b) => {
            scope(a, out);
            scope(b, out);
        }
        IntensionNode::Nary(children) => {
            for child in children {
                scope(child, out);
            }
        }
        IntensionNode::IfThenElse(cond, then_branch, else_branch) => {
            scope(cond, out);
            scope(then_branch, out);
            scope(else_branch, out);
        }
        IntensionNode::Set(children) => {
            for child in children {
                scope(child, out);
            }
        }
        IntensionNode::Range(lo, hi) => {
            scope(lo, out);
            scope(hi, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_collects_only_variable_leaves() {
        // (x + 3) <= (y if z else 4)
        let expr = IntensionNode::Binary(
            Box::new(IntensionNode::Binary(
                Box::new(IntensionNode::Variable("x".into())),
                Box::new(IntensionNode::Constant(3)),
            )),
            Box::new(IntensionNode::IfThenElse(
                Box::new(IntensionNode::Variable("z".into())),
                Box::new(IntensionNode::Variable("y".into())),
                Box::new(IntensionNode::Constant(4)),
            )),
        );

        let mut found = BTreeSet::new();
        scope(&expr, &mut found);

        let expected: BTreeSet<VariableId> =
            ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn scope_of_pure_constant_is_empty() {
        let mut found = BTreeSet::new();
        scope(&IntensionNode::Constant(42), &mut found);
        assert!(found.is_empty());
    }
}
