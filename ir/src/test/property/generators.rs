//! Generators for property-based testing.
//!
//! Graphs are generated as recipes (a list of construction steps whose
//! operand indices refer to earlier steps) and then built, so shrinking
//! works on plain data.

use proptest::prelude::*;

use graft_dtype::DType;

use crate::graph::{Graph, NodeId};
use crate::test::helpers::scalar;
use crate::types::{BinaryOp, ConstValue, UnaryOp};

// ============================================================================
// Operation Generators
// ============================================================================

pub fn arb_unary_op() -> impl Strategy<Value = UnaryOp> {
    prop_oneof![Just(UnaryOp::Abs), Just(UnaryOp::Neg), Just(UnaryOp::Exp), Just(UnaryOp::Sqrt)]
}

pub fn arb_binary_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Sub),
        Just(BinaryOp::Mul),
        Just(BinaryOp::Div),
        Just(BinaryOp::Max),
        Just(BinaryOp::Min),
    ]
}

pub fn arb_commutative_op() -> impl Strategy<Value = BinaryOp> {
    arb_binary_op().prop_filter("commutative", BinaryOp::is_commutative)
}

// ============================================================================
// Graph Recipes
// ============================================================================

/// One construction step. Operand indices are reduced modulo the number of
/// nodes built so far.
#[derive(Debug, Clone)]
pub enum Step {
    Const(i64),
    Unary(UnaryOp, usize),
    Binary(BinaryOp, usize, usize),
}

pub fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => (-3i64..=3).prop_map(Step::Const),
        2 => (arb_unary_op(), any::<usize>()).prop_map(|(op, src)| Step::Unary(op, src)),
        4 => (arb_binary_op(), any::<usize>(), any::<usize>()).prop_map(|(op, l, r)| Step::Binary(op, l, r)),
    ]
}

/// Graph recipe: number of parameters (at least one) and construction steps.
pub fn arb_recipe() -> impl Strategy<Value = (usize, Vec<Step>)> {
    (1usize..=3, prop::collection::vec(arb_step(), 1..24))
}

/// Build a recipe into a scalar `Int32` graph. Every node without users
/// becomes an output. Returns the graph and all created nodes in order.
pub fn build_recipe(parameters: usize, steps: &[Step]) -> (Graph, Vec<NodeId>) {
    let mut graph = Graph::new();
    let mut nodes: Vec<NodeId> = (0..parameters).map(|_| graph.parameter(DType::Int32, scalar())).collect();

    for step in steps {
        let pick = |i: usize| nodes[i % nodes.len()];
        let id = match *step {
            Step::Const(v) => graph.splat(DType::Int32, scalar(), ConstValue::Int(v)),
            Step::Unary(op, src) => graph.unary(op, pick(src)),
            Step::Binary(op, l, r) => graph.binary(op, pick(l), pick(r)),
        }
        .expect("recipe nodes are well formed");
        nodes.push(id);
    }

    for &id in &nodes[parameters..] {
        if graph.users(id).is_ok_and(<[NodeId]>::is_empty) {
            graph.add_output(id).expect("live node");
        }
    }
    (graph, nodes)
}

/// Depth and constant placement of an identity chain.
pub fn arb_chain() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..16)
}
