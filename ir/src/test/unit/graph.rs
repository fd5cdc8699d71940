use graft_dtype::DType;
use smallvec::smallvec;
use test_case::test_case;

use crate::error::Error;
use crate::graph::{Graph, NodeId};
use crate::op::{Op, OpKey};
use crate::test::helpers::{Fixture, scalar};
use crate::types::{BinaryOp, ConstValue, Literal, UnaryOp};

#[test]
fn test_parameters_are_registered_in_order() {
    let f = Fixture::new();
    assert_eq!(f.graph.parameters(), &[f.a, f.b, f.c]);
    assert_eq!(f.graph.op(f.b).unwrap(), &Op::Parameter(1));
    assert!(f.graph.is_root(f.a));
    assert!(!f.graph.is_dangling(f.a));
}

#[test]
fn test_binary_links_users() {
    let mut f = Fixture::new();
    let sum = f.add(f.a, f.b);

    assert_eq!(f.graph.inputs(sum).unwrap(), &[f.a, f.b]);
    assert_eq!(f.graph.users(f.a).unwrap(), &[sum]);
    assert_eq!(f.graph.users(f.b).unwrap(), &[sum]);
    assert_eq!(f.graph.node(sum).unwrap().key(), OpKey::Binary(BinaryOp::Add));
    f.graph.check_invariants().unwrap();
}

#[test]
fn test_same_input_twice_is_one_user() {
    let mut f = Fixture::new();
    let square = f.mul(f.a, f.a);

    assert_eq!(f.graph.inputs(square).unwrap(), &[f.a, f.a]);
    assert_eq!(f.graph.users(f.a).unwrap(), &[square]);
    f.graph.check_invariants().unwrap();
}

#[test]
fn test_binary_rejects_dtype_mismatch() {
    let mut f = Fixture::new();
    let one = f.float(1.0);
    let err = f.graph.add(f.a, one).unwrap_err();
    assert_eq!(err, Error::DTypeMismatch { lhs: DType::Int32, rhs: DType::Float32 });
}

#[test]
fn test_binary_rejects_shape_mismatch() {
    let mut graph = Graph::new();
    let a = graph.parameter(DType::Int32, smallvec![2, 3]);
    let b = graph.parameter(DType::Int32, smallvec![3, 2]);
    assert!(matches!(graph.mul(a, b), Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_unknown_node_is_an_error() {
    let graph = Graph::new();
    let missing = NodeId(7);
    assert_eq!(graph.node(missing).unwrap_err(), Error::NodeNotFound { id: missing });
    assert!(!graph.contains(missing));
}

#[test]
fn test_unary_keeps_dtype_and_shape() {
    let mut graph = Graph::new();
    let x = graph.parameter(DType::Float32, smallvec![4]);
    let y = graph.unary(UnaryOp::Sqrt, x).unwrap();
    let node = graph.node(y).unwrap();
    assert_eq!(node.dtype(), DType::Float32);
    assert_eq!(node.shape().as_slice(), &[4]);
    assert_eq!(node.key(), OpKey::Unary(UnaryOp::Sqrt));
}

#[test_case(DType::Int32, smallvec![], vec![ConstValue::Int(1)] ; "scalar int")]
#[test_case(DType::Float32, smallvec![2], vec![ConstValue::Float(1.0), ConstValue::Float(2.0)] ; "float vector")]
#[test_case(DType::UInt8, smallvec![1], vec![ConstValue::Int(3)] ; "non-negative int as uint")]
#[test_case(DType::Bool, smallvec![], vec![ConstValue::Bool(true)] ; "bool")]
fn test_literal_accepts(dtype: DType, shape: crate::shape::Shape, values: Vec<ConstValue>) {
    let literal = Literal::new(dtype, shape, values).unwrap();
    let mut graph = Graph::new();
    let id = graph.constant(literal.clone());
    assert_eq!(graph.op(id).unwrap().as_literal(), Some(&literal));
    assert_eq!(graph.node(id).unwrap().key(), OpKey::Const(dtype));
}

#[test]
fn test_literal_rejects_wrong_count() {
    let err = Literal::new(DType::Int32, smallvec![2, 2], vec![ConstValue::Int(1)]).unwrap_err();
    assert!(matches!(err, Error::LiteralSizeMismatch { expected: 4, actual: 1, .. }));
}

#[test_case(DType::Int32, ConstValue::Float(1.0) ; "float into int")]
#[test_case(DType::UInt32, ConstValue::Int(-1) ; "negative into uint")]
#[test_case(DType::Float32, ConstValue::Bool(true) ; "bool into float")]
fn test_literal_rejects_wrong_family(dtype: DType, value: ConstValue) {
    let err = Literal::splat(dtype, scalar(), value).unwrap_err();
    assert!(matches!(err, Error::LiteralValueMismatch { .. }));
}

#[test]
fn test_literal_identity_helpers() {
    let ones = Literal::splat(DType::Int32, smallvec![3], ConstValue::Int(1)).unwrap();
    let zeros = Literal::splat(DType::Float32, smallvec![3], ConstValue::Float(0.0)).unwrap();
    let mixed = Literal::new(DType::Int32, smallvec![2], vec![ConstValue::Int(1), ConstValue::Int(0)]).unwrap();

    assert!(ones.all_ones() && !ones.all_zeros());
    assert!(zeros.all_zeros() && !zeros.all_ones());
    assert!(!mixed.all_ones() && !mixed.all_zeros());
}

#[test]
fn test_topological_order_puts_inputs_first() {
    let mut f = Fixture::new();
    let zero = f.int(0);
    let inner = f.add(f.a, zero);
    let outer = f.add(f.b, inner);
    f.output(outer);

    let order = f.graph.topological_order();
    let pos = |id| order.iter().position(|&n| n == id).unwrap();
    assert!(pos(f.a) < pos(inner));
    assert!(pos(zero) < pos(inner));
    assert!(pos(inner) < pos(outer));
    assert!(pos(f.b) < pos(outer));
    // Unused parameter is still a root.
    assert!(order.contains(&f.c));
    assert_eq!(order.len(), 6);
}

#[test]
fn test_depends_on() {
    let mut f = Fixture::new();
    let abs = f.abs(f.a);
    let sum = f.add(abs, f.b);

    assert!(f.graph.depends_on(sum, f.a).unwrap());
    assert!(f.graph.depends_on(sum, sum).unwrap());
    assert!(!f.graph.depends_on(abs, f.b).unwrap());
    assert!(!f.graph.depends_on(f.a, sum).unwrap());
}

#[test]
fn test_dangling_node() {
    let mut f = Fixture::new();
    let unused = f.abs(f.a);
    assert!(f.graph.is_dangling(unused));
    f.output(unused);
    assert!(!f.graph.is_dangling(unused));
}

#[test]
fn test_add_output_requires_live_node() {
    let mut graph = Graph::new();
    assert!(matches!(graph.add_output(NodeId(0)), Err(Error::NodeNotFound { .. })));
}

#[test_case(ConstValue::from(7i32), DType::Int32 ; "i32")]
#[test_case(ConstValue::from(7u8), DType::UInt8 ; "u8")]
#[test_case(ConstValue::from(0.5f64), DType::Float64 ; "f64")]
#[test_case(ConstValue::from(true), DType::Bool ; "bool")]
fn test_native_values_convert(value: ConstValue, dtype: DType) {
    assert!(value.fits(dtype));
}

#[test]
fn test_native_const_follows_rust_type() {
    let mut graph = Graph::new();
    let int = graph.native_const(3i64).unwrap();
    let float = graph.native_const(0.5f32).unwrap();

    assert_eq!(graph.node(int).unwrap().key(), OpKey::Const(DType::Int64));
    assert_eq!(graph.node(float).unwrap().key(), OpKey::Const(DType::Float32));
    assert!(graph.node(float).unwrap().shape().is_empty());
    assert_eq!(graph.op(int).unwrap().as_literal().unwrap().values(), &[ConstValue::Int(3)]);
}
