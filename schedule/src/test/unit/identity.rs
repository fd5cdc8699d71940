use graft_dtype::DType;
use graft_ir::test::helpers::{Fixture, scalar};
use graft_ir::{BinaryOp, ConstValue, Graph, Literal, NodeId};
use smallvec::smallvec;
use test_case::test_case;

use crate::config::SchedulerConfig;
use crate::fixpoint::optimize;
use crate::symbolic::{add_zero, identity_rules, identity_rules_for, multiply_by_one};
use crate::test::helpers::*;

fn run(graph: &mut Graph) -> crate::fixpoint::FixpointReport {
    optimize(graph, &SchedulerConfig::default()).unwrap()
}

#[test]
fn test_add_zero_is_removed() {
    let (mut f, out) = add_zero_right();
    let report = run(&mut f.graph);

    assert_eq!(f.graph.inputs(out).unwrap(), &[f.b, f.a]);
    assert_eq!(report.pass_count(), 2);
    assert_eq!(report.total_rewrites(), 1);
    f.graph.check_invariants().unwrap();
}

#[test]
fn test_multiply_by_one_is_removed() {
    let (mut f, out) = mul_one_right();
    run(&mut f.graph);
    assert_eq!(f.graph.inputs(out).unwrap()[1], f.a);
}

#[test]
fn test_left_chain_collapses() {
    let (mut f, out) = mul_one_chain_left();
    let report = run(&mut f.graph);

    assert_eq!(f.graph.inputs(out).unwrap()[0], f.a);
    assert_eq!(report.passes[0].rewrites, 4);
    assert!(!report.passes[1].changed());
    f.graph.check_invariants().unwrap();
}

#[test]
fn test_mixed_identities_collapse() {
    let (mut f, out) = mixed_identities();
    let report = run(&mut f.graph);

    assert_eq!(f.graph.inputs(out).unwrap()[1], f.a);
    assert_eq!(report.total_rewrites(), 3);
    let first = &report.passes[0];
    assert_eq!(first.per_rule["add-zero<i32>"], 2);
    assert_eq!(first.per_rule["multiply-by-one<i32>"], 1);
}

#[test]
fn test_right_chain_collapses() {
    let (mut f, out) = mul_one_chain_right();
    run(&mut f.graph);

    assert_eq!(f.graph.inputs(out).unwrap()[1], f.a);
    // Only the parameters and the output survive.
    assert_eq!(f.graph.len(), 4);
}

#[test_case(2 ; "two")]
#[test_case(0 ; "zero")]
#[test_case(-1 ; "minus one")]
fn test_non_one_factor_is_kept(value: i32) {
    let mut f = Fixture::new();
    let factor = f.int(value);
    let product = f.mul(f.a, factor);
    let out = f.add(f.b, product);
    f.output(out);

    let report = run(&mut f.graph);
    assert_eq!(f.graph.inputs(out).unwrap(), &[f.b, product]);
    assert_eq!(report.total_rewrites(), 0);
    assert_eq!(report.passes[0].declined, 1);
}

#[test]
fn test_non_zero_addend_is_kept() {
    let mut f = Fixture::new();
    let one = f.int(1);
    let sum = f.add(f.a, one);
    f.output(sum);

    run(&mut f.graph);
    assert_eq!(f.graph.outputs(), &[sum]);
}

#[test]
fn test_output_root_is_replaced() {
    let mut f = Fixture::new();
    let one = f.int(1);
    let product = f.mul(one, f.a);
    f.output(product);

    run(&mut f.graph);
    assert_eq!(f.graph.outputs(), &[f.a]);
    assert!(!f.graph.contains(product));
}

#[test]
fn test_square_of_one_collapses() {
    let mut f = Fixture::new();
    let one = f.int(1);
    let square = f.mul(one, one);
    let out = f.add(f.a, square);
    f.output(out);

    run(&mut f.graph);
    assert_eq!(f.graph.inputs(out).unwrap(), &[f.a, one]);
}

#[test_case(BinaryOp::Mul, 1, 5 ; "one times five")]
#[test_case(BinaryOp::Add, 0, 7 ; "zero plus seven")]
fn test_identity_constant_before_other_constant(op: BinaryOp, identity: i32, value: i32) {
    let mut f = Fixture::new();
    let unit = f.int(identity);
    let kept = f.int(value);
    let inner = f.binary(op, unit, kept);
    let out = f.add(f.b, inner);
    f.output(out);

    let report = run(&mut f.graph);
    assert_eq!(f.graph.inputs(out).unwrap(), &[f.b, kept]);
    assert_eq!(report.total_rewrites(), 1);
    assert!(!f.graph.contains(unit));
    f.graph.check_invariants().unwrap();
}

#[test]
fn test_int_rules_ignore_float_constants() {
    let mut graph = Graph::new();
    let x = graph.parameter(DType::Float32, scalar());
    let one = graph.splat(DType::Float32, scalar(), ConstValue::Float(1.0)).unwrap();
    let product = graph.mul(x, one).unwrap();
    graph.add_output(product).unwrap();

    let report = run(&mut graph);
    assert_eq!(report.passes[0].matches, 0);
    assert_eq!(graph.outputs(), &[product]);
}

#[test_case(DType::Float32, ConstValue::Float(1.0), ConstValue::Float(0.0) ; "f32")]
#[test_case(DType::Int64, ConstValue::Int(1), ConstValue::Int(0) ; "i64")]
#[test_case(DType::UInt8, ConstValue::UInt(1), ConstValue::UInt(0) ; "u8")]
fn test_rules_for_other_dtypes(dtype: DType, one: ConstValue, zero: ConstValue) {
    let mut graph = Graph::new();
    let x = graph.parameter(dtype, smallvec![3]);
    let one = graph.splat(dtype, smallvec![3], one).unwrap();
    let zero = graph.splat(dtype, smallvec![3], zero).unwrap();
    let product = graph.mul(x, one).unwrap();
    let sum = graph.add(zero, product).unwrap();
    let out = graph.abs(sum).unwrap();
    graph.add_output(out).unwrap();

    let pass = identity_rules_for([dtype]).unwrap();
    let stats = pass.run(&mut graph).unwrap();
    assert_eq!(stats.rewrites, 2);
    assert_eq!(graph.inputs(out).unwrap(), &[x]);
}

#[test]
fn test_partial_ones_constant_is_kept() {
    let mut graph = Graph::new();
    let x = graph.parameter(DType::Int32, smallvec![2]);
    let literal = Literal::new(DType::Int32, smallvec![2], vec![ConstValue::Int(1), ConstValue::Int(2)]).unwrap();
    let mixed = graph.constant(literal);
    let product = graph.mul(x, mixed).unwrap();
    graph.add_output(product).unwrap();

    let report = run(&mut graph);
    assert_eq!(report.passes[0].declined, 1);
    assert_eq!(graph.outputs(), &[product]);
}

#[test]
fn test_rule_names_and_order() {
    let pass = identity_rules().unwrap();
    let names: Vec<&str> = pass.rules().iter().map(|r| r.name()).collect();
    assert_eq!(names, ["multiply-by-one<i32>", "add-zero<i32>"]);

    assert_eq!(multiply_by_one(DType::Float64).unwrap().name(), "multiply-by-one<f64>");
    assert_eq!(add_zero(DType::UInt8).unwrap().name(), "add-zero<u8>");
}

#[test]
fn test_pass_result_is_shared_identity() {
    let (mut f, out) = mul_one_right();
    run(&mut f.graph);
    let a: NodeId = f.a;
    // Rewired to the parameter itself, not a copy of it.
    assert!(f.graph.users(a).unwrap().contains(&out));
    assert_eq!(f.graph.op(a).unwrap(), &graft_ir::Op::Parameter(0));
}
