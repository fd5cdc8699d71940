//! Identity rule builders.

use graft_dtype::DType;
use graft_ir::error::ArityMismatchSnafu;
use graft_ir::{BinaryOp, Graph, Label, Literal, Match, NodeId, Pattern, RewriteOutcome, RewriteRule};

/// `x * c -> x` where `c` is a constant of element type `dtype` whose every
/// element is one.
pub fn multiply_by_one(dtype: DType) -> graft_ir::Result<RewriteRule> {
    identity_rule(format!("multiply-by-one<{dtype}>"), BinaryOp::Mul, dtype, Literal::all_ones)
}

/// `x + c -> x` where `c` is a constant of element type `dtype` whose every
/// element is zero.
pub fn add_zero(dtype: DType) -> graft_ir::Result<RewriteRule> {
    identity_rule(format!("add-zero<{dtype}>"), BinaryOp::Add, dtype, Literal::all_zeros)
}

fn identity_rule(
    name: String,
    op: BinaryOp,
    dtype: DType,
    is_identity: fn(&Literal) -> bool,
) -> graft_ir::Result<RewriteRule> {
    let x = Label::named("x");
    let pattern = Pattern::binary(op, x.clone(), Pattern::constant(dtype));
    RewriteRule::new(name, pattern, move |m: &Match<'_>, graph: &mut Graph| {
        let root = m.root();
        let bound = m.bound(&x)?;
        let inputs = graph.inputs(root)?;
        let &[lhs, rhs] = inputs else {
            let actual = inputs.len();
            return ArityMismatchSnafu { op: <&'static str>::from(op), id: root, expected: 2usize, actual }.fail();
        };
        // The matcher binds `x` to the first operand that fits, which for two
        // constants may be the identity itself; try the swapped orientation too.
        let orientations = if lhs == bound { [(lhs, rhs), (rhs, lhs)] } else { [(rhs, lhs), (lhs, rhs)] };
        let mut kept = None;
        for (operand, constant) in orientations {
            if is_identity_operand(graph, operand, constant, is_identity)? {
                kept = Some(operand);
                break;
            }
        }
        let Some(kept) = kept else {
            tracing::trace!(%root, "identity rule declined");
            return Ok(RewriteOutcome::Declined);
        };

        // Outputs are held by the graph, not by users.
        if graph.is_output(root) {
            graph.replace_output(root, kept)?;
        } else {
            graph.replace_node(root, kept)?;
        }
        Ok(RewriteOutcome::Rewritten)
    })
}

/// Whether `constant` is an identity literal with the element type and shape
/// of `operand`.
fn is_identity_operand(
    graph: &Graph,
    operand: NodeId,
    constant: NodeId,
    is_identity: fn(&Literal) -> bool,
) -> graft_ir::Result<bool> {
    let Some(literal) = graph.op(constant)?.as_literal() else {
        return Ok(false);
    };
    let operand = graph.node(operand)?;
    Ok(literal.dtype() == operand.dtype() && literal.shape() == operand.shape() && is_identity(literal))
}
