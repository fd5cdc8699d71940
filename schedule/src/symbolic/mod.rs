//! Algebraic identity simplification.
//!
//! Rules removing neutral elements of arithmetic:
//! - `x * 1 -> x`
//! - `x + 0 -> x`
//!
//! Both operand orders are covered because `Mul` and `Add` are commutative.

pub mod patterns;

use graft_dtype::DType;
use graft_ir::GraphRewrite;

pub use patterns::{add_zero, multiply_by_one};

/// Identity rules for `Int32` constants: multiply-by-one, then add-zero.
pub fn identity_rules() -> graft_ir::Result<GraphRewrite> {
    identity_rules_for([DType::Int32])
}

/// Identity rules for constants of each of `dtypes`, in order.
pub fn identity_rules_for(dtypes: impl IntoIterator<Item = DType>) -> graft_ir::Result<GraphRewrite> {
    let mut pass = GraphRewrite::new();
    for dtype in dtypes {
        pass.add_rule(multiply_by_one(dtype)?);
        pass.add_rule(add_zero(dtype)?);
    }
    Ok(pass)
}
