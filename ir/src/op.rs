//! Operation enum and operation keys.
//!
//! [`Op`] is the payload of a graph node. Operands are not stored here: every
//! node keeps its ordered inputs next to the op, so replacement can rewire
//! them without knowing the op's shape.
//!
//! [`OpKey`] is the kind tag used when deciding whether a pattern node and a
//! graph node are the same class of operation.

use graft_dtype::DType;

use crate::types::{BinaryOp, Literal, UnaryOp};

/// Operation carried by a graph node.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Graph input terminal. The index is the position in the graph's
    /// parameter list.
    Parameter(usize),
    /// Constant tensor.
    Const(Literal),
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Op {
    /// Number of inputs a node with this op must have.
    pub const fn arity(&self) -> usize {
        match self {
            Self::Parameter(_) | Self::Const(_) => 0,
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }

    /// Kind tag of this op; `dtype` is the node's element type.
    pub fn key(&self, dtype: DType) -> OpKey {
        match self {
            Self::Parameter(_) => OpKey::Parameter,
            Self::Const(_) => OpKey::Const(dtype),
            Self::Unary(op) => OpKey::Unary(*op),
            Self::Binary(op) => OpKey::Binary(*op),
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Const(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    /// Short display name used in logs and tree dumps.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Parameter(_) => "Parameter",
            Self::Const(_) => "Const",
            Self::Unary(op) => (*op).into(),
            Self::Binary(op) => (*op).into(),
        }
    }
}

/// Operation kind tag.
///
/// Two nodes are the same class of operation when their keys are equal. A
/// constant's key carries its element type, so an `i32` constant and an `f32`
/// constant are different classes while two `i32` constants with different
/// values are the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKey {
    Parameter,
    Const(DType),
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl OpKey {
    /// Operand order of this kind is not semantically significant.
    pub const fn is_commutative(&self) -> bool {
        match self {
            Self::Binary(op) => op.is_commutative(),
            _ => false,
        }
    }

    /// Kinds whose nodes are distinct entities even when structurally equal.
    ///
    /// A pattern that names a specific node of such a kind only matches that
    /// very node.
    pub const fn is_identity_sensitive(&self) -> bool {
        matches!(self, Self::Parameter)
    }
}

impl std::fmt::Display for OpKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parameter => f.write_str("Parameter"),
            Self::Const(dtype) => write!(f, "Const<{dtype}>"),
            Self::Unary(op) => write!(f, "{op:?}"),
            Self::Binary(op) => write!(f, "{op:?}"),
        }
    }
}
