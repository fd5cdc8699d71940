//! Node constructors.
//!
//! Graph construction belongs to the caller; these helpers validate operand
//! arity, dtype and shape so that every node the engine sees is well formed.

use graft_dtype::DType;
use graft_dtype::ext::HasDType;
use smallvec::{SmallVec, smallvec};
use snafu::ensure;

use super::{Graph, NodeId};
use crate::error::{DTypeMismatchSnafu, ShapeMismatchSnafu};
use crate::op::Op;
use crate::shape::Shape;
use crate::types::{BinaryOp, ConstValue, Literal, UnaryOp};
use crate::Result;

impl Graph {
    /// Create a graph input of the given element type and shape.
    pub fn parameter(&mut self, dtype: DType, shape: Shape) -> NodeId {
        let index = self.parameters.len();
        let id = self.push_node(Op::Parameter(index), dtype, shape, smallvec![]);
        self.parameters.push(id);
        id
    }

    /// Create a constant tensor node.
    pub fn constant(&mut self, literal: Literal) -> NodeId {
        let dtype = literal.dtype();
        let shape = literal.shape().clone();
        self.push_node(Op::Const(literal), dtype, shape, smallvec![])
    }

    /// Create a constant with every element equal to `value`.
    pub fn splat(&mut self, dtype: DType, shape: Shape, value: ConstValue) -> Result<NodeId> {
        Ok(self.constant(Literal::splat(dtype, shape, value)?))
    }

    /// Scalar constant from a native Rust value; the element type follows
    /// the value's type.
    pub fn native_const<T: HasDType + Into<ConstValue>>(&mut self, value: T) -> Result<NodeId> {
        self.splat(value.dtype(), SmallVec::new(), value.into())
    }

    pub fn unary(&mut self, op: UnaryOp, src: NodeId) -> Result<NodeId> {
        let node = self.node(src)?;
        let (dtype, shape) = (node.dtype, node.shape.clone());
        Ok(self.push_node(Op::Unary(op), dtype, shape, smallvec![src]))
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        let (l, r) = (self.node(lhs)?, self.node(rhs)?);
        ensure!(l.dtype == r.dtype, DTypeMismatchSnafu { lhs: l.dtype, rhs: r.dtype });
        ensure!(l.shape == r.shape, ShapeMismatchSnafu { lhs: l.shape.clone(), rhs: r.shape.clone() });
        let (dtype, shape) = (l.dtype, l.shape.clone());
        Ok(self.push_node(Op::Binary(op), dtype, shape, smallvec![lhs, rhs]))
    }

    pub fn add(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.binary(BinaryOp::Add, lhs, rhs)
    }

    pub fn sub(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.binary(BinaryOp::Sub, lhs, rhs)
    }

    pub fn mul(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.binary(BinaryOp::Mul, lhs, rhs)
    }

    pub fn div(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.binary(BinaryOp::Div, lhs, rhs)
    }

    pub fn max(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.binary(BinaryOp::Max, lhs, rhs)
    }

    pub fn min(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId> {
        self.binary(BinaryOp::Min, lhs, rhs)
    }

    pub fn abs(&mut self, src: NodeId) -> Result<NodeId> {
        self.unary(UnaryOp::Abs, src)
    }

    pub fn neg(&mut self, src: NodeId) -> Result<NodeId> {
        self.unary(UnaryOp::Neg, src)
    }
}
