//! Type definitions for graph operations.
//!
//! This module contains the operation enums and the constant payload carried
//! by `Const` nodes.

use graft_dtype::DType;
use snafu::ensure;

use crate::error::{LiteralSizeMismatchSnafu, LiteralValueMismatchSnafu};
use crate::shape::{Shape, num_elements};
use crate::Result;

/// Scalar constant value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl ConstValue {
    pub const fn zero(dtype: DType) -> Self {
        use DType::*;
        match dtype {
            Bool => Self::Bool(false),
            Int8 | Int16 | Int32 | Int64 => Self::Int(0),
            UInt8 | UInt16 | UInt32 | UInt64 => Self::UInt(0),
            Float16 | BFloat16 | Float32 | Float64 => Self::Float(0.0),
        }
    }

    pub const fn one(dtype: DType) -> Self {
        use DType::*;
        match dtype {
            Bool => Self::Bool(true),
            Int8 | Int16 | Int32 | Int64 => Self::Int(1),
            UInt8 | UInt16 | UInt32 | UInt64 => Self::UInt(1),
            Float16 | BFloat16 | Float32 | Float64 => Self::Float(1.0),
        }
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Self::Int(v) => v == 0,
            Self::UInt(v) => v == 0,
            Self::Float(v) => v == 0.0,
            Self::Bool(v) => !v,
        }
    }

    pub fn is_one(&self) -> bool {
        match *self {
            Self::Int(v) => v == 1,
            Self::UInt(v) => v == 1,
            Self::Float(v) => v == 1.0,
            Self::Bool(v) => v,
        }
    }

    /// Whether this value can be stored in an element of `dtype`.
    ///
    /// Only the value family is checked (int / uint / float / bool), with
    /// non-negative `Int` values also accepted for unsigned element types.
    pub fn fits(&self, dtype: DType) -> bool {
        match *self {
            Self::Int(v) => dtype.is_signed() || (dtype.is_unsigned() && v >= 0),
            Self::UInt(_) => dtype.is_int(),
            Self::Float(_) => dtype.is_float(),
            Self::Bool(_) => dtype.is_bool(),
        }
    }
}

impl std::fmt::Display for ConstValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}u"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_native {
    ($($variant:ident($target:ty) <= $($ty:ty),+);* $(;)?) => {
        $($(
            impl From<$ty> for ConstValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+)*
    };
}

impl_from_native! {
    Int(i64) <= i8, i16, i32, i64;
    UInt(u64) <= u8, u16, u32, u64;
    Float(f64) <= f32, f64;
    Bool(bool) <= bool;
}

/// Tensor payload of a `Const` node: element type, shape and row-major values.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    dtype: DType,
    shape: Shape,
    values: Vec<ConstValue>,
}

impl Literal {
    pub fn new(dtype: DType, shape: Shape, values: Vec<ConstValue>) -> Result<Self> {
        let expected = num_elements(&shape);
        ensure!(
            values.len() == expected,
            LiteralSizeMismatchSnafu { shape: shape.clone(), expected, actual: values.len() }
        );
        if let Some(bad) = values.iter().find(|v| !v.fits(dtype)) {
            return LiteralValueMismatchSnafu { value: bad.to_string(), dtype }.fail();
        }
        Ok(Self { dtype, shape, values })
    }

    /// Literal of the given shape with every element equal to `value`.
    pub fn splat(dtype: DType, shape: Shape, value: ConstValue) -> Result<Self> {
        let values = vec![value; num_elements(&shape)];
        Self::new(dtype, shape, values)
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn values(&self) -> &[ConstValue] {
        &self.values
    }

    pub fn all_zeros(&self) -> bool {
        self.values.iter().all(ConstValue::is_zero)
    }

    pub fn all_ones(&self) -> bool {
        self.values.iter().all(ConstValue::is_one)
    }
}

/// Unary operation types.
///
/// All unary operations preserve the input dtype and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter)]
pub enum UnaryOp {
    /// Absolute value: |x|
    Abs,
    /// Negation: -x
    Neg,
    /// Natural exponential: e^x
    Exp,
    /// Square root: √x
    Sqrt,
}

/// Binary operation types.
///
/// Both operands must agree on dtype and shape; the result has the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::EnumIter)]
pub enum BinaryOp {
    /// Addition: a + b
    Add,
    /// Subtraction: a - b
    Sub,
    /// Multiplication: a * b
    Mul,
    /// Division: a / b
    Div,
    /// Maximum: max(a, b)
    Max,
    /// Minimum: min(a, b)
    Min,
}

impl BinaryOp {
    /// Operand order is not semantically significant.
    pub const fn is_commutative(&self) -> bool {
        matches!(self, Self::Add | Self::Mul | Self::Max | Self::Min)
    }
}
