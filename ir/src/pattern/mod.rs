//! Pattern matching over operation graphs.
//!
//! A [`Pattern`] is a small tree describing a sub-graph shape. Its leaves can
//! be concrete graph nodes, [`Wildcard`]s that match anything, or [`Label`]s
//! that match anything and remember what they matched. Interior nodes are
//! either existing graph nodes used as templates ([`Pattern::Node`]) or
//! detached op templates ([`Pattern::Op`]).
//!
//! Patterns compose with the arithmetic operators:
//!
//! ```ignore
//! let x = Label::named("x");
//! let pattern = Pattern::from(x.clone()) * Pattern::constant(DType::Int32);
//! ```
//!
//! # Module Organization
//!
//! - [`bindings`] - label interning and binding storage
//! - [`matcher`] - the [`Matcher`] and its class-comparison policy
//! - [`primitives`] - [`Wildcard`] and [`Label`]

pub mod bindings;
pub mod matcher;
pub mod primitives;

use std::ops::{Add, Div, Mul, Neg, Sub};

use graft_dtype::DType;

use crate::graph::NodeId;
use crate::op::OpKey;
use crate::types::{BinaryOp, UnaryOp};
use crate::Result;

pub use bindings::{BindingStore, BindingStoreExt, VarIntern};
pub use matcher::{ClassMatch, DefaultClassMatch, Match, Matcher, Template};
pub use primitives::{Label, NodePredicate, Wildcard, WildcardDecision};

/// Pattern tree.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches any node, see [`Wildcard`].
    Wildcard(Wildcard),
    /// Matches any node and binds it, see [`Label`].
    Label(Label),
    /// An existing graph node used as a template: the candidate must be of the
    /// same class and its inputs must match this node's inputs, recursively.
    Node(NodeId),
    /// A detached op template with its own child patterns.
    Op { key: OpKey, src: Vec<Pattern> },
}

impl Pattern {
    /// Wildcard accepting every node.
    pub fn any() -> Self {
        Self::Wildcard(Wildcard::new())
    }

    pub fn node(id: NodeId) -> Self {
        Self::Node(id)
    }

    pub fn label(name: impl AsRef<str>) -> Self {
        Self::Label(Label::named(name))
    }

    pub fn op(key: OpKey, src: Vec<Pattern>) -> Self {
        Self::Op { key, src }
    }

    /// Any constant of element type `dtype`, regardless of its values.
    pub fn constant(dtype: DType) -> Self {
        Self::op(OpKey::Const(dtype), Vec::new())
    }

    /// Any graph parameter.
    pub fn parameter() -> Self {
        Self::op(OpKey::Parameter, Vec::new())
    }

    pub fn unary(op: UnaryOp, src: impl Into<Pattern>) -> Self {
        Self::op(OpKey::Unary(op), vec![src.into()])
    }

    pub fn binary(op: BinaryOp, lhs: impl Into<Pattern>, rhs: impl Into<Pattern>) -> Self {
        Self::op(OpKey::Binary(op), vec![lhs.into(), rhs.into()])
    }

    /// Intern every label name reachable from this pattern.
    ///
    /// Wildcard fallbacks are included. [`Pattern::Node`] templates never
    /// contain labels.
    pub fn collect_labels(&self, intern: &mut VarIntern) -> Result<()> {
        match self {
            Self::Label(label) => intern.get_or_insert(label.name()).map(|_| ()),
            Self::Wildcard(wildcard) => match wildcard.fallback() {
                Some(fallback) => fallback.collect_labels(intern),
                None => Ok(()),
            },
            Self::Op { src, .. } => src.iter().try_for_each(|child| child.collect_labels(intern)),
            Self::Node(_) => Ok(()),
        }
    }
}

impl From<NodeId> for Pattern {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<Label> for Pattern {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}

impl From<&Label> for Pattern {
    fn from(label: &Label) -> Self {
        Self::Label(label.clone())
    }
}

impl From<Wildcard> for Pattern {
    fn from(wildcard: Wildcard) -> Self {
        Self::Wildcard(wildcard)
    }
}

/// Operator overloads building [`Pattern::Op`] templates.
///
/// Implemented for every pattern-ish left-hand side; the right-hand side is
/// anything convertible into a [`Pattern`].
macro_rules! impl_pattern_ops {
    (
        lhs: [ $($Lhs:ty),* $(,)? ],
        binary: [ $(($Trait:ident, $method:ident, $op:expr)),* $(,)? ] $(,)?
    ) => {
        impl_pattern_ops!(@each [ $($Lhs),* ] [ $(($Trait, $method, $op)),* ]);
    };
    (@each [ $($Lhs:ty),* ] $ops:tt) => {
        $( impl_pattern_ops!(@one $Lhs, $ops); )*
    };
    (@one $Lhs:ty, [ $(($Trait:ident, $method:ident, $op:expr)),* ]) => {
        $(
            impl<R: Into<Pattern>> $Trait<R> for $Lhs {
                type Output = Pattern;
                fn $method(self, rhs: R) -> Pattern {
                    Pattern::binary($op, self, rhs)
                }
            }
        )*
        impl Neg for $Lhs {
            type Output = Pattern;
            fn neg(self) -> Pattern {
                Pattern::unary(UnaryOp::Neg, self)
            }
        }
    };
}

impl_pattern_ops! {
    lhs: [Pattern, Label, Wildcard],
    binary: [
        (Add, add, BinaryOp::Add),
        (Sub, sub, BinaryOp::Sub),
        (Mul, mul, BinaryOp::Mul),
        (Div, div, BinaryOp::Div),
    ],
}
