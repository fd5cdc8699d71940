//! Common imports for building graphs and rewrite rules.
//!
//! ```rust,ignore
//! use graft_ir::prelude::*;
//! ```

// Graph
pub use crate::graph::{Graph, Node, NodeId};
pub use crate::op::{Op, OpKey};
pub use crate::shape::Shape;
pub use crate::types::{BinaryOp, ConstValue, Literal, UnaryOp};

// Matching and rewriting
pub use crate::pattern::{ClassMatch, DefaultClassMatch, Label, Match, Matcher, Pattern, Template, Wildcard};
pub use crate::rewrite::{GraphRewrite, PassStats, RewriteOutcome, RewriteRule};

pub use crate::{Error, Result};

// Re-exports from dependencies
pub use graft_dtype::DType;
pub use smallvec::smallvec;
