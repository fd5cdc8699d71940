//! Operation graph, pattern matching and graph rewriting for the Graft
//! optimizer.
//!
//! The crate is organized leaves first: an arena-backed operation [`Graph`],
//! declarative [`Pattern`]s with a structural [`Matcher`], and the
//! single-traversal [`GraphRewrite`] pass that applies [`RewriteRule`]s.
//!
//! # Module Organization
//!
//! - [`types`] - constant values, literals and operation enums
//! - [`op`] - the node operation and its kind tag ([`OpKey`])
//! - [`graph`] - the graph arena, node replacement and garbage collection
//! - [`pattern`] - pattern primitives and the matcher
//! - [`rewrite`] - rewrite rules and the rewrite pass
//! - [`error`] - error types and result handling
//! - [`shape`] - static shapes

pub mod error;
pub mod graph;
pub mod op;
pub mod pattern;
pub mod prelude;
pub mod rewrite;
pub mod shape;
pub mod types;


pub use error::{Error, Result};
pub use graph::topo::InvariantViolation;
pub use graph::{Graph, Node, NodeId};
pub use op::{Op, OpKey};
pub use shape::Shape;
pub use types::{BinaryOp, ConstValue, Literal, UnaryOp};

pub use pattern::{ClassMatch, DefaultClassMatch, Label, Match, Matcher, Pattern, Template, Wildcard};
pub use rewrite::{GraphRewrite, PassStats, RewriteOutcome, RewriteRule};

pub use graft_dtype::DType;
