//! Rewrite rules and the graph rewrite pass.
//!
//! A [`GraphRewrite`] applies its [`RewriteRule`]s in one traversal of the
//! graph. Fixpoint iteration is left to the caller.

pub mod engine;
pub mod rule;

pub use engine::{GraphRewrite, PassStats};
pub use rule::{RewriteCallback, RewriteOutcome, RewriteRule};
