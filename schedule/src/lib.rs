//! Scheduling of rewrite passes over graft graphs.
//!
//! The engine in `graft_ir` runs one traversal per pass; this crate decides
//! which rules to run and how often.
//!
//! # Module Organization
//!
//! - [`symbolic`] - algebraic identity rules (`x * 1`, `x + 0`)
//! - [`fixpoint`] - repeated pass invocation until nothing changes
//! - [`config`] - scheduler configuration with environment fallbacks
//! - [`error`] - scheduler errors

pub mod config;
pub mod error;
pub mod fixpoint;
pub mod symbolic;


// Re-export the engine so rule authors need a single dependency
pub use graft_ir::pattern;
pub use graft_ir::rewrite;

pub use config::SchedulerConfig;
pub use error::{Result, ScheduleError};
pub use fixpoint::{FixpointReport, optimize, rewrite_to_fixpoint};
pub use symbolic::{add_zero, identity_rules, multiply_by_one};
