//! Scheduler configuration.
//!
//! Typed configuration with a bon builder, plus environment variable
//! fallbacks for command-line driven runs.

use bon::bon;

/// Configuration for [`rewrite_to_fixpoint`](crate::fixpoint::rewrite_to_fixpoint)
/// and [`optimize`](crate::fixpoint::optimize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Upper bound on pass invocations, including the final pass that
    /// confirms nothing changes any more.
    pub max_passes: usize,
    /// Collect unreachable nodes at the end of every pass built by
    /// [`optimize`](crate::fixpoint::optimize).
    pub collect_garbage: bool,
    /// Log the output trees before and after every changing pass at `debug`.
    pub dump_graphs: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { max_passes: 32, collect_garbage: true, dump_graphs: false }
    }
}

#[bon]
impl SchedulerConfig {
    /// Create a scheduler configuration with builder pattern.
    #[builder]
    pub fn builder(
        #[builder(default = 32)] max_passes: usize,
        #[builder(default = true)] collect_garbage: bool,
        #[builder(default = false)] dump_graphs: bool,
    ) -> Self {
        Self { max_passes, collect_garbage, dump_graphs }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `GRAFT_MAX_PASSES` - Pass limit (default: 32)
    /// * `GRAFT_NO_GC` - Disable garbage collection if set
    /// * `GRAFT_DUMP_GRAPHS` - Dump graph trees if set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`SchedulerConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_passes = lookup("GRAFT_MAX_PASSES").and_then(|s| s.parse().ok()).unwrap_or(defaults.max_passes);
        let collect_garbage = lookup("GRAFT_NO_GC").is_none();
        let dump_graphs = lookup("GRAFT_DUMP_GRAPHS").is_some();

        Self { max_passes, collect_garbage, dump_graphs }
    }
}
