//! Fixpoint driver.
//!
//! A [`GraphRewrite`] pass collapses identity chains of any depth in one
//! traversal, but rules can create nodes that only the next traversal sees.
//! The driver re-runs the pass until one invocation performs no rewrite.

use graft_ir::pattern::ClassMatch;
use graft_ir::{Graph, GraphRewrite, PassStats};

use crate::config::SchedulerConfig;
use crate::error::{FixpointNotReachedSnafu, Result};
use crate::symbolic;

/// Per-pass statistics of a fixpoint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixpointReport {
    pub passes: Vec<PassStats>,
}

impl FixpointReport {
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn total_rewrites(&self) -> usize {
        self.passes.iter().map(|p| p.rewrites).sum()
    }

    pub fn total_collected(&self) -> usize {
        self.passes.iter().map(|p| p.collected).sum()
    }
}

/// Run `pass` until an invocation performs no rewrite.
///
/// The pass is used as configured; `config.collect_garbage` only affects
/// passes built by [`optimize`]. Fails with `FixpointNotReached` when
/// `config.max_passes` invocations all changed the graph.
#[tracing::instrument(skip_all, fields(nodes = graph.len(), max_passes = config.max_passes))]
pub fn rewrite_to_fixpoint<P: ClassMatch>(
    pass: &GraphRewrite<P>,
    graph: &mut Graph,
    config: &SchedulerConfig,
) -> Result<FixpointReport> {
    let mut report = FixpointReport::default();
    if config.dump_graphs {
        tracing::debug!(graph.initial = %graph.outputs_tree(), "before rewrite");
    }

    for index in 0..config.max_passes {
        let stats = pass.run(graph)?;
        let changed = stats.changed();
        if config.dump_graphs && changed {
            tracing::debug!(pass = index, graph.rewritten = %graph.outputs_tree(), "after pass");
        }
        report.passes.push(stats);

        if !changed {
            tracing::info!(
                passes = report.pass_count(),
                rewrites = report.total_rewrites(),
                collected = report.total_collected(),
                "fixpoint reached"
            );
            return Ok(report);
        }
    }

    let rewrites = report.passes.last().map_or(0, |p| p.rewrites);
    FixpointNotReachedSnafu { passes: config.max_passes, rewrites }.fail()
}

/// Simplify `graph` with the identity rules until nothing changes.
pub fn optimize(graph: &mut Graph, config: &SchedulerConfig) -> Result<FixpointReport> {
    let pass = symbolic::identity_rules()?.collect_garbage(config.collect_garbage);
    rewrite_to_fixpoint(&pass, graph, config)
}
