//! Single-traversal graph rewrite pass.
//!
//! # Algorithm
//!
//! 1. Snapshot a topological order of the live graph (inputs before users,
//!    depth-first from the outputs, then from the parameters).
//! 2. Visit each node of the snapshot. Nodes that were collected, or that
//!    lost every user to an earlier replacement in this pass, are skipped.
//! 3. Try the rules in registration order. The first rule whose pattern
//!    matches gets its callback invoked; no further rules are tried at that
//!    node, whether the callback rewrote or declined.
//! 4. Optionally collect garbage.
//!
//! A replacement only rewires users, and users always come later in the
//! snapshot than the node they consume. A chain like `((a * 1) * 1) * 1`
//! therefore collapses in one traversal: each outer multiplication is
//! visited after its inner one was replaced by `a`, so it now matches
//! `a * 1` directly. Nodes created by callbacks are only seen by the next
//! pass; reaching a fixpoint is the caller's loop.

use std::collections::BTreeMap;

use snafu::ensure;

use super::rule::{RewriteOutcome, RewriteRule};
use crate::error::NoOutputsSnafu;
use crate::graph::{Graph, NodeId};
use crate::pattern::{ClassMatch, DefaultClassMatch, Match};
use crate::Result;

/// Counters for a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Nodes on which rules were attempted.
    pub visited: usize,
    /// Structural matches (callback invocations).
    pub matches: usize,
    /// Callbacks that modified the graph.
    pub rewrites: usize,
    /// Callbacks that declined.
    pub declined: usize,
    /// Rewrites per rule name.
    pub per_rule: BTreeMap<String, usize>,
    /// Nodes removed by garbage collection at the end of the pass.
    pub collected: usize,
}

impl PassStats {
    pub fn changed(&self) -> bool {
        self.rewrites > 0
    }
}

/// Ordered collection of rewrite rules applied in one traversal.
#[derive(Debug)]
pub struct GraphRewrite<P = DefaultClassMatch> {
    rules: Vec<RewriteRule<P>>,
    collect_garbage: bool,
}

impl<P> Default for GraphRewrite<P> {
    fn default() -> Self {
        Self { rules: Vec::new(), collect_garbage: true }
    }
}

impl<P: ClassMatch> GraphRewrite<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. Rules are tried in registration order.
    pub fn add_rule(&mut self, rule: RewriteRule<P>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rule(mut self, rule: RewriteRule<P>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Whether [`GraphRewrite::run`] collects garbage after the traversal.
    pub fn collect_garbage(mut self, enabled: bool) -> Self {
        self.collect_garbage = enabled;
        self
    }

    pub fn rules(&self) -> &[RewriteRule<P>] {
        &self.rules
    }

    /// Run one traversal over `graph`.
    ///
    /// The traversal starts at the outputs, so a graph with computed nodes
    /// but no outputs is rejected with `NoOutputs` before anything is
    /// visited or collected.
    pub fn run(&self, graph: &mut Graph) -> Result<PassStats> {
        if graph.outputs().is_empty() {
            let nodes = graph.node_ids().filter(|id| !graph.parameters().contains(id)).count();
            ensure!(nodes == 0, NoOutputsSnafu { nodes });
        }

        let mut stats = PassStats::default();

        for id in graph.topological_order() {
            if !graph.contains(id) || graph.is_dangling(id) {
                continue;
            }
            stats.visited += 1;
            self.rewrite_node(graph, id, &mut stats)?;
        }

        if self.collect_garbage {
            stats.collected = graph.collect_garbage();
        }

        tracing::debug!(
            visited = stats.visited,
            matches = stats.matches,
            rewrites = stats.rewrites,
            declined = stats.declined,
            collected = stats.collected,
            "rewrite pass complete"
        );
        Ok(stats)
    }

    fn rewrite_node(&self, graph: &mut Graph, id: NodeId, stats: &mut PassStats) -> Result<()> {
        for rule in &self.rules {
            let Some(matched) = rule.matcher().try_match(graph, id)? else { continue };
            stats.matches += 1;
            match apply(rule, &matched, graph)? {
                RewriteOutcome::Rewritten => {
                    stats.rewrites += 1;
                    *stats.per_rule.entry(rule.name().to_string()).or_default() += 1;
                }
                RewriteOutcome::Declined => stats.declined += 1,
            }
            return Ok(());
        }
        Ok(())
    }
}

fn apply<P: ClassMatch>(rule: &RewriteRule<P>, matched: &Match<'_>, graph: &mut Graph) -> Result<RewriteOutcome> {
    let outcome = rule.apply(matched, graph)?;
    tracing::debug!(rule = rule.name(), root = %matched.root(), ?outcome, "rule fired");
    Ok(outcome)
}
