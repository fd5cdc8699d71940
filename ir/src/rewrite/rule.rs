//! Rewrite rules: a matcher paired with the action to run on a match.

use std::fmt;

use crate::graph::Graph;
use crate::pattern::{ClassMatch, DefaultClassMatch, Match, Matcher, Pattern};
use crate::Result;

/// What a callback did with a structural match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The graph was modified.
    Rewritten,
    /// A value-level precondition failed; the graph is untouched.
    Declined,
}

/// Callback invoked with a successful match and the graph to mutate.
///
/// The structural match does not guarantee the rewrite is valid: callbacks
/// check value-level preconditions themselves and return
/// [`RewriteOutcome::Declined`] when they fail. Errors abort the pass.
pub type RewriteCallback = Box<dyn Fn(&Match<'_>, &mut Graph) -> Result<RewriteOutcome> + Send + Sync>;

/// A named (pattern, callback) pair.
pub struct RewriteRule<P = DefaultClassMatch> {
    name: String,
    matcher: Matcher<P>,
    callback: RewriteCallback,
}

impl RewriteRule<DefaultClassMatch> {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<Pattern>,
        callback: impl Fn(&Match<'_>, &mut Graph) -> Result<RewriteOutcome> + Send + Sync + 'static,
    ) -> Result<Self> {
        Ok(Self::from_matcher(name, Matcher::new(pattern)?, callback))
    }
}

impl<P: ClassMatch> RewriteRule<P> {
    pub fn from_matcher(
        name: impl Into<String>,
        matcher: Matcher<P>,
        callback: impl Fn(&Match<'_>, &mut Graph) -> Result<RewriteOutcome> + Send + Sync + 'static,
    ) -> Self {
        Self { name: name.into(), matcher, callback: Box::new(callback) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matcher(&self) -> &Matcher<P> {
        &self.matcher
    }

    pub(crate) fn apply(&self, matched: &Match<'_>, graph: &mut Graph) -> Result<RewriteOutcome> {
        (self.callback)(matched, graph)
    }
}

impl<P: fmt::Debug> fmt::Debug for RewriteRule<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteRule").field("name", &self.name).field("matcher", &self.matcher).finish_non_exhaustive()
    }
}
