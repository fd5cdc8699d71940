//! Pattern primitives: [`Wildcard`] and [`Label`].
//!
//! Both match by capability rather than structure and never look at the
//! candidate's inputs themselves.
//!
//! The two primitives treat their predicates differently:
//!
//! - A [`Label`] predicate gates the match. A rejected candidate is a non-match.
//! - A [`Wildcard`] predicate only selects between "accept anything" and
//!   "let the wrapped fallback pattern decide". Without a fallback, a
//!   rejected candidate is still accepted.

use std::fmt;
use std::sync::Arc;

use super::Pattern;
use super::bindings::{BindingStore, BindingStoreExt};
use crate::graph::{Graph, NodeId};

/// Shared predicate over a candidate graph node.
#[derive(Clone)]
pub struct NodePredicate(Arc<dyn Fn(&Graph, NodeId) -> bool + Send + Sync>);

impl NodePredicate {
    pub fn new(f: impl Fn(&Graph, NodeId) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn test(&self, graph: &Graph, node: NodeId) -> bool {
        (self.0)(graph, node)
    }
}

impl fmt::Debug for NodePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NodePredicate(..)")
    }
}

/// Matches any node without recursing into it.
#[derive(Debug, Clone, Default)]
pub struct Wildcard {
    predicate: Option<NodePredicate>,
    fallback: Option<Box<Pattern>>,
}

/// Outcome of a wildcard looking at a candidate.
#[derive(Debug, Clone, Copy)]
pub enum WildcardDecision<'p> {
    /// The wildcard matches the candidate.
    Accept,
    /// The predicate rejected the candidate; the fallback pattern decides.
    Defer(&'p Pattern),
}

impl Wildcard {
    /// Wildcard that accepts every node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wildcard that falls back to matching `pattern` when its predicate
    /// rejects a candidate.
    pub fn around(pattern: impl Into<Pattern>) -> Self {
        Self { predicate: None, fallback: Some(Box::new(pattern.into())) }
    }

    pub fn with_predicate(mut self, f: impl Fn(&Graph, NodeId) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(NodePredicate::new(f));
        self
    }

    pub fn predicate(&self) -> Option<&NodePredicate> {
        self.predicate.as_ref()
    }

    pub fn fallback(&self) -> Option<&Pattern> {
        self.fallback.as_deref()
    }

    /// Whether the predicate (if any) accepts `candidate`.
    pub fn accepts(&self, graph: &Graph, candidate: NodeId) -> bool {
        self.predicate.as_ref().is_none_or(|p| p.test(graph, candidate))
    }

    pub fn decide(&self, graph: &Graph, candidate: NodeId) -> WildcardDecision<'_> {
        match (self.accepts(graph, candidate), self.fallback()) {
            (false, Some(fallback)) => WildcardDecision::Defer(fallback),
            _ => WildcardDecision::Accept,
        }
    }
}

/// Matches a single node and binds it to a name.
///
/// Labels are identified by name, scoped to one pattern. Every occurrence of
/// a name inside a pattern is the same label, even when the `Label` values
/// were constructed separately, and all occurrences must bind the same node.
/// The same name in another pattern is an unrelated label with its own
/// binding. Use distinct names for independent captures.
#[derive(Debug, Clone)]
pub struct Label {
    name: Arc<str>,
    predicate: Option<NodePredicate>,
}

impl Label {
    pub fn named(name: impl AsRef<str>) -> Self {
        Self { name: Arc::from(name.as_ref()), predicate: None }
    }

    pub fn with_predicate(mut self, f: impl Fn(&Graph, NodeId) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(NodePredicate::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn predicate(&self) -> Option<&NodePredicate> {
        self.predicate.as_ref()
    }

    /// Check the predicate, then bind `candidate` at `slot` or confirm the
    /// existing binding is the very same node.
    pub fn matches(&self, graph: &Graph, candidate: NodeId, slot: u8, store: &mut BindingStore) -> bool {
        if self.predicate.as_ref().is_some_and(|p| !p.test(graph, candidate)) {
            return false;
        }
        match store.get_by_index(slot) {
            Some(bound) => bound == candidate,
            None => {
                store.set_binding(slot, candidate);
                true
            }
        }
    }
}
