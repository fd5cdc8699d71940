//! Structural matcher.
//!
//! A [`Matcher`] owns one pattern and answers "does the sub-graph rooted at
//! this node have this shape, and what did the labels bind to?". Matching is
//! read-only: the graph is never modified.
//!
//! Whether a pattern node and a candidate are "the same kind of operation" is
//! decided by a [`ClassMatch`] policy. [`DefaultClassMatch`] compares
//! [`OpKey`]s and treats parameters used as templates by identity.

use std::collections::HashMap;

use smallvec::SmallVec;

use super::Pattern;
use super::bindings::{BindingStore, BindingStoreExt, VarIntern};
use super::primitives::{Label, WildcardDecision};
use crate::error::MissingBindingSnafu;
use crate::graph::{Graph, NodeId};
use crate::op::OpKey;
use crate::Result;

/// The structural side of a pattern node, as seen by a [`ClassMatch`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// A live graph node used as a template.
    Node(NodeId),
    /// A detached op template.
    Op(OpKey),
}

impl Template {
    /// Kind tag of the template.
    pub fn key(self, graph: &Graph) -> Result<OpKey> {
        match self {
            Self::Node(id) => Ok(graph.node(id)?.key()),
            Self::Op(key) => Ok(key),
        }
    }
}

/// Class comparison policy.
///
/// Implement this to customize which graph nodes a template stands for, for
/// instance to compare constants by value or to make parameters match by
/// element type.
pub trait ClassMatch {
    /// Whether `candidate` is the same class of operation as `template`.
    fn same_class(&self, graph: &Graph, template: Template, candidate: NodeId) -> Result<bool>;

    /// Whether operand order may be permuted when matching a node of class `key`.
    fn is_commutative(&self, key: OpKey) -> bool {
        key.is_commutative()
    }
}

/// [`OpKey`] equality, with identity semantics for parameter templates.
///
/// A parameter node used as a template only matches itself; a detached
/// parameter template ([`Pattern::parameter`]) matches any parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassMatch;

impl ClassMatch for DefaultClassMatch {
    fn same_class(&self, graph: &Graph, template: Template, candidate: NodeId) -> Result<bool> {
        let expected = template.key(graph)?;
        if expected != graph.node(candidate)?.key() {
            return Ok(false);
        }
        Ok(match template {
            Template::Node(id) if expected.is_identity_sensitive() => id == candidate,
            _ => true,
        })
    }
}

impl<T: ClassMatch + ?Sized> ClassMatch for &T {
    fn same_class(&self, graph: &Graph, template: Template, candidate: NodeId) -> Result<bool> {
        (**self).same_class(graph, template, candidate)
    }

    fn is_commutative(&self, key: OpKey) -> bool {
        (**self).is_commutative(key)
    }
}

/// One position in the pattern walk: either a pattern tree node, or an input
/// of a graph node that is being used as a template.
#[derive(Clone, Copy)]
enum Cursor<'p> {
    Pattern(&'p Pattern),
    Node(NodeId),
}

type Children<'p> = SmallVec<[Cursor<'p>; 4]>;

/// Result of a successful match.
#[derive(Debug, Clone)]
pub struct Match<'m> {
    root: NodeId,
    bindings: BindingStore,
    intern: &'m VarIntern,
}

impl Match<'_> {
    /// The node the pattern was matched against.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, label: &Label) -> Option<NodeId> {
        self.get_named(label.name())
    }

    pub fn get_named(&self, name: &str) -> Option<NodeId> {
        self.intern.get_index(name).and_then(|idx| self.bindings.get_by_index(idx))
    }

    /// Bound node of `label`, or `MissingBinding`.
    pub fn bound(&self, label: &Label) -> Result<NodeId> {
        self.get(label).ok_or_else(|| MissingBindingSnafu { label: label.name().to_string() }.build())
    }

    /// All bindings keyed by label name.
    pub fn bindings(&self) -> HashMap<String, NodeId> {
        self.intern.to_hashmap(&self.bindings)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Pattern matcher for a single pattern.
#[derive(Debug, Clone)]
pub struct Matcher<P = DefaultClassMatch> {
    pattern: Pattern,
    intern: VarIntern,
    class_match: P,
    last: Option<(NodeId, BindingStore)>,
}

impl Matcher<DefaultClassMatch> {
    pub fn new(pattern: impl Into<Pattern>) -> Result<Self> {
        Self::with_class_match(pattern, DefaultClassMatch)
    }
}

impl<P: ClassMatch> Matcher<P> {
    /// Matcher with a custom class comparison policy.
    pub fn with_class_match(pattern: impl Into<Pattern>, class_match: P) -> Result<Self> {
        let pattern = pattern.into();
        let mut intern = VarIntern::new();
        pattern.collect_labels(&mut intern)?;
        Ok(Self { pattern, intern, class_match, last: None })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn class_match(&self) -> &P {
        &self.class_match
    }

    /// Match the pattern against the sub-graph rooted at `root`.
    ///
    /// Returns `Ok(None)` when the shape does not match and an error when
    /// `root` (or a template node) is not a live node.
    pub fn try_match(&self, graph: &Graph, root: NodeId) -> Result<Option<Match<'_>>> {
        let mut store = BindingStore::new();
        let matched = self.match_cursor(graph, Cursor::Pattern(&self.pattern), root, &mut store)?;
        tracing::trace!(%root, matched, bindings = store.len(), "pattern match");
        Ok(matched.then(|| Match { root, bindings: store, intern: &self.intern }))
    }

    /// Stateful form of [`Matcher::try_match`].
    ///
    /// Bindings of a previous call are always discarded; after a successful
    /// call they are available through [`Matcher::match_root`] and
    /// [`Matcher::bound_node`].
    pub fn match_node(&mut self, graph: &Graph, root: NodeId) -> Result<bool> {
        self.last = None;
        let mut store = BindingStore::new();
        let matched = self.match_cursor(graph, Cursor::Pattern(&self.pattern), root, &mut store)?;
        if matched {
            self.last = Some((root, store));
        }
        Ok(matched)
    }

    /// Root of the last successful [`Matcher::match_node`] call.
    pub fn match_root(&self) -> Option<NodeId> {
        self.last.as_ref().map(|(root, _)| *root)
    }

    /// Node bound to `label` by the last successful [`Matcher::match_node`] call.
    pub fn bound_node(&self, label: &Label) -> Option<NodeId> {
        let (_, store) = self.last.as_ref()?;
        self.intern.get_index(label.name()).and_then(|idx| store.get_by_index(idx))
    }

    /// The last successful match, as a [`Match`].
    pub fn last_match(&self) -> Option<Match<'_>> {
        self.last.as_ref().map(|(root, store)| Match { root: *root, bindings: store.clone(), intern: &self.intern })
    }

    fn match_cursor(&self, graph: &Graph, cursor: Cursor<'_>, candidate: NodeId, store: &mut BindingStore) -> Result<bool> {
        match cursor {
            Cursor::Pattern(Pattern::Wildcard(wildcard)) => {
                graph.node(candidate)?;
                match wildcard.decide(graph, candidate) {
                    WildcardDecision::Accept => Ok(true),
                    WildcardDecision::Defer(fallback) => {
                        self.match_cursor(graph, Cursor::Pattern(fallback), candidate, store)
                    }
                }
            }
            Cursor::Pattern(Pattern::Label(label)) => {
                graph.node(candidate)?;
                let slot = self
                    .intern
                    .get_index(label.name())
                    .ok_or_else(|| MissingBindingSnafu { label: label.name().to_string() }.build())?;
                Ok(label.matches(graph, candidate, slot, store))
            }
            Cursor::Pattern(Pattern::Op { key, src }) => {
                let children: Children<'_> = src.iter().map(Cursor::Pattern).collect();
                self.match_structure(graph, Template::Op(*key), &children, candidate, store)
            }
            Cursor::Pattern(Pattern::Node(id)) => self.match_template_node(graph, *id, candidate, store),
            Cursor::Node(id) => self.match_template_node(graph, id, candidate, store),
        }
    }

    fn match_template_node(
        &self,
        graph: &Graph,
        template: NodeId,
        candidate: NodeId,
        store: &mut BindingStore,
    ) -> Result<bool> {
        let children: Children<'_> = graph.inputs(template)?.iter().copied().map(Cursor::Node).collect();
        self.match_structure(graph, Template::Node(template), &children, candidate, store)
    }

    fn match_structure(
        &self,
        graph: &Graph,
        template: Template,
        children: &[Cursor<'_>],
        candidate: NodeId,
        store: &mut BindingStore,
    ) -> Result<bool> {
        if !self.class_match.same_class(graph, template, candidate)? {
            return Ok(false);
        }
        let node = graph.node(candidate)?;
        let inputs = node.inputs();
        if inputs.len() != children.len() {
            return Ok(false);
        }
        if children.len() == 2 && self.class_match.is_commutative(node.key()) {
            self.match_swapped(graph, children, inputs, store)
        } else {
            self.match_ordered(graph, children, inputs, store)
        }
    }

    fn match_ordered(
        &self,
        graph: &Graph,
        children: &[Cursor<'_>],
        inputs: &[NodeId],
        store: &mut BindingStore,
    ) -> Result<bool> {
        for (&child, &input) in children.iter().zip(inputs) {
            if !self.match_cursor(graph, child, input, store)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Try both operand orders of a binary node; first success wins.
    ///
    /// Each attempt works on its own copy of the bindings so a failed attempt
    /// leaves nothing behind.
    fn match_swapped(
        &self,
        graph: &Graph,
        children: &[Cursor<'_>],
        inputs: &[NodeId],
        store: &mut BindingStore,
    ) -> Result<bool> {
        for (first, second) in [(0, 1), (1, 0)] {
            let mut attempt = store.clone();
            if self.match_cursor(graph, children[first], inputs[0], &mut attempt)?
                && self.match_cursor(graph, children[second], inputs[1], &mut attempt)?
            {
                *store = attempt;
                return Ok(true);
            }
        }
        Ok(false)
    }
}
