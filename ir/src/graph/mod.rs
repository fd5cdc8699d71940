//! Arena-backed operation graph.
//!
//! Nodes live in a single arena and are addressed by [`NodeId`]. Node identity
//! is id identity: two structurally identical nodes are still different nodes.
//! Every node keeps its ordered inputs and an unordered, duplicate-free set of
//! users; the two relations are kept mutually consistent by every mutating
//! method of [`Graph`].
//!
//! # Module Organization
//!
//! - [`constructors`] - node creation (parameters, constants, arithmetic)
//! - [`replace`] - node replacement and garbage collection
//! - [`topo`] - topological ordering and invariant checks
//! - [`tree`] - ASCII tree rendering

pub mod constructors;
pub mod replace;
pub mod topo;
pub mod tree;

use graft_dtype::DType;
use smallvec::SmallVec;

use crate::error::NodeNotFoundSnafu;
use crate::op::{Op, OpKey};
use crate::shape::Shape;
use crate::Result;

/// Stable handle of a node inside a [`Graph`].
///
/// Arena slots are never reused, so an id never aliases a node created after
/// the one it originally named was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("%{_0}")]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Operation node.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) op: Op,
    pub(crate) dtype: DType,
    pub(crate) shape: Shape,
    pub(crate) inputs: SmallVec<[NodeId; 2]>,
    pub(crate) users: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn op(&self) -> &Op {
        &self.op
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn key(&self) -> OpKey {
        self.op.key(self.dtype)
    }

    /// Ordered operands.
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Nodes that consume this node, in no particular order, without duplicates.
    pub fn users(&self) -> &[NodeId] {
        &self.users
    }

    pub(crate) fn add_user(&mut self, user: NodeId) {
        if !self.users.contains(&user) {
            self.users.push(user);
        }
    }

    pub(crate) fn remove_user(&mut self, user: NodeId) {
        self.users.retain(|u| *u != user);
    }
}

/// Operation graph: node arena plus the designated roots.
///
/// `parameters` are the graph's free inputs, `outputs` are the values the
/// graph produces. Both are roots: they are never garbage collected.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) parameters: Vec<NodeId>,
    pub(crate) outputs: Vec<NodeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a live node.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref).ok_or_else(|| NodeNotFoundSnafu { id }.build())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut).ok_or_else(|| NodeNotFoundSnafu { id }.build())
    }

    /// Whether `id` names a node that has not been collected.
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.index()), Some(Some(_)))
    }

    pub fn op(&self, id: NodeId) -> Result<&Op> {
        Ok(&self.node(id)?.op)
    }

    pub fn inputs(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.inputs())
    }

    pub fn users(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.users())
    }

    pub fn parameters(&self) -> &[NodeId] {
        &self.parameters
    }

    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    /// Designate `id` as a graph output.
    pub fn add_output(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        self.outputs.push(id);
        Ok(())
    }

    pub fn is_output(&self, id: NodeId) -> bool {
        self.outputs.contains(&id)
    }

    /// Parameters and outputs.
    pub fn is_root(&self, id: NodeId) -> bool {
        self.is_output(id) || self.parameters.contains(&id)
    }

    /// A live node that nothing consumes and that is not a root.
    ///
    /// Such a node is unreachable from the graph's roots and will be removed
    /// by the next [`Graph::collect_garbage`].
    pub fn is_dangling(&self, id: NodeId) -> bool {
        self.node(id).is_ok_and(|node| node.users.is_empty()) && !self.is_root(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all live nodes in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter(|(_, n)| n.is_some()).map(|(i, _)| NodeId(i as u32))
    }

    /// Insert a node and register it as a user of its inputs.
    ///
    /// Inputs must already be validated by the caller.
    pub(crate) fn push_node(&mut self, op: Op, dtype: DType, shape: Shape, inputs: SmallVec<[NodeId; 2]>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        for &input in &inputs {
            if let Some(Some(node)) = self.nodes.get_mut(input.index()) {
                node.add_user(id);
            }
        }
        self.nodes.push(Some(Node { op, dtype, shape, inputs, users: SmallVec::new() }));
        id
    }
}
