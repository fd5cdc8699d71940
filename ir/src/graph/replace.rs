//! Node replacement and garbage collection.
//!
//! Replacement rewires every user of a node to consume another node instead.
//! It only knows about the input/user relation: outputs held by the graph are
//! bookkeeping the caller must opt into updating via [`Graph::replace_output`].

use std::collections::HashSet;

use smallvec::SmallVec;
use snafu::ensure;

use super::{Graph, NodeId};
use crate::error::{CyclicReplacementSnafu, RootReplacementSnafu};
use crate::Result;

impl Graph {
    /// Redirect every user of `target` to `replacement`.
    ///
    /// Each input slot of each user that held `target` now holds
    /// `replacement`; those users join `replacement`'s user set and `target`
    /// is left without users. `target` keeps its own inputs until it is
    /// collected.
    ///
    /// Fails with `RootReplacement` when `target` is a graph output (the
    /// output list would keep referencing it), and with `CyclicReplacement`
    /// when `replacement` consumes `target` directly or transitively.
    /// Replacing a node with itself is a no-op.
    pub fn replace_node(&mut self, target: NodeId, replacement: NodeId) -> Result<()> {
        ensure!(!self.is_output(target), RootReplacementSnafu { target });
        self.rewire_users(target, replacement)
    }

    /// Like [`Graph::replace_node`], and also substitutes `replacement` for
    /// `target` in the output list.
    pub fn replace_output(&mut self, target: NodeId, replacement: NodeId) -> Result<()> {
        self.rewire_users(target, replacement)?;
        for output in self.outputs.iter_mut().filter(|o| **o == target) {
            *output = replacement;
        }
        Ok(())
    }

    fn rewire_users(&mut self, target: NodeId, replacement: NodeId) -> Result<()> {
        self.node(target)?;
        self.node(replacement)?;
        if target == replacement {
            return Ok(());
        }
        ensure!(!self.depends_on(replacement, target)?, CyclicReplacementSnafu { target, replacement });

        let users: SmallVec<[NodeId; 4]> = std::mem::take(&mut self.node_mut(target)?.users);
        for &user in &users {
            let node = self.node_mut(user)?;
            for slot in node.inputs.iter_mut().filter(|slot| **slot == target) {
                *slot = replacement;
            }
        }

        let replacement_node = self.node_mut(replacement)?;
        for &user in &users {
            replacement_node.add_user(user);
        }

        tracing::debug!(%target, %replacement, users = users.len(), "replaced node");
        Ok(())
    }

    /// Remove every node that is not reachable from a root through inputs.
    ///
    /// Removed nodes are unlinked from the user sets of their inputs. Returns
    /// the number of nodes removed.
    pub fn collect_garbage(&mut self) -> usize {
        let roots: Vec<NodeId> = self.outputs.iter().chain(self.parameters.iter()).copied().collect();
        let live: HashSet<NodeId> = self.post_order(&roots).into_iter().collect();
        let dead: Vec<NodeId> = self.node_ids().filter(|id| !live.contains(id)).collect();

        for &id in &dead {
            let Some(node) = self.nodes[id.index()].take() else { continue };
            for input in node.inputs {
                if let Some(Some(input_node)) = self.nodes.get_mut(input.index()) {
                    input_node.remove_user(id);
                }
            }
        }

        if !dead.is_empty() {
            tracing::debug!(collected = dead.len(), remaining = self.len(), "collected garbage");
        }
        dead.len()
    }
}
