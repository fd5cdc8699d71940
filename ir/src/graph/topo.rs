//! Topological ordering and structural invariant checks.

use std::collections::HashSet;

use snafu::Snafu;

use super::{Graph, NodeId};
use crate::Result;

/// A violated structural invariant, reported by [`Graph::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum InvariantViolation {
    #[snafu(display("{node} lists {input} as input but {input} does not list {node} as a user"))]
    MissingUser { node: NodeId, input: NodeId },

    #[snafu(display("{node} lists {user} as a user but {user} does not consume {node}"))]
    StaleUser { node: NodeId, user: NodeId },

    #[snafu(display("{node} lists {user} as a user more than once"))]
    DuplicateUser { node: NodeId, user: NodeId },

    #[snafu(display("{node} references collected node {missing}"))]
    DanglingReference { node: NodeId, missing: NodeId },

    #[snafu(display("{node} has {actual} inputs, its op requires {expected}"))]
    BadArity { node: NodeId, expected: usize, actual: usize },

    #[snafu(display("cycle through {node}"))]
    Cycle { node: NodeId },
}

impl Graph {
    /// Live nodes reachable from the roots, inputs before users.
    ///
    /// Depth-first post-order from each output in output order, then from
    /// each parameter. The order is deterministic for a given graph.
    pub fn topological_order(&self) -> Vec<NodeId> {
        let roots: Vec<NodeId> = self.outputs.iter().chain(self.parameters.iter()).copied().collect();
        self.post_order(&roots)
    }

    /// Depth-first post-order over inputs starting at `roots`.
    pub fn post_order(&self, roots: &[NodeId]) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        // (node, inputs already pushed)
        let mut stack: Vec<(NodeId, bool)> = Vec::new();

        for &root in roots {
            if !self.contains(root) || visited.contains(&root) {
                continue;
            }
            stack.push((root, false));
            while let Some((id, expanded)) = stack.pop() {
                if expanded {
                    order.push(id);
                    continue;
                }
                if !visited.insert(id) {
                    continue;
                }
                stack.push((id, true));
                let Ok(node) = self.node(id) else { continue };
                // Reverse so the first input is finished first.
                for &input in node.inputs.iter().rev() {
                    if self.contains(input) && !visited.contains(&input) {
                        stack.push((input, false));
                    }
                }
            }
        }
        order
    }

    /// Whether `target` is reachable from `from` by following inputs.
    ///
    /// A node depends on itself.
    pub fn depends_on(&self, from: NodeId, target: NodeId) -> Result<bool> {
        self.node(from)?;
        let mut visited = HashSet::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if id == target {
                return Ok(true);
            }
            if !visited.insert(id) {
                continue;
            }
            stack.extend(self.node(id)?.inputs.iter().copied());
        }
        Ok(false)
    }

    /// Verify input/user consistency, arity and acyclicity of the live graph.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for id in self.node_ids() {
            let Ok(node) = self.node(id) else { continue };

            if node.inputs.len() != node.op.arity() {
                return BadAritySnafu { node: id, expected: node.op.arity(), actual: node.inputs.len() }.fail();
            }

            for &input in &node.inputs {
                let Ok(input_node) = self.node(input) else {
                    return DanglingReferenceSnafu { node: id, missing: input }.fail();
                };
                if !input_node.users.contains(&id) {
                    return MissingUserSnafu { node: id, input }.fail();
                }
            }

            for (i, &user) in node.users.iter().enumerate() {
                if node.users[..i].contains(&user) {
                    return DuplicateUserSnafu { node: id, user }.fail();
                }
                let Ok(user_node) = self.node(user) else {
                    return DanglingReferenceSnafu { node: id, missing: user }.fail();
                };
                if !user_node.inputs.contains(&id) {
                    return StaleUserSnafu { node: id, user }.fail();
                }
            }
        }

        self.check_acyclic()
    }

    fn check_acyclic(&self) -> Result<(), InvariantViolation> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks = vec![Mark::Unvisited; self.nodes.len()];
        for start in self.node_ids() {
            if marks[start.index()] != Mark::Unvisited {
                continue;
            }
            let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];
            marks[start.index()] = Mark::InProgress;
            while let Some(top) = stack.last_mut() {
                let (id, next) = *top;
                top.1 += 1;
                let inputs = self.node(id).map(|n| n.inputs.as_slice()).unwrap_or(&[]);
                if let Some(&input) = inputs.get(next) {
                    match marks.get(input.index()) {
                        Some(Mark::InProgress) => return CycleSnafu { node: input }.fail(),
                        Some(Mark::Unvisited) => {
                            marks[input.index()] = Mark::InProgress;
                            stack.push((input, 0));
                        }
                        _ => {}
                    }
                } else {
                    marks[id.index()] = Mark::Done;
                    stack.pop();
                }
            }
        }
        Ok(())
    }
}
