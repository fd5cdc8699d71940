//! Tree visualization for operation graphs.
//!
//! Provides pretty-printing of a node and everything it consumes as an ASCII
//! tree. Nodes with several users appear once in full; later occurrences are
//! rendered as back-references.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::rc::Rc;

use ptree::{Style, TreeItem};

use super::{Graph, NodeId};
use crate::op::Op;
use crate::shape::format_shape;

#[derive(Clone)]
struct NodeTree<'g> {
    graph: &'g Graph,
    id: NodeId,
    visited: Rc<RefCell<HashSet<NodeId>>>,
    is_backref: RefCell<bool>,
}

impl<'g> NodeTree<'g> {
    fn new(graph: &'g Graph, id: NodeId, visited: Rc<RefCell<HashSet<NodeId>>>) -> Self {
        Self { graph, id, visited, is_backref: RefCell::new(false) }
    }
}

impl TreeItem for NodeTree<'_> {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &Style) -> io::Result<()> {
        if !self.visited.borrow_mut().insert(self.id) {
            *self.is_backref.borrow_mut() = true;
            return write!(f, "{} → (see above)", self.id);
        }
        write!(f, "{}", format_node(self.graph, self.id))
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        if *self.is_backref.borrow() {
            return Cow::Borrowed(&[]);
        }
        let inputs = self.graph.inputs(self.id).unwrap_or(&[]);
        Cow::Owned(inputs.iter().map(|&input| Self::new(self.graph, input, self.visited.clone())).collect())
    }
}

/// Format a single node: `%id OP : dtype [shape] (users=n)`.
pub fn format_node(graph: &Graph, id: NodeId) -> String {
    let Ok(node) = graph.node(id) else {
        return format!("{id} <collected>");
    };
    let op = match node.op() {
        Op::Parameter(index) => format!("Parameter({index})"),
        Op::Const(literal) => match literal.values() {
            [single] => format!("Const({single})"),
            values if values.len() <= 4 => {
                let shown: Vec<String> = values.iter().map(ToString::to_string).collect();
                format!("Const([{}])", shown.join(", "))
            }
            values => format!("Const(len={})", values.len()),
        },
        other => other.name().to_string(),
    };
    format!("{id} {op} : {} {} (users={})", node.dtype(), format_shape(node.shape()), node.users().len())
}

impl Graph {
    /// Render `root` and everything it consumes as an ASCII tree.
    pub fn tree(&self, root: NodeId) -> String {
        let tree = NodeTree::new(self, root, Rc::new(RefCell::new(HashSet::new())));
        let mut buf = Vec::new();
        if let Err(error) = ptree::write_tree(&tree, &mut buf) {
            tracing::warn!(%error, "tree rendering failed");
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Render every output of the graph, one tree after another.
    pub fn outputs_tree(&self) -> String {
        self.outputs.iter().map(|&output| self.tree(output)).collect::<Vec<_>>().join("")
    }
}
