use graft_dtype::DType;
use snafu::Snafu;

use crate::graph::NodeId;
use crate::shape::Shape;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The id does not name a live node of this graph.
    #[snafu(display("node {id} does not exist in the graph (never created or already collected)"))]
    NodeNotFound { id: NodeId },

    /// DType mismatch in binary operation.
    #[snafu(display("dtype mismatch: cannot combine {lhs} and {rhs}"))]
    DTypeMismatch { lhs: DType, rhs: DType },

    /// Shape mismatch in binary operation.
    #[snafu(display("shape mismatch: cannot combine {lhs:?} and {rhs:?}"))]
    ShapeMismatch { lhs: Shape, rhs: Shape },

    /// Literal value count does not agree with its shape.
    #[snafu(display("literal of shape {shape:?} needs {expected} values, got {actual}"))]
    LiteralSizeMismatch { shape: Shape, expected: usize, actual: usize },

    /// Literal value does not belong to the literal's dtype family.
    #[snafu(display("literal value {value} is not representable as {dtype}"))]
    LiteralValueMismatch { value: String, dtype: DType },

    // =========================================================================
    // Rule/callback contract violations
    // =========================================================================
    /// A matched node does not have the arity the rule was written for.
    #[snafu(display("{op} expects {expected} inputs, matched node {id} has {actual}"))]
    ArityMismatch { op: &'static str, id: NodeId, expected: usize, actual: usize },

    /// A rule asked for a label that the pattern never bound.
    #[snafu(display("label '{label}' has no binding in this match"))]
    MissingBinding { label: String },

    /// A pattern uses more distinct labels than binding indices can address.
    #[snafu(display("pattern uses {count} distinct labels, at most {max} are supported"))]
    TooManyLabels { count: usize, max: usize },

    /// The replacement transitively consumes the node it replaces.
    #[snafu(display("replacing {target} with {replacement} would create a cycle"))]
    CyclicReplacement { target: NodeId, replacement: NodeId },

    /// `replace_node` was asked to replace a designated output.
    #[snafu(display("node {target} is a graph output; use replace_output to update the output list as well"))]
    RootReplacement { target: NodeId },

    /// A pass was asked to rewrite a graph whose computation has no outputs.
    #[snafu(display("graph has {nodes} non-parameter nodes but no outputs; register them with add_output first"))]
    NoOutputs { nodes: usize },
}
