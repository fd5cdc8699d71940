//! Static tensor shapes.
//!
//! The rewrite engine only compares shapes (a replacement must keep the shape
//! of the node it replaces), so shapes are plain concrete dimensions.

use smallvec::SmallVec;

/// Shape type - sequence of concrete dimensions.
///
/// Uses SmallVec with inline capacity of 4 to avoid heap allocation for
/// common tensor ranks.
pub type Shape = SmallVec<[usize; 4]>;

/// Number of elements described by `shape` (1 for a scalar shape).
pub fn num_elements(shape: &Shape) -> usize {
    shape.iter().product()
}

/// Render a shape as `[2, 3]`.
pub fn format_shape(shape: &Shape) -> String {
    let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
    format!("[{}]", dims.join(", "))
}
