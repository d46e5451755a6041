//! Canonical in-memory representation of a loaded forest.

/// Node identifier used by the tree representation.
///
/// Internally this is just an index into the tree's node arena.
pub type NodeId = u32;

pub mod forest;
pub mod node;
pub mod tree;

pub use forest::{Forest, ForestValidationError};
pub use node::{InvalidOperator, Node, Operator};
pub use tree::{Tree, TreeBuilder, TreeValidationError};
