//! Arena tree storage.

use thiserror::Error;

use super::node::{Node, Operator};
use super::NodeId;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeValidationError {
    #[error("node {node}: child index {child} out of range ({num_nodes} nodes)")]
    ChildOutOfRange {
        node: NodeId,
        child: NodeId,
        num_nodes: usize,
    },
    #[error("node {node}: feature index {feature_index} out of range ({num_features} features)")]
    FeatureOutOfRange {
        node: NodeId,
        feature_index: u16,
        num_features: u16,
    },
    #[error("node {node} is reachable through more than one path")]
    NotATree { node: NodeId },
    #[error("node {node} is not reachable from the root")]
    UnreachableNode { node: NodeId },
}

/// A single decision tree stored as a contiguous node arena.
///
/// Node 0 is the root; children refer to other slots in the same arena.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Box<[Node]>,
}

impl Tree {
    /// Create a tree from its node sequence. Index 0 is the root.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes: nodes.into_boxed_slice(),
        }
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no nodes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checked node lookup.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// All nodes in arena order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Validate structural invariants: child references stay within the
    /// arena, split feature indices stay below `num_features`, and every
    /// node is reached from the root through exactly one path (no sharing,
    /// no cycles, no unreachable slots).
    ///
    /// Intended for debug checks and tests; the traversal engine enforces
    /// the same properties lazily through its step bound.
    pub fn validate(&self, num_features: u16) -> Result<(), TreeValidationError> {
        let num_nodes = self.num_nodes();
        if num_nodes == 0 {
            return Ok(());
        }

        // Depth-first walk from the root. Reaching a marked node means a
        // second path exists, which covers both sharing and cycles (an edge
        // back to the root included, since the root is marked up front).
        let mut seen = vec![false; num_nodes];
        seen[0] = true;
        let mut stack = vec![0 as NodeId];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];
            if !node.is_leaf() && node.feature_index >= num_features {
                return Err(TreeValidationError::FeatureOutOfRange {
                    node: id,
                    feature_index: node.feature_index,
                    num_features,
                });
            }
            for child in [node.left, node.right].into_iter().flatten() {
                if child as usize >= num_nodes {
                    return Err(TreeValidationError::ChildOutOfRange {
                        node: id,
                        child,
                        num_nodes,
                    });
                }
                if seen[child as usize] {
                    return Err(TreeValidationError::NotATree { node: child });
                }
                seen[child as usize] = true;
                stack.push(child);
            }
        }

        if let Some(idx) = seen.iter().position(|v| !v) {
            return Err(TreeValidationError::UnreachableNode {
                node: idx as NodeId,
            });
        }
        Ok(())
    }
}

/// Builder for constructing a [`Tree`] node by node.
///
/// Used by tests and model construction; the binary decoder builds arenas
/// directly from file order.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a split node. Returns the node index.
    pub fn add_split(
        &mut self,
        feature_index: u16,
        operator: Operator,
        threshold: f64,
        left: NodeId,
        right: NodeId,
    ) -> NodeId {
        self.add_node(Node::split(feature_index, operator, threshold, left, right))
    }

    /// Add a leaf node. Returns the node index.
    pub fn add_leaf(&mut self, label: i16) -> NodeId {
        self.add_node(Node::leaf(label))
    }

    /// Add an arbitrary node record. Returns the node index.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Build the immutable tree.
    pub fn build(self) -> Tree {
        Tree::from_nodes(self.nodes)
    }
}
