//! Single-tree traversal engine.
//!
//! Traversal is an explicit state machine: `Traversing` at the root, moving
//! child to child, until a terminal `Leaf` or `Pruned` state. The walk is
//! bounded by a step counter capped at the tree's node count, so malformed
//! or cyclic arenas terminate with a typed error instead of looping.

use thiserror::Error;

use crate::repr::{Node, NodeId, Tree};

/// Errors that can occur while visiting a single tree.
///
/// These are scoped to the tree being visited; an enclosing ensemble visit
/// records them per tree and continues with the remaining trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// A split node named a feature the sample does not have.
    #[error("feature index {index} out of range (sample has {num_features} features)")]
    FeatureIndexOutOfRange { index: usize, num_features: usize },

    /// The arena is structurally unsound (cycle, dangling child, no root).
    #[error("corrupt model: {0}")]
    CorruptModel(#[from] CorruptModel),
}

/// The specific structural defect behind a [`TraversalError::CorruptModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CorruptModel {
    #[error("tree has no nodes")]
    EmptyTree,
    #[error("child index {child} out of range ({num_nodes} nodes)")]
    ChildOutOfRange { child: NodeId, num_nodes: usize },
    #[error("visit exceeded the step bound of {bound} nodes")]
    StepBoundExceeded { bound: usize },
    #[error("absent branch reached with pruning support disabled")]
    UnexpectedMissingBranch,
}

/// Terminal result of a successful walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// A leaf was reached; carries its class label.
    Leaf(i16),
    /// An absent branch was reached before a leaf; no label produced.
    Pruned,
}

/// Traversal state. `Traversing` holds the next node to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Traversing(NodeId),
    Leaf(i16),
    Pruned,
}

/// Walks a single tree from root to a terminal state for one sample.
///
/// Pruning support is enabled by default: reaching an absent branch yields
/// [`WalkOutcome::Pruned`]. With pruning disabled, an absent branch is
/// reported as model corruption instead.
#[derive(Debug, Clone, Copy)]
pub struct TreeWalker {
    pruning_enabled: bool,
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeWalker {
    /// Create a walker with pruning support enabled.
    pub fn new() -> Self {
        Self {
            pruning_enabled: true,
        }
    }

    /// Set whether absent branches are treated as pruned outcomes.
    pub fn with_pruning(mut self, enabled: bool) -> Self {
        self.pruning_enabled = enabled;
        self
    }

    /// Visit `tree` with the given feature vector.
    ///
    /// Completes within at most `tree.num_nodes()` steps on any input.
    pub fn visit(&self, tree: &Tree, features: &[f64]) -> Result<WalkOutcome, TraversalError> {
        if tree.is_empty() {
            return Err(CorruptModel::EmptyTree.into());
        }

        let bound = tree.num_nodes();
        let mut state = VisitState::Traversing(0);
        let mut steps = 0usize;

        loop {
            match state {
                VisitState::Leaf(label) => return Ok(WalkOutcome::Leaf(label)),
                VisitState::Pruned => return Ok(WalkOutcome::Pruned),
                VisitState::Traversing(id) => {
                    if steps == bound {
                        return Err(CorruptModel::StepBoundExceeded { bound }.into());
                    }
                    steps += 1;

                    let node = tree.node(id).ok_or(CorruptModel::ChildOutOfRange {
                        child: id,
                        num_nodes: bound,
                    })?;
                    state = self.step(node, features)?;
                }
            }
        }
    }

    /// One state transition: leaf detection, operator dispatch, branch choice.
    fn step(&self, node: &Node, features: &[f64]) -> Result<VisitState, TraversalError> {
        if node.is_leaf() {
            return Ok(VisitState::Leaf(node.label));
        }

        let index = node.feature_index as usize;
        let value =
            features
                .get(index)
                .copied()
                .ok_or(TraversalError::FeatureIndexOutOfRange {
                    index,
                    num_features: features.len(),
                })?;

        let chosen = if node.operator.apply(value, node.threshold) {
            node.left
        } else {
            node.right
        };

        match chosen {
            Some(child) => Ok(VisitState::Traversing(child)),
            None if self.pruning_enabled => Ok(VisitState::Pruned),
            None => Err(CorruptModel::UnexpectedMissingBranch.into()),
        }
    }
}
