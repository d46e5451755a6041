//! Ensemble fan-out across all trees of a forest.

use tracing::warn;

use crate::repr::Forest;

use super::traversal::{TraversalError, TreeWalker, WalkOutcome};

/// Status of a classification call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationStatus {
    /// Every tree produced a label.
    Ok,
    /// At least one tree was pruned or failed; voting still ran over the rest.
    Pruned,
    /// Reserved: two or more classes share the leading vote count. Draw
    /// detection is not implemented and this status is never produced.
    Draw,
}

/// Outcome of visiting one tree for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOutcome {
    /// The tree reached a leaf and voted for this label.
    Label(i16),
    /// The tree reached a pruning boundary; no vote.
    Pruned,
    /// The tree's arena was unusable for this sample; no vote. The error is
    /// recorded here rather than failing the whole ensemble.
    Failed(TraversalError),
}

impl TreeOutcome {
    /// The label this tree contributed, if any.
    #[inline]
    pub fn label(&self) -> Option<i16> {
        match self {
            Self::Label(label) => Some(*label),
            Self::Pruned | Self::Failed(_) => None,
        }
    }
}

/// Per-tree outcomes of one classification call, aligned by tree index.
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleResult {
    outcomes: Vec<TreeOutcome>,
}

impl EnsembleResult {
    /// Number of trees visited (always the forest's tree count).
    #[inline]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcomes in tree order.
    #[inline]
    pub fn outcomes(&self) -> &[TreeOutcome] {
        &self.outcomes
    }

    /// Labels from trees that reached a leaf, in tree order.
    pub fn labels(&self) -> impl Iterator<Item = i16> + '_ {
        self.outcomes.iter().filter_map(TreeOutcome::label)
    }

    /// `Ok` only if every tree produced a label, otherwise `Pruned`.
    pub fn status(&self) -> ClassificationStatus {
        if self.outcomes.iter().all(|o| o.label().is_some()) {
            ClassificationStatus::Ok
        } else {
            ClassificationStatus::Pruned
        }
    }
}

/// Drives a [`TreeWalker`] over every tree of a forest.
///
/// All trees are visited regardless of individual outcomes: voting needs the
/// full per-tree outcome set, so a pruned or failed tree never short-circuits
/// the visit.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnsembleVisitor {
    walker: TreeWalker,
}

impl EnsembleVisitor {
    /// Create a visitor with pruning support enabled.
    pub fn new() -> Self {
        Self {
            walker: TreeWalker::new(),
        }
    }

    /// Set whether absent branches are treated as pruned outcomes.
    pub fn with_pruning(mut self, enabled: bool) -> Self {
        self.walker = self.walker.with_pruning(enabled);
        self
    }

    /// Visit every tree of `forest` with the given sample.
    pub fn visit(&self, forest: &Forest, features: &[f64]) -> EnsembleResult {
        let outcomes = forest
            .trees()
            .enumerate()
            .map(|(tree_idx, tree)| match self.walker.visit(tree, features) {
                Ok(WalkOutcome::Leaf(label)) => TreeOutcome::Label(label),
                Ok(WalkOutcome::Pruned) => TreeOutcome::Pruned,
                Err(error) => {
                    warn!(tree_idx, %error, "tree traversal failed");
                    TreeOutcome::Failed(error)
                }
            })
            .collect();

        EnsembleResult { outcomes }
    }
}
