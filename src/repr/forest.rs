//! Forest representation (trailer metadata plus ordered trees).

use thiserror::Error;

use super::tree::{Tree, TreeValidationError};

/// Structural validation errors for [`Forest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForestValidationError {
    #[error("tree {tree_idx}: {error}")]
    InvalidTree {
        tree_idx: usize,
        error: TreeValidationError,
    },
}

/// A loaded ensemble: trailer metadata and the ordered tree sequence.
///
/// Immutable after load. A `Forest` is read-only and can be shared across
/// threads; concurrent classification calls against the same forest are safe
/// because all per-call scratch state lives with the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    num_classes: u16,
    num_features: u16,
    trees: Vec<Tree>,
}

impl Forest {
    /// Create an empty forest with the given trailer metadata.
    pub fn new(num_classes: u16, num_features: u16) -> Self {
        Self {
            num_classes,
            num_features,
            trees: Vec::new(),
        }
    }

    /// Append a tree. Trees keep their insertion order; that order is the
    /// tree index used throughout classification results.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Number of classes the classifier distinguishes.
    #[inline]
    pub fn num_classes(&self) -> u16 {
        self.num_classes
    }

    /// Number of input features each sample must provide.
    #[inline]
    pub fn num_features(&self) -> u16 {
        self.num_features
    }

    /// Number of trees in the ensemble.
    #[inline]
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Get a specific tree by index.
    #[inline]
    pub fn tree(&self, idx: usize) -> Option<&Tree> {
        self.trees.get(idx)
    }

    /// Iterate over trees in stored order.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Validate structural invariants of every tree against the trailer.
    ///
    /// Intended for debug checks and tests; decoding defers these checks to
    /// traversal time.
    pub fn validate(&self) -> Result<(), ForestValidationError> {
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.num_features)
                .map_err(|error| ForestValidationError::InvalidTree { tree_idx: i, error })?;
        }
        Ok(())
    }
}
