//! High-level classifier model.
//!
//! Wraps a [`Forest`] together with an [`EnsembleVisitor`] and a
//! [`MajorityVoter`] into a single load-then-classify interface.

use std::path::Path;

use rayon::prelude::*;
use thiserror::Error;

use crate::inference::{
    ClassificationStatus, EnsembleResult, EnsembleVisitor, MajorityVoter, VoteResult,
};
use crate::io::{decode_forest, encode_forest, DecodeError, EncodeError};
use crate::repr::Forest;

/// Errors that can occur while loading a model from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result of classifying one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Winning label, or `None` if no tree contributed a valid vote.
    pub label: Option<i16>,
    /// Vote count of the winning label.
    pub votes: u16,
    /// `Ok` only if every tree reached a leaf.
    pub status: ClassificationStatus,
    /// Per-tree outcomes, aligned by tree index.
    pub per_tree: EnsembleResult,
}

/// A loaded random-forest classifier.
///
/// Immutable after construction; classification calls borrow it read-only,
/// so a single model can serve concurrent callers.
///
/// # Example
///
/// ```ignore
/// use rforest::RandomForestModel;
///
/// let model = RandomForestModel::load("statlog_rf5.bin")?;
/// let result = model.classify(&[5.0, 121.0, 1.0]);
/// println!("label {:?} with {} votes", result.label, result.votes);
/// ```
#[derive(Debug, Clone)]
pub struct RandomForestModel {
    forest: Forest,
    visitor: EnsembleVisitor,
    voter: MajorityVoter,
}

impl RandomForestModel {
    /// Wrap an in-memory forest. The voter is sized by the forest's trailer.
    pub fn from_forest(forest: Forest) -> Self {
        let voter = MajorityVoter::new(forest.num_classes());
        Self {
            forest,
            visitor: EnsembleVisitor::new(),
            voter,
        }
    }

    /// Decode a model from its binary serialization.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode_forest(bytes).map(Self::from_forest)
    }

    /// Read and decode a model file.
    ///
    /// The read is one bulk operation; cancellation is the caller's concern
    /// and no partial state is retained on failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes)?)
    }

    /// Encode the model back into its binary serialization.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        encode_forest(&self.forest)
    }

    /// The underlying forest.
    #[inline]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Number of trees in the ensemble.
    #[inline]
    pub fn num_trees(&self) -> usize {
        self.forest.num_trees()
    }

    /// Classify one sample: visit every tree, then majority-vote the labels.
    ///
    /// Single-threaded and synchronous; all scratch state is local to the
    /// call.
    pub fn classify(&self, features: &[f64]) -> Classification {
        let per_tree = self.visitor.visit(&self.forest, features);
        let VoteResult { leader, count } = self.voter.vote(per_tree.labels());

        Classification {
            label: leader,
            votes: count,
            status: per_tree.status(),
            per_tree,
        }
    }

    /// Classify a batch of samples, parallelized across samples.
    ///
    /// Each sample is still a single-threaded classification call; results
    /// keep input order.
    pub fn classify_batch(&self, samples: &[&[f64]]) -> Vec<Classification> {
        samples
            .par_iter()
            .map(|features| self.classify(features))
            .collect()
    }
}
