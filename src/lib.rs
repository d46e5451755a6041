//! rforest: an inference runtime for serialized random-forest classifiers.
//!
//! This crate evaluates a pre-trained decision-tree ensemble against feature
//! vectors. Models are read from a compact fixed-width binary serialization
//! into an arena-backed [`Forest`]; classification visits every tree with a
//! bounded state-machine traversal and resolves the final label by majority
//! vote. There is no training and no dynamic model construction.
//!
//! # Key Types
//!
//! - [`RandomForestModel`] - load a model and classify samples
//! - [`Forest`] / [`Tree`] / [`Node`] - the in-memory representation
//! - [`EnsembleVisitor`] / [`TreeWalker`] - traversal engine
//! - [`MajorityVoter`] - tally and tie-break over per-tree labels
//!
//! # Loading and Classifying
//!
//! ```ignore
//! use rforest::RandomForestModel;
//!
//! let model = RandomForestModel::load("model.bin")?;
//! let result = model.classify(&features);
//! ```

pub mod inference;
pub mod io;
pub mod model;
pub mod repr;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use model::{Classification, LoadError, RandomForestModel};

pub use inference::{
    ClassificationStatus, CorruptModel, EnsembleResult, EnsembleVisitor, MajorityVoter,
    TraversalError, TreeOutcome, TreeWalker, VoteResult, WalkOutcome,
};

pub use io::{decode_forest, encode_forest, DecodeError, EncodeError};

pub use repr::{Forest, InvalidOperator, Node, NodeId, Operator, Tree, TreeBuilder};
