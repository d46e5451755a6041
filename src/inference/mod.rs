//! Classification: per-tree traversal, ensemble fan-out, majority voting.

pub mod ensemble;
pub mod traversal;
pub mod voting;

pub use ensemble::{ClassificationStatus, EnsembleResult, EnsembleVisitor, TreeOutcome};
pub use traversal::{CorruptModel, TraversalError, TreeWalker, WalkOutcome};
pub use voting::{MajorityVoter, VoteResult};
