//! Tree node types and split operators.

use thiserror::Error;

use super::NodeId;

/// Error for an operator code outside the defined range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid operator code {0} (expected 0..=5)")]
pub struct InvalidOperator(pub u8);

/// Comparison operator applied at a split node.
///
/// The left branch is taken when the operator holds for
/// `(feature_value, threshold)`. All comparisons are exact; there is no
/// tolerance for floating-point noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Operator {
    /// Less-or-equal: `value <= threshold`
    Le = 0,
    /// Less-than: `value < threshold`
    Lt = 1,
    /// Greater-or-equal: `value >= threshold`
    Ge = 2,
    /// Greater-than: `value > threshold`
    Gt = 3,
    /// Equal: `value == threshold`
    Eq = 4,
    /// Not-equal: `value != threshold`
    Ne = 5,
}

impl Operator {
    /// Convert from a wire code, rejecting values outside `0..=5`.
    pub fn from_code(code: u8) -> Result<Self, InvalidOperator> {
        match code {
            0 => Ok(Self::Le),
            1 => Ok(Self::Lt),
            2 => Ok(Self::Ge),
            3 => Ok(Self::Gt),
            4 => Ok(Self::Eq),
            5 => Ok(Self::Ne),
            other => Err(InvalidOperator(other)),
        }
    }

    /// Wire code for this operator.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Evaluate the operator for a feature value and a threshold.
    #[inline]
    pub fn apply(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Le => value <= threshold,
            Self::Lt => value < threshold,
            Self::Ge => value >= threshold,
            Self::Gt => value > threshold,
            Self::Eq => value == threshold,
            Self::Ne => value != threshold,
        }
    }
}

/// A node in a decision tree.
///
/// Children are indices into the owning tree's node arena; `None` is the
/// absent marker (`-1` on the wire). A node with both children absent is a
/// leaf, a node with both present is a split, and a node with exactly one
/// child absent sits on a pruning boundary: reaching the absent side ends
/// the visit with a pruned outcome instead of a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Index of the feature compared at this node (split nodes only).
    pub feature_index: u16,
    /// Comparison operator for the split.
    pub operator: Operator,
    /// Threshold the feature value is compared against.
    pub threshold: f64,
    /// Class label emitted when this node terminates the visit as a leaf.
    pub label: i16,
    /// Left child, taken when the operator holds.
    pub left: Option<NodeId>,
    /// Right child, taken when the operator does not hold.
    pub right: Option<NodeId>,
}

impl Node {
    /// Create a split node.
    pub fn split(
        feature_index: u16,
        operator: Operator,
        threshold: f64,
        left: NodeId,
        right: NodeId,
    ) -> Self {
        Self {
            feature_index,
            operator,
            threshold,
            label: -1,
            left: Some(left),
            right: Some(right),
        }
    }

    /// Create a leaf node carrying a class label.
    pub fn leaf(label: i16) -> Self {
        Self {
            feature_index: 0,
            operator: Operator::Le,
            threshold: 0.0,
            label,
            left: None,
            right: None,
        }
    }

    /// Returns true if this node is a leaf (both children absent).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns true if this node is a full split (both children present).
    #[inline]
    pub fn is_split(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}
