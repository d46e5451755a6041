//! Fixed-width binary codec for serialized forests.
//!
//! # Format Structure
//!
//! All integers are little-endian, fixed width:
//!
//! ```text
//! Trailer:      u16 num_classes, u16 num_features, u16 num_trees
//! Per tree:     u16 node_count
//!               node_count × NodeRecord
//! NodeRecord:   u16 feature_index, u8 operator_code (0..5),
//!               f64 threshold, i16 label,
//!               i32 left_index (-1 = absent), i32 right_index (-1 = absent)
//! ```
//!
//! Nodes appear in arena order; index 0 is the root. Decoding is
//! all-or-nothing: any failure returns an error and no partial forest.
//!
//! The decoder checks record-local structure eagerly (operator code range,
//! child indices that cannot fit the declared arena). Deeper semantic
//! checks — feature-index bounds, acyclicity — are deferred to traversal
//! time, which enforces them through typed errors and a step bound.

use thiserror::Error;
use tracing::debug;

use crate::repr::{Forest, Node, NodeId, Operator, Tree};

// ============================================================================
// Constants
// ============================================================================

/// Size of the model trailer in bytes.
pub const TRAILER_SIZE: usize = 6;

/// Size of one node record in bytes.
pub const NODE_RECORD_SIZE: usize = 21;

/// Wire marker for an absent child reference.
const CHILD_ABSENT: i32 = -1;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while decoding a serialized forest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes remain than the trailer or a declared node block requires.
    #[error("input truncated: {expected} more bytes required, {actual} available")]
    TruncatedInput { expected: usize, actual: usize },

    /// A record decoded to structurally invalid field values.
    #[error("malformed record (tree {tree}, node {node}): {reason}")]
    MalformedRecord {
        tree: u16,
        node: u16,
        reason: String,
    },

    /// Bytes remain after the last declared tree.
    #[error("{remaining} trailing bytes after the last tree")]
    TrailingBytes { remaining: usize },
}

/// Errors that can occur while encoding a forest.
///
/// The format stores tree and node counts as `u16`; larger forests have no
/// binary representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("forest has {num_trees} trees, exceeding the format limit of {limit}", limit = u16::MAX)]
    TooManyTrees { num_trees: usize },

    #[error("tree {tree} has {num_nodes} nodes, exceeding the format limit of {limit}", limit = u16::MAX)]
    TreeTooLarge { tree: usize, num_nodes: usize },
}

// ============================================================================
// Byte Reader
// ============================================================================

/// Cursor over the input buffer with length-checked fixed-width reads.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        if self.remaining() < N {
            return Err(DecodeError::TruncatedInput {
                expected: N,
                actual: self.remaining(),
            });
        }
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take::<1>()?[0])
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    fn read_i16(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.take()?))
    }

    fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.take()?))
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a forest from its binary representation.
///
/// Returns the loaded [`Forest`] or the first error encountered. On error no
/// partial forest is produced.
pub fn decode_forest(bytes: &[u8]) -> Result<Forest, DecodeError> {
    let mut reader = ByteReader::new(bytes);

    let num_classes = reader.read_u16()?;
    let num_features = reader.read_u16()?;
    let num_trees = reader.read_u16()?;

    let mut forest = Forest::new(num_classes, num_features);
    let mut total_nodes = 0usize;

    for tree_idx in 0..num_trees {
        let node_count = reader.read_u16()?;
        let mut nodes = Vec::with_capacity(node_count as usize);

        for node_idx in 0..node_count {
            nodes.push(decode_node(&mut reader, tree_idx, node_idx, node_count)?);
        }

        total_nodes += nodes.len();
        forest.push_tree(Tree::from_nodes(nodes));
    }

    if reader.remaining() > 0 {
        return Err(DecodeError::TrailingBytes {
            remaining: reader.remaining(),
        });
    }

    debug!(
        num_classes,
        num_features, num_trees, total_nodes, "decoded forest"
    );
    Ok(forest)
}

fn decode_node(
    reader: &mut ByteReader<'_>,
    tree: u16,
    node: u16,
    node_count: u16,
) -> Result<Node, DecodeError> {
    let feature_index = reader.read_u16()?;
    let operator_code = reader.read_u8()?;
    let threshold = reader.read_f64()?;
    let label = reader.read_i16()?;
    let left = reader.read_i32()?;
    let right = reader.read_i32()?;

    let operator = Operator::from_code(operator_code).map_err(|e| DecodeError::MalformedRecord {
        tree,
        node,
        reason: e.to_string(),
    })?;

    Ok(Node {
        feature_index,
        operator,
        threshold,
        label,
        left: decode_child(left, node_count, tree, node)?,
        right: decode_child(right, node_count, tree, node)?,
    })
}

fn decode_child(
    raw: i32,
    node_count: u16,
    tree: u16,
    node: u16,
) -> Result<Option<NodeId>, DecodeError> {
    match raw {
        CHILD_ABSENT => Ok(None),
        idx if idx >= 0 && (idx as u32) < u32::from(node_count) => Ok(Some(idx as NodeId)),
        idx => Err(DecodeError::MalformedRecord {
            tree,
            node,
            reason: format!("child index {idx} cannot fit a {node_count}-node tree"),
        }),
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode a forest into its binary representation.
///
/// The inverse of [`decode_forest`]: decoding the returned bytes yields an
/// identical forest. Fails if the forest exceeds the format's fixed widths.
pub fn encode_forest(forest: &Forest) -> Result<Vec<u8>, EncodeError> {
    let num_trees = u16::try_from(forest.num_trees()).map_err(|_| EncodeError::TooManyTrees {
        num_trees: forest.num_trees(),
    })?;

    let total_nodes: usize = forest.trees().map(Tree::num_nodes).sum();
    let mut out =
        Vec::with_capacity(TRAILER_SIZE + forest.num_trees() * 2 + total_nodes * NODE_RECORD_SIZE);

    out.extend_from_slice(&forest.num_classes().to_le_bytes());
    out.extend_from_slice(&forest.num_features().to_le_bytes());
    out.extend_from_slice(&num_trees.to_le_bytes());

    for (tree_idx, tree) in forest.trees().enumerate() {
        let node_count =
            u16::try_from(tree.num_nodes()).map_err(|_| EncodeError::TreeTooLarge {
                tree: tree_idx,
                num_nodes: tree.num_nodes(),
            })?;
        out.extend_from_slice(&node_count.to_le_bytes());

        for node in tree.nodes() {
            out.extend_from_slice(&node.feature_index.to_le_bytes());
            out.push(node.operator.code());
            out.extend_from_slice(&node.threshold.to_le_bytes());
            out.extend_from_slice(&node.label.to_le_bytes());
            out.extend_from_slice(&encode_child(node.left).to_le_bytes());
            out.extend_from_slice(&encode_child(node.right).to_le_bytes());
        }
    }

    Ok(out)
}

fn encode_child(child: Option<NodeId>) -> i32 {
    match child {
        Some(id) => id as i32,
        None => CHILD_ABSENT,
    }
}

// ============================================================================
// Tests
// ============================================================================
