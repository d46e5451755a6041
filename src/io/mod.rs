//! Binary model serialization.

pub mod codec;

pub use codec::{decode_forest, encode_forest, DecodeError, EncodeError, NODE_RECORD_SIZE, TRAILER_SIZE};
