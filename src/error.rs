//! Error types.

use thiserror::Error;

/// Canonical-encoding failure for a payload value.
///
/// The payload type is a closed universe of encodable scalars, so
/// "unsupported type" cannot arise past construction; the only value with
/// no canonical representation is a non-finite float, which JSON cannot
/// carry either.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("field `{field}` holds a non-finite number")]
    NonFiniteNumber { field: String },
}
