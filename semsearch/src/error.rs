//! # Error module
//!
//! Possible errors.

use thiserror::Error;

/// Possible errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Tried to build an index over an empty document collection.
    #[error("cannot build an index over an empty document collection")]
    EmptyCollection,
    /// A vector or collection length differs from what the operation expects.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The length the operation expects.
        expected: usize,
        /// The length it actually got.
        actual: usize,
    },
    /// Cosine similarity against a zero-norm vector is undefined.
    #[error("cosine similarity is undefined for a zero-norm vector")]
    ZeroVector,
    /// `search` was called with a result count of zero.
    #[error("result count must be at least 1, got {0}")]
    InvalidTopK(usize),
    /// Empty text was submitted for embedding.
    #[error("cannot embed empty text")]
    EmptyText,
    /// Text submitted for embedding exceeds the model's input limit.
    #[error("text of {len} characters exceeds the {limit} character limit of {model}")]
    TextTooLong {
        /// Character count of the submitted text.
        len: usize,
        /// Character limit of the model.
        limit: usize,
        /// Identifier of the model.
        model: &'static str,
    },
    /// An embedding byte payload is not a whole number of `f32`s.
    #[error("embedding byte length {0} is not a multiple of 4")]
    InvalidByteLength(usize),
    /// The embedding request could not be sent or failed on the wire.
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The embedding API answered with a payload we cannot use.
    #[error("malformed embedding response: {0}")]
    Response(String),
}
