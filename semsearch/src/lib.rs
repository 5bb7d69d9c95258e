//! # Semsearch Library
//!
//! `semsearch` is a library for searching semantically similar documents.
//!
//! To be specific, it helps you get embeddings of texts and search for top-k similar documents,
//! where similarity is defined by cosine similarity of embeddings. Embeddings come from an
//! external model behind [`ApiClient`]; [`SimilarityIndex`] owns the document vectors and the
//! ranked search over them, and nothing else — no persistence, no approximate indexing, no
//! incremental updates.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::nursery, clippy::pedantic, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, reason = "Dependencies")]

mod api;
mod embedding;
mod error;
mod index;
mod relevance;

pub use api::{ApiClient, Model};
pub use embedding::Embedding;
pub use error::SearchError;
pub use index::{Document, ScoredResult, SimilarityIndex};
pub use relevance::{Relevance, RelevanceThresholds};
