//! # Index module
//!
//! In-memory similarity index: a fixed collection of documents paired with their embeddings,
//! searched by a full linear scan over cosine similarity.
//!
//! The index is built once with [`SimilarityIndex::build`] and is read-only afterwards. All
//! methods take `&self`, so a built index can be searched from multiple threads without
//! synchronization.

use super::{Embedding, SearchError};

/// A text document held by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: String,
    text: String,
}

impl Document {
    /// Create a document from an identifier and its text payload.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Identifier of this document.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Text payload of this document.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One ranked search result.
#[derive(Debug, Clone, Copy)]
pub struct ScoredResult<'a> {
    /// The matched document.
    pub document: &'a Document,
    /// Position of the document in the collection the index was built from.
    pub index: usize,
    /// Cosine similarity between the query and the document.
    pub score: f32,
}

/// Fixed collection of (document, embedding) pairs, ranked by cosine similarity against a query
/// embedding.
///
/// Every embedding in the index shares one dimensionality, fixed when the index is built and
/// exposed via [`dimensions`](Self::dimensions).
#[derive(Debug)]
pub struct SimilarityIndex {
    entries: Vec<(Document, Embedding)>,
    dimensions: usize,
}

impl SimilarityIndex {
    /// Build an index over parallel collections of documents and their embeddings, where entry
    /// `i` pairs `documents[i]` with `embeddings[i]`.
    ///
    /// # Errors
    ///
    /// - [`EmptyCollection`](SearchError::EmptyCollection) if `documents` is empty.
    /// - [`DimensionMismatch`](SearchError::DimensionMismatch) if the two collections differ in
    ///   length, or if the embeddings do not all share one dimensionality.
    /// - [`ZeroVector`](SearchError::ZeroVector) if any embedding has zero norm. Rejecting those
    ///   here means a built index can only fail a search through the query itself.
    pub fn build(
        documents: Vec<Document>,
        embeddings: Vec<Embedding>,
    ) -> Result<Self, SearchError> {
        if documents.is_empty() {
            return Err(SearchError::EmptyCollection);
        }
        if documents.len() != embeddings.len() {
            return Err(SearchError::DimensionMismatch {
                expected: documents.len(),
                actual: embeddings.len(),
            });
        }

        let dimensions = embeddings[0].dimensions();
        for embedding in &embeddings {
            if embedding.dimensions() != dimensions {
                return Err(SearchError::DimensionMismatch {
                    expected: dimensions,
                    actual: embedding.dimensions(),
                });
            }
            if embedding.is_zero() {
                return Err(SearchError::ZeroVector);
            }
        }

        let entries = documents.into_iter().zip(embeddings).collect();
        Ok(Self {
            entries,
            dimensions,
        })
    }

    /// Number of documents in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no documents. Always `false` for a successfully built index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dimensionality shared by every embedding in the index.
    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Rank every document against the query embedding and return the `top_k` best matches in
    /// strictly descending score order. When two documents score equally, the one that appeared
    /// earlier in the collection passed to [`build`](Self::build) ranks first, so identical
    /// inputs always produce identical output. If `top_k` exceeds the collection size, all
    /// documents are returned.
    ///
    /// # Errors
    ///
    /// - [`InvalidTopK`](SearchError::InvalidTopK) if `top_k` is zero.
    /// - [`DimensionMismatch`](SearchError::DimensionMismatch) if the query dimensionality
    ///   differs from the index's.
    /// - [`ZeroVector`](SearchError::ZeroVector) if the query has zero norm.
    pub fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<ScoredResult<'_>>, SearchError> {
        if top_k == 0 {
            return Err(SearchError::InvalidTopK(top_k));
        }
        if query.dimensions() != self.dimensions {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.dimensions(),
            });
        }

        let mut results = Vec::with_capacity(self.entries.len());
        for (index, (document, embedding)) in self.entries.iter().enumerate() {
            let score = query.cosine_similarity(embedding)?;
            results.push(ScoredResult {
                document,
                index,
                score,
            });
        }

        // Stable sort, so equal scores keep insertion order
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);

        Ok(results)
    }
}
