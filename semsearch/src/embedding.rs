//! # Embedding module
//!
//! Embedding type, representation, conversion and calculation. Assumes little-endian byte order.
//!
//! ## Representation
//!
//! An embedding is a vector of 32-bit floating point numbers. Its dimensionality is decided by
//! the model that produced it (384 for the default model), so [`Embedding`] wraps a `Vec<f32>`
//! rather than a fixed-size array, and caches the Euclidean norm alongside it.
//!
//! ## Conversion
//!
//! - [`Embedding`] can be converted from `Vec<f32>`.
//! - [`Embedding`] can be decoded from and encoded to little-endian bytes, which is how
//!   embedding APIs ship vectors in base64 form.
//! - [`Embedding`] immutably dereferences to `[f32]`.
//!
//! ## Calculation
//!
//! Cosine similarity between two embeddings can be calculated using
//! [`cosine_similarity`](Embedding::cosine_similarity). Both embeddings must have the same
//! dimensionality and a non-zero norm.

use super::SearchError;
use std::ops::Deref;

/// Wrapped embedding representation.
///
/// See [module-level documentation](crate::embedding) for more details.
#[derive(Debug, Clone)]
pub struct Embedding {
    inner: Vec<f32>,
    norm: f32,
}

impl Embedding {
    /// Number of components in this embedding.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.inner.len()
    }

    /// Whether this embedding has zero norm. A zero-norm vector has no direction, so it cannot
    /// take part in a similarity calculation.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.norm < f32::EPSILON
    }

    /// Calculate cosine similarity between two embeddings.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionMismatch`](SearchError::DimensionMismatch) if the dimensionalities
    /// differ, or [`ZeroVector`](SearchError::ZeroVector) if either embedding has zero norm.
    pub fn cosine_similarity(&self, other: &Self) -> Result<f32, SearchError> {
        if self.dimensions() != other.dimensions() {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        if self.is_zero() || other.is_zero() {
            return Err(SearchError::ZeroVector);
        }

        let dot_product = self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| a * b)
            .sum::<f32>();
        Ok(dot_product / (self.norm * other.norm))
    }

    /// Decode an embedding from little-endian bytes.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidByteLength`](SearchError::InvalidByteLength) if the byte count is not a
    /// multiple of 4.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, SearchError> {
        if bytes.len() % 4 != 0 {
            return Err(SearchError::InvalidByteLength(bytes.len()));
        }

        let inner = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap())) // Safe to unwrap, as we know the length is 4
            .collect();
        Ok(Self::from_vec(inner))
    }

    /// Encode this embedding as little-endian bytes.
    #[must_use]
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn from_vec(inner: Vec<f32>) -> Self {
        let norm = inner.iter().map(|a| a * a).sum::<f32>().sqrt();
        Self { inner, norm }
    }
}

impl From<Vec<f32>> for Embedding {
    /// Convert `Vec<f32>` to `Embedding`, caching its norm.
    fn from(inner: Vec<f32>) -> Self {
        Self::from_vec(inner)
    }
}

impl PartialEq for Embedding {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Deref for Embedding {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

// Should not mutate the inner representation, since `norm` is cached based on it

#[cfg(test)]
mod tests {
    use super::*;

    const EMBEDDING_FLOAT: f32 = 1.14; // 0x3F91EB85
    const EMBEDDING_CHUNK: [u8; 4] = [0x85, 0xEB, 0x91, 0x3F];

    #[test]
    fn embedding_from_bytes() {
        let bytes: Vec<u8> = EMBEDDING_CHUNK.repeat(384);

        let embedding = Embedding::from_le_bytes(&bytes).unwrap();
        assert_eq!(embedding.dimensions(), 384);
        embedding
            .iter()
            .for_each(|&f| assert_eq!(f, EMBEDDING_FLOAT));
    }

    #[test]
    fn bytes_from_embedding() {
        let embedding = Embedding::from(vec![EMBEDDING_FLOAT; 384]);
        let bytes = embedding.to_le_bytes();

        bytes.chunks_exact(4).for_each(|chunk| {
            assert_eq!(chunk, EMBEDDING_CHUNK);
        });
    }

    #[test]
    fn ragged_bytes() {
        let err = Embedding::from_le_bytes(&[0x00; 7]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidByteLength(7)));
    }

    #[test]
    fn similar_to_self() {
        let embedding = Embedding::from(vec![EMBEDDING_FLOAT; 384]);
        let similarity = embedding.cosine_similarity(&embedding).unwrap();
        let delta = (similarity - 1.0).abs();
        // Approximate equality
        assert!(delta <= f32::EPSILON);
    }

    #[test]
    fn symmetric() {
        let a = Embedding::from(vec![0.3, -1.2, 0.8]);
        let b = Embedding::from(vec![1.0, 0.5, -0.1]);
        assert_eq!(
            a.cosine_similarity(&b).unwrap(),
            b.cosine_similarity(&a).unwrap()
        );
    }

    #[test]
    fn within_range() {
        let pairs = [
            (vec![1.0, 0.0], vec![-1.0, 0.0]),
            (vec![1.0, 0.0], vec![0.0, 1.0]),
            (vec![0.7, 0.7], vec![0.7, 0.7]),
            (vec![3.0, -4.0], vec![-6.0, 8.0]),
        ];
        for (a, b) in pairs {
            let similarity = Embedding::from(a)
                .cosine_similarity(&Embedding::from(b))
                .unwrap();
            assert!((-1.0 - f32::EPSILON..=1.0 + f32::EPSILON).contains(&similarity));
        }
    }

    #[test]
    fn mismatched_dimensions() {
        let a = Embedding::from(vec![1.0, 0.0, 0.0]);
        let b = Embedding::from(vec![1.0, 0.0]);
        let err = a.cosine_similarity(&b).unwrap_err();
        assert!(matches!(
            err,
            SearchError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn zero_norm() {
        let zero = Embedding::from(vec![0.0; 4]);
        let other = Embedding::from(vec![1.0; 4]);
        assert!(zero.is_zero());
        assert!(matches!(
            zero.cosine_similarity(&other).unwrap_err(),
            SearchError::ZeroVector
        ));
        assert!(matches!(
            other.cosine_similarity(&zero).unwrap_err(),
            SearchError::ZeroVector
        ));
    }
}
