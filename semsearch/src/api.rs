//! # API module
//!
//! Client for OpenAI-compatible embedding APIs. Defaults to the SiliconFlow endpoint, but any
//! service speaking the same `/embeddings` protocol works via
//! [`with_base_url`](ApiClient::with_base_url).
//!
//! Embeddings are requested in base64 form and decoded as little-endian `f32`s. Input text is
//! validated before any network round trip: empty text and text over the model's input budget
//! are rejected rather than silently truncated, since truncation would quietly change what the
//! vector means.

use super::{Embedding, SearchError};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.siliconflow.cn/v1";

/// Supported embedding models.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// `BAAI/bge-small-en-v1.5`, 384 dimensions.
    #[default]
    #[serde(rename = "BAAI/bge-small-en-v1.5")]
    BgeSmallEnV1_5,
    /// `BAAI/bge-large-en-v1.5`, 1024 dimensions.
    #[serde(rename = "BAAI/bge-large-en-v1.5")]
    BgeLargeEnV1_5,
    /// `sentence-transformers/all-MiniLM-L6-v2`, 384 dimensions. Not hosted by every provider;
    /// typically used with a self-hosted endpoint.
    #[serde(rename = "sentence-transformers/all-MiniLM-L6-v2")]
    AllMiniLmL6V2,
}

impl Model {
    /// Identifier of this model on the wire.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::BgeSmallEnV1_5 => "BAAI/bge-small-en-v1.5",
            Self::BgeLargeEnV1_5 => "BAAI/bge-large-en-v1.5",
            Self::AllMiniLmL6V2 => "sentence-transformers/all-MiniLM-L6-v2",
        }
    }

    /// Dimensionality of the embeddings this model produces.
    #[must_use]
    pub const fn dimensions(self) -> usize {
        match self {
            Self::BgeSmallEnV1_5 | Self::AllMiniLmL6V2 => 384,
            Self::BgeLargeEnV1_5 => 1024,
        }
    }

    /// Maximum input length in characters, a conservative stand-in for the model's token
    /// window. Longer input must be rejected, never truncated.
    #[must_use]
    pub const fn max_input_chars(self) -> usize {
        match self {
            Self::BgeSmallEnV1_5 | Self::BgeLargeEnV1_5 => 2048,
            Self::AllMiniLmL6V2 => 1024,
        }
    }
}

/// A client for an OpenAI-compatible embedding API.
///
/// The client is stateless apart from its configuration; one instance can serve any number of
/// [`embed`](Self::embed) calls, and identical input yields identical vectors for a fixed model.
#[derive(Debug)]
pub struct ApiClient {
    /// Underlying HTTP client.
    client: reqwest::Client,
    /// API key.
    key: String,
    /// Base URL of the API, without the trailing `/embeddings`.
    base_url: String,
    /// Model to embed with.
    model: Model,
}

/// Request body of the `/embeddings` endpoint.
#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'static str,
    input: Vec<&'a str>,
    encoding_format: &'static str,
}

/// Response body of the `/embeddings` endpoint.
#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

/// One embedding within the response.
#[derive(Deserialize)]
struct EmbeddingData {
    /// Base64-encoded little-endian `f32`s.
    embedding: String,
    /// Position of the corresponding input text.
    index: usize,
}

impl ApiClient {
    /// Create a client for the default endpoint with the given API key and model.
    ///
    /// # Errors
    ///
    /// Returns [`Request`](SearchError::Request) if the underlying HTTP client cannot be built.
    pub fn new(key: String, model: Model) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model,
        })
    }

    /// Point the client at a different OpenAI-compatible endpoint, e.g. a self-hosted one.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Model this client embeds with.
    #[must_use]
    pub const fn model(&self) -> Model {
        self.model
    }

    /// Embed a single text.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyText`](SearchError::EmptyText) or [`TextTooLong`](SearchError::TextTooLong)
    /// without touching the network if the input is invalid, [`Request`](SearchError::Request) on
    /// transport failure, and [`Response`](SearchError::Response) or
    /// [`DimensionMismatch`](SearchError::DimensionMismatch) if the API answers with a payload
    /// that does not decode to one embedding of the model's dimensionality.
    pub async fn embed(&self, text: &str) -> Result<Embedding, SearchError> {
        self.validate(text)?;
        let mut embeddings = self.request(vec![text]).await?;
        embeddings
            .pop()
            .ok_or_else(|| SearchError::Response("empty data array".to_owned()))
    }

    /// Embed a batch of texts in one request.
    ///
    /// Equivalent to calling [`embed`](Self::embed) on each text in order: the output has one
    /// embedding per input text, position for position, regardless of the order the API answers
    /// in. An empty batch yields an empty result without a request.
    ///
    /// # Errors
    ///
    /// Same as [`embed`](Self::embed); input validation covers every text in the batch.
    pub async fn embed_batch<T>(&self, texts: &[T]) -> Result<Vec<Embedding>, SearchError>
    where
        T: AsRef<str>,
    {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        for text in texts {
            self.validate(text.as_ref())?;
        }

        let input: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();
        self.request(input).await
    }

    /// Reject input the model cannot faithfully embed.
    fn validate(&self, text: &str) -> Result<(), SearchError> {
        if text.is_empty() {
            return Err(SearchError::EmptyText);
        }
        let len = text.chars().count();
        let limit = self.model.max_input_chars();
        if len > limit {
            return Err(SearchError::TextTooLong {
                len,
                limit,
                model: self.model.id(),
            });
        }
        Ok(())
    }

    /// Send one embedding request and decode the response.
    async fn request(&self, input: Vec<&str>) -> Result<Vec<Embedding>, SearchError> {
        let expected = input.len();
        let request = EmbeddingRequest {
            model: self.model.id(),
            input,
            encoding_format: "base64",
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        parse_response(&body, expected, self.model.dimensions())
    }
}

/// Decode a response body into embeddings, one per input text, in input order.
fn parse_response(
    body: &str,
    expected: usize,
    dimensions: usize,
) -> Result<Vec<Embedding>, SearchError> {
    let mut response: EmbeddingResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Response(format!("{e}; body: {body}")))?;

    if response.data.len() != expected {
        return Err(SearchError::Response(format!(
            "expected {expected} embeddings, got {}",
            response.data.len()
        )));
    }
    // Providers may answer out of input order
    response.data.sort_unstable_by_key(|data| data.index);

    response
        .data
        .iter()
        .map(|data| decode_embedding(&data.embedding, dimensions))
        .collect()
}

/// Decode one base64 payload and check its dimensionality.
fn decode_embedding(encoded: &str, dimensions: usize) -> Result<Embedding, SearchError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| SearchError::Response(format!("invalid base64 embedding: {e}")))?;
    let embedding = Embedding::from_le_bytes(&bytes)?;

    if embedding.dimensions() != dimensions {
        return Err(SearchError::DimensionMismatch {
            expected: dimensions,
            actual: embedding.dimensions(),
        });
    }
    Ok(embedding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(values: &[f32]) -> String {
        let bytes: Vec<u8> = values.iter().flat_map(|f| f.to_le_bytes()).collect();
        STANDARD.encode(bytes)
    }

    #[test]
    fn model_from_config_string() {
        let model: Model = serde_json::from_str("\"BAAI/bge-large-en-v1.5\"").unwrap();
        assert_eq!(model, Model::BgeLargeEnV1_5);
        assert_eq!(model.dimensions(), 1024);
    }

    #[test]
    fn default_model_is_384_dimensional() {
        assert_eq!(Model::default().dimensions(), 384);
    }

    #[test]
    fn request_body_shape() {
        let request = EmbeddingRequest {
            model: Model::BgeSmallEnV1_5.id(),
            input: vec!["hello", "world"],
            encoding_format: "base64",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "BAAI/bge-small-en-v1.5");
        assert_eq!(json["input"][1], "world");
        assert_eq!(json["encoding_format"], "base64");
    }

    #[test]
    fn response_restores_input_order() {
        // Answer deliberately out of input order
        let body = format!(
            r#"{{"data": [{{"embedding": "{}", "index": 1}}, {{"embedding": "{}", "index": 0}}]}}"#,
            encode(&[0.0, 1.0]),
            encode(&[1.0, 0.0]),
        );

        let embeddings = parse_response(&body, 2, 2).unwrap();
        assert_eq!(*embeddings[0], [1.0, 0.0]);
        assert_eq!(*embeddings[1], [0.0, 1.0]);
    }

    #[test]
    fn response_count_mismatch() {
        let body = format!(
            r#"{{"data": [{{"embedding": "{}", "index": 0}}]}}"#,
            encode(&[1.0, 0.0]),
        );
        let err = parse_response(&body, 2, 2).unwrap_err();
        assert!(matches!(err, SearchError::Response(_)));
    }

    #[test]
    fn response_wrong_dimensionality() {
        let body = format!(
            r#"{{"data": [{{"embedding": "{}", "index": 0}}]}}"#,
            encode(&[1.0, 0.0, 0.0]),
        );
        let err = parse_response(&body, 1, 2).unwrap_err();
        assert!(matches!(
            err,
            SearchError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn response_not_json() {
        let err = parse_response("gateway timeout", 1, 2).unwrap_err();
        assert!(matches!(err, SearchError::Response(_)));
    }

    #[test]
    fn garbled_base64() {
        let err = decode_embedding("not base64!!!", 2).unwrap_err();
        assert!(matches!(err, SearchError::Response(_)));
    }

    #[tokio::test]
    async fn embed_rejects_empty_text() {
        let api = ApiClient::new("test_key".to_owned(), Model::default()).unwrap();
        let err = api.embed("").await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyText));
    }

    #[tokio::test]
    async fn embed_rejects_oversized_text() {
        let api = ApiClient::new("test_key".to_owned(), Model::default()).unwrap();
        let text = "a".repeat(Model::default().max_input_chars() + 1);
        let err = api.embed(&text).await.unwrap_err();
        assert!(matches!(err, SearchError::TextTooLong { .. }));
    }

    #[tokio::test]
    async fn batch_validates_every_text() {
        let api = ApiClient::new("test_key".to_owned(), Model::default()).unwrap();
        let err = api.embed_batch(&["fine", ""]).await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyText));
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let api = ApiClient::new("test_key".to_owned(), Model::default()).unwrap();
        let embeddings = api.embed_batch::<&str>(&[]).await.unwrap();
        assert!(embeddings.is_empty());
    }
}
