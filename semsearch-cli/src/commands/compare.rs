//! `compare` subcommand

use super::api_client;
use crate::Config;
use anyhow::{Context, Result};
use argh::FromArgs;
use semsearch::Relevance;

/// compare the semantic similarity of two texts
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "compare", help_triggers("-h", "--help"))]
pub struct Compare {
    /// first text
    #[argh(positional)]
    pub first: String,
    /// second text
    #[argh(positional)]
    pub second: String,
}

impl Compare {
    /// Embed both texts in one batch and score them against each other.
    pub async fn execute(&self, config: &Config) -> Result<(f32, Relevance)> {
        let api = api_client(config)?;
        let embeddings = api
            .embed_batch(&[self.first.as_str(), self.second.as_str()])
            .await?;
        let similarity = embeddings[0]
            .cosine_similarity(&embeddings[1])
            .with_context(|| "Failed to compare embeddings")?;
        Ok((similarity, config.relevance.band(similarity)))
    }
}
