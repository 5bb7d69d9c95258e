//! `embed` subcommand

use super::api_client;
use crate::Config;
use anyhow::Result;
use argh::FromArgs;
use semsearch::Embedding;

/// embed a text and show the resulting vector
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "embed", help_triggers("-h", "--help"))]
pub struct Embed {
    /// text to embed
    #[argh(positional)]
    pub text: String,
}

impl Embed {
    /// Embed the text via the configured API.
    pub async fn execute(&self, config: &Config) -> Result<Embedding> {
        let api = api_client(config)?;
        let embedding = api.embed(&self.text).await?;
        Ok(embedding)
    }
}
