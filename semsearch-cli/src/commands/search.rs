//! `search` subcommand

use super::api_client;
use crate::Config;
use anyhow::{Context, Result, ensure};
use argh::FromArgs;
use log::{debug, info};
use semsearch::{Document, Relevance, SimilarityIndex};

/// search a document collection by meaning
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand, name = "search", help_triggers("-h", "--help"))]
pub struct Search {
    /// query string
    #[argh(positional)]
    pub query: String,
    /// number of results to show
    #[argh(option, short = 'n', default = "5")]
    pub num_results: usize,
    /// path to a newline-delimited documents file
    #[argh(option, short = 'd', default = "String::from(\"documents.txt\")")]
    pub documents: String,
}

impl Search {
    /// Embed the document collection and the query, then rank.
    pub async fn execute(&self, config: &Config) -> Result<Vec<(String, f32, Relevance)>> {
        let content = std::fs::read_to_string(&self.documents)
            .with_context(|| format!("Failed to read documents from {}", self.documents))?;
        let documents: Vec<Document> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, line)| Document::new((i + 1).to_string(), line))
            .collect();
        ensure!(
            !documents.is_empty(),
            "No documents found in {}",
            self.documents
        );
        info!("Embedding {} document(s)...", documents.len());

        let api = api_client(config)?;
        let texts: Vec<&str> = documents.iter().map(Document::text).collect();
        let embeddings = api.embed_batch(&texts).await?;
        let index = SimilarityIndex::build(documents, embeddings)?;
        debug!(
            "Built index over {} document(s), {} dimensions",
            index.len(),
            index.dimensions()
        );

        let query_embedding = api.embed(&self.query).await?;
        let results = index.search(&query_embedding, self.num_results)?;

        Ok(results
            .into_iter()
            .map(|result| {
                let band = config.relevance.band(result.score);
                (result.document.text().to_owned(), result.score, band)
            })
            .collect())
    }
}
