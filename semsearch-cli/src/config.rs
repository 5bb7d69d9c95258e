//! Configuration file parser.

use anyhow::Result as AnyResult;
use std::path::Path;

use semsearch::{Model, RelevanceThresholds};
use serde::Deserialize;

/// Structure of the configuration file.
#[derive(Deserialize, Debug)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// Relevance band thresholds.
    #[serde(default)]
    pub relevance: RelevanceThresholds,
}

/// API configuration.
#[derive(Deserialize, Debug)]
pub struct ApiConfig {
    /// API key for the embedding service.
    pub key: String,
    /// Model to use for embedding.
    #[serde(default)]
    pub model: Model,
    /// Base URL of an alternative OpenAI-compatible endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Parse the configuration into a `Config` structure.
///
/// # Errors
///
/// Returns an [`Error`](toml::de::Error) if the configuration file is not valid, like missing fields.
fn parse_config_from_str(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Parse the configuration file into a `Config` structure.
///
/// # Errors
///
/// Returns an [IO error](std::io::Error) if reading fails, or a [TOML error](toml::de::Error) if parsing fails.
pub fn parse_config<T>(path: T) -> AnyResult<Config>
where
    T: AsRef<Path>,
{
    let content = std::fs::read_to_string(path)?;
    Ok(parse_config_from_str(&content)?)
}
