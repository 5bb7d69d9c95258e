//! Subcommands for the Semsearch CLI.

mod compare;
mod embed;
mod search;

use crate::Config;
use anyhow::Result;
use argh::FromArgs;
use semsearch::ApiClient;

/// Possible commands.
#[derive(FromArgs, PartialEq, Eq, Debug)]
#[argh(subcommand)]
pub enum Command {
    /// An embed command.
    Embed(embed::Embed),
    /// A compare command.
    Compare(compare::Compare),
    /// A search command.
    Search(search::Search),
}

/// Construct the API client described by the configuration.
fn api_client(config: &Config) -> Result<ApiClient> {
    let api = ApiClient::new(config.api.key.clone(), config.api.model)?;
    let api = match &config.api.base_url {
        Some(base_url) => api.with_base_url(base_url),
        None => api,
    };
    Ok(api)
}
