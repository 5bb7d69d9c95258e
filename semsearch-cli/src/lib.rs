//! # Semsearch CLI
//!
//! This library provides basic functionality for the semantic search CLI.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, reason = "Dependencies")]

pub mod commands;
mod config;

use anyhow::Result;
use argh::FromArgs;
use commands::Command;
pub use config::{ApiConfig, Config, parse_config};
use log::debug;

/// How many leading components of an embedding to print.
const PREVIEW_COMPONENTS: usize = 8;

/// 🔎 Semantic search.
#[derive(FromArgs, Debug)]
#[argh(help_triggers("-h", "--help"))]
pub struct Args {
    /// the command to execute.
    #[argh(subcommand)]
    pub command: Command,
}

/// Execute the command.
///
/// # Errors
///
/// Returns an error if the command fails, like an unreadable documents file or a failed
/// embedding request.
pub async fn execute(command: Command, config: Config) -> Result<()> {
    debug!("Executing command: {:?}", command);
    debug!("Config: {:?}", config);

    match command {
        Command::Embed(embed) => {
            let embedding = embed.execute(&config).await?;
            let preview = embedding
                .iter()
                .take(PREVIEW_COMPONENTS)
                .map(|x| format!("{x:.4}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "[{preview}, ...] ({} dimensions)",
                embedding.dimensions()
            );
        }
        Command::Compare(compare) => {
            let (similarity, band) = compare.execute(&config).await?;
            println!("{similarity:.3} ({band} relevance)");
        }
        Command::Search(search) => {
            let results = search.execute(&config).await?;
            for (rank, (text, similarity, band)) in results.iter().enumerate() {
                let percent = similarity * 100.0;
                println!("{}. {percent:.2}% ({band}): {text}", rank + 1);
            }
        }
    };

    Ok(())
}
