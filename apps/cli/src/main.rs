//! coursechef CLI — SCORM course import pipeline.
//!
//! Stages course archives from the cloud file store, repackages SCORM
//! lessons as self-contained web bundles, and publishes the channel tree.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
