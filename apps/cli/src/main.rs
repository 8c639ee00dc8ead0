//! Pipeline showcase CLI — renders Snakemake pipeline cards into site pages.
//!
//! Lists an organization's repositories, finds the ones that ship a
//! Snakefile, and writes cards for them (or for a pre-built pipelines
//! document) into the page's container elements.

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
