use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use blogmirror::archive;
use blogmirror::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "blogmirror",
    about = "Archive a Blogger blog's posts and comments to Markdown"
)]
struct Args {
    /// Config file path (all archive settings live there; defaults apply
    /// when the file is absent)
    #[arg(long, value_name = "FILE", default_value = "blogmirror.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = Config::load(&args.config).context("Failed to load configuration")?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("blogmirror/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let count = archive::run(&config, &client).await?;
    tracing::info!(posts = count, "Archive run complete");

    Ok(())
}
