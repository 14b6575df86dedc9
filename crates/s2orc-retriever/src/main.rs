//! CLI entry point: retrieve paper embeddings for a topic query and dump
//! the result mapping as indented JSON.

use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use s2orc_retriever::client::SearchClient;
use s2orc_retriever::config::Config;
use s2orc_retriever::retriever::{Retriever, TracingProgress};

/// Retrieve paper metadata and SPECTER embeddings from the Semantic
/// Scholar API for a topic query.
#[derive(Debug, Parser)]
#[command(name = "s2orc-retriever", version)]
struct Args {
    /// Topic query to search for
    query: String,

    /// Number of papers to retrieve (best-effort)
    sample_size: usize,

    /// First publication year of the window (inclusive)
    start_year: i32,

    /// Last publication year of the window (exclusive)
    end_year: i32,

    /// Output path; defaults to data/<query>_<sample_size>.json
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let config = Config::from_env()?;
    if !config.has_api_key() {
        tracing::warn!("S2_API_KEY not set, using unauthenticated rate limits");
    }

    let client = SearchClient::new(config)?;
    let retriever =
        Retriever::new(Arc::new(client)).with_progress(Arc::new(TracingProgress::default()));

    let results =
        retriever.search_papers(&args.query, args.sample_size, args.start_year, args.end_year).await?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("data/{}_{}.json", args.query, args.sample_size)));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &results)?;

    tracing::info!(count = results.len(), path = %path.display(), "retrieval complete");
    Ok(())
}
