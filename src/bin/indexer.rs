//! `nokor-indexer` - offline index builder.
//!
//! Builds the similarity index from the knowledge directory and persists it
//! for the serving process. Run once, and re-run whenever the knowledge base
//! changes; a rebuild fully replaces the previous index.

use clap::Parser;
use nokor::rag::indexer::build_index;
use nokor::{Config, OpenAiEmbedder};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nokor-indexer",
    about = "Build the Nokor knowledge-base similarity index",
    version
)]
struct Args {
    /// Directory holding the knowledge documents.
    #[arg(long)]
    knowledge_dir: Option<PathBuf>,

    /// Directory to persist the index artifacts into.
    #[arg(long)]
    index_dir: Option<PathBuf>,

    /// Base name of the persisted index.
    #[arg(long)]
    index_name: Option<String>,

    /// Chunk window size in words.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Overlap between consecutive chunks in words.
    #[arg(long)]
    chunk_overlap: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;

    if let Some(dir) = args.knowledge_dir {
        config.retrieval.knowledge_dir = dir;
    }
    if let Some(dir) = args.index_dir {
        config.retrieval.index_dir = dir;
    }
    if let Some(name) = args.index_name {
        config.retrieval.index_name = name;
    }
    if let Some(size) = args.chunk_size {
        config.retrieval.chunk_size = size;
    }
    if let Some(overlap) = args.chunk_overlap {
        config.retrieval.chunk_overlap = overlap;
    }

    let embedder = Arc::new(OpenAiEmbedder::from_config(&config.embedding));
    let report = build_index(embedder, &config.retrieval).await?;

    println!("Index '{}' built:", config.retrieval.index_name);
    for (source, count) in &report.per_document {
        println!("  {source}: {count} chunks");
    }
    println!("  total: {} chunks", report.total_chunks);

    Ok(())
}
