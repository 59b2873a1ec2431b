use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tidy_indexer::{load_sources, IndexBuilder, IndexStats};
use tidy_search::{rank_similar, SearchSession, SessionEntry, SessionState};
use tidy_vector_store::{Embedder, ItemId, VectorStore};
use tokio_util::sync::CancellationToken;

use crate::config::{Config, Overrides};

mod config;

#[derive(Parser)]
#[command(name = "tidy")]
#[command(about = "Embedding similarity search over an indexed photo library", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML config file
    #[arg(long, global = true, env = "TIDY_CONFIG")]
    config: Option<PathBuf>,

    /// Store file (default: .tidy/index.json)
    #[arg(long, global = true, env = "TIDY_STORE_PATH")]
    store: Option<PathBuf>,

    /// Embedding backend (only `stub` is built in)
    #[arg(long, global = true, env = "TIDY_EMBED_MODE")]
    embed_mode: Option<String>,

    /// Embedding dimensionality for the configured backend
    #[arg(long, global = true, env = "TIDY_EMBED_DIM")]
    embed_dim: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the store from a JSON list of sources
    Index(IndexArgs),

    /// Rank the library against a text query or a raw vector
    Search(SearchArgs),

    /// Rank the library against an already indexed item
    Similar(SimilarArgs),

    /// List the library newest first
    List(ListArgs),
}

#[derive(Args)]
struct IndexArgs {
    /// JSON array of {id, text | image_path | embedding}
    #[arg(long)]
    input: PathBuf,
}

#[derive(Args)]
struct SearchArgs {
    /// Text to embed as the query
    #[arg(long, conflicts_with = "vector", required_unless_present = "vector")]
    text: Option<String>,

    /// Comma-separated query vector
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    vector: Option<Vec<f32>>,

    /// Maximum number of results
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args)]
struct SimilarArgs {
    /// Id of the item to search around
    #[arg(long)]
    id: String,

    /// Maximum number of results
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args)]
struct ListArgs {
    /// Maximum number of results
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Serialize)]
struct IndexOutput {
    status: &'static str,
    store_path: PathBuf,
    dimension: Option<usize>,
    stats: IndexStats,
}

#[derive(Serialize)]
struct ResultsOutput<'a> {
    status: &'static str,
    state: SessionState,
    total: usize,
    results: &'a [SessionEntry],
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let cfg = Config::resolve(
        cli.config.as_deref(),
        Overrides {
            store_path: cli.store,
            embed_mode: cli.embed_mode,
            embed_dimension: cli.embed_dim,
        },
    )?;

    match cli.command {
        Commands::Index(args) => run_index(args, &cfg).await,
        Commands::Search(args) => run_search(args, &cfg).await,
        Commands::Similar(args) => run_similar(args, &cfg).await,
        Commands::List(args) => run_list(args, &cfg).await,
    }
}

async fn run_index(args: IndexArgs, cfg: &Config) -> Result<()> {
    let sources = load_sources(&args.input)
        .await
        .with_context(|| format!("Failed to read sources from {}", args.input.display()))?;
    let embedder = cfg.embed_mode.embedder(cfg.embed_dimension)?;
    let indexer = IndexBuilder::new(embedder);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received; stopping after the current item");
            on_signal.cancel();
        }
    });

    let (store, stats) = indexer.build(sources, &cancel).await?;
    store
        .save(&cfg.store_path)
        .await
        .with_context(|| format!("Failed to save store to {}", cfg.store_path.display()))?;

    print_json(&IndexOutput {
        status: "ok",
        store_path: cfg.store_path.clone(),
        dimension: store.dimension(),
        stats,
    })
}

async fn run_search(args: SearchArgs, cfg: &Config) -> Result<()> {
    let store = open_store(cfg).await?;
    let query = match (args.text, args.vector) {
        (_, Some(vector)) => vector,
        (Some(text), None) => {
            let embedder = cfg.embed_mode.embedder(cfg.embed_dimension)?;
            embedder.embed_text(&text).await?
        }
        (None, None) => anyhow::bail!("either --text or --vector is required"),
    };

    let mut session = SearchSession::for_store(&store);
    session.query(&query, &store)?;
    print_results(&session, args.limit.unwrap_or(cfg.search_limit))
}

async fn run_similar(args: SimilarArgs, cfg: &Config) -> Result<()> {
    let store = open_store(cfg).await?;
    let mut session = SearchSession::for_store(&store);
    let results = rank_similar(&ItemId::new(args.id), &store)?;
    session.apply_query(results)?;
    print_results(&session, args.limit.unwrap_or(cfg.search_limit))
}

async fn run_list(args: ListArgs, cfg: &Config) -> Result<()> {
    let store = open_store(cfg).await?;
    let session = SearchSession::for_store(&store);
    print_results(&session, args.limit.unwrap_or(cfg.search_limit))
}

async fn open_store(cfg: &Config) -> Result<VectorStore> {
    VectorStore::load_or_default(&cfg.store_path)
        .await
        .with_context(|| format!("Failed to load store from {}", cfg.store_path.display()))
}

fn print_results(session: &SearchSession, limit: usize) -> Result<()> {
    let current = session.current();
    print_json(&ResultsOutput {
        status: "ok",
        state: session.state(),
        total: current.len(),
        results: &current[..limit.min(current.len())],
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
