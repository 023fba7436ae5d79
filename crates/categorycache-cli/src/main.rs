//! categorycache - load and inspect the marketplace category list.
//!
//! Mounts a category store over the on-disk cache, runs the initial
//! cache-then-network load, and prints the resulting state.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use categorycache_core::{
    ApiClient, CategoriesProvider, CategoriesState, CategoryCache, CategoryStore, Config,
    FileStore,
};

#[derive(Debug, Parser)]
#[command(name = "categorycache")]
#[command(about = "Load and cache the marketplace category list", long_about = None)]
struct Cli {
    /// Re-fetch the list once more after the initial load
    #[arg(long)]
    refresh: bool,

    /// Print the state as JSON
    #[arg(long)]
    json: bool,

    /// API base URL (overrides config and CATEGORYCACHE_API_URL)
    #[arg(long)]
    base_url: Option<String>,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let base_url = cli.base_url.clone().unwrap_or_else(|| config.api_base_url());
    let cache_dir = config.cache_dir().context("Failed to resolve cache directory")?;
    info!(base_url = %base_url, cache_dir = %cache_dir.display(), "Starting categorycache");

    let storage = FileStore::new(cache_dir)?;
    let api = ApiClient::new(base_url)?;
    let store = CategoryStore::new(
        Arc::new(api),
        CategoryCache::new(Arc::new(storage)),
        config.retry_policy(),
    );

    let mut provider = CategoriesProvider::mount(store);
    let handle = provider.handle();
    provider.initialized().await;

    let refresh_result = if cli.refresh {
        handle.refresh_categories().await.map(|_| ())
    } else {
        Ok(())
    };

    let state = handle.state()?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_state(&state);
    }

    refresh_result.context("Category refresh failed")
}

fn print_state(state: &CategoriesState) {
    println!(
        "{} categories (updated {})",
        state.categories.len(),
        state.fetched_age_display()
    );
    if let Some(ref error) = state.error {
        println!("Error: {}", error);
    }
    for category in &state.categories {
        match category.id() {
            Some(id) => println!("  {:<28} {}", category.display_name(), id),
            None => println!("  {}", category.display_name()),
        }
    }
}
