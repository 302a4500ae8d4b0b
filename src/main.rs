//! Bibmatch command-line entrypoint.
//!
//! Three thin modes over the library:
//!
//! - `project` — stream JSON lines from stdin through the title projection
//!   under the content-addressed cache; prints the artifact path.
//! - `verify A B` — serial-name verification against the configured table.
//! - `lookup-container NAME` — tiered candidate retrieval for a bare name.

use std::io;

use anyhow::Context;
use mimalloc::MiMalloc;

use bibmatch::cache::ContentCache;
use bibmatch::config::Config;
use bibmatch::derivation::TitleProjection;
use bibmatch::entity::ContainerRecord;
use bibmatch::index::HttpSearchIndex;
use bibmatch::materialize::SourceMaterializer;
use bibmatch::retrieve::{CandidateRetriever, RetrieverConfig};
use bibmatch::serials::SerialNameIndex;
use bibmatch::verify::verify_serial_name;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("project") => run_project(&config),
        Some("verify") if args.len() == 4 => run_verify(&config, &args[2], &args[3]),
        Some("lookup-container") if args.len() == 3 => run_lookup(&config, &args[2]).await,
        _ => {
            eprintln!("usage: bibmatch <project | verify NAME_A NAME_B | lookup-container NAME>");
            std::process::exit(2);
        }
    }
}

/// Streams stdin through the title projection under the cache.
fn run_project(config: &Config) -> anyhow::Result<()> {
    let logical_key =
        std::env::var("BIBMATCH_CACHE_KEY").unwrap_or_else(|_| "default".to_string());

    let cache = ContentCache::new(config.cache_dir.clone());
    let projection = TitleProjection::default();
    let stdin = io::stdin();

    let resolved = cache
        .resolve_or_compute(&logical_key, &projection, stdin.lock())
        .context("projection failed")?;

    if let Some(stats) = resolved.stats {
        tracing::info!(
            emitted = stats.emitted,
            skipped = stats.skipped(),
            "projection complete"
        );
    } else {
        tracing::info!("artifact already cached");
    }
    println!("{}", resolved.path.display());

    Ok(())
}

/// Verifies two serial names against the configured table.
fn run_verify(config: &Config, a: &str, b: &str) -> anyhow::Result<()> {
    let serials_path = config
        .serials_path
        .as_ref()
        .context("BIBMATCH_SERIALS_PATH is not set")?;
    let index = SerialNameIndex::load(serials_path)?;

    let status = verify_serial_name(&index, a, b);
    println!("{}", status);

    Ok(())
}

/// Runs tiered container retrieval for a bare name.
///
/// An empty candidate list exits zero; a failed retrieval (index down,
/// timeout) propagates as an error so the two are distinguishable.
async fn run_lookup(config: &Config, name: &str) -> anyhow::Result<()> {
    let index = HttpSearchIndex::new(&config.index_url, config.request_timeout)?;
    let retriever = CandidateRetriever::new(
        index,
        SourceMaterializer,
        RetrieverConfig {
            container_index: config.container_index.clone(),
            release_index: config.release_index.clone(),
            workers: config.workers,
        },
    );

    let partial = ContainerRecord {
        name: Some(name.to_string()),
        ..Default::default()
    };
    let candidates = retriever.match_container(&partial, Some(5)).await?;

    if candidates.is_empty() {
        println!("no candidates");
        return Ok(());
    }
    for candidate in candidates {
        println!(
            "{}\t{}",
            candidate.ident.as_deref().unwrap_or("-"),
            candidate.name.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
