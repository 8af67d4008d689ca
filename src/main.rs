use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use numismatic_catalog::{load_collection, logging, CollectionStats, Config, Pipeline};

/// Run every enrichment pass (values, images, narrative) over the collection
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Collection JSON to enrich in place
    collection: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init_logging();
    let args = Args::parse();

    let config = Config::load()?;
    let path = args.collection.unwrap_or_else(|| config.collection_path.clone());

    println!("🪙 Enriching {}", path.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let pipeline = Pipeline::standard(&config)?;
    let outcome = pipeline.run_file(&path)?;

    for report in &outcome.reports {
        println!("✓ {}", report.summary());
    }

    if !outcome.changed() {
        println!("✓ Nothing to change, collection already enriched");
    }

    let items = load_collection(&path)?;
    let stats = CollectionStats::from_items(&items);

    println!("\n📊 Collection overview");
    println!("   {}", stats.summary());
    println!("   Estimated value: {}", stats.value_summary());

    Ok(())
}
