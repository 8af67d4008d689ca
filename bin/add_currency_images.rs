use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use numismatic_catalog::{logging, run_pass_on_file, Config};

/// Give every item front/back images: curated where known, generic otherwise
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Collection JSON to update in place
    collection: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init_logging();
    let args = Args::parse();

    let config = Config::load()?;
    let path = args.collection.unwrap_or_else(|| config.collection_path.clone());

    let outcome = run_pass_on_file(config.image_assigner()?, &path)?;

    if let Some(report) = outcome.reports.first() {
        println!("✓ Updated {} items with specific currency images", report.count("specific"));
        println!("✓ Added generic placeholders to {} items", report.count("generic"));
        println!("✓ Total items in collection: {}", report.total);
    }

    Ok(())
}
