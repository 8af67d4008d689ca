use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use numismatic_catalog::values::sample_line;
use numismatic_catalog::{load_collection, logging, run_pass_on_file, Config};

/// Add face_value, currency_code and estimated_value to every item
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

    let outcome = run_pass_on_file(config.value_estimator(), &path)?;
    let total = outcome.reports.first().map(|r| r.total).unwrap_or(0);

    println!("✓ Added face_value, currency_code, and estimated_value to {} items", total);

    let items = load_collection(&path)?;
    println!("\nSample values:");
    for item in items.iter().take(5) {
        println!("  {}", sample_line(item));
    }

    Ok(())
}
