use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use numismatic_catalog::{logging, run_pass_on_file, Config};

/// Merge curated stories and fill in fun facts, placeholders and capitals
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

    let enhancer = config.narrative_enhancer()?;
    let curated = enhancer.enhancement_count();

    let outcome = run_pass_on_file(enhancer, &path)?;

    if let Some(report) = outcome.reports.first() {
        println!("Enhanced {} items in the collection.", report.total);
        println!(
            "Applied specific enhancements to {} items ({} curated entries).",
            report.count("curated"),
            curated
        );
    }

    Ok(())
}
