use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use numismatic_catalog::{import_csv, logging, Config};

/// Convert the CSV template into collection.json
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file to import [default: data/template.csv]
    input: Option<PathBuf>,

    /// Collection JSON to write [default: public/data/collection.json]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init_logging();
    let args = Args::parse();

    let config = Config::load()?;
    let input = args.input.unwrap_or(config.csv_path);
    let output = args.output.unwrap_or(config.collection_path);

    let count = import_csv(&input, &output)?;
    println!("Wrote {} items to {}", count, output.display());

    Ok(())
}
