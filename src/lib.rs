// Numismatic Catalog - Collection Enrichment Library
// Shared by the enrichment binaries that maintain public/data/collection.json

pub mod config;
pub mod images;     // Image Assigner
pub mod importer;   // CSV Importer
pub mod item;
pub mod logging;
pub mod narrative;  // Narrative Enhancer
pub mod pipeline;
pub mod reference;
pub mod stats;
pub mod store;
pub mod values;     // Value Estimator

// Re-export commonly used types
pub use config::Config;
pub use images::{ImageAssigner, ImagePair};
pub use importer::{import_csv, load_csv, split_tags};
pub use item::{is_truthy, Item, PLACEHOLDER};
pub use narrative::NarrativeEnhancer;
pub use pipeline::{run_pass_on_file, Pass, PassReport, Pipeline, PipelineOutcome};
pub use stats::CollectionStats;
pub use store::{fingerprint, load_collection, save_collection};
pub use values::{parse_face_value, Valuation, ValueEstimator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
