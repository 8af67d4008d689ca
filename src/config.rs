// ⚙️ Configuration - catalog.toml
// Every field is optional; a missing file means defaults everywhere.

use crate::images::ImageAssigner;
use crate::importer::DEFAULT_CSV_PATH;
use crate::narrative::NarrativeEnhancer;
use crate::store::DEFAULT_COLLECTION_PATH;
use crate::values::ValueEstimator;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Env var pointing at an alternative config file
pub const CONFIG_ENV_VAR: &str = "CATALOG_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The JSON file the website reads
    pub collection_path: PathBuf,

    /// CSV template consumed by the importer
    pub csv_path: PathBuf,

    /// Year used as "now" when aging items (defaults to the calendar year)
    pub reference_year: Option<i32>,

    /// JSON override for the curated narrative table
    pub enhancements_path: Option<PathBuf>,

    /// JSON override for the curated image table
    pub images_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            collection_path: PathBuf::from(DEFAULT_COLLECTION_PATH),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            reference_year: None,
            enhancements_path: None,
            images_path: None,
        }
    }
}

impl Config {
    /// `$CATALOG_CONFIG` if set, else `catalog.toml` in the working directory
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = ?path, "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn value_estimator(&self) -> ValueEstimator {
        match self.reference_year {
            Some(year) => ValueEstimator::new(year),
            None => ValueEstimator::current(),
        }
    }

    pub fn image_assigner(&self) -> Result<ImageAssigner> {
        match &self.images_path {
            Some(path) => ImageAssigner::from_file(path),
            None => Ok(ImageAssigner::builtin()),
        }
    }

    pub fn narrative_enhancer(&self) -> Result<NarrativeEnhancer> {
        match &self.enhancements_path {
            Some(path) => NarrativeEnhancer::from_file(path),
            None => NarrativeEnhancer::builtin(),
        }
    }
}
