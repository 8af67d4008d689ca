// 💾 Collection Store - collection.json load/save
// The whole array is read into memory and rewritten in full; there is no
// append mode and no atomic replace.

use crate::item::Item;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Default location of the catalog data consumed by the website
pub const DEFAULT_COLLECTION_PATH: &str = "public/data/collection.json";

pub fn load_collection(path: &Path) -> Result<Vec<Item>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read collection file: {:?}", path))?;

    let items = parse_collection(&content)
        .with_context(|| format!("Failed to parse collection file: {:?}", path))?;

    tracing::debug!(path = ?path, count = items.len(), "loaded collection");
    Ok(items)
}

/// Parse a JSON array of item objects
pub fn parse_collection(content: &str) -> Result<Vec<Item>> {
    let document: Value = serde_json::from_str(content).context("Invalid JSON")?;

    let Value::Array(elements) = document else {
        bail!("Collection must be a JSON array of items");
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(fields) => Ok(Item::from_map(fields)),
            other => bail!("Item {} is not an object: {}", index, other),
        })
        .collect()
}

/// Pretty JSON, 2-space indent, non-ASCII written as-is
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize collection")
}

/// Write the full collection, creating the parent directory when missing
pub fn save_collection(path: &Path, items: &[Item]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let content = to_pretty_json(items)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write collection file: {:?}", path))?;

    tracing::debug!(path = ?path, count = items.len(), "saved collection");
    Ok(())
}

/// SHA-256 of the serialized collection, used to tell whether a pass changed anything
pub fn fingerprint(items: &[Item]) -> String {
    let mut hasher = Sha256::new();
    // Serializing a Map of Values cannot fail
    let content = serde_json::to_string(items).unwrap_or_default();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// TESTS
// ============================================================================
