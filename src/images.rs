// 🖼️ Image Assigner - front/back pictures for the catalog cards
//
// Items with a curated entry always get that entry (even over existing images).
// Everything else gets one generic placeholder for both sides, and only when
// `image_front` is missing.

use crate::item::Item;
use crate::pipeline::{Pass, PassReport};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const GENERIC_COIN_GOLD: &str =
    "https://images.unsplash.com/photo-1621504450181-5d356f61d307?w=400&h=400&fit=crop&q=80";
pub const GENERIC_COIN_SILVER: &str =
    "https://images.unsplash.com/photo-1621981386829-9b458a2caf3c?w=400&h=400&fit=crop&q=80";
pub const GENERIC_NOTE: &str =
    "https://images.unsplash.com/photo-1634922143802-f83c1609be2d?w=400&h=400&fit=crop&q=80";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePair {
    pub front: String,
    pub back: String,
}

impl ImagePair {
    /// Same picture on both sides
    pub fn same(url: &str) -> Self {
        ImagePair {
            front: url.to_string(),
            back: url.to_string(),
        }
    }
}

/// Generic placeholder for an item without a curated picture
pub fn generic_placeholder(item: &Item) -> &'static str {
    let item_type = item.str_field("type").unwrap_or("coin").to_lowercase();
    if item_type == "note" || item_type == "banknote" {
        return GENERIC_NOTE;
    }

    let material = item.str_field("material").unwrap_or("").to_lowercase();
    if material.contains("gold") || material.contains("brass") {
        GENERIC_COIN_GOLD
    } else {
        GENERIC_COIN_SILVER
    }
}

pub struct ImageAssigner {
    specific: HashMap<String, ImagePair>,
}

impl ImageAssigner {
    pub fn new(specific: HashMap<String, ImagePair>) -> Self {
        ImageAssigner { specific }
    }

    /// Curated pictures for items in the collection
    pub fn builtin() -> Self {
        let entries = [
            // Hong Kong 10 cents 1990
            ("hkg-1990-10cents", "photo-1621981386829-9b458a2caf3c"),
            // Mauritius 1 rupee 1991
            ("mus-1991-1rupee", "photo-1582556916721-1d1cb5c3b72f"),
            // Roosevelt dime 1990
            ("usa-1990-dime", "photo-1621504450181-5d356f61d307"),
            // Australia 1 shilling 1952
            ("aus-1952-1shilling", "photo-1589992830689-819a8d6d1d7e"),
            ("ind-2022-5rupee", "photo-1634922144091-62c0167adc17"),
            ("ind-2015-10rupee", "photo-1634922143802-f83c1609be2d"),
        ];

        let specific = entries
            .iter()
            .map(|(id, photo)| {
                let url = format!(
                    "https://images.unsplash.com/{}?w=400&h=400&fit=crop&q=80",
                    photo
                );
                (id.to_string(), ImagePair::same(&url))
            })
            .collect();

        ImageAssigner::new(specific)
    }

    /// Load the curated table from a JSON object: `{ "<id>": {"front": .., "back": ..} }`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read images file: {:?}", path.as_ref()))?;

        let specific: HashMap<String, ImagePair> =
            serde_json::from_str(&content).context("Failed to parse images JSON")?;

        Ok(ImageAssigner::new(specific))
    }

    pub fn specific_count(&self) -> usize {
        self.specific.len()
    }

    pub fn specific_for(&self, id: &str) -> Option<&ImagePair> {
        self.specific.get(id)
    }
}

impl Default for ImageAssigner {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Pass for ImageAssigner {
    fn name(&self) -> &'static str {
        "images"
    }

    fn apply(&self, items: &mut [Item]) -> PassReport {
        let mut specific = 0;
        let mut generic = 0;

        for item in items.iter_mut() {
            if let Some(pair) = self.specific.get(item.id()) {
                item.set("image_front", pair.front.as_str());
                item.set("image_back", pair.back.as_str());
                specific += 1;
                continue;
            }

            let placeholder = generic_placeholder(item);
            if item.fill_if_missing("image_front", placeholder) {
                item.set("image_back", placeholder);
                generic += 1;
            }
        }

        tracing::info!(specific, generic, "assigned images");

        PassReport::new(self.name(), items.len())
            .with_count("specific", specific)
            .with_count("generic", generic)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> Item {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_generic_placeholder_choice() {
        assert_eq!(generic_placeholder(&item(json!({"type": "note"}))), GENERIC_NOTE);
        assert_eq!(generic_placeholder(&item(json!({"type": "Banknote"}))), GENERIC_NOTE);
        assert_eq!(
            generic_placeholder(&item(json!({"material": "Nickel-Brass"}))),
            GENERIC_COIN_GOLD
        );
        assert_eq!(
            generic_placeholder(&item(json!({"type": "coin", "material": "Gold"}))),
            GENERIC_COIN_GOLD
        );
        assert_eq!(
            generic_placeholder(&item(json!({"material": "Cupronickel"}))),
            GENERIC_COIN_SILVER
        );
        assert_eq!(generic_placeholder(&item(json!({}))), GENERIC_COIN_SILVER);
    }

    #[test]
    fn test_specific_images_overwrite_existing() {
        let assigner = ImageAssigner::builtin();
        let mut items = vec![item(json!({
            "id": "aus-1952-1shilling",
            "image_front": "old.jpg",
            "image_back": "old-back.jpg"
        }))];

        let report = assigner.apply(&mut items);

        let expected = assigner.specific_for("aus-1952-1shilling").unwrap();
        assert_eq!(items[0].str_field("image_front"), Some(expected.front.as_str()));
        assert_eq!(items[0].str_field("image_back"), Some(expected.back.as_str()));
        assert_eq!(report.count("specific"), 1);
        assert_eq!(report.count("generic"), 0);
    }

    #[test]
    fn test_generic_images_never_overwrite() {
        let assigner = ImageAssigner::builtin();
        let mut items = vec![
            item(json!({"id": "a", "type": "note"})),
            item(json!({"id": "b", "image_front": "mine.jpg"})),
            item(json!({"id": "c", "image_front": "", "material": "Brass"})),
        ];

        let report = assigner.apply(&mut items);

        assert_eq!(items[0].str_field("image_front"), Some(GENERIC_NOTE));
        assert_eq!(items[0].str_field("image_back"), Some(GENERIC_NOTE));
        assert_eq!(items[1].str_field("image_front"), Some("mine.jpg"));
        assert!(items[1].get("image_back").is_none());
        assert_eq!(items[2].str_field("image_front"), Some(GENERIC_COIN_GOLD));
        assert_eq!(report.count("generic"), 2);
    }

    #[test]
    fn test_running_twice_is_stable() {
        let assigner = ImageAssigner::builtin();
        let mut items = vec![
            item(json!({"id": "hkg-1990-10cents"})),
            item(json!({"id": "x", "material": "Silver"})),
        ];

        assigner.apply(&mut items);
        let first = items.clone();
        let second_report = assigner.apply(&mut items);

        assert_eq!(items, first);
        assert_eq!(second_report.count("specific"), 1);
        assert_eq!(second_report.count("generic"), 0);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("images.json");
        fs::write(
            &path,
            r#"{"npl-1995-1rupee": {"front": "f.jpg", "back": "b.jpg"}}"#,
        )
        .unwrap();

        let assigner = ImageAssigner::from_file(&path).unwrap();
        assert_eq!(assigner.specific_count(), 1);
        assert_eq!(
            assigner.specific_for("npl-1995-1rupee"),
            Some(&ImagePair { front: "f.jpg".into(), back: "b.jpg".into() })
        );
    }
}
