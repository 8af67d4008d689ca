// 📖 Narrative Enhancer - stories, fun facts, placeholders, capitals
//
// Curated entries are merged key-by-key over matching items (unconditional).
// Backfills only touch fields that are still missing or hold a placeholder.

use crate::item::{Item, PLACEHOLDER};
use crate::pipeline::{Pass, PassReport};
use crate::reference;
use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const MINTAGE_FALLBACK: &str = "Not specified";
pub const CONDITION_FALLBACK: &str = "Circulated";
pub const CURRENCY_NAME_FALLBACK: &str = "national currency";

/// Two generic sentences for items nobody has written facts for yet
pub fn generic_fun_facts(item: &Item) -> Vec<String> {
    let denomination = item.text_or("denomination", "");
    let country = item.text_or("country", "");
    let year = item.text_or("year", "");
    let currency_name = item.text_or("currency_name", CURRENCY_NAME_FALLBACK);

    vec![
        format!("This {} coin from {} was issued in {}.", denomination, country, year),
        format!("Part of the {} series.", currency_name),
    ]
}

/// Curated narrative fields keyed by item id
pub type Enhancements = HashMap<String, Map<String, Value>>;

pub struct NarrativeEnhancer {
    enhancements: Enhancements,
}

impl NarrativeEnhancer {
    pub fn new(enhancements: Enhancements) -> Self {
        NarrativeEnhancer { enhancements }
    }

    pub fn builtin() -> Result<Self> {
        Ok(NarrativeEnhancer::new(builtin_enhancements()?))
    }

    /// Load curated entries from a JSON object of objects keyed by id
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read enhancements file: {:?}", path.as_ref()))?;

        let document: Value =
            serde_json::from_str(&content).context("Failed to parse enhancements JSON")?;

        Ok(NarrativeEnhancer::new(enhancements_from_value(document)?))
    }

    pub fn enhancement_count(&self) -> usize {
        self.enhancements.len()
    }

    pub fn enhancement_for(&self, id: &str) -> Option<&Map<String, Value>> {
        self.enhancements.get(id)
    }
}

impl Pass for NarrativeEnhancer {
    fn name(&self) -> &'static str {
        "narrative"
    }

    fn apply(&self, items: &mut [Item]) -> PassReport {
        let mut curated = 0;
        let mut placeholders = 0;
        let mut fun_facts = 0;
        let mut capitals = 0;

        for item in items.iter_mut() {
            if let Some(overlay) = self.enhancements.get(item.id()) {
                item.merge(overlay);
                curated += 1;
            }

            if item.replace_placeholder("mintage", PLACEHOLDER, MINTAGE_FALLBACK) {
                placeholders += 1;
            }
            if item.replace_placeholder("condition", PLACEHOLDER, CONDITION_FALLBACK) {
                placeholders += 1;
            }

            let facts = generic_fun_facts(item);
            if item.fill_if_missing("fun_facts", facts) {
                fun_facts += 1;
            }

            let has_capital = item.capital().map(crate::item::is_truthy).unwrap_or(false);
            if !has_capital {
                let capital = reference::capital(item.str_field("country").unwrap_or(""));
                if let Some(capital) = capital {
                    item.set_capital(capital);
                    capitals += 1;
                }
            }
        }

        tracing::info!(curated, placeholders, fun_facts, capitals, "enhanced collection");

        PassReport::new(self.name(), items.len())
            .with_count("curated", curated)
            .with_count("placeholders_replaced", placeholders)
            .with_count("fun_facts_generated", fun_facts)
            .with_count("capitals_filled", capitals)
    }
}

fn enhancements_from_value(document: Value) -> Result<Enhancements> {
    let Value::Object(entries) = document else {
        bail!("Enhancements must be a JSON object keyed by item id");
    };

    entries
        .into_iter()
        .map(|(id, fields)| match fields {
            Value::Object(fields) => Ok((id, fields)),
            _ => bail!("Enhancement for {} is not an object", id),
        })
        .collect()
}

fn builtin_enhancements() -> Result<Enhancements> {
    let document = json!({
        "hkg-1990-10cents": {
            "mintage": "High circulation",
            "condition": "Circulated",
            "story": "This small but historic coin represents the final years of British colonial Hong Kong. Issued just seven years before the 1997 handover to China, it features Queen Elizabeth II on the obverse and bilingual legends reflecting Hong Kong's unique cultural blend. The nickel-brass composition made these coins durable for everyday commerce in one of Asia's busiest financial centers.",
            "fun_facts": [
                "Hong Kong retained its own currency after the 1997 handover under the 'one country, two systems' framework.",
                "The 10 cents coin is the smallest denomination still legal tender in Hong Kong.",
                "After 1993, the design was replaced with the bauhinia flower, symbolizing Hong Kong's identity.",
                "These coins were minted by the Royal Mint in the UK during the colonial period."
            ]
        },
        "mus-2010-1rupee": {
            "mintage": "Standard circulation",
            "condition": "Circulated",
            "story": "This cupronickel rupee honors Sir Seewoosagur Ramgoolam, Mauritius's first Prime Minister and 'Father of the Nation.' The 2010 issue marked the last year of this specific composition before the series transitioned to different materials. Mauritius, a small island nation in the Indian Ocean, has a rich numismatic history tied to its colonial past and diverse cultural heritage.",
            "fun_facts": [
                "The Mauritian rupee replaced the dollar in 1877 during British colonial rule.",
                "Ramgoolam led Mauritius to independence in 1968 and is revered as the nation's founding father.",
                "The extinct dodo bird, famously from Mauritius, appears on the national coat of arms.",
                "Mauritius uses a decimal system with 100 cents = 1 rupee."
            ]
        },
        "usa-1979-10c": {
            "mintage": "315,440,000 (Philadelphia)",
            "condition": "Circulated",
            "story": "The Roosevelt dime honors President Franklin D. Roosevelt, who died in 1945. This design, introduced in 1946, replaced the Mercury dime and has remained largely unchanged. The 1979-dated coins were struck in cupronickel-clad composition, adopted in 1965 when silver was removed from circulating US coinage due to rising metal prices.",
            "fun_facts": [
                "Roosevelt was chosen for the dime because of his work with the March of Dimes polio charity.",
                "The copper core is visible on the edge of all clad dimes - look for the copper stripe!",
                "Modern dimes are the smallest US coin in diameter but contain more copper than pennies.",
                "The 'P' mint mark (Philadelphia) wasn't added to dimes until 1980, so 1979 has no mint mark."
            ]
        },
        "aus-1952-1shilling": {
            "mintage": "7,200,000",
            "condition": "Circulated",
            "story": "This pre-decimal Australian shilling features the iconic Merino ram, symbolizing Australia's world-famous wool industry. King George VI appears on the obverse in this, the final year of his reign before Queen Elizabeth II's ascension. Made of 50% silver, these coins were withdrawn from circulation when Australia decimalized in 1966, converting to dollars and cents.",
            "fun_facts": [
                "The Merino sheep design represented Australia's agricultural wealth and global wool exports.",
                "In 1966, this shilling became the 10-cent coin under decimalization (1 shilling = 10 cents).",
                "George VI's 1952 coins are sought after as they were his last year before passing in February.",
                "Australian pre-decimal coins used the British pound system: 12 pence = 1 shilling, 20 shillings = 1 pound."
            ]
        }
    });

    enhancements_from_value(document)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(value: Value) -> Item {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_builtin_table() {
        let enhancer = NarrativeEnhancer::builtin().unwrap();
        assert_eq!(enhancer.enhancement_count(), 4);

        let hk = enhancer.enhancement_for("hkg-1990-10cents").unwrap();
        assert_eq!(hk.get("mintage"), Some(&json!("High circulation")));
        assert_eq!(hk.get("fun_facts").and_then(Value::as_array).map(Vec::len), Some(4));
    }

    #[test]
    fn test_enhancement_table_shape_is_checked() {
        let table = enhancements_from_value(json!({"a": {"story": "s"}})).unwrap();
        assert_eq!(table.len(), 1);

        assert!(enhancements_from_value(json!({"a": {"story": "s"}, "b": ["s"]})).is_err());
        assert!(enhancements_from_value(json!([{"story": "s"}])).is_err());
    }

    #[test]
    fn test_curated_fields_overwrite() {
        let enhancer = NarrativeEnhancer::builtin().unwrap();
        let mut items = vec![item(json!({
            "id": "aus-1952-1shilling",
            "story": "draft",
            "mintage": "TBD",
            "fun_facts": ["old fact"],
            "country": "Australia"
        }))];

        let report = enhancer.apply(&mut items);

        assert_eq!(report.count("curated"), 1);
        assert_eq!(items[0].str_field("mintage"), Some("7,200,000"));
        assert!(items[0].str_field("story").unwrap().contains("Merino ram"));
        assert_eq!(items[0].get("fun_facts").and_then(Value::as_array).map(Vec::len), Some(4));
    }

    #[test]
    fn test_placeholders_replaced() {
        let enhancer = NarrativeEnhancer::builtin().unwrap();
        let mut items = vec![item(json!({"id": "x", "mintage": "TBD", "condition": "TBD"}))];

        let report = enhancer.apply(&mut items);

        assert_eq!(items[0].str_field("mintage"), Some(MINTAGE_FALLBACK));
        assert_eq!(items[0].str_field("condition"), Some(CONDITION_FALLBACK));
        assert_eq!(report.count("placeholders_replaced"), 2);
    }

    #[test]
    fn test_existing_fun_facts_untouched() {
        let enhancer = NarrativeEnhancer::builtin().unwrap();
        let mut items = vec![item(json!({"id": "x", "fun_facts": ["Minted at night."]}))];

        enhancer.apply(&mut items);

        assert_eq!(items[0].get("fun_facts"), Some(&json!(["Minted at night."])));
    }

    #[test]
    fn test_empty_fun_facts_generated() {
        let enhancer = NarrativeEnhancer::builtin().unwrap();
        let mut items = vec![item(json!({
            "id": "fji-1990-10c",
            "denomination": "10 Cents",
            "country": "Fiji",
            "year": "1990",
            "fun_facts": []
        }))];

        let report = enhancer.apply(&mut items);

        let facts = items[0].get("fun_facts").and_then(Value::as_array).unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0], json!("This 10 Cents coin from Fiji was issued in 1990."));
        assert_eq!(facts[1], json!("Part of the national currency series."));
        assert_eq!(report.count("fun_facts_generated"), 1);
    }

    #[test]
    fn test_generic_fun_facts_use_currency_name() {
        let it = item(json!({"denomination": "1 Baht", "country": "Thailand", "year": "2008", "currency_name": "Thai baht"}));
        let facts = generic_fun_facts(&it);
        assert_eq!(facts[1], "Part of the Thai baht series.");
    }

    #[test]
    fn test_capital_backfill() {
        let enhancer = NarrativeEnhancer::builtin().unwrap();
        let mut items = vec![
            item(json!({"id": "a", "country": "Nepal"})),
            item(json!({"id": "b", "country": "Atlantis"})),
            item(json!({"id": "c", "country": "Oman", "country_info": {"capital": "Salalah"}})),
            item(json!({"id": "d", "country": "Bhutan", "country_info": {"capital": ""}})),
        ];

        let report = enhancer.apply(&mut items);

        assert_eq!(items[0].capital(), Some(&json!("Kathmandu")));
        assert!(items[1].get("country_info").is_none());
        assert_eq!(items[2].capital(), Some(&json!("Salalah")));
        assert_eq!(items[3].capital(), Some(&json!("Thimphu")));
        assert_eq!(report.count("capitals_filled"), 2);
    }

    #[test]
    fn test_duplicate_ids_all_enhanced() {
        let enhancer = NarrativeEnhancer::builtin().unwrap();
        let mut items = vec![
            item(json!({"id": "usa-1979-10c"})),
            item(json!({"id": "usa-1979-10c"})),
        ];

        let report = enhancer.apply(&mut items);

        assert_eq!(report.count("curated"), 2);
        assert_eq!(items[0], items[1]);
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let enhancer = NarrativeEnhancer::builtin().unwrap();
        let mut items = vec![
            item(json!({"id": "hkg-1990-10cents", "country": "Hong Kong"})),
            item(json!({"id": "x", "country": "India", "mintage": "TBD"})),
        ];

        enhancer.apply(&mut items);
        let first = items.clone();
        enhancer.apply(&mut items);

        assert_eq!(items, first);
    }

    #[test]
    fn test_from_file_rejects_non_object_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&good, r#"{"x": {"story": "A story."}}"#).unwrap();
        fs::write(&bad, r#"{"x": "A story."}"#).unwrap();

        let enhancer = NarrativeEnhancer::from_file(&good).unwrap();
        assert_eq!(enhancer.enhancement_for("x").unwrap().get("story"), Some(&json!("A story.")));

        assert!(NarrativeEnhancer::from_file(&bad).is_err());
    }
}
