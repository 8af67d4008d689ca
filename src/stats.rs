// 📊 Collection Overview - the numbers shown at the top of the catalog

use crate::item::Item;
use crate::reference;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    pub total_items: usize,
    pub countries: usize,
    pub coins: usize,
    pub notes: usize,
    /// Estimated value summed per currency; no exchange-rate conversion
    pub value_by_currency: BTreeMap<String, f64>,
}

impl CollectionStats {
    pub fn from_items(items: &[Item]) -> Self {
        let mut countries = BTreeSet::new();
        let mut coins = 0;
        let mut notes = 0;
        let mut value_by_currency: BTreeMap<String, f64> = BTreeMap::new();

        for item in items {
            let country = item.str_field("country").unwrap_or("");
            if !country.is_empty() {
                countries.insert(country);
            }

            match item.str_field("type") {
                Some("coin") => coins += 1,
                Some("note") | Some("banknote") => notes += 1,
                _ => {}
            }

            let value = item
                .f64_field("estimated_value")
                .filter(|v| *v != 0.0)
                .or_else(|| item.f64_field("face_value").filter(|v| *v != 0.0))
                .unwrap_or(1.0);

            let currency = item
                .str_field("currency_code")
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| reference::currency_code(country));

            *value_by_currency.entry(currency.to_string()).or_insert(0.0) += value;
        }

        CollectionStats {
            total_items: items.len(),
            countries: countries.len(),
            coins,
            notes,
            value_by_currency,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} items from {} countries | {} coins, {} notes",
            self.total_items, self.countries, self.coins, self.notes
        )
    }

    /// "HKD 0.15, INR 400.00" style listing, currencies in alphabetical order
    pub fn value_summary(&self) -> String {
        self.value_by_currency
            .iter()
            .map(|(code, total)| format!("{} {:.2}", code, total))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
