// 💰 Value Estimator - face value, currency code, collector estimate
//
// Always recomputes `face_value`, `currency_code` and `estimated_value`,
// so hand edits to those three fields are lost on re-run.
//
// estimated_value = face_value × age × rarity × material × type, floored at ×1,
// rounded to cents. Every factor is an ordered rule list: first match wins.

use crate::item::{display_value, Item};
use crate::pipeline::{Pass, PassReport};
use crate::reference;
use chrono::Datelike;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Face value used when the denomination has no number in it
pub const DEFAULT_FACE_VALUE: f64 = 1.0;

// ============================================================================
// MULTIPLIER RULES
// ============================================================================

/// Case-insensitive substring rule contributing a multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordRule {
    pub keyword: &'static str,
    pub factor: f64,
}

/// "rare" is tested before "uncommon"
pub const RARITY_RULES: &[KeywordRule] = &[
    KeywordRule { keyword: "rare", factor: 10.0 },
    KeywordRule { keyword: "uncommon", factor: 3.0 },
];

/// Intrinsic metal value; "silver" is tested before "gold"
pub const MATERIAL_RULES: &[KeywordRule] = &[
    KeywordRule { keyword: "silver", factor: 8.0 },
    KeywordRule { keyword: "gold", factor: 50.0 },
];

/// (age strictly greater than, factor), oldest bracket first
pub const AGE_RULES: &[(i32, f64)] = &[(100, 5.0), (50, 2.0), (20, 1.5)];

/// Only the exact type string "banknote" earns this; "note" does not
pub const BANKNOTE_FACTOR: f64 = 1.5;

/// Sub-units and how many make one main unit (first match wins)
const SUB_UNITS: &[(&str, f64)] = &[("cent", 100.0), ("pais", 100.0), ("anna", 16.0)];

fn first_keyword_match(rules: &[KeywordRule], text: &str) -> Option<KeywordRule> {
    let lower = text.to_lowercase();
    rules.iter().copied().find(|rule| lower.contains(rule.keyword))
}

pub fn rarity_factor(rarity: &str) -> f64 {
    first_keyword_match(RARITY_RULES, rarity).map(|r| r.factor).unwrap_or(1.0)
}

pub fn material_factor(material: &str) -> f64 {
    first_keyword_match(MATERIAL_RULES, material).map(|r| r.factor).unwrap_or(1.0)
}

pub fn age_factor(age: i32) -> f64 {
    AGE_RULES
        .iter()
        .find(|(threshold, _)| age > *threshold)
        .map(|(_, factor)| *factor)
        .unwrap_or(1.0)
}

// ============================================================================
// PARSING
// ============================================================================

fn numeral_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?|\.\d+").expect("numeral pattern is valid"))
}

/// Face value in the main currency unit.
///
/// Takes the first numeral in the text, then scales sub-units:
/// "10 Cents" → 0.10, "50 Paise" → 0.5, "4 Annas" → 0.25.
/// No numeral at all gives [`DEFAULT_FACE_VALUE`].
pub fn parse_face_value(denomination: &str) -> f64 {
    let Some(value) = numeral_pattern()
        .find(denomination)
        .and_then(|m| m.as_str().parse::<f64>().ok())
    else {
        return DEFAULT_FACE_VALUE;
    };

    let lower = denomination.to_lowercase();
    SUB_UNITS
        .iter()
        .find(|(unit, _)| lower.contains(unit))
        .map(|(_, per_unit)| value / per_unit)
        .unwrap_or(value)
}

/// Issue year from "1990", "1990-1992" (first year), or `None` for "TBD"/garbage
pub fn parse_year(year: &str) -> Option<i32> {
    year.split('-').next()?.trim().parse::<i32>().ok()
}

/// Round to cents, ties to even ("1 Anna" × 2 = 0.125 → 0.12)
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// ============================================================================
// VALUATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub face_value: f64,
    pub currency_code: String,
    pub multiplier: f64,
    pub estimated_value: f64,
}

pub struct ValueEstimator {
    /// "Now" for age calculations
    reference_year: i32,
}

impl ValueEstimator {
    pub fn new(reference_year: i32) -> Self {
        ValueEstimator { reference_year }
    }

    /// Estimator anchored on the current calendar year
    pub fn current() -> Self {
        Self::new(chrono::Local::now().year())
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Year of issue, falling back to the reference year (age 0)
    fn issue_year(&self, item: &Item) -> i32 {
        let parsed = match item.get("year") {
            None => None,
            Some(serde_json::Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
            Some(serde_json::Value::String(s)) => parse_year(s),
            Some(_) => None,
        };

        parsed.unwrap_or_else(|| {
            tracing::debug!(id = item.id(), "no usable year, treating as current");
            self.reference_year
        })
    }

    pub fn multiplier(&self, item: &Item) -> f64 {
        // Numeric years can be anything an i32 holds
        let age = self.reference_year.saturating_sub(self.issue_year(item));
        let rarity = item.text_or("rarity", "Common");
        let material = item.text_or("material", "");

        let mut multiplier = age_factor(age) * rarity_factor(&rarity) * material_factor(&material);

        if item.str_field("type").unwrap_or("coin") == "banknote" {
            multiplier *= BANKNOTE_FACTOR;
        }

        multiplier.max(1.0)
    }

    pub fn valuate(&self, item: &Item) -> Valuation {
        let denomination = item
            .get("denomination")
            .filter(|v| !v.is_null())
            .map(display_value)
            .unwrap_or_else(|| "1".to_string());

        let face_value = parse_face_value(&denomination);
        let currency_code = reference::currency_code(item.str_field("country").unwrap_or(""));
        let multiplier = self.multiplier(item);

        Valuation {
            face_value,
            currency_code: currency_code.to_string(),
            multiplier,
            estimated_value: round_cents(face_value * multiplier),
        }
    }

    /// Overwrite the three derived fields on one item
    pub fn apply_to(&self, item: &mut Item) -> Valuation {
        let valuation = self.valuate(item);
        item.set("face_value", valuation.face_value);
        item.set("currency_code", valuation.currency_code.as_str());
        item.set("estimated_value", valuation.estimated_value);
        valuation
    }
}

impl Pass for ValueEstimator {
    fn name(&self) -> &'static str {
        "values"
    }

    fn apply(&self, items: &mut [Item]) -> PassReport {
        let mut premium = 0;
        for item in items.iter_mut() {
            let valuation = self.apply_to(item);
            if valuation.multiplier > 1.0 {
                premium += 1;
            }
        }

        tracing::info!(items = items.len(), premium, "valued collection");

        PassReport::new(self.name(), items.len())
            .with_count("valued", items.len())
            .with_count("above_face_value", premium)
    }
}

/// One line per item, the way the maintainer eyeballs the results
pub fn sample_line(item: &Item) -> String {
    format!(
        "{} ({}) = {} {} (Est. {} {})",
        item.text_or("denomination", ""),
        item.text_or("country", ""),
        item.text_or("currency_code", ""),
        item.text_or("face_value", ""),
        item.text_or("currency_code", ""),
        item.text_or("estimated_value", ""),
    )
}

// ============================================================================
// TESTS
// ============================================================================
