// 🪙 Item Record - one coin or banknote in the collection
// Backed by an ordered JSON object so fields the passes don't know about
// survive a load/save cycle untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder sentinel used by the catalog for "not yet filled"
pub const PLACEHOLDER: &str = "TBD";

// ============================================================================
// TRUTHINESS
// ============================================================================

/// Whether a field value counts as "filled".
///
/// `null`, `""`, `0`, `false`, `[]` and `{}` are all treated as missing,
/// the same way the catalog's admin scripts always have.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a field for use in generated text (strings verbatim, numbers as written)
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// ITEM
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: Map<String, Value>,
}

impl Item {
    pub fn new() -> Self {
        Item { fields: Map::new() }
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Item { fields }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Stable identifier; empty when the record has none
    pub fn id(&self) -> &str {
        self.str_field("id").unwrap_or("")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String value of a field, `None` if absent or not a string
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Field rendered as text, falling back to `default` when absent or null
    pub fn text_or(&self, key: &str, default: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => default.to_string(),
            Some(value) => display_value(value),
        }
    }

    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// True when the field is present with a truthy value
    pub fn has(&self, key: &str) -> bool {
        self.fields.get(key).map(is_truthy).unwrap_or(false)
    }

    /// Set a field. Existing keys keep their position, new keys are appended.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Write `value` only when the field is missing (see [`is_truthy`]).
    /// Returns whether anything was written.
    pub fn fill_if_missing(&mut self, key: &str, value: impl Into<Value>) -> bool {
        if self.has(key) {
            return false;
        }
        self.set(key, value);
        true
    }

    /// Swap a placeholder sentinel for a real value. Returns whether it fired.
    pub fn replace_placeholder(&mut self, key: &str, sentinel: &str, replacement: &str) -> bool {
        if self.str_field(key) == Some(sentinel) {
            self.set(key, replacement);
            return true;
        }
        false
    }

    /// Shallow merge: every key in `overlay` replaces the item's value
    pub fn merge(&mut self, overlay: &Map<String, Value>) {
        for (key, value) in overlay {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    // ========================================================================
    // NESTED COUNTRY INFO
    // ========================================================================

    pub fn capital(&self) -> Option<&Value> {
        self.fields
            .get("country_info")
            .and_then(Value::as_object)
            .and_then(|info| info.get("capital"))
    }

    /// Set `country_info.capital`, creating `country_info` if needed.
    /// A `country_info` that isn't an object is replaced.
    pub fn set_capital(&mut self, capital: &str) {
        let id = self.id_hint();
        let entry = self
            .fields
            .entry("country_info")
            .or_insert_with(|| Value::Object(Map::new()));

        if !entry.is_object() {
            tracing::warn!(id = %id, "country_info is not an object, replacing it");
            *entry = Value::Object(Map::new());
        }

        if let Value::Object(info) = entry {
            info.insert("capital".to_string(), Value::String(capital.to_string()));
        }
    }

    fn id_hint(&self) -> String {
        self.fields
            .get("id")
            .map(display_value)
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Item::from_map(fields)
    }
}

// ============================================================================
// TESTS
// ============================================================================
