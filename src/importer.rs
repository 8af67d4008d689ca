// 📥 CSV Importer - template.csv → collection items
// Header row names the fields; every later row becomes one item, in file order.

use crate::item::Item;
use crate::store;
use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};
use std::io::Read;
use std::path::Path;

/// Default location of the maintainer's CSV template
pub const DEFAULT_CSV_PATH: &str = "data/template.csv";

/// Columns coerced to numbers when they parse as one
pub const NUMERIC_FIELDS: &[&str] = &["weight_g", "diameter_mm", "price"];

/// Split a comma-separated tag list, trimming pieces and dropping empty ones.
/// Order and duplicates are kept.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Best-effort float coercion; `None` leaves the original text in place
fn coerce_number(raw: &str) -> Option<Number> {
    raw.trim().parse::<f64>().ok().and_then(Number::from_f64)
}

/// Apply the per-row transforms to a freshly read row
pub fn normalize_row(fields: &mut Map<String, Value>) {
    if let Some(Value::String(raw)) = fields.get("tags") {
        if !raw.is_empty() {
            let tags = split_tags(raw).into_iter().map(Value::String).collect();
            fields.insert("tags".to_string(), Value::Array(tags));
        }
    }

    for key in NUMERIC_FIELDS {
        let Some(Value::String(raw)) = fields.get(*key) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        match coerce_number(raw) {
            Some(number) => {
                fields.insert(key.to_string(), Value::Number(number));
            }
            None => tracing::debug!(field = *key, value = %raw, "left non-numeric value as text"),
        }
    }
}

/// Read CSV rows from any reader.
///
/// Short rows get `null` for their missing columns; cells past the last
/// header are dropped. Reader errors (bad UTF-8, I/O) are returned as-is.
pub fn read_items<R: Read>(reader: R) -> Result<Vec<Item>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV header row")?.clone();

    let mut items = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV row {}", index + 1))?;

        if record.len() > headers.len() {
            tracing::warn!(
                row = index + 1,
                extra = record.len() - headers.len(),
                "row has more cells than headers, dropping the extras"
            );
        }

        let mut fields = Map::new();
        for (position, header) in headers.iter().enumerate() {
            let value = record
                .get(position)
                .map(|cell| Value::String(cell.to_string()))
                .unwrap_or(Value::Null);
            fields.insert(header.to_string(), value);
        }

        normalize_row(&mut fields);
        items.push(Item::from_map(fields));
    }

    Ok(items)
}

pub fn load_csv(csv_path: &Path) -> Result<Vec<Item>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;
    read_items(file).with_context(|| format!("Failed to parse CSV file: {:?}", csv_path))
}

/// Import `input` and write the collection to `output`. Returns the item count.
pub fn import_csv(input: &Path, output: &Path) -> Result<usize> {
    let items = load_csv(input)?;
    tracing::info!(input = ?input, count = items.len(), "imported CSV rows");

    store::save_collection(output, &items)?;
    Ok(items.len())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("a, b, ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_tags("x,x"), vec!["x", "x"]);
        assert!(split_tags(" , ").is_empty());
    }

    #[test]
    fn test_read_items_preserves_row_order_and_headers() {
        let csv = "id,country,year\nhkg-1990-10cents,Hong Kong,1990\nnpl-1995-1rupee,Nepal,1995\n";
        let items = read_items(csv.as_bytes()).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id(), "hkg-1990-10cents");
        assert_eq!(items[1].id(), "npl-1995-1rupee");
        let keys: Vec<&String> = items[0].as_map().keys().collect();
        assert_eq!(keys, vec!["id", "country", "year"]);
    }

    #[test]
    fn test_tags_are_split() {
        let csv = "id,tags\na,\"a, b, ,c\"\nb,\n";
        let items = read_items(csv.as_bytes()).unwrap();

        assert_eq!(items[0].get("tags"), Some(&json!(["a", "b", "c"])));
        // empty tag cell stays an empty string
        assert_eq!(items[1].get("tags"), Some(&json!("")));
    }

    #[test]
    fn test_numeric_fields_coerced_best_effort() {
        let csv = "id,weight_g,diameter_mm,price,year\na,3.5,17,n/a,1990\n";
        let items = read_items(csv.as_bytes()).unwrap();

        assert_eq!(items[0].get("weight_g"), Some(&json!(3.5)));
        assert_eq!(items[0].get("diameter_mm"), Some(&json!(17.0)));
        assert_eq!(items[0].get("price"), Some(&json!("n/a")));
        // not a numeric field
        assert_eq!(items[0].get("year"), Some(&json!("1990")));
    }

    #[test]
    fn test_short_row_gets_nulls() {
        let csv = "id,country,year\na,Oman\n";
        let items = read_items(csv.as_bytes()).unwrap();

        assert_eq!(items[0].get("country"), Some(&json!("Oman")));
        assert_eq!(items[0].get("year"), Some(&Value::Null));
    }

    #[test]
    fn test_import_csv_writes_output_and_creates_directory() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("template.csv");
        let output = dir.path().join("public").join("data").join("collection.json");
        fs::write(&input, "id,denomination,country,tags\nind-2022-5rupee,₹5,India,\"modern, india\"\n").unwrap();

        let count = import_csv(&input, &output).unwrap();
        assert_eq!(count, 1);

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"denomination\": \"₹5\""));

        let items = store::load_collection(&output).unwrap();
        assert_eq!(items[0].get("tags"), Some(&json!(["modern", "india"])));
    }

    #[test]
    fn test_missing_csv_is_error() {
        let dir = TempDir::new().unwrap();
        let result = import_csv(&dir.path().join("missing.csv"), &dir.path().join("out.json"));
        assert!(result.is_err());
    }
}
