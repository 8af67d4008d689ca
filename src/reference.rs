// 🌍 Reference Tables - country lookups shared by the enrichment passes
// Read-only; keyed by the exact `country` string as it appears in the collection.

/// Currency used when a country isn't in [`CURRENCY_CODES`]
pub const DEFAULT_CURRENCY: &str = "USD";

pub const CURRENCY_CODES: &[(&str, &str)] = &[
    ("India", "INR"),
    ("United States", "USD"),
    ("United States of America", "USD"),
    ("Hong Kong", "HKD"),
    ("Mauritius", "MUR"),
    ("China", "CNY"),
    ("Hungary", "HUF"),
    ("Thailand", "THB"),
    ("Bhutan", "BTN"),
    ("Nepal", "NPR"),
    ("Oman", "OMR"),
    ("Australia", "AUD"),
    ("United Arab Emirates", "AED"),
    ("Singapore", "SGD"),
    ("Philippines", "PHP"),
    ("Malaysia", "MYR"),
    ("Japan", "JPY"),
    ("United Kingdom", "GBP"),
    ("Canada", "CAD"),
    ("Brazil", "BRL"),
    ("Germany", "EUR"),
    ("France", "EUR"),
    ("Italy", "EUR"),
    ("Russia", "RUB"),
];

// Hong Kong has no capital of its own; the catalog shows a dash.
pub const CAPITALS: &[(&str, &str)] = &[
    ("Hong Kong", "—"),
    ("Mauritius", "Port Louis"),
    ("China", "Beijing"),
    ("Hungary", "Budapest"),
    ("Thailand", "Bangkok"),
    ("Bhutan", "Thimphu"),
    ("Nepal", "Kathmandu"),
    ("Oman", "Muscat"),
    ("Australia", "Canberra"),
    ("United Arab Emirates", "Abu Dhabi"),
    ("Singapore", "Singapore"),
    ("Philippines", "Manila"),
    ("Malaysia", "Kuala Lumpur"),
    ("United States of America", "Washington, D.C."),
    ("India", "New Delhi"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// ISO-4217 code for a country, `USD` when unknown
pub fn currency_code(country: &str) -> &'static str {
    lookup(CURRENCY_CODES, country).unwrap_or(DEFAULT_CURRENCY)
}

pub fn capital(country: &str) -> Option<&'static str> {
    lookup(CAPITALS, country)
}
