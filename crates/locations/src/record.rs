use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lowercase alpha-2 code to record.
pub type CountryTable = HashMap<String, CountryRecord>;

/// A country as stored in the cache file.
///
/// Field names follow the primary dataset so the cache and the dataset share
/// one parser. Only `name.common` is used for display; the rest is carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub cca2: String,
    pub name: CountryName,
    #[serde(default)]
    pub cca3: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: String,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    #[serde(default)]
    pub timezones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

impl CountryRecord {
    pub fn code(&self) -> String {
        self.cca2.trim().to_lowercase()
    }

    pub fn common_name(&self) -> &str {
        &self.name.common
    }
}

/// Parses a JSON array of country records, matching field names
/// case-insensitively.
pub fn parse_records(json: &str) -> Result<Vec<CountryRecord>, serde_json::Error> {
    let value: Value = serde_json::from_str(json)?;
    serde_json::from_value(normalize_records(value))
}

pub fn build_table(records: Vec<CountryRecord>) -> CountryTable {
    records
        .into_iter()
        .filter(|record| !record.code().is_empty())
        .map(|record| (record.code(), record))
        .collect()
}

/// Records ordered by code, for stable cache output.
pub fn sorted_records(table: &CountryTable) -> Vec<&CountryRecord> {
    let mut records: Vec<&CountryRecord> = table.values().collect();
    records.sort_by(|a, b| a.cca2.cmp(&b.cca2));
    records
}

/// Lowercases the keys of each record object and of its `name` object.
/// Map-valued fields such as `currencies` keep their keys as-is.
pub(crate) fn normalize_records(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_record).collect()),
        other => other,
    }
}

fn normalize_record(value: Value) -> Value {
    let Value::Object(fields) = value else {
        return value;
    };
    let mut normalized = Map::with_capacity(fields.len());
    for (key, field) in fields {
        let key = key.to_lowercase();
        let field = if key == "name" {
            lowercase_keys(field)
        } else {
            field
        };
        normalized.insert(key, field);
    }
    Value::Object(normalized)
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, field)| (key.to_lowercase(), field))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset_shape() {
        let json = r#"[{
            "name": {"common": "France", "official": "French Republic", "nativeName": {}},
            "cca2": "FR",
            "cca3": "FRA",
            "region": "Europe",
            "capital": ["Paris"],
            "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
            "altSpellings": ["FR"]
        }]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code(), "fr");
        assert_eq!(records[0].common_name(), "France");
        assert!(records[0].currencies.contains_key("EUR"));
        assert!(records[0].timezones.is_empty());
    }

    #[test]
    fn test_field_names_match_case_insensitively() {
        let json = r#"[{"Name": {"Common": "Japan"}, "CCA2": "JP", "Region": "Asia"}]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records[0].code(), "jp");
        assert_eq!(records[0].common_name(), "Japan");
        assert_eq!(records[0].region, "Asia");
    }

    #[test]
    fn test_missing_code_is_an_error() {
        let json = r#"[{"name": {"common": "Nowhere"}}]"#;
        assert!(parse_records(json).is_err());
    }

    #[test]
    fn test_build_table_keys_by_lowercase_code() {
        let records = parse_records(
            r#"[{"name": {"common": "Germany"}, "cca2": "DE"}, {"name": {"common": "Blank"}, "cca2": " "}]"#,
        )
        .unwrap();
        let table = build_table(records);
        assert_eq!(table.len(), 1);
        assert_eq!(table["de"].common_name(), "Germany");
    }
}
