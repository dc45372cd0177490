//! Core types for the infobox subsystem.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// One infobox table row: the first header cell and the first data cell,
/// either of which may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub header: Option<String>,
    pub data: Option<String>,
}

impl Row {
    pub fn new(header: Option<&str>, data: Option<&str>) -> Self {
        Self {
            header: header.map(str::to_string),
            data: data.map(str::to_string),
        }
    }
}

/// The fixed key set every record starts with, in output order.
const FIXED_FIELDS: &[&str] = &[
    "name_de",
    "name_es",
    "name_fr",
    "name_ru",
    "name_zh",
    "elevation",
    "population",
    "year_of_survey",
    "year_of_city_founding",
    "city_url",
    "area",
    "region",
];

/// A flat city fact sheet.
///
/// Backed by an insertion-ordered map rather than a struct because one key
/// is dynamic: when a "Country" row is seen, the generic `region` slot is
/// replaced by a key named after the row below it (e.g. `canton`). Unset
/// fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CityRecord {
    fields: Map<String, Value>,
}

impl CityRecord {
    /// Empty record: every fixed field present but null.
    pub fn new() -> Self {
        let mut fields = Map::new();
        for key in FIXED_FIELDS {
            fields.insert(key.to_string(), Value::Null);
        }
        Self { fields }
    }

    /// Set a field; the first non-null value wins. Unknown keys are
    /// appended at the end of the record.
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        match self.fields.get(key) {
            Some(existing) if !existing.is_null() => {}
            _ => {
                self.fields.insert(key.to_string(), value.into());
            }
        }
    }

    /// Set a field unconditionally, overwriting any earlier value.
    pub fn replace<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Drop the generic `region` slot and store `value` under the
    /// lower-cased `label` instead.
    pub fn promote_region(&mut self, label: &str, value: &str) {
        self.fields.remove("region");
        self.fields
            .insert(label.to_lowercase(), Value::String(value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

impl Default for CityRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Infobox extraction errors. Field-level problems never surface here;
/// only a structurally absent table is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoboxError {
    MissingInfobox,
}

impl fmt::Display for InfoboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInfobox => {
                write!(f, "No geography infobox found on the page — nothing to extract")
            }
        }
    }
}

impl std::error::Error for InfoboxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_all_null() {
        let record = CityRecord::new();
        for key in FIXED_FIELDS {
            assert_eq!(record.get(key), Some(&Value::Null));
        }
    }

    #[test]
    fn test_first_value_wins() {
        let mut record = CityRecord::new();
        record.set("elevation", "10 m");
        record.set("elevation", "999 m");
        assert_eq!(*record.get("elevation").unwrap(), "10 m");
    }

    #[test]
    fn test_replace_overwrites() {
        let mut record = CityRecord::new();
        record.set("area", "100 km2");
        record.replace("area", "200 km2");
        assert_eq!(*record.get("area").unwrap(), "200 km2");
    }

    #[test]
    fn test_promote_region() {
        let mut record = CityRecord::new();
        record.promote_region("Canton", "Zurich");
        assert!(!record.contains_key("region"));
        assert_eq!(*record.get("canton").unwrap(), "Zurich");
    }

    #[test]
    fn test_serialized_field_order() {
        let record = CityRecord::new();
        let json = serde_json::to_string(&record).unwrap();
        let de = json.find("name_de").unwrap();
        let region = json.find("region").unwrap();
        assert!(de < region);
    }
}
