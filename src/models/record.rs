//! Harvested Dublin Core records and the index fields derived from them.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Year;

/// One Dublin Core element of a harvested record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcField {
    /// Element name without namespace (e.g. "date", "identifier")
    pub name: String,

    /// Text content of the element
    pub value: String,
}

impl DcField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A harvested metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcRecord {
    /// Record identifier, possibly namespaced (`oai:host:local`)
    pub identifier: String,

    /// Elements in document order; names may repeat
    #[serde(default)]
    pub fields: Vec<DcField>,
}

impl DcRecord {
    /// Load a list of records from a JSON file.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Values of every element with the given name, in document order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Fields handed to the index document builder for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFields {
    pub id: String,

    /// `<element>_keyword` -> values, for each recognized Dublin Core element
    #[serde(flatten)]
    pub keywords: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_title: Option<String>,

    /// Decade facets in ascending order
    #[serde(default, rename = "decade", skip_serializing_if = "Vec::is_empty")]
    pub decades: Vec<Year>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_decade: Option<Year>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_external_link: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_in_order() {
        let record = DcRecord {
            identifier: "oai:repo.x.edu:1".into(),
            fields: vec![
                DcField::new("date", "1904"),
                DcField::new("title", "Map"),
                DcField::new("date", "c1895"),
            ],
        };
        let dates: Vec<&str> = record.values("date").collect();
        assert_eq!(dates, vec!["1904", "c1895"]);
    }

    #[test]
    fn test_deserialize_without_fields() {
        let record: DcRecord = serde_json::from_str(r#"{"identifier": "x"}"#).unwrap();
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_index_fields_serialization_skips_empty() {
        let fields = IndexFields {
            id: "x".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({"id": "x"}));
    }
}
