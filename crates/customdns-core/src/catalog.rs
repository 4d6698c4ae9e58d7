//! Snapshot of the entries held by the remote service
//!
//! The enumeration response looks like:
//!
//! ```json
//! { "data": [["nas.home.lan", "192.168.1.10"], ["nas.home.lan", "192.168.1.11"]] }
//! ```
//!
//! Only the first two positional fields of each record are read. A catalog
//! is valid for exactly one decision and is never cached.

use crate::error::{Error, Result};
use crate::model::Entry;
use serde_json::Value;

/// Ordered entries as reported by one enumeration call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCatalog {
    entries: Vec<Entry>,
}

impl RemoteCatalog {
    /// Wrap already-parsed entries
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Parse an enumeration response body
    pub fn from_body(body: &str) -> Result<Self> {
        let json: Value = serde_json::from_str(body)?;
        Self::from_json(&json)
    }

    /// Parse an already-decoded enumeration response
    pub fn from_json(json: &Value) -> Result<Self> {
        let data = json
            .get("data")
            .ok_or_else(|| Error::protocol("Invalid response format: missing field `data`"))?;

        let records = data
            .as_array()
            .ok_or_else(|| Error::protocol("Invalid response format: data is not an array"))?;

        let entries = records
            .iter()
            .enumerate()
            .map(|(index, record)| parse_record(index, record))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// Exact pair membership
    pub fn contains(&self, entry: &Entry) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Entries in response order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_record(index: usize, record: &Value) -> Result<Entry> {
    let fields = record.as_array().ok_or_else(|| {
        Error::protocol(format!(
            "Invalid response format: data[{}] is not an array",
            index
        ))
    })?;

    let field = |position: usize, name: &str| -> Result<String> {
        fields
            .get(position)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::protocol(format!(
                    "Invalid response format: data[{}] has no {} string",
                    index, name
                ))
            })
    };

    Ok(Entry {
        domain: field(0, "domain")?,
        ip: field(1, "ip")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_in_order() {
        let catalog = RemoteCatalog::from_body(
            r#"{"data": [["a.example.com", "10.0.0.1"], ["b.example.com", "10.0.0.2"]]}"#,
        )
        .unwrap();

        assert_eq!(
            catalog.entries(),
            &[
                Entry::new("a.example.com", "10.0.0.1"),
                Entry::new("b.example.com", "10.0.0.2"),
            ]
        );
    }

    #[test]
    fn membership_is_by_pair() {
        let catalog = RemoteCatalog::from_body(
            r#"{"data": [["a.example.com", "10.0.0.1"], ["a.example.com", "10.0.0.3"]]}"#,
        )
        .unwrap();

        assert!(catalog.contains(&Entry::new("a.example.com", "10.0.0.1")));
        assert!(catalog.contains(&Entry::new("a.example.com", "10.0.0.3")));
        assert!(!catalog.contains(&Entry::new("a.example.com", "10.0.0.2")));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let catalog =
            RemoteCatalog::from_body(r#"{"data": [["a.example.com", "10.0.0.1", 42, null]]}"#)
                .unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let catalog = RemoteCatalog::from_body(
            r#"{"data": [["a.example.com", "10.0.0.1"], ["a.example.com", "10.0.0.1"]]}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn empty_data_is_an_empty_catalog() {
        let catalog = RemoteCatalog::from_body(r#"{"data": []}"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn missing_data_is_protocol_error() {
        let err = RemoteCatalog::from_body(r#"{"success": true}"#).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn non_array_data_is_protocol_error() {
        let err = RemoteCatalog::from_body(r#"{"data": "nope"}"#).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn short_record_is_protocol_error() {
        let err = RemoteCatalog::from_body(r#"{"data": [["a.example.com"]]}"#).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn non_string_field_is_protocol_error() {
        let err = RemoteCatalog::from_body(r#"{"data": [["a.example.com", 10]]}"#).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn html_body_is_protocol_error() {
        let err = RemoteCatalog::from_body("<html>Not authorized</html>").unwrap_err();
        assert!(err.is_protocol());
    }
}
