//! Dashboard configuration documents: parsing, validation, canonical text.
//!
//! A configuration is a JSON array of portlet references, each an object
//! with a required non-empty string `id`. Unknown fields are accepted and
//! dropped so older servers can read configurations written by newer ones.
//! Duplicate ids are valid at this layer; they are removed during
//! resolution (see [`crate::resolver::deduplicate`]).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A reference to one portlet by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WidgetReference {
    pub id: String,
}

impl WidgetReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Ordered list of portlet references. Order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigurationDocument {
    references: Vec<WidgetReference>,
}

impl ConfigurationDocument {
    pub fn new(references: Vec<WidgetReference>) -> Self {
        Self { references }
    }

    /// Build a document from ids, keeping their order.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(WidgetReference::new).collect())
    }

    pub fn references(&self) -> &[WidgetReference] {
        &self.references
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(|r| r.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.references.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

impl fmt::Display for ConfigurationDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

impl FromStr for ConfigurationDocument {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Parse and validate configuration text.
pub fn parse(text: &str) -> Result<ConfigurationDocument, CoreError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| CoreError::SchemaInvalid(format!("configuration is not valid JSON: {e}")))?;
    from_value(&value)
}

/// Validate an already-decoded JSON value as a configuration document.
pub fn from_value(value: &Value) -> Result<ConfigurationDocument, CoreError> {
    let items = value.as_array().ok_or_else(|| {
        CoreError::SchemaInvalid("configuration must be a JSON array of portlet references".into())
    })?;

    let mut references = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or_else(|| {
            CoreError::SchemaInvalid(format!("element {index} must be an object"))
        })?;

        match object.get("id") {
            Some(Value::String(id)) if !id.is_empty() => {
                references.push(WidgetReference::new(id.clone()));
            }
            Some(Value::String(_)) => {
                return Err(CoreError::SchemaInvalid(format!(
                    "element {index}: 'id' must not be empty"
                )));
            }
            Some(_) => {
                return Err(CoreError::SchemaInvalid(format!(
                    "element {index}: 'id' must be a string"
                )));
            }
            None => {
                return Err(CoreError::SchemaInvalid(format!(
                    "element {index}: missing required field 'id'"
                )));
            }
        }
    }

    Ok(ConfigurationDocument::new(references))
}

/// Canonical JSON value of a document: `[{"id": ...}, ...]`.
pub fn to_value(document: &ConfigurationDocument) -> Value {
    Value::Array(
        document
            .references
            .iter()
            .map(|r| json!({ "id": r.id }))
            .collect(),
    )
}

/// Canonical compact text of a document.
///
/// Byte-for-byte stable for equal documents, so it can be compared and
/// persisted directly.
pub fn serialize(document: &ConfigurationDocument) -> String {
    to_value(document).to_string()
}

/// Compare two configuration texts by parsed JSON structure.
///
/// Whitespace and object key order are ignored. Text that is not valid JSON
/// is never equivalent to anything.
pub fn is_equivalent(a: &str, b: &str) -> bool {
    match (
        serde_json::from_str::<Value>(a),
        serde_json::from_str::<Value>(b),
    ) {
        (Ok(left), Ok(right)) => left == right,
        (left, right) => {
            tracing::warn!(
                left_valid = left.is_ok(),
                right_valid = right.is_ok(),
                "Configuration could not be parsed for comparison",
            );
            false
        }
    }
}

/// JSON Schema (draft-07) of the accepted configuration text.
pub fn schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Pull request monitoring dashboard configuration",
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Identifier of an available portlet"
                }
            },
            "required": ["id"],
            "additionalProperties": true
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- parse --------------------------------------------------------------

    #[test]
    fn parse_empty_array() {
        let doc = parse("[]").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn parse_preserves_order() {
        let doc = parse(r#"[{"id":"b"},{"id":"a"},{"id":"c"}]"#).unwrap();
        assert_eq!(doc.ids().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let doc = parse(r#"[{"id":"a","width":3,"color":"red"}]"#).unwrap();
        assert_eq!(doc, ConfigurationDocument::from_ids(["a"]));
    }

    #[test]
    fn parse_keeps_duplicates() {
        let doc = parse(r#"[{"id":"x"},{"id":"x"}]"#).unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert_matches!(parse("not-json"), Err(CoreError::SchemaInvalid(_)));
    }

    #[test]
    fn parse_rejects_non_array() {
        assert_matches!(parse(r#"{"id":"a"}"#), Err(CoreError::SchemaInvalid(_)));
    }

    #[test]
    fn parse_rejects_non_object_element() {
        assert_matches!(parse(r#"["a"]"#), Err(CoreError::SchemaInvalid(msg)) if msg.contains("element 0"));
    }

    #[test]
    fn parse_rejects_missing_id() {
        assert_matches!(
            parse(r#"[{"id":"a"},{"name":"b"}]"#),
            Err(CoreError::SchemaInvalid(msg)) if msg.contains("element 1")
        );
    }

    #[test]
    fn parse_rejects_empty_id() {
        assert_matches!(parse(r#"[{"id":""}]"#), Err(CoreError::SchemaInvalid(_)));
    }

    #[test]
    fn parse_rejects_non_string_id() {
        assert_matches!(parse(r#"[{"id":42}]"#), Err(CoreError::SchemaInvalid(_)));
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let doc: ConfigurationDocument = r#"[{"id":"a"}]"#.parse().unwrap();
        assert!(doc.contains("a"));
    }

    // -- serialize ----------------------------------------------------------

    #[test]
    fn serialize_is_compact_and_canonical() {
        let doc = ConfigurationDocument::from_ids(["a", "b"]);
        assert_eq!(serialize(&doc), r#"[{"id":"a"},{"id":"b"}]"#);
        assert_eq!(doc.to_string(), serialize(&doc));
    }

    #[test]
    fn serialize_drops_extra_fields_of_parsed_text() {
        let doc = parse(r#"[ { "extra": true, "id": "a" } ]"#).unwrap();
        assert_eq!(serialize(&doc), r#"[{"id":"a"}]"#);
    }

    #[test]
    fn parse_of_serialized_document_is_identity() {
        let doc = parse(r#"[{"id":"z"},{"id":"a"},{"id":"z"}]"#).unwrap();
        assert_eq!(parse(&serialize(&doc)).unwrap(), doc);
    }

    #[test]
    fn serde_serialization_matches_canonical_text() {
        let doc = ConfigurationDocument::from_ids(["a"]);
        assert_eq!(serde_json::to_string(&doc).unwrap(), serialize(&doc));
    }

    // -- is_equivalent ------------------------------------------------------

    #[test]
    fn equivalence_ignores_whitespace() {
        assert!(is_equivalent(r#"[{"id":"a"}]"#, r#"[ { "id" : "a" } ]"#));
    }

    #[test]
    fn equivalence_ignores_key_order() {
        assert!(is_equivalent(
            r#"[{"id":"a","w":1}]"#,
            r#"[{"w":1,"id":"a"}]"#
        ));
    }

    #[test]
    fn equivalence_respects_array_order() {
        assert!(!is_equivalent(
            r#"[{"id":"a"},{"id":"b"}]"#,
            r#"[{"id":"b"},{"id":"a"}]"#
        ));
    }

    #[test]
    fn invalid_json_is_never_equivalent() {
        assert!(!is_equivalent("not-json", "not-json"));
    }

    // -- schema -------------------------------------------------------------

    #[test]
    fn schema_requires_id() {
        let s = schema();
        assert_eq!(s["type"], "array");
        assert_eq!(s["items"]["required"][0], "id");
        assert_eq!(s["items"]["properties"]["id"]["minLength"], 1);
    }
}
