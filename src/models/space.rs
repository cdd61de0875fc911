//! Genie Space documents, identifiers, and import payloads.

use super::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full JSON document returned by the export fetch.
///
/// Kept as raw JSON so fields beyond the known ones survive the round trip
/// to disk unmodified.
pub type SpaceDocument = serde_json::Value;

/// Unique identifier for a Genie Space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(String);

impl SpaceId {
    /// Creates a new space ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies a collaborator-supplied ID parameter, returning `None`
    /// when the value is absent, empty, or the placeholder `none`
    /// (case-insensitive, no trimming).
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        match value {
            Some(v) if !is_unset(v) => Some(Self::new(v)),
            _ => None,
        }
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SpaceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SpaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Returns true when an ID parameter carries no usable value.
///
/// Deployment parameters arrive as strings, so an unset ID shows up as
/// either an empty string or the literal `none` in any casing.
#[must_use]
pub(crate) fn is_unset(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("none")
}

/// Typed read view of an exported space file.
///
/// Only the fields the import payload needs; anything else in the file is
/// ignored on read.
#[derive(Debug, Clone, Deserialize)]
pub struct SpaceExport {
    /// Opaque serialized configuration blob.
    pub serialized_space: String,
    /// Space title, absent in older exports.
    #[serde(default)]
    pub title: Option<String>,
    /// Space description, absent in older exports.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for space creation and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPayload {
    /// SQL warehouse backing the space. Used for creation; ignored on update.
    pub warehouse_id: String,
    /// Workspace folder the space is created under. Used for creation only.
    pub parent_path: String,
    /// Opaque serialized configuration blob.
    pub serialized_space: String,
    /// Space title.
    pub title: String,
    /// Space description.
    pub description: String,
}

impl ImportPayload {
    /// Builds a payload from an exported file plus target parameters.
    ///
    /// `title` and `description` default to the empty string when the export
    /// file omits them.
    #[must_use]
    pub fn from_export(
        export: SpaceExport,
        warehouse_id: impl Into<String>,
        parent_path: impl Into<String>,
    ) -> Self {
        Self {
            warehouse_id: warehouse_id.into(),
            parent_path: parent_path.into(),
            serialized_space: export.serialized_space,
            title: export.title.unwrap_or_default(),
            description: export.description.unwrap_or_default(),
        }
    }
}

/// Returns the deterministic file name for an exported (space, environment)
/// pair.
#[must_use]
pub fn export_file_name(space_id: &SpaceId, env: Environment) -> String {
    format!("exported_{space_id}_{env}.json")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use test_case::test_case;

    #[test_case(None => None ; "absent")]
    #[test_case(Some("") => None ; "empty")]
    #[test_case(Some("none") => None ; "lowercase none")]
    #[test_case(Some("None") => None ; "capitalized none")]
    #[test_case(Some("NONE") => None ; "uppercase none")]
    #[test_case(Some("01ef1234") => Some("01ef1234".to_string()) ; "real id")]
    #[test_case(Some(" none ") => Some(" none ".to_string()) ; "no trimming")]
    fn test_from_param(value: Option<&str>) -> Option<String> {
        SpaceId::from_param(value).map(|id| id.as_str().to_string())
    }

    #[test]
    fn test_export_file_name() {
        let id = SpaceId::new("01ef1234");
        assert_eq!(
            export_file_name(&id, Environment::Stg),
            "exported_01ef1234_stg.json"
        );
    }

    #[test]
    fn test_space_export_optional_fields() {
        let export: SpaceExport =
            serde_json::from_str(r#"{"serialized_space": "blob"}"#).unwrap();
        assert_eq!(export.serialized_space, "blob");
        assert!(export.title.is_none());
        assert!(export.description.is_none());
    }

    #[test]
    fn test_space_export_requires_serialized_space() {
        let result = serde_json::from_str::<SpaceExport>(r#"{"title": "T"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_import_payload_defaults() {
        let export: SpaceExport =
            serde_json::from_str(r#"{"serialized_space": "blob"}"#).unwrap();
        let payload = ImportPayload::from_export(export, "w1", "/Shared/genie");
        assert_eq!(payload.title, "");
        assert_eq!(payload.description, "");
        assert_eq!(payload.warehouse_id, "w1");
        assert_eq!(payload.parent_path, "/Shared/genie");
    }

    #[test]
    fn test_import_payload_serializes_all_fields() {
        let payload = ImportPayload {
            warehouse_id: "w1".to_string(),
            parent_path: "/p".to_string(),
            serialized_space: "s".to_string(),
            title: "T".to_string(),
            description: String::new(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["warehouse_id"], "w1");
        assert_eq!(json["parent_path"], "/p");
        assert_eq!(json["serialized_space"], "s");
        assert_eq!(json["title"], "T");
        assert_eq!(json["description"], "");
    }
}
