//! Raw resource model
//!
//! AWS Config returns each resource as a JSON-encoded string whose
//! `configuration` sub-document varies per resource type and is not
//! contractually stable. Only the envelope is typed here; the configuration
//! stays an untyped [`serde_json::Value`] read through
//! [`crate::inventory::document::Doc`].

use serde::Deserialize;
use serde_json::Value;

/// One resource description as returned by an AWS Config advanced query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResource {
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub arn: String,
    /// Only projected by aggregator queries.
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub configuration: Value,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A single resource tag.
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Look up a tag value by name, case-insensitively.
///
/// Returns the first matching tag's value, or `""` when no tag matches.
/// Absence is a normal condition, not an error.
pub fn tag_value(tags: &[Tag], name: &str) -> String {
    tags.iter()
        .find(|tag| tag.key.eq_ignore_ascii_case(name))
        .map(|tag| tag.value.clone())
        .unwrap_or_default()
}
