//! Defensive access into untyped configuration documents
//!
//! The shape of a resource's `configuration` depends on the resource type and
//! the AWS Config schema version that produced it; keys come and go and some
//! appear under more than one casing. Lookups here default instead of
//! failing: a missing key reads as empty, an absent object as an empty
//! object, an absent array as no items.

use serde_json::Value;

static NULL: Value = Value::Null;

/// Borrowed view over a configuration document (or a sub-document of one).
#[derive(Debug, Clone, Copy)]
pub struct Doc<'a>(pub &'a Value);

impl<'a> Doc<'a> {
    /// String value at `key`, or `""` when absent or not a string.
    pub fn str(&self, key: &str) -> String {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// First present string across historically inconsistent key spellings.
    pub fn str_any(&self, keys: &[&str]) -> String {
        keys.iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string()
    }

    /// String value at `key`, or `default` when absent.
    pub fn str_or(&self, key: &str, default: &str) -> String {
        match self.0.get(key).and_then(Value::as_str) {
            Some(s) => s.to_string(),
            None => default.to_string(),
        }
    }

    /// Boolean at `key`; absent or non-boolean reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Whether `key` is present at all.
    pub fn has(&self, key: &str) -> bool {
        self.0.get(key).is_some()
    }

    /// Sub-document at `key`; absent keys yield a null document.
    pub fn child(&self, key: &str) -> Doc<'a> {
        Doc(self.0.get(key).unwrap_or(&NULL))
    }

    /// Sub-document under the first present of several key spellings.
    pub fn child_any(&self, keys: &[&str]) -> Doc<'a> {
        Doc(keys
            .iter()
            .find_map(|key| self.0.get(*key))
            .unwrap_or(&NULL))
    }

    /// Items of the array at `key`; absent or non-array yields no items.
    pub fn items(&self, key: &str) -> impl Iterator<Item = Doc<'a>> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|arr| arr.as_slice())
            .unwrap_or_default()
            .iter()
            .map(Doc)
    }

    /// String items of the array at `key`, skipping non-string entries.
    pub fn str_items(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
