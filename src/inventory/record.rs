//! Normalized inventory row
//!
//! One flat record per report row. Fan-out mappers build a shared base
//! record and `clone()` it per emitted row, overriding only the
//! address-bearing fields, so a fix to a shared field is made once per
//! mapper. Absent fields are `None`, never `""`, so the renderer can tell
//! "no value" from an empty string. Records are never mutated after the
//! mapper hands them off.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Yes/no answer for report columns that may also be left unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriState {
    Yes,
    No,
}

impl TriState {
    pub fn from_bool(value: bool) -> Self {
        if value {
            TriState::Yes
        } else {
            TriState::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriState::Yes => "Yes",
            TriState::No => "No",
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized row of the integrated inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Discovered kind, e.g. "EC2" or "RDS".
    pub asset_type: String,
    /// Stable identifier, typically the ARN or a resource-specific id.
    pub unique_id: String,
    pub ip_address: Option<String>,
    pub dns_name: Option<String>,
    pub mac_address: Option<String>,
    pub is_virtual: Option<TriState>,
    pub is_public: Option<TriState>,
    pub authenticated_scan_planned: Option<TriState>,
    pub baseline_config: Option<String>,
    pub hardware_model: Option<String>,
    pub network_id: Option<String>,
    pub software_vendor: Option<String>,
    pub software_product_name: Option<String>,
    pub location: Option<String>,
    /// Free-text diagram label, read from a configurable tag.
    pub label: Option<String>,
    pub owner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tristate_renders_report_text() {
        assert_eq!(TriState::Yes.to_string(), "Yes");
        assert_eq!(TriState::No.to_string(), "No");
        assert_eq!(TriState::from_bool(true), TriState::Yes);
        assert_eq!(TriState::from_bool(false), TriState::No);
    }

    #[test]
    fn default_record_leaves_optional_fields_unset() {
        let record = InventoryRecord::default();
        assert!(record.ip_address.is_none());
        assert!(record.is_public.is_none());
        assert!(record.owner.is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let record = InventoryRecord {
            asset_type: "EC2".to_string(),
            unique_id: "i-1".to_string(),
            is_virtual: Some(TriState::Yes),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["assetType"], "EC2");
        assert_eq!(value["uniqueId"], "i-1");
        assert_eq!(value["isVirtual"], "Yes");
    }
}
