//! DynamoDB table mapper

use super::{common_tags, Mapper};
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct DynamoDbMapper {
    label_tag: String,
}

impl DynamoDbMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for DynamoDbMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::DynamoDB::Table"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let tags = common_tags(resource, &self.label_tag);

        vec![InventoryRecord {
            asset_type: "DynamoDB".to_string(),
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::No),
            software_vendor: Some("AWS".to_string()),
            software_product_name: Some("DynamoDB".to_string()),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn emits_exactly_one_private_row() {
        let resource: RawResource = serde_json::from_value(json!({
            "resourceType": "AWS::DynamoDB::Table",
            "arn": "arn:aws:dynamodb:us-east-1:111122223333:table/orders",
            "configuration": {"tableName": "orders"},
            "tags": [{"key": "iir_diagram_label", "value": "orders store"}]
        }))
        .unwrap();

        let rows = DynamoDbMapper::new("iir_diagram_label").map(&resource);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].asset_type, "DynamoDB");
        assert_eq!(rows[0].is_public, Some(TriState::No));
        assert_eq!(rows[0].software_vendor.as_deref(), Some("AWS"));
        assert_eq!(rows[0].label.as_deref(), Some("orders store"));
    }
}
