//! Lambda function mapper

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct LambdaMapper {
    label_tag: String,
}

impl LambdaMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for LambdaMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::Lambda::Function"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);
        let runtime = config.str_or("runtime", "unknown");

        vec![InventoryRecord {
            asset_type: "Lambda".to_string(),
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            authenticated_scan_planned: Some(TriState::Yes),
            is_public: Some(TriState::No),
            software_vendor: Some("AWS".to_string()),
            software_product_name: clean(format!("Lambda-{runtime}")),
            network_id: clean(config.child("vpcConfig").str("vpcId")),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        }]
    }
}
