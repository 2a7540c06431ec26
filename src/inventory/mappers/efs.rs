//! EFS file system mapper

use super::{common_tags, Mapper};
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct EfsMapper {
    label_tag: String,
}

impl EfsMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for EfsMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::EFS::FileSystem"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let tags = common_tags(resource, &self.label_tag);

        vec![InventoryRecord {
            asset_type: "EFS".to_string(),
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::No),
            software_vendor: Some("AWS".to_string()),
            software_product_name: Some("EFS".to_string()),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        }]
    }
}
