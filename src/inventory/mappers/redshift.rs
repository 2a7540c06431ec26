//! Redshift cluster mapper

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct RedshiftMapper {
    label_tag: String,
}

impl RedshiftMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for RedshiftMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::Redshift::Cluster"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);
        let version = config.str_or("clusterVersion", "unknown");

        vec![InventoryRecord {
            asset_type: "Redshift".to_string(),
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::from_bool(config.flag("publiclyAccessible"))),
            software_vendor: Some("AWS".to_string()),
            software_product_name: clean(format!("Redshift-{version}")),
            hardware_model: clean(config.str("nodeType")),
            network_id: clean(config.str("vpcId")),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        }]
    }
}
