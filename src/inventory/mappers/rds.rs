//! RDS instance and cluster mapper

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct RdsMapper {
    label_tag: String,
}

impl RdsMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }

    /// Instances carry a `dBSubnetGroup` object whose `vpcId` is the network
    /// id; clusters carry `dbsubnetGroup` as a plain string naming the subnet
    /// group, which is forwarded as-is.
    fn network_id(config: Doc<'_>) -> Option<String> {
        if config.has("dBSubnetGroup") {
            return clean(config.child("dBSubnetGroup").str("vpcId"));
        }
        clean(config.str("dbsubnetGroup"))
    }
}

impl Mapper for RdsMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::RDS::DBInstance", "AWS::RDS::DBCluster"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        let engine = config.str_or("engine", "unknown");
        let engine_version = config.str_or("engineVersion", "unknown");

        vec![InventoryRecord {
            asset_type: "RDS".to_string(),
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::from_bool(config.flag("publiclyAccessible"))),
            software_vendor: Some("AWS".to_string()),
            // Clusters carry no instance class.
            hardware_model: clean(config.str("dBInstanceClass")),
            software_product_name: clean(format!("{engine}-{engine_version}")),
            network_id: Self::network_id(config),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        }]
    }
}
