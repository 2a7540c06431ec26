//! ElastiCache cluster and replication group mapper

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct ElastiCacheMapper {
    label_tag: String,
}

impl ElastiCacheMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

/// "redis" -> "Redis", matching how the engine name has always appeared in
/// the asset-type column.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

impl Mapper for ElastiCacheMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &[
            "AWS::ElastiCache::CacheCluster",
            "AWS::ElastiCache::ReplicationGroup",
        ]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        let engine = config.str_or("engine", "unknown");
        let engine_version = config.str_or("engineVersion", "unknown");
        let asset_type = sanitize(&format!("ElastiCache-{}", capitalize(&engine)));

        vec![InventoryRecord {
            software_product_name: clean(format!("{asset_type}-{engine_version}")),
            asset_type,
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::No),
            software_vendor: Some("AWS".to_string()),
            hardware_model: clean(config.str("cacheNodeType")),
            network_id: clean(config.child("cacheSubnetGroup").str("vpcId")),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        }]
    }
}
