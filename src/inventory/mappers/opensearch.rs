//! OpenSearch / Elasticsearch domain mapper
//!
//! Covers both domain generations; older snapshots report the engine version
//! as `elasticsearchVersion` and the VPC block under a different field name.

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct OpenSearchMapper {
    label_tag: String,
}

impl OpenSearchMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for OpenSearchMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::Elasticsearch::Domain", "AWS::OpenSearchService::Domain"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        let mut version = config.str_any(&["elasticsearchVersion", "engineVersion"]);
        if version.is_empty() {
            version = "unknown".to_string();
        }

        vec![InventoryRecord {
            asset_type: "OpenSearch".to_string(),
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::No),
            software_vendor: Some("AWS".to_string()),
            software_product_name: clean(format!("OpenSearch-{version}")),
            network_id: clean(config.child_any(&["vpcOptions", "vPCOptions"]).str("vpcId")),
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

    fn domain(resource_type: &str, configuration: serde_json::Value) -> RawResource {
        serde_json::from_value(json!({
            "resourceType": resource_type,
            "arn": "arn:aws:es:us-east-1:111122223333:domain/search",
            "configuration": configuration,
            "tags": []
        }))
        .unwrap()
    }

    #[test]
    fn legacy_domain_uses_elasticsearch_version() {
        let rows = OpenSearchMapper::new("iir_diagram_label").map(&domain(
            "AWS::Elasticsearch::Domain",
            json!({
                "elasticsearchVersion": "7.10",
                "vpcOptions": {"vpcId": "vpc-1"}
            }),
        ));

        assert_eq!(
            rows[0].software_product_name.as_deref(),
            Some("OpenSearch-7.10")
        );
        assert_eq!(rows[0].network_id.as_deref(), Some("vpc-1"));
    }

    #[test]
    fn current_domain_uses_engine_version() {
        let rows = OpenSearchMapper::new("iir_diagram_label").map(&domain(
            "AWS::OpenSearchService::Domain",
            json!({"engineVersion": "OpenSearch_2.11"}),
        ));

        assert_eq!(
            rows[0].software_product_name.as_deref(),
            Some("OpenSearch-OpenSearch_2.11")
        );
    }

    #[test]
    fn missing_version_defaults() {
        let rows = OpenSearchMapper::new("iir_diagram_label")
            .map(&domain("AWS::OpenSearchService::Domain", json!({})));
        assert_eq!(
            rows[0].software_product_name.as_deref(),
            Some("OpenSearch-unknown")
        );
    }
}
