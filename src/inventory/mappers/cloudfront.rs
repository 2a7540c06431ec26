//! CloudFront distribution mapper

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct CloudFrontMapper {
    label_tag: String,
}

impl CloudFrontMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for CloudFrontMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::CloudFront::Distribution"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        vec![InventoryRecord {
            asset_type: "CloudFront".to_string(),
            unique_id: sanitize(&resource.arn),
            dns_name: clean(config.str("domainName")),
            is_virtual: Some(TriState::Yes),
            // Edge distributions are public by definition.
            is_public: Some(TriState::Yes),
            software_vendor: Some("AWS".to_string()),
            software_product_name: Some("CloudFront".to_string()),
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
    fn distribution_is_always_public_with_domain_dns() {
        let resource: RawResource = serde_json::from_value(json!({
            "resourceType": "AWS::CloudFront::Distribution",
            "arn": "arn:aws:cloudfront::111122223333:distribution/E1ABC",
            "configuration": {"domainName": "d111111abcdef8.cloudfront.net"},
            "tags": []
        }))
        .unwrap();

        let rows = CloudFrontMapper::new("iir_diagram_label").map(&resource);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].is_public, Some(TriState::Yes));
        assert_eq!(
            rows[0].dns_name.as_deref(),
            Some("d111111abcdef8.cloudfront.net")
        );
    }
}
