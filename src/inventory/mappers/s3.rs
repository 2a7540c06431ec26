//! S3 bucket mapper
//!
//! A bucket counts as public unless all four public-access-block flags are
//! set; a missing block therefore reads as public.

use super::{common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct S3Mapper {
    label_tag: String,
}

impl S3Mapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for S3Mapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::S3::Bucket"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        let block = config.child("publicAccessBlockConfiguration");
        let fully_blocked = block.flag("blockPublicAcls")
            && block.flag("blockPublicPolicy")
            && block.flag("ignorePublicAcls")
            && block.flag("restrictPublicBuckets");

        vec![InventoryRecord {
            asset_type: "S3".to_string(),
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::from_bool(!fully_blocked)),
            software_vendor: Some("AWS".to_string()),
            software_product_name: Some("S3".to_string()),
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

    fn bucket(configuration: serde_json::Value) -> RawResource {
        serde_json::from_value(json!({
            "resourceType": "AWS::S3::Bucket",
            "arn": "arn:aws:s3:::my-bucket",
            "configuration": configuration,
            "tags": []
        }))
        .unwrap()
    }

    #[test]
    fn fully_blocked_bucket_is_private() {
        let rows = S3Mapper::new("iir_diagram_label").map(&bucket(json!({
            "publicAccessBlockConfiguration": {
                "blockPublicAcls": true,
                "blockPublicPolicy": true,
                "ignorePublicAcls": true,
                "restrictPublicBuckets": true
            }
        })));
        assert_eq!(rows[0].is_public, Some(TriState::No));
    }

    #[test]
    fn partially_blocked_bucket_is_public() {
        let rows = S3Mapper::new("iir_diagram_label").map(&bucket(json!({
            "publicAccessBlockConfiguration": {
                "blockPublicAcls": true,
                "blockPublicPolicy": false,
                "ignorePublicAcls": true,
                "restrictPublicBuckets": true
            }
        })));
        assert_eq!(rows[0].is_public, Some(TriState::Yes));
    }

    #[test]
    fn missing_block_configuration_is_public() {
        let rows = S3Mapper::new("iir_diagram_label").map(&bucket(json!({})));
        assert_eq!(rows[0].is_public, Some(TriState::Yes));
    }
}
