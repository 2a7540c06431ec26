//! NAT gateway mapper
//!
//! Fans out one row per gateway address; a gateway with no addresses still
//! yields a single row.

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct NatGatewayMapper {
    label_tag: String,
}

impl NatGatewayMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for NatGatewayMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::EC2::NatGateway"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        let mut unique_id = config.str("natGatewayId");
        if unique_id.is_empty() {
            unique_id = resource.arn.clone();
        }

        let base = InventoryRecord {
            asset_type: "NATGateway".to_string(),
            unique_id: sanitize(&unique_id),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::Yes),
            network_id: clean(config.str("vpcId")),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        };

        let mut rows: Vec<InventoryRecord> = config
            .items("natGatewayAddresses")
            .map(|address| {
                let mut row = base.clone();
                row.ip_address = clean(address.str("privateIp"));
                row
            })
            .collect();

        if rows.is_empty() {
            rows.push(base);
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gateway(configuration: serde_json::Value) -> RawResource {
        serde_json::from_value(json!({
            "resourceType": "AWS::EC2::NatGateway",
            "arn": "arn:aws:ec2:us-east-1:111122223333:natgateway/nat-1",
            "configuration": configuration,
            "tags": []
        }))
        .unwrap()
    }

    #[test]
    fn fans_out_per_address() {
        let rows = NatGatewayMapper::new("iir_diagram_label").map(&gateway(json!({
            "natGatewayId": "nat-1",
            "vpcId": "vpc-1",
            "natGatewayAddresses": [
                {"privateIp": "10.0.0.5"},
                {"privateIp": "10.0.1.5"}
            ]
        })));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ip_address.as_deref(), Some("10.0.0.5"));
        assert_eq!(rows[1].ip_address.as_deref(), Some("10.0.1.5"));
        for row in &rows {
            assert_eq!(row.unique_id, "nat-1");
            assert_eq!(row.is_public, Some(TriState::Yes));
        }
    }

    #[test]
    fn no_addresses_still_yields_one_row() {
        let rows = NatGatewayMapper::new("iir_diagram_label")
            .map(&gateway(json!({"natGatewayId": "nat-1"})));
        assert_eq!(rows.len(), 1);
        assert!(rows[0].ip_address.is_none());
    }

    #[test]
    fn falls_back_to_arn_when_id_missing() {
        let rows = NatGatewayMapper::new("iir_diagram_label").map(&gateway(json!({})));
        assert_eq!(
            rows[0].unique_id,
            "arn:aws:ec2:us-east-1:111122223333:natgateway/nat-1"
        );
    }
}
