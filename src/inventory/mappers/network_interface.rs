//! Network interface mapper
//!
//! Fans out one row per private address on the interface.

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct NetworkInterfaceMapper {
    label_tag: String,
}

impl NetworkInterfaceMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for NetworkInterfaceMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::EC2::NetworkInterface"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        let mut unique_id = config.str("networkInterfaceId");
        if unique_id.is_empty() {
            unique_id = resource.arn.clone();
        }

        let base = InventoryRecord {
            asset_type: "NetworkInterface".to_string(),
            unique_id: sanitize(&unique_id),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::No),
            mac_address: clean(config.str("macAddress")),
            network_id: clean(config.str("vpcId")),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        };

        let mut rows: Vec<InventoryRecord> = config
            .items("privateIpAddresses")
            .map(|address| {
                let mut row = base.clone();
                row.ip_address = clean(address.str("privateIpAddress"));
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

    fn interface(configuration: serde_json::Value) -> RawResource {
        serde_json::from_value(json!({
            "resourceType": "AWS::EC2::NetworkInterface",
            "arn": "arn:aws:ec2:us-east-1:111122223333:network-interface/eni-1",
            "configuration": configuration,
            "tags": []
        }))
        .unwrap()
    }

    #[test]
    fn fans_out_per_private_address() {
        let rows = NetworkInterfaceMapper::new("iir_diagram_label").map(&interface(json!({
            "networkInterfaceId": "eni-1",
            "macAddress": "0a:ff:ee:dd:cc:bb",
            "vpcId": "vpc-1",
            "privateIpAddresses": [
                {"privateIpAddress": "10.0.0.1"},
                {"privateIpAddress": "10.0.0.2"}
            ]
        })));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(rows[1].ip_address.as_deref(), Some("10.0.0.2"));
        for row in &rows {
            assert_eq!(row.unique_id, "eni-1");
            assert_eq!(row.mac_address.as_deref(), Some("0a:ff:ee:dd:cc:bb"));
        }
    }

    #[test]
    fn no_addresses_still_yields_one_row() {
        let rows = NetworkInterfaceMapper::new("iir_diagram_label")
            .map(&interface(json!({"networkInterfaceId": "eni-1", "vpcId": "vpc-1"})));
        assert_eq!(rows.len(), 1);
        assert!(rows[0].ip_address.is_none());
        assert_eq!(rows[0].network_id.as_deref(), Some("vpc-1"));
    }
}
