//! EC2 instance mapper
//!
//! The heaviest fan-out in the pipeline: one row per private IP per network
//! interface, plus one extra row per associated public IP that is identical
//! to its private counterpart except for the address itself.

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct Ec2Mapper {
    label_tag: String,
}

impl Ec2Mapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for Ec2Mapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::EC2::Instance"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        let mut base = InventoryRecord {
            asset_type: "EC2".to_string(),
            unique_id: sanitize(&config.str("instanceId")),
            is_virtual: Some(TriState::Yes),
            authenticated_scan_planned: Some(TriState::Yes),
            baseline_config: clean(config.str("imageId")),
            hardware_model: clean(config.str("instanceType")),
            network_id: clean(config.str("vpcId")),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        };

        let public_dns = config.str("publicDnsName");
        if public_dns.is_empty() {
            base.dns_name = clean(config.str("privateDnsName"));
            base.is_public = Some(TriState::No);
        } else {
            base.dns_name = clean(public_dns);
            base.is_public = Some(TriState::Yes);
        }

        let mut rows: Vec<InventoryRecord> = Vec::new();

        for nic in config.items("networkInterfaces") {
            let mut nic_base = base.clone();
            nic_base.mac_address = clean(nic.str("macAddress"));

            for address in nic.items("privateIpAddresses") {
                let mut row = nic_base.clone();
                row.ip_address = clean(address.str("privateIpAddress"));
                rows.push(row);

                // Each IP needs its own report row, so an associated public
                // IP gets an additional row of its own.
                if address.has("association") {
                    let mut public_row = nic_base.clone();
                    public_row.ip_address = clean(address.child("association").str("publicIp"));
                    rows.push(public_row);
                }
            }
        }

        if rows.is_empty() {
            rows.push(base);
        }

        rows
    }
}
