//! Load balancer mapper (classic and v2)
//!
//! Fans out one row per load balancer address across availability zones. A
//! balancer with no reachable addresses still yields a single row so it is
//! never dropped from the inventory.

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct ElbMapper {
    label_tag: String,
}

impl ElbMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }

    fn asset_type(resource: &RawResource) -> String {
        if resource.resource_type == "AWS::ElasticLoadBalancing::LoadBalancer" {
            "Load Balancer-Classic".to_string()
        } else {
            let kind = Doc(&resource.configuration).str("type");
            sanitize(&format!("Load Balancer-{kind}"))
        }
    }

    fn ip_addresses(config: Doc<'_>) -> Vec<String> {
        let mut addresses = Vec::new();
        for zone in config.items("availabilityZones") {
            for address in zone.items("loadBalancerAddresses") {
                if address.has("ipAddress") {
                    addresses.push(address.str("ipAddress"));
                }
            }
        }
        addresses
    }
}

impl Mapper for ElbMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &[
            "AWS::ElasticLoadBalancing::LoadBalancer",
            "AWS::ElasticLoadBalancingV2::LoadBalancer",
        ]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        let base = InventoryRecord {
            asset_type: Self::asset_type(resource),
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            authenticated_scan_planned: Some(TriState::Yes),
            is_public: Some(TriState::from_bool(
                config.str_or("scheme", "unknown") == "internet-facing",
            )),
            // Classic ELBs report "vpcid" where v2 ELBs report "vpcId".
            network_id: clean(config.str_any(&["vpcId", "vpcid"])),
            label: tags.label,
            owner: tags.owner,
            ..Default::default()
        };

        let addresses = Self::ip_addresses(config);
        if addresses.is_empty() {
            return vec![base];
        }

        addresses
            .into_iter()
            .map(|address| {
                let mut row = base.clone();
                row.ip_address = clean(address);
                row
            })
            .collect()
    }
}
