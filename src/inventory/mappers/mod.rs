//! Per-resource-kind mapping and dispatch
//!
//! One mapper per resource kind converts a raw configuration document into
//! zero or more inventory rows. The [`MapperRegistry`] dispatches each raw
//! resource to the first mapper claiming its resource type and is the single
//! source of truth for the Config query filter: the `WHERE resourceType IN`
//! predicate is rendered from the union of mapper claims, so the filter and
//! the mapper set cannot drift apart.

mod apigateway;
mod cloudfront;
mod dynamodb;
mod ec2;
mod efs;
mod eks;
mod elasticache;
mod elb;
mod lambda;
mod nat_gateway;
mod network_interface;
mod opensearch;
mod rds;
mod redshift;
mod s3;

pub use apigateway::ApiGatewayMapper;
pub use cloudfront::CloudFrontMapper;
pub use dynamodb::DynamoDbMapper;
pub use ec2::Ec2Mapper;
pub use efs::EfsMapper;
pub use eks::EksMapper;
pub use elasticache::ElastiCacheMapper;
pub use elb::ElbMapper;
pub use lambda::LambdaMapper;
pub use nat_gateway::NatGatewayMapper;
pub use network_interface::NetworkInterfaceMapper;
pub use opensearch::OpenSearchMapper;
pub use rds::RdsMapper;
pub use redshift::RedshiftMapper;
pub use s3::S3Mapper;

use crate::inventory::raw::{tag_value, RawResource};
use crate::inventory::record::InventoryRecord;
use crate::inventory::sanitize::sanitize;
use anyhow::{bail, Result};
use std::collections::HashSet;

/// Converts one raw resource into zero or more inventory rows.
pub trait Mapper: Send + Sync {
    /// Resource type strings this mapper claims.
    fn supported_types(&self) -> &'static [&'static str];

    fn supports(&self, resource_type: &str) -> bool {
        self.supported_types().contains(&resource_type)
    }

    /// Kind-specific extraction. Only called with a supported resource type.
    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord>;

    /// Map a raw resource, returning no rows for unsupported types so that
    /// dispatch stays uniform.
    fn map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        if !self.supports(&resource.resource_type) {
            return Vec::new();
        }

        tracing::debug!("mapping {}", resource.resource_type);

        let rows = self.do_map(resource);

        tracing::debug!("mapping resulted in a total of {} rows", rows.len());

        rows
    }
}

/// Sanitize a derived string and collapse the empty string to an unset field.
pub(crate) fn clean(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(sanitize(&value))
    }
}

/// Label and owner fields shared by every mapper, read from tags.
pub(crate) struct CommonTags {
    pub label: Option<String>,
    pub owner: Option<String>,
}

pub(crate) fn common_tags(resource: &RawResource, label_tag: &str) -> CommonTags {
    CommonTags {
        label: clean(tag_value(&resource.tags, label_tag)),
        owner: clean(tag_value(&resource.tags, "owner")),
    }
}

/// Ordered mapper list with first-match dispatch.
pub struct MapperRegistry {
    mappers: Vec<Box<dyn Mapper>>,
}

impl MapperRegistry {
    pub fn new(mappers: Vec<Box<dyn Mapper>>) -> Self {
        Self { mappers }
    }

    /// Build a registry and reject overlapping capability claims. Overlap
    /// would make dispatch order-dependent, so it is a configuration error
    /// rather than something to resolve silently.
    pub fn validated(mappers: Vec<Box<dyn Mapper>>) -> Result<Self> {
        let registry = Self::new(mappers);
        registry.check_overlap()?;
        Ok(registry)
    }

    fn check_overlap(&self) -> Result<()> {
        let mut seen: HashSet<&'static str> = HashSet::new();
        for mapper in &self.mappers {
            for resource_type in mapper.supported_types() {
                if !seen.insert(resource_type) {
                    bail!("resource type {resource_type} is claimed by more than one mapper");
                }
            }
        }
        Ok(())
    }

    /// Dispatch a raw resource to the first mapper claiming its type.
    ///
    /// An unmapped type is an expected outcome, not a failure: it is logged
    /// and contributes no rows.
    pub fn dispatch(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let Some(mapper) = self
            .mappers
            .iter()
            .find(|mapper| mapper.supports(&resource.resource_type))
        else {
            tracing::warn!(
                "skipping mapping, unable to find mapper for resource type of {}",
                resource.resource_type
            );
            return Vec::new();
        };

        mapper.map(resource)
    }

    /// All claimed resource types, in registry order.
    pub fn supported_types(&self) -> Vec<&'static str> {
        self.mappers
            .iter()
            .flat_map(|mapper| mapper.supported_types().iter().copied())
            .collect()
    }

    /// Render the Config advanced-query expression selecting exactly the
    /// resource types this registry can map. Aggregator queries additionally
    /// project the owning account id.
    pub fn query_expression(&self, include_account_id: bool) -> String {
        let projection = if include_account_id {
            "SELECT arn, resourceType, configuration, tags, accountId"
        } else {
            "SELECT arn, resourceType, configuration, tags"
        };

        let types = self
            .supported_types()
            .iter()
            .map(|resource_type| format!("'{resource_type}'"))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{projection} WHERE resourceType IN ({types})")
    }
}

/// The full mapper set, in the order the report has always used.
pub fn default_mappers(label_tag: &str) -> Vec<Box<dyn Mapper>> {
    vec![
        Box::new(Ec2Mapper::new(label_tag)),
        Box::new(ElbMapper::new(label_tag)),
        Box::new(DynamoDbMapper::new(label_tag)),
        Box::new(RdsMapper::new(label_tag)),
        Box::new(LambdaMapper::new(label_tag)),
        Box::new(S3Mapper::new(label_tag)),
        Box::new(EfsMapper::new(label_tag)),
        Box::new(EksMapper::new(label_tag)),
        Box::new(RedshiftMapper::new(label_tag)),
        Box::new(ElastiCacheMapper::new(label_tag)),
        Box::new(OpenSearchMapper::new(label_tag)),
        Box::new(ApiGatewayMapper::new(label_tag)),
        Box::new(CloudFrontMapper::new(label_tag)),
        Box::new(NatGatewayMapper::new(label_tag)),
        Box::new(NetworkInterfaceMapper::new(label_tag)),
    ]
}
