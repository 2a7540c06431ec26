//! API Gateway mapper (REST and v2)
//!
//! A REST API is private only when its endpoint configuration lists the
//! `PRIVATE` type; v2 APIs have no private endpoint configuration and count
//! as public.

use super::{clean, common_tags, Mapper};
use crate::inventory::document::Doc;
use crate::inventory::raw::RawResource;
use crate::inventory::record::{InventoryRecord, TriState};
use crate::inventory::sanitize::sanitize;

pub struct ApiGatewayMapper {
    label_tag: String,
}

impl ApiGatewayMapper {
    pub fn new(label_tag: impl Into<String>) -> Self {
        Self {
            label_tag: label_tag.into(),
        }
    }
}

impl Mapper for ApiGatewayMapper {
    fn supported_types(&self) -> &'static [&'static str] {
        &["AWS::ApiGateway::RestApi", "AWS::ApiGatewayV2::Api"]
    }

    fn do_map(&self, resource: &RawResource) -> Vec<InventoryRecord> {
        let config = Doc(&resource.configuration);
        let tags = common_tags(resource, &self.label_tag);

        let is_rest = resource.resource_type == "AWS::ApiGateway::RestApi";
        let endpoint = config.child("endpointConfiguration");
        let is_private = is_rest
            && endpoint
                .str_items("types")
                .iter()
                .any(|endpoint_type| endpoint_type == "PRIVATE");

        let asset_type = if is_rest {
            "API-REST".to_string()
        } else {
            sanitize(&format!("API-{}", config.str_or("protocolType", "HTTP")))
        };

        let network_id = if is_private {
            clean(endpoint.str_items("vpcEndpointIds").join(","))
        } else {
            None
        };

        vec![InventoryRecord {
            asset_type,
            unique_id: sanitize(&resource.arn),
            is_virtual: Some(TriState::Yes),
            is_public: Some(TriState::from_bool(!is_private)),
            software_vendor: Some("AWS".to_string()),
            software_product_name: Some("API Gateway".to_string()),
            network_id,
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

    fn api(resource_type: &str, configuration: serde_json::Value) -> RawResource {
        serde_json::from_value(json!({
            "resourceType": resource_type,
            "arn": "arn:aws:apigateway:us-east-1::/restapis/abc123",
            "configuration": configuration,
            "tags": []
        }))
        .unwrap()
    }

    fn mapper() -> ApiGatewayMapper {
        ApiGatewayMapper::new("iir_diagram_label")
    }

    #[test]
    fn private_rest_api_joins_vpc_endpoints() {
        let rows = mapper().map(&api(
            "AWS::ApiGateway::RestApi",
            json!({
                "endpointConfiguration": {
                    "types": ["PRIVATE"],
                    "vpcEndpointIds": ["vpce-1", "vpce-2"]
                }
            }),
        ));

        assert_eq!(rows[0].asset_type, "API-REST");
        assert_eq!(rows[0].is_public, Some(TriState::No));
        assert_eq!(rows[0].network_id.as_deref(), Some("vpce-1,vpce-2"));
    }

    #[test]
    fn regional_rest_api_is_public() {
        let rows = mapper().map(&api(
            "AWS::ApiGateway::RestApi",
            json!({"endpointConfiguration": {"types": ["REGIONAL"]}}),
        ));

        assert_eq!(rows[0].is_public, Some(TriState::Yes));
        assert!(rows[0].network_id.is_none());
    }

    #[test]
    fn v2_api_uses_protocol_type() {
        let rows = mapper().map(&api(
            "AWS::ApiGatewayV2::Api",
            json!({"protocolType": "WEBSOCKET"}),
        ));

        assert_eq!(rows[0].asset_type, "API-WEBSOCKET");
        assert_eq!(rows[0].is_public, Some(TriState::Yes));
    }

    #[test]
    fn v2_api_defaults_to_http() {
        let rows = mapper().map(&api("AWS::ApiGatewayV2::Api", json!({})));
        assert_eq!(rows[0].asset_type, "API-HTTP");
    }
}
