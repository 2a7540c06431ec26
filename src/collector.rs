//! Inventory collector
//!
//! Drains a resource source page by page and funnels every raw document
//! through the mapper registry, accumulating rows in arrival order: page
//! order, then in-page resource order, then per-resource fan-out order. No
//! deduplication, sorting, or aggregation happens here.

use crate::inventory::mappers::MapperRegistry;
use crate::inventory::raw::RawResource;
use crate::inventory::record::InventoryRecord;
use crate::source::ResourceSource;
use anyhow::Result;

pub struct InventoryCollector<S> {
    source: S,
    registry: MapperRegistry,
}

impl<S: ResourceSource> InventoryCollector<S> {
    pub fn new(source: S, registry: MapperRegistry) -> Self {
        Self { source, registry }
    }

    /// Collect the full inventory.
    ///
    /// An undecodable resource document is logged and skipped without
    /// aborting the run; source errors propagate according to the source's
    /// own failure policy.
    pub async fn collect_all(&mut self) -> Result<Vec<InventoryRecord>> {
        tracing::info!("starting retrieval of inventory from AWS Config");

        let mut all_inventory: Vec<InventoryRecord> = Vec::new();

        while let Some(page) = self.source.next_page().await? {
            tracing::debug!("current page of inventory contained {} items", page.len());

            for raw in &page {
                let resource: RawResource = match serde_json::from_str(raw) {
                    Ok(resource) => resource,
                    Err(err) => {
                        tracing::warn!("skipping undecodable resource document: {err}");
                        continue;
                    }
                };

                // One resource can become multiple rows (e.g. one per IP).
                all_inventory.extend(self.registry.dispatch(&resource));
            }
        }

        tracing::info!(
            "completed getting inventory, with a total of {}",
            all_inventory.len()
        );

        Ok(all_inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::mappers::default_mappers;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;

    struct StubSource {
        pages: VecDeque<Vec<String>>,
    }

    #[async_trait]
    impl ResourceSource for StubSource {
        async fn next_page(&mut self) -> Result<Option<Vec<String>>> {
            Ok(self.pages.pop_front())
        }
    }

    fn collector(pages: Vec<Vec<serde_json::Value>>) -> InventoryCollector<StubSource> {
        let pages = pages
            .into_iter()
            .map(|page| page.into_iter().map(|doc| doc.to_string()).collect())
            .collect();
        InventoryCollector::new(
            StubSource { pages },
            MapperRegistry::new(default_mappers("iir_diagram_label")),
        )
    }

    fn bucket(name: &str) -> serde_json::Value {
        json!({
            "resourceType": "AWS::S3::Bucket",
            "arn": format!("arn:aws:s3:::{name}"),
            "configuration": {},
            "tags": []
        })
    }

    #[tokio::test]
    async fn accumulates_in_page_then_resource_order() {
        let mut collector = collector(vec![
            vec![bucket("one"), bucket("two")],
            vec![bucket("three")],
        ]);

        let records = collector.collect_all().await.unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.unique_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["arn:aws:s3:::one", "arn:aws:s3:::two", "arn:aws:s3:::three"]
        );
    }

    #[tokio::test]
    async fn unmapped_type_is_skipped_without_aborting() {
        let mut collector = collector(vec![vec![
            bucket("one"),
            json!({"resourceType": "AWS::Unknown::Thing", "arn": "arn:x", "configuration": {}, "tags": []}),
            bucket("two"),
        ]]);

        let records = collector.collect_all().await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn undecodable_document_is_skipped() {
        let mut collector = InventoryCollector::new(
            StubSource {
                pages: VecDeque::from([vec![
                    "{not valid json".to_string(),
                    bucket("survivor").to_string(),
                ]]),
            },
            MapperRegistry::new(default_mappers("iir_diagram_label")),
        );

        let records = collector.collect_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].unique_id, "arn:aws:s3:::survivor");
    }
}
