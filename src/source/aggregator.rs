//! Aggregator-backed resource source
//!
//! Runs one long-lived advanced query against a centralized Config
//! aggregator. Provider errors here indicate a systemic problem, so they
//! propagate and terminate the run instead of degrading to partial results.

use super::{ConfigQuery, QueryPage, ResourceSource};
use anyhow::{Context, Result};
use async_trait::async_trait;

pub struct AggregatorSource<Q> {
    query: Q,
    expression: String,
    next_token: Option<String>,
    done: bool,
}

impl<Q: ConfigQuery> AggregatorSource<Q> {
    pub fn new(query: Q, expression: String) -> Self {
        Self {
            query,
            expression,
            next_token: None,
            done: false,
        }
    }
}

#[async_trait]
impl<Q: ConfigQuery> ResourceSource for AggregatorSource<Q> {
    async fn next_page(&mut self) -> Result<Option<Vec<String>>> {
        if self.done {
            return Ok(None);
        }

        let page = self
            .query
            .select(&self.expression, self.next_token.as_deref())
            .await
            .context("retrieving resources from Config aggregator")?;

        tracing::debug!(
            "page returned {} resources and next token of '{}'",
            page.results.len(),
            page.next_token.as_deref().unwrap_or("")
        );

        self.next_token = page.continuation().map(str::to_string);
        if self.next_token.is_none() {
            self.done = true;
        }

        Ok(Some(page.results))
    }
}

/// Real aggregator query backed by the AWS Config client.
pub struct AwsAggregatorQuery {
    client: aws_sdk_config::Client,
    aggregator_name: String,
}

impl AwsAggregatorQuery {
    pub fn new(client: aws_sdk_config::Client, aggregator_name: String) -> Self {
        Self {
            client,
            aggregator_name,
        }
    }
}

#[async_trait]
impl ConfigQuery for AwsAggregatorQuery {
    async fn select(&self, expression: &str, next_token: Option<&str>) -> Result<QueryPage> {
        let output = self
            .client
            .select_aggregate_resource_config()
            .expression(expression)
            .configuration_aggregator_name(&self.aggregator_name)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .with_context(|| format!("querying Config aggregator {}", self.aggregator_name))?;

        Ok(QueryPage {
            results: output.results().to_vec(),
            next_token: output.next_token().map(str::to_string),
        })
    }
}
