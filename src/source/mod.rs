//! Paginated resource sources
//!
//! Two ways of pulling resource pages out of AWS Config: a single query
//! against an organization-wide aggregator, or per-account queries behind
//! cross-account role assumption. Both walk an opaque continuation token
//! until the provider stops returning one; they deliberately differ in
//! failure policy (see the variant modules).
//!
//! [`ConfigQuery`] is the seam between the pagination state machines and the
//! AWS SDK, which also keeps the state machines testable against stubs.

pub mod aggregator;
pub mod cross_account;

pub use aggregator::AggregatorSource;
pub use cross_account::CrossAccountSource;

use anyhow::Result;
use async_trait::async_trait;

/// One page of a Config advanced query: JSON-encoded resource documents plus
/// the continuation token, if any.
#[derive(Debug, Clone, Default)]
pub struct QueryPage {
    pub results: Vec<String>,
    pub next_token: Option<String>,
}

impl QueryPage {
    /// The continuation token, treating the provider's empty-string sentinel
    /// as absent.
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// A filtered Config advanced query; one call fetches one page.
#[async_trait]
pub trait ConfigQuery: Send + Sync {
    async fn select(&self, expression: &str, next_token: Option<&str>) -> Result<QueryPage>;
}

/// Yields successive pages of raw resource documents until exhausted.
#[async_trait]
pub trait ResourceSource: Send {
    /// The next page, or `None` once the source is drained.
    async fn next_page(&mut self) -> Result<Option<Vec<String>>>;
}
