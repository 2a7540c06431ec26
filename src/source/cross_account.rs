//! Cross-account resource source
//!
//! Walks an explicit account list; per account, assumes a scoped role and
//! pages a single-account Config query. One account's provider error yields
//! an empty page for that account only and collection moves on to the next
//! account, so a broken member account never hides the rest of the
//! organization from the report. This is a deliberate divergence from the
//! aggregator variant's fail-fast policy.

use super::{ConfigQuery, QueryPage, ResourceSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_config::config::Credentials;

/// Builds an account-scoped [`ConfigQuery`], typically by assuming a role.
#[async_trait]
pub trait AccountQueryFactory: Send + Sync {
    async fn connect(&self, account_id: &str) -> Result<Box<dyn ConfigQuery>>;
}

struct CurrentAccount {
    account_id: String,
    query: Box<dyn ConfigQuery>,
    next_token: Option<String>,
}

pub struct CrossAccountSource<F> {
    factory: F,
    expression: String,
    accounts: Vec<String>,
    next_account: usize,
    current: Option<CurrentAccount>,
}

impl<F: AccountQueryFactory> CrossAccountSource<F> {
    pub fn new(factory: F, expression: String, accounts: Vec<String>) -> Self {
        Self {
            factory,
            expression,
            accounts,
            next_account: 0,
            current: None,
        }
    }
}

#[async_trait]
impl<F: AccountQueryFactory> ResourceSource for CrossAccountSource<F> {
    async fn next_page(&mut self) -> Result<Option<Vec<String>>> {
        loop {
            if let Some(current) = self.current.as_mut() {
                match current
                    .query
                    .select(&self.expression, current.next_token.as_deref())
                    .await
                {
                    Ok(page) => {
                        tracing::debug!(
                            "page returned {} resources and next token of '{}'",
                            page.results.len(),
                            page.next_token.as_deref().unwrap_or("")
                        );
                        let continuation = page.continuation().map(str::to_string);
                        if continuation.is_none() {
                            self.current = None;
                        } else {
                            current.next_token = continuation;
                        }
                        return Ok(Some(page.results));
                    }
                    Err(err) => {
                        tracing::error!(
                            "received error {:#} while retrieving resources from account {}, returning empty results",
                            err,
                            current.account_id
                        );
                        self.current = None;
                        return Ok(Some(Vec::new()));
                    }
                }
            }

            let Some(account_id) = self.accounts.get(self.next_account).cloned() else {
                return Ok(None);
            };
            self.next_account += 1;

            tracing::info!("retrieving inventory for account {account_id}");

            match self.factory.connect(&account_id).await {
                Ok(query) => {
                    self.current = Some(CurrentAccount {
                        account_id,
                        query,
                        next_token: None,
                    });
                }
                Err(err) => {
                    tracing::error!(
                        "received error {err:#} while connecting to account {account_id}, returning empty results"
                    );
                    return Ok(Some(Vec::new()));
                }
            }
        }
    }
}

/// Role-assuming factory backed by STS.
pub struct AwsAccountQueryFactory {
    sts: aws_sdk_sts::Client,
    role_name: String,
    partition: String,
    region: String,
}

impl AwsAccountQueryFactory {
    pub fn new(sts: aws_sdk_sts::Client, role_name: String, partition: String, region: String) -> Self {
        Self {
            sts,
            role_name,
            partition,
            region,
        }
    }
}

#[async_trait]
impl AccountQueryFactory for AwsAccountQueryFactory {
    async fn connect(&self, account_id: &str) -> Result<Box<dyn ConfigQuery>> {
        tracing::info!("assuming role on account {account_id}");

        let role_arn = format!(
            "arn:{}:iam::{}:role/{}",
            self.partition, account_id, self.role_name
        );

        let assumed = self
            .sts
            .assume_role()
            .role_arn(&role_arn)
            .role_session_name(format!("{account_id}-Assumed-Role"))
            .duration_seconds(900)
            .send()
            .await
            .with_context(|| format!("assuming role {role_arn}"))?;

        let credentials = assumed
            .credentials()
            .context("assume-role response carried no credentials")?;

        let provider = Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            Some(credentials.session_token().to_string()),
            None,
            "fedinv-cross-account",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(provider)
            .region(Region::new(self.region.clone()))
            .load()
            .await;

        Ok(Box::new(AwsAccountQuery {
            client: aws_sdk_config::Client::new(&sdk_config),
        }))
    }
}

struct AwsAccountQuery {
    client: aws_sdk_config::Client,
}

#[async_trait]
impl ConfigQuery for AwsAccountQuery {
    async fn select(&self, expression: &str, next_token: Option<&str>) -> Result<QueryPage> {
        let output = self
            .client
            .select_resource_config()
            .expression(expression)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .context("querying Config in member account")?;

        Ok(QueryPage {
            results: output.results().to_vec(),
            next_token: output.next_token().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct StubQuery {
        pages: Mutex<VecDeque<Result<QueryPage>>>,
    }

    #[async_trait]
    impl ConfigQuery for StubQuery {
        async fn select(&self, _expression: &str, _next_token: Option<&str>) -> Result<QueryPage> {
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(QueryPage::default()))
        }
    }

    struct StubFactory {
        per_account: Mutex<std::collections::HashMap<String, Result<Vec<Result<QueryPage>>>>>,
    }

    impl StubFactory {
        fn new(accounts: Vec<(&str, Result<Vec<Result<QueryPage>>>)>) -> Self {
            Self {
                per_account: Mutex::new(
                    accounts
                        .into_iter()
                        .map(|(id, pages)| (id.to_string(), pages))
                        .collect(),
                ),
            }
        }
    }

    #[async_trait]
    impl AccountQueryFactory for StubFactory {
        async fn connect(&self, account_id: &str) -> Result<Box<dyn ConfigQuery>> {
            match self
                .per_account
                .lock()
                .unwrap()
                .remove(account_id)
                .expect("unexpected account")
            {
                Ok(pages) => Ok(Box::new(StubQuery {
                    pages: Mutex::new(pages.into_iter().collect()),
                })),
                Err(err) => Err(err),
            }
        }
    }

    fn page(results: &[&str], token: &str) -> Result<QueryPage> {
        Ok(QueryPage {
            results: results.iter().map(|s| s.to_string()).collect(),
            next_token: Some(token.to_string()),
        })
    }

    #[tokio::test]
    async fn failed_account_yields_one_empty_page_and_collection_continues() {
        let factory = StubFactory::new(vec![
            ("111111111111", Ok(vec![page(&["a1"], "")])),
            ("222222222222", Err(anyhow!("access denied"))),
            ("333333333333", Ok(vec![page(&["c1"], "")])),
        ]);
        let mut source = CrossAccountSource::new(
            factory,
            "SELECT ...".to_string(),
            vec![
                "111111111111".to_string(),
                "222222222222".to_string(),
                "333333333333".to_string(),
            ],
        );

        assert_eq!(source.next_page().await.unwrap(), Some(vec!["a1".to_string()]));
        assert_eq!(source.next_page().await.unwrap(), Some(Vec::new()));
        assert_eq!(source.next_page().await.unwrap(), Some(vec!["c1".to_string()]));
        assert_eq!(source.next_page().await.unwrap(), None);
    }

    #[tokio::test]
    async fn mid_pagination_error_degrades_to_empty_page_for_that_account() {
        let factory = StubFactory::new(vec![
            (
                "111111111111",
                Ok(vec![page(&["a1"], "more"), Err(anyhow!("throttled"))]),
            ),
            ("222222222222", Ok(vec![page(&["b1"], "")])),
        ]);
        let mut source = CrossAccountSource::new(
            factory,
            "SELECT ...".to_string(),
            vec!["111111111111".to_string(), "222222222222".to_string()],
        );

        assert_eq!(source.next_page().await.unwrap(), Some(vec!["a1".to_string()]));
        assert_eq!(source.next_page().await.unwrap(), Some(Vec::new()));
        assert_eq!(source.next_page().await.unwrap(), Some(vec!["b1".to_string()]));
        assert_eq!(source.next_page().await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_account_list_is_immediately_drained() {
        let factory = StubFactory::new(vec![]);
        let mut source = CrossAccountSource::new(factory, "SELECT ...".to_string(), vec![]);
        assert_eq!(source.next_page().await.unwrap(), None);
    }
}
