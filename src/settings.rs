//! Runtime configuration
//!
//! Everything the pipeline consumes from the environment, validated up
//! front: missing required settings abort before any fetch. CLI flags
//! override individual values in `main`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Tag historically used for the free-text diagram label column. Older
/// deployments read a "function" tag instead; see DESIGN.md.
pub const DEFAULT_LABEL_TAG: &str = "iir_diagram_label";

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_PARTITION: &str = "aws";
const DEFAULT_WORKSHEET_NAME: &str = "Inventory";
const DEFAULT_FIRST_WRITABLE_ROW: u32 = 3;

/// Which resource source variant to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Aggregator,
    CrossAccount,
}

/// One member account from `ACCOUNT_LIST`.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: SourceMode,
    pub region: String,
    pub partition: String,
    pub label_tag: String,
    /// Aggregator mode only.
    pub aggregator_name: Option<String>,
    /// Cross-account mode only.
    pub cross_account_role: Option<String>,
    pub accounts: Vec<Account>,
    pub report: ReportSettings,
}

#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub worksheet_name: String,
    /// 1-based row where the first record lands, matching the template.
    pub first_writable_row: u32,
    pub target_bucket: Option<String>,
    pub target_path: Option<String>,
}

impl Settings {
    /// Read settings for `mode` from the environment, failing fast on
    /// anything missing or malformed.
    pub fn from_env(mode: SourceMode) -> Result<Self> {
        let mut settings = Self {
            mode,
            region: env_or("AWS_REGION", DEFAULT_REGION),
            partition: env_or("AWS_PARTITION", DEFAULT_PARTITION),
            label_tag: env_or("INVENTORY_LABEL_TAG", DEFAULT_LABEL_TAG),
            aggregator_name: std::env::var("CONFIG_AGGREGATOR_NAME").ok(),
            cross_account_role: std::env::var("CROSS_ACCOUNT_ROLE_NAME").ok(),
            accounts: Vec::new(),
            report: ReportSettings {
                worksheet_name: env_or("REPORT_WORKSHEET_NAME", DEFAULT_WORKSHEET_NAME),
                first_writable_row: match std::env::var("REPORT_FIRST_WRITABLE_ROW") {
                    Ok(raw) => raw
                        .parse()
                        .context("REPORT_FIRST_WRITABLE_ROW must be a valid row number")?,
                    Err(_) => DEFAULT_FIRST_WRITABLE_ROW,
                },
                target_bucket: std::env::var("REPORT_TARGET_BUCKET_NAME").ok(),
                target_path: std::env::var("REPORT_TARGET_BUCKET_PATH").ok(),
            },
        };

        match mode {
            SourceMode::Aggregator => {
                if settings.aggregator_name.is_none() {
                    bail!("CONFIG_AGGREGATOR_NAME environment variable is required");
                }
            }
            SourceMode::CrossAccount => {
                if settings.cross_account_role.is_none() {
                    bail!("CROSS_ACCOUNT_ROLE_NAME environment variable is required");
                }
                let raw = std::env::var("ACCOUNT_LIST")
                    .context("ACCOUNT_LIST environment variable is required")?;
                settings.accounts = parse_account_list(&raw)?;
            }
        }

        Ok(settings)
    }

    /// Bucket and key prefix for delivery; required only when delivery is
    /// requested.
    pub fn delivery_target(&self) -> Result<(&str, &str)> {
        match (
            self.report.target_bucket.as_deref(),
            self.report.target_path.as_deref(),
        ) {
            (Some(bucket), Some(path)) => Ok((bucket, path)),
            _ => bail!(
                "REPORT_TARGET_BUCKET_NAME and REPORT_TARGET_BUCKET_PATH \
                 environment variables are required"
            ),
        }
    }
}

/// Parse the JSON account list, dropping entries without an id.
pub fn parse_account_list(raw: &str) -> Result<Vec<Account>> {
    #[derive(Deserialize)]
    struct MaybeAccount {
        #[serde(default)]
        id: Option<String>,
    }

    let entries: Vec<MaybeAccount> =
        serde_json::from_str(raw).context("ACCOUNT_LIST environment variable contains invalid JSON")?;

    let mut accounts = Vec::new();
    for entry in entries {
        match entry.id {
            Some(id) if !id.is_empty() => accounts.push(Account { id }),
            _ => tracing::warn!("skipping account with missing 'id' field"),
        }
    }
    Ok(accounts)
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}
