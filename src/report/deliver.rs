//! Report delivery to S3
//!
//! Uploads the finished workbook under a timestamped key and returns the
//! object URL. Retry policy is whatever the SDK's defaults provide.

use anyhow::{bail, Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;

/// Upload the workbook at `path` to `s3://{bucket}/{prefix}/`.
pub async fn deliver_report(
    client: &aws_sdk_s3::Client,
    path: &Path,
    bucket: &str,
    prefix: &str,
) -> Result<String> {
    validate_prefix(prefix)?;

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("inventory");
    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    let key = format!("{prefix}/{stem}-{timestamp}.xlsx");

    tracing::info!(
        "uploading file '{}' to bucket '{bucket}' with key '{key}'",
        path.display()
    );

    let body = ByteStream::from_path(path)
        .await
        .with_context(|| format!("reading report file {}", path.display()))?;

    client
        .put_object()
        .bucket(bucket)
        .key(&key)
        .body(body)
        .send()
        .await
        .with_context(|| format!("uploading report to bucket {bucket}"))?;

    tracing::info!("completed file upload");

    Ok(format!("https://{bucket}.s3.amazonaws.com/{key}"))
}

fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.contains("..") || prefix.starts_with('/') {
        bail!("invalid target path format: {prefix}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_traversal_prefixes() {
        assert!(validate_prefix("../secrets").is_err());
        assert!(validate_prefix("/absolute").is_err());
        assert!(validate_prefix("reports/inventory").is_ok());
    }
}
