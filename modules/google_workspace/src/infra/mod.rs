//! Infrastructure layer - outbound HTTP adapters

pub mod credentials;
pub mod google_api;

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use credentials::WorkloadIdentityTokenSource;
pub use google_api::GoogleRestApis;

pub(crate) fn http_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

/// Fail on non-2xx with the upstream body attached, then decode JSON
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    call: &str,
) -> anyhow::Result<T> {
    let response = ensure_success(response, call).await?;
    response
        .json::<T>()
        .await
        .with_context(|| format!("{} returned an unreadable body", call))
}

pub(crate) async fn ensure_success(
    response: reqwest::Response,
    call: &str,
) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("{} returned {}: {}", call, status, body.trim());
    }
    Ok(response)
}
