//! Workload identity federation: OIDC token -> STS token -> service account token

use super::{http_client, read_json};
use crate::config::Config;
use crate::domain::TokenSource;
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const TOKEN_EXCHANGE_GRANT: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
const JWT_TOKEN_TYPE: &str = "urn:ietf:params:oauth:token-type:jwt";
const ACCESS_TOKEN_TYPE: &str = "urn:ietf:params:oauth:token-type:access_token";
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Scopes granted to the impersonated service account
pub const WORKSPACE_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/calendar",
];

#[derive(Debug, Deserialize)]
struct StsTokenResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
struct GenerateAccessTokenRequest<'a> {
    scope: &'a [&'a str],
    lifetime: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateAccessTokenResponse {
    access_token: String,
}

/// Resolves a fresh access token on every call
pub struct WorkloadIdentityTokenSource {
    http: reqwest::Client,
    config: Config,
}

impl WorkloadIdentityTokenSource {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            http: http_client(config.request_timeout_secs)?,
            config,
        })
    }

    async fn exchange_oidc_token(&self, provider: &str, oidc_token: &str) -> anyhow::Result<String> {
        let audience = format!("//iam.googleapis.com/{}", provider.trim_start_matches('/'));
        let url = format!("{}/v1/token", self.config.sts_url.trim_end_matches('/'));

        let response = self
            .http
            .post(url)
            .form(&[
                ("grant_type", TOKEN_EXCHANGE_GRANT),
                ("audience", audience.as_str()),
                ("scope", CLOUD_PLATFORM_SCOPE),
                ("requested_token_type", ACCESS_TOKEN_TYPE),
                ("subject_token", oidc_token),
                ("subject_token_type", JWT_TOKEN_TYPE),
            ])
            .send()
            .await
            .context("STS token exchange request failed")?;

        let body: StsTokenResponse = read_json(response, "STS token exchange").await?;
        Ok(body.access_token)
    }

    async fn impersonate(&self, federated_token: &str, service_account: &str) -> anyhow::Result<String> {
        let url = format!(
            "{}/v1/projects/-/serviceAccounts/{}:generateAccessToken",
            self.config.iam_credentials_url.trim_end_matches('/'),
            service_account
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(federated_token)
            .json(&GenerateAccessTokenRequest {
                scope: &WORKSPACE_SCOPES,
                lifetime: "3600s",
            })
            .send()
            .await
            .context("service account impersonation request failed")?;

        let body: GenerateAccessTokenResponse =
            read_json(response, "service account impersonation").await?;
        Ok(body.access_token)
    }
}

#[async_trait]
impl TokenSource for WorkloadIdentityTokenSource {
    async fn access_token(&self) -> anyhow::Result<String> {
        let missing = self.config.missing_credentials();
        if !missing.is_empty() {
            bail!("missing configuration: {}", missing.join(", "));
        }

        // missing_credentials() guarantees all four are present
        let (Some(provider), Some(oidc_token), Some(service_account)) = (
            self.config.workload_identity_provider.as_deref(),
            self.config.oidc_token.as_deref(),
            self.config.service_account_email.as_deref(),
        ) else {
            bail!("incomplete Google credential configuration");
        };

        let federated = self
            .exchange_oidc_token(provider.trim(), oidc_token.trim())
            .await?;
        tracing::debug!("STS token exchange succeeded");

        let token = self.impersonate(&federated, service_account.trim()).await?;
        tracing::debug!(service_account = %service_account, "Service account impersonation succeeded");
        Ok(token)
    }
}
