//! Configuration for the Google Workspace module

use serde::Deserialize;

/// Google Workspace configuration
///
/// The four credential fields are usually filled from the legacy
/// `GCP_WORKLOAD_IDENTITY_PROVIDER`, `VERCEL_OIDC_TOKEN`, `GCP_PROJECT_ID`
/// and `GCP_SERVICE_ACCOUNT_EMAIL` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Full workload identity provider resource name
    /// (`projects/<n>/locations/global/workloadIdentityPools/<pool>/providers/<provider>`)
    #[serde(default)]
    pub workload_identity_provider: Option<String>,

    /// OIDC token issued by the hosting platform
    #[serde(default)]
    pub oidc_token: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    /// Service account impersonated for Drive and Calendar calls
    #[serde(default)]
    pub service_account_email: Option<String>,

    /// Security Token Service base URL
    #[serde(default = "default_sts_url")]
    pub sts_url: String,

    /// IAM Credentials API base URL
    #[serde(default = "default_iam_credentials_url")]
    pub iam_credentials_url: String,

    /// Drive upload API base URL
    #[serde(default = "default_drive_upload_url")]
    pub drive_upload_url: String,

    /// Calendar API base URL
    #[serde(default = "default_calendar_url")]
    pub calendar_url: String,

    /// Calendar used when a request names none
    #[serde(default = "default_calendar_id")]
    pub default_calendar_id: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum accepted `/api/google-service` body in bytes (base64 inflates files by a third)
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Config {
    /// Environment names of the credential settings that are absent or blank
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());

        let mut missing = Vec::new();
        if blank(&self.workload_identity_provider) {
            missing.push("GCP_WORKLOAD_IDENTITY_PROVIDER");
        }
        if blank(&self.oidc_token) {
            missing.push("VERCEL_OIDC_TOKEN");
        }
        if blank(&self.project_id) {
            missing.push("GCP_PROJECT_ID");
        }
        if blank(&self.service_account_email) {
            missing.push("GCP_SERVICE_ACCOUNT_EMAIL");
        }
        missing
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workload_identity_provider: None,
            oidc_token: None,
            project_id: None,
            service_account_email: None,
            sts_url: default_sts_url(),
            iam_credentials_url: default_iam_credentials_url(),
            drive_upload_url: default_drive_upload_url(),
            calendar_url: default_calendar_url(),
            default_calendar_id: default_calendar_id(),
            request_timeout_secs: default_request_timeout_secs(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

fn default_sts_url() -> String {
    "https://sts.googleapis.com".to_string()
}

fn default_iam_credentials_url() -> String {
    "https://iamcredentials.googleapis.com".to_string()
}

fn default_drive_upload_url() -> String {
    "https://www.googleapis.com/upload/drive/v3".to_string()
}

fn default_calendar_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_request_bytes() -> usize {
    25 * 1024 * 1024 // 25MB
}
