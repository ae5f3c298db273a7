//! Layered configuration
//!
//! Precedence, lowest first: serde defaults, the YAML file,
//! `SERVITECH_`-prefixed variables (`__` separates levels) and finally the
//! legacy variable names shared with the hosted frontend.

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Used when `--config` is not given and the file exists
pub const DEFAULT_CONFIG_PATH: &str = "config/servitech.yaml";

/// Legacy variable -> config key; the first present variable of a key wins
const LEGACY_ENV: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("NEXT_PUBLIC_SUPABASE_URL", "auth.supabase_url"),
    ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "auth.anon_key"),
    ("SUPABASE_JWT_SECRET", "auth.jwt_secret"),
    ("GCP_WORKLOAD_IDENTITY_PROVIDER", "google.workload_identity_provider"),
    ("VERCEL_OIDC_TOKEN", "google.oidc_token"),
    ("GCP_PROJECT_ID", "google.project_id"),
    ("GCP_SERVICE_ACCOUNT_EMAIL", "google.service_account_email"),
    ("GEMINI_API_KEY", "assistant.api_key"),
    ("API_KEY", "assistant.api_key"),
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file {0} does not exist")]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("invalid bind address '{0}'")]
    InvalidBind(String),

    #[error("auth.jwt_secret (SUPABASE_JWT_SECRET) is required while auth.enabled is true")]
    MissingJwtSecret,
}

/// Whole application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub service_desk: service_desk::Config,
    #[serde(default)]
    pub google: google_workspace::Config,
    #[serde(default)]
    pub assistant: assistant::Config,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Browser origins allowed to call the API with credentials
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_allowed_origins: Vec::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// `postgres://...` or `sqlite://...`
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Apply pending migrations on start-up
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Off only for local development
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// HS256 secret the access tokens are signed with
    #[serde(default)]
    pub jwt_secret: Option<String>,

    #[serde(default = "default_audience")]
    pub audience: String,

    /// Where browsers without a session are sent
    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default)]
    pub supabase_url: Option<String>,

    #[serde(default)]
    pub anon_key: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jwt_secret: None,
            audience: default_audience(),
            login_path: default_login_path(),
            supabase_url: None,
            anon_key: None,
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_database_url() -> String {
    "sqlite://servitech.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_audience() -> String {
    "authenticated".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load from `path` (or [`DEFAULT_CONFIG_PATH`]) and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, std::env::vars())
    }

    /// Load with an explicit set of legacy variables
    pub fn load_with<I>(path: Option<&Path>, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut figment = Figment::new();
        match path {
            Some(path) if !path.exists() => return Err(ConfigError::MissingFile(path.to_path_buf())),
            Some(path) => figment = figment.merge(Yaml::file(path)),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    figment = figment.merge(Yaml::file(default));
                }
            }
        }

        figment = figment.merge(Env::prefixed("SERVITECH_").split("__"));
        for (key, value) in legacy_overrides(vars) {
            figment = figment.merge(Serialized::default(key, value));
        }

        let config: AppConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        let secret_missing = self
            .auth
            .jwt_secret
            .as_deref()
            .map_or(true, |s| s.trim().is_empty());
        if self.auth.enabled && secret_missing {
            return Err(ConfigError::MissingJwtSecret);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.server.bind.clone()))
    }
}

/// Config key/value pairs for the legacy variables present in `vars`
pub fn legacy_overrides<I>(vars: I) -> Vec<(&'static str, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: std::collections::HashMap<String, String> = vars
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .collect();

    let mut overrides: Vec<(&'static str, String)> = Vec::new();
    for (var, key) in LEGACY_ENV {
        if overrides.iter().any(|(k, _)| k == key) {
            continue;
        }
        if let Some(value) = vars.get(*var) {
            overrides.push((*key, value.clone()));
        }
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_gemini_key_wins_over_api_key() {
        let overrides = legacy_overrides(vars(&[
            ("API_KEY", "generic"),
            ("GEMINI_API_KEY", "gemini"),
        ]));
        assert_eq!(overrides, vec![("assistant.api_key", "gemini".to_string())]);

        let overrides = legacy_overrides(vars(&[("API_KEY", "generic")]));
        assert_eq!(overrides, vec![("assistant.api_key", "generic".to_string())]);
    }

    #[test]
    fn test_blank_and_unrelated_variables_are_ignored() {
        let overrides = legacy_overrides(vars(&[
            ("SUPABASE_JWT_SECRET", "  "),
            ("HOME", "/root"),
        ]));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_auth_requires_secret() {
        let config = AppConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::MissingJwtSecret)));

        let mut config = AppConfig::default();
        config.auth.enabled = false;
        assert!(config.validate().is_ok());
    }
}
