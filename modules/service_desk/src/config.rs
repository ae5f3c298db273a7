//! Configuration for the service desk module

use serde::Deserialize;

/// Service desk configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Prefix of generated order numbers ("OS" -> "OS-20261018-3FA9C2")
    #[serde(default = "default_order_number_prefix")]
    pub order_number_prefix: String,

    /// Maximum accepted size of an imported spreadsheet in bytes
    #[serde(default = "default_max_import_bytes")]
    pub max_import_bytes: usize,

    /// Emit domain events to the log
    #[serde(default = "default_true")]
    pub log_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order_number_prefix: default_order_number_prefix(),
            max_import_bytes: default_max_import_bytes(),
            log_events: true,
        }
    }
}

fn default_order_number_prefix() -> String {
    "OS".to_string()
}

fn default_max_import_bytes() -> usize {
    5 * 1024 * 1024 // 5MB
}

fn default_true() -> bool {
    true
}
