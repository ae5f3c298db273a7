//! Configuration for the assistant module

use serde::Deserialize;

/// Assistant configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Gemini API key (`GEMINI_API_KEY`, falling back to `API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Generative Language API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Earlier turns forwarded with each message; older ones are dropped
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Longest accepted user message, in characters
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_history: default_max_history(),
            max_message_chars: default_max_message_chars(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_history() -> usize {
    20
}

fn default_max_message_chars() -> usize {
    4000
}
