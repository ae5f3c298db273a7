//! ServiTech Pro server
//!
//! Loads configuration, connects the database, wires the feature modules
//! behind the session middleware and serves them over HTTP.

pub mod config;
pub mod logging;
pub mod server;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use server::App;
