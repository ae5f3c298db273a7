//! Domain layer - prompt assembly and fallback policy

pub mod backend;
pub mod prompt;
pub mod service;

pub use backend::ChatBackend;
pub use service::Service;
