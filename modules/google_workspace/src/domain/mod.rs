//! Domain layer - request validation and credential orchestration

pub mod ports;
pub mod service;

pub use ports::{GoogleApis, TokenSource};
pub use service::Service;
