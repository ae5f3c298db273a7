//! Infrastructure layer - language model adapters

pub mod gemini;

pub use gemini::GeminiBackend;
