//! Module declaration and lifecycle

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::AssistantApi;
use crate::domain::{ChatBackend, Service};
use crate::infra::GeminiBackend;
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Technical assistant module
#[derive(Default)]
pub struct AssistantModule {
    service: RwLock<Option<Arc<Service>>>,
}

impl AssistantModule {
    pub fn init(&self, config: Config) -> Result<()> {
        let backend: Option<Arc<dyn ChatBackend>> = match config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            Some(key) => Some(Arc::new(GeminiBackend::new(key.to_string(), config.clone())?)),
            None => {
                tracing::warn!("No Gemini API key configured; the assistant will answer with the fallback reply");
                None
            }
        };

        *self.service.write() = Some(Arc::new(Service::new(backend, config)));
        tracing::info!("Assistant module initialized");
        Ok(())
    }

    fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    pub fn client(&self) -> Result<Arc<dyn AssistantApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering assistant REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }
}
