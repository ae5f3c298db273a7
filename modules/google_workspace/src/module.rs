//! Module declaration and lifecycle

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::GoogleWorkspaceApi;
use crate::domain::Service;
use crate::infra::{GoogleRestApis, WorkloadIdentityTokenSource};
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Google Workspace module: Drive uploads and Calendar events
#[derive(Default)]
pub struct GoogleWorkspaceModule {
    service: RwLock<Option<Arc<Service>>>,
}

impl GoogleWorkspaceModule {
    pub fn init(&self, config: Config) -> Result<()> {
        let missing = config.missing_credentials();
        if !missing.is_empty() {
            // Routes stay mounted; each call reports the gap
            tracing::warn!(missing = %missing.join(", "), "Google credentials are incomplete");
        }

        let tokens = Arc::new(WorkloadIdentityTokenSource::new(config.clone())?);
        let apis = Arc::new(GoogleRestApis::new(config.clone())?);
        *self.service.write() = Some(Arc::new(Service::new(tokens, apis, config)));

        tracing::info!("Google Workspace module initialized");
        Ok(())
    }

    fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    pub fn client(&self) -> Result<Arc<dyn GoogleWorkspaceApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering Google Workspace REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }
}
