//! Module declaration and lifecycle

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::ServiceDeskApi;
use crate::domain::{EventPublisher, NoOpEventPublisher, Service, TracingEventPublisher};
use crate::infra::storage::{migrations::Migrator, sea_orm_repositories};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Service desk module: clients, equipment, technicians, inventory and orders
#[derive(Default)]
pub struct ServiceDeskModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl ServiceDeskModule {
    /// Build the domain service over `db`
    pub fn init(&self, config: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        let events: Arc<dyn EventPublisher> = if config.log_events {
            Arc::new(TracingEventPublisher)
        } else {
            Arc::new(NoOpEventPublisher)
        };

        let service = Arc::new(Service::new(sea_orm_repositories(db), events, config.clone()));
        *self.config.write() = config;
        *self.service.write() = Some(service);

        tracing::info!("Service desk initialized");
        Ok(())
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Service desk migrations completed");
        Ok(())
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client for other modules
    pub fn client(&self) -> Result<Arc<dyn ServiceDeskApi>> {
        Ok(Arc::new(NativeClient::new(self.service()?)))
    }

    /// Mount the REST routes
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering service desk REST routes");
        crate::api::rest::routes::register_routes(router, service)
    }
}
