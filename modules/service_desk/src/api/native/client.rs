//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    Client, Invoice, NewClient, OrderFilter, Part, ServiceDeskApi, ServiceDeskError,
    ServiceOrder, StatusChange, Technician,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
///
/// Used by other modules in the same process, without HTTP.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ServiceDeskApi for NativeClient {
    async fn upsert_client(&self, new: NewClient) -> Result<Client, ServiceDeskError> {
        self.service.upsert_client(new).await
    }

    async fn get_client(&self, id: Uuid) -> Result<Client, ServiceDeskError> {
        self.service.get_client(id).await
    }

    async fn list_technicians(
        &self,
        active_only: bool,
    ) -> Result<Vec<Technician>, ServiceDeskError> {
        self.service.list_technicians(active_only).await
    }

    async fn find_part_by_code(&self, code: &str) -> Result<Part, ServiceDeskError> {
        self.service.find_part_by_code(code).await
    }

    async fn get_order(&self, id: Uuid) -> Result<ServiceOrder, ServiceDeskError> {
        self.service.get_order(id).await
    }

    async fn list_orders(
        &self,
        filter: OrderFilter,
    ) -> Result<Vec<ServiceOrder>, ServiceDeskError> {
        self.service.list_orders(filter).await
    }

    async fn change_status(
        &self,
        order_id: Uuid,
        change: StatusChange,
    ) -> Result<ServiceOrder, ServiceDeskError> {
        self.service.change_status(order_id, change).await
    }

    async fn invoice(&self, order_id: Uuid) -> Result<Invoice, ServiceDeskError> {
        self.service.invoice(order_id).await
    }
}
