//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with the service desk.
//! NO HTTP - direct function calls.

use super::{
    error::ServiceDeskError,
    model::{
        Client, Invoice, NewClient, OrderFilter, Part, ServiceOrder, StatusChange, Technician,
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// Service desk API for inter-module communication
#[async_trait]
pub trait ServiceDeskApi: Send + Sync {
    // ===== Clients =====

    /// Create a client, or update the one with the same national id
    async fn upsert_client(&self, new: NewClient) -> Result<Client, ServiceDeskError>;

    async fn get_client(&self, id: Uuid) -> Result<Client, ServiceDeskError>;

    // ===== Technicians =====

    async fn list_technicians(&self, active_only: bool)
        -> Result<Vec<Technician>, ServiceDeskError>;

    // ===== Inventory =====

    /// Barcode lookup
    async fn find_part_by_code(&self, code: &str) -> Result<Part, ServiceDeskError>;

    // ===== Orders =====

    async fn get_order(&self, id: Uuid) -> Result<ServiceOrder, ServiceDeskError>;

    async fn list_orders(&self, filter: OrderFilter)
        -> Result<Vec<ServiceOrder>, ServiceDeskError>;

    async fn change_status(
        &self,
        order_id: Uuid,
        change: StatusChange,
    ) -> Result<ServiceOrder, ServiceDeskError>;

    async fn invoice(&self, order_id: Uuid) -> Result<Invoice, ServiceDeskError>;
}
