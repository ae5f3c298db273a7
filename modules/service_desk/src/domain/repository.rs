//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Client, Equipment, OrderFilter, OrderItem, OrderStatus, Part, ServiceOrder, StatusHistory,
    Technician,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Repository for clients
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert the client, or overwrite the row sharing its national id.
    /// Returns the stored row (which keeps the original id on conflict).
    async fn upsert_by_national_id(&self, client: &Client) -> Result<Client>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>>;

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Client>>;

    /// Case-insensitive match on name or national id, ordered by name
    async fn search(&self, term: Option<&str>) -> Result<Vec<Client>>;

    async fn update(&self, client: &Client) -> Result<Client>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Repository for client equipment
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn create(&self, equipment: &Equipment) -> Result<Equipment>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Equipment>>;

    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Equipment>>;
}

/// Repository for technicians
#[async_trait]
pub trait TechnicianRepository: Send + Sync {
    async fn create(&self, technician: &Technician) -> Result<Technician>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Technician>>;

    /// Ordered by name
    async fn list(&self, active_only: bool) -> Result<Vec<Technician>>;

    async fn update(&self, technician: &Technician) -> Result<Technician>;
}

/// Repository for inventory parts
#[async_trait]
pub trait PartRepository: Send + Sync {
    /// Insert the part, or overwrite the row sharing its code
    async fn upsert_by_code(&self, part: &Part) -> Result<Part>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Part>>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Part>>;

    /// Case-insensitive match on code or name, ordered by code
    async fn search(&self, term: Option<&str>) -> Result<Vec<Part>>;

    /// Parts with `stock_level <= min_stock`
    async fn list_low_stock(&self) -> Result<Vec<Part>>;

    /// Apply `delta` to the stock level in a single conditional statement.
    /// Returns `None` when the part is missing or the result would be negative.
    async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Option<Part>>;
}

/// Repository for service orders
#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    async fn create(&self, order: &ServiceOrder) -> Result<ServiceOrder>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceOrder>>;

    async fn find_by_number(&self, order_number: &str) -> Result<Option<ServiceOrder>>;

    /// Newest first
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<ServiceOrder>>;

    /// Write the mutable columns only while the stored status is still `expected`.
    /// `None` means the order moved on (or is gone) since it was read.
    async fn update(
        &self,
        order: &ServiceOrder,
        expected: OrderStatus,
    ) -> Result<Option<ServiceOrder>>;

    async fn count_for_client(&self, client_id: Uuid) -> Result<u64>;
}

/// Repository for parts attached to orders
#[async_trait]
pub trait OrderItemRepository: Send + Sync {
    async fn add(&self, item: &OrderItem) -> Result<OrderItem>;

    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<OrderItem>>;

    async fn remove(&self, id: Uuid) -> Result<()>;
}

/// Append-only audit trail of status changes
#[async_trait]
pub trait StatusHistoryRepository: Send + Sync {
    async fn append(&self, entry: &StatusHistory) -> Result<StatusHistory>;

    /// Oldest first
    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<StatusHistory>>;
}

/// Bundle of repositories the domain service depends on
#[derive(Clone)]
pub struct Repositories {
    pub clients: Arc<dyn ClientRepository>,
    pub equipment: Arc<dyn EquipmentRepository>,
    pub technicians: Arc<dyn TechnicianRepository>,
    pub parts: Arc<dyn PartRepository>,
    pub orders: Arc<dyn ServiceOrderRepository>,
    pub order_items: Arc<dyn OrderItemRepository>,
    pub history: Arc<dyn StatusHistoryRepository>,
}
