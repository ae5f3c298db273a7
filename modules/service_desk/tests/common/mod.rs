//! Common test utilities: in-memory repositories and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use service_desk::config::Config;
use service_desk::contract::*;
use service_desk::domain::events::{EventPublisher, ServiceDeskEvent};
use service_desk::domain::repository::*;
use service_desk::domain::Service;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// `Decimal` from a string literal such as `"12.50"`
pub fn money(value: &str) -> Decimal {
    value.parse().unwrap()
}

// ===== Mock repositories =====

#[derive(Clone, Default)]
pub struct MockClientRepo {
    data: Arc<RwLock<HashMap<Uuid, Client>>>,
}

impl MockClientRepo {
    pub fn count(&self) -> usize {
        self.data.read().len()
    }
}

#[async_trait]
impl ClientRepository for MockClientRepo {
    async fn upsert_by_national_id(&self, client: &Client) -> anyhow::Result<Client> {
        let mut data = self.data.write();
        let existing = data
            .values()
            .find(|c| c.national_id == client.national_id)
            .cloned();

        let stored = match existing {
            Some(existing) => Client {
                id: existing.id,
                created_at: existing.created_at,
                ..client.clone()
            },
            None => client.clone(),
        };
        data.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Client>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_national_id(&self, national_id: &str) -> anyhow::Result<Option<Client>> {
        Ok(self
            .data
            .read()
            .values()
            .find(|c| c.national_id == national_id)
            .cloned())
    }

    async fn search(&self, term: Option<&str>) -> anyhow::Result<Vec<Client>> {
        let term = term.map(str::to_lowercase);
        let mut results: Vec<Client> = self
            .data
            .read()
            .values()
            .filter(|c| match &term {
                Some(t) => {
                    c.full_name.to_lowercase().contains(t)
                        || c.national_id.to_lowercase().contains(t)
                }
                None => true,
            })
            .cloned()
            .collect();
        results.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(results)
    }

    async fn update(&self, client: &Client) -> anyhow::Result<Client> {
        self.data.write().insert(client.id, client.clone());
        Ok(client.clone())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.data.write().remove(&id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockEquipmentRepo {
    data: Arc<RwLock<HashMap<Uuid, Equipment>>>,
}

#[async_trait]
impl EquipmentRepository for MockEquipmentRepo {
    async fn create(&self, equipment: &Equipment) -> anyhow::Result<Equipment> {
        self.data.write().insert(equipment.id, equipment.clone());
        Ok(equipment.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Equipment>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn list_by_client(&self, client_id: Uuid) -> anyhow::Result<Vec<Equipment>> {
        let mut results: Vec<Equipment> = self
            .data
            .read()
            .values()
            .filter(|e| e.client_id == client_id)
            .cloned()
            .collect();
        results.sort_by_key(|e| e.created_at);
        Ok(results)
    }
}

#[derive(Clone, Default)]
pub struct MockTechnicianRepo {
    data: Arc<RwLock<HashMap<Uuid, Technician>>>,
}

#[async_trait]
impl TechnicianRepository for MockTechnicianRepo {
    async fn create(&self, technician: &Technician) -> anyhow::Result<Technician> {
        self.data.write().insert(technician.id, technician.clone());
        Ok(technician.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Technician>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn list(&self, active_only: bool) -> anyhow::Result<Vec<Technician>> {
        let mut results: Vec<Technician> = self
            .data
            .read()
            .values()
            .filter(|t| !active_only || t.is_active)
            .cloned()
            .collect();
        results.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(results)
    }

    async fn update(&self, technician: &Technician) -> anyhow::Result<Technician> {
        self.data.write().insert(technician.id, technician.clone());
        Ok(technician.clone())
    }
}

#[derive(Clone, Default)]
pub struct MockPartRepo {
    data: Arc<RwLock<HashMap<Uuid, Part>>>,
}

#[async_trait]
impl PartRepository for MockPartRepo {
    async fn upsert_by_code(&self, part: &Part) -> anyhow::Result<Part> {
        let mut data = self.data.write();
        let existing = data.values().find(|p| p.code == part.code).cloned();

        let stored = match existing {
            Some(existing) => Part {
                id: existing.id,
                created_at: existing.created_at,
                ..part.clone()
            },
            None => part.clone(),
        };
        data.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Part>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Part>> {
        Ok(self.data.read().values().find(|p| p.code == code).cloned())
    }

    async fn search(&self, term: Option<&str>) -> anyhow::Result<Vec<Part>> {
        let term = term.map(str::to_lowercase);
        let mut results: Vec<Part> = self
            .data
            .read()
            .values()
            .filter(|p| match &term {
                Some(t) => p.code.to_lowercase().contains(t) || p.name.to_lowercase().contains(t),
                None => true,
            })
            .cloned()
            .collect();
        results.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(results)
    }

    async fn list_low_stock(&self) -> anyhow::Result<Vec<Part>> {
        let mut results: Vec<Part> = self
            .data
            .read()
            .values()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect();
        results.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(results)
    }

    async fn adjust_stock(&self, id: Uuid, delta: i32) -> anyhow::Result<Option<Part>> {
        let mut data = self.data.write();
        let Some(part) = data.get_mut(&id) else {
            return Ok(None);
        };
        let Some(level) = part.stock_level.checked_add(delta).filter(|l| *l >= 0) else {
            return Ok(None);
        };
        part.stock_level = level;
        part.updated_at = Utc::now();
        Ok(Some(part.clone()))
    }
}

#[derive(Clone, Default)]
pub struct MockOrderRepo {
    data: Arc<RwLock<Vec<ServiceOrder>>>,
    status_after_next_read: Arc<RwLock<Option<OrderStatus>>>,
}

impl MockOrderRepo {
    /// The next `find_by_id` hands out the current row, then the stored status
    /// becomes `status`, as if another request changed it right after the read
    pub fn change_status_after_next_read(&self, status: OrderStatus) {
        *self.status_after_next_read.write() = Some(status);
    }

    pub fn stored(&self, id: Uuid) -> Option<ServiceOrder> {
        self.data.read().iter().find(|o| o.id == id).cloned()
    }
}

#[async_trait]
impl ServiceOrderRepository for MockOrderRepo {
    async fn create(&self, order: &ServiceOrder) -> anyhow::Result<ServiceOrder> {
        self.data.write().push(order.clone());
        Ok(order.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ServiceOrder>> {
        let mut data = self.data.write();
        let Some(slot) = data.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        let found = slot.clone();
        if let Some(status) = self.status_after_next_read.write().take() {
            slot.status = status;
        }
        Ok(Some(found))
    }

    async fn find_by_number(&self, order_number: &str) -> anyhow::Result<Option<ServiceOrder>> {
        Ok(self
            .data
            .read()
            .iter()
            .find(|o| o.order_number == order_number)
            .cloned())
    }

    async fn list(&self, filter: &OrderFilter) -> anyhow::Result<Vec<ServiceOrder>> {
        // Insertion order is creation order; newest first
        Ok(self
            .data
            .read()
            .iter()
            .rev()
            .filter(|o| filter.status.is_none_or(|s| o.status == s))
            .filter(|o| filter.technician_id.is_none_or(|t| o.technician_id == Some(t)))
            .filter(|o| filter.client_id.is_none_or(|c| o.client_id == c))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        order: &ServiceOrder,
        expected: OrderStatus,
    ) -> anyhow::Result<Option<ServiceOrder>> {
        let mut data = self.data.write();
        match data
            .iter_mut()
            .find(|o| o.id == order.id && o.status == expected)
        {
            Some(slot) => {
                *slot = order.clone();
                Ok(Some(order.clone()))
            }
            None => Ok(None),
        }
    }

    async fn count_for_client(&self, client_id: Uuid) -> anyhow::Result<u64> {
        Ok(self
            .data
            .read()
            .iter()
            .filter(|o| o.client_id == client_id)
            .count() as u64)
    }
}

#[derive(Clone, Default)]
pub struct MockOrderItemRepo {
    data: Arc<RwLock<Vec<OrderItem>>>,
    fail_next_add: Arc<RwLock<bool>>,
}

impl MockOrderItemRepo {
    /// Make the next `add` fail, to exercise the stock compensation path
    pub fn fail_next_add(&self) {
        *self.fail_next_add.write() = true;
    }
}

#[async_trait]
impl OrderItemRepository for MockOrderItemRepo {
    async fn add(&self, item: &OrderItem) -> anyhow::Result<OrderItem> {
        if std::mem::take(&mut *self.fail_next_add.write()) {
            anyhow::bail!("simulated storage failure");
        }
        self.data.write().push(item.clone());
        Ok(item.clone())
    }

    async fn list_by_order(&self, order_id: Uuid) -> anyhow::Result<Vec<OrderItem>> {
        Ok(self
            .data
            .read()
            .iter()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn remove(&self, id: Uuid) -> anyhow::Result<()> {
        self.data.write().retain(|i| i.id != id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockHistoryRepo {
    data: Arc<RwLock<Vec<StatusHistory>>>,
    fail_next_append: Arc<RwLock<bool>>,
}

impl MockHistoryRepo {
    pub fn fail_next_append(&self) {
        *self.fail_next_append.write() = true;
    }
}

#[async_trait]
impl StatusHistoryRepository for MockHistoryRepo {
    async fn append(&self, entry: &StatusHistory) -> anyhow::Result<StatusHistory> {
        if std::mem::take(&mut *self.fail_next_append.write()) {
            anyhow::bail!("simulated storage failure");
        }
        self.data.write().push(entry.clone());
        Ok(entry.clone())
    }

    async fn list_by_order(&self, order_id: Uuid) -> anyhow::Result<Vec<StatusHistory>> {
        Ok(self
            .data
            .read()
            .iter()
            .filter(|h| h.order_id == order_id)
            .cloned()
            .collect())
    }
}

/// Captures published events for assertions
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<RwLock<Vec<ServiceDeskEvent>>>,
}

impl RecordingPublisher {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.read().iter().map(ServiceDeskEvent::name).collect()
    }

    pub fn events(&self) -> Vec<ServiceDeskEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: ServiceDeskEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

// ===== Test harness =====

/// Service wired to in-memory repositories, with handles to inspect them
pub struct TestHarness {
    pub service: Arc<Service>,
    pub clients: MockClientRepo,
    pub parts: MockPartRepo,
    pub orders: MockOrderRepo,
    pub order_items: MockOrderItemRepo,
    pub history: MockHistoryRepo,
    pub events: RecordingPublisher,
}

pub fn create_test_service() -> TestHarness {
    let clients = MockClientRepo::default();
    let parts = MockPartRepo::default();
    let orders = MockOrderRepo::default();
    let order_items = MockOrderItemRepo::default();
    let history = MockHistoryRepo::default();
    let events = RecordingPublisher::default();

    let repos = Repositories {
        clients: Arc::new(clients.clone()),
        equipment: Arc::new(MockEquipmentRepo::default()),
        technicians: Arc::new(MockTechnicianRepo::default()),
        parts: Arc::new(parts.clone()),
        orders: Arc::new(orders.clone()),
        order_items: Arc::new(order_items.clone()),
        history: Arc::new(history.clone()),
    };

    let service = Arc::new(Service::new(repos, Arc::new(events.clone()), Config::default()));

    TestHarness {
        service,
        clients,
        parts,
        orders,
        order_items,
        history,
        events,
    }
}

// ===== Fixtures =====

pub fn new_client(national_id: &str, full_name: &str) -> NewClient {
    NewClient {
        national_id: national_id.to_string(),
        full_name: full_name.to_string(),
        phone: Some("0991234567".to_string()),
        email: None,
        address: Some("Av. Amazonas N34-120".to_string()),
        category: ClientCategory::Regular,
    }
}

pub fn new_fridge() -> NewEquipment {
    NewEquipment {
        equipment_type: "Refrigerador".to_string(),
        brand: "LG".to_string(),
        model: Some("GT32".to_string()),
        serial_number: Some("SN-00991".to_string()),
        specs: Some(serde_json::json!({"voltage": 110})),
    }
}

pub fn new_part(code: &str, stock_level: i32, unit_price: &str) -> NewPart {
    NewPart {
        code: code.to_string(),
        name: format!("Repuesto {}", code),
        description: None,
        stock_level,
        min_stock: 2,
        unit_cost: money("1.00"),
        unit_price: money(unit_price),
    }
}

/// A client with one appliance and a fresh PENDING order
pub async fn seed_order(service: &Service, labor_cost: &str) -> (Client, Equipment, ServiceOrder) {
    let client = service
        .upsert_client(new_client("1712345678", "María Pérez"))
        .await
        .unwrap();
    let equipment = service
        .register_equipment(client.id, new_fridge())
        .await
        .unwrap();
    let order = service
        .create_order(
            NewServiceOrder {
                client_id: client.id,
                equipment_id: equipment.id,
                technician_id: None,
                reported_issue: Some("No enfría".to_string()),
                labor_cost: money(labor_cost),
                is_warranty: false,
            },
            None,
        )
        .await
        .unwrap();
    (client, equipment, order)
}
