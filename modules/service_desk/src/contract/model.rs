//! Contract models for the service desk
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ===== Clients =====

/// Commercial category of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClientCategory {
    #[default]
    Regular,
    Premium,
    Enterprise,
}

impl ClientCategory {
    pub const ALL: [ClientCategory; 3] = [Self::Regular, Self::Premium, Self::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Premium => "PREMIUM",
            Self::Enterprise => "ENTERPRISE",
        }
    }
}

impl FromStr for ClientCategory {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownLiteral::new("client category", s))
    }
}

impl fmt::Display for ClientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: Uuid,
    /// National identity document number (unique)
    pub national_id: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: ClientCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or upserting a client
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewClient {
    pub national_id: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: ClientCategory,
}

/// Partial update for a client; `None` leaves a field untouched
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientPatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: Option<ClientCategory>,
}

// ===== Equipment =====

/// Appliance owned by a client
#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: Uuid,
    pub client_id: Uuid,
    /// Appliance kind (washer, fridge, ...)
    pub equipment_type: String,
    pub brand: String,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    /// Open-ended attribute bag, always a JSON object
    pub specs: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewEquipment {
    pub equipment_type: String,
    pub brand: String,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub specs: Option<serde_json::Value>,
}

// ===== Technicians =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technician {
    pub id: Uuid,
    pub full_name: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    /// Commission percentage in 0..=100
    pub commission_rate: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTechnician {
    pub full_name: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub commission_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TechnicianPatch {
    pub full_name: Option<String>,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub commission_rate: Option<Decimal>,
}

// ===== Parts =====

/// Inventory line item consumable in repairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub id: Uuid,
    /// Barcode / SKU (unique)
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub stock_level: i32,
    pub min_stock: i32,
    pub unit_cost: Decimal,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Part {
    pub fn is_low_stock(&self) -> bool {
        self.stock_level <= self.min_stock
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewPart {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub stock_level: i32,
    pub min_stock: i32,
    pub unit_cost: Decimal,
    pub unit_price: Decimal,
}

// ===== Service orders =====

/// Lifecycle status of a service order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Diagnosis,
    Quoted,
    Approved,
    InProgress,
    WaitingParts,
    Completed,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 10] = [
        Self::Pending,
        Self::Diagnosis,
        Self::Quoted,
        Self::Approved,
        Self::InProgress,
        Self::WaitingParts,
        Self::Completed,
        Self::Ready,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Diagnosis => "DIAGNOSIS",
            Self::Quoted => "QUOTED",
            Self::Approved => "APPROVED",
            Self::InProgress => "IN_PROGRESS",
            Self::WaitingParts => "WAITING_PARTS",
            Self::Completed => "COMPLETED",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// No further transitions are accepted from a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownLiteral::new("order status", s))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of repair work tracked from intake to delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOrder {
    pub id: Uuid,
    /// Human-facing number, e.g. "OS-20261018-3FA9C2"
    pub order_number: String,
    pub client_id: Uuid,
    pub equipment_id: Uuid,
    pub technician_id: Option<Uuid>,
    pub status: OrderStatus,
    pub reported_issue: Option<String>,
    pub diagnosis: Option<String>,
    pub labor_cost: Decimal,
    pub total_cost: Decimal,
    pub is_warranty: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewServiceOrder {
    pub client_id: Uuid,
    pub equipment_id: Uuid,
    pub technician_id: Option<Uuid>,
    pub reported_issue: Option<String>,
    pub labor_cost: Decimal,
    pub is_warranty: bool,
}

/// Filters for listing service orders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub technician_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
}

/// Part consumed by a service order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub part_id: Uuid,
    pub quantity: i32,
    /// Unit price captured when the item was added
    pub price_at_time: Decimal,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price_at_time * Decimal::from(self.quantity)
    }
}

/// Audit trail entry for a status change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistory {
    pub id: Uuid,
    pub order_id: Uuid,
    /// `None` for the entry written at intake
    pub status_from: Option<OrderStatus>,
    pub status_to: OrderStatus,
    pub changed_by_id: Option<Uuid>,
    pub notes: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// Requested status change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub to: OrderStatus,
    pub changed_by_id: Option<Uuid>,
    pub notes: Option<String>,
}

// ===== Read models =====

/// One invoice line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    pub item_id: Uuid,
    pub part_code: String,
    pub part_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Invoice preview for a service order
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub order: ServiceOrder,
    pub client: Client,
    pub equipment: Equipment,
    pub technician: Option<Technician>,
    pub lines: Vec<InvoiceLine>,
    pub parts_subtotal: Decimal,
    pub labor_cost: Decimal,
    pub total: Decimal,
    /// Zero for warranty orders
    pub amount_due: Decimal,
}

/// Dashboard counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Every status is present, in lifecycle order
    pub orders_by_status: Vec<(OrderStatus, u64)>,
    pub open_orders: u64,
    pub low_stock_parts: u64,
    pub active_technicians: u64,
    pub delivered_revenue: Decimal,
}

/// Row-level failure during a spreadsheet import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRowError {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub message: String,
}

/// Outcome of a spreadsheet import
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportRowError>,
}

// ===== Session =====

/// Authenticated user attached to a request by the session layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

/// Parse failure for an enumerated literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLiteral {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownLiteral {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for UnknownLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownLiteral {}
