//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// Query parameters with an optional free-text search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

// ===== Client DTOs =====

/// Client response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientDto {
    pub id: Uuid,

    /// National identity document number
    #[schema(example = "1712345678")]
    pub national_id: String,

    #[schema(example = "María Pérez")]
    pub full_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// REGULAR, PREMIUM or ENTERPRISE
    #[schema(example = "REGULAR")]
    pub category: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create-or-update client request, keyed by national id
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertClientRequest {
    pub national_id: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,

    /// Defaults to REGULAR
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial client update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateClientRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
}

/// List of clients
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientsListResponse {
    pub items: Vec<ClientDto>,
    pub total: usize,
}

/// Spreadsheet import outcome
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportReportDto {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportRowErrorDto>,
}

/// A row that could not be imported
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportRowErrorDto {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub message: String,
}

// ===== Equipment DTOs =====

/// Equipment response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentDto {
    pub id: Uuid,
    pub client_id: Uuid,

    #[schema(example = "Refrigerador")]
    pub equipment_type: String,

    #[schema(example = "LG")]
    pub brand: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,

    /// Free-form technical attributes
    pub specs: serde_json::Value,

    pub created_at: DateTime<Utc>,
}

/// Register equipment request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterEquipmentRequest {
    pub equipment_type: String,
    pub brand: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub specs: Option<serde_json::Value>,
}

/// List of equipment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentListResponse {
    pub items: Vec<EquipmentDto>,
    pub total: usize,
}

// ===== Technician DTOs =====

/// Technician response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TechnicianDto {
    pub id: Uuid,
    pub full_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Commission percentage
    #[schema(value_type = String, example = "12.50")]
    pub commission_rate: Decimal,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create technician request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTechnicianRequest {
    pub full_name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub commission_rate: Option<Decimal>,
}

/// Partial technician update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTechnicianRequest {
    pub full_name: Option<String>,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = Option<String>)]
    pub commission_rate: Option<Decimal>,
}

/// Activate or deactivate a technician
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetTechnicianActiveRequest {
    pub is_active: bool,
}

/// Query parameters for listing technicians
#[derive(Debug, Default, Deserialize)]
pub struct TechniciansQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// List of technicians
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TechniciansListResponse {
    pub items: Vec<TechnicianDto>,
    pub total: usize,
}

// ===== Part DTOs =====

/// Part response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PartDto {
    pub id: Uuid,

    /// Barcode / SKU
    #[schema(example = "7701234567890")]
    pub code: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub stock_level: i32,
    pub min_stock: i32,

    #[schema(value_type = String, example = "4.20")]
    pub unit_cost: Decimal,

    #[schema(value_type = String, example = "9.90")]
    pub unit_price: Decimal,

    /// Stock at or below the minimum
    pub low_stock: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create-or-update part request, keyed by code
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertPartRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock_level: i32,
    #[serde(default)]
    pub min_stock: i32,
    #[schema(value_type = String)]
    pub unit_cost: Decimal,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
}

/// Stock movement request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdjustStockRequest {
    /// Positive to receive, negative to withdraw
    pub delta: i32,
    #[serde(default)]
    pub reason: Option<String>,
}

/// List of parts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PartsListResponse {
    pub items: Vec<PartDto>,
    pub total: usize,
}

// ===== Service order DTOs =====

/// Service order response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceOrderDto {
    pub id: Uuid,

    #[schema(example = "OS-20250301-3FA2C1")]
    pub order_number: String,

    pub client_id: Uuid,
    pub equipment_id: Uuid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<Uuid>,

    #[schema(example = "PENDING")]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_issue: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,

    #[schema(value_type = String)]
    pub labor_cost: Decimal,

    #[schema(value_type = String)]
    pub total_cost: Decimal,

    pub is_warranty: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Intake request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub client_id: Uuid,
    pub equipment_id: Uuid,
    #[serde(default)]
    pub technician_id: Option<Uuid>,
    #[serde(default)]
    pub reported_issue: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub labor_cost: Option<Decimal>,
    #[serde(default)]
    pub is_warranty: bool,
}

/// Query parameters for listing orders
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub technician_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
}

/// List of service orders
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrdersListResponse {
    pub items: Vec<ServiceOrderDto>,
    pub total: usize,
}

/// Assign or unassign a technician
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignTechnicianRequest {
    /// `null` clears the assignment
    pub technician_id: Option<Uuid>,
}

/// Status change request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangeStatusRequest {
    #[schema(example = "IN_PROGRESS")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Diagnosis request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecordDiagnosisRequest {
    pub diagnosis: String,
}

/// Cost update request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCostsRequest {
    #[schema(value_type = Option<String>)]
    pub labor_cost: Option<Decimal>,
    pub is_warranty: Option<bool>,
}

/// Status history entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusHistoryDto {
    pub id: Uuid,
    pub order_id: Uuid,

    /// Absent for the intake entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_from: Option<String>,

    pub status_to: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub changed_at: DateTime<Utc>,
}

// ===== Order item DTOs =====

/// Part consumed by an order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub part_id: Uuid,
    pub quantity: i32,

    /// Unit price captured when the item was added
    #[schema(value_type = String)]
    pub price_at_time: Decimal,

    #[schema(value_type = String)]
    pub line_total: Decimal,
}

/// Add part to order request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddOrderItemRequest {
    pub part_id: Uuid,
    pub quantity: i32,
}

// ===== Invoice DTOs =====

/// Invoice line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceLineDto {
    pub item_id: Uuid,
    pub part_code: String,
    pub part_name: String,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub line_total: Decimal,
}

/// Invoice preview
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDto {
    pub order: ServiceOrderDto,
    pub client: ClientDto,
    pub equipment: EquipmentDto,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<TechnicianDto>,

    pub lines: Vec<InvoiceLineDto>,

    #[schema(value_type = String)]
    pub parts_subtotal: Decimal,

    #[schema(value_type = String)]
    pub labor_cost: Decimal,

    #[schema(value_type = String)]
    pub total: Decimal,

    /// Zero for warranty work
    #[schema(value_type = String)]
    pub amount_due: Decimal,
}

// ===== Dashboard DTOs =====

/// Dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    /// Order count for every status literal
    pub orders_by_status: BTreeMap<String, u64>,
    pub open_orders: u64,
    pub low_stock_parts: u64,
    pub active_technicians: u64,

    #[schema(value_type = String)]
    pub delivered_revenue: Decimal,
}
