//! HTTP request handlers - thin layer that delegates to domain service

use super::{dto::*, error::Problem};
use crate::contract::{OrderFilter, OrderStatus, Part, ServiceDeskError, SessionUser, StatusChange};
use crate::domain::Service;
use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

type Svc = Extension<Arc<Service>>;

// ===== Client Handlers =====

/// List clients, optionally filtered by name or national id
pub async fn list_clients(
    Extension(service): Svc,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ClientsListResponse>, Problem> {
    let clients = service.list_clients(query.search.as_deref()).await?;
    let items: Vec<ClientDto> = clients.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(ClientsListResponse { items, total }))
}

/// Create a client or update the one with the same national id
pub async fn upsert_client(
    Extension(service): Svc,
    Json(req): Json<UpsertClientRequest>,
) -> Result<Json<ClientDto>, Problem> {
    let client = service.upsert_client(req.try_into()?).await?;
    Ok(Json(client.into()))
}

pub async fn get_client(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientDto>, Problem> {
    let client = service.get_client(id).await?;
    Ok(Json(client.into()))
}

pub async fn update_client(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClientRequest>,
) -> Result<Json<ClientDto>, Problem> {
    let client = service.update_client(id, req.try_into()?).await?;
    Ok(Json(client.into()))
}

pub async fn delete_client(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service.delete_client(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Bulk import from a CSV spreadsheet sent as the raw request body
pub async fn import_clients(
    Extension(service): Svc,
    body: Bytes,
) -> Result<Json<ImportReportDto>, Problem> {
    let report = service.import_clients_csv(&body).await?;
    Ok(Json(report.into()))
}

// ===== Equipment Handlers =====

pub async fn list_client_equipment(
    Extension(service): Svc,
    Path(client_id): Path<Uuid>,
) -> Result<Json<EquipmentListResponse>, Problem> {
    let equipment = service.list_client_equipment(client_id).await?;
    let items: Vec<EquipmentDto> = equipment.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(EquipmentListResponse { items, total }))
}

pub async fn register_equipment(
    Extension(service): Svc,
    Path(client_id): Path<Uuid>,
    Json(req): Json<RegisterEquipmentRequest>,
) -> Result<(StatusCode, Json<EquipmentDto>), Problem> {
    let equipment = service.register_equipment(client_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(equipment.into())))
}

pub async fn get_equipment(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
) -> Result<Json<EquipmentDto>, Problem> {
    let equipment = service.get_equipment(id).await?;
    Ok(Json(equipment.into()))
}

// ===== Technician Handlers =====

pub async fn list_technicians(
    Extension(service): Svc,
    Query(query): Query<TechniciansQuery>,
) -> Result<Json<TechniciansListResponse>, Problem> {
    let technicians = service.list_technicians(query.active_only).await?;
    let items: Vec<TechnicianDto> = technicians.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(TechniciansListResponse { items, total }))
}

pub async fn create_technician(
    Extension(service): Svc,
    Json(req): Json<CreateTechnicianRequest>,
) -> Result<(StatusCode, Json<TechnicianDto>), Problem> {
    let technician = service.create_technician(req.into()).await?;
    Ok((StatusCode::CREATED, Json(technician.into())))
}

pub async fn update_technician(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTechnicianRequest>,
) -> Result<Json<TechnicianDto>, Problem> {
    let technician = service.update_technician(id, req.into()).await?;
    Ok(Json(technician.into()))
}

pub async fn set_technician_active(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
    Json(req): Json<SetTechnicianActiveRequest>,
) -> Result<Json<TechnicianDto>, Problem> {
    let technician = service.set_technician_active(id, req.is_active).await?;
    Ok(Json(technician.into()))
}

// ===== Inventory Handlers =====

pub async fn list_parts(
    Extension(service): Svc,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PartsListResponse>, Problem> {
    let parts = service.list_parts(query.search.as_deref()).await?;
    Ok(Json(parts_response(parts)))
}

pub async fn list_low_stock(Extension(service): Svc) -> Result<Json<PartsListResponse>, Problem> {
    let parts = service.list_low_stock().await?;
    Ok(Json(parts_response(parts)))
}

fn parts_response(parts: Vec<Part>) -> PartsListResponse {
    let items: Vec<PartDto> = parts.into_iter().map(Into::into).collect();
    let total = items.len();
    PartsListResponse { items, total }
}

pub async fn upsert_part(
    Extension(service): Svc,
    Json(req): Json<UpsertPartRequest>,
) -> Result<Json<PartDto>, Problem> {
    let part = service.upsert_part(req.into()).await?;
    Ok(Json(part.into()))
}

pub async fn get_part(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
) -> Result<Json<PartDto>, Problem> {
    let part = service.get_part(id).await?;
    Ok(Json(part.into()))
}

/// Barcode scanner lookup
pub async fn find_part_by_code(
    Extension(service): Svc,
    Path(code): Path<String>,
) -> Result<Json<PartDto>, Problem> {
    let part = service.find_part_by_code(&code).await?;
    Ok(Json(part.into()))
}

pub async fn adjust_stock(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
    Json(req): Json<AdjustStockRequest>,
) -> Result<Json<PartDto>, Problem> {
    let reason = req.reason.as_deref().unwrap_or("manual adjustment");
    let part = service.adjust_stock(id, req.delta, reason).await?;
    Ok(Json(part.into()))
}

/// Inventory spreadsheet download
pub async fn export_parts(Extension(service): Svc) -> Result<impl IntoResponse, Problem> {
    let body = service.export_parts_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"inventario.csv\""),
        ],
        body,
    ))
}

// ===== Service Order Handlers =====

pub async fn list_orders(
    Extension(service): Svc,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<OrdersListResponse>, Problem> {
    let filter: OrderFilter = query.try_into()?;
    let orders = service.list_orders(filter).await?;
    let items: Vec<ServiceOrderDto> = orders.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(OrdersListResponse { items, total }))
}

/// Intake a new service order
pub async fn create_order(
    Extension(service): Svc,
    session: Option<Extension<SessionUser>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ServiceOrderDto>), Problem> {
    let created_by = session.map(|Extension(user)| user.user_id);
    let order = service.create_order(req.into(), created_by).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

pub async fn get_order(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceOrderDto>, Problem> {
    let order = service.get_order(id).await?;
    Ok(Json(order.into()))
}

pub async fn get_order_by_number(
    Extension(service): Svc,
    Path(number): Path<String>,
) -> Result<Json<ServiceOrderDto>, Problem> {
    let order = service.get_order_by_number(&number).await?;
    Ok(Json(order.into()))
}

pub async fn assign_technician(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignTechnicianRequest>,
) -> Result<Json<ServiceOrderDto>, Problem> {
    let order = service.assign_technician(id, req.technician_id).await?;
    Ok(Json(order.into()))
}

/// Move an order to a new status; the session user is recorded in the history
pub async fn change_status(
    Extension(service): Svc,
    session: Option<Extension<SessionUser>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<ServiceOrderDto>, Problem> {
    let change = StatusChange {
        to: req
            .status
            .parse::<OrderStatus>()
            .map_err(ServiceDeskError::from)?,
        changed_by_id: session.map(|Extension(user)| user.user_id),
        notes: req.notes,
    };

    let order = service.change_status(id, change).await?;
    Ok(Json(order.into()))
}

pub async fn status_history(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StatusHistoryDto>>, Problem> {
    let history = service.status_history(id).await?;
    Ok(Json(history.into_iter().map(Into::into).collect()))
}

pub async fn record_diagnosis(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordDiagnosisRequest>,
) -> Result<Json<ServiceOrderDto>, Problem> {
    let order = service.record_diagnosis(id, &req.diagnosis).await?;
    Ok(Json(order.into()))
}

pub async fn update_costs(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCostsRequest>,
) -> Result<Json<ServiceOrderDto>, Problem> {
    let order = service
        .update_costs(id, req.labor_cost, req.is_warranty)
        .await?;
    Ok(Json(order.into()))
}

// ===== Order Item Handlers =====

pub async fn list_order_items(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<OrderItemDto>>, Problem> {
    let items = service.list_order_items(id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub async fn add_order_item(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
    Json(req): Json<AddOrderItemRequest>,
) -> Result<(StatusCode, Json<OrderItemDto>), Problem> {
    let item = service.add_order_item(id, req.part_id, req.quantity).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn remove_order_item(
    Extension(service): Svc,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Problem> {
    service.remove_order_item(id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Read Model Handlers =====

pub async fn invoice(
    Extension(service): Svc,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceDto>, Problem> {
    let invoice = service.invoice(id).await?;
    Ok(Json(invoice.into()))
}

pub async fn dashboard(Extension(service): Svc) -> Result<Json<DashboardDto>, Problem> {
    let summary = service.dashboard().await?;
    Ok(Json(summary.into()))
}
