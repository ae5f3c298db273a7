//! OpenAPI components for the service desk

use super::dto::*;
use super::error::Problem;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        Problem,
        ClientDto,
        UpsertClientRequest,
        UpdateClientRequest,
        ClientsListResponse,
        ImportReportDto,
        ImportRowErrorDto,
        EquipmentDto,
        RegisterEquipmentRequest,
        EquipmentListResponse,
        TechnicianDto,
        CreateTechnicianRequest,
        UpdateTechnicianRequest,
        SetTechnicianActiveRequest,
        TechniciansListResponse,
        PartDto,
        UpsertPartRequest,
        AdjustStockRequest,
        PartsListResponse,
        ServiceOrderDto,
        CreateOrderRequest,
        OrdersListResponse,
        AssignTechnicianRequest,
        ChangeStatusRequest,
        RecordDiagnosisRequest,
        UpdateCostsRequest,
        StatusHistoryDto,
        OrderItemDto,
        AddOrderItemRequest,
        InvoiceLineDto,
        InvoiceDto,
        DashboardDto,
    )),
    tags((name = "service-desk", description = "Clients, equipment, inventory and service orders"))
)]
pub struct ServiceDeskDoc;
