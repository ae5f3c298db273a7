//! Mapper implementations for converting between DTOs and contract models
//!
//! Responses convert infallibly. Requests that carry enumerated literals go
//! through `TryFrom` so an unknown literal surfaces as a validation error.

use super::dto::*;
use crate::contract::{
    self, ClientCategory, ClientPatch, NewClient, NewEquipment, NewPart, NewServiceOrder,
    NewTechnician, OrderFilter, OrderStatus, ServiceDeskError, TechnicianPatch,
};
use rust_decimal::Decimal;

fn parse_category(literal: Option<&str>) -> Result<Option<ClientCategory>, ServiceDeskError> {
    literal
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| l.to_ascii_uppercase().parse::<ClientCategory>())
        .transpose()
        .map_err(Into::into)
}

// ===== Client conversions =====

impl From<contract::Client> for ClientDto {
    fn from(client: contract::Client) -> Self {
        Self {
            id: client.id,
            national_id: client.national_id,
            full_name: client.full_name,
            phone: client.phone,
            email: client.email,
            address: client.address,
            category: client.category.as_str().to_string(),
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

impl TryFrom<UpsertClientRequest> for NewClient {
    type Error = ServiceDeskError;

    fn try_from(req: UpsertClientRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_category(req.category.as_deref())?.unwrap_or_default(),
            national_id: req.national_id,
            full_name: req.full_name,
            phone: req.phone,
            email: req.email,
            address: req.address,
        })
    }
}

impl TryFrom<UpdateClientRequest> for ClientPatch {
    type Error = ServiceDeskError;

    fn try_from(req: UpdateClientRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_category(req.category.as_deref())?,
            full_name: req.full_name,
            phone: req.phone,
            email: req.email,
            address: req.address,
        })
    }
}

impl From<contract::ImportReport> for ImportReportDto {
    fn from(report: contract::ImportReport) -> Self {
        Self {
            imported: report.imported,
            skipped: report.skipped,
            errors: report
                .errors
                .into_iter()
                .map(|e| ImportRowErrorDto {
                    row: e.row,
                    message: e.message,
                })
                .collect(),
        }
    }
}

// ===== Equipment conversions =====

impl From<contract::Equipment> for EquipmentDto {
    fn from(equipment: contract::Equipment) -> Self {
        Self {
            id: equipment.id,
            client_id: equipment.client_id,
            equipment_type: equipment.equipment_type,
            brand: equipment.brand,
            model: equipment.model,
            serial_number: equipment.serial_number,
            specs: equipment.specs,
            created_at: equipment.created_at,
        }
    }
}

impl From<RegisterEquipmentRequest> for NewEquipment {
    fn from(req: RegisterEquipmentRequest) -> Self {
        Self {
            equipment_type: req.equipment_type,
            brand: req.brand,
            model: req.model,
            serial_number: req.serial_number,
            specs: req.specs,
        }
    }
}

// ===== Technician conversions =====

impl From<contract::Technician> for TechnicianDto {
    fn from(technician: contract::Technician) -> Self {
        Self {
            id: technician.id,
            full_name: technician.full_name,
            specialty: technician.specialty,
            phone: technician.phone,
            commission_rate: technician.commission_rate,
            is_active: technician.is_active,
            created_at: technician.created_at,
        }
    }
}

impl From<CreateTechnicianRequest> for NewTechnician {
    fn from(req: CreateTechnicianRequest) -> Self {
        Self {
            full_name: req.full_name,
            specialty: req.specialty,
            phone: req.phone,
            commission_rate: req.commission_rate.unwrap_or(Decimal::ZERO),
        }
    }
}

impl From<UpdateTechnicianRequest> for TechnicianPatch {
    fn from(req: UpdateTechnicianRequest) -> Self {
        Self {
            full_name: req.full_name,
            specialty: req.specialty,
            phone: req.phone,
            commission_rate: req.commission_rate,
        }
    }
}

// ===== Part conversions =====

impl From<contract::Part> for PartDto {
    fn from(part: contract::Part) -> Self {
        Self {
            low_stock: part.is_low_stock(),
            id: part.id,
            code: part.code,
            name: part.name,
            description: part.description,
            stock_level: part.stock_level,
            min_stock: part.min_stock,
            unit_cost: part.unit_cost,
            unit_price: part.unit_price,
            created_at: part.created_at,
            updated_at: part.updated_at,
        }
    }
}

impl From<UpsertPartRequest> for NewPart {
    fn from(req: UpsertPartRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            description: req.description,
            stock_level: req.stock_level,
            min_stock: req.min_stock,
            unit_cost: req.unit_cost,
            unit_price: req.unit_price,
        }
    }
}

// ===== Service order conversions =====

impl From<contract::ServiceOrder> for ServiceOrderDto {
    fn from(order: contract::ServiceOrder) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            client_id: order.client_id,
            equipment_id: order.equipment_id,
            technician_id: order.technician_id,
            status: order.status.as_str().to_string(),
            reported_issue: order.reported_issue,
            diagnosis: order.diagnosis,
            labor_cost: order.labor_cost,
            total_cost: order.total_cost,
            is_warranty: order.is_warranty,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

impl From<CreateOrderRequest> for NewServiceOrder {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            client_id: req.client_id,
            equipment_id: req.equipment_id,
            technician_id: req.technician_id,
            reported_issue: req.reported_issue,
            labor_cost: req.labor_cost.unwrap_or(Decimal::ZERO),
            is_warranty: req.is_warranty,
        }
    }
}

impl TryFrom<OrdersQuery> for OrderFilter {
    type Error = ServiceDeskError;

    fn try_from(query: OrdersQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            status: query.status.as_deref().map(str::parse::<OrderStatus>).transpose()?,
            technician_id: query.technician_id,
            client_id: query.client_id,
        })
    }
}

impl From<contract::StatusHistory> for StatusHistoryDto {
    fn from(entry: contract::StatusHistory) -> Self {
        Self {
            id: entry.id,
            order_id: entry.order_id,
            status_from: entry.status_from.map(|s| s.as_str().to_string()),
            status_to: entry.status_to.as_str().to_string(),
            changed_by_id: entry.changed_by_id,
            notes: entry.notes,
            changed_at: entry.changed_at,
        }
    }
}

// ===== Order item conversions =====

impl From<contract::OrderItem> for OrderItemDto {
    fn from(item: contract::OrderItem) -> Self {
        Self {
            line_total: item.line_total(),
            id: item.id,
            order_id: item.order_id,
            part_id: item.part_id,
            quantity: item.quantity,
            price_at_time: item.price_at_time,
        }
    }
}

// ===== Read model conversions =====

impl From<contract::InvoiceLine> for InvoiceLineDto {
    fn from(line: contract::InvoiceLine) -> Self {
        Self {
            item_id: line.item_id,
            part_code: line.part_code,
            part_name: line.part_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total,
        }
    }
}

impl From<contract::Invoice> for InvoiceDto {
    fn from(invoice: contract::Invoice) -> Self {
        Self {
            order: invoice.order.into(),
            client: invoice.client.into(),
            equipment: invoice.equipment.into(),
            technician: invoice.technician.map(Into::into),
            lines: invoice.lines.into_iter().map(Into::into).collect(),
            parts_subtotal: invoice.parts_subtotal,
            labor_cost: invoice.labor_cost,
            total: invoice.total,
            amount_due: invoice.amount_due,
        }
    }
}

impl From<contract::DashboardSummary> for DashboardDto {
    fn from(summary: contract::DashboardSummary) -> Self {
        Self {
            orders_by_status: summary
                .orders_by_status
                .into_iter()
                .map(|(status, count)| (status.as_str().to_string(), count))
                .collect(),
            open_orders: summary.open_orders,
            low_stock_parts: summary.low_stock_parts,
            active_technicians: summary.active_technicians,
            delivered_revenue: summary.delivered_revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_literal_is_case_insensitive() {
        let req = UpsertClientRequest {
            national_id: "0912345678".to_string(),
            full_name: "Luis Vera".to_string(),
            phone: None,
            email: None,
            address: None,
            category: Some("premium".to_string()),
        };

        let new: NewClient = req.try_into().unwrap();
        assert_eq!(new.category, ClientCategory::Premium);
    }

    #[test]
    fn test_unknown_status_filter_is_validation_error() {
        let query = OrdersQuery {
            status: Some("CLOSED".to_string()),
            ..Default::default()
        };

        let err = OrderFilter::try_from(query).unwrap_err();
        assert!(matches!(err, ServiceDeskError::Validation { .. }));
    }
}
