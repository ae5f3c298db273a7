//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models. Enumerated
//! columns are stored as their literals and parsed back with `TryFrom`.

use super::entity::{client, equipment, order_item, part, service_order, status_history, technician};
use crate::contract::{
    Client, Equipment, OrderItem, OrderStatus, Part, ServiceOrder, StatusHistory, Technician,
};
use sea_orm::ActiveValue::Set;

// ===== Clients =====

impl TryFrom<client::Model> for Client {
    type Error = anyhow::Error;

    fn try_from(entity: client::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            national_id: entity.national_id,
            full_name: entity.full_name,
            phone: entity.phone,
            email: entity.email,
            address: entity.address,
            category: entity.category.parse()?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&Client> for client::ActiveModel {
    fn from(model: &Client) -> Self {
        Self {
            id: Set(model.id),
            national_id: Set(model.national_id.clone()),
            full_name: Set(model.full_name.clone()),
            phone: Set(model.phone.clone()),
            email: Set(model.email.clone()),
            address: Set(model.address.clone()),
            category: Set(model.category.as_str().to_string()),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Equipment =====

impl From<equipment::Model> for Equipment {
    fn from(entity: equipment::Model) -> Self {
        Self {
            id: entity.id,
            client_id: entity.client_id,
            equipment_type: entity.equipment_type,
            brand: entity.brand,
            model: entity.model,
            serial_number: entity.serial_number,
            specs: entity.specs,
            created_at: entity.created_at,
        }
    }
}

impl From<&Equipment> for equipment::ActiveModel {
    fn from(model: &Equipment) -> Self {
        Self {
            id: Set(model.id),
            client_id: Set(model.client_id),
            equipment_type: Set(model.equipment_type.clone()),
            brand: Set(model.brand.clone()),
            model: Set(model.model.clone()),
            serial_number: Set(model.serial_number.clone()),
            specs: Set(model.specs.clone()),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Technicians =====

impl From<technician::Model> for Technician {
    fn from(entity: technician::Model) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            specialty: entity.specialty,
            phone: entity.phone,
            commission_rate: entity.commission_rate,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

impl From<&Technician> for technician::ActiveModel {
    fn from(model: &Technician) -> Self {
        Self {
            id: Set(model.id),
            full_name: Set(model.full_name.clone()),
            specialty: Set(model.specialty.clone()),
            phone: Set(model.phone.clone()),
            commission_rate: Set(model.commission_rate),
            is_active: Set(model.is_active),
            created_at: Set(model.created_at),
        }
    }
}

// ===== Parts =====

impl From<part::Model> for Part {
    fn from(entity: part::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            description: entity.description,
            stock_level: entity.stock_level,
            min_stock: entity.min_stock,
            unit_cost: entity.unit_cost,
            unit_price: entity.unit_price,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Part> for part::ActiveModel {
    fn from(model: &Part) -> Self {
        Self {
            id: Set(model.id),
            code: Set(model.code.clone()),
            name: Set(model.name.clone()),
            description: Set(model.description.clone()),
            stock_level: Set(model.stock_level),
            min_stock: Set(model.min_stock),
            unit_cost: Set(model.unit_cost),
            unit_price: Set(model.unit_price),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Service Orders =====

impl TryFrom<service_order::Model> for ServiceOrder {
    type Error = anyhow::Error;

    fn try_from(entity: service_order::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            order_number: entity.order_number,
            client_id: entity.client_id,
            equipment_id: entity.equipment_id,
            technician_id: entity.technician_id,
            status: entity.status.parse()?,
            reported_issue: entity.reported_issue,
            diagnosis: entity.diagnosis,
            labor_cost: entity.labor_cost,
            total_cost: entity.total_cost,
            is_warranty: entity.is_warranty,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

impl From<&ServiceOrder> for service_order::ActiveModel {
    fn from(model: &ServiceOrder) -> Self {
        Self {
            id: Set(model.id),
            order_number: Set(model.order_number.clone()),
            client_id: Set(model.client_id),
            equipment_id: Set(model.equipment_id),
            technician_id: Set(model.technician_id),
            status: Set(model.status.as_str().to_string()),
            reported_issue: Set(model.reported_issue.clone()),
            diagnosis: Set(model.diagnosis.clone()),
            labor_cost: Set(model.labor_cost),
            total_cost: Set(model.total_cost),
            is_warranty: Set(model.is_warranty),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

// ===== Order Items =====

impl From<order_item::Model> for OrderItem {
    fn from(entity: order_item::Model) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            part_id: entity.part_id,
            quantity: entity.quantity,
            price_at_time: entity.price_at_time,
        }
    }
}

impl From<&OrderItem> for order_item::ActiveModel {
    fn from(model: &OrderItem) -> Self {
        Self {
            id: Set(model.id),
            order_id: Set(model.order_id),
            part_id: Set(model.part_id),
            quantity: Set(model.quantity),
            price_at_time: Set(model.price_at_time),
        }
    }
}

// ===== Status History =====

impl TryFrom<status_history::Model> for StatusHistory {
    type Error = anyhow::Error;

    fn try_from(entity: status_history::Model) -> Result<Self, Self::Error> {
        let status_from = entity
            .status_from
            .as_deref()
            .map(str::parse::<OrderStatus>)
            .transpose()?;

        Ok(Self {
            id: entity.id,
            order_id: entity.order_id,
            status_from,
            status_to: entity.status_to.parse()?,
            changed_by_id: entity.changed_by_id,
            notes: entity.notes,
            changed_at: entity.changed_at,
        })
    }
}

impl From<&StatusHistory> for status_history::ActiveModel {
    fn from(model: &StatusHistory) -> Self {
        Self {
            id: Set(model.id),
            order_id: Set(model.order_id),
            status_from: Set(model.status_from.map(|s| s.as_str().to_string())),
            status_to: Set(model.status_to.as_str().to_string()),
            changed_by_id: Set(model.changed_by_id),
            notes: Set(model.notes.clone()),
            changed_at: Set(model.changed_at),
        }
    }
}
