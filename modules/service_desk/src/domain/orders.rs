//! Service order lifecycle, order items and invoicing

use super::events::ServiceDeskEvent;
use super::service::{internal, Service};
use super::status;
use super::validation;
use crate::contract::{
    Invoice, InvoiceLine, NewServiceOrder, OrderFilter, OrderItem, OrderStatus, ServiceDeskError,
    ServiceOrder, StatusChange, StatusHistory,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Attempts at drawing an unused order number before giving up
const ORDER_NUMBER_ATTEMPTS: usize = 3;

/// `<prefix>-<YYYYMMDD>-<6 upper hex chars>`
pub fn format_order_number(prefix: &str, at: DateTime<Utc>, entropy: Uuid) -> String {
    let suffix = entropy.simple().to_string()[..6].to_ascii_uppercase();
    format!("{}-{}-{}", prefix, at.format("%Y%m%d"), suffix)
}

impl Service {
    // ===== Intake =====

    /// Register a service order at intake
    pub async fn create_order(
        &self,
        new: NewServiceOrder,
        created_by: Option<Uuid>,
    ) -> Result<ServiceOrder, ServiceDeskError> {
        self.get_client(new.client_id).await?;

        let equipment = self.get_equipment(new.equipment_id).await?;
        if equipment.client_id != new.client_id {
            return Err(ServiceDeskError::validation(format!(
                "equipment {} does not belong to client {}",
                equipment.id, new.client_id
            )));
        }

        if let Some(technician_id) = new.technician_id {
            self.require_active_technician(technician_id).await?;
        }

        let labor_cost = validation::non_negative_amount("labor_cost", new.labor_cost)?;
        let now = Utc::now();
        let order = ServiceOrder {
            id: Uuid::new_v4(),
            order_number: self.next_order_number(now).await?,
            client_id: new.client_id,
            equipment_id: new.equipment_id,
            technician_id: new.technician_id,
            status: OrderStatus::Pending,
            reported_issue: validation::optional(new.reported_issue),
            diagnosis: None,
            labor_cost,
            total_cost: labor_cost,
            is_warranty: new.is_warranty,
            created_at: now,
            updated_at: now,
        };

        let order = self.repos.orders.create(&order).await.map_err(internal)?;

        self.record_history(&order, None, created_by, Some("intake".to_string()))
            .await?;
        self.emit(ServiceDeskEvent::order_created(&order)).await;

        Ok(order)
    }

    // ===== Queries =====

    pub async fn get_order(&self, id: Uuid) -> Result<ServiceOrder, ServiceDeskError> {
        self.repos
            .orders
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| ServiceDeskError::not_found("service order", id))
    }

    pub async fn get_order_by_number(
        &self,
        order_number: &str,
    ) -> Result<ServiceOrder, ServiceDeskError> {
        let order_number = order_number.trim();
        self.repos
            .orders
            .find_by_number(order_number)
            .await
            .map_err(internal)?
            .ok_or_else(|| ServiceDeskError::not_found("service order", order_number))
    }

    /// Newest first
    pub async fn list_orders(
        &self,
        filter: OrderFilter,
    ) -> Result<Vec<ServiceOrder>, ServiceDeskError> {
        self.repos.orders.list(&filter).await.map_err(internal)
    }

    /// Oldest first
    pub async fn status_history(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<StatusHistory>, ServiceDeskError> {
        self.get_order(order_id).await?;
        self.repos
            .history
            .list_by_order(order_id)
            .await
            .map_err(internal)
    }

    pub async fn list_order_items(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderItem>, ServiceDeskError> {
        self.get_order(order_id).await?;
        self.repos
            .order_items
            .list_by_order(order_id)
            .await
            .map_err(internal)
    }

    // ===== Workflow =====

    /// Assign, reassign or (with `None`) unassign the technician
    pub async fn assign_technician(
        &self,
        order_id: Uuid,
        technician_id: Option<Uuid>,
    ) -> Result<ServiceOrder, ServiceDeskError> {
        let mut order = self.get_order(order_id).await?;
        if order.status.is_terminal() {
            return Err(ServiceDeskError::conflict(format!(
                "order {} is {} and cannot be reassigned",
                order.order_number, order.status
            )));
        }

        if let Some(technician_id) = technician_id {
            self.require_active_technician(technician_id).await?;
        }

        let expected = order.status;
        order.technician_id = technician_id;
        order.updated_at = Utc::now();
        let order = self.save_order(&order, expected).await?;

        self.emit(ServiceDeskEvent::TechnicianAssigned {
            order_id,
            technician_id,
            timestamp: Utc::now(),
        })
        .await;

        Ok(order)
    }

    /// Move an order to a new status and append the audit trail entry
    pub async fn change_status(
        &self,
        order_id: Uuid,
        change: StatusChange,
    ) -> Result<ServiceOrder, ServiceDeskError> {
        let mut order = self.get_order(order_id).await?;
        let from = order.status;
        status::validate_transition(from, change.to)?;

        order.status = change.to;
        order.updated_at = Utc::now();
        let mut order = self.save_order(&order, from).await?;

        let recorded = self
            .record_history(
                &order,
                Some(from),
                change.changed_by_id,
                validation::optional(change.notes),
            )
            .await;
        if let Err(e) = recorded {
            // No status change without its audit entry
            order.status = from;
            order.updated_at = Utc::now();
            if let Err(revert) = self.repos.orders.update(&order, change.to).await {
                tracing::error!(%order_id, "Failed to revert status: {}", revert);
            }
            return Err(e);
        }
        self.emit(ServiceDeskEvent::status_changed(&order, from, change.changed_by_id))
            .await;

        Ok(order)
    }

    /// Record the technician's findings
    pub async fn record_diagnosis(
        &self,
        order_id: Uuid,
        diagnosis: &str,
    ) -> Result<ServiceOrder, ServiceDeskError> {
        let mut order = self.get_open_order(order_id).await?;
        order.diagnosis = Some(validation::required("diagnosis", diagnosis)?);
        order.updated_at = Utc::now();
        self.save_order(&order, order.status).await
    }

    /// Change labor cost and/or warranty flag, recomputing the total
    pub async fn update_costs(
        &self,
        order_id: Uuid,
        labor_cost: Option<Decimal>,
        is_warranty: Option<bool>,
    ) -> Result<ServiceOrder, ServiceDeskError> {
        let mut order = self.get_open_order(order_id).await?;

        if let Some(labor_cost) = labor_cost {
            order.labor_cost = validation::non_negative_amount("labor_cost", labor_cost)?;
        }
        if let Some(is_warranty) = is_warranty {
            order.is_warranty = is_warranty;
        }

        self.save_with_recomputed_total(order).await
    }

    // ===== Order Items =====

    /// Attach a part to an order at the part's current price and take it from stock
    pub async fn add_order_item(
        &self,
        order_id: Uuid,
        part_id: Uuid,
        quantity: i32,
    ) -> Result<OrderItem, ServiceDeskError> {
        if quantity <= 0 {
            return Err(ServiceDeskError::validation("quantity must be positive"));
        }

        let order = self.get_open_order(order_id).await?;
        let reason = format!("order {}", order.order_number);
        let part = self.adjust_stock(part_id, -quantity, &reason).await?;

        let item = OrderItem {
            id: Uuid::new_v4(),
            order_id,
            part_id,
            quantity,
            price_at_time: part.unit_price,
        };

        let item = match self.repos.order_items.add(&item).await {
            Ok(item) => item,
            Err(e) => {
                // Put the stock back before surfacing the failure
                if let Err(restore) = self.adjust_stock(part_id, quantity, &reason).await {
                    tracing::error!(%part_id, quantity, "Failed to restore stock: {}", restore);
                }
                return Err(internal(e));
            }
        };

        if let Err(e) = self.save_with_recomputed_total(order).await {
            if let Err(undo) = self.repos.order_items.remove(item.id).await {
                tracing::error!(item_id = %item.id, "Failed to remove orphaned item: {}", undo);
            } else if let Err(restore) = self.adjust_stock(part_id, quantity, &reason).await {
                tracing::error!(%part_id, quantity, "Failed to restore stock: {}", restore);
            }
            return Err(e);
        }
        Ok(item)
    }

    /// Detach an item from an order and return its quantity to stock
    pub async fn remove_order_item(
        &self,
        order_id: Uuid,
        item_id: Uuid,
    ) -> Result<(), ServiceDeskError> {
        let mut order = self.get_open_order(order_id).await?;

        let items = self
            .repos
            .order_items
            .list_by_order(order_id)
            .await
            .map_err(internal)?;
        let item = items
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| ServiceDeskError::not_found("order item", item_id))?;

        // Claim the order first so a concurrent close stops the removal
        order.total_cost = order.labor_cost
            + items
                .iter()
                .filter(|other| other.id != item_id)
                .map(OrderItem::line_total)
                .sum::<Decimal>();
        order.updated_at = Utc::now();
        let order = self.save_order(&order, order.status).await?;

        if let Err(e) = self.repos.order_items.remove(item.id).await {
            if let Err(resync) = self.save_with_recomputed_total(order).await {
                tracing::error!(%order_id, "Failed to resync order total: {}", resync);
            }
            return Err(internal(e));
        }

        let reason = format!("order {} item removed", order.order_number);
        self.adjust_stock(item.part_id, item.quantity, &reason)
            .await?;
        Ok(())
    }

    // ===== Invoice =====

    /// Invoice preview: lines at captured prices plus labor
    pub async fn invoice(&self, order_id: Uuid) -> Result<Invoice, ServiceDeskError> {
        let order = self.get_order(order_id).await?;
        let client = self.get_client(order.client_id).await?;
        let equipment = self.get_equipment(order.equipment_id).await?;

        let technician = match order.technician_id {
            Some(id) => self
                .repos
                .technicians
                .find_by_id(id)
                .await
                .map_err(internal)?,
            None => None,
        };

        let items = self
            .repos
            .order_items
            .list_by_order(order_id)
            .await
            .map_err(internal)?;

        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let part = self
                .repos
                .parts
                .find_by_id(item.part_id)
                .await
                .map_err(internal)?;
            let (part_code, part_name) = match part {
                Some(part) => (part.code, part.name),
                None => (item.part_id.to_string(), "(part removed)".to_string()),
            };
            lines.push(InvoiceLine {
                item_id: item.id,
                part_code,
                part_name,
                quantity: item.quantity,
                unit_price: item.price_at_time,
                line_total: item.line_total(),
            });
        }

        let parts_subtotal = lines.iter().map(|l| l.line_total).sum::<Decimal>();
        let labor_cost = order.labor_cost;
        let total = parts_subtotal + labor_cost;
        let amount_due = if order.is_warranty { Decimal::ZERO } else { total };

        Ok(Invoice {
            order,
            client,
            equipment,
            technician,
            lines,
            parts_subtotal,
            labor_cost,
            total,
            amount_due,
        })
    }

    // ===== Helper Methods =====

    async fn get_open_order(&self, order_id: Uuid) -> Result<ServiceOrder, ServiceDeskError> {
        let order = self.get_order(order_id).await?;
        if status::is_locked_for_billing(order.status) {
            return Err(ServiceDeskError::conflict(format!(
                "order {} is {} and can no longer be modified",
                order.order_number, order.status
            )));
        }
        Ok(order)
    }

    async fn require_active_technician(&self, technician_id: Uuid) -> Result<(), ServiceDeskError> {
        let technician = self.get_technician(technician_id).await?;
        if !technician.is_active {
            return Err(ServiceDeskError::validation(format!(
                "technician {} is inactive",
                technician.full_name
            )));
        }
        Ok(())
    }

    /// `total_cost = labor_cost + Σ(quantity × price_at_time)`
    async fn save_with_recomputed_total(
        &self,
        mut order: ServiceOrder,
    ) -> Result<ServiceOrder, ServiceDeskError> {
        let parts_total = self
            .repos
            .order_items
            .list_by_order(order.id)
            .await
            .map_err(internal)?
            .iter()
            .map(OrderItem::line_total)
            .sum::<Decimal>();

        order.total_cost = order.labor_cost + parts_total;
        order.updated_at = Utc::now();
        self.save_order(&order, order.status).await
    }

    /// Guarded write; fails with a conflict when the status moved since `order` was read
    async fn save_order(
        &self,
        order: &ServiceOrder,
        expected: OrderStatus,
    ) -> Result<ServiceOrder, ServiceDeskError> {
        self.repos
            .orders
            .update(order, expected)
            .await
            .map_err(internal)?
            .ok_or_else(|| {
                ServiceDeskError::conflict(format!(
                    "order {} changed while it was being updated",
                    order.order_number
                ))
            })
    }

    async fn next_order_number(&self, at: DateTime<Utc>) -> Result<String, ServiceDeskError> {
        for _ in 0..ORDER_NUMBER_ATTEMPTS {
            let candidate =
                format_order_number(&self.config.order_number_prefix, at, Uuid::new_v4());
            let taken = self
                .repos
                .orders
                .find_by_number(&candidate)
                .await
                .map_err(internal)?
                .is_some();
            if !taken {
                return Ok(candidate);
            }
        }
        tracing::error!("Could not draw a free order number");
        Err(ServiceDeskError::Internal)
    }

    async fn record_history(
        &self,
        order: &ServiceOrder,
        from: Option<OrderStatus>,
        changed_by_id: Option<Uuid>,
        notes: Option<String>,
    ) -> Result<StatusHistory, ServiceDeskError> {
        let entry = StatusHistory {
            id: Uuid::new_v4(),
            order_id: order.id,
            status_from: from,
            status_to: order.status,
            changed_by_id,
            notes,
            changed_at: Utc::now(),
        };
        self.repos.history.append(&entry).await.map_err(internal)
    }
}
