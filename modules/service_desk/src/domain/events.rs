//! Domain events for the service desk
//!
//! Events are emitted after the change they describe has been persisted.
//! Publishing failures are logged and never fail the operation.

use crate::contract::model::{OrderStatus, ServiceOrder};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Domain event types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceDeskEvent {
    /// Service order registered at intake
    OrderCreated {
        order_id: Uuid,
        order_number: String,
        client_id: Uuid,
        timestamp: DateTime<Utc>,
    },
    /// Service order moved to a new status
    StatusChanged {
        order_id: Uuid,
        order_number: String,
        from: OrderStatus,
        to: OrderStatus,
        changed_by_id: Option<Uuid>,
        timestamp: DateTime<Utc>,
    },
    /// Technician (re)assigned or unassigned
    TechnicianAssigned {
        order_id: Uuid,
        technician_id: Option<Uuid>,
        timestamp: DateTime<Utc>,
    },
    /// Stock level changed
    StockAdjusted {
        part_id: Uuid,
        code: String,
        delta: i32,
        stock_level: i32,
        reason: String,
        low_stock: bool,
        timestamp: DateTime<Utc>,
    },
    /// Spreadsheet import finished
    ClientsImported {
        imported: usize,
        skipped: usize,
        failed: usize,
        timestamp: DateTime<Utc>,
    },
}

impl ServiceDeskEvent {
    pub fn order_created(order: &ServiceOrder) -> Self {
        Self::OrderCreated {
            order_id: order.id,
            order_number: order.order_number.clone(),
            client_id: order.client_id,
            timestamp: Utc::now(),
        }
    }

    pub fn status_changed(
        order: &ServiceOrder,
        from: OrderStatus,
        changed_by_id: Option<Uuid>,
    ) -> Self {
        Self::StatusChanged {
            order_id: order.id,
            order_number: order.order_number.clone(),
            from,
            to: order.status,
            changed_by_id,
            timestamp: Utc::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderCreated { .. } => "order_created",
            Self::StatusChanged { .. } => "status_changed",
            Self::TechnicianAssigned { .. } => "technician_assigned",
            Self::StockAdjusted { .. } => "stock_adjusted",
            Self::ClientsImported { .. } => "clients_imported",
        }
    }
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ServiceDeskEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ServiceDeskEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes every event to the structured log
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: ServiceDeskEvent) -> anyhow::Result<()> {
        match &event {
            ServiceDeskEvent::OrderCreated {
                order_id,
                order_number,
                client_id,
                ..
            } => tracing::info!(
                event = event.name(),
                %order_id,
                %order_number,
                %client_id,
                "service order created"
            ),
            ServiceDeskEvent::StatusChanged {
                order_id,
                order_number,
                from,
                to,
                changed_by_id,
                ..
            } => tracing::info!(
                event = event.name(),
                %order_id,
                %order_number,
                from = from.as_str(),
                to = to.as_str(),
                changed_by = ?changed_by_id,
                "service order status changed"
            ),
            ServiceDeskEvent::TechnicianAssigned {
                order_id,
                technician_id,
                ..
            } => tracing::info!(
                event = event.name(),
                %order_id,
                technician_id = ?technician_id,
                "technician assignment changed"
            ),
            ServiceDeskEvent::StockAdjusted {
                part_id,
                code,
                delta,
                stock_level,
                reason,
                low_stock,
                ..
            } => {
                if *low_stock {
                    tracing::warn!(
                        event = event.name(),
                        %part_id,
                        %code,
                        delta,
                        stock_level,
                        %reason,
                        "part at or below minimum stock"
                    );
                } else {
                    tracing::info!(
                        event = event.name(),
                        %part_id,
                        %code,
                        delta,
                        stock_level,
                        %reason,
                        "stock adjusted"
                    );
                }
            }
            ServiceDeskEvent::ClientsImported {
                imported,
                skipped,
                failed,
                ..
            } => tracing::info!(
                event = event.name(),
                imported,
                skipped,
                failed,
                "client spreadsheet imported"
            ),
        }
        Ok(())
    }
}
