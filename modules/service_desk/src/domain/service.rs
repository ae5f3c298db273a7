//! Domain service - business logic orchestration
//!
//! Clients, equipment, technicians, the dashboard and spreadsheet import live
//! here; orders and inventory extend [`Service`] in their own files.

use crate::config::Config;
use crate::contract::{
    Client, ClientPatch, DashboardSummary, Equipment, ImportReport, ImportRowError, NewClient,
    NewEquipment, NewTechnician, OrderFilter, OrderStatus, ServiceDeskError, Technician,
    TechnicianPatch,
};
use super::events::{EventPublisher, ServiceDeskEvent};
use super::import::{self, ClientRow};
use super::repository::Repositories;
use super::validation;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// Domain service for the service desk
pub struct Service {
    pub(super) repos: Repositories,
    pub(super) events: Arc<dyn EventPublisher>,
    pub(super) config: Config,
}

impl Service {
    /// Create a new service instance
    pub fn new(repos: Repositories, events: Arc<dyn EventPublisher>, config: Config) -> Self {
        Self {
            repos,
            events,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ===== Client Operations =====

    /// Create a client, or update the existing client with the same national id
    pub async fn upsert_client(&self, new: NewClient) -> Result<Client, ServiceDeskError> {
        let national_id = validation::validate_national_id(&new.national_id)?;
        let full_name = validation::required("full_name", &new.full_name)?;
        let email = validation::validate_email(new.email)?;
        let now = Utc::now();

        let client = Client {
            id: Uuid::new_v4(),
            national_id,
            full_name,
            phone: validation::optional(new.phone),
            email,
            address: validation::optional(new.address),
            category: new.category,
            created_at: now,
            updated_at: now,
        };

        let stored = self
            .repos
            .clients
            .upsert_by_national_id(&client)
            .await
            .map_err(internal)?;

        tracing::debug!(client_id = %stored.id, national_id = %stored.national_id, "client upserted");
        Ok(stored)
    }

    /// Get a client by id
    pub async fn get_client(&self, id: Uuid) -> Result<Client, ServiceDeskError> {
        self.repos
            .clients
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| ServiceDeskError::not_found("client", id))
    }

    /// List clients, optionally filtered by name or national id
    pub async fn list_clients(&self, search: Option<&str>) -> Result<Vec<Client>, ServiceDeskError> {
        let term = search.map(str::trim).filter(|t| !t.is_empty());
        self.repos.clients.search(term).await.map_err(internal)
    }

    /// Apply a partial update to a client
    pub async fn update_client(
        &self,
        id: Uuid,
        patch: ClientPatch,
    ) -> Result<Client, ServiceDeskError> {
        let mut client = self.get_client(id).await?;

        if let Some(full_name) = patch.full_name {
            client.full_name = validation::required("full_name", &full_name)?;
        }
        if patch.phone.is_some() {
            client.phone = validation::optional(patch.phone);
        }
        if patch.email.is_some() {
            client.email = validation::validate_email(patch.email)?;
        }
        if patch.address.is_some() {
            client.address = validation::optional(patch.address);
        }
        if let Some(category) = patch.category {
            client.category = category;
        }
        client.updated_at = Utc::now();

        self.repos.clients.update(&client).await.map_err(internal)
    }

    /// Delete a client that has no service orders
    pub async fn delete_client(&self, id: Uuid) -> Result<(), ServiceDeskError> {
        self.get_client(id).await?;

        let orders = self
            .repos
            .orders
            .count_for_client(id)
            .await
            .map_err(internal)?;
        if orders > 0 {
            return Err(ServiceDeskError::conflict(format!(
                "client {} still has {} service order(s)",
                id, orders
            )));
        }

        self.repos.clients.delete(id).await.map_err(internal)
    }

    // ===== Equipment Operations =====

    /// Register an appliance for an existing client
    pub async fn register_equipment(
        &self,
        client_id: Uuid,
        new: NewEquipment,
    ) -> Result<Equipment, ServiceDeskError> {
        self.get_client(client_id).await?;

        let equipment = Equipment {
            id: Uuid::new_v4(),
            client_id,
            equipment_type: validation::required("equipment_type", &new.equipment_type)?,
            brand: validation::required("brand", &new.brand)?,
            model: validation::optional(new.model),
            serial_number: validation::optional(new.serial_number),
            specs: validation::validate_specs(new.specs)?,
            created_at: Utc::now(),
        };

        self.repos
            .equipment
            .create(&equipment)
            .await
            .map_err(internal)
    }

    pub async fn get_equipment(&self, id: Uuid) -> Result<Equipment, ServiceDeskError> {
        self.repos
            .equipment
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| ServiceDeskError::not_found("equipment", id))
    }

    pub async fn list_client_equipment(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<Equipment>, ServiceDeskError> {
        self.get_client(client_id).await?;
        self.repos
            .equipment
            .list_by_client(client_id)
            .await
            .map_err(internal)
    }

    // ===== Technician Operations =====

    pub async fn create_technician(
        &self,
        new: NewTechnician,
    ) -> Result<Technician, ServiceDeskError> {
        let technician = Technician {
            id: Uuid::new_v4(),
            full_name: validation::required("full_name", &new.full_name)?,
            specialty: validation::optional(new.specialty),
            phone: validation::optional(new.phone),
            commission_rate: validation::validate_commission_rate(new.commission_rate)?,
            is_active: true,
            created_at: Utc::now(),
        };

        self.repos
            .technicians
            .create(&technician)
            .await
            .map_err(internal)
    }

    pub async fn get_technician(&self, id: Uuid) -> Result<Technician, ServiceDeskError> {
        self.repos
            .technicians
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| ServiceDeskError::not_found("technician", id))
    }

    pub async fn list_technicians(
        &self,
        active_only: bool,
    ) -> Result<Vec<Technician>, ServiceDeskError> {
        self.repos
            .technicians
            .list(active_only)
            .await
            .map_err(internal)
    }

    pub async fn update_technician(
        &self,
        id: Uuid,
        patch: TechnicianPatch,
    ) -> Result<Technician, ServiceDeskError> {
        let mut technician = self.get_technician(id).await?;

        if let Some(full_name) = patch.full_name {
            technician.full_name = validation::required("full_name", &full_name)?;
        }
        if patch.specialty.is_some() {
            technician.specialty = validation::optional(patch.specialty);
        }
        if patch.phone.is_some() {
            technician.phone = validation::optional(patch.phone);
        }
        if let Some(rate) = patch.commission_rate {
            technician.commission_rate = validation::validate_commission_rate(rate)?;
        }

        self.repos
            .technicians
            .update(&technician)
            .await
            .map_err(internal)
    }

    /// Activate or deactivate a technician; inactive technicians cannot be assigned
    pub async fn set_technician_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> Result<Technician, ServiceDeskError> {
        let mut technician = self.get_technician(id).await?;
        if technician.is_active == is_active {
            return Ok(technician);
        }
        technician.is_active = is_active;
        self.repos
            .technicians
            .update(&technician)
            .await
            .map_err(internal)
    }

    // ===== Dashboard =====

    pub async fn dashboard(&self) -> Result<DashboardSummary, ServiceDeskError> {
        let orders = self
            .repos
            .orders
            .list(&OrderFilter::default())
            .await
            .map_err(internal)?;

        let orders_by_status = OrderStatus::ALL
            .into_iter()
            .map(|status| {
                let count = orders.iter().filter(|o| o.status == status).count() as u64;
                (status, count)
            })
            .collect();

        let open_orders = orders.iter().filter(|o| !o.status.is_terminal()).count() as u64;

        let delivered_revenue = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered && !o.is_warranty)
            .map(|o| o.total_cost)
            .sum::<Decimal>();

        let low_stock_parts = self
            .repos
            .parts
            .list_low_stock()
            .await
            .map_err(internal)?
            .len() as u64;

        let active_technicians = self
            .repos
            .technicians
            .list(true)
            .await
            .map_err(internal)?
            .len() as u64;

        Ok(DashboardSummary {
            orders_by_status,
            open_orders,
            low_stock_parts,
            active_technicians,
            delivered_revenue,
        })
    }

    // ===== Spreadsheet Import =====

    /// Import clients from a CSV export of the intake spreadsheet
    ///
    /// Rows without `Cedula` or `Nombre` are skipped; every other row is
    /// upserted by national id, so re-importing the same sheet is harmless.
    pub async fn import_clients_csv(&self, bytes: &[u8]) -> Result<ImportReport, ServiceDeskError> {
        if bytes.len() > self.config.max_import_bytes {
            return Err(ServiceDeskError::validation(format!(
                "spreadsheet exceeds {} bytes",
                self.config.max_import_bytes
            )));
        }

        let rows = import::parse_client_sheet(bytes)?;
        let mut report = ImportReport::default();

        for row in rows {
            match row {
                ClientRow::Skipped { row } => {
                    tracing::debug!(row, "skipping spreadsheet row without Cedula/Nombre");
                    report.skipped += 1;
                }
                ClientRow::Valid { row, client } => match self.upsert_client(client).await {
                    Ok(_) => report.imported += 1,
                    Err(ServiceDeskError::Internal) => return Err(ServiceDeskError::Internal),
                    Err(e) => report.errors.push(ImportRowError {
                        row,
                        message: e.to_string(),
                    }),
                },
            }
        }

        self.emit(ServiceDeskEvent::ClientsImported {
            imported: report.imported,
            skipped: report.skipped,
            failed: report.errors.len(),
            timestamp: Utc::now(),
        })
        .await;

        Ok(report)
    }

    // ===== Helper Methods =====

    pub(super) async fn emit(&self, event: ServiceDeskEvent) {
        let name = event.name();
        if let Err(e) = self.events.publish(event).await {
            // Log error but don't fail the operation
            tracing::warn!(event = name, "Failed to publish event: {}", e);
        }
    }
}

/// Log an infrastructure failure and hide it behind `Internal`
pub(super) fn internal(error: anyhow::Error) -> ServiceDeskError {
    tracing::error!("service desk storage error: {:?}", error);
    ServiceDeskError::Internal
}
