//! Parts inventory operations

use super::events::ServiceDeskEvent;
use super::import;
use super::service::{internal, Service};
use super::validation;
use crate::contract::{NewPart, Part, ServiceDeskError};
use chrono::Utc;
use uuid::Uuid;

impl Service {
    /// Create a part, or update the one with the same code
    pub async fn upsert_part(&self, new: NewPart) -> Result<Part, ServiceDeskError> {
        let now = Utc::now();
        let part = Part {
            id: Uuid::new_v4(),
            code: validation::required("code", &new.code)?,
            name: validation::required("name", &new.name)?,
            description: validation::optional(new.description),
            stock_level: validation::non_negative_count("stock_level", new.stock_level)?,
            min_stock: validation::non_negative_count("min_stock", new.min_stock)?,
            unit_cost: validation::non_negative_amount("unit_cost", new.unit_cost)?,
            unit_price: validation::non_negative_amount("unit_price", new.unit_price)?,
            created_at: now,
            updated_at: now,
        };

        self.repos
            .parts
            .upsert_by_code(&part)
            .await
            .map_err(internal)
    }

    pub async fn get_part(&self, id: Uuid) -> Result<Part, ServiceDeskError> {
        self.repos
            .parts
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| ServiceDeskError::not_found("part", id))
    }

    /// Barcode scanner lookup
    pub async fn find_part_by_code(&self, code: &str) -> Result<Part, ServiceDeskError> {
        let code = validation::required("code", code)?;
        self.repos
            .parts
            .find_by_code(&code)
            .await
            .map_err(internal)?
            .ok_or_else(|| ServiceDeskError::not_found("part", code))
    }

    pub async fn list_parts(&self, search: Option<&str>) -> Result<Vec<Part>, ServiceDeskError> {
        let term = search.map(str::trim).filter(|t| !t.is_empty());
        self.repos.parts.search(term).await.map_err(internal)
    }

    /// Parts at or below their minimum stock
    pub async fn list_low_stock(&self) -> Result<Vec<Part>, ServiceDeskError> {
        self.repos.parts.list_low_stock().await.map_err(internal)
    }

    /// Move stock up or down; the level never drops below zero
    pub async fn adjust_stock(
        &self,
        part_id: Uuid,
        delta: i32,
        reason: &str,
    ) -> Result<Part, ServiceDeskError> {
        if delta == 0 {
            return Err(ServiceDeskError::validation("stock delta cannot be zero"));
        }
        if delta == i32::MIN {
            return Err(ServiceDeskError::validation("stock delta is out of range"));
        }

        let Some(part) = self
            .repos
            .parts
            .adjust_stock(part_id, delta)
            .await
            .map_err(internal)?
        else {
            let part = self.get_part(part_id).await?;
            if delta > 0 {
                return Err(ServiceDeskError::validation(format!(
                    "stock level for part {} cannot grow by {}",
                    part.code, delta
                )));
            }
            return Err(ServiceDeskError::conflict(format!(
                "insufficient stock for part {}: {} available, {} requested",
                part.code,
                part.stock_level,
                delta.unsigned_abs()
            )));
        };

        self.emit(ServiceDeskEvent::StockAdjusted {
            part_id: part.id,
            code: part.code.clone(),
            delta,
            stock_level: part.stock_level,
            reason: reason.to_string(),
            low_stock: part.is_low_stock(),
            timestamp: Utc::now(),
        })
        .await;

        Ok(part)
    }

    /// Inventory as CSV (`code,name,stock_level,min_stock,unit_cost,unit_price`)
    pub async fn export_parts_csv(&self) -> Result<Vec<u8>, ServiceDeskError> {
        let parts = self.list_parts(None).await?;
        import::write_parts_sheet(&parts)
    }
}
