//! SeaORM repository implementations

use crate::contract::{
    Client, Equipment, OrderFilter, OrderItem, OrderStatus, Part, ServiceOrder, StatusHistory,
    Technician,
};
use crate::domain::repository::{
    ClientRepository, EquipmentRepository, OrderItemRepository, PartRepository, Repositories,
    ServiceOrderRepository, StatusHistoryRepository, TechnicianRepository,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Func, OnConflict, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{client, equipment, order_item, part, service_order, status_history, technician};

/// Case-insensitive substring match
fn contains_ci<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", term.to_lowercase()))
}

/// Build every SeaORM repository over one connection
pub fn sea_orm_repositories(db: Arc<DatabaseConnection>) -> Repositories {
    Repositories {
        clients: Arc::new(SeaOrmClientRepository::new(db.clone())),
        equipment: Arc::new(SeaOrmEquipmentRepository::new(db.clone())),
        technicians: Arc::new(SeaOrmTechnicianRepository::new(db.clone())),
        parts: Arc::new(SeaOrmPartRepository::new(db.clone())),
        orders: Arc::new(SeaOrmServiceOrderRepository::new(db.clone())),
        order_items: Arc::new(SeaOrmOrderItemRepository::new(db.clone())),
        history: Arc::new(SeaOrmStatusHistoryRepository::new(db)),
    }
}

// ===== Client Repository =====

pub struct SeaOrmClientRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmClientRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn upsert_by_national_id(&self, client: &Client) -> Result<Client> {
        let active: client::ActiveModel = client.into();

        client::Entity::insert(active)
            .on_conflict(
                OnConflict::column(client::Column::NationalId)
                    .update_columns([
                        client::Column::FullName,
                        client::Column::Phone,
                        client::Column::Email,
                        client::Column::Address,
                        client::Column::Category,
                        client::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&*self.db)
            .await?;

        self.find_by_national_id(&client.national_id)
            .await?
            .ok_or_else(|| anyhow!("client {} missing after upsert", client.national_id))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>> {
        client::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Client::try_from)
            .transpose()
    }

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Client>> {
        client::Entity::find()
            .filter(client::Column::NationalId.eq(national_id))
            .one(&*self.db)
            .await?
            .map(Client::try_from)
            .transpose()
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<Client>> {
        let mut query = client::Entity::find();

        if let Some(term) = term {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(client::Column::FullName, term))
                    .add(contains_ci(client::Column::NationalId, term)),
            );
        }

        query
            .order_by_asc(client::Column::FullName)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Client::try_from)
            .collect()
    }

    async fn update(&self, client: &Client) -> Result<Client> {
        let active: client::ActiveModel = client.into();
        client::Entity::update(active)
            .exec(&*self.db)
            .await?
            .try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        client::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }
}

// ===== Equipment Repository =====

pub struct SeaOrmEquipmentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmEquipmentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EquipmentRepository for SeaOrmEquipmentRepository {
    async fn create(&self, equipment: &Equipment) -> Result<Equipment> {
        let active: equipment::ActiveModel = equipment.into();
        let result = equipment::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Equipment>> {
        let result = equipment::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_by_client(&self, client_id: Uuid) -> Result<Vec<Equipment>> {
        let results = equipment::Entity::find()
            .filter(equipment::Column::ClientId.eq(client_id))
            .order_by_asc(equipment::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }
}

// ===== Technician Repository =====

pub struct SeaOrmTechnicianRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTechnicianRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TechnicianRepository for SeaOrmTechnicianRepository {
    async fn create(&self, technician: &Technician) -> Result<Technician> {
        let active: technician::ActiveModel = technician.into();
        let result = technician::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Technician>> {
        let result = technician::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Technician>> {
        let mut query = technician::Entity::find();
        if active_only {
            query = query.filter(technician::Column::IsActive.eq(true));
        }

        let results = query
            .order_by_asc(technician::Column::FullName)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update(&self, technician: &Technician) -> Result<Technician> {
        let active: technician::ActiveModel = technician.into();
        let result = technician::Entity::update(active).exec(&*self.db).await?;
        Ok(result.into())
    }
}

// ===== Part Repository =====

pub struct SeaOrmPartRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPartRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PartRepository for SeaOrmPartRepository {
    async fn upsert_by_code(&self, part: &Part) -> Result<Part> {
        let active: part::ActiveModel = part.into();

        part::Entity::insert(active)
            .on_conflict(
                OnConflict::column(part::Column::Code)
                    .update_columns([
                        part::Column::Name,
                        part::Column::Description,
                        part::Column::StockLevel,
                        part::Column::MinStock,
                        part::Column::UnitCost,
                        part::Column::UnitPrice,
                        part::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&*self.db)
            .await?;

        self.find_by_code(&part.code)
            .await?
            .ok_or_else(|| anyhow!("part {} missing after upsert", part.code))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Part>> {
        let result = part::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Part>> {
        let result = part::Entity::find()
            .filter(part::Column::Code.eq(code))
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<Part>> {
        let mut query = part::Entity::find();

        if let Some(term) = term {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(part::Column::Code, term))
                    .add(contains_ci(part::Column::Name, term)),
            );
        }

        let results = query
            .order_by_asc(part::Column::Code)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn list_low_stock(&self) -> Result<Vec<Part>> {
        let results = part::Entity::find()
            .filter(Expr::col(part::Column::StockLevel).lte(Expr::col(part::Column::MinStock)))
            .order_by_asc(part::Column::StockLevel)
            .order_by_asc(part::Column::Code)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Option<Part>> {
        let mut update = part::Entity::update_many()
            .col_expr(
                part::Column::StockLevel,
                Expr::col(part::Column::StockLevel).add(delta),
            )
            .col_expr(part::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(part::Column::Id.eq(id));

        // Guard in the same statement so concurrent adjustments cannot overdraw or overflow
        if delta < 0 {
            update = update.filter(part::Column::StockLevel.gte(delta.unsigned_abs()));
        } else {
            update = update.filter(part::Column::StockLevel.lte(i32::MAX - delta));
        }

        let result = update.exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}

// ===== Service Order Repository =====

pub struct SeaOrmServiceOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmServiceOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceOrderRepository for SeaOrmServiceOrderRepository {
    async fn create(&self, order: &ServiceOrder) -> Result<ServiceOrder> {
        let active: service_order::ActiveModel = order.into();
        service_order::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?
            .try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceOrder>> {
        service_order::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(ServiceOrder::try_from)
            .transpose()
    }

    async fn find_by_number(&self, order_number: &str) -> Result<Option<ServiceOrder>> {
        service_order::Entity::find()
            .filter(service_order::Column::OrderNumber.eq(order_number))
            .one(&*self.db)
            .await?
            .map(ServiceOrder::try_from)
            .transpose()
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<ServiceOrder>> {
        let mut query = service_order::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(service_order::Column::Status.eq(status.as_str()));
        }
        if let Some(technician_id) = filter.technician_id {
            query = query.filter(service_order::Column::TechnicianId.eq(technician_id));
        }
        if let Some(client_id) = filter.client_id {
            query = query.filter(service_order::Column::ClientId.eq(client_id));
        }

        query
            .order_by_desc(service_order::Column::CreatedAt)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(ServiceOrder::try_from)
            .collect()
    }

    async fn update(
        &self,
        order: &ServiceOrder,
        expected: OrderStatus,
    ) -> Result<Option<ServiceOrder>> {
        let result = service_order::Entity::update_many()
            .col_expr(service_order::Column::TechnicianId, Expr::value(order.technician_id))
            .col_expr(service_order::Column::Status, Expr::value(order.status.as_str()))
            .col_expr(service_order::Column::Diagnosis, Expr::value(order.diagnosis.clone()))
            .col_expr(service_order::Column::LaborCost, Expr::value(order.labor_cost))
            .col_expr(service_order::Column::TotalCost, Expr::value(order.total_cost))
            .col_expr(service_order::Column::IsWarranty, Expr::value(order.is_warranty))
            .col_expr(service_order::Column::UpdatedAt, Expr::value(order.updated_at))
            .filter(service_order::Column::Id.eq(order.id))
            .filter(service_order::Column::Status.eq(expected.as_str()))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(order.id).await
    }

    async fn count_for_client(&self, client_id: Uuid) -> Result<u64> {
        let count = service_order::Entity::find()
            .filter(service_order::Column::ClientId.eq(client_id))
            .count(&*self.db)
            .await?;
        Ok(count)
    }
}

// ===== Order Item Repository =====

pub struct SeaOrmOrderItemRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmOrderItemRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderItemRepository for SeaOrmOrderItemRepository {
    async fn add(&self, item: &OrderItem) -> Result<OrderItem> {
        let active: order_item::ActiveModel = item.into();
        let result = order_item::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?;
        Ok(result.into())
    }

    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<OrderItem>> {
        let results = order_item::Entity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        order_item::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }
}

// ===== Status History Repository =====

pub struct SeaOrmStatusHistoryRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmStatusHistoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatusHistoryRepository for SeaOrmStatusHistoryRepository {
    async fn append(&self, entry: &StatusHistory) -> Result<StatusHistory> {
        let active: status_history::ActiveModel = entry.into();
        status_history::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await?
            .try_into()
    }

    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<StatusHistory>> {
        status_history::Entity::find()
            .filter(status_history::Column::OrderId.eq(order_id))
            .order_by_asc(status_history::Column::ChangedAt)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(StatusHistory::try_from)
            .collect()
    }
}
