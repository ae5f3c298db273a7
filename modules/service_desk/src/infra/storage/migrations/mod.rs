//! Database migrations for the service desk

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_directory::Migration),
            Box::new(m20250301_000002_create_parts::Migration),
            Box::new(m20250301_000003_create_service_orders::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    NationalId,
    FullName,
    Phone,
    Email,
    Address,
    Category,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Equipment {
    Table,
    Id,
    ClientId,
    EquipmentType,
    Brand,
    Model,
    SerialNumber,
    Specs,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Technicians {
    Table,
    Id,
    FullName,
    Specialty,
    Phone,
    CommissionRate,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Parts {
    Table,
    Id,
    Code,
    Name,
    Description,
    StockLevel,
    MinStock,
    UnitCost,
    UnitPrice,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ServiceOrders {
    Table,
    Id,
    OrderNumber,
    ClientId,
    EquipmentId,
    TechnicianId,
    Status,
    ReportedIssue,
    Diagnosis,
    LaborCost,
    TotalCost,
    IsWarranty,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    PartId,
    Quantity,
    PriceAtTime,
}

#[derive(DeriveIden)]
enum StatusHistory {
    Table,
    Id,
    OrderId,
    StatusFrom,
    StatusTo,
    ChangedById,
    Notes,
    ChangedAt,
}

fn created_at<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

fn money<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(12, 2)
        .not_null()
        .default(0)
        .to_owned()
}

mod m20250301_000001_create_directory {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_directory"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Clients::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Clients::NationalId)
                                .string_len(20)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Clients::FullName).string().not_null())
                        .col(ColumnDef::new(Clients::Phone).string())
                        .col(ColumnDef::new(Clients::Email).string())
                        .col(ColumnDef::new(Clients::Address).string())
                        .col(
                            ColumnDef::new(Clients::Category)
                                .string_len(16)
                                .not_null()
                                .default("REGULAR"),
                        )
                        .col(created_at(Clients::CreatedAt))
                        .col(created_at(Clients::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_clients_full_name")
                        .table(Clients::Table)
                        .col(Clients::FullName)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Equipment::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Equipment::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Equipment::ClientId).uuid().not_null())
                        .col(ColumnDef::new(Equipment::EquipmentType).string().not_null())
                        .col(ColumnDef::new(Equipment::Brand).string().not_null())
                        .col(ColumnDef::new(Equipment::Model).string())
                        .col(ColumnDef::new(Equipment::SerialNumber).string())
                        .col(ColumnDef::new(Equipment::Specs).json().not_null())
                        .col(created_at(Equipment::CreatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_equipment_client")
                                .from(Equipment::Table, Equipment::ClientId)
                                .to(Clients::Table, Clients::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_equipment_client_id")
                        .table(Equipment::Table)
                        .col(Equipment::ClientId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Technicians::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Technicians::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Technicians::FullName).string().not_null())
                        .col(ColumnDef::new(Technicians::Specialty).string())
                        .col(ColumnDef::new(Technicians::Phone).string())
                        .col(
                            ColumnDef::new(Technicians::CommissionRate)
                                .decimal_len(5, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Technicians::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(created_at(Technicians::CreatedAt))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Technicians::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Equipment::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000002_create_parts {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_parts"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Parts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Parts::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Parts::Code)
                                .string_len(64)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Parts::Name).string().not_null())
                        .col(ColumnDef::new(Parts::Description).text())
                        .col(
                            ColumnDef::new(Parts::StockLevel)
                                .integer()
                                .not_null()
                                .default(0)
                                .check(Expr::col(Parts::StockLevel).gte(0)),
                        )
                        .col(
                            ColumnDef::new(Parts::MinStock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(money(Parts::UnitCost))
                        .col(money(Parts::UnitPrice))
                        .col(created_at(Parts::CreatedAt))
                        .col(created_at(Parts::UpdatedAt))
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Parts::Table).to_owned())
                .await
        }
    }
}

mod m20250301_000003_create_service_orders {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_service_orders"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ServiceOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ServiceOrders::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ServiceOrders::OrderNumber)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ServiceOrders::ClientId).uuid().not_null())
                        .col(ColumnDef::new(ServiceOrders::EquipmentId).uuid().not_null())
                        .col(ColumnDef::new(ServiceOrders::TechnicianId).uuid())
                        .col(
                            ColumnDef::new(ServiceOrders::Status)
                                .string_len(24)
                                .not_null()
                                .default("PENDING"),
                        )
                        .col(ColumnDef::new(ServiceOrders::ReportedIssue).text())
                        .col(ColumnDef::new(ServiceOrders::Diagnosis).text())
                        .col(money(ServiceOrders::LaborCost))
                        .col(money(ServiceOrders::TotalCost))
                        .col(
                            ColumnDef::new(ServiceOrders::IsWarranty)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(created_at(ServiceOrders::CreatedAt))
                        .col(created_at(ServiceOrders::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_service_orders_client")
                                .from(ServiceOrders::Table, ServiceOrders::ClientId)
                                .to(Clients::Table, Clients::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_service_orders_equipment")
                                .from(ServiceOrders::Table, ServiceOrders::EquipmentId)
                                .to(Equipment::Table, Equipment::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_service_orders_technician")
                                .from(ServiceOrders::Table, ServiceOrders::TechnicianId)
                                .to(Technicians::Table, Technicians::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_service_orders_status")
                        .table(ServiceOrders::Table)
                        .col(ServiceOrders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_service_orders_technician_id")
                        .table(ServiceOrders::Table)
                        .col(ServiceOrders::TechnicianId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(OrderItems::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(OrderItems::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::PartId).uuid().not_null())
                        .col(ColumnDef::new(OrderItems::Quantity).integer().not_null())
                        .col(
                            ColumnDef::new(OrderItems::PriceAtTime)
                                .decimal_len(12, 2)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_order")
                                .from(OrderItems::Table, OrderItems::OrderId)
                                .to(ServiceOrders::Table, ServiceOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_items_part")
                                .from(OrderItems::Table, OrderItems::PartId)
                                .to(Parts::Table, Parts::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_order_items_order_id")
                        .table(OrderItems::Table)
                        .col(OrderItems::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StatusHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StatusHistory::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(StatusHistory::OrderId).uuid().not_null())
                        .col(ColumnDef::new(StatusHistory::StatusFrom).string_len(24))
                        .col(
                            ColumnDef::new(StatusHistory::StatusTo)
                                .string_len(24)
                                .not_null(),
                        )
                        .col(ColumnDef::new(StatusHistory::ChangedById).uuid())
                        .col(ColumnDef::new(StatusHistory::Notes).text())
                        .col(created_at(StatusHistory::ChangedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_status_history_order")
                                .from(StatusHistory::Table, StatusHistory::OrderId)
                                .to(ServiceOrders::Table, ServiceOrders::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_status_history_order_id")
                        .table(StatusHistory::Table)
                        .col(StatusHistory::OrderId)
                        .col(StatusHistory::ChangedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StatusHistory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(OrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ServiceOrders::Table).to_owned())
                .await
        }
    }
}
