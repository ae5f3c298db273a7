//! SeaORM entities for database tables

/// Clients table
pub mod client {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "clients")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// National identity document number (unique)
        #[sea_orm(unique)]
        pub national_id: String,

        pub full_name: String,
        pub phone: Option<String>,
        pub email: Option<String>,
        pub address: Option<String>,

        /// REGULAR, PREMIUM or ENTERPRISE
        pub category: String,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::equipment::Entity")]
        Equipment,
        #[sea_orm(has_many = "super::service_order::Entity")]
        ServiceOrders,
    }

    impl Related<super::equipment::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Equipment.def()
        }
    }

    impl Related<super::service_order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ServiceOrders.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Client appliances
pub mod equipment {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "equipment")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub client_id: Uuid,
        pub equipment_type: String,
        pub brand: String,
        pub model: Option<String>,
        pub serial_number: Option<String>,

        /// Open attribute bag (JSON object)
        pub specs: Json,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::client::Entity",
            from = "Column::ClientId",
            to = "super::client::Column::Id"
        )]
        Client,
    }

    impl Related<super::client::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Client.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Technicians table
pub mod technician {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "technicians")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub full_name: String,
        pub specialty: Option<String>,
        pub phone: Option<String>,

        /// Percentage, 0..=100
        #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
        pub commission_rate: Decimal,

        pub is_active: bool,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Parts inventory
pub mod part {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "parts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        /// Barcode / SKU (unique)
        #[sea_orm(unique)]
        pub code: String,

        pub name: String,
        pub description: Option<String>,
        pub stock_level: i32,
        pub min_stock: i32,

        #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
        pub unit_cost: Decimal,

        #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
        pub unit_price: Decimal,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Service orders
pub mod service_order {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "service_orders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,

        #[sea_orm(unique)]
        pub order_number: String,

        pub client_id: Uuid,
        pub equipment_id: Uuid,
        pub technician_id: Option<Uuid>,

        /// One of the ten order status literals
        pub status: String,

        pub reported_issue: Option<String>,
        pub diagnosis: Option<String>,

        #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
        pub labor_cost: Decimal,

        #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
        pub total_cost: Decimal,

        pub is_warranty: bool,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::client::Entity",
            from = "Column::ClientId",
            to = "super::client::Column::Id"
        )]
        Client,
        #[sea_orm(has_many = "super::order_item::Entity")]
        Items,
        #[sea_orm(has_many = "super::status_history::Entity")]
        History,
    }

    impl Related<super::client::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Client.def()
        }
    }

    impl Related<super::order_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Items.def()
        }
    }

    impl Related<super::status_history::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::History.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Parts consumed by service orders
pub mod order_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "order_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub order_id: Uuid,
        pub part_id: Uuid,
        pub quantity: i32,

        /// Unit price captured when the item was added
        #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
        pub price_at_time: Decimal,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::service_order::Entity",
            from = "Column::OrderId",
            to = "super::service_order::Column::Id"
        )]
        ServiceOrder,
    }

    impl Related<super::service_order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ServiceOrder.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Status change audit trail
pub mod status_history {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "status_history")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub order_id: Uuid,
        pub status_from: Option<String>,
        pub status_to: String,
        pub changed_by_id: Option<Uuid>,
        pub notes: Option<String>,
        pub changed_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::service_order::Entity",
            from = "Column::OrderId",
            to = "super::service_order::Column::Id"
        )]
        ServiceOrder,
    }

    impl Related<super::service_order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ServiceOrder.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
