//! Service Desk Module
//!
//! Appliance repair back office: clients and their equipment, technicians,
//! the parts inventory and service orders from intake to delivery.

// Public exports
pub mod contract;
pub use contract::{
    client::ServiceDeskApi, error::ServiceDeskError, Client, ClientCategory, Equipment,
    Invoice, OrderStatus, Part, ServiceOrder, SessionUser, StatusHistory, Technician,
};

pub mod module;
pub use module::ServiceDeskModule;

pub use api::rest::error::Problem;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
