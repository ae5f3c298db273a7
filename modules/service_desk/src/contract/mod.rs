//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::ServiceDeskApi;
pub use error::ServiceDeskError;
pub use model::{
    Client, ClientCategory, ClientPatch, DashboardSummary, Equipment, ImportReport,
    ImportRowError, Invoice, InvoiceLine, NewClient, NewEquipment, NewPart, NewServiceOrder,
    NewTechnician, OrderFilter, OrderItem, OrderStatus, Part, ServiceOrder, SessionUser, StatusChange,
    StatusHistory, Technician, TechnicianPatch, UnknownLiteral,
};
