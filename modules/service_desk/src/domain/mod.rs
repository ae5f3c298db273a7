//! Domain layer - business logic and services

pub mod events;
pub mod import;
pub mod inventory;
pub mod orders;
pub mod repository;
pub mod service;
pub mod status;
pub mod validation;

pub use events::{EventPublisher, NoOpEventPublisher, ServiceDeskEvent, TracingEventPublisher};
pub use repository::{
    ClientRepository, EquipmentRepository, OrderItemRepository, PartRepository, Repositories,
    ServiceOrderRepository, StatusHistoryRepository, TechnicianRepository,
};
pub use service::Service;
