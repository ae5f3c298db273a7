//! Route registration for the service desk REST API

use super::handlers;
use crate::domain::Service;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Extension, Router,
};
use std::sync::Arc;

/// Mount point of every service desk endpoint
pub const BASE_PATH: &str = "/api/service-desk";

/// Register all REST routes on `router` under [`BASE_PATH`]
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    // Spreadsheet uploads may exceed axum's default body limit
    let import_limit = service.config().max_import_bytes + 1024;

    let routes = Router::new()
        // Clients
        .route(
            "/clients",
            get(handlers::list_clients).post(handlers::upsert_client),
        )
        .route(
            "/clients/import",
            post(handlers::import_clients).layer(DefaultBodyLimit::max(import_limit)),
        )
        .route(
            "/clients/{id}",
            get(handlers::get_client)
                .patch(handlers::update_client)
                .delete(handlers::delete_client),
        )
        .route(
            "/clients/{id}/equipment",
            get(handlers::list_client_equipment).post(handlers::register_equipment),
        )
        // Equipment
        .route("/equipment/{id}", get(handlers::get_equipment))
        // Technicians
        .route(
            "/technicians",
            get(handlers::list_technicians).post(handlers::create_technician),
        )
        .route("/technicians/{id}", patch(handlers::update_technician))
        .route("/technicians/{id}/active", put(handlers::set_technician_active))
        // Inventory
        .route("/parts", get(handlers::list_parts).post(handlers::upsert_part))
        .route("/parts/low-stock", get(handlers::list_low_stock))
        .route("/parts/export", get(handlers::export_parts))
        .route("/parts/by-code/{code}", get(handlers::find_part_by_code))
        .route("/parts/{id}", get(handlers::get_part))
        .route("/parts/{id}/stock", post(handlers::adjust_stock))
        // Service orders
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/orders/by-number/{number}", get(handlers::get_order_by_number))
        .route("/orders/{id}", get(handlers::get_order))
        .route("/orders/{id}/technician", put(handlers::assign_technician))
        .route("/orders/{id}/status", post(handlers::change_status))
        .route("/orders/{id}/history", get(handlers::status_history))
        .route("/orders/{id}/diagnosis", put(handlers::record_diagnosis))
        .route("/orders/{id}/costs", patch(handlers::update_costs))
        .route(
            "/orders/{id}/items",
            get(handlers::list_order_items).post(handlers::add_order_item),
        )
        .route(
            "/orders/{id}/items/{item_id}",
            delete(handlers::remove_order_item),
        )
        .route("/orders/{id}/invoice", get(handlers::invoice))
        // Dashboard
        .route("/dashboard", get(handlers::dashboard))
        .layer(Extension(service));

    Ok(router.nest(BASE_PATH, routes))
}
