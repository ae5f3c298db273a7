//! Route registration for the Google REST API

use super::handlers;
use crate::domain::Service;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

pub const SERVICE_PATH: &str = "/api/google-service";
pub const TEST_PATH: &str = "/api/google-test";

/// Register the Google routes on `router`
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let body_limit = service.config().max_request_bytes;

    let routes = Router::new()
        .route(
            SERVICE_PATH,
            post(handlers::google_service).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(TEST_PATH, get(handlers::google_test))
        .layer(Extension(service));

    Ok(router.merge(routes))
}
