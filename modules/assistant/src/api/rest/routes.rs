//! Route registration for the assistant REST API

use super::handlers;
use crate::domain::Service;
use axum::{routing::post, Extension, Router};
use std::sync::Arc;

pub const CHAT_PATH: &str = "/api/assistant/chat";

pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let routes = Router::new()
        .route(CHAT_PATH, post(handlers::chat))
        .layer(Extension(service));

    Ok(router.merge(routes))
}
