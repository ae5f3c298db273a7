//! Router assembly and server lifecycle

use crate::config::{AppConfig, DatabaseConfig, ServerConfig};
use crate::session::{require_session, SessionVerifier};
use anyhow::Context;
use assistant::AssistantModule;
use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use google_workspace::GoogleWorkspaceModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::json;
use service_desk::{Problem, ServiceDeskModule};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// The feature modules, initialized and ready to mount
pub struct App {
    pub service_desk: ServiceDeskModule,
    pub google: GoogleWorkspaceModule,
    pub assistant: AssistantModule,
}

impl App {
    pub fn init(config: &AppConfig, db: Arc<DatabaseConnection>) -> anyhow::Result<Self> {
        let app = Self {
            service_desk: ServiceDeskModule::default(),
            google: GoogleWorkspaceModule::default(),
            assistant: AssistantModule::default(),
        };
        app.service_desk
            .init(config.service_desk.clone(), db)
            .context("service desk init failed")?;
        app.google
            .init(config.google.clone())
            .context("Google Workspace init failed")?;
        app.assistant
            .init(config.assistant.clone())
            .context("assistant init failed")?;
        Ok(app)
    }

    pub async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()> {
        self.service_desk.migrate(db).await
    }

    /// Every route behind the session middleware and the HTTP layers
    pub fn router(&self, config: &AppConfig) -> anyhow::Result<Router> {
        let doc = Arc::new(api_doc());

        let mut router = Router::new()
            .route("/health", get(health))
            .route(
                "/api-docs/openapi.json",
                get(move || {
                    let doc = doc.clone();
                    async move { Json(doc.as_ref().clone()) }
                }),
            );
        router = self.service_desk.register_rest(router)?;
        router = self.google.register_rest(router)?;
        router = self.assistant.register_rest(router)?;

        let verifier = Arc::new(SessionVerifier::new(&config.auth)?);
        let x_request_id = HeaderName::from_static("x-request-id");

        Ok(router
            .fallback(not_found)
            .layer(from_fn_with_state(verifier, require_session))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.server.request_timeout_secs),
            ))
            .layer(cors(&config.server))
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid)))
    }
}

/// Combined OpenAPI document of all modules
pub fn api_doc() -> utoipa::openapi::OpenApi {
    use assistant::api::rest::openapi::AssistantDoc;
    use google_workspace::api::rest::openapi::GoogleWorkspaceDoc;
    use service_desk::api::rest::openapi::ServiceDeskDoc;

    let mut doc = ServiceDeskDoc::openapi();
    doc.merge(GoogleWorkspaceDoc::openapi());
    doc.merge(AssistantDoc::openapi());
    doc.info.title = "ServiTech Pro API".to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn not_found() -> Problem {
    Problem::new(StatusCode::NOT_FOUND, "Not Found")
}

fn cors(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);

    Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to {}", redact(&config.url)))
}

/// Drop credentials from a connection URL before logging it
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme), Some(at)) if at > scheme => format!("{}://***{}", &url[..scheme], &url[at..]),
        _ => url.to_string(),
    }
}

/// Connect, migrate and serve until SIGINT/SIGTERM
pub async fn run(config: AppConfig, migrate_only: bool) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let db = Arc::new(connect(&config.database).await?);
    tracing::info!(database = %redact(&config.database.url), "Database connected");

    let app = App::init(&config, db.clone())?;
    if config.database.run_migrations || migrate_only {
        app.migrate(&db).await?;
    }
    if migrate_only {
        tracing::info!("Migrations applied, exiting");
        return Ok(());
    }

    let router = app.router(&config)?;
    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(cancel.clone()));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "ServiTech Pro listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_on_signal(cancel: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
    cancel.cancel();
}
