//! HTTP API gateway for Switchyard.
//!
//! Exposes the toggle catalog and the assignment policy engine over REST:
//!
//! - `GET    /health`
//! - `GET    /v1/toggles`             — List toggles
//! - `POST   /v1/toggles`             — Create a toggle
//! - `GET    /v1/toggles/{name}`      — Get a toggle
//! - `PUT    /v1/toggles/{name}`      — Update a toggle
//! - `DELETE /v1/toggles/{name}`      — Delete a toggle (refused while referenced)
//! - `GET    /v1/assignments?service=S&version=V` — Assignments visible to a service
//! - `POST   /v1/assignments`         — Submit an assignment proposal
//! - `DELETE /v1/assignments/{id}`    — Remove an assignment
//!
//! Typed engine outcomes map losslessly onto HTTP status codes: NotFound
//! → 404, Conflict → 409, InvalidArgument → 400, Internal → 500. A red
//! toggle's absorbed proposal is a 200 with `"status": "absorbed"` and no
//! record — it is not an error.
//!
//! Built on Axum for high performance async HTTP.

pub mod api;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing::info;

use switchyard_core::{Assignment, Store, Toggle};
use switchyard_engine::{AssignmentEngine, ToggleCatalog};
use switchyard_store::MemoryStore;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub catalog: ToggleCatalog,
    pub engine: AssignmentEngine,
}

pub type SharedState = Arc<GatewayState>;

/// Build a gateway state backed by fresh in-memory stores.
pub fn memory_state() -> SharedState {
    let toggles: Arc<MemoryStore<Toggle>> = Arc::new(MemoryStore::new());
    let assignments: Arc<MemoryStore<Assignment>> = Arc::new(MemoryStore::new());
    info!(backend = toggles.name(), "Store backend ready");
    Arc::new(GatewayState {
        catalog: ToggleCatalog::new(toggles.clone(), assignments.clone()),
        engine: AssignmentEngine::new(toggles, assignments),
    })
}

/// Build the full router with CORS and trace layers.
pub fn build_router(state: SharedState) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    api::router(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
pub async fn start(config: switchyard_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(memory_state());

    info!(addr = %addr, store = %config.store.backend, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
