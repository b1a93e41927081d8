//! REST handlers — thin translation between HTTP and the engine's typed
//! outcomes. No policy lives here.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use switchyard_core::{Assignment, Error, ErrorKind, Toggle, ToggleKind};
use switchyard_engine::Admission;

use crate::SharedState;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/toggles", get(list_toggles_handler))
        .route("/v1/toggles", post(create_toggle_handler))
        .route("/v1/toggles/{name}", get(get_toggle_handler))
        .route("/v1/toggles/{name}", axum::routing::put(update_toggle_handler))
        .route(
            "/v1/toggles/{name}",
            axum::routing::delete(delete_toggle_handler),
        )
        .route("/v1/assignments", get(list_assignments_handler))
        .route("/v1/assignments", post(submit_assignment_handler))
        .route(
            "/v1/assignments/{id}",
            axum::routing::delete(remove_assignment_handler),
        )
        .with_state(state)
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

type Rejection = (StatusCode, Json<ErrorBody>);

/// Map a typed engine failure onto an HTTP status, losslessly.
fn reject(err: Error) -> Rejection {
    let status = match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

#[derive(Deserialize)]
struct ToggleRequest {
    name: String,
    #[serde(default)]
    description: String,
    kind: ToggleKind,
}

impl From<ToggleRequest> for Toggle {
    fn from(req: ToggleRequest) -> Self {
        Toggle::new(req.name, req.kind).with_description(req.description)
    }
}

#[derive(Deserialize)]
struct AssignmentRequest {
    /// Omit to have the gateway generate a UUID.
    #[serde(default)]
    id: Option<String>,
    toggle_name: String,
    service_name: String,
    service_version: String,
    enabled: bool,
    #[serde(default)]
    excluded: bool,
}

impl From<AssignmentRequest> for Assignment {
    fn from(req: AssignmentRequest) -> Self {
        let id = req
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let mut assignment = Assignment::new(
            id,
            req.toggle_name,
            req.service_name,
            req.service_version,
            req.enabled,
        );
        assignment.excluded = req.excluded;
        assignment
    }
}

#[derive(Serialize)]
struct AdmissionResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignment: Option<Assignment>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn list_toggles_handler(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Toggle>>, Rejection> {
    state.catalog.get_all().await.map(Json).map_err(reject)
}

async fn create_toggle_handler(
    State(state): State<SharedState>,
    Json(req): Json<ToggleRequest>,
) -> Result<(StatusCode, Json<Toggle>), Rejection> {
    let created = state.catalog.create(req.into()).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_toggle_handler(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<Toggle>, Rejection> {
    state.catalog.get(&name).await.map(Json).map_err(reject)
}

async fn update_toggle_handler(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<Toggle>, Rejection> {
    state
        .catalog
        .update(&name, req.into())
        .await
        .map(Json)
        .map_err(reject)
}

async fn delete_toggle_handler(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<StatusCode, Rejection> {
    state.catalog.delete(&name).await.map_err(reject)?;
    state.engine.forget_toggle(&name).await;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct VisibleQuery {
    service: String,
    version: String,
}

async fn list_assignments_handler(
    State(state): State<SharedState>,
    Query(query): Query<VisibleQuery>,
) -> Result<Json<Vec<Assignment>>, Rejection> {
    state
        .engine
        .visible_to(&query.service, &query.version)
        .await
        .map(Json)
        .map_err(reject)
}

async fn submit_assignment_handler(
    State(state): State<SharedState>,
    Json(req): Json<AssignmentRequest>,
) -> Result<Response, Rejection> {
    let proposal: Assignment = req.into();
    info!(
        toggle = %proposal.toggle_name,
        service = %proposal.service_name,
        "Assignment proposal received"
    );

    let response = match state.engine.submit(proposal).await.map_err(reject)? {
        Admission::Created(assignment) => (
            StatusCode::CREATED,
            Json(AdmissionResponse {
                status: "created",
                assignment: Some(assignment),
            }),
        ),
        Admission::Updated(assignment) => (
            StatusCode::OK,
            Json(AdmissionResponse {
                status: "updated",
                assignment: Some(assignment),
            }),
        ),
        Admission::Absorbed => (
            StatusCode::OK,
            Json(AdmissionResponse {
                status: "absorbed",
                assignment: None,
            }),
        ),
    };
    Ok(response.into_response())
}

async fn remove_assignment_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Rejection> {
    state.engine.remove(&id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}
