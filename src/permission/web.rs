use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::permission::service;
use crate::permission::types::{CheckAccessQuery, CreateDistributorRequest};
use crate::permission::PermissionState;

pub fn router(state: Arc<PermissionState>) -> Router {
    Router::new()
        .route("/distributor", post(handle_create))
        .route("/distributor/{name}", get(handle_get))
        .route("/distributor/{name}/permission", get(handle_check))
        .route("/healthz", get(health))
        .with_state(state)
}

async fn handle_create(
    State(state): State<Arc<PermissionState>>,
    Json(req): Json<CreateDistributorRequest>,
) -> impl IntoResponse {
    match service::create(&state, &req) {
        Ok(resp) => (StatusCode::CREATED, Json(resp)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn handle_get(
    State(state): State<Arc<PermissionState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match service::get(&state, &name) {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn handle_check(
    State(state): State<Arc<PermissionState>>,
    Path(name): Path<String>,
    Query(query): Query<CheckAccessQuery>,
) -> impl IntoResponse {
    match service::check_access(&state, &name, &query.region) {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
