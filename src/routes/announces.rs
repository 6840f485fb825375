//! Announcement routes: plain CRUD over the news feed entries.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::middleware::extract::ValidJson;
use crate::models::announce::{Announce, AnnounceInput};
use crate::services::announce as announce_service;
use crate::AppState;

/// Confirmation body for deletions.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// GET /api/announces: every announcement.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Announce>>, AppError> {
    let announces = announce_service::list(&state.db, state.dialect).await?;
    Ok(Json(announces))
}

/// POST /api/announces: create an announcement.
pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<AnnounceInput>,
) -> Result<(StatusCode, Json<Announce>), AppError> {
    let announce = announce_service::create(&state.db, state.dialect, &body).await?;
    Ok((StatusCode::CREATED, Json(announce)))
}

/// GET /api/announces/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Announce>, AppError> {
    let announce = announce_service::find_by_id(&state.db, state.dialect, id).await?;
    Ok(Json(announce))
}

/// PUT /api/announces/{id}: replace an announcement.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidJson(body): ValidJson<AnnounceInput>,
) -> Result<Json<Announce>, AppError> {
    let announce = announce_service::update(&state.db, state.dialect, id, &body).await?;
    Ok(Json(announce))
}

/// DELETE /api/announces/{id}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, AppError> {
    announce_service::delete(&state.db, state.dialect, id).await?;
    Ok(Json(DeleteResponse {
        message: "Deleted successfully".to_string(),
    }))
}
