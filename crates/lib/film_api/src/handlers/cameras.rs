//! Camera request handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use film_core::models::inventory::{Camera, CameraUpdate, NewCamera};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::cameras;

/// `GET /cameras` — the caller's cameras.
pub async fn list_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<Camera>>> {
    Ok(Json(cameras::list(state.cameras.as_ref(), user.id()).await?))
}

/// `POST /cameras` — add a camera owned by the caller.
pub async fn create_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    body: Result<Json<NewCamera>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Camera>)> {
    let Json(body) = body?;
    let camera = cameras::create(state.cameras.as_ref(), user.id(), body).await?;
    Ok((StatusCode::CREATED, Json(camera)))
}

/// `GET /cameras/{id}`
pub async fn get_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Camera>> {
    Ok(Json(cameras::get(state.cameras.as_ref(), user.id(), id).await?))
}

/// `PATCH /cameras/{id}` — partial update.
pub async fn update_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    body: Result<Json<CameraUpdate>, JsonRejection>,
) -> AppResult<Json<Camera>> {
    let Json(body) = body?;
    Ok(Json(
        cameras::update(state.cameras.as_ref(), user.id(), id, body).await?,
    ))
}

/// `DELETE /cameras/{id}`
pub async fn delete_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    cameras::delete(state.cameras.as_ref(), user.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
