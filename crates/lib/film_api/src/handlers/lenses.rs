//! Lens request handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use film_core::models::inventory::{Lens, LensUpdate, NewLens};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::lenses;

/// `GET /lenses`
pub async fn list_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<Lens>>> {
    Ok(Json(lenses::list(state.lenses.as_ref(), user.id()).await?))
}

/// `POST /lenses`
pub async fn create_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    body: Result<Json<NewLens>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Lens>)> {
    let Json(body) = body?;
    let lens = lenses::create(state.lenses.as_ref(), user.id(), body).await?;
    Ok((StatusCode::CREATED, Json(lens)))
}

/// `GET /lenses/{id}`
pub async fn get_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Lens>> {
    Ok(Json(lenses::get(state.lenses.as_ref(), user.id(), id).await?))
}

/// `PATCH /lenses/{id}`
pub async fn update_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    body: Result<Json<LensUpdate>, JsonRejection>,
) -> AppResult<Json<Lens>> {
    let Json(body) = body?;
    Ok(Json(lenses::update(state.lenses.as_ref(), user.id(), id, body).await?))
}

/// `DELETE /lenses/{id}`
pub async fn delete_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    lenses::delete(state.lenses.as_ref(), user.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
