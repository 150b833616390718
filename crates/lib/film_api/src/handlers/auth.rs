//! Authentication request handlers.
//!
//! Token-issuing endpoints return the pair in the JSON body and also set
//! the `access_token` / `refresh_token` httpOnly cookies.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use film_core::models::auth::{NewAccount, TokenPair};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{LoginRequest, RefreshRequest, TokenResponse, UserResponse};
use crate::services::cookies;

fn with_session_cookies(state: &AppState, jar: CookieJar, pair: &TokenPair) -> CookieJar {
    let secure = state.config.secure_cookies();
    jar.add(cookies::access_cookie(
        &pair.access_token,
        state.sessions.access_ttl().num_seconds(),
        secure,
    ))
    .add(cookies::refresh_cookie(
        &pair.refresh_token,
        state.sessions.refresh_ttl().num_seconds(),
        secure,
    ))
}

fn without_session_cookies(state: &AppState, jar: CookieJar) -> CookieJar {
    let secure = state.config.secure_cookies();
    jar.add(cookies::clear_access_cookie(secure))
        .add(cookies::clear_refresh_cookie(secure))
}

/// The refresh secret from the JSON body, or else from the cookie.
///
/// An empty or non-JSON body counts as absent.
fn presented_refresh_token(jar: &CookieJar, body: &Bytes) -> Option<String> {
    let from_body = serde_json::from_slice::<RefreshRequest>(body)
        .ok()
        .and_then(|req| req.refresh_token)
        .filter(|t| !t.is_empty());

    from_body.or_else(|| {
        jar.get(cookies::REFRESH_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

fn token_response(state: &AppState, pair: &TokenPair) -> TokenResponse {
    TokenResponse::new(pair, state.sessions.access_ttl().num_seconds())
}

/// `POST /auth/signup` — create an account and start a session.
pub async fn signup_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<NewAccount>, JsonRejection>,
) -> AppResult<(StatusCode, CookieJar, Json<UserResponse>)> {
    let Json(body) = body?;
    let user = state.accounts.signup(body).await?;
    let pair = state.sessions.login(user.id).await?;
    let jar = with_session_cookies(&state, jar, &pair);
    Ok((StatusCode::CREATED, jar, Json(UserResponse { user })))
}

/// `POST /auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let Json(body) = body?;
    let user = state.accounts.authenticate(&body.email, &body.password).await?;
    let pair = state.sessions.login(user.id).await?;
    let jar = with_session_cookies(&state, jar, &pair);
    Ok((jar, Json(token_response(&state, &pair))))
}

/// `POST /auth/refresh` — rotate a refresh token into a new pair.
pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let presented = presented_refresh_token(&jar, &body)
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".into()))?;
    let pair = state.sessions.refresh(&presented).await?;
    let jar = with_session_cookies(&state, jar, &pair);
    Ok((jar, Json(token_response(&state, &pair))))
}

/// `POST /auth/logout` — revoke the presented refresh token, if any.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> AppResult<(StatusCode, CookieJar)> {
    if let Some(presented) = presented_refresh_token(&jar, &body) {
        state.sessions.logout(&presented).await?;
    }
    Ok((StatusCode::NO_CONTENT, without_session_cookies(&state, jar)))
}

/// `POST /auth/logout-all` — revoke every refresh token of the caller.
pub async fn logout_all_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> AppResult<(StatusCode, CookieJar)> {
    state.sessions.logout_everywhere(user.id()).await?;
    Ok((StatusCode::NO_CONTENT, without_session_cookies(&state, jar)))
}

/// `GET /auth/me` — profile of the authenticated caller.
pub async fn me_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .accounts
        .profile(user.id())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(UserResponse { user }))
}
