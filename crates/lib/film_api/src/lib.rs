//! # film_api
//!
//! HTTP API library for the film inventory.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use film_core::auth::{AccountService, PasswordHasher, SessionService};
use film_core::inventory::{CameraStore, LensStore};
use film_core::stores::Stores;
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::ApiConfig;
use crate::handlers::{auth, cameras, health, lenses};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
    pub accounts: Arc<AccountService>,
    pub cameras: Arc<dyn CameraStore>,
    pub lenses: Arc<dyn LensStore>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Wire the services over a set of stores.
    pub fn new(config: ApiConfig, stores: Stores) -> Self {
        let sessions = SessionService::new(&config.auth, stores.refresh_tokens);
        let accounts = AccountService::new(stores.users, PasswordHasher::new(config.auth.bcrypt_cost));
        Self {
            sessions: Arc::new(sessions),
            accounts: Arc::new(accounts),
            cameras: stores.cameras,
            lenses: stores.lenses,
            config,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `film_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    film_core::migrate::migrate(pool).await
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    // Credentialed CORS cannot use wildcards.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    // Public routes (no auth required)
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/refresh", post(auth::refresh_handler))
        .route("/auth/logout", post(auth::logout_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route("/auth/me", get(auth::me_handler))
        .route("/auth/logout-all", post(auth::logout_all_handler))
        .route(
            "/cameras",
            get(cameras::list_handler).post(cameras::create_handler),
        )
        .route(
            "/cameras/{id}",
            get(cameras::get_handler)
                .patch(cameras::update_handler)
                .delete(cameras::delete_handler),
        )
        .route(
            "/lenses",
            get(lenses::list_handler).post(lenses::create_handler),
        )
        .route(
            "/lenses/{id}",
            get(lenses::get_handler)
                .patch(lenses::update_handler)
                .delete(lenses::delete_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
