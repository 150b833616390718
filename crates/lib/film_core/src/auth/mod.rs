//! Authentication and session lifecycle.
//!
//! Provides password hashing, access-token signing, refresh-token storage,
//! and the account/session services built on top of them.

pub mod accounts;
pub mod jwt;
pub mod password;
pub mod queries;
pub mod refresh_tokens;
pub mod session;
pub mod users;

use chrono::Duration;
use thiserror::Error;

pub use accounts::AccountService;
pub use jwt::{TokenError, TokenSigner};
pub use password::PasswordHasher;
pub use refresh_tokens::RefreshTokenStore;
pub use session::SessionService;
pub use users::UserStore;

/// Authentication errors.
///
/// `InvalidCredentials` and `InvalidToken` are the only session outcomes a
/// client may learn about; everything below `Validation` is infrastructure.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Unknown, expired, revoked, or already-rotated refresh token.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether this error is an infrastructure failure rather than a
    /// business outcome of the session state machine.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            AuthError::Signing(_) | AuthError::DbError(_) | AuthError::Internal(_)
        )
    }
}

/// Immutable authentication settings, loaded once at startup.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// HMAC secret for access tokens.
    pub jwt_secret: String,
    /// Access-token lifetime.
    pub access_ttl: Duration,
    /// Refresh-token lifetime.
    pub refresh_ttl: Duration,
    /// Clock-skew allowance when checking access-token expiry.
    pub leeway: Duration,
    /// bcrypt cost factor.
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Access tokens live 15 minutes, refresh tokens 7 days.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
            leeway: Duration::zero(),
            bcrypt_cost: password::DEFAULT_COST,
        }
    }
}
