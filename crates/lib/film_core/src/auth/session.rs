//! Session lifecycle: login, refresh-token rotation, logout.
//!
//! Each refresh-token lineage moves `Active -> Rotated` on refresh or
//! `Active -> Revoked` on logout; expiry is detected when a token is used.
//! A refresh revokes the presented token before issuing its replacement, so
//! a crash in between leaves the lineage dead rather than replayable.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::refresh_tokens::{RefreshTokenStore, hash_secret};
use super::{AuthConfig, AuthError, TokenError, TokenSigner};
use crate::models::auth::{TokenPair, UserId};

/// Orchestrates token issuance and rotation.
pub struct SessionService {
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    signer: TokenSigner,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SessionService {
    pub fn new(config: &AuthConfig, refresh_tokens: Arc<dyn RefreshTokenStore>) -> Self {
        Self {
            refresh_tokens,
            signer: TokenSigner::new(config.jwt_secret.as_bytes(), config.leeway),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    /// Access-token lifetime, for `expires_in` and cookie max-age.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Refresh-token lifetime.
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Verify an access token at the current time.
    pub fn verify_access_token(&self, token: &str) -> Result<UserId, TokenError> {
        self.signer.verify(token, Utc::now())
    }

    /// Issue a fresh token pair for an already-authenticated user.
    ///
    /// Other sessions of the same user are left untouched.
    pub async fn login(&self, user_id: UserId) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let access_token = self.signer.issue(user_id, now, self.access_ttl)?;
        let refresh_expires_at = now + self.refresh_ttl;
        let (refresh_token, _) = self
            .refresh_tokens
            .create(user_id, refresh_expires_at)
            .await?;

        Ok(TokenPair {
            access_token,
            access_expires_at: now + self.access_ttl,
            refresh_token,
            refresh_expires_at,
        })
    }

    /// Exchange a refresh secret for a new pair, revoking the presented one.
    ///
    /// Unknown, revoked, expired, and concurrently-rotated tokens all fail
    /// with the same `InvalidToken`.
    pub async fn refresh(&self, presented: &str) -> Result<TokenPair, AuthError> {
        self.refresh_at(presented, Utc::now()).await
    }

    async fn refresh_at(&self, presented: &str, now: DateTime<Utc>) -> Result<TokenPair, AuthError> {
        let record = self
            .refresh_tokens
            .find_by_hash(&hash_secret(presented))
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if !record.is_active(now) {
            warn!(token_id = record.id, user_id = record.user_id, "refresh with dead token");
            return Err(AuthError::InvalidToken);
        }

        // Rotation happens before re-issuance. Losing the race means another
        // caller already consumed this token.
        if !self.refresh_tokens.revoke(record.id).await? {
            warn!(token_id = record.id, user_id = record.user_id, "refresh token reuse detected");
            return Err(AuthError::InvalidToken);
        }

        debug!(token_id = record.id, user_id = record.user_id, "refresh token rotated");
        self.login(record.user_id).await
    }

    /// Revoke a refresh secret. Unknown or already-revoked tokens succeed.
    pub async fn logout(&self, presented: &str) -> Result<(), AuthError> {
        let Some(record) = self
            .refresh_tokens
            .find_by_hash(&hash_secret(presented))
            .await?
        else {
            return Ok(());
        };

        self.refresh_tokens.revoke(record.id).await?;
        debug!(token_id = record.id, user_id = record.user_id, "refresh token revoked");
        Ok(())
    }

    /// Revoke every refresh token belonging to `user_id`.
    pub async fn logout_everywhere(&self, user_id: UserId) -> Result<u64, AuthError> {
        let revoked = self.refresh_tokens.revoke_all_for_user(user_id).await?;
        info!(user_id, revoked, "revoked all sessions");
        Ok(revoked)
    }

    /// Remove refresh tokens that expired before `now`.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        self.refresh_tokens.delete_expired(now).await
    }
}
