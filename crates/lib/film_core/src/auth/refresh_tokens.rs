//! Refresh-token storage.
//!
//! Refresh tokens are opaque random strings handed to the client exactly
//! once. Only their SHA-256 digest is persisted.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use sha2::{Digest, Sha256};

use super::AuthError;
use crate::models::auth::{RefreshTokenRecord, UserId};

/// Length of the opaque refresh secret (~381 bits of entropy).
const SECRET_LEN: usize = 64;

/// Generate a cryptographically random refresh secret.
pub fn generate_secret() -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect()
}

/// SHA-256 hash a refresh secret for storage and lookup.
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Persistence contract for refresh tokens.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Generate a secret, persist its hash, and return `(plaintext, record)`.
    async fn create(
        &self,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(String, RefreshTokenRecord), AuthError>;

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AuthError>;

    /// Flip `revoked` from false to true.
    ///
    /// Returns `true` only for the call that performed the transition, so
    /// concurrent callers racing on the same token see exactly one winner.
    async fn revoke(&self, token_id: i64) -> Result<bool, AuthError>;

    /// Revoke every active token of a user; returns how many were revoked.
    async fn revoke_all_for_user(&self, user_id: UserId) -> Result<u64, AuthError>;

    /// Delete rows with `expires_at < now`; returns how many were removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthError>;
}

/// In-process refresh-token store.
#[derive(Debug, Default)]
pub struct MemoryRefreshTokenStore {
    records: DashMap<i64, RefreshTokenRecord>,
    next_id: AtomicI64,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn create(
        &self,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(String, RefreshTokenRecord), AuthError> {
        let secret = generate_secret();
        let record = RefreshTokenRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id,
            token_hash: hash_secret(&secret),
            expires_at,
            revoked: false,
            created_at: Utc::now(),
        };
        self.records.insert(record.id, record.clone());
        Ok((secret, record))
    }

    async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AuthError> {
        Ok(self
            .records
            .iter()
            .find(|entry| entry.token_hash == token_hash)
            .map(|entry| entry.value().clone()))
    }

    async fn revoke(&self, token_id: i64) -> Result<bool, AuthError> {
        // `get_mut` holds the shard write lock, making check-and-set atomic.
        Ok(match self.records.get_mut(&token_id) {
            Some(mut record) if !record.revoked => {
                record.revoked = true;
                true
            }
            _ => false,
        })
    }

    async fn revoke_all_for_user(&self, user_id: UserId) -> Result<u64, AuthError> {
        let mut revoked = 0;
        for mut record in self.records.iter_mut() {
            if record.user_id == user_id && !record.revoked {
                record.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AuthError> {
        let before = self.records.len();
        self.records.retain(|_, record| record.expires_at >= now);
        Ok(before.saturating_sub(self.records.len()) as u64)
    }
}
