//! Credential storage.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::AuthError;
use crate::models::auth::{NewUser, User, UserId, UserWithPassword};

/// Persistence contract for identities and their password hashes.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with `EmailTaken` if the (normalized) email exists.
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, AuthError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;
}

/// In-process credential store keyed by normalized email.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    by_email: DashMap<String, UserWithPassword>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new: NewUser) -> Result<User, AuthError> {
        match self.by_email.entry(new.email.clone()) {
            Entry::Occupied(_) => Err(AuthError::EmailTaken),
            Entry::Vacant(slot) => {
                let user = User {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                    email: new.email,
                    first_name: new.first_name,
                    last_name: new.last_name,
                    created_at: Utc::now(),
                };
                slot.insert(UserWithPassword {
                    user: user.clone(),
                    password_hash: new.password_hash,
                });
                Ok(user)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserWithPassword>, AuthError> {
        Ok(self.by_email.get(email).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
        Ok(self
            .by_email
            .iter()
            .find(|entry| entry.user.id == id)
            .map(|entry| entry.user.clone()))
    }
}
