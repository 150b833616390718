//! Camera and lens inventory.
//!
//! Stores are owner-agnostic; ownership is re-checked by callers with
//! [`ensure_owner`] after an entity has been loaded.

pub mod cameras;
pub mod lenses;
pub mod queries;
pub mod validation;

use thiserror::Error;

use crate::models::auth::UserId;

pub use cameras::CameraStore;
pub use lenses::LensStore;

/// Inventory errors.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Fail with `Forbidden` unless `caller` owns the entity.
pub fn ensure_owner(owner_id: UserId, caller: UserId, what: &str) -> Result<(), InventoryError> {
    if owner_id != caller {
        return Err(InventoryError::Forbidden(format!(
            "{what} belongs to another user"
        )));
    }
    Ok(())
}
