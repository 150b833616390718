//! Lens storage.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::InventoryError;
use crate::models::auth::UserId;
use crate::models::inventory::{Lens, NewLens};

/// Persistence contract for lenses. Same shape as [`super::CameraStore`].
#[async_trait]
pub trait LensStore: Send + Sync {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Lens>, InventoryError>;

    async fn create(&self, owner: UserId, lens: NewLens) -> Result<Lens, InventoryError>;

    async fn get(&self, id: i64) -> Result<Option<Lens>, InventoryError>;

    async fn save(&self, lens: &Lens) -> Result<Lens, InventoryError>;

    async fn delete(&self, id: i64) -> Result<bool, InventoryError>;
}

/// In-process lens store.
#[derive(Debug, Default)]
pub struct MemoryLensStore {
    lenses: DashMap<i64, Lens>,
    next_id: AtomicI64,
}

impl MemoryLensStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LensStore for MemoryLensStore {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Lens>, InventoryError> {
        let mut lenses: Vec<Lens> = self
            .lenses
            .iter()
            .filter(|entry| entry.user_id == owner)
            .map(|entry| entry.value().clone())
            .collect();
        lenses.sort_by_key(|l| l.id);
        Ok(lenses)
    }

    async fn create(&self, owner: UserId, new: NewLens) -> Result<Lens, InventoryError> {
        let now = Utc::now();
        let lens = Lens {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: owner,
            manufacturer: new.manufacturer,
            lens_type: new.lens_type,
            focal_length_min: new.focal_length_min,
            focal_length_max: new.focal_length_max,
            min_aperture: new.min_aperture,
            max_aperture: new.max_aperture,
            mount: new.mount,
            image_stabilization: new.image_stabilization,
            image_url: new.image_url,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        self.lenses.insert(lens.id, lens.clone());
        Ok(lens)
    }

    async fn get(&self, id: i64) -> Result<Option<Lens>, InventoryError> {
        Ok(self.lenses.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, lens: &Lens) -> Result<Lens, InventoryError> {
        let mut entry = self
            .lenses
            .get_mut(&lens.id)
            .ok_or_else(|| InventoryError::NotFound(format!("Lens {} not found", lens.id)))?;
        let mut saved = lens.clone();
        saved.user_id = entry.user_id;
        saved.created_at = entry.created_at;
        saved.updated_at = Utc::now();
        *entry = saved.clone();
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<bool, InventoryError> {
        Ok(self.lenses.remove(&id).is_some())
    }
}
