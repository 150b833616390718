//! Camera storage.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::InventoryError;
use crate::models::auth::UserId;
use crate::models::inventory::{Camera, NewCamera};

/// Persistence contract for cameras.
///
/// The store does not check ownership; `get` returns any user's camera.
#[async_trait]
pub trait CameraStore: Send + Sync {
    /// Cameras owned by `owner`, oldest first.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Camera>, InventoryError>;

    async fn create(&self, owner: UserId, camera: NewCamera) -> Result<Camera, InventoryError>;

    async fn get(&self, id: i64) -> Result<Option<Camera>, InventoryError>;

    /// Persist every mutable column of `camera` and bump `updated_at`.
    async fn save(&self, camera: &Camera) -> Result<Camera, InventoryError>;

    /// Returns `false` if no camera had that id.
    async fn delete(&self, id: i64) -> Result<bool, InventoryError>;
}

/// In-process camera store.
#[derive(Debug, Default)]
pub struct MemoryCameraStore {
    cameras: DashMap<i64, Camera>,
    next_id: AtomicI64,
}

impl MemoryCameraStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CameraStore for MemoryCameraStore {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Camera>, InventoryError> {
        let mut cameras: Vec<Camera> = self
            .cameras
            .iter()
            .filter(|entry| entry.user_id == owner)
            .map(|entry| entry.value().clone())
            .collect();
        cameras.sort_by_key(|c| c.id);
        Ok(cameras)
    }

    async fn create(&self, owner: UserId, new: NewCamera) -> Result<Camera, InventoryError> {
        let now = Utc::now();
        let camera = Camera {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: owner,
            brand: new.brand,
            camera_model: new.camera_model,
            camera_format: new.camera_format,
            year: new.year,
            serial_number: new.serial_number,
            notes: new.notes,
            image_url: new.image_url,
            created_at: now,
            updated_at: now,
        };
        self.cameras.insert(camera.id, camera.clone());
        Ok(camera)
    }

    async fn get(&self, id: i64) -> Result<Option<Camera>, InventoryError> {
        Ok(self.cameras.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, camera: &Camera) -> Result<Camera, InventoryError> {
        let mut entry = self
            .cameras
            .get_mut(&camera.id)
            .ok_or_else(|| InventoryError::NotFound(format!("Camera {} not found", camera.id)))?;
        let mut saved = camera.clone();
        saved.user_id = entry.user_id;
        saved.created_at = entry.created_at;
        saved.updated_at = Utc::now();
        *entry = saved.clone();
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<bool, InventoryError> {
        Ok(self.cameras.remove(&id).is_some())
    }
}
