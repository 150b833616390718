//! PostgreSQL-backed camera and lens stores.

use async_trait::async_trait;
use sqlx::PgPool;

use super::InventoryError;
use super::cameras::CameraStore;
use super::lenses::LensStore;
use crate::models::auth::UserId;
use crate::models::inventory::{Camera, Lens, NewCamera, NewLens};

const CAMERA_COLUMNS: &str = "id, user_id, brand, camera_model, camera_format, year, \
     serial_number, notes, image_url, created_at, updated_at";

const LENS_COLUMNS: &str = "id, user_id, manufacturer, lens_type, focal_length_min, \
     focal_length_max, min_aperture, max_aperture, mount, image_stabilization, image_url, \
     notes, created_at, updated_at";

// =============================================================================
// Cameras
// =============================================================================

/// `cameras` table access.
#[derive(Debug, Clone)]
pub struct PgCameraStore {
    pool: PgPool,
}

impl PgCameraStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CameraStore for PgCameraStore {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Camera>, InventoryError> {
        let rows = sqlx::query_as::<_, Camera>(&format!(
            "SELECT {CAMERA_COLUMNS} FROM cameras WHERE user_id = $1 ORDER BY id"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create(&self, owner: UserId, camera: NewCamera) -> Result<Camera, InventoryError> {
        let row = sqlx::query_as::<_, Camera>(&format!(
            "INSERT INTO cameras \
             (user_id, brand, camera_model, camera_format, year, serial_number, notes, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CAMERA_COLUMNS}"
        ))
        .bind(owner)
        .bind(&camera.brand)
        .bind(&camera.camera_model)
        .bind(camera.camera_format)
        .bind(camera.year)
        .bind(&camera.serial_number)
        .bind(&camera.notes)
        .bind(&camera.image_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<Camera>, InventoryError> {
        let row = sqlx::query_as::<_, Camera>(&format!(
            "SELECT {CAMERA_COLUMNS} FROM cameras WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, camera: &Camera) -> Result<Camera, InventoryError> {
        sqlx::query_as::<_, Camera>(&format!(
            "UPDATE cameras SET brand = $2, camera_model = $3, camera_format = $4, year = $5, \
             serial_number = $6, notes = $7, image_url = $8, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {CAMERA_COLUMNS}"
        ))
        .bind(camera.id)
        .bind(&camera.brand)
        .bind(&camera.camera_model)
        .bind(camera.camera_format)
        .bind(camera.year)
        .bind(&camera.serial_number)
        .bind(&camera.notes)
        .bind(&camera.image_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("Camera {} not found", camera.id)))
    }

    async fn delete(&self, id: i64) -> Result<bool, InventoryError> {
        let result = sqlx::query("DELETE FROM cameras WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Lenses
// =============================================================================

/// `lenses` table access.
#[derive(Debug, Clone)]
pub struct PgLensStore {
    pool: PgPool,
}

impl PgLensStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LensStore for PgLensStore {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Lens>, InventoryError> {
        let rows = sqlx::query_as::<_, Lens>(&format!(
            "SELECT {LENS_COLUMNS} FROM lenses WHERE user_id = $1 ORDER BY id"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create(&self, owner: UserId, lens: NewLens) -> Result<Lens, InventoryError> {
        let row = sqlx::query_as::<_, Lens>(&format!(
            "INSERT INTO lenses \
             (user_id, manufacturer, lens_type, focal_length_min, focal_length_max, \
              min_aperture, max_aperture, mount, image_stabilization, image_url, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {LENS_COLUMNS}"
        ))
        .bind(owner)
        .bind(&lens.manufacturer)
        .bind(lens.lens_type)
        .bind(lens.focal_length_min)
        .bind(lens.focal_length_max)
        .bind(&lens.min_aperture)
        .bind(&lens.max_aperture)
        .bind(&lens.mount)
        .bind(lens.image_stabilization)
        .bind(&lens.image_url)
        .bind(&lens.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<Lens>, InventoryError> {
        let row = sqlx::query_as::<_, Lens>(&format!(
            "SELECT {LENS_COLUMNS} FROM lenses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn save(&self, lens: &Lens) -> Result<Lens, InventoryError> {
        sqlx::query_as::<_, Lens>(&format!(
            "UPDATE lenses SET manufacturer = $2, lens_type = $3, focal_length_min = $4, \
             focal_length_max = $5, min_aperture = $6, max_aperture = $7, mount = $8, \
             image_stabilization = $9, image_url = $10, notes = $11, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {LENS_COLUMNS}"
        ))
        .bind(lens.id)
        .bind(&lens.manufacturer)
        .bind(lens.lens_type)
        .bind(lens.focal_length_min)
        .bind(lens.focal_length_max)
        .bind(&lens.min_aperture)
        .bind(&lens.max_aperture)
        .bind(&lens.mount)
        .bind(lens.image_stabilization)
        .bind(&lens.image_url)
        .bind(&lens.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("Lens {} not found", lens.id)))
    }

    async fn delete(&self, id: i64) -> Result<bool, InventoryError> {
        let result = sqlx::query("DELETE FROM lenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
