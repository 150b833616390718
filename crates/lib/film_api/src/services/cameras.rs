//! Camera CRUD with ownership checks.
//!
//! Every single-entity operation loads the camera first and compares its
//! owner with the caller before returning or mutating anything.

use film_core::inventory::validation::{validate_camera, validate_new_camera};
use film_core::inventory::{CameraStore, InventoryError, ensure_owner};
use film_core::models::auth::UserId;
use film_core::models::inventory::{Camera, CameraUpdate, NewCamera};
use tracing::info;

use super::validation_result;

/// Load a camera the caller owns.
async fn load_owned(
    store: &dyn CameraStore,
    caller: UserId,
    id: i64,
) -> Result<Camera, InventoryError> {
    let camera = store
        .get(id)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("Camera {id} not found")))?;
    ensure_owner(camera.user_id, caller, "Camera")?;
    Ok(camera)
}

pub async fn list(store: &dyn CameraStore, caller: UserId) -> Result<Vec<Camera>, InventoryError> {
    store.list_for_owner(caller).await
}

/// Create a camera owned by the caller.
pub async fn create(
    store: &dyn CameraStore,
    caller: UserId,
    camera: NewCamera,
) -> Result<Camera, InventoryError> {
    validation_result(validate_new_camera(&camera))?;
    let created = store.create(caller, camera).await?;
    info!(camera_id = created.id, user_id = caller, "camera created");
    Ok(created)
}

pub async fn get(store: &dyn CameraStore, caller: UserId, id: i64) -> Result<Camera, InventoryError> {
    load_owned(store, caller, id).await
}

/// Apply a partial update. Validation runs on the merged result.
pub async fn update(
    store: &dyn CameraStore,
    caller: UserId,
    id: i64,
    changes: CameraUpdate,
) -> Result<Camera, InventoryError> {
    let mut camera = load_owned(store, caller, id).await?;
    if changes.is_empty() {
        return Ok(camera);
    }
    changes.apply_to(&mut camera);
    validation_result(validate_camera(&camera))?;
    store.save(&camera).await
}

pub async fn delete(store: &dyn CameraStore, caller: UserId, id: i64) -> Result<(), InventoryError> {
    load_owned(store, caller, id).await?;
    if !store.delete(id).await? {
        return Err(InventoryError::NotFound(format!("Camera {id} not found")));
    }
    info!(camera_id = id, user_id = caller, "camera deleted");
    Ok(())
}
