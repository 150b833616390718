//! Lens CRUD with ownership checks.

use film_core::inventory::validation::{validate_lens, validate_new_lens};
use film_core::inventory::{InventoryError, LensStore, ensure_owner};
use film_core::models::auth::UserId;
use film_core::models::inventory::{Lens, LensUpdate, NewLens};
use tracing::info;

use super::validation_result;

async fn load_owned(store: &dyn LensStore, caller: UserId, id: i64) -> Result<Lens, InventoryError> {
    let lens = store
        .get(id)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("Lens {id} not found")))?;
    ensure_owner(lens.user_id, caller, "Lens")?;
    Ok(lens)
}

pub async fn list(store: &dyn LensStore, caller: UserId) -> Result<Vec<Lens>, InventoryError> {
    store.list_for_owner(caller).await
}

pub async fn create(
    store: &dyn LensStore,
    caller: UserId,
    lens: NewLens,
) -> Result<Lens, InventoryError> {
    validation_result(validate_new_lens(&lens))?;
    let created = store.create(caller, lens).await?;
    info!(lens_id = created.id, user_id = caller, "lens created");
    Ok(created)
}

pub async fn get(store: &dyn LensStore, caller: UserId, id: i64) -> Result<Lens, InventoryError> {
    load_owned(store, caller, id).await
}

pub async fn update(
    store: &dyn LensStore,
    caller: UserId,
    id: i64,
    changes: LensUpdate,
) -> Result<Lens, InventoryError> {
    let mut lens = load_owned(store, caller, id).await?;
    if changes.is_empty() {
        return Ok(lens);
    }
    changes.apply_to(&mut lens);
    validation_result(validate_lens(&lens))?;
    store.save(&lens).await
}

pub async fn delete(store: &dyn LensStore, caller: UserId, id: i64) -> Result<(), InventoryError> {
    load_owned(store, caller, id).await?;
    if !store.delete(id).await? {
        return Err(InventoryError::NotFound(format!("Lens {id} not found")));
    }
    info!(lens_id = id, user_id = caller, "lens deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use film_core::inventory::lenses::MemoryLensStore;
    use film_core::models::inventory::LensType;

    use super::*;

    fn zoom() -> NewLens {
        NewLens {
            manufacturer: "Canon".into(),
            lens_type: LensType::Digital,
            focal_length_min: 24,
            focal_length_max: 105,
            min_aperture: "f/22".into(),
            max_aperture: "f/4".into(),
            mount: "EF".into(),
            image_stabilization: true,
            image_url: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn update_validates_merged_focal_range() {
        let store = MemoryLensStore::new();
        let created = create(&store, 1, zoom()).await.unwrap();

        // Only the minimum changes; it now exceeds the stored maximum.
        let changes = LensUpdate {
            focal_length_min: Some(200),
            ..Default::default()
        };
        assert!(matches!(
            update(&store, 1, created.id, changes).await,
            Err(InventoryError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn delete_by_owner_removes_it() {
        let store = MemoryLensStore::new();
        let created = create(&store, 1, zoom()).await.unwrap();

        assert!(matches!(delete(&store, 2, created.id).await, Err(InventoryError::Forbidden(_))));
        delete(&store, 1, created.id).await.unwrap();
        assert!(matches!(get(&store, 1, created.id).await, Err(InventoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_rejects_bad_payload() {
        let store = MemoryLensStore::new();
        let mut bad = zoom();
        bad.manufacturer = "C".into();
        assert!(matches!(create(&store, 1, bad).await, Err(InventoryError::Validation(_))));
        assert!(list(&store, 1).await.unwrap().is_empty());
    }
}
