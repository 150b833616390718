//! Camera and lens domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::auth::UserId;

// =============================================================================
// Enums
// =============================================================================

/// Film format a camera shoots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "camera_format")]
pub enum CameraFormat {
    #[sqlx(rename = "35mm")]
    #[serde(rename = "35mm")]
    Format35mm,
    #[sqlx(rename = "120mm")]
    #[serde(rename = "120mm")]
    Format120mm,
}

/// Lens family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lens_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LensType {
    Analog,
    Digital,
}

// =============================================================================
// Rows
// =============================================================================

/// Database row for `cameras`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Camera {
    pub id: i64,
    pub user_id: UserId,
    pub brand: String,
    pub camera_model: String,
    pub camera_format: CameraFormat,
    pub year: Option<i32>,
    pub serial_number: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database row for `lenses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Lens {
    pub id: i64,
    pub user_id: UserId,
    pub manufacturer: String,
    pub lens_type: LensType,
    pub focal_length_min: i32,
    pub focal_length_max: i32,
    pub min_aperture: String,
    pub max_aperture: String,
    pub mount: String,
    pub image_stabilization: bool,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Inputs
// =============================================================================

/// Distinguishes an explicit `null` from an absent key.
///
/// With `#[serde(default)]`, an absent key stays `None` while a present key
/// becomes `Some(value)`, where `value` is `None` for `null`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Camera creation payload. The owner is always the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCamera {
    pub brand: String,
    pub camera_model: String,
    pub camera_format: CameraFormat,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial camera update; `None` leaves the column untouched.
///
/// Nullable columns take `Some(None)` (a JSON `null`) to clear them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CameraUpdate {
    pub brand: Option<String>,
    pub camera_model: Option<String>,
    pub camera_format: Option<CameraFormat>,
    #[serde(default, deserialize_with = "nullable")]
    pub year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub serial_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
}

impl CameraUpdate {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.camera_model.is_none()
            && self.camera_format.is_none()
            && self.year.is_none()
            && self.serial_number.is_none()
            && self.notes.is_none()
            && self.image_url.is_none()
    }

    /// Apply the present fields onto `camera`.
    pub fn apply_to(&self, camera: &mut Camera) {
        if let Some(brand) = &self.brand {
            camera.brand = brand.clone();
        }
        if let Some(model) = &self.camera_model {
            camera.camera_model = model.clone();
        }
        if let Some(format) = self.camera_format {
            camera.camera_format = format;
        }
        if let Some(year) = self.year {
            camera.year = year;
        }
        if let Some(serial) = &self.serial_number {
            camera.serial_number = serial.clone();
        }
        if let Some(notes) = &self.notes {
            camera.notes = notes.clone();
        }
        if let Some(url) = &self.image_url {
            camera.image_url = url.clone();
        }
    }
}

/// Lens creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLens {
    pub manufacturer: String,
    pub lens_type: LensType,
    pub focal_length_min: i32,
    pub focal_length_max: i32,
    pub min_aperture: String,
    pub max_aperture: String,
    pub mount: String,
    #[serde(default)]
    pub image_stabilization: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial lens update; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LensUpdate {
    pub manufacturer: Option<String>,
    pub lens_type: Option<LensType>,
    pub focal_length_min: Option<i32>,
    pub focal_length_max: Option<i32>,
    pub min_aperture: Option<String>,
    pub max_aperture: Option<String>,
    pub mount: Option<String>,
    pub image_stabilization: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

impl LensUpdate {
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none()
            && self.lens_type.is_none()
            && self.focal_length_min.is_none()
            && self.focal_length_max.is_none()
            && self.min_aperture.is_none()
            && self.max_aperture.is_none()
            && self.mount.is_none()
            && self.image_stabilization.is_none()
            && self.image_url.is_none()
            && self.notes.is_none()
    }

    /// Apply the present fields onto `lens`.
    pub fn apply_to(&self, lens: &mut Lens) {
        if let Some(manufacturer) = &self.manufacturer {
            lens.manufacturer = manufacturer.clone();
        }
        if let Some(lens_type) = self.lens_type {
            lens.lens_type = lens_type;
        }
        if let Some(min) = self.focal_length_min {
            lens.focal_length_min = min;
        }
        if let Some(max) = self.focal_length_max {
            lens.focal_length_max = max;
        }
        if let Some(aperture) = &self.min_aperture {
            lens.min_aperture = aperture.clone();
        }
        if let Some(aperture) = &self.max_aperture {
            lens.max_aperture = aperture.clone();
        }
        if let Some(mount) = &self.mount {
            lens.mount = mount.clone();
        }
        if let Some(stabilized) = self.image_stabilization {
            lens.image_stabilization = stabilized;
        }
        if let Some(url) = &self.image_url {
            lens.image_url = url.clone();
        }
        if let Some(notes) = &self.notes {
            lens.notes = notes.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    fn camera() -> Camera {
        let now = Utc::now();
        Camera {
            id: 1,
            user_id: 1,
            brand: "Leica".into(),
            camera_model: "M6".into(),
            camera_format: CameraFormat::Format35mm,
            year: Some(1984),
            serial_number: Some("1650001".into()),
            notes: Some("cleaned".into()),
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn null_clears_and_absent_keeps() {
        let changes: CameraUpdate =
            serde_json::from_value(json!({ "notes": null, "year": null })).unwrap();
        assert_eq!(changes.notes, Some(None));
        assert_eq!(changes.serial_number, None);
        assert!(!changes.is_empty());

        let mut camera = camera();
        changes.apply_to(&mut camera);
        assert_eq!(camera.notes, None);
        assert_eq!(camera.year, None);
        assert_eq!(camera.serial_number.as_deref(), Some("1650001"));
    }

    #[test]
    fn empty_object_is_an_empty_update() {
        let changes: LensUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(changes.is_empty());

        let changes: LensUpdate = serde_json::from_value(json!({ "image_url": null })).unwrap();
        assert_eq!(changes.image_url, Some(None));
        assert!(!changes.is_empty());
    }

    #[test]
    fn null_on_required_field_is_ignored_as_absent() {
        let changes: CameraUpdate = serde_json::from_value(json!({ "brand": null })).unwrap();
        assert!(changes.is_empty());
    }
}
