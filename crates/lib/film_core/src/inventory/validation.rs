//! Field validation for cameras and lenses.
//!
//! Validators accumulate messages instead of failing fast, so a client sees
//! every problem with a payload at once.

use chrono::{Datelike, Utc};

use crate::models::inventory::{Camera, Lens, NewCamera, NewLens};

/// Maximum length of free-text notes.
const MAX_NOTES: usize = 500;

/// Earliest plausible camera year (exclusive).
const MIN_YEAR: i32 = 1800;

/// Minimum manufacturer name length.
const MIN_MANUFACTURER: usize = 2;

fn required(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
    }
}

fn notes(errors: &mut Vec<String>, value: Option<&str>) {
    if value.is_some_and(|n| n.chars().count() > MAX_NOTES) {
        errors.push(format!("notes must be at most {MAX_NOTES} characters"));
    }
}

fn image_url(errors: &mut Vec<String>, value: Option<&str>) {
    if let Some(raw) = value
        && url::Url::parse(raw).is_err()
    {
        errors.push("image_url must be a valid URL".to_string());
    }
}

fn aperture(errors: &mut Vec<String>, field: &str, value: &str) {
    if !value.contains("f/") {
        errors.push(format!("{field} must look like f/2.8"));
    }
}

fn camera_fields(
    brand: &str,
    model: &str,
    year: Option<i32>,
    serial_number: Option<&str>,
    notes_value: Option<&str>,
    image_url_value: Option<&str>,
) -> Vec<String> {
    let mut errors = Vec::new();
    required(&mut errors, "brand", brand);
    required(&mut errors, "camera_model", model);

    if let Some(year) = year {
        let current = Utc::now().year();
        if year <= MIN_YEAR || year > current {
            errors.push(format!("year must be between {} and {current}", MIN_YEAR + 1));
        }
    }
    if let Some(serial) = serial_number
        && !serial.chars().all(|c| c.is_ascii_alphanumeric())
    {
        errors.push("serial_number must be alphanumeric".to_string());
    }
    notes(&mut errors, notes_value);
    image_url(&mut errors, image_url_value);
    errors
}

/// Validate a camera creation payload.
pub fn validate_new_camera(camera: &NewCamera) -> Vec<String> {
    camera_fields(
        &camera.brand,
        &camera.camera_model,
        camera.year,
        camera.serial_number.as_deref(),
        camera.notes.as_deref(),
        camera.image_url.as_deref(),
    )
}

/// Validate a camera after a partial update has been applied.
pub fn validate_camera(camera: &Camera) -> Vec<String> {
    camera_fields(
        &camera.brand,
        &camera.camera_model,
        camera.year,
        camera.serial_number.as_deref(),
        camera.notes.as_deref(),
        camera.image_url.as_deref(),
    )
}

#[allow(clippy::too_many_arguments)]
fn lens_fields(
    manufacturer: &str,
    focal_min: i32,
    focal_max: i32,
    min_aperture: &str,
    max_aperture: &str,
    mount: &str,
    notes_value: Option<&str>,
    image_url_value: Option<&str>,
) -> Vec<String> {
    let mut errors = Vec::new();
    if manufacturer.trim().chars().count() < MIN_MANUFACTURER {
        errors.push(format!(
            "manufacturer must be at least {MIN_MANUFACTURER} characters"
        ));
    }
    if focal_min <= 0 || focal_max <= 0 {
        errors.push("focal lengths must be positive".to_string());
    } else if focal_min > focal_max {
        errors.push("focal_length_min must not exceed focal_length_max".to_string());
    }
    aperture(&mut errors, "min_aperture", min_aperture);
    aperture(&mut errors, "max_aperture", max_aperture);
    required(&mut errors, "mount", mount);
    notes(&mut errors, notes_value);
    image_url(&mut errors, image_url_value);
    errors
}

/// Validate a lens creation payload.
pub fn validate_new_lens(lens: &NewLens) -> Vec<String> {
    lens_fields(
        &lens.manufacturer,
        lens.focal_length_min,
        lens.focal_length_max,
        &lens.min_aperture,
        &lens.max_aperture,
        &lens.mount,
        lens.notes.as_deref(),
        lens.image_url.as_deref(),
    )
}

/// Validate a lens after a partial update has been applied.
pub fn validate_lens(lens: &Lens) -> Vec<String> {
    lens_fields(
        &lens.manufacturer,
        lens.focal_length_min,
        lens.focal_length_max,
        &lens.min_aperture,
        &lens.max_aperture,
        &lens.mount,
        lens.notes.as_deref(),
        lens.image_url.as_deref(),
    )
}
