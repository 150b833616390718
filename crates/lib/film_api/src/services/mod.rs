//! Business logic called by the handlers.

pub mod cameras;
pub mod cookies;
pub mod lenses;

use film_core::inventory::InventoryError;

/// Turn accumulated validation messages into a result.
fn validation_result(errors: Vec<String>) -> Result<(), InventoryError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(InventoryError::Validation(errors.join("; ")))
    }
}
