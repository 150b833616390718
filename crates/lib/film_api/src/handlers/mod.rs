//! Request handlers.

pub mod auth;
pub mod cameras;
pub mod health;
pub mod lenses;
