//! Store bundle shared by the services.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::queries::{PgRefreshTokenStore, PgUserStore};
use crate::auth::refresh_tokens::MemoryRefreshTokenStore;
use crate::auth::users::MemoryUserStore;
use crate::auth::{RefreshTokenStore, UserStore};
use crate::inventory::cameras::MemoryCameraStore;
use crate::inventory::lenses::MemoryLensStore;
use crate::inventory::queries::{PgCameraStore, PgLensStore};
use crate::inventory::{CameraStore, LensStore};

/// Every repository the API needs, behind trait objects.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    pub cameras: Arc<dyn CameraStore>,
    pub lenses: Arc<dyn LensStore>,
}

impl Stores {
    /// PostgreSQL stores sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            refresh_tokens: Arc::new(PgRefreshTokenStore::new(pool.clone())),
            cameras: Arc::new(PgCameraStore::new(pool.clone())),
            lenses: Arc::new(PgLensStore::new(pool)),
        }
    }

    /// Process-local stores. State is lost on restart.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            refresh_tokens: Arc::new(MemoryRefreshTokenStore::new()),
            cameras: Arc::new(MemoryCameraStore::new()),
            lenses: Arc::new(MemoryLensStore::new()),
        }
    }
}
