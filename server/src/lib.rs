pub mod builds;
pub mod config;
pub mod entities;
pub mod error;
pub mod pages;
pub mod relics;
pub mod templates;

#[cfg(test)]
mod test_logger;

use std::path::Path;
use std::sync::Arc;

use admin::Slot;
use axum::{
    Router,
    http::{HeaderValue, header::CACHE_CONTROL},
    routing::get_service,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use storage::StorageConfig;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};

pub use config::Cli;

use builds::BuildStore;
use relics::PieceStore;

pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn pieces(&self, slot: Slot) -> PieceStore {
        PieceStore::new(self.db.clone(), slot)
    }

    pub fn builds(&self) -> BuildStore {
        BuildStore::new(self.db.clone())
    }
}

/// Connect to the database and bring the schema up to date.
pub async fn setup(config: &StorageConfig) -> anyhow::Result<Arc<AppState>> {
    let db = storage::connect(config).await?;
    Migrator::up(&db, None).await?;
    log::info!("schema is up to date");
    Ok(Arc::new(AppState::new(db)))
}

/// The full application: JSON API under `/api`, pages at the root and static
/// files under `/static`.
pub fn app(state: Arc<AppState>, static_dir: &Path) -> Router {
    let static_service = get_service(ServeDir::new(static_dir)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        ),
    );

    let api = relics::routes().merge(builds::routes());

    Router::new()
        .nest("/api", api)
        .merge(pages::routes())
        .nest_service("/static", static_service)
        .with_state(state)
}
