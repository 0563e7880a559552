//! Schema migrations
//!
//! SQL files are read at runtime from a directory so the crate does not need
//! the SQLx macros feature.

use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::info;

pub use sqlx::migrate::MigrateError;

/// Migrations shipped with this crate
pub const DEFAULT_MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

/// Apply pending migrations from `dir`, or from the bundled directory
pub async fn run_migrations(pool: &PgPool, dir: Option<&Path>) -> Result<(), MigrateError> {
    let dir = dir.unwrap_or_else(|| Path::new(DEFAULT_MIGRATIONS_DIR));
    let migrator = Migrator::new(dir).await?;

    info!(
        dir = %dir.display(),
        available = migrator.iter().count(),
        "Applying database migrations"
    );
    migrator.run(pool).await
}
