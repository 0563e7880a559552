//! Database connection pool management

mod migrate;
mod postgres;

pub use migrate::{run_migrations, MigrateError, DEFAULT_MIGRATIONS_DIR};
pub use postgres::{connect, PoolSettings};

pub use sqlx::postgres::PgPool;
