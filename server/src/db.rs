use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::ApiError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create database pool");

    // Run pending migrations on startup
    let mut conn = pool
        .get()
        .expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");

    pool
}

/// Checks out a connection, mapping pool exhaustion or an unreachable store
/// to the generic persistence failure the API reports.
pub fn get_conn(pool: &DbPool) -> Result<DbConn, ApiError> {
    pool.get().map_err(|e| {
        tracing::error!("Failed to get database connection: {}", e);
        ApiError::Persistence("Database connection failed.")
    })
}
