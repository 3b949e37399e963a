//! Persistence layer: SQLite pool, embedded migrations, row models and one
//! repository per table.

use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Schema migrations embedded from `crates/db/migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL such as `sqlite://kanban.db`.
///
/// The file is created when missing. Every connection runs in WAL mode with
/// foreign keys enforced, which the cascading deletes rely on.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from [`MIGRATOR`].
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Snapshot of the store's settings and schema, as reported by `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub journal_mode: String,
    pub foreign_keys: bool,
    /// Highest successfully applied migration, if any.
    pub schema_version: Option<i64>,
    /// Embedded migrations not yet applied.
    pub pending_migrations: usize,
}

/// Inspect the connection settings and migration history.
pub async fn store_status(pool: &DbPool) -> Result<StoreStatus, sqlx::Error> {
    let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(pool)
        .await?;
    let foreign_keys: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(pool)
        .await?;

    let has_history: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master \
         WHERE type = 'table' AND name = '_sqlx_migrations')",
    )
    .fetch_one(pool)
    .await?;
    let applied: Vec<i64> = if has_history {
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success = 1")
            .fetch_all(pool)
            .await?
    } else {
        Vec::new()
    };

    let pending_migrations = MIGRATOR
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .count();

    Ok(StoreStatus {
        journal_mode: journal_mode.to_lowercase(),
        foreign_keys: foreign_keys != 0,
        schema_version: applied.iter().copied().max(),
        pending_migrations,
    })
}
