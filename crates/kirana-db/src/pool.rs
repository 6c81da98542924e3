//! # SQLite Connection Handling
//!
//! One [`Database`] handle per process wraps the `SqlitePool` and hands
//! out repositories. Configuration is deliberately small: a single-till
//! POS needs a file path and little else, so [`DbConfig`] carries exactly
//! what varies between a real store (`kirana.db` on disk) and a test
//! (`:memory:`).
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new("./kirana.db")      DbConfig::in_memory()       │
//! │          │                                 │   (tests)         │
//! │          └────────────┬────────────────────┘                   │
//! │                       ▼                                        │
//! │          Database::new(config).await                           │
//! │            open file (create if missing)                       │
//! │            WAL + NORMAL sync + foreign keys                    │
//! │            run embedded migrations                             │
//! │                       │                                        │
//! │                       ▼                                        │
//! │          db.products() / db.transactions()                     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! WAL journaling keeps catalog reads from blocking the checkout write
//! and survives a crash mid-write with at most the last transaction lost,
//! which the session layer already treats as retryable.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::transaction::TransactionRepository;

/// A couple of connections cover one till plus the seed/admin tooling.
const POOL_SIZE: u32 = 4;

/// How long an acquire may wait before reporting the pool exhausted.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives and whether to migrate on open.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite file, created on first open.
    pub database_path: PathBuf,

    /// Pool size. Must be 1 for `:memory:` or every connection would see
    /// its own empty database.
    pub max_connections: u32,

    /// Apply pending migrations during [`Database::new`]. On by default;
    /// turned off only by tooling that manages the schema itself.
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for an on-disk store database.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: POOL_SIZE,
            run_migrations: true,
        }
    }

    /// An isolated in-memory database, for tests.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// The process-wide database handle.
///
/// Cloning is cheap (the pool is reference-counted), so the session and
/// the seed tooling can share one handle.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the database, applying migrations unless disabled.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening database"
        );

        // mode=rwc creates the file on first open
        let url = format!("sqlite://{}?mode=rwc", config.database_path.display());
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // off by default in SQLite; transaction_items depends on it
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations and logs the schema status.
    ///
    /// Idempotent; applied migrations are tracked in `_sqlx_migrations`.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;

        let (total, applied) = migrations::migration_status(&self.pool).await?;
        info!(total, applied, "Schema up to date");
        Ok(())
    }

    /// The raw pool, for queries the repositories don't cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the transaction repository.
    pub fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.pool.clone())
    }

    /// Closes the pool. Every repository call after this fails.
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }

    /// True when the database can still execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_migrations_applied_on_open() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert!(total >= 1);
        assert_eq!(applied, total);
    }

    #[tokio::test]
    async fn test_closed_pool_fails_health_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
    }
}
