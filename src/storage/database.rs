//! Database Layer with Connection Pooling
//!
//! SQLite access for the analytics mart featuring:
//! - Connection pooling via r2d2; connections return to the pool on drop,
//!   so every query path releases its connection, including error paths
//! - Read-mostly settings (WAL, busy timeout)
//! - Schema bootstrap and a deterministic demo dataset

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::config::DatabaseConfig;
use crate::types::{ChurnError, Result, ResultExt};

/// Shared database handle.
pub type SharedDatabase = Arc<Database>;

/// Scoped connection; returned to the pool when dropped.
pub type ScopedConnection = PooledConnection<SqliteConnectionManager>;

const SCHEMA: &str = include_str!("schema.sql");
const DEMO_SEED: &str = include_str!("seed.sql");

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,
    /// Timeout for acquiring a connection
    pub connection_timeout: Duration,
}

impl From<&DatabaseConfig> for PoolConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_size: config.pool_size,
            connection_timeout: Duration::from_secs(config.connection_timeout_secs),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from(&DatabaseConfig::default())
    }
}

/// Thread-safe database with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open database with connection pooling at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, PoolConfig::default())
    }

    /// Open database with custom pool configuration.
    ///
    /// The pool is built lazily (`min_idle = 0`) so a missing or locked file
    /// surfaces on the first query instead of at startup.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: PoolConfig) -> Result<Self> {
        if config.max_size == 0 || config.connection_timeout.is_zero() {
            return Err(ChurnError::Config(format!(
                "Pool size and connection timeout must be non-zero, got {} and {:?}",
                config.max_size, config.connection_timeout
            )));
        }

        let manager =
            SqliteConnectionManager::file(path.as_ref()).with_init(Self::configure_connection);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(0))
            .connection_timeout(config.connection_timeout)
            .build_unchecked(manager);

        Ok(Self { pool })
    }

    /// Open an in-memory database for testing or temporary use.
    ///
    /// Pool size is pinned to one so every caller sees the same database.
    pub fn open_in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory().with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)
            .map_err(|e| ChurnError::Storage(format!("Failed to create in-memory pool: {}", e)))?;

        Ok(Self { pool })
    }

    fn configure_connection(conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;
            "#,
        )?;
        Ok(())
    }

    /// Acquire a scoped connection from the pool.
    pub fn connection(&self) -> Result<ScopedConnection> {
        self.pool.get().map_err(|e| {
            ChurnError::Storage(format!("Failed to acquire database connection: {}", e))
        })
    }

    /// Create tables and indexes if they do not exist.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)
            .with_context("Failed to initialize database schema")?;
        tracing::debug!("Database schema initialized");
        Ok(())
    }

    /// Replace staging tables and upsert mart rows with the demo dataset.
    pub fn seed_demo(&self) -> Result<()> {
        self.transaction(|conn| {
            conn.execute_batch(DEMO_SEED)
                .with_context("Failed to load demo dataset")
        })?;
        tracing::info!("Loaded demo dataset");
        Ok(())
    }

    /// Execute a single SQL statement.
    pub fn execute(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<usize> {
        let conn = self.connection()?;
        conn.execute(sql, params).with_context("Failed to execute SQL")
    }

    /// Run `f` inside a transaction; rolled back unless `f` returns `Ok`.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.connection()?;
        let tx = conn
            .transaction()
            .with_context("Failed to start transaction")?;

        let value = f(&tx)?;
        tx.commit().with_context("Failed to commit transaction")?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_and_initialize() {
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        db.initialize().expect("Failed to initialize schema");

        let conn = db.connection().expect("Failed to get connection");
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .expect("Failed to count tables");
        assert_eq!(count, 4);
    }

    #[test]
    fn test_seed_demo_is_repeatable() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        db.seed_demo().unwrap();
        db.seed_demo().unwrap();

        let conn = db.connection().unwrap();
        let mart_rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM mart_retention_kpis", [], |row| {
                row.get(0)
            })
            .unwrap();
        let customers: i64 = conn
            .query_row("SELECT COUNT(*) FROM stg_customers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mart_rows, 8);
        assert_eq!(customers, 10);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();

        let result: Result<()> = db.transaction(|conn| {
            conn.execute(
                "INSERT INTO stg_customers (customer_id, acquisition_channel) VALUES ('X1', 'Online')",
                [],
            )?;
            Err(ChurnError::Storage("abort".to_string()))
        });
        assert!(result.is_err());

        let conn = db.connection().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM stg_customers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_connection_released_after_failed_query() {
        let db = Database::open_in_memory().unwrap();

        // Pool holds a single connection; a leaked one would block the second acquire.
        {
            let conn = db.connection().unwrap();
            assert!(conn.execute("SELECT * FROM missing_table", []).is_err());
        }
        assert!(db.connection().is_ok());
    }

    #[test]
    fn test_zero_pool_settings_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = PoolConfig {
            connection_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            Database::open_with_config(dir.path().join("churn.db"), config),
            Err(ChurnError::Config(_))
        ));
    }

    #[test]
    fn test_file_database_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("analytics.db");

        let db = Database::open(&path).unwrap();
        db.initialize().unwrap();
        db.execute(
            "INSERT INTO stg_customers (customer_id, acquisition_channel) VALUES (?1, ?2)",
            &[&"C1", &"Store"],
        )
        .unwrap();
        drop(db);

        let reopened = Database::open(&path).unwrap();
        let conn = reopened.connection().unwrap();
        let channel: String = conn
            .query_row(
                "SELECT acquisition_channel FROM stg_customers WHERE customer_id = 'C1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(channel, "Store");
    }
}
