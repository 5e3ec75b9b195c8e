// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;

use crate::config::PlannerConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const CONNECTION_PRAGMAS: &str = "PRAGMA journal_mode = WAL;
     PRAGMA synchronous = NORMAL;
     PRAGMA busy_timeout = 5000;";

/// Create a connection pool for the configured database file.
///
/// The parent directory is created if missing.
pub fn create_connection_pool(config: &PlannerConfig) -> AppResult<ConnectionPool> {
    ensure_parent_dir(&config.database_path)?;

    let manager = SqliteConnectionManager::file(&config.database_path)
        .with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));

    let pool = Pool::builder()
        .max_size(config.pool_max_size)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    log::debug!(
        "Opened planner database at {} (pool size {})",
        config.database_path.display(),
        config.pool_max_size
    );

    Ok(pool)
}

/// Single-connection pool over a private in-memory database
pub fn create_in_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory();
    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create in-memory pool: {}", e)))
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Other(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone in-memory connection (for testing)
pub fn create_test_connection() -> AppResult<Connection> {
    Connection::open_in_memory().map_err(AppError::Database)
}

fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("planner.db");
        let config = PlannerConfig::with_database_path(path.clone());

        let pool = create_connection_pool(&config).unwrap();
        let conn = get_connection(&pool).unwrap();

        let result: i32 = conn.query_row("SELECT 1 + 1", [], |row| row.get(0)).unwrap();
        assert_eq!(result, 2);
        assert!(path.exists());
    }

    #[test]
    fn test_in_memory_pool() {
        let pool = create_in_memory_pool().unwrap();
        let conn = get_connection(&pool).unwrap();
        let result: i32 = conn.query_row("SELECT 40 + 2", [], |row| row.get(0)).unwrap();
        assert_eq!(result, 42);
    }
}
