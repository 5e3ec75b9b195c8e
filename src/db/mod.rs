// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_in_memory_pool, get_connection, ConnectionPool, PooledConn,
};

pub use migrations::{
    get_database_stats, initialize_database, verify_database_integrity, DatabaseStats,
};
