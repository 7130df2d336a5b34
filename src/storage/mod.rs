//! Storage layer: the append-only event log
//!
//! This module is the single mutable component of the engine, a thin
//! abstraction over SQLite organized into:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Append path and read queries
//!
//! Everything downstream of it is a pure projection over what it returns.

pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and store struct for easy access
pub use models::*;
pub use schema::{EventStore, DB_PATH_ENV_VAR};
