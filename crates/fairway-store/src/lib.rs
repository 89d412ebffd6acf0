//! Persistence layer for fairway
//!
//! Provides:
//! - A key/value record store contract (`get`/`set` of whole JSON documents)
//! - SQLite-backed durable store
//! - In-memory store with write-failure injection for tests
//! - Namespaced keys for every record the core owns

mod keys;
mod memory;
mod sqlite;
mod traits;

pub use keys::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Write rejected: {0}")]
    WriteRejected(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
