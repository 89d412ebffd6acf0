//! Store trait definitions

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{RecordKey, StoreResult};

/// Durable key/value record store.
///
/// Values are whole serialized documents; there is no partial update.
/// Every mutation of a collection rewrites the full value.
pub trait RecordStore: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: RecordKey) -> StoreResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: RecordKey, value: &str) -> StoreResult<()>;
}

/// Typed JSON access on top of [`RecordStore`]
pub trait RecordStoreExt: RecordStore {
    /// Load and decode a record.
    ///
    /// Read failures and undecodable values are logged and reported as
    /// absent so callers can reinitialize instead of failing.
    fn load_record<T: DeserializeOwned>(&self, key: RecordKey) -> Option<T> {
        let raw = match self.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read record, treating as absent");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Corrupted record, treating as absent");
                None
            }
        }
    }

    /// Encode and write a whole record
    fn save_record<T: Serialize + ?Sized>(&self, key: RecordKey, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.set(key, &json)?;
        debug!(key = %key, bytes = json.len(), "Record saved");
        Ok(())
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
