//! In-memory store for unit/integration testing

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::{RecordKey, RecordStore, StoreError, StoreResult};

/// Volatile store with switchable write failures
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<RecordKey, String>>,
    fail_writes: AtomicBool,
    failing_keys: Mutex<HashSet<RecordKey>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, as a full or read-only disk would
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set` of `key` fail while other keys still write
    pub fn fail_writes_for(&self, key: RecordKey) {
        if let Ok(mut keys) = self.failing_keys.lock() {
            keys.insert(key);
        }
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<RecordKey, String>>> {
        self.records
            .lock()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: RecordKey) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(&key).cloned())
    }

    fn set(&self, key: RecordKey, value: &str) -> StoreResult<()> {
        let key_fails = self
            .failing_keys
            .lock()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))?
            .contains(&key);
        if key_fails || self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected(format!("quota exceeded writing {}", key)));
        }
        self.lock()?.insert(key, value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
