//! Persistence port fakes

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use core_kernel::{PersistencePort, PortError};

/// In-memory key-value store behaving like device storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value, for arranging pre-existing device state
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.to_string());
    }

    /// Reads a value synchronously, for asserting on persisted state
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PersistencePort for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(self
            .entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PortError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .remove(key);
        Ok(())
    }
}

/// A store whose every operation fails, for exercising recovery paths
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl PersistencePort for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, PortError> {
        Err(PortError::storage("simulated read failure"))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), PortError> {
        Err(PortError::storage("simulated write failure"))
    }

    async fn remove(&self, _key: &str) -> Result<(), PortError> {
        Err(PortError::storage("simulated remove failure"))
    }
}
