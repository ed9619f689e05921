//! In-memory configuration backend.

use std::collections::HashMap;

use parking_lot::RwLock;

use plugboard_core::component;
use plugboard_protocols::{ConfigError, Configuration, Value};

/// Key/value store held entirely in memory.
///
/// Cloning copies the entries; the clone never aliases the original.
#[component(
    name = "MemoryConfiguration",
    capabilities = "dyn Configuration",
    new = "MemoryConfiguration::new"
)]
#[derive(Debug, Default)]
pub struct MemoryConfiguration {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryConfiguration {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration holding a copy of `entries`.
    pub fn from_map(entries: &HashMap<String, Value>) -> Self {
        Self::from(entries.clone())
    }

    /// Copy the current entries out.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.entries.read().clone()
    }

    /// Move the entries out.
    pub fn into_map(self) -> HashMap<String, Value> {
        self.entries.into_inner()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl From<HashMap<String, Value>> for MemoryConfiguration {
    fn from(entries: HashMap<String, Value>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl Clone for MemoryConfiguration {
    fn clone(&self) -> Self {
        Self::from(self.snapshot())
    }
}

impl Configuration for MemoryConfiguration {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), ConfigError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), ConfigError> {
        self.entries.write().clear();
        Ok(())
    }
}
