//! Key/value configuration contract.

use crate::capability::Capability;
use crate::error::ConfigError;
use crate::value::Value;

/// A thread-safe source of configuration data.
///
/// Keys are strings, hierarchical by convention (`section/key`). Every
/// operation must be internally synchronized: callers on different threads
/// never coordinate among themselves.
pub trait Configuration: Send + Sync {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Set the value stored under `key`, creating the entry if needed.
    fn set(&self, key: &str, value: Value) -> Result<(), ConfigError>;

    /// Remove the entry stored under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), ConfigError>;

    /// Remove every entry.
    fn clear(&self) -> Result<(), ConfigError>;

    /// Get the value stored under `key`, or `default` when there is none.
    fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Check whether an entry exists for `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl Capability for dyn Configuration {
    const NAME: &'static str = "Configuration";
}
