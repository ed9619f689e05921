//! Registered file configuration for the host process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use plugboard_core::component;
use plugboard_protocols::{ConfigError, Configuration, Value};

use crate::file::FileConfiguration;
use crate::loader::ConfigLoader;

static FILE: RwLock<Option<PathBuf>> = RwLock::new(None);

/// File configuration constructible by name.
///
/// Factories take no arguments, so the file is chosen process-wide with
/// [`HostConfiguration::set_file`] before the type is resolved. Without a
/// choice, [`ConfigLoader::default_config_file`] is used.
#[component(
    name = "HostConfiguration",
    capabilities = "dyn Configuration",
    try_new = "HostConfiguration::open"
)]
#[derive(Debug)]
pub struct HostConfiguration {
    file: FileConfiguration,
}

impl HostConfiguration {
    /// Choose the file opened by later constructions.
    pub fn set_file(path: impl Into<PathBuf>) {
        *FILE.write() = Some(path.into());
    }

    /// The file the next construction opens.
    pub fn file() -> PathBuf {
        FILE.read().clone().unwrap_or_else(ConfigLoader::default_config_file)
    }

    /// Open the chosen file.
    pub fn open() -> Result<Self, ConfigError> {
        Self::open_at(Self::file())
    }

    /// Open a specific file, ignoring the process-wide choice.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            file: FileConfiguration::open(path)?,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn reload(&self) -> Result<(), ConfigError> {
        self.file.reload()
    }

    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.file.snapshot()
    }
}

impl Configuration for HostConfiguration {
    fn get(&self, key: &str) -> Option<Value> {
        self.file.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), ConfigError> {
        self.file.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        self.file.remove(key)
    }

    fn clear(&self) -> Result<(), ConfigError> {
        self.file.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use plugboard_core::Builder;
    use tempfile::TempDir;

    #[test]
    fn test_open_at() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("host.toml");
        fs::write(&path, "[plugboard]\nGreeter = \"EnglishGreeter\"\n").unwrap();

        let config = HostConfiguration::open_at(&path).unwrap();
        assert_eq!(config.path(), path.as_path());
        assert_eq!(config.get("plugboard/Greeter"), Some(Value::from("EnglishGreeter")));
        assert_eq!(config.snapshot().len(), 1);
    }

    // The only test touching the process-wide file choice.
    #[test]
    fn test_resolved_through_builder() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plugboard.toml");
        fs::write(&path, "[bench]\nGreeter = \"MockGreeter\"\n").unwrap();

        HostConfiguration::set_file(&path);
        assert_eq!(HostConfiguration::file(), path);

        let builder = Builder::new();
        let config = builder.get_as::<dyn Configuration>("HostConfiguration").unwrap();
        assert_eq!(config.get("bench/Greeter"), Some(Value::from("MockGreeter")));

        let host = config.instance().downcast_ref::<HostConfiguration>().unwrap();
        assert_eq!(host.path(), path.as_path());
    }

    #[test]
    fn test_open_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "Greeter = [").unwrap();

        let result = HostConfiguration::open_at(&path);
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }
}
