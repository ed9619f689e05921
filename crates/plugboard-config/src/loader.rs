//! Configuration loader.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use plugboard_protocols::ConfigError;

use crate::convert::flatten;
use crate::file::FileConfiguration;
use crate::memory::MemoryConfiguration;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Default file name looked up in the working directory.
pub const DEFAULT_FILE_NAME: &str = "plugboard.toml";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Open an existing TOML file as a [`FileConfiguration`].
    pub fn load(path: &Path) -> Result<FileConfiguration, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        FileConfiguration::open(path)
    }

    /// Parse TOML text into a [`MemoryConfiguration`].
    ///
    /// `${VAR}` references are expanded before parsing and must all be set.
    pub fn load_str(content: &str) -> Result<MemoryConfiguration, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let table: toml::Table =
            toml::from_str(&expanded).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut entries = HashMap::new();
        flatten(&table, "", &mut entries);
        Ok(MemoryConfiguration::from(entries))
    }

    /// Read a TOML file into a [`MemoryConfiguration`], detached from the file.
    pub fn load_snapshot(path: &Path) -> Result<MemoryConfiguration, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Expand environment variables in the format `${VAR}`.
    pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value =
                std::env::var(var_name).map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/modules`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    /// Configuration file used when none is given.
    ///
    /// `plugboard.toml` in the working directory when present, otherwise
    /// `<config dir>/plugboard/plugboard.toml` when that exists, otherwise
    /// `plugboard.toml`.
    pub fn default_config_file() -> PathBuf {
        let local = PathBuf::from(DEFAULT_FILE_NAME);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .map(|dir| dir.join("plugboard").join(DEFAULT_FILE_NAME))
            .filter(|path| path.exists())
            .unwrap_or(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use plugboard_protocols::{Configuration, Value};

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_load_sections() {
        let content = r#"
            [plugboard]
            Greeter = "EnglishGreeter"
            "@module_dirs" = ["modules", "/opt/plugboard/modules"]

            [bench]
            Greeter = "MockGreeter"
            retries = 3
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.get("plugboard/Greeter"), Some(Value::from("EnglishGreeter")));
        assert_eq!(config.get("bench/Greeter"), Some(Value::from("MockGreeter")));
        assert_eq!(config.get("bench/retries"), Some(Value::Int(3)));
        assert_eq!(
            config.get("plugboard/@module_dirs"),
            Some(Value::List(vec!["modules".to_string(), "/opt/plugboard/modules".to_string()]))
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[plugboard]").unwrap();
        writeln!(file, "Greeter = \"EnglishGreeter\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.get("plugboard/Greeter"), Some(Value::from("EnglishGreeter")));

        let snapshot = ConfigLoader::load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.get("plugboard/Greeter"), Some(Value::from("EnglishGreeter")));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/plugboard.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));

        let result = ConfigLoader::load_snapshot(Path::new("/nonexistent/path/plugboard.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let content = "invalid = [unclosed";
        let result = ConfigLoader::load_str(content);
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("PLUGBOARD_TEST_LOADER_VAR", "test_value");
        }
        let content = "value = \"${PLUGBOARD_TEST_LOADER_VAR}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert!(expanded.contains("test_value"));
        unsafe {
            std::env::remove_var("PLUGBOARD_TEST_LOADER_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_TEST_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name == "NONEXISTENT_TEST_VAR_12345"));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/usr/local/lib";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/modules");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/modules"));
    }

    #[test]
    fn test_default_config_file_name() {
        let path = ConfigLoader::default_config_file();
        assert_eq!(path.file_name().unwrap(), DEFAULT_FILE_NAME);
    }
}
