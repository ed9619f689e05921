//! Configuration validation.

use std::collections::HashMap;
use std::path::Path;

use plugboard_protocols::{Configuration, Value};

use crate::loader::ConfigLoader;

/// Key listing directories whose libraries the host loads.
pub fn module_dirs_key(section: &str) -> String {
    format!("{section}/@module_dirs")
}

/// Key listing individual libraries the host loads.
pub fn module_files_key(section: &str) -> String {
    format!("{section}/@module_files")
}

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub key: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the reserved module keys of `section`.
    pub fn validate(configuration: &dyn Configuration, section: &str) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_modules(|key| configuration.get(key), section, &mut result);
        result
    }

    /// Validate a full set of entries: the reserved module keys plus every
    /// name mapping in `section`.
    pub fn validate_entries(entries: &HashMap<String, Value>, section: &str) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_modules(|key| entries.get(key).cloned(), section, &mut result);
        Self::validate_mappings(entries, section, &mut result);
        result
    }

    fn validate_modules(lookup: impl Fn(&str) -> Option<Value>, section: &str, result: &mut ValidationResult) {
        let dirs_key = module_dirs_key(section);
        if let Some(value) = lookup(&dirs_key) {
            for dir in Self::module_paths(&dirs_key, &value, result) {
                if !Path::new(&dir).is_dir() {
                    result.add_warning(ValidationWarning::new(
                        dirs_key.as_str(),
                        format!("Module directory does not exist: {}", dir),
                    ));
                }
            }
        }

        let files_key = module_files_key(section);
        if let Some(value) = lookup(&files_key) {
            for file in Self::module_paths(&files_key, &value, result) {
                if !Path::new(&file).is_file() {
                    result.add_warning(ValidationWarning::new(
                        files_key.as_str(),
                        format!("Module file does not exist: {}", file),
                    ));
                }
            }
        }
    }

    fn module_paths(key: &str, value: &Value, result: &mut ValidationResult) -> Vec<String> {
        match value {
            Value::List(_) | Value::String(_) => value
                .to_string_list()
                .iter()
                .map(|path| ConfigLoader::expand_path(path))
                .collect(),
            other => {
                result.add_error(ValidationError::new(
                    key,
                    format!("Expected a list or comma-separated string, found {}", other.kind()),
                ));
                Vec::new()
            }
        }
    }

    fn validate_mappings(entries: &HashMap<String, Value>, section: &str, result: &mut ValidationResult) {
        let prefix = format!("{section}/");
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort();

        for key in keys {
            let Some(name) = key.strip_prefix(&prefix) else {
                continue;
            };
            if name.starts_with('@') || name.contains('/') {
                continue;
            }
            match &entries[key] {
                Value::String(type_name) if type_name.trim().is_empty() => {
                    result.add_error(ValidationError::new(key.as_str(), "Type name cannot be empty"));
                }
                Value::String(_) => {}
                other => {
                    result.add_error(ValidationError::new(
                        key.as_str(),
                        format!("Type name must be a string, found {}", other.kind()),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
