//! TOML file configuration backend.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use plugboard_protocols::{ConfigError, Configuration, Value};

use crate::convert::{flatten, from_toml, to_toml};
use crate::loader::ConfigLoader;

/// Configuration stored in a TOML file.
///
/// A key `section/name` maps to `name` inside the `[section]` table; deeper
/// keys map to nested tables and keys without `/` live at the top level.
/// Every change is written back immediately through a temporary file in the
/// same directory that replaces the original.
///
/// String values are returned with `${VAR}` references expanded from the
/// environment; the file keeps the unexpanded text.
#[derive(Debug)]
pub struct FileConfiguration {
    path: PathBuf,
    table: Mutex<toml::Table>,
}

impl FileConfiguration {
    /// Open the file at `path`, starting empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let table = Self::read(&path)?;
        debug!("Opened configuration file {:?} ({} top-level entries)", path, table.len());
        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discard in-memory state and read the file again.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let table = Self::read(&self.path)?;
        *self.table.lock() = table;
        Ok(())
    }

    /// Copy every entry out as flattened `section/key` pairs, unexpanded.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        let mut entries = HashMap::new();
        flatten(&self.table.lock(), "", &mut entries);
        entries
    }

    fn read(path: &Path) -> Result<toml::Table, ConfigError> {
        if !path.exists() {
            return Ok(toml::Table::new());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::InvalidFormat(format!("{}: {}", path.display(), e)))
    }

    fn persist(&self, table: &toml::Table) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(table).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        file.persist(&self.path).map_err(|e| ConfigError::Io(e.error))?;
        Ok(())
    }

    /// Apply `change` to a copy of the table, persist it, then commit.
    ///
    /// The lock is held across the write so concurrent mutations cannot
    /// interleave on disk.
    fn mutate(&self, change: impl FnOnce(&mut toml::Table) -> Result<(), ConfigError>) -> Result<(), ConfigError> {
        let mut table = self.table.lock();
        let mut next = table.clone();
        change(&mut next)?;
        self.persist(&next)?;
        *table = next;
        Ok(())
    }
}

fn split_key(key: &str) -> Result<(Vec<&str>, &str), ConfigError> {
    let mut segments: Vec<&str> = key.split('/').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ConfigError::InvalidKey(key.to_string()));
    }
    let leaf = segments.pop().ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;
    Ok((segments, leaf))
}

fn lookup<'a>(table: &'a toml::Table, key: &str) -> Option<&'a toml::Value> {
    let (sections, leaf) = split_key(key).ok()?;
    let mut current = table;
    for section in sections {
        current = current.get(section)?.as_table()?;
    }
    current.get(leaf)
}

fn lookup_table_mut<'a>(
    table: &'a mut toml::Table,
    key: &str,
    sections: &[&str],
    create: bool,
) -> Result<Option<&'a mut toml::Table>, ConfigError> {
    let mut current = table;
    for section in sections {
        if !current.contains_key(*section) {
            if !create {
                return Ok(None);
            }
            current.insert(section.to_string(), toml::Value::Table(toml::Table::new()));
        }
        current = match current.get_mut(*section) {
            Some(toml::Value::Table(inner)) => inner,
            _ => return Err(ConfigError::InvalidKey(key.to_string())),
        };
    }
    Ok(Some(current))
}

fn expand(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(expand_lenient(s)),
        Value::List(items) => Value::List(items.into_iter().map(expand_lenient).collect()),
        other => other,
    }
}

fn expand_lenient(raw: String) -> String {
    match ConfigLoader::expand_env_vars(&raw) {
        Ok(expanded) => expanded,
        Err(e) => {
            warn!("Leaving '{}' unexpanded: {}", raw, e);
            raw
        }
    }
}

impl Configuration for FileConfiguration {
    fn get(&self, key: &str) -> Option<Value> {
        let value = {
            let table = self.table.lock();
            lookup(&table, key).and_then(from_toml)
        };
        value.map(expand)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), ConfigError> {
        let (sections, leaf) = split_key(key)?;
        self.mutate(|table| {
            if let Some(target) = lookup_table_mut(table, key, &sections, true)? {
                target.insert(leaf.to_string(), to_toml(value));
            }
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<(), ConfigError> {
        let (sections, leaf) = split_key(key)?;
        self.mutate(|table| {
            if let Some(target) = lookup_table_mut(table, key, &sections, false)? {
                target.remove(leaf);
            }
            Ok(())
        })
    }

    fn clear(&self) -> Result<(), ConfigError> {
        self.mutate(|table| {
            table.clear();
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
