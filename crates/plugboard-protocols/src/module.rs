//! Dynamic module loading contract.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;

/// Information about a loaded module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Name or description reported by the module itself; empty when the
    /// module does not export one.
    pub name: String,
    /// Absolute path of the shared library.
    pub path: PathBuf,
    /// Version reported by the module itself; empty when not exported.
    pub version: String,
}

impl ModuleRecord {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            version: version.into(),
        }
    }
}

/// Callback invoked after a module was loaded successfully.
pub type ModuleListener = Arc<dyn Fn(&ModuleRecord) + Send + Sync>;

/// Loads modules.
///
/// Loading a module is sufficient to use it: the types it registers become
/// resolvable by name without any further call into the module.
pub trait ModuleLoader: Send + Sync {
    /// Snapshot of every loaded module, in load order.
    fn loaded_modules(&self) -> Vec<ModuleRecord>;

    /// Load a single module from a file path.
    ///
    /// Returns `false` when the library could not be loaded; no further
    /// detail is reported to the caller.
    fn load_module(&self, path: &Path) -> bool;

    /// Load every module found in a directory.
    ///
    /// Returns the number of modules loaded successfully. Individual
    /// failures do not abort the scan.
    fn load_modules_from_dir(&self, path: &Path) -> usize;

    /// Register a listener notified after each successful load.
    fn subscribe(&self, listener: ModuleListener);
}

impl Capability for dyn ModuleLoader {
    const NAME: &'static str = "ModuleLoader";
}
