//! Module loader backed by `libloading`.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::ffi::CStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use libloading::{Library, Symbol};
use parking_lot::{Mutex, RwLock};
use tracing::subscriber::NoSubscriber;
use tracing::{debug, info, warn, Dispatch};

use plugboard_core::module::{
    abi_tag, InfoFn, RegisterFn, TracingFn, ABI_SYMBOL, DESCRIPTION_SYMBOL, REGISTER_SYMBOL,
    TRACING_SYMBOL, VERSION_SYMBOL,
};
use plugboard_core::{component, Builder, TypeRegistry};
use plugboard_protocols::{ModuleListener, ModuleLoader, ModuleRecord};

use crate::error::LoadError;
use crate::library::is_library_file;

/// Libraries opened by any loader, by canonical path.
///
/// Entries are never removed: types registered by a library point into its
/// code, so it stays mapped for the rest of the process.
static LIBRARIES: LazyLock<Mutex<HashMap<PathBuf, Arc<Library>>>> = LazyLock::new(|| Mutex::new(HashMap::new()));

/// Loads `declare_module!` libraries into a type registry.
#[component(
    name = "LibraryModuleLoader",
    capabilities = "dyn ModuleLoader",
    new = "LibraryModuleLoader::new",
    with_builder = "LibraryModuleLoader::from_builder"
)]
pub struct LibraryModuleLoader {
    registry: Arc<TypeRegistry>,
    modules: RwLock<Vec<ModuleRecord>>,
    listeners: RwLock<Vec<ModuleListener>>,
    // Canonical paths whose register hook already ran against `registry`.
    registered: Mutex<HashSet<PathBuf>>,
}

impl LibraryModuleLoader {
    /// Create a loader registering into the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(Arc::clone(TypeRegistry::global()))
    }

    /// Create a loader registering into the registry `builder` resolves against.
    pub fn from_builder(builder: &Builder) -> Self {
        Self::with_registry(Arc::clone(builder.registry()))
    }

    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            modules: RwLock::new(Vec::new()),
            listeners: RwLock::new(Vec::new()),
            registered: Mutex::new(HashSet::new()),
        }
    }

    /// The registry loaded modules register into.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Load a module, reporting why it failed.
    pub fn try_load_module(&self, path: &Path) -> Result<ModuleRecord, LoadError> {
        let absolute = std::path::absolute(path)?;
        if !absolute.is_file() {
            return Err(LoadError::NotFound(absolute));
        }
        let canonical = fs::canonicalize(&absolute)?;

        let library = open_library(&canonical)?;
        let name = read_info(&library, DESCRIPTION_SYMBOL).unwrap_or_default();
        let version = read_info(&library, VERSION_SYMBOL).unwrap_or_default();

        {
            // Held while the hook runs so a concurrent load of the same
            // library returns only after registration finished.
            let mut registered = self.registered.lock();
            if !registered.contains(&canonical) {
                let count = run_register_hook(&library, &self.registry);
                debug!("Module {:?} registered {} new type(s)", canonical, count);
                registered.insert(canonical);
            }
        }

        let record = ModuleRecord::new(name, absolute, version);
        self.modules.write().push(record.clone());
        info!(
            "Loaded module {:?} ({} {})",
            record.path, record.name, record.version
        );

        let listeners = self.listeners.read().clone();
        for listener in &listeners {
            listener(&record);
        }

        Ok(record)
    }

    /// Library files directly inside `dir`, deduplicated by canonical path.
    fn library_candidates(dir: &Path) -> Result<BTreeSet<PathBuf>, LoadError> {
        let mut candidates = BTreeSet::new();
        for entry in fs::read_dir(dir)?.flatten() {
            let Ok(canonical) = fs::canonicalize(entry.path()) else {
                continue;
            };
            if canonical.is_file() && is_library_file(&canonical) {
                candidates.insert(canonical);
            }
        }
        Ok(candidates)
    }
}

impl Default for LibraryModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLoader for LibraryModuleLoader {
    fn loaded_modules(&self) -> Vec<ModuleRecord> {
        self.modules.read().clone()
    }

    fn load_module(&self, path: &Path) -> bool {
        match self.try_load_module(path) {
            Ok(_) => true,
            Err(e) => {
                warn!("Failed to load module {:?}: {}", path, e);
                false
            }
        }
    }

    fn load_modules_from_dir(&self, path: &Path) -> usize {
        let candidates = match Self::library_candidates(path) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Failed to scan module directory {:?}: {}", path, e);
                return 0;
            }
        };

        let loaded = candidates
            .iter()
            .filter(|candidate| self.load_module(candidate))
            .count();
        debug!("Loaded {} of {} module(s) from {:?}", loaded, candidates.len(), path);
        loaded
    }

    fn subscribe(&self, listener: ModuleListener) {
        self.listeners.write().push(listener);
    }
}

fn open_library(canonical: &Path) -> Result<Arc<Library>, LoadError> {
    let mut libraries = LIBRARIES.lock();
    if let Some(library) = libraries.get(canonical) {
        return Ok(Arc::clone(library));
    }

    // SAFETY: loading a library runs its initializers. Modules are trusted
    // deployment artifacts; nothing else can be checked before this point.
    let library = unsafe { Library::new(canonical) }.map_err(|source| LoadError::Open {
        path: canonical.to_path_buf(),
        source,
    })?;

    if let Some(found) = read_info(&library, ABI_SYMBOL) {
        if found != abi_tag() {
            drop(library);
            warn!(
                "Unmapped {:?} after its initializers ran: built against {}, expected {}",
                canonical,
                found,
                abi_tag()
            );
            return Err(LoadError::AbiMismatch {
                path: canonical.to_path_buf(),
                found,
                expected: abi_tag().to_string(),
            });
        }
    }

    forward_tracing(&library, canonical);

    let library = Arc::new(library);
    libraries.insert(canonical.to_path_buf(), Arc::clone(&library));
    Ok(library)
}

fn read_info(library: &Library, symbol: &[u8]) -> Option<String> {
    // SAFETY: the info exports generated by `declare_module!` take no
    // arguments and return a pointer to a static NUL-terminated string.
    unsafe {
        let info: Symbol<InfoFn> = library.get(symbol).ok()?;
        let ptr = info();
        if ptr.is_null() {
            return None;
        }
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

/// Hand the current dispatcher to the library so its events reach the host.
fn forward_tracing(library: &Library, canonical: &Path) {
    let dispatch = tracing::dispatcher::get_default(Dispatch::clone);
    if dispatch.is::<NoSubscriber>() {
        return;
    }

    // SAFETY: only called after the ABI tag matched, so the hook was compiled
    // against the same `tracing` as the host.
    let installed = unsafe {
        match library.get::<TracingFn>(TRACING_SYMBOL) {
            Ok(hook) => hook(&dispatch),
            Err(_) => return,
        }
    };
    if !installed {
        debug!("Module {:?} keeps its own tracing dispatcher", canonical);
    }
}

fn run_register_hook(library: &Library, registry: &TypeRegistry) -> usize {
    // SAFETY: the ABI tag was checked when the library was opened, so the
    // hook was compiled against the same `TypeRegistry` layout.
    unsafe {
        match library.get::<RegisterFn>(REGISTER_SYMBOL) {
            Ok(register) => register(registry),
            Err(_) => 0,
        }
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
