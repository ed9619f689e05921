//! Service locator resolving names to shared instances.

use std::fmt;
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, trace};

use plugboard_protocols::{BuildError, Capability, Configuration, Value};

use crate::instance::{Instance, ReleaseHook, Service};
use crate::registry::TypeRegistry;

/// Section used by [`Builder::set_default_configuration`].
pub const DEFAULT_SECTION: &str = "plugboard";

/// Called after a new instance has been constructed and cached.
pub type CreatedListener = Arc<dyn Fn(&Arc<Instance>) + Send + Sync>;

/// Called when a constructed instance is about to be destroyed.
pub type DestroyingListener = Arc<dyn Fn(&Instance) + Send + Sync>;

/// Cache entry for one resolved type name.
///
/// The guard serializes construction for this name only; the reference is
/// read without it on the fast path.
struct Slot {
    construction: Mutex<()>,
    reference: RwLock<Weak<Instance>>,
}

impl Slot {
    fn new() -> Self {
        Self {
            construction: Mutex::new(()),
            reference: RwLock::new(Weak::new()),
        }
    }

    fn live(&self) -> Option<Arc<Instance>> {
        self.reference.read().upgrade()
    }
}

struct Installed {
    configuration: Option<Arc<dyn Configuration>>,
    section: String,
}

struct Shared {
    registry: Arc<TypeRegistry>,
    // Never shrinks: slots for released instances stay in place.
    slots: DashMap<String, Arc<Slot>>,
    installed: RwLock<Installed>,
    created: RwLock<Vec<CreatedListener>>,
    destroying: Arc<RwLock<Vec<DestroyingListener>>>,
}

/// Resolves service names to live instances, constructing them on demand.
///
/// A builder holds only weak references: an instance stays cached exactly as
/// long as some caller holds an `Arc<Instance>` or [`Service`] for it. Once
/// every holder lets go, the next [`get`](Self::get) constructs a fresh one.
///
/// `Builder` is a cheap handle; clones share the same slots, configuration
/// and listeners, so a factory may keep one for later lookups.
///
/// Construction of one name never blocks resolution of another, and a
/// factory may resolve other names from inside itself. A factory that
/// resolves its own name deadlocks.
#[derive(Clone)]
pub struct Builder {
    inner: Arc<Shared>,
}

impl Builder {
    /// Create a builder backed by the process-wide registry.
    pub fn new() -> Self {
        Self::with_registry(Arc::clone(TypeRegistry::global()))
    }

    /// Create a builder backed by a specific registry.
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self {
            inner: Arc::new(Shared {
                registry,
                slots: DashMap::new(),
                installed: RwLock::new(Installed {
                    configuration: None,
                    section: DEFAULT_SECTION.to_string(),
                }),
                created: RwLock::new(Vec::new()),
                destroying: Arc::new(RwLock::new(Vec::new())),
            }),
        }
    }

    /// The registry this builder resolves type names against.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.inner.registry
    }

    /// Whether two handles refer to the same builder.
    pub fn ptr_eq(&self, other: &Builder) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The installed configuration, if any.
    pub fn configuration(&self) -> Option<Arc<dyn Configuration>> {
        self.inner.installed.read().configuration.clone()
    }

    /// The section used to look up name remappings.
    pub fn section(&self) -> String {
        self.inner.installed.read().section.clone()
    }

    /// Install a configuration consulted by subsequent lookups.
    pub fn set_configuration(&self, configuration: Arc<dyn Configuration>, section: impl Into<String>) {
        let mut installed = self.inner.installed.write();
        installed.configuration = Some(configuration);
        installed.section = section.into();
        debug!("Builder configuration installed (section '{}')", installed.section);
    }

    /// Install a configuration using [`DEFAULT_SECTION`].
    pub fn set_default_configuration(&self, configuration: Arc<dyn Configuration>) {
        self.set_configuration(configuration, DEFAULT_SECTION);
    }

    /// Register a listener fired after each construction.
    pub fn on_created(&self, listener: CreatedListener) {
        self.inner.created.write().push(listener);
    }

    /// Register a listener fired before a constructed instance is destroyed.
    ///
    /// Only instances constructed by this builder notify; provided instances
    /// do not.
    pub fn on_destroying(&self, listener: DestroyingListener) {
        self.inner.destroying.write().push(listener);
    }

    /// Get the type name `name` resolves to through the installed configuration.
    ///
    /// Only one hop is followed: the remapped name is not looked up again.
    pub fn resolve_name(&self, name: &str) -> String {
        let (configuration, section) = {
            let installed = self.inner.installed.read();
            (installed.configuration.clone(), installed.section.clone())
        };

        let Some(configuration) = configuration else {
            return name.to_string();
        };

        match configuration.get(&format!("{section}/{name}")) {
            Some(Value::String(type_name)) => {
                trace!("Remapped {} to {}", name, type_name);
                type_name
            }
            _ => name.to_string(),
        }
    }

    /// Get the instance for `name`, constructing it if no live one exists.
    pub fn get(&self, name: &str) -> Result<Arc<Instance>, BuildError> {
        let type_name = self.resolve_name(name);
        let slot = self.slot(&type_name);

        if let Some(instance) = slot.live() {
            trace!("Cache hit for {}", type_name);
            return Ok(instance);
        }

        let guard = slot.construction.lock();

        // Another thread may have finished constructing while we waited.
        if let Some(instance) = slot.live() {
            return Ok(instance);
        }

        let descriptor = self.inner.registry.lookup(&type_name).ok_or_else(|| BuildError::TypeNotFound {
            type_name: type_name.clone(),
            requested: name.to_string(),
        })?;

        let object = descriptor
            .instantiate(self)
            .map_err(|reason| BuildError::ConstructionFailed {
                type_name: type_name.clone(),
                requested: name.to_string(),
                reason,
            })?;

        let instance = Arc::new(
            Instance::new(type_name.clone(), object, descriptor.capabilities().to_vec())
                .with_release_hook(self.release_hook()),
        );
        *slot.reference.write() = Arc::downgrade(&instance);
        drop(guard);

        info!("Constructed {} for {}", type_name, name);

        let listeners = self.inner.created.read().clone();
        for listener in &listeners {
            listener(&instance);
        }

        Ok(instance)
    }

    /// Get the instance for `name` as capability `T`.
    ///
    /// A mismatch leaves the cached instance in place.
    pub fn get_as<T: ?Sized + Capability>(&self, name: &str) -> Result<Service<T>, BuildError> {
        let instance = self.get(name)?;
        Service::new(instance).ok_or_else(|| BuildError::TypeMismatch {
            requested: name.to_string(),
            capability: T::NAME.to_string(),
        })
    }

    /// Get the instance registered under `T`'s own capability name.
    pub fn get_service<T: ?Sized + Capability>(&self) -> Result<Service<T>, BuildError> {
        self.get_as::<T>(T::NAME)
    }

    /// Make `instance` the cached instance for `name`.
    ///
    /// `name` is used as-is, without remapping. The builder does not keep the
    /// instance alive: once the caller releases it, the slot expires.
    pub fn provide(&self, name: &str, instance: &Arc<Instance>) {
        let slot = self.slot(name);
        let _guard = slot.construction.lock();
        *slot.reference.write() = Arc::downgrade(instance);
        debug!("Provided {} as {}", instance.type_name(), name);
    }

    fn slot(&self, type_name: &str) -> Arc<Slot> {
        if let Some(slot) = self.inner.slots.get(type_name) {
            return Arc::clone(slot.value());
        }
        Arc::clone(
            self.inner
                .slots
                .entry(type_name.to_string())
                .or_insert_with(|| Arc::new(Slot::new()))
                .value(),
        )
    }

    fn release_hook(&self) -> ReleaseHook {
        let destroying = Arc::clone(&self.inner.destroying);
        Arc::new(move |instance: &Instance| {
            debug!("Releasing {}", instance.type_name());
            let listeners = destroying.read().clone();
            for listener in &listeners {
                listener(instance);
            }
        })
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("section", &self.section())
            .field("slots", &self.inner.slots.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
