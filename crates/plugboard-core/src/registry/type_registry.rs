//! Process-wide table of constructible types.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use super::descriptor::TypeDescriptor;

/// A load-time registration submitted with `inventory`.
///
/// `#[component]` expands to one of these. Submissions run as part of
/// static initialization of the binary or shared library that contains them,
/// so no call site has to remember to register anything.
pub struct TypeRegistration {
    describe: fn() -> TypeDescriptor,
}

impl TypeRegistration {
    pub const fn new(describe: fn() -> TypeDescriptor) -> Self {
        Self { describe }
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        (self.describe)()
    }
}

inventory::collect!(TypeRegistration);

static GLOBAL: LazyLock<Arc<TypeRegistry>> = LazyLock::new(|| {
    let registry = TypeRegistry::new();
    let count = registry.register_submitted();
    debug!("Global type registry seeded with {} type(s)", count);
    Arc::new(registry)
});

/// Registry mapping type names to factory descriptors.
///
/// Registration is first-wins: a second descriptor under an existing name is
/// ignored, which keeps repeated loads of the same module harmless.
pub struct TypeRegistry {
    types: DashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            types: DashMap::new(),
        }
    }

    /// The process-wide registry.
    ///
    /// Seeded on first access with every [`TypeRegistration`] linked into the
    /// running binary.
    pub fn global() -> &'static Arc<TypeRegistry> {
        &GLOBAL
    }

    /// Register a descriptor.
    ///
    /// Returns `false` if a type with the same name is already registered.
    pub fn register(&self, descriptor: TypeDescriptor) -> bool {
        match self.types.entry(descriptor.name().to_string()) {
            Entry::Occupied(entry) => {
                debug!("Type already registered, keeping first: {}", entry.key());
                false
            }
            Entry::Vacant(entry) => {
                debug!(
                    "Registered type: {} ({} capabilities)",
                    entry.key(),
                    descriptor.capabilities().len()
                );
                entry.insert(descriptor);
                true
            }
        }
    }

    /// Register every [`TypeRegistration`] visible to this compilation unit.
    ///
    /// Inside a shared library this sees only the library's own submissions,
    /// which is how a module forwards its types into the host's registry.
    /// Returns the number of newly registered types.
    pub fn register_submitted(&self) -> usize {
        let mut count = 0;
        for registration in inventory::iter::<TypeRegistration> {
            if self.register(registration.descriptor()) {
                count += 1;
            }
        }
        count
    }

    /// Look up a descriptor by type name.
    pub fn lookup(&self, name: &str) -> Option<TypeDescriptor> {
        self.types.get(name).map(|entry| entry.value().clone())
    }

    /// Check if a type with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// List all registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "type_registry_tests.rs"]
mod tests;
