//! Handles to constructed objects.

use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use plugboard_protocols::Capability;

use crate::registry::{CapabilityCast, Object};

/// Callback fired when an instance is about to be destroyed.
pub(crate) type ReleaseHook = Arc<dyn Fn(&Instance) + Send + Sync>;

/// A type that can be registered and wrapped into an [`Instance`].
///
/// Implemented by `#[component]`.
pub trait Component: Any + Send + Sync + Sized {
    /// Name the type is registered under.
    const TYPE_NAME: &'static str;

    /// Every capability the type supports, including itself.
    fn capabilities() -> Vec<CapabilityCast>;
}

/// An object built by (or provided to) a builder.
///
/// The builder only ever holds a weak reference to an `Instance`; callers
/// keep it alive through `Arc<Instance>` or [`Service`] handles. When the
/// last handle is dropped the release hook runs while the object is still
/// intact, then the object is destroyed.
pub struct Instance {
    type_name: String,
    object: Object,
    capabilities: Vec<CapabilityCast>,
    release: Option<ReleaseHook>,
}

impl Instance {
    pub fn new(type_name: impl Into<String>, object: Object, capabilities: Vec<CapabilityCast>) -> Self {
        Self {
            type_name: type_name.into(),
            object,
            capabilities,
            release: None,
        }
    }

    /// Wrap a component value, typically for [`Builder::provide`](crate::Builder::provide).
    pub fn of<C: Component>(value: C) -> Arc<Self> {
        Arc::new(Self::new(C::TYPE_NAME, Arc::new(value), C::capabilities()))
    }

    pub(crate) fn with_release_hook(mut self, hook: ReleaseHook) -> Self {
        self.release = Some(hook);
        self
    }

    /// Name of the type that was constructed.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The erased object.
    pub fn object(&self) -> &Object {
        &self.object
    }

    /// Borrow the object as its concrete type.
    pub fn downcast_ref<C: Any>(&self) -> Option<&C> {
        self.object.downcast_ref::<C>()
    }

    /// Check whether the instance supports the named capability.
    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c.name() == capability)
    }

    /// Names of every capability the instance supports.
    pub fn capability_names(&self) -> Vec<&'static str> {
        self.capabilities.iter().map(CapabilityCast::name).collect()
    }

    /// Project the object onto capability `T`.
    ///
    /// The returned `Arc` shares the object but not the instance: prefer
    /// [`Service`] when the instance must stay cached while in use.
    pub fn cast<T: ?Sized + Capability>(&self) -> Option<Arc<T>> {
        let cast = self.capabilities.iter().find(|c| c.name() == T::NAME)?;
        let view = cast.apply(&self.object)?;
        view.downcast::<Arc<T>>().ok().map(|view| *view)
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        if let Some(hook) = self.release.take() {
            hook(self);
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("capabilities", &self.capability_names())
            .finish()
    }
}

/// A typed handle to an instance.
///
/// Dereferences to the capability `T` and keeps the underlying [`Instance`]
/// alive, so the builder keeps returning the same object while any `Service`
/// for it exists.
pub struct Service<T: ?Sized> {
    view: Arc<T>,
    instance: Arc<Instance>,
}

impl<T: ?Sized + Capability> Service<T> {
    /// Project `instance` onto `T`, or `None` if it lacks the capability.
    pub fn new(instance: Arc<Instance>) -> Option<Self> {
        let view = instance.cast::<T>()?;
        Some(Self { view, instance })
    }
}

impl<T: ?Sized> Service<T> {
    /// The instance behind this handle.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// The typed view, detached from the instance.
    pub fn view(&self) -> &Arc<T> {
        &self.view
    }

    /// Whether two handles refer to the same instance.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.instance, &other.instance)
    }
}

impl<T: ?Sized> Deref for Service<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.view
    }
}

impl<T: ?Sized> Clone for Service<T> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            instance: Arc::clone(&self.instance),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Service<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service").field("instance", &self.instance).finish()
    }
}
