//! Factory descriptors.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::builder::Builder;

/// A constructed object with its concrete type erased.
pub type Object = Arc<dyn Any + Send + Sync>;

/// Constructor taking no context.
pub type Construct = fn() -> anyhow::Result<Object>;

/// Constructor taking the builder that is resolving the type.
pub type ConstructWithBuilder = fn(&Builder) -> anyhow::Result<Object>;

/// Projects an erased object onto a capability.
///
/// Returns a boxed `Arc<T>` where `T` is the capability type, or `None` when
/// the object is not of the concrete type the cast was generated for.
pub type CastFn = fn(&Object) -> Option<Box<dyn Any + Send + Sync>>;

/// One capability a registered type supports, with the function that
/// produces the typed view.
///
/// Usually generated with [`capability_cast!`](crate::capability_cast).
#[derive(Clone, Copy)]
pub struct CapabilityCast {
    name: &'static str,
    cast: CastFn,
}

impl CapabilityCast {
    pub const fn new(name: &'static str, cast: CastFn) -> Self {
        Self { name, cast }
    }

    /// Canonical identifier of the capability.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn apply(&self, object: &Object) -> Option<Box<dyn Any + Send + Sync>> {
        (self.cast)(object)
    }
}

impl fmt::Debug for CapabilityCast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityCast").field(&self.name).finish()
    }
}

/// Build a [`CapabilityCast`] from a concrete type to a capability type.
///
/// ```ignore
/// let cast = capability_cast!(EnglishGreeter => dyn Greeter);
/// ```
#[macro_export]
macro_rules! capability_cast {
    ($concrete:ty => $capability:ty) => {
        $crate::CapabilityCast::new(
            <$capability as $crate::Capability>::NAME,
            |object| {
                let concrete = ::std::sync::Arc::clone(object)
                    .downcast::<$concrete>()
                    .ok()?;
                let view: ::std::sync::Arc<$capability> = concrete;
                ::std::option::Option::Some(::std::boxed::Box::new(view)
                    as ::std::boxed::Box<
                        dyn ::std::any::Any + ::std::marker::Send + ::std::marker::Sync,
                    >)
            },
        )
    };
}

/// Describes how to construct a registered type.
///
/// A descriptor may carry a no-argument constructor, a builder-argument
/// constructor, both, or neither. A descriptor without constructors can still
/// be registered and looked up; resolving it through a builder fails.
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    construct: Option<Construct>,
    construct_with_builder: Option<ConstructWithBuilder>,
    capabilities: Vec<CapabilityCast>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            construct: None,
            construct_with_builder: None,
            capabilities: Vec::new(),
        }
    }

    pub fn with_constructor(mut self, construct: Construct) -> Self {
        self.construct = Some(construct);
        self
    }

    pub fn with_builder_constructor(mut self, construct: ConstructWithBuilder) -> Self {
        self.construct_with_builder = Some(construct);
        self
    }

    pub fn with_capability(mut self, capability: CapabilityCast) -> Self {
        self.capabilities.push(capability);
        self
    }

    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = CapabilityCast>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> &[CapabilityCast] {
        &self.capabilities
    }

    /// Check whether instances of this type support the named capability.
    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c.name() == capability)
    }

    /// Whether at least one constructor variant is present.
    pub fn is_constructible(&self) -> bool {
        self.construct.is_some() || self.construct_with_builder.is_some()
    }

    /// Construct an object, preferring the builder-argument constructor and
    /// falling back to the no-argument one.
    pub(crate) fn instantiate(&self, builder: &Builder) -> Result<Object, String> {
        let mut failures = Vec::new();

        if let Some(construct) = self.construct_with_builder {
            match construct(builder) {
                Ok(object) => return Ok(object),
                Err(e) => failures.push(format!("builder constructor: {e:#}")),
            }
        }

        if let Some(construct) = self.construct {
            match construct() {
                Ok(object) => return Ok(object),
                Err(e) => failures.push(format!("constructor: {e:#}")),
            }
        }

        if failures.is_empty() {
            Err("no usable constructor".to_string())
        } else {
            Err(failures.join("; "))
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("construct", &self.construct.is_some())
            .field("construct_with_builder", &self.construct_with_builder.is_some())
            .field("capabilities", &self.capabilities)
            .finish()
    }
}
