//! Type registry and factory descriptors.

mod descriptor;
mod type_registry;

pub use descriptor::{CapabilityCast, CastFn, Construct, ConstructWithBuilder, Object, TypeDescriptor};
pub use type_registry::{TypeRegistration, TypeRegistry};
