//! # Plugboard Core
//!
//! Deployment-time service location for Plugboard.
//!
//! ## Components
//!
//! - [`TypeRegistry`] - Process-wide table of constructible types, filled by
//!   load-time self-registration
//! - [`Builder`] - Resolves names to live, shared instances, one per name
//! - [`Instance`] / [`Service`] - Erased and typed handles to built objects
//! - [`declare_module!`] - Exports the symbols a loadable module needs
//!
//! ## Registering a type
//!
//! ```ignore
//! use plugboard_core::component;
//!
//! #[component(name = "EnglishGreeter", capabilities = "dyn Greeter", new = "EnglishGreeter::new")]
//! pub struct EnglishGreeter;
//! ```

extern crate self as plugboard_core;

pub mod builder;
pub mod instance;
pub mod module;
pub mod registry;

pub use builder::{Builder, CreatedListener, DestroyingListener, DEFAULT_SECTION};
pub use instance::{Component, Instance, Service};
pub use plugboard_macros::component;
pub use plugboard_protocols::{BuildError, Capability};
pub use registry::{
    CapabilityCast, Construct, ConstructWithBuilder, Object, TypeDescriptor, TypeRegistration,
    TypeRegistry,
};

#[doc(hidden)]
pub mod __private {
    pub use anyhow;
    pub use inventory;
    pub use tracing;
}
