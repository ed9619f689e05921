//! # Plugboard Protocols
//!
//! Contracts shared by the Plugboard runtime, its backends and loadable
//! modules. Contains only interface definitions and plain value types.
//!
//! ## Core Traits
//!
//! - [`Capability`] - A named contract an instance can be checked against
//! - [`Configuration`] - Thread-safe key/value store used for name remapping
//! - [`ModuleLoader`] - Loads shared libraries that register new types
//! - [`Application`] - Entry point of a hosted program

pub mod application;
pub mod capability;
pub mod configuration;
pub mod error;
pub mod module;
pub mod value;

pub use application::Application;
pub use capability::Capability;
pub use configuration::Configuration;
pub use error::{BuildError, ConfigError};
pub use module::{ModuleListener, ModuleLoader, ModuleRecord};
pub use value::Value;
