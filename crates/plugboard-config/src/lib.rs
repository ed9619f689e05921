//! # Plugboard Config
//!
//! Configuration backends for the Plugboard runtime.
//!
//! - [`MemoryConfiguration`] - In-memory key/value store
//! - [`FileConfiguration`] - TOML file, persisted on every change
//! - [`HostConfiguration`] - Registered file backend whose path the host picks
//! - [`ConfigLoader`] - Parsing helpers with `${VAR}` expansion
//! - [`ConfigValidator`] - Checks for the keys the host reads

mod convert;
mod file;
mod host;
mod loader;
mod memory;
mod validator;

pub use file::FileConfiguration;
pub use host::HostConfiguration;
pub use loader::ConfigLoader;
pub use memory::MemoryConfiguration;
pub use plugboard_protocols::{ConfigError, Configuration, Value};
pub use validator::{
    module_dirs_key, module_files_key, ConfigValidator, ValidationError, ValidationResult,
    ValidationWarning,
};
