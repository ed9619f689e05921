//! # Plugboard Modules
//!
//! Loads shared libraries built with `plugboard_core::declare_module!` and
//! makes the types they register resolvable through a builder.

mod error;
mod library;
mod loader;

pub use error::LoadError;
pub use library::is_library_file;
pub use loader::LibraryModuleLoader;
