//! Error types for the Plugboard protocol layer.

mod build;
mod config;

pub use build::*;
pub use config::*;
