//! Hosted application entry point.

use crate::capability::Capability;

/// An application which may be hosted by the Plugboard runner.
///
/// A module provides an entry point by registering a type with this
/// capability. Implementations that need further services should be built
/// with a builder-argument constructor and resolve what they need from it.
pub trait Application: Send + Sync {
    /// Run the application.
    ///
    /// `args` are the arguments left over after the host parsed its own
    /// options. The return value becomes the process exit status.
    fn main(&self, args: &[String]) -> i32;
}

impl Capability for dyn Application {
    const NAME: &'static str = "Application";
}
