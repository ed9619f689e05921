//! Named capabilities.

/// A named contract an instance may be checked against.
///
/// Implemented for trait objects (`dyn Greeter`) so that the builder can hand
/// out typed views of an erased instance, and for concrete component types so
/// they can be requested by their own name.
///
/// ```ignore
/// pub trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// impl Capability for dyn Greeter {
///     const NAME: &'static str = "Greeter";
/// }
/// ```
pub trait Capability: Send + Sync + 'static {
    /// Canonical identifier of the capability.
    ///
    /// Also used as the service name when a capability is requested without
    /// an explicit name.
    const NAME: &'static str;
}
