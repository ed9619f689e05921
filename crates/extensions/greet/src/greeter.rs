//! Greeter capability.

use plugboard_core::Capability;

/// Something that can greet.
pub trait Greeter: Send + Sync {
    /// The greeting text.
    fn greeting(&self) -> String;

    /// Print the greeting to standard output.
    fn greet(&self) {
        println!("{}", self.greeting());
    }
}

impl Capability for dyn Greeter {
    const NAME: &'static str = "Greeter";
}
