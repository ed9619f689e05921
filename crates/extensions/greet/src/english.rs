//! English greeter.

use plugboard_core::component;

use crate::greeter::Greeter;

#[component(name = "EnglishGreeter", capabilities = "dyn Greeter", new = "EnglishGreeter::new")]
#[derive(Debug, Default)]
pub struct EnglishGreeter;

impl EnglishGreeter {
    pub fn new() -> Self {
        Self
    }
}

impl Greeter for EnglishGreeter {
    fn greeting(&self) -> String {
        "Hello, world!".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugboard_core::{Builder, TypeRegistry};

    #[test]
    fn test_greeting() {
        assert_eq!(EnglishGreeter::new().greeting(), "Hello, world!");
    }

    #[test]
    fn test_registered() {
        let descriptor = TypeRegistry::global().lookup("EnglishGreeter").unwrap();
        assert!(descriptor.supports("Greeter"));

        let greeter = Builder::new().get_as::<dyn Greeter>("EnglishGreeter").unwrap();
        assert_eq!(greeter.greeting(), "Hello, world!");
    }
}
