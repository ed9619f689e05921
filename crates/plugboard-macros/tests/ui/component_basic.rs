use plugboard_core::{component, Builder, Capability, TypeRegistry};

trait Greeter: Send + Sync {
    fn greeting(&self) -> String;
}

impl Capability for dyn Greeter {
    const NAME: &'static str = "Greeter";
}

#[component(name = "FrenchGreeter", capabilities = "dyn Greeter", new = "FrenchGreeter::new")]
struct FrenchGreeter {
    word: String,
}

impl FrenchGreeter {
    fn new() -> Self {
        Self {
            word: "Bonjour".to_string(),
        }
    }
}

impl Greeter for FrenchGreeter {
    fn greeting(&self) -> String {
        self.word.clone()
    }
}

fn main() {
    let registry = TypeRegistry::global();
    let descriptor = registry.lookup("FrenchGreeter").unwrap();
    assert!(descriptor.supports("Greeter"));
    assert!(descriptor.supports("FrenchGreeter"));

    let builder = Builder::new();
    let greeter = builder.get_as::<dyn Greeter>("FrenchGreeter").unwrap();
    assert_eq!(greeter.greeting(), "Bonjour");

    let concrete = builder.get_service::<FrenchGreeter>().unwrap();
    assert_eq!(concrete.word, "Bonjour");
}
