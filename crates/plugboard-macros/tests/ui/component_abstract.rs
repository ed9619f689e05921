use plugboard_core::{component, BuildError, Builder, TypeRegistry};

#[component(name = "Placeholder")]
struct Placeholder;

fn main() {
    let descriptor = TypeRegistry::global().lookup("Placeholder").unwrap();
    assert!(!descriptor.is_constructible());

    let err = Builder::new().get("Placeholder").unwrap_err();
    assert!(matches!(err, BuildError::ConstructionFailed { .. }));
}
