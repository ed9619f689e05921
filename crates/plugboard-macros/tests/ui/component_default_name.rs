use plugboard_core::{component, Component, Instance, TypeRegistry};

#[component(new = "Thermometer::default")]
#[derive(Default)]
struct Thermometer {
    celsius: i32,
}

fn main() {
    assert_eq!(Thermometer::TYPE_NAME, "Thermometer");
    assert!(TypeRegistry::global().contains("Thermometer"));

    let instance = Instance::of(Thermometer { celsius: 21 });
    assert_eq!(instance.type_name(), "Thermometer");
    assert_eq!(instance.cast::<Thermometer>().unwrap().celsius, 21);
}
