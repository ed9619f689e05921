use plugboard_core::{component, Builder};

#[component(name = "Engine", new = "Engine::default")]
#[derive(Default)]
struct Engine;

#[component(name = "Vehicle", with_builder = "Vehicle::assemble")]
struct Vehicle {
    has_engine: bool,
}

impl Vehicle {
    fn assemble(builder: &Builder) -> Self {
        Self {
            has_engine: builder.get("Engine").is_ok(),
        }
    }
}

fn main() {
    let builder = Builder::new();
    let vehicle = builder.get_service::<Vehicle>().unwrap();
    assert!(vehicle.has_engine);
}
