//! Self-registration through `#[component]`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use plugboard_core::{component, BuildError, Builder, Capability, Component, Instance, TypeRegistry};

trait Valve: Send + Sync {
    fn open(&self) -> bool;
}

impl Capability for dyn Valve {
    const NAME: &'static str = "Valve";
}

trait Pump: Send + Sync {
    fn flow(&self) -> u32;
}

impl Capability for dyn Pump {
    const NAME: &'static str = "Pump";
}

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

#[component(name = "BallValve", capabilities = "dyn Valve", new = "BallValve::new")]
struct BallValve;

impl BallValve {
    fn new() -> Self {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Self
    }
}

impl Valve for BallValve {
    fn open(&self) -> bool {
        true
    }
}

#[component(
    name = "ValvedPump",
    capabilities = "dyn Pump, dyn Valve",
    try_with_builder = "ValvedPump::assemble"
)]
struct ValvedPump {
    valve: plugboard_core::Service<dyn Valve>,
}

impl ValvedPump {
    fn assemble(builder: &Builder) -> Result<Self, BuildError> {
        Ok(Self {
            valve: builder.get_service::<dyn Valve>()?,
        })
    }
}

impl Pump for ValvedPump {
    fn flow(&self) -> u32 {
        if self.valve.open() { 10 } else { 0 }
    }
}

impl Valve for ValvedPump {
    fn open(&self) -> bool {
        self.valve.open()
    }
}

#[test]
fn test_component_registered_globally() {
    let registry = TypeRegistry::global();
    assert!(registry.contains("BallValve"));
    assert!(registry.contains("ValvedPump"));

    let descriptor = registry.lookup("ValvedPump").unwrap();
    assert!(descriptor.supports("ValvedPump"));
    assert!(descriptor.supports("Pump"));
    assert!(descriptor.supports("Valve"));
    assert!(!descriptor.supports("BallValve"));
}

#[test]
fn test_component_trait() {
    assert_eq!(BallValve::TYPE_NAME, "BallValve");
    assert_eq!(<BallValve as Capability>::NAME, "BallValve");

    let names: Vec<_> = BallValve::capabilities().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["BallValve", "Valve"]);
}

#[test]
fn test_instance_of_component() {
    let instance = Instance::of(BallValve);
    assert_eq!(instance.type_name(), "BallValve");
    assert!(instance.cast::<dyn Valve>().unwrap().open());
    assert!(instance.cast::<dyn Pump>().is_none());
}

#[test]
fn test_component_counts_constructions() {
    let builder = Builder::new();
    let before = CONSTRUCTIONS.load(Ordering::SeqCst);

    let first = builder.get_as::<dyn Valve>("BallValve").unwrap();
    let second = builder.get_as::<dyn Valve>("BallValve").unwrap();
    assert!(plugboard_core::Service::ptr_eq(&first, &second));
    assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst) - before, 1);
}

#[test]
fn test_builder_constructor_resolves_dependencies() {
    let builder = Builder::new();
    let valve = Instance::of(BallValve);
    builder.provide("Valve", &valve);

    let pump = builder.get_as::<dyn Pump>("ValvedPump").unwrap();
    assert_eq!(pump.flow(), 10);

    let as_valve = builder.get_as::<dyn Valve>("ValvedPump").unwrap();
    assert!(Arc::ptr_eq(as_valve.instance(), pump.instance()));
}

#[test]
fn test_builder_constructor_failure() {
    let builder = Builder::new();
    let err = builder.get("ValvedPump").unwrap_err();
    match err {
        BuildError::ConstructionFailed { type_name, reason, .. } => {
            assert_eq!(type_name, "ValvedPump");
            assert!(reason.contains("Could not find Valve"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
