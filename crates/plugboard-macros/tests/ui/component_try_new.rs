use plugboard_core::{component, BuildError, Builder};

#[component(name = "Sensor", try_new = "Sensor::open")]
struct Sensor;

impl Sensor {
    fn open() -> anyhow::Result<Self> {
        anyhow::bail!("device busy")
    }
}

#[component(name = "Clock", try_new = "Clock::start")]
struct Clock {
    ticks: u64,
}

impl Clock {
    fn start() -> Result<Self, std::io::Error> {
        Ok(Self { ticks: 0 })
    }
}

fn main() {
    let builder = Builder::new();

    let err = builder.get("Sensor").unwrap_err();
    assert!(matches!(err, BuildError::ConstructionFailed { .. }));
    assert!(err.to_string().contains("device busy"));

    let clock = builder.get("Clock").unwrap();
    assert_eq!(clock.downcast_ref::<Clock>().unwrap().ticks, 0);
}
