//! Greet application.

use tracing::error;

use plugboard_core::{component, Builder};
use plugboard_protocols::Application;

use crate::greeter::Greeter;

/// Resolves whichever type the deployment maps `Greeter` to and greets.
#[component(
    name = "GreetApplication",
    capabilities = "dyn Application",
    with_builder = "GreetApplication::new"
)]
pub struct GreetApplication {
    builder: Builder,
}

impl GreetApplication {
    pub fn new(builder: &Builder) -> Self {
        Self {
            builder: builder.clone(),
        }
    }
}

impl Application for GreetApplication {
    fn main(&self, _args: &[String]) -> i32 {
        match self.builder.get_service::<dyn Greeter>() {
            Ok(greeter) => {
                greeter.greet();
                0
            }
            Err(e) => {
                error!("No greeter available: {}", e);
                1
            }
        }
    }
}
