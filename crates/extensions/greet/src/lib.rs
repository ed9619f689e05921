//! Greeting demo module for Plugboard.
//!
//! This module provides:
//! - `Greeter`: capability for anything that can greet
//! - `EnglishGreeter`: the default greeter
//! - `GreetApplication`: an application resolving a `Greeter` and greeting
//!
//! Built as a `cdylib`, it can be dropped into a module directory and run
//! with `plugboard GreetApplication`.

mod application;
mod english;
mod greeter;

pub use application::GreetApplication;
pub use english::EnglishGreeter;
pub use greeter::Greeter;

plugboard_core::declare_module!("Greet Application", "1.0");
