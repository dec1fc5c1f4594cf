//! Session orchestration for WeatherNow.
//!
//! `state` holds the pure reducer; `driver` runs the effects it asks for on a
//! tokio runtime and feeds completions back in as events.

pub mod driver;
pub mod state;
pub mod workflow;

pub use driver::{Completion, Completions, SessionDriver};
pub use state::{reduce, Effect, Event, Phase, SessionState, Target};
