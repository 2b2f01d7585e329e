//! # crumple-telemetry
//!
//! Structured telemetry for the Crumple deformation engine.
//!
//! The deformer and cage driver emit lightweight events (step
//! lifecycle, plastic impacts, velocity resets, bakes) onto an event
//! bus with pluggable sinks. Telemetry is optional: components run
//! identically with no bus attached.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventLog, EventSink, TracingSink, VecSink};
