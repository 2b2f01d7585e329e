//! Pluggable event sinks.
//!
//! Sinks receive each step's event batch from the bus — collecting it
//! for inspection, or forwarding it to the `tracing` subscriber with a
//! per-variant level.

use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::events::{EventKind, SimulationEvent};

/// Shared handle onto a [`VecSink`]'s collected events.
pub type EventLog = Arc<Mutex<Vec<SimulationEvent>>>;

/// Trait for event consumers.
///
/// The bus delivers events once per fixed step, as the batch emitted
/// during that step.
pub trait EventSink: Send {
    /// Process one step's batch of events, in emission order.
    fn on_step(&mut self, events: &[SimulationEvent]);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// A sink that collects events into a shared log, so tests and
/// inspectors can read back what a simulation emitted even after the
/// sink has been boxed into a bus.
pub struct VecSink {
    events: EventLog,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A handle onto the collected events, valid after the sink is
    /// moved into a bus.
    pub fn log(&self) -> EventLog {
        Arc::clone(&self.events)
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecSink {
    fn on_step(&mut self, events: &[SimulationEvent]) {
        if let Ok(mut log) = self.events.lock() {
            log.extend_from_slice(events);
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that forwards events to the `tracing` subscriber.
///
/// Each event kind carries its own level (step lifecycle at DEBUG,
/// deformation at INFO, numeric recovery at WARN); `max_verbosity`
/// caps how verbose a level still gets logged.
pub struct TracingSink {
    max_verbosity: Level,
}

impl TracingSink {
    /// Creates a tracing sink logging events up to the given verbosity.
    pub fn new(max_verbosity: Level) -> Self {
        Self { max_verbosity }
    }

    fn log(&self, event: &SimulationEvent) {
        let step = event.step;
        let level = match event.kind {
            EventKind::StepBegin { .. } | EventKind::StepEnd { .. } => Level::DEBUG,
            EventKind::ContactSkipped { .. } | EventKind::VelocityReset { .. } => Level::WARN,
            _ => Level::INFO,
        };
        // `Level` orders ERROR lowest, TRACE highest.
        if level > self.max_verbosity {
            return;
        }

        match &event.kind {
            EventKind::StepBegin { dt } => {
                tracing::debug!(step, dt = *dt as f64, "step begin");
            }
            EventKind::StepEnd {
                max_displacement,
                clamped_vertices,
            } => {
                tracing::debug!(
                    step,
                    max_displacement = *max_displacement as f64,
                    clamped_vertices,
                    "step end"
                );
            }
            EventKind::PlasticImpact {
                region,
                impulse,
                over_yield,
                affected_vertices,
            } => {
                tracing::info!(
                    step,
                    region = region.0,
                    impulse = *impulse as f64,
                    over_yield = *over_yield as f64,
                    affected_vertices,
                    "plastic impact"
                );
            }
            EventKind::ContactSkipped { collider_id } => {
                tracing::warn!(step, collider_id, "contact skipped: unresolvable collider");
            }
            EventKind::VelocityReset { vertex } => {
                tracing::warn!(step, vertex = vertex.0, "non-finite velocity reset");
            }
            EventKind::LinkYield {
                link,
                separation,
                offset_magnitude,
            } => {
                tracing::info!(
                    step,
                    link = link.0,
                    separation = *separation as f64,
                    offset_magnitude = *offset_magnitude as f64,
                    "link yield"
                );
            }
            EventKind::BakeCommitted {
                baked_links,
                max_offset,
            } => {
                tracing::info!(
                    step,
                    baked_links,
                    max_offset = *max_offset as f64,
                    "bake committed"
                );
            }
            EventKind::Custom { label, payload } => {
                tracing::info!(
                    step,
                    label = label.as_str(),
                    payload = payload.as_str(),
                    "custom event"
                );
            }
        }
    }
}

impl EventSink for TracingSink {
    fn on_step(&mut self, events: &[SimulationEvent]) {
        for event in events {
            self.log(event);
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
