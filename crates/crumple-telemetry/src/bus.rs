//! Event bus — per-step event buffering and batch dispatch.
//!
//! The simulation thread owns the bus outright: `emit` appends to the
//! step's pending batch, and `flush` hands the whole batch to every
//! sink at the end of the step. There is no cross-thread channel —
//! the single-writer model means producer and consumer are the same
//! thread.

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// Buffering event bus for simulation telemetry.
pub struct EventBus {
    /// Events emitted since the last flush, in order.
    pending: Vec<SimulationEvent>,
    /// Registered sinks.
    sinks: Vec<Box<dyn EventSink>>,
    /// Whether the bus is active. A disabled bus drops events.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive each step's batch.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. A disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Appends an event to the current step's batch.
    pub fn emit(&mut self, event: SimulationEvent) {
        if self.enabled {
            self.pending.push(event);
        }
    }

    /// Dispatches the pending batch to every sink and clears it.
    ///
    /// Called once at the end of each fixed step; a step that emitted
    /// nothing dispatches nothing.
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        for sink in &mut self.sinks {
            sink.on_step(&self.pending);
        }
        self.pending.clear();
    }

    /// Flushes any remaining events and finalizes all sinks.
    pub fn finalize(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Number of events awaiting dispatch.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
