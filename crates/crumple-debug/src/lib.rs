//! # crumple-debug
//!
//! State snapshots for replay and dent inspection. Snapshots capture
//! the deformer's per-vertex buffers (rest, current, velocity) at a
//! point in time and serialize to compact binary with `bincode`.

pub mod snapshot;

pub use snapshot::{DentReport, StateSnapshot};
