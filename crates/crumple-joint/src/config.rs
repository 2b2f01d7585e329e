//! Cage driver configuration.

use serde::{Deserialize, Serialize};

use crumple_types::{CrumpleError, CrumpleResult};

/// Configuration for the joint-offset cage driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CageDriverConfig {
    /// Joint force magnitude above which a link counts as stressed,
    /// in addition to the anchor-separation tolerance.
    pub yield_force: f32,

    /// Fraction of the anchor separation converted into permanent
    /// offset on each stressed step (0 = fully elastic, 1 = fully
    /// plastic).
    pub plasticity: f32,

    /// Clamp on the world magnitude of a link's accumulated offset.
    /// Zero disables the clamp.
    pub max_plastic_offset: f32,

    /// Process links every Nth fixed step (1 = every step).
    pub process_every: u32,

    /// Auto-bake when the largest dent across links exceeds this.
    /// Zero disables threshold baking.
    pub auto_bake_threshold: f32,

    /// Minimum seconds between threshold-triggered bakes.
    pub auto_bake_debounce: f32,

    /// Bake every this many seconds regardless of dent size.
    /// Zero disables interval baking.
    pub bake_interval: f32,

    /// Teleport proxies onto their bones after a bake and zero their
    /// velocities, avoiding a visible snap-back.
    pub teleport_proxies_on_bake: bool,
}

impl Default for CageDriverConfig {
    fn default() -> Self {
        Self {
            yield_force: 2000.0,
            plasticity: 0.5,
            max_plastic_offset: 0.02,
            process_every: 1,
            auto_bake_threshold: 0.0,
            auto_bake_debounce: 1.0,
            bake_interval: 0.0,
            teleport_proxies_on_bake: true,
        }
    }
}

impl CageDriverConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> CrumpleResult<()> {
        if !(0.0..=1.0).contains(&self.plasticity) {
            return Err(CrumpleError::InvalidConfig(
                "plasticity must be in [0, 1]".into(),
            ));
        }
        if self.yield_force < 0.0 {
            return Err(CrumpleError::InvalidConfig(
                "yield_force must be non-negative".into(),
            ));
        }
        if self.max_plastic_offset < 0.0 {
            return Err(CrumpleError::InvalidConfig(
                "max_plastic_offset must be non-negative".into(),
            ));
        }
        if self.process_every == 0 {
            return Err(CrumpleError::InvalidConfig(
                "process_every must be at least 1".into(),
            ));
        }
        if self.auto_bake_debounce < 0.0 || self.bake_interval < 0.0 {
            return Err(CrumpleError::InvalidConfig(
                "bake timings must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
