//! The cage driver: per-step stress accumulation and bake.
//!
//! State machine per link: Relaxed → (stress) → Offset-Accumulating →
//! (bake) → Relaxed, with Clear available at any time to discard
//! offsets without moving geometry. The two auto-bake policies
//! (threshold and interval) are merged into one bake request per step,
//! so at most one bake runs even when both fire.

use crumple_math::Vec3;
use crumple_telemetry::{EventBus, EventKind, SimulationEvent};
use crumple_types::constants::ANCHOR_SEPARATION_TOLERANCE;
use crumple_types::{CrumpleError, CrumpleResult, LinkId};

use crate::config::CageDriverConfig;
use crate::link::{JointLink, LinkDescriptor};
use crate::skeleton::CageSkeleton;

/// Per-step joint feedback from the host physics engine, one entry
/// per link, in link order.
#[derive(Debug, Clone, Copy)]
pub struct LinkFeedback {
    /// World position of the joint's anchor on the dynamic body.
    pub body_anchor_world: Vec3,
    /// Constraint force magnitude the joint currently applies.
    pub joint_force: f32,
}

/// Drives the joint-link cage: proxies follow bones, stress shifts
/// rest anchors, bakes commit offsets into the skeleton.
pub struct CageDriver {
    skeleton: CageSkeleton,
    links: Vec<JointLink>,
    config: CageDriverConfig,
    step_index: u32,
    sim_time: f64,
    last_threshold_bake: f64,
    last_interval_bake: f64,
    bake_count: u32,
    telemetry: Option<EventBus>,
}

impl CageDriver {
    /// Builds a driver over the skeleton with the authored links.
    ///
    /// Base anchors are captured from the descriptors and the proxies
    /// start on their bones. Fails on an invalid config, an empty link
    /// list, or a link naming an unknown bone.
    pub fn new(
        skeleton: CageSkeleton,
        descriptors: &[LinkDescriptor],
        config: CageDriverConfig,
    ) -> CrumpleResult<Self> {
        config.validate()?;

        if descriptors.is_empty() {
            return Err(CrumpleError::MissingReference(
                "cage driver requires at least one joint link".into(),
            ));
        }

        let mut links = Vec::with_capacity(descriptors.len());
        for desc in descriptors {
            if desc.bone >= skeleton.len() {
                return Err(CrumpleError::MissingReference(format!(
                    "link references bone {} but skeleton has {} bones",
                    desc.bone,
                    skeleton.len()
                )));
            }
            let (position, rotation) = skeleton.world_pose(desc.bone);
            links.push(JointLink::from_descriptor(desc, position, rotation));
        }

        Ok(Self {
            skeleton,
            links,
            config,
            step_index: 0,
            sim_time: 0.0,
            last_threshold_bake: f64::NEG_INFINITY,
            last_interval_bake: 0.0,
            bake_count: 0,
            telemetry: None,
        })
    }

    /// Attaches a telemetry bus.
    pub fn with_telemetry(mut self, bus: EventBus) -> Self {
        self.telemetry = Some(bus);
        self
    }

    /// Runs one fixed step: proxy follow, stress accumulation, merged
    /// auto-bake. `feedback` must carry one entry per link, in order.
    ///
    /// Steps other than every `process_every`th are skipped (counters
    /// still advance).
    pub fn step_fixed(&mut self, dt: f32, feedback: &[LinkFeedback]) -> CrumpleResult<()> {
        if dt <= 0.0 {
            return Ok(());
        }
        if feedback.len() != self.links.len() {
            return Err(CrumpleError::InvalidConfig(format!(
                "expected {} link feedback entries, got {}",
                self.links.len(),
                feedback.len()
            )));
        }

        self.sim_time += dt as f64;
        self.step_index += 1;

        if (self.step_index - 1) % self.config.process_every != 0 {
            return Ok(());
        }

        for i in 0..self.links.len() {
            self.step_link(i, dt, &feedback[i]);
        }

        // Merged auto-bake: both policies raise one request.
        let mut bake_requested = false;

        if self.config.auto_bake_threshold > 0.0 {
            let max_dent = self.max_dent();
            if max_dent > self.config.auto_bake_threshold
                && self.sim_time - self.last_threshold_bake
                    >= self.config.auto_bake_debounce as f64
            {
                bake_requested = true;
                self.last_threshold_bake = self.sim_time;
            }
        }

        if self.config.bake_interval > 0.0
            && self.sim_time - self.last_interval_bake >= self.config.bake_interval as f64
        {
            bake_requested = true;
            self.last_interval_bake = self.sim_time;
        }

        if bake_requested {
            self.bake();
        }

        if let Some(bus) = self.telemetry.as_mut() {
            bus.flush();
        }
        Ok(())
    }

    /// One link's follow + stress step.
    fn step_link(&mut self, index: usize, dt: f32, feedback: &LinkFeedback) {
        let (bone_pos, bone_rot) = self.skeleton.world_pose(self.links[index].bone);
        let link = &mut self.links[index];

        // Rotation always tracks the bone; position only if following.
        link.proxy_rotation = bone_rot;
        if link.follow_position {
            link.proxy_velocity = (bone_pos - link.proxy_position) / dt;
            link.proxy_position = bone_pos;
        }

        let separation = feedback.body_anchor_world - link.anchor_world();
        let stressed = separation.length() > ANCHOR_SEPARATION_TOLERANCE
            || feedback.joint_force > self.config.yield_force;

        if stressed {
            // Shift the rest anchor toward the dynamic side by the
            // plasticity fraction, accumulated in proxy-local space.
            let shift_local =
                link.proxy_rotation.inverse() * (separation * self.config.plasticity);
            link.offset += shift_local;

            if self.config.max_plastic_offset > 0.0 {
                let magnitude = link.offset.length();
                if magnitude > self.config.max_plastic_offset {
                    link.offset *= self.config.max_plastic_offset / magnitude;
                }
            }

            let event = EventKind::LinkYield {
                link: LinkId(index as u32),
                separation: separation.length(),
                offset_magnitude: link.offset.length(),
            };
            if let Some(bus) = self.telemetry.as_mut() {
                bus.emit(SimulationEvent::new(self.step_index, event));
            }
        }

        // The joint's rest reference permanently shifts with the offset.
        link.connected_anchor = link.base_anchor + link.offset;
    }

    /// Commits every link's accumulated offset into its bone's local
    /// position, then resets offsets and anchors.
    ///
    /// Baking twice with no intervening stress is a no-op the second
    /// time: every offset is already zero.
    pub fn bake(&mut self) {
        self.bake_count += 1;

        let mut baked = 0u32;
        let mut max_offset = 0.0f32;

        for i in 0..self.links.len() {
            if self.links[i].offset == Vec3::ZERO {
                continue;
            }

            let world = self.links[i].proxy_rotation * self.links[i].offset;
            let bone = self.links[i].bone;
            self.skeleton.shift_bone_world(bone, world);

            max_offset = max_offset.max(world.length());
            baked += 1;

            self.links[i].reset_offset();

            if self.config.teleport_proxies_on_bake {
                let (pos, rot) = self.skeleton.world_pose(bone);
                let link = &mut self.links[i];
                link.proxy_position = pos;
                link.proxy_rotation = rot;
                link.proxy_velocity = Vec3::ZERO;
            }
        }

        if baked > 0 {
            if let Some(bus) = self.telemetry.as_mut() {
                bus.emit(SimulationEvent::new(
                    self.step_index,
                    EventKind::BakeCommitted {
                        baked_links: baked,
                        max_offset,
                    },
                ));
            }
        }
    }

    /// Discards all accumulated offsets without moving any geometry.
    pub fn clear(&mut self) {
        for link in &mut self.links {
            link.reset_offset();
        }
    }

    /// Largest accumulated dent across all links (world magnitude).
    pub fn max_dent(&self) -> f32 {
        self.links
            .iter()
            .map(JointLink::dent_magnitude)
            .fold(0.0f32, f32::max)
    }

    /// The skeleton, including any baked shifts.
    pub fn skeleton(&self) -> &CageSkeleton {
        &self.skeleton
    }

    /// The links, in authoring order.
    pub fn links(&self) -> &[JointLink] {
        &self.links
    }

    /// The active configuration.
    pub fn config(&self) -> &CageDriverConfig {
        &self.config
    }

    /// Number of bake operations run (committing or not).
    pub fn bake_count(&self) -> u32 {
        self.bake_count
    }
}
