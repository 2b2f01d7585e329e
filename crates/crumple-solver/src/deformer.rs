//! The host-facing deformer façade.
//!
//! `CageDeformer` owns the mesh, the deformation state, the edge
//! graph, and the region map — the single-writer for all of them. The
//! host loop calls `on_contact` for each collision event the physics
//! engine reports, then `step_fixed` once per physics tick.

use crumple_mesh::normals::compute_vertex_normals;
use crumple_mesh::{CageMesh, EdgeGraph};
use crumple_region::{ContactEvent, RegionDescriptor, RegionMap};
use crumple_telemetry::{EventBus, EventKind, SimulationEvent};
use crumple_types::{CrumpleError, CrumpleResult, VertexId};

use crate::config::DeformerConfig;
use crate::impact::{apply_contact, ImpactOutcome};
use crate::relaxation::{apply_pin, integrate, relax_springs};
use crate::state::DeformState;

/// The vertex-spring cage deformer.
///
/// Construction validates the configuration and required references;
/// an invalid deformer is never built. All per-step work happens in
/// [`CageDeformer::step_fixed`] and [`CageDeformer::on_contact`],
/// synchronously on the caller's thread.
pub struct CageDeformer {
    mesh: CageMesh,
    config: DeformerConfig,
    edges: EdgeGraph,
    regions: Vec<RegionDescriptor>,
    region_map: RegionMap,
    state: DeformState,
    step_index: u32,
    telemetry: Option<EventBus>,
}

impl CageDeformer {
    /// Builds a deformer over `mesh` with the given region volumes.
    ///
    /// Fails if the config is invalid, the mesh fails validation, the
    /// mesh has no usable edges, or the region list is empty.
    pub fn new(
        mesh: CageMesh,
        regions: Vec<RegionDescriptor>,
        config: DeformerConfig,
    ) -> CrumpleResult<Self> {
        config.validate()?;
        mesh.validate()?;

        if regions.is_empty() {
            return Err(CrumpleError::MissingReference(
                "deformer requires at least one region volume".into(),
            ));
        }

        let edges = EdgeGraph::build(&mesh);
        if edges.is_empty() {
            return Err(CrumpleError::InvalidMesh(
                "mesh has no non-degenerate edges".into(),
            ));
        }

        let region_map = RegionMap::build(&mesh, &regions, config.impact_radius);
        let state = DeformState::from_mesh(&mesh);

        Ok(Self {
            mesh,
            config,
            edges,
            regions,
            region_map,
            state,
            step_index: 0,
            telemetry: None,
        })
    }

    /// Attaches a telemetry bus.
    pub fn with_telemetry(mut self, bus: EventBus) -> Self {
        self.telemetry = Some(bus);
        self
    }

    /// Runs one fixed simulation step.
    ///
    /// Ordering: relaxation iterations → pin pass → integrate/clamp →
    /// publish (mesh buffer, normals, bounds). A non-positive `dt` is
    /// a no-op.
    pub fn step_fixed(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        self.emit(EventKind::StepBegin { dt });

        for _ in 0..self.config.relax_iterations {
            relax_springs(
                &mut self.state,
                &self.edges,
                self.config.spring_constant,
                self.config.damping_constant,
            );
        }

        apply_pin(&mut self.state, self.config.pin_strength, dt);

        let stats = integrate(&mut self.state, dt, self.config.max_vertex_displacement);
        for &v in &stats.reset_vertices {
            self.emit(EventKind::VelocityReset {
                vertex: VertexId(v),
            });
        }

        self.state.publish_to(&mut self.mesh);
        compute_vertex_normals(&mut self.mesh);
        self.mesh.recompute_bounds();

        self.emit(EventKind::StepEnd {
            max_displacement: self.state.max_displacement(),
            clamped_vertices: stats.clamped,
        });

        if let Some(bus) = self.telemetry.as_mut() {
            bus.flush();
        }
        self.step_index += 1;
    }

    /// Applies one collision event from the host physics engine.
    ///
    /// Runs synchronously within the physics callback, so the next
    /// relaxation pass sees the updated rest positions. May be called
    /// any number of times between fixed steps.
    pub fn on_contact(&mut self, event: &ContactEvent) {
        let outcome: ImpactOutcome = apply_contact(
            &mut self.state,
            &self.regions,
            &self.region_map,
            &self.config,
            event,
        );

        for &collider_id in &outcome.skipped_colliders {
            self.emit(EventKind::ContactSkipped { collider_id });
        }
        for &(region, affected) in &outcome.applied {
            self.emit(EventKind::PlasticImpact {
                region,
                impulse: event.impulse,
                over_yield: outcome.over_yield,
                affected_vertices: affected,
            });
        }
    }

    /// Replaces the region list and rebuilds the vertex assignment.
    ///
    /// Assignment is never updated per-frame; this is the explicit
    /// rebuild for when the volume list changes.
    pub fn rebuild_regions(&mut self, regions: Vec<RegionDescriptor>) -> CrumpleResult<()> {
        if regions.is_empty() {
            return Err(CrumpleError::MissingReference(
                "deformer requires at least one region volume".into(),
            ));
        }
        self.region_map = RegionMap::build(&self.mesh, &regions, self.config.impact_radius);
        self.regions = regions;
        Ok(())
    }

    /// The published mesh (current deformed shape).
    pub fn mesh(&self) -> &CageMesh {
        &self.mesh
    }

    /// The deformation state buffers.
    pub fn state(&self) -> &DeformState {
        &self.state
    }

    /// The active configuration.
    pub fn config(&self) -> &DeformerConfig {
        &self.config
    }

    /// The vertex → region assignment.
    pub fn region_map(&self) -> &RegionMap {
        &self.region_map
    }

    /// The region volume list, in assignment order.
    pub fn regions(&self) -> &[RegionDescriptor] {
        &self.regions
    }

    /// Number of fixed steps run so far.
    pub fn step_count(&self) -> u32 {
        self.step_index
    }

    fn emit(&mut self, kind: EventKind) {
        if let Some(bus) = self.telemetry.as_mut() {
            bus.emit(SimulationEvent::new(self.step_index, kind));
        }
    }
}
