//! Integration tests for crumple-solver.

use crumple_math::Vec3;
use crumple_mesh::generators::quad_grid;
use crumple_mesh::topology::{Edge, EdgeGraph};
use crumple_mesh::CageMesh;
use crumple_region::{ContactEvent, ContactPoint, RegionDescriptor, RegionVolume, TransformTag};
use crumple_solver::config::DeformerConfig;
use crumple_solver::impact::apply_contact;
use crumple_solver::relaxation::{apply_pin, integrate, relax_springs};
use crumple_solver::state::DeformState;
use crumple_solver::CageDeformer;
use crumple_telemetry::sinks::VecSink;
use crumple_telemetry::{EventBus, EventKind};
use crumple_types::RegionId;

fn two_vertex_state(x1: f32) -> (DeformState, EdgeGraph) {
    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    let mesh = CageMesh::from_interleaved(&positions, &[]).unwrap();
    let mut state = DeformState::from_mesh(&mesh);
    state.set_position(1, Vec3::new(x1, 0.0, 0.0));
    let graph = EdgeGraph::from_edges(vec![Edge {
        a: 0,
        b: 1,
        rest_length: 1.0,
    }]);
    (state, graph)
}

fn grid_region() -> Vec<RegionDescriptor> {
    vec![RegionDescriptor::new(
        RegionVolume::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::new(2.0, 2.0, 1.0),
        },
        TransformTag::root(1),
    )]
}

fn contact(impulse: f32, position: Vec3) -> ContactEvent {
    ContactEvent::new(
        impulse,
        vec![ContactPoint {
            position,
            normal: Vec3::Z,
            collider: TransformTag::root(1),
        }],
    )
}

// ─── Spring Relaxation Tests ──────────────────────────────────

#[test]
fn spring_force_zero_at_rest() {
    let (mut state, graph) = two_vertex_state(1.0);
    relax_springs(&mut state, &graph, 500.0, 20.0);
    assert_eq!(state.velocity(0), Vec3::ZERO);
    assert_eq!(state.velocity(1), Vec3::ZERO);
}

#[test]
fn stretched_edge_force_magnitude() {
    // Rest length 1.0, spring 500, damping 20, stretched to 1.1,
    // zero relative velocity → instantaneous force magnitude 50.
    let (mut state, graph) = two_vertex_state(1.1);
    relax_springs(&mut state, &graph, 500.0, 20.0);

    assert!((state.velocity(0).length() - 50.0).abs() < 1e-3);
    assert!((state.velocity(1).length() - 50.0).abs() < 1e-3);
    // Pull is inward: vertex 0 toward +X, vertex 1 toward -X.
    assert!(state.vel_x[0] > 0.0);
    assert!(state.vel_x[1] < 0.0);
}

#[test]
fn spring_pass_conserves_momentum() {
    let (mut state, graph) = two_vertex_state(1.3);
    state.vel_x[0] = 0.7;
    state.vel_y[1] = -0.2;
    let before = state.velocity(0) + state.velocity(1);
    relax_springs(&mut state, &graph, 500.0, 20.0);
    let after = state.velocity(0) + state.velocity(1);
    assert!((after - before).length() < 1e-4);
}

#[test]
fn damping_opposes_separation() {
    // At rest length but separating: the damping term alone should
    // produce an inward pull.
    let (mut state, graph) = two_vertex_state(1.0);
    state.vel_x[1] = 2.0; // Vertex 1 moving away
    relax_springs(&mut state, &graph, 500.0, 20.0);
    assert!(state.vel_x[1] < 2.0);
    assert!(state.vel_x[0] > 0.0);
}

#[test]
fn degenerate_current_length_skipped() {
    let (mut state, graph) = two_vertex_state(0.0); // Coincident vertices
    relax_springs(&mut state, &graph, 500.0, 20.0);
    // No NaN from dividing by a zero-length direction.
    assert!(state.velocity(0).is_finite());
    assert!(state.velocity(1).is_finite());
    assert_eq!(state.velocity(1), Vec3::ZERO);
}

// ─── Pin & Integration Tests ──────────────────────────────────

#[test]
fn pin_pulls_toward_rest() {
    let (mut state, _) = two_vertex_state(1.2);
    apply_pin(&mut state, 10.0, 0.02);
    // Vertex 1 is displaced +0.2 from rest; pin velocity points back.
    assert!(state.vel_x[1] < 0.0);
    assert_eq!(state.velocity(0), Vec3::ZERO);
}

#[test]
fn pin_targets_plastic_rest() {
    // After a plastic event moves the rest position, pinning pulls
    // toward the dented shape, not the original one.
    let (mut state, _) = two_vertex_state(1.0);
    state.set_rest_position(1, Vec3::new(1.5, 0.0, 0.0));
    apply_pin(&mut state, 10.0, 0.02);
    assert!(state.vel_x[1] > 0.0); // Toward the new rest at x=1.5
}

#[test]
fn displacement_clamped_to_max() {
    let (mut state, _) = two_vertex_state(1.0);
    state.vel_x[1] = 1000.0;
    let stats = integrate(&mut state, 0.02, 0.05);

    assert_eq!(stats.clamped, 1);
    let disp = state.displacement(1).length();
    assert!(disp <= 0.05 + 1e-5, "displacement {disp} exceeds clamp");
    // Velocity bled down by the clamp factor.
    assert!((state.vel_x[1] - 200.0).abs() < 1e-2);
}

#[test]
fn non_finite_velocity_reset() {
    let (mut state, _) = two_vertex_state(1.0);
    state.vel_x[1] = f32::NAN;
    state.vel_y[0] = f32::INFINITY;
    let stats = integrate(&mut state, 0.02, 0.05);

    assert_eq!(stats.reset_vertices, vec![0, 1]);
    assert_eq!(state.velocity(0), Vec3::ZERO);
    assert_eq!(state.velocity(1), Vec3::ZERO);
    assert!(state.position(1).is_finite());
}

// ─── Plastic Impact Tests ─────────────────────────────────────

#[test]
fn impulse_at_or_below_yield_is_elastic() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let regions = grid_region();
    let config = DeformerConfig::default();
    let map = crumple_region::RegionMap::build(&mesh, &regions, config.impact_radius);
    let mut state = DeformState::from_mesh(&mesh);
    let rest_before = state.rest_z.clone();

    let outcome = apply_contact(
        &mut state,
        &regions,
        &map,
        &config,
        &contact(100.0, Vec3::ZERO), // Exactly at yield
    );

    assert!(outcome.applied.is_empty());
    assert_eq!(state.rest_z, rest_before);
}

#[test]
fn plastic_translation_magnitude_at_contact_point() {
    // impulse 150, yield 100, plastic_scale 0.0015, t = 1 at the
    // contact point → translation = 0.0015 × 50 = 0.075 m along Z.
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let regions = grid_region();
    let config = DeformerConfig {
        enable_bend: false,
        ..Default::default()
    };
    let map = crumple_region::RegionMap::build(&mesh, &regions, config.impact_radius);
    let mut state = DeformState::from_mesh(&mesh);

    // Center vertex of the 5×5 grid sits exactly at the origin.
    let center = (0..mesh.vertex_count())
        .find(|&i| mesh.position(i).length() < 1e-6)
        .unwrap();

    let outcome = apply_contact(&mut state, &regions, &map, &config, &contact(150.0, Vec3::ZERO));

    assert_eq!(outcome.over_yield, 50.0);
    let dent = state.rest_position(center) - mesh.position(center);
    assert!((dent.z - 0.075).abs() < 1e-5, "dent {dent:?}");
    // Current position dented identically — the effect is permanent,
    // not an elastic offset.
    assert!((state.position(center) - state.rest_position(center)).length() < 1e-6);
}

#[test]
fn falloff_zero_at_radius_boundary() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let regions = grid_region();
    let config = DeformerConfig {
        impact_radius: 0.5, // Grid spacing is 0.5: neighbors sit on the boundary
        enable_bend: false,
        ..Default::default()
    };
    let map = crumple_region::RegionMap::build(&mesh, &regions, config.impact_radius);
    let mut state = DeformState::from_mesh(&mesh);

    apply_contact(&mut state, &regions, &map, &config, &contact(150.0, Vec3::ZERO));

    for i in 0..mesh.vertex_count() {
        let d = mesh.position(i).length();
        let dent = (state.rest_position(i) - mesh.position(i)).length();
        if (d - 0.5).abs() < 1e-5 {
            assert!(dent < 1e-6, "vertex on the radius boundary was dented");
        }
        if d < 1e-6 {
            assert!(dent > 1e-3, "vertex at the contact point was not dented");
        }
    }
}

#[test]
fn plastic_deformation_monotonic_in_impulse() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let regions = grid_region();
    let config = DeformerConfig {
        enable_bend: false,
        ..Default::default()
    };
    let map = crumple_region::RegionMap::build(&mesh, &regions, config.impact_radius);

    let dent_for = |impulse: f32| {
        let mut state = DeformState::from_mesh(&mesh);
        apply_contact(&mut state, &regions, &map, &config, &contact(impulse, Vec3::ZERO));
        (0..mesh.vertex_count())
            .map(|i| (state.rest_position(i) - mesh.position(i)).length())
            .fold(0.0f32, f32::max)
    };

    let low = dent_for(120.0);
    let high = dent_for(150.0);
    assert!(low > 0.0);
    assert!(high >= low, "dent should grow with impulse: {low} vs {high}");
}

#[test]
fn axis_side_flips_push_direction() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let regions = grid_region();
    let config = DeformerConfig {
        impact_radius: 3.0, // Cover the whole grid
        enable_bend: false,
        mirror_axis: Vec3::X,
        ..Default::default()
    };
    let map = crumple_region::RegionMap::build(&mesh, &regions, config.impact_radius);
    let mut state = DeformState::from_mesh(&mesh);

    apply_contact(&mut state, &regions, &map, &config, &contact(150.0, Vec3::ZERO));

    // Vertices on opposite sides of the YZ mirror plane are pushed in
    // opposite directions along the contact normal.
    let pos_side = (0..mesh.vertex_count())
        .find(|&i| mesh.position(i).x > 0.1 && mesh.position(i).y.abs() < 1e-5)
        .unwrap();
    let neg_side = (0..mesh.vertex_count())
        .find(|&i| mesh.position(i).x < -0.1 && mesh.position(i).y.abs() < 1e-5)
        .unwrap();

    let dent_pos = state.rest_position(pos_side).z - mesh.position(pos_side).z;
    let dent_neg = state.rest_position(neg_side).z - mesh.position(neg_side).z;
    assert!(dent_pos > 0.0);
    assert!(dent_neg < 0.0);
}

#[test]
fn hinge_bend_moves_perpendicular_component() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let regions = grid_region();
    let config = DeformerConfig {
        impact_radius: 3.0,
        enable_bend: true,
        max_bend_angle: 0.2,
        mirror_axis: Vec3::X,
        ..Default::default()
    };
    let map = crumple_region::RegionMap::build(&mesh, &regions, config.impact_radius);
    let mut state = DeformState::from_mesh(&mesh);

    apply_contact(&mut state, &regions, &map, &config, &contact(150.0, Vec3::ZERO));

    // A vertex off the mirror axis gains a Z component from the
    // rotation of its Y component about X.
    let v = (0..mesh.vertex_count())
        .find(|&i| mesh.position(i).y > 0.9 && mesh.position(i).x > 0.9)
        .unwrap();
    let rest = state.rest_position(v);
    assert!(rest.z.abs() > 1e-4, "bend should displace off-axis vertex, got {rest:?}");
    // X (parallel) component untouched by the bend itself; only the
    // perpendicular part rotates.
    assert!((rest.x - mesh.position(v).x).abs() < 1e-3);
}

#[test]
fn unresolvable_contact_skipped_silently() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let regions = grid_region();
    let config = DeformerConfig::default();
    let map = crumple_region::RegionMap::build(&mesh, &regions, config.impact_radius);
    let mut state = DeformState::from_mesh(&mesh);

    let event = ContactEvent::new(
        500.0,
        vec![ContactPoint {
            position: Vec3::ZERO,
            normal: Vec3::Z,
            collider: TransformTag::root(999), // Ground, not a region
        }],
    );
    let outcome = apply_contact(&mut state, &regions, &map, &config, &event);

    assert_eq!(outcome.skipped_colliders, vec![999]);
    assert!(outcome.applied.is_empty());
    let dented = (0..mesh.vertex_count())
        .any(|i| (state.rest_position(i) - mesh.position(i)).length() > 1e-7);
    assert!(!dented);
}

#[test]
fn affected_velocities_damped() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let regions = grid_region();
    let config = DeformerConfig {
        enable_bend: false,
        ..Default::default()
    };
    let map = crumple_region::RegionMap::build(&mesh, &regions, config.impact_radius);
    let mut state = DeformState::from_mesh(&mesh);

    let center = (0..mesh.vertex_count())
        .find(|&i| mesh.position(i).length() < 1e-6)
        .unwrap();
    state.vel_x[center] = 4.0;

    apply_contact(&mut state, &regions, &map, &config, &contact(150.0, Vec3::ZERO));
    assert!((state.vel_x[center] - 1.0).abs() < 1e-5); // ×0.25
}

// ─── CageDeformer Tests ───────────────────────────────────────

#[test]
fn deformer_rejects_empty_region_list() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let result = CageDeformer::new(mesh, vec![], DeformerConfig::default());
    assert!(result.is_err());
}

#[test]
fn deformer_rejects_invalid_config() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let config = DeformerConfig {
        impact_radius: -1.0,
        ..Default::default()
    };
    assert!(CageDeformer::new(mesh, grid_region(), config).is_err());
}

#[test]
fn telemetry_reports_plastic_impact() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let mut deformer = CageDeformer::new(mesh, grid_region(), DeformerConfig::default())
        .unwrap()
        .with_telemetry(bus);

    deformer.on_contact(&contact(150.0, Vec3::ZERO));
    deformer.step_fixed(0.02);

    let events = log.lock().unwrap();
    assert!(events.iter().any(|e| matches!(
        e.kind,
        EventKind::PlasticImpact { region, .. } if region == RegionId(0)
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e.kind, EventKind::StepEnd { .. })));
}

#[test]
fn step_is_stable_at_rest() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let mut deformer = CageDeformer::new(mesh, grid_region(), DeformerConfig::default()).unwrap();

    for _ in 0..50 {
        deformer.step_fixed(0.02);
    }
    // An undisturbed cage stays at its rest shape.
    assert!(deformer.state().max_displacement() < 1e-4);
    assert_eq!(deformer.step_count(), 50);
}

#[test]
fn displacement_invariant_holds_across_steps() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let config = DeformerConfig::default();
    let max = config.max_vertex_displacement;
    let mut deformer = CageDeformer::new(mesh, grid_region(), config).unwrap();

    deformer.on_contact(&contact(400.0, Vec3::ZERO));
    for _ in 0..20 {
        deformer.step_fixed(0.02);
        assert!(
            deformer.state().max_displacement() <= max + 1e-4,
            "elastic clamp violated at step {}",
            deformer.step_count()
        );
    }
}

#[test]
fn dent_persists_through_relaxation() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let original = mesh.clone();
    let config = DeformerConfig {
        enable_bend: false,
        ..Default::default()
    };
    let mut deformer = CageDeformer::new(mesh, grid_region(), config).unwrap();

    deformer.on_contact(&contact(150.0, Vec3::ZERO));
    for _ in 0..100 {
        deformer.step_fixed(0.02);
    }

    let center = (0..original.vertex_count())
        .find(|&i| original.position(i).length() < 1e-6)
        .unwrap();

    // The rest shape keeps the full 0.075 m dent — relaxation never
    // touches rest positions.
    let rest_dent = deformer.state().rest_position(center).z - original.position(center).z;
    assert!((rest_dent - 0.075).abs() < 1e-5, "rest dent {rest_dent}");

    // The published mesh keeps a persistent dent too. Edge rest
    // lengths are immutable, so the springs pull partway back toward
    // the flat shape; the elastic clamp bounds that pull-back at
    // max_vertex_displacement (0.05), leaving at least ~0.025 m.
    let dent = deformer.mesh().position(center).z - original.position(center).z;
    assert!(dent > 0.015, "published dent {dent} should persist");
}

#[test]
fn step_publishes_normals_and_bounds() {
    let mesh = quad_grid(4, 4, 2.0, 2.0);
    let config = DeformerConfig {
        enable_bend: false,
        ..Default::default()
    };
    let mut deformer = CageDeformer::new(mesh, grid_region(), config).unwrap();

    deformer.on_contact(&contact(300.0, Vec3::ZERO));
    deformer.step_fixed(0.02);

    // Bounds extend past the flat plane once the dent appears.
    assert!(deformer.mesh().bounds.max.z > 1e-4);
    // Normals renormalized after the dent.
    for i in 0..deformer.mesh().vertex_count() {
        assert!((deformer.mesh().normal(i).length() - 1.0).abs() < 1e-3);
    }
}

#[test]
fn zero_dt_step_is_noop() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let mut deformer = CageDeformer::new(mesh, grid_region(), DeformerConfig::default()).unwrap();
    deformer.step_fixed(0.0);
    assert_eq!(deformer.step_count(), 0);
}

#[test]
fn rebuild_regions_requires_non_empty_list() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    let mut deformer =
        CageDeformer::new(mesh, grid_region(), DeformerConfig::default()).unwrap();
    assert!(deformer.rebuild_regions(vec![]).is_err());
    assert!(deformer.rebuild_regions(grid_region()).is_ok());
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn config_toml_roundtrip() {
    let config = DeformerConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let recovered: DeformerConfig = toml::from_str(&toml_str).unwrap();
    assert_eq!(recovered.plastic_yield, config.plastic_yield);
    assert_eq!(recovered.relax_iterations, config.relax_iterations);
    assert_eq!(recovered.mirror_axis, config.mirror_axis);
}

#[test]
fn config_validation_errors() {
    let bad_axis = DeformerConfig {
        mirror_axis: Vec3::ZERO,
        ..Default::default()
    };
    assert!(bad_axis.validate().is_err());

    let zero_iterations = DeformerConfig {
        relax_iterations: 0,
        ..Default::default()
    };
    assert!(zero_iterations.validate().is_err());
}
