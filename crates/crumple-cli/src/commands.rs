//! CLI command implementations.

use crumple_debug::StateSnapshot;
use crumple_joint::{CageBone, CageDriver, CageDriverConfig, CageSkeleton, LinkDescriptor, LinkFeedback};
use crumple_math::{Quat, Vec3};
use crumple_mesh::generators::quad_grid;
use crumple_region::{ContactEvent, ContactPoint, RegionDescriptor, RegionVolume, TransformTag};
use crumple_solver::{CageDeformer, DeformerConfig};

use crumple_types::constants::DEFAULT_FIXED_DT;

/// Run a built-in demo scenario.
pub fn demo(scenario: &str, output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    match scenario {
        "impact_panel" => impact_panel(output),
        "joint_cage" => joint_cage(output),
        other => {
            eprintln!("Unknown scenario: {other}");
            eprintln!("Available: impact_panel, joint_cage");
            Err("Unknown scenario".into())
        }
    }
}

/// A 9×9 panel takes one over-yield hit at its center, then relaxes.
fn impact_panel(output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crumple Demo — impact_panel");
    println!("───────────────────────────");

    let mesh = quad_grid(8, 8, 2.0, 2.0);
    let original: Vec<f32> = (0..mesh.vertex_count())
        .flat_map(|i| {
            let p = mesh.position(i);
            [p.x, p.y, p.z]
        })
        .collect();

    let regions = vec![RegionDescriptor::new(
        RegionVolume::Box {
            center: Vec3::ZERO,
            half_extents: Vec3::new(2.0, 2.0, 1.0),
        },
        TransformTag::root(1),
    )];
    let config = DeformerConfig::default();
    let mut deformer = CageDeformer::new(mesh, regions, config)?;

    println!(
        "Panel: {} verts, {} tris",
        deformer.mesh().vertex_count(),
        deformer.mesh().triangle_count()
    );

    let hit = ContactEvent::new(
        150.0,
        vec![ContactPoint {
            position: Vec3::ZERO,
            normal: Vec3::Z,
            collider: TransformTag::root(1),
        }],
    );
    deformer.on_contact(&hit);
    println!("Impact: impulse {:.1} at panel center", hit.impulse);

    let steps = 30;
    for _ in 0..steps {
        deformer.step_fixed(DEFAULT_FIXED_DT);
    }

    let state = deformer.state();
    let snapshot = StateSnapshot::from_soa(
        deformer.step_count(),
        deformer.step_count() as f64 * DEFAULT_FIXED_DT as f64,
        [&state.rest_x, &state.rest_y, &state.rest_z],
        [&state.pos_x, &state.pos_y, &state.pos_z],
        [&state.vel_x, &state.vel_y, &state.vel_z],
    );
    let report = snapshot.dent_report(&original, 0.001);

    println!();
    println!("After {steps} steps:");
    println!("  Dented vertices: {}", report.dented_vertices);
    println!("  Max elastic sag: {:.4}m", report.max_elastic);
    println!("  Max displacement: {:.4}m", state.max_displacement());

    if let Some(path) = output {
        std::fs::write(path, snapshot.to_bytes()?)?;
        println!("Snapshot written to: {path}");
    }

    Ok(())
}

/// A two-bone cage under sustained joint stress, auto-baking dents.
fn joint_cage(output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crumple Demo — joint_cage");
    println!("─────────────────────────");

    let skeleton = CageSkeleton::new(vec![
        CageBone::root("hull", Vec3::ZERO, Quat::IDENTITY),
        CageBone::child("panel", 0, Vec3::X, Quat::IDENTITY),
    ])?;
    let links = vec![
        LinkDescriptor {
            bone: 0,
            base_anchor: Vec3::ZERO,
            follow_position: true,
        },
        LinkDescriptor {
            bone: 1,
            base_anchor: Vec3::ZERO,
            follow_position: true,
        },
    ];
    let config = CageDriverConfig {
        auto_bake_threshold: 0.01,
        auto_bake_debounce: 0.2,
        max_plastic_offset: 0.0,
        ..CageDriverConfig::default()
    };
    let mut driver = CageDriver::new(skeleton, &links, config)?;

    println!("Cage: {} bones, {} links", driver.skeleton().len(), driver.links().len());

    // Push the second link's body anchor outward for the first half
    // of the run, then let the cage settle.
    let steps = 50;
    for step in 0..steps {
        let push = if step < steps / 2 { 0.008 } else { 0.0 };
        let feedback: Vec<LinkFeedback> = driver
            .links()
            .iter()
            .enumerate()
            .map(|(i, link)| LinkFeedback {
                body_anchor_world: link.anchor_world()
                    + if i == 1 { Vec3::new(push, 0.0, 0.0) } else { Vec3::ZERO },
                joint_force: 0.0,
            })
            .collect();
        driver.step_fixed(DEFAULT_FIXED_DT, &feedback)?;
    }

    println!();
    println!("After {steps} steps:");
    println!("  Bakes: {}", driver.bake_count());
    println!("  Residual dent: {:.4}m", driver.max_dent());
    for i in 0..driver.skeleton().len() {
        let bone = driver.skeleton().bone(i);
        println!(
            "  Bone '{}': local ({:.4}, {:.4}, {:.4})",
            bone.name, bone.local_position.x, bone.local_position.y, bone.local_position.z
        );
    }

    if output.is_some() {
        println!("Note: snapshots capture vertex state; joint_cage has none to write.");
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crumple Snapshot Inspector");
    println!("──────────────────────────");

    let data = std::fs::read(path)?;
    let snapshot = StateSnapshot::from_bytes(&data)?;

    println!("Step:        {}", snapshot.step);
    println!("Sim time:    {:.4}s", snapshot.sim_time);
    println!("Vertices:    {}", snapshot.vertex_count);

    if snapshot.vertex_count > 0 {
        let max_elastic = (0..snapshot.vertex_count)
            .map(|i| snapshot.elastic_displacement(i))
            .fold(0.0f32, f32::max);
        let min_z = snapshot
            .positions
            .iter()
            .skip(2)
            .step_by(3)
            .fold(f32::INFINITY, |a, &v| a.min(v));
        let max_z = snapshot
            .positions
            .iter()
            .skip(2)
            .step_by(3)
            .fold(f32::NEG_INFINITY, |a, &v| a.max(v));
        println!("Max elastic: {:.4}m", max_elastic);
        println!("Z range:     [{:.4}, {:.4}]", min_z, max_z);
    }

    Ok(())
}

/// Validate a mesh or config file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crumple Validator");
    println!("─────────────────");

    if path.ends_with(".toml") {
        let content = std::fs::read_to_string(path)?;
        if let Ok(config) = toml::from_str::<DeformerConfig>(&content) {
            config.validate()?;
            println!("✅ Deformer config is valid.");
        } else {
            let config: CageDriverConfig = toml::from_str(&content)?;
            config.validate()?;
            println!("✅ Cage driver config is valid.");
        }
    } else if path.ends_with(".json") {
        let content = std::fs::read_to_string(path)?;
        let mesh: crumple_mesh::CageMesh = serde_json::from_str(&content)?;
        mesh.validate()?;
        println!(
            "✅ Mesh is valid ({} verts, {} tris).",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
    } else {
        return Err("Unsupported file format. Use .toml (config) or .json (mesh).".into());
    }

    Ok(())
}
