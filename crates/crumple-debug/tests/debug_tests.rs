//! Integration tests for crumple-debug.

use crumple_debug::StateSnapshot;

fn sample_snapshot() -> StateSnapshot {
    let rest_x = [0.0, 1.0, 2.0];
    let rest_y = [0.0, 0.0, 0.0];
    let rest_z = [0.0, 0.0, 0.0];
    // Vertex 1 dented at rest (plastic), vertex 2 only displaced live.
    let pos_x = [0.0, 1.0, 2.0];
    let pos_y = [0.0, 0.0, 0.1];
    let pos_z = [0.0, 0.0, 0.0];
    let vel = [0.0f32; 3];

    let mut snap = StateSnapshot::from_soa(
        7,
        0.14,
        [&rest_x, &rest_y, &rest_z],
        [&pos_x, &pos_y, &pos_z],
        [&vel, &vel, &vel],
    );
    // Plastic dent on vertex 1: rest z moved by -0.05.
    snap.rest_positions[5] = -0.05;
    snap.positions[5] = -0.05;
    snap
}

// ─── Snapshot Tests ───────────────────────────────────────────

#[test]
fn snapshot_round_trip() {
    let snap = sample_snapshot();
    let bytes = snap.to_bytes().unwrap();
    let recovered = StateSnapshot::from_bytes(&bytes).unwrap();

    assert_eq!(recovered.step, 7);
    assert_eq!(recovered.vertex_count, 3);
    assert!((recovered.sim_time - 0.14).abs() < 1e-10);
    assert_eq!(recovered.positions, snap.positions);
    assert_eq!(recovered.rest_positions, snap.rest_positions);
    assert_eq!(recovered.velocities, snap.velocities);
}

#[test]
fn snapshot_interleaving() {
    let pos_x = [1.0, 2.0];
    let pos_y = [3.0, 4.0];
    let pos_z = [5.0, 6.0];
    let zero = [0.0f32; 2];
    let snap = StateSnapshot::from_soa(
        0,
        0.0,
        [&zero, &zero, &zero],
        [&pos_x, &pos_y, &pos_z],
        [&zero, &zero, &zero],
    );
    assert_eq!(snap.positions, vec![1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);
}

#[test]
fn from_bytes_rejects_garbage() {
    assert!(StateSnapshot::from_bytes(&[0xde, 0xad]).is_err());
}

// ─── Dent Report Tests ────────────────────────────────────────

#[test]
fn dent_report_separates_plastic_from_elastic() {
    let snap = sample_snapshot();
    let original = vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        2.0, 0.0, 0.0,
    ];
    let report = snap.dent_report(&original, 0.01);

    // Vertex 1's rest moved (plastic); vertex 2 only sags live.
    assert_eq!(report.dented_vertices, 1);
    assert!((report.max_elastic - 0.1).abs() < 1e-6);
}

#[test]
fn elastic_displacement_per_vertex() {
    let snap = sample_snapshot();
    assert!(snap.elastic_displacement(0).abs() < 1e-6);
    assert!(snap.elastic_displacement(1).abs() < 1e-6);
    assert!((snap.elastic_displacement(2) - 0.1).abs() < 1e-6);
}
