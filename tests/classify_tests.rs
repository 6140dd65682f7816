//! Surface Classification Tests
//!
//! Tests for:
//! - DeformTargets::classify ranking, tie stability and the target cap
//! - Material brightening side effect and its scoping
//! - Rest-position snapshots and normal refresh
//! - DeformTargets::apply rewrite semantics and stale-target handling
//! - SetupError display formatting

use glam::{Vec3, Vec4};

use pennant::scene::{MaterialKey, NodeHandle};
use pennant::{
    DeformTargets, EMISSIVE_BOOST, MAX_TARGETS, Material, Mesh, PlaneOptions, Ripple, Scene,
    SetupError, create_plane,
};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn plane_mesh(name: &str, segments: u32, material: MaterialKey) -> Mesh {
    Mesh::new(
        name,
        create_plane(PlaneOptions {
            width: 4.0,
            height: 2.0,
            width_segments: segments,
            height_segments: segments,
        }),
    )
    .with_material(material)
}

/// A "flag" group holding one plane mesh per entry, all sharing a
/// material named `flag_cloth`. Segment counts control vertex counts:
/// a plane with `s` segments has `(s + 1)^2` vertices.
fn cloth_group(sizes: &[(&str, u32)]) -> (Scene, NodeHandle) {
    let mut scene = Scene::new();
    let material = scene.add_material(Material::new("flag_cloth"));
    let group = scene.build_node("flag").build();
    for &(name, segments) in sizes {
        let mesh = plane_mesh(name, segments, material);
        scene.add_mesh_to_parent(mesh, group);
    }
    (scene, group)
}

fn classify(scene: &mut Scene, group: NodeHandle) -> DeformTargets {
    DeformTargets::classify(scene, group, "flag", "flag_cloth").unwrap()
}

fn target_names(scene: &Scene, targets: &DeformTargets) -> Vec<String> {
    targets
        .iter()
        .map(|t| scene.meshes.get(t.mesh).unwrap().name.clone())
        .collect()
}

fn drain_upload_flags(scene: &mut Scene) {
    for (_, mesh) in &mut scene.meshes {
        mesh.geometry.take_needs_upload();
    }
}

// ============================================================================
// Classification: Ranking
// ============================================================================

#[test]
fn classify_ranks_largest_first() {
    let (mut scene, group) = cloth_group(&[("small", 2), ("big", 8), ("mid", 4)]);
    let targets = classify(&mut scene, group);

    assert_eq!(target_names(&scene, &targets), vec!["big", "mid", "small"]);
    assert_eq!(targets.targets()[0].rest().len(), 81);
    assert_eq!(targets.targets()[2].rest().len(), 9);
}

#[test]
fn classify_keeps_discovery_order_on_ties() {
    let (mut scene, group) = cloth_group(&[("first", 3), ("second", 3), ("big", 6)]);
    let targets = classify(&mut scene, group);

    assert_eq!(
        target_names(&scene, &targets),
        vec!["big", "first", "second"],
        "Equal vertex counts keep depth-first discovery order"
    );
}

#[test]
fn classify_caps_target_count() {
    let (mut scene, group) = cloth_group(&[
        ("m0", 7),
        ("m1", 6),
        ("m2", 5),
        ("m3", 4),
        ("m4", 3),
        ("m5", 2),
    ]);
    let targets = classify(&mut scene, group);

    assert_eq!(targets.len(), MAX_TARGETS);
    assert!(
        !target_names(&scene, &targets).contains(&"m5".to_string()),
        "The smallest surface falls off the ranking"
    );
}

#[test]
fn classify_requires_two_surfaces() {
    let (mut scene, group) = cloth_group(&[("only", 4)]);
    let err = DeformTargets::classify(&mut scene, group, "flag", "flag_cloth").unwrap_err();

    assert_eq!(
        err,
        SetupError::TooFewSurfaces {
            group: "flag".to_string(),
            found: 1,
        }
    );

    // Failed classification leaves the scene untouched
    let (_, material) = scene.materials.iter().next().unwrap();
    assert!(
        approx(material.emissive_intensity, 1.0),
        "Material must not be brightened on failure"
    );
}

#[test]
fn classify_empty_group_reports_zero() {
    let mut scene = Scene::new();
    let group = scene.build_node("flag").build();

    let err = DeformTargets::classify(&mut scene, group, "flag", "flag_cloth").unwrap_err();
    assert_eq!(
        err,
        SetupError::TooFewSurfaces {
            group: "flag".to_string(),
            found: 0,
        }
    );
}

// ============================================================================
// Classification: Side Effects
// ============================================================================

#[test]
fn classify_brightens_matching_materials_only() {
    let mut scene = Scene::new();
    let cloth = scene.add_material(Material::new("flag_cloth"));
    let pole = scene.add_material(
        Material::new("banner_pole").with_base_color(Vec4::new(0.3, 0.2, 0.1, 1.0)),
    );
    let group = scene.build_node("flag").build();
    scene.add_mesh_to_parent(plane_mesh("a", 4, cloth), group);
    scene.add_mesh_to_parent(plane_mesh("b", 3, cloth), group);
    scene.add_mesh_to_parent(plane_mesh("c", 2, pole), group);

    classify(&mut scene, group);

    let cloth_mat = scene.get_material(cloth).unwrap();
    assert_eq!(cloth_mat.base_color, Vec4::ONE);
    assert_eq!(cloth_mat.emissive, Vec3::ONE);
    assert!(approx(cloth_mat.emissive_intensity, EMISSIVE_BOOST));

    let pole_mat = scene.get_material(pole).unwrap();
    assert_eq!(pole_mat.base_color, Vec4::new(0.3, 0.2, 0.1, 1.0));
    assert!(
        approx(pole_mat.emissive_intensity, 1.0),
        "Non-matching materials stay as authored"
    );
}

#[test]
fn classify_snapshots_rest_positions() {
    let (mut scene, group) = cloth_group(&[("a", 4), ("b", 2)]);
    let targets = classify(&mut scene, group);

    let key = targets.targets()[0].mesh;
    let before = targets.targets()[0].rest().to_vec();
    assert_eq!(
        scene.meshes.get(key).unwrap().geometry.positions(),
        &before[..]
    );

    // Mutating the live geometry must not touch the snapshot
    scene.meshes.get_mut(key).unwrap().geometry.positions_mut()[0].y = 99.0;
    assert!(approx(targets.targets()[0].rest()[0].y, before[0].y));
}

#[test]
fn classify_refreshes_normals() {
    let (mut scene, group) = cloth_group(&[("a", 4), ("b", 2)]);
    let targets = classify(&mut scene, group);

    for target in targets.iter() {
        let mesh = scene.meshes.get(target.mesh).unwrap();
        for normal in mesh.geometry.normals() {
            assert!(
                approx(normal.z, 1.0) && approx(normal.x, 0.0) && approx(normal.y, 0.0),
                "flat plane normals face +Z, got {normal:?}"
            );
        }
    }
}

// ============================================================================
// Apply: Rewrite Semantics
// ============================================================================

#[test]
fn apply_zero_amplitude_is_noop() {
    let (mut scene, group) = cloth_group(&[("a", 4), ("b", 2)]);
    let targets = classify(&mut scene, group);
    drain_upload_flags(&mut scene);

    let key = targets.targets()[0].mesh;
    let before = scene.meshes.get(key).unwrap().geometry.positions().to_vec();

    targets.apply(&mut scene, &Ripple::default(), 1.0, 0.0);

    let mesh = scene.meshes.get(key).unwrap();
    assert_eq!(mesh.geometry.positions(), &before[..]);
    assert!(
        !mesh.geometry.needs_upload(),
        "Zero amplitude must not raise the upload flag"
    );
}

#[test]
fn apply_rewrites_from_rest_snapshot() {
    let (mut scene, group) = cloth_group(&[("a", 4), ("b", 2)]);
    let targets = classify(&mut scene, group);
    drain_upload_flags(&mut scene);

    let ripple = Ripple::default();
    targets.apply(&mut scene, &ripple, 0.7, 1.5);

    for target in targets.iter() {
        let mesh = scene.meshes.get(target.mesh).unwrap();
        assert!(mesh.geometry.needs_upload(), "Displacement raises the flag");
        for (pos, rest) in mesh.geometry.positions().iter().zip(target.rest()) {
            let expected = ripple.displace(*rest, 0.7, 1.5);
            assert!(
                approx(pos.y, expected.y) && approx(pos.z, expected.z),
                "expected {expected:?}, got {pos:?}"
            );
        }
    }

    // A later frame starts from the snapshot again, so displacement
    // never compounds
    targets.apply(&mut scene, &ripple, 2.0, 1.5);
    for target in targets.iter() {
        let mesh = scene.meshes.get(target.mesh).unwrap();
        for (pos, rest) in mesh.geometry.positions().iter().zip(target.rest()) {
            let expected = ripple.displace(*rest, 2.0, 1.5);
            assert!(
                approx(pos.y, expected.y),
                "expected {expected:?}, got {pos:?}"
            );
        }
    }
}

#[test]
fn apply_skips_mesh_with_changed_vertex_count() {
    let (mut scene, group) = cloth_group(&[("a", 4), ("b", 2)]);
    let targets = classify(&mut scene, group);

    // Swap the smaller mesh's geometry for one with a different vertex
    // count, so its snapshot goes stale
    let stale_key = targets.targets()[1].mesh;
    scene.meshes.get_mut(stale_key).unwrap().geometry = create_plane(PlaneOptions::default());
    drain_upload_flags(&mut scene);

    let ripple = Ripple::default();
    targets.apply(&mut scene, &ripple, 1.0, 2.0);

    let stale = scene.meshes.get(stale_key).unwrap();
    assert!(
        !stale.geometry.needs_upload(),
        "Stale target must be skipped untouched"
    );

    let live = scene.meshes.get(targets.targets()[0].mesh).unwrap();
    assert!(live.geometry.needs_upload(), "Other targets still deform");
}

#[test]
fn apply_survives_removed_mesh() {
    let (mut scene, group) = cloth_group(&[("a", 4), ("b", 2)]);
    let targets = classify(&mut scene, group);

    // Removing the node drops its mesh from the pool
    let node = scene.find_node("b").unwrap();
    scene.remove_node(node);
    assert!(scene.meshes.get(targets.targets()[1].mesh).is_none());

    targets.apply(&mut scene, &Ripple::default(), 1.0, 2.0);

    let live = scene.meshes.get(targets.targets()[0].mesh).unwrap();
    assert!(live.geometry.needs_upload(), "Survivors still deform");
}

// ============================================================================
// Constants & Error Formatting
// ============================================================================

#[test]
fn classification_constants() {
    assert_eq!(MAX_TARGETS, 5);
    assert!(approx(EMISSIVE_BOOST, 5.6));
}

#[test]
fn setup_error_display() {
    let err = SetupError::NodeNotFound {
        name: "flag".to_string(),
    };
    assert_eq!(err.to_string(), "Node not found: flag");

    let err = SetupError::TooFewSurfaces {
        group: "flag".to_string(),
        found: 1,
    };
    assert_eq!(
        err.to_string(),
        "Surface group 'flag' has too few meshes: found 1, need at least 2"
    );

    let err = SetupError::JointNotFound {
        name: "front_left_leg".to_string(),
    };
    assert_eq!(err.to_string(), "Joint not found: front_left_leg");
}
