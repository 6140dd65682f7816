//! Headless run of the stock intro.
//!
//! Builds a procedural flag and a mascot skeleton, hands them to the
//! director and steps 16 seconds of choreography at a fixed 60 Hz,
//! printing phase milestones as they pass. No window, no GPU: geometry
//! upload flags are drained the way a renderer would.

use glam::Vec3;
use pennant::{
    Director, FlagConfig, MascotConfig, Material, Mesh, PlaneOptions, PlayState, Scene, Timer,
    create_plane,
};

fn main() {
    env_logger::init();

    // 1. Build the scene: a two-surface flag and a four-legged mascot
    let mut scene = Scene::new();
    build_flag(&mut scene);
    build_mascot(&mut scene);

    // 2. Resolve rigs and arm the intro
    let mut director = Director::new(scene, FlagConfig::default(), MascotConfig::default());

    // 3. Step the choreography on a synthetic 60 Hz clock
    let mut wall = Timer::new();
    let mut uploads = 0usize;
    let mut was_interactive = false;
    let mut last_legs = director.stage().legs_state();

    for frame in 0..=960u32 {
        let t = frame as f32 / 60.0;
        director.tick(t);

        // Drain upload flags the way a renderer would
        for (_, mesh) in &mut director.scene_mut().meshes {
            if mesh.geometry.take_needs_upload() {
                uploads += 1;
            }
        }

        let legs = director.stage().legs_state();
        if legs != last_legs {
            println!("t = {t:5.2}s  gait {last_legs:?} -> {legs:?}");
            last_legs = legs;
        }

        if director.interactive() && !was_interactive {
            was_interactive = true;
            println!("t = {t:5.2}s  wave envelope released to host input");
        }

        // Once interactive, fake a second of host-driven waving
        if was_interactive && (720..780).contains(&frame) {
            director.stage_mut().wave.amplitude = 1.2;
        } else if was_interactive && frame == 780 {
            director.stage_mut().wave.amplitude = 0.0;
        }
    }
    wall.tick();

    // 4. Report where everything landed
    let stage = director.stage();
    if let Some(state) = &stage.mascot {
        if let Some(root) = stage.scene.get_node(state.rig.root) {
            let p = root.transform.position;
            println!("mascot root rests at ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
        }
        if let Some(neck) = state.rig.neck
            && let Some(node) = stage.scene.get_node(neck)
        {
            let (axis, angle) = node.transform.rotation.to_axis_angle();
            println!(
                "neck settled at {:.1} deg about ({:.1}, {:.1}, {:.1})",
                angle.to_degrees(),
                axis.x,
                axis.y,
                axis.z
            );
        }
    }
    if let Some(rig) = &stage.flag {
        for target in rig.targets.iter() {
            if let Some(mesh) = stage.scene.meshes.get(target.mesh) {
                let intensity = mesh
                    .material
                    .and_then(|key| stage.scene.get_material(key))
                    .map_or(1.0, |m| m.emissive_intensity);
                println!(
                    "surface '{}': {} vertices, emissive intensity {:.2}",
                    mesh.name,
                    mesh.geometry.vertex_count(),
                    intensity
                );
            }
        }
    }
    println!(
        "simulated 16.0s in {:.1} ms, {} vertex buffer uploads",
        wall.dt_seconds() * 1000.0,
        uploads
    );

    assert_eq!(last_legs, PlayState::Paused, "gait should freeze after the walk");
}

/// A flag group with a large cloth sheet and a narrow trim strip, both
/// spanning x in [-2, 2] so the anchored edge sits at x = -2.
fn build_flag(scene: &mut Scene) {
    let cloth_material = scene.add_material(Material::new("flag_cloth"));
    let trim_material = scene.add_material(
        Material::new("flag_trim").with_base_color(glam::Vec4::new(0.85, 0.2, 0.15, 1.0)),
    );

    let group = scene.build_node("flag").with_position(0.0, 2.0, 0.0).build();

    let cloth = Mesh::new(
        "cloth",
        create_plane(PlaneOptions {
            width: 4.0,
            height: 2.5,
            width_segments: 24,
            height_segments: 12,
        }),
    )
    .with_material(cloth_material);
    scene.add_mesh_to_parent(cloth, group);

    let trim = Mesh::new(
        "trim",
        create_plane(PlaneOptions {
            width: 4.0,
            height: 0.3,
            width_segments: 24,
            height_segments: 1,
        }),
    )
    .with_material(trim_material);
    let trim_node = scene.add_mesh_to_parent(trim, group);
    if let Some(node) = scene.get_node_mut(trim_node) {
        node.transform.position = Vec3::new(0.0, -1.4, 0.0);
    }
}

/// A mascot skeleton: root, body, four legs and a neck. Joints only;
/// the intro drives transforms, not geometry.
fn build_mascot(scene: &mut Scene) {
    let root = scene
        .build_node("mascot")
        .with_position(-1.5, 0.0, 1.2)
        .build();
    let body = scene.build_node("body").with_parent(root).build();

    for (name, x, z) in [
        ("front_left_leg", 0.4, 0.3),
        ("front_right_leg", 0.4, -0.3),
        ("rear_left_leg", -0.4, 0.3),
        ("rear_right_leg", -0.4, -0.3),
    ] {
        scene
            .build_node(name)
            .with_parent(body)
            .with_position(x, 0.5, z)
            .build();
    }

    scene
        .build_node("neck")
        .with_parent(body)
        .with_position(0.6, 1.0, 0.0)
        .build();
}
