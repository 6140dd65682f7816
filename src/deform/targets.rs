use smallvec::SmallVec;

use crate::deform::ripple::Ripple;
use crate::errors::{Result, SetupError};
use crate::scene::{MeshKey, NodeHandle, Scene};

/// Maximum number of surfaces the deformation pass drives.
pub const MAX_TARGETS: usize = 5;

/// Emissive intensity forced onto highlighted cloth materials.
pub const EMISSIVE_BOOST: f32 = 5.6;

/// One surface registered for deformation.
///
/// Holds the mesh key and an immutable snapshot of the rest positions
/// taken at classification time. Displacement always starts from the
/// snapshot, never from the previous frame's output.
#[derive(Debug, Clone)]
pub struct DeformTarget {
    /// The mesh this target drives.
    pub mesh: MeshKey,
    rest: Vec<glam::Vec3>,
}

impl DeformTarget {
    /// The rest-position snapshot captured at classification.
    #[must_use]
    pub fn rest(&self) -> &[glam::Vec3] {
        &self.rest
    }
}

/// The ranked set of deformable surfaces under one group node.
#[derive(Debug, Clone, Default)]
pub struct DeformTargets {
    targets: SmallVec<[DeformTarget; MAX_TARGETS]>,
}

impl DeformTargets {
    /// Scans a group subtree and registers its meshes for deformation.
    ///
    /// Meshes are ranked by vertex count, largest first; ties keep
    /// their depth-first discovery order. At most [`MAX_TARGETS`]
    /// surfaces are kept. Each kept mesh gets fresh smooth normals and
    /// a rest-position snapshot.
    ///
    /// As a side effect, every material in the group named
    /// `brighten_material` is forced to full white with emissive
    /// intensity [`EMISSIVE_BOOST`], so the cloth reads as lit from
    /// within.
    ///
    /// Fails with [`SetupError::TooFewSurfaces`] when the group holds
    /// fewer than 2 meshes; in that case the scene is left untouched.
    pub fn classify(
        scene: &mut Scene,
        group: NodeHandle,
        group_name: &str,
        brighten_material: &str,
    ) -> Result<Self> {
        let found = scene.collect_meshes(group);
        if found.len() < 2 {
            return Err(SetupError::TooFewSurfaces {
                group: group_name.to_string(),
                found: found.len(),
            });
        }

        // Brighten matching materials across the whole group, including
        // meshes that fall outside the target cap.
        for &(_, mesh_key) in &found {
            let material_key = scene.meshes.get(mesh_key).and_then(|m| m.material);
            if let Some(key) = material_key
                && let Some(material) = scene.materials.get_mut(key)
                && material.name == brighten_material
            {
                material.base_color = glam::Vec4::ONE;
                material.emissive = glam::Vec3::ONE;
                material.emissive_intensity = EMISSIVE_BOOST;
            }
        }

        // Rank by vertex count, largest first. The sort is stable, so
        // equal counts keep their discovery order.
        let mut ranked: Vec<(MeshKey, usize)> = found
            .iter()
            .map(|&(_, mesh_key)| {
                let count = scene
                    .meshes
                    .get(mesh_key)
                    .map_or(0, |m| m.geometry.vertex_count());
                (mesh_key, count)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(MAX_TARGETS);

        let mut targets = SmallVec::new();
        for (mesh_key, _) in ranked {
            if let Some(mesh) = scene.meshes.get_mut(mesh_key) {
                mesh.geometry.compute_vertex_normals();
                targets.push(DeformTarget {
                    mesh: mesh_key,
                    rest: mesh.geometry.positions().to_vec(),
                });
            }
        }

        log::info!(
            "classified {} deformable surface(s) under group '{}'",
            targets.len(),
            group_name
        );

        Ok(Self { targets })
    }

    /// Rewrites every target's positions from its rest snapshot.
    ///
    /// With `amplitude <= 0` the pass is a no-op: no mesh is touched
    /// and no upload flag is raised. A target whose mesh has vanished,
    /// or whose vertex count no longer matches its snapshot, is skipped
    /// for the frame.
    pub fn apply(&self, scene: &mut Scene, ripple: &Ripple, time: f32, amplitude: f32) {
        if amplitude <= 0.0 {
            return;
        }

        for target in &self.targets {
            let Some(mesh) = scene.meshes.get_mut(target.mesh) else {
                continue;
            };
            let positions = mesh.geometry.positions_mut();
            if positions.len() != target.rest.len() {
                log::debug!("deform target vertex count changed since classification; skipping");
                continue;
            }

            for (pos, rest) in positions.iter_mut().zip(&target.rest) {
                *pos = ripple.displace(*rest, time, amplitude);
            }
            mesh.geometry.mark_needs_upload();
        }
    }

    #[must_use]
    pub fn targets(&self) -> &[DeformTarget] {
        &self.targets
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeformTarget> {
        self.targets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
