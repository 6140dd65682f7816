//! Rig resolution.
//!
//! Turns the name-based [`FlagConfig`] / [`MascotConfig`] descriptions
//! into handle-based rigs, resolving every name exactly once at setup.
//! Per-frame callbacks then work purely with handles.

use glam::Quat;
use rustc_hash::FxHashMap;

use crate::choreo::config::{FlagConfig, LegJoint, LegPose, MascotConfig, Side};
use crate::deform::DeformTargets;
use crate::errors::{Result, SetupError};
use crate::scene::{NodeHandle, Scene};

/// The resolved flag: its group node, the classified surfaces and the
/// orientation it had before the intro touched it.
#[derive(Debug, Clone)]
pub struct FlagRig {
    /// Group node the spin rotates.
    pub node: NodeHandle,
    /// Ranked deformable surfaces under the group.
    pub targets: DeformTargets,
    /// Group orientation captured at setup. The spin composes on top
    /// of this, so a pre-rotated flag keeps its mounting.
    pub base_rotation: Quat,
}

impl FlagRig {
    /// Resolves the flag group and classifies its surfaces.
    ///
    /// Any failure leaves the flag out of the choreography entirely;
    /// the caller decides how loudly to report that.
    pub fn resolve(scene: &mut Scene, config: &FlagConfig) -> Result<Self> {
        let node = scene
            .find_node(&config.group)
            .ok_or_else(|| SetupError::NodeNotFound {
                name: config.group.clone(),
            })?;

        let targets =
            DeformTargets::classify(scene, node, &config.group, &config.brighten_material)?;

        let base_rotation = scene
            .get_node(node)
            .map_or(Quat::IDENTITY, |n| n.transform.rotation);

        Ok(Self {
            node,
            targets,
            base_rotation,
        })
    }
}

/// One leg joint after name resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLeg {
    pub node: NodeHandle,
    pub side: Side,
    pub pose: LegPose,
}

/// The resolved mascot skeleton: root, all four legs, and the neck if
/// the model has one.
#[derive(Debug, Clone)]
pub struct MascotRig {
    /// Root node the walk translates.
    pub root: NodeHandle,
    /// The four gait-driven legs.
    pub legs: [ResolvedLeg; 4],
    /// Neck joint for the head turn. `None` skips that phase.
    pub neck: Option<NodeHandle>,
}

impl MascotRig {
    /// Resolves the mascot root and its joints by name.
    ///
    /// All four legs are required; a missing leg fails the whole rig.
    /// The neck is optional and resolves to `None` when absent.
    pub fn resolve(scene: &Scene, config: &MascotConfig) -> Result<Self> {
        let root = scene
            .find_node(&config.root)
            .ok_or_else(|| SetupError::NodeNotFound {
                name: config.root.clone(),
            })?;

        let names = collect_named(scene, root);

        let resolve_leg = |joint: &LegJoint| -> Result<ResolvedLeg> {
            let node = *names
                .get(joint.name.as_str())
                .ok_or_else(|| SetupError::JointNotFound {
                    name: joint.name.clone(),
                })?;
            Ok(ResolvedLeg {
                node,
                side: joint.side,
                pose: joint.pose,
            })
        };

        let legs = [
            resolve_leg(&config.legs[0])?,
            resolve_leg(&config.legs[1])?,
            resolve_leg(&config.legs[2])?,
            resolve_leg(&config.legs[3])?,
        ];

        let neck = names.get(config.neck.as_str()).copied();

        Ok(Self { root, legs, neck })
    }
}

/// Maps every node name in a subtree to its handle.
///
/// On duplicate names the first node in depth-first preorder wins,
/// matching [`Scene::find_node_from`].
fn collect_named(scene: &Scene, root: NodeHandle) -> FxHashMap<&str, NodeHandle> {
    let mut names: FxHashMap<&str, NodeHandle> = FxHashMap::default();
    let mut stack = vec![root];

    while let Some(handle) = stack.pop() {
        if let Some(node) = scene.get_node(handle) {
            names.entry(node.name.as_str()).or_insert(handle);
            // Reverse push keeps preorder visiting
            stack.extend(node.children.iter().rev().copied());
        }
    }

    names
}
