//! Choreography configuration.
//!
//! Plain data describing what the intro sequences animate: which named
//! nodes they drive and the durations of each phase. Defaults match
//! the stock intro; hosts override fields to fit their own scenes.

use glam::{Quat, Vec3};
use std::f32::consts::PI;

use crate::deform::EMISSIVE_BOOST;

/// Which side of the body a leg swings with.
///
/// Opposite sides move in antiphase during the gait, which is what
/// makes a four-legged walk read as a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// The two extreme orientations of a leg joint during the gait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegPose {
    pub forward: Quat,
    pub backward: Quat,
}

impl LegPose {
    /// Symmetric swing of `radians` about the local X axis.
    #[must_use]
    pub fn swing(radians: f32) -> Self {
        Self {
            forward: Quat::from_rotation_x(radians),
            backward: Quat::from_rotation_x(-radians),
        }
    }
}

/// One leg joint the gait drives: its node name, body side and swing
/// extremes.
#[derive(Debug, Clone, PartialEq)]
pub struct LegJoint {
    pub name: String,
    pub side: Side,
    pub pose: LegPose,
}

impl LegJoint {
    #[must_use]
    pub fn new(name: &str, side: Side, pose: LegPose) -> Self {
        Self {
            name: name.to_string(),
            side,
            pose,
        }
    }
}

/// Configuration of the flag intro sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagConfig {
    /// Name of the group node holding the flag surfaces.
    pub group: String,
    /// Materials with this name get forced to glowing white during
    /// surface classification.
    pub brighten_material: String,

    /// Duration of the establishing full spin, in seconds.
    pub spin_duration: f32,
    /// Wave amplitude at the moment of the burst.
    pub burst_amplitude: f32,
    /// Duration of the amplitude decay back to rest.
    pub decay_duration: f32,

    /// Delay between the burst and the start of the glow ramp.
    pub glow_delay: f32,
    /// Duration of the glow ramp.
    pub glow_duration: f32,
    /// Emissive intensity the glow ramps toward.
    pub glow_intensity: f32,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            group: "flag".to_string(),
            brighten_material: "flag_cloth".to_string(),
            spin_duration: 4.0,
            burst_amplitude: 5.0,
            decay_duration: 5.0,
            glow_delay: 3.0,
            glow_duration: 5.5,
            glow_intensity: EMISSIVE_BOOST,
        }
    }
}

/// Configuration of the mascot intro sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct MascotConfig {
    /// Name of the model's root node.
    pub root: String,
    /// The four legs the gait drives. All four must resolve for the
    /// mascot to animate at all.
    pub legs: [LegJoint; 4],
    /// Name of the neck joint. Optional at resolve time: a model
    /// without it simply skips the look-at phase.
    pub neck: String,

    /// Idle time before the walk begins, in seconds.
    pub walk_start_delay: f32,
    /// Duration of the walk phase.
    pub walk_duration: f32,
    /// World-space direction of travel.
    pub walk_axis: Vec3,
    /// Distance covered over the walk phase, in scene units.
    pub walk_distance: f32,

    /// Duration of one gait half-cycle.
    pub half_step: f32,

    /// Duration of the closing head turn.
    pub turn_duration: f32,
    /// Neck orientation facing the viewer, the head turn's destination.
    pub viewer_pose: Quat,
}

impl Default for MascotConfig {
    fn default() -> Self {
        Self {
            root: "mascot".to_string(),
            legs: [
                LegJoint::new("front_left_leg", Side::Left, LegPose::swing(0.35)),
                LegJoint::new("front_right_leg", Side::Right, LegPose::swing(0.35)),
                LegJoint::new("rear_left_leg", Side::Left, LegPose::swing(0.35)),
                LegJoint::new("rear_right_leg", Side::Right, LegPose::swing(0.35)),
            ],
            neck: "neck".to_string(),
            walk_start_delay: 5.0,
            walk_duration: 4.0,
            walk_axis: Vec3::X,
            walk_distance: 4.0,
            half_step: 0.5,
            turn_duration: 1.8,
            viewer_pose: Quat::from_rotation_y(-PI / 5.0),
        }
    }
}
