//! The intro director.
//!
//! [`Director`] owns the scene (wrapped in a [`Stage`]) and the three
//! intro timelines, and advances everything from a single per-frame
//! entry point. The timelines run on two independent tracks: the flag
//! sequence (spin, burst, decay, handoff) and the mascot sequence
//! (wait, walk, head turn), with the gait loop and the glow ramp as
//! satellites they start and stop.
//!
//! All timeline callbacks take the stage as their context, so sibling
//! timelines can reach each other through it without any shared-state
//! gymnastics: the gait loop lives inside the stage, and the mascot
//! sequence starts and pauses it from plain callbacks.

use glam::{Quat, Vec3};
use smallvec::SmallVec;
use std::f32::consts::TAU;

use crate::animation::{Ease, PlayState, PoseBlend, Timeline};
use crate::choreo::config::{FlagConfig, MascotConfig, Side};
use crate::choreo::rig::{FlagRig, MascotRig};
use crate::deform::{MAX_TARGETS, Ripple, WaveState};
use crate::scene::Scene;

/// Everything the intro callbacks mutate, in one place.
pub struct Stage {
    pub scene: Scene,
    pub wave: WaveState,
    pub ripple: Ripple,

    /// Resolved flag, absent when setup failed.
    pub flag: Option<FlagRig>,
    /// Resolved mascot, absent when setup failed.
    pub mascot: Option<MascotState>,

    // The gait loop lives here so mascot sequence callbacks can start
    // and pause it through their `&mut Stage` context.
    pub(crate) legs: Timeline<Stage>,
    // Set by the burst callback; the director turns it into a one-shot
    // glow start.
    pub(crate) glow_requested: bool,
    // Emissive intensities captured when the glow arms, one per target.
    pub(crate) glow_from: SmallVec<[f32; MAX_TARGETS]>,
}

impl Stage {
    fn new(scene: Scene) -> Self {
        Self {
            scene,
            wave: WaveState::default(),
            ripple: Ripple::default(),
            flag: None,
            mascot: None,
            legs: Timeline::default(),
            glow_requested: false,
            glow_from: SmallVec::new(),
        }
    }

    /// Current state of the gait loop.
    #[must_use]
    pub fn legs_state(&self) -> PlayState {
        self.legs.state()
    }
}

/// Mascot rig plus the motion state its sequence captures mid-flight.
pub struct MascotState {
    pub rig: MascotRig,
    /// Root position captured when the walk starts.
    pub(crate) walk_from: Vec3,
    /// Neck orientation captured when the head turn starts.
    pub(crate) neck_from: Quat,
}

/// Drives the whole intro from per-frame elapsed time.
pub struct Director {
    stage: Stage,
    flag_seq: Timeline<Stage>,
    mascot_seq: Timeline<Stage>,
    glow: Timeline<Stage>,
    last_time: f32,
}

impl Director {
    /// Takes ownership of a scene, resolves both rigs and arms the
    /// intro sequences.
    ///
    /// Setup failures degrade independently: a missing flag group
    /// leaves the surfaces static while the mascot still walks, and
    /// vice versa. Each failure is logged once here.
    #[must_use]
    pub fn new(scene: Scene, flag_config: FlagConfig, mascot_config: MascotConfig) -> Self {
        let mut stage = Stage::new(scene);

        match FlagRig::resolve(&mut stage.scene, &flag_config) {
            Ok(rig) => stage.flag = Some(rig),
            Err(err) => log::warn!("flag setup failed, surfaces stay static: {err}"),
        }

        match MascotRig::resolve(&stage.scene, &mascot_config) {
            Ok(rig) => {
                if rig.neck.is_none() {
                    log::info!(
                        "neck joint '{}' not found; skipping the head turn",
                        mascot_config.neck
                    );
                }
                stage.mascot = Some(MascotState {
                    rig,
                    walk_from: Vec3::ZERO,
                    neck_from: Quat::IDENTITY,
                });
            }
            Err(err) => log::warn!("mascot setup failed, model stays static: {err}"),
        }

        let mut flag_seq = Timeline::default();
        let mut glow = Timeline::default();
        if stage.flag.is_some() {
            flag_seq = build_flag_sequence(&flag_config);
            glow = build_glow_sequence(&flag_config);
            flag_seq.play();
        }

        let mut mascot_seq = Timeline::default();
        if let Some(state) = &stage.mascot {
            let has_neck = state.rig.neck.is_some();
            let (sequence, legs) = build_mascot_sequences(&mascot_config, has_neck);
            mascot_seq = sequence;
            stage.legs = legs;
            mascot_seq.play();
        }

        Self {
            stage,
            flag_seq,
            mascot_seq,
            glow,
            last_time: 0.0,
        }
    }

    /// Advances the intro to `elapsed` seconds since the director was
    /// created.
    ///
    /// Call once per frame with a monotonically increasing clock.
    /// Frame delta is derived internally; a non-increasing clock yields
    /// a zero delta rather than time travel.
    pub fn tick(&mut self, elapsed: f32) {
        let dt = (elapsed - self.last_time).max(0.0);
        self.last_time = elapsed;

        self.flag_seq.advance(dt, &mut self.stage);

        // The gait loop sits inside the stage; swap it out to advance
        // it against the stage it lives in.
        let mut legs = std::mem::take(&mut self.stage.legs);
        legs.advance(dt, &mut self.stage);
        self.stage.legs = legs;

        self.mascot_seq.advance(dt, &mut self.stage);

        self.glow.advance(dt, &mut self.stage);
        if std::mem::take(&mut self.stage.glow_requested) {
            self.glow.play();
        }

        // Deformation pass: rest positions plus the current envelope.
        // Runs on absolute time so the wave phase never depends on
        // frame boundaries.
        let Stage {
            scene,
            wave,
            ripple,
            flag,
            ..
        } = &mut self.stage;
        if let Some(rig) = flag.as_ref() {
            rig.targets.apply(scene, ripple, elapsed, wave.amplitude);
        }

        self.stage.scene.update_matrix_world();
    }

    /// Whether the intro has released wave control to the host.
    #[must_use]
    pub fn interactive(&self) -> bool {
        self.stage.wave.interactive
    }

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.stage.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.stage.scene
    }

    /// Tears the choreography down: every timeline is killed and the
    /// wave envelope is reset, so later ticks mutate nothing.
    ///
    /// Idempotent. Call before removing the animated models from a
    /// larger scene.
    pub fn shutdown(&mut self) {
        self.flag_seq.kill();
        self.mascot_seq.kill();
        self.glow.kill();
        self.stage.legs.kill();
        self.stage.wave = WaveState::default();
    }
}

// ============================================================================
// Sequence construction
// ============================================================================

fn build_flag_sequence(config: &FlagConfig) -> Timeline<Stage> {
    let burst = config.burst_amplitude;

    Timeline::once()
        // Establishing spin: one full revolution about Y, composed
        // onto the captured base orientation.
        .tween(config.spin_duration, Ease::InOut, |stage: &mut Stage, p| {
            let Stage { scene, flag, .. } = stage;
            let Some(rig) = flag.as_ref() else { return };
            if let Some(node) = scene.get_node_mut(rig.node) {
                node.transform.rotation = rig.base_rotation * Quat::from_rotation_y(TAU * p);
                node.transform.mark_dirty();
            }
        })
        // Burst: snap the envelope open and request the glow.
        .call(move |stage: &mut Stage| {
            stage.wave.amplitude = burst;
            stage.glow_requested = true;
            log::info!("wave burst, amplitude {burst}");
        })
        // Decay back to rest, decelerating.
        .tween(config.decay_duration, Ease::Out, move |stage, p| {
            stage.wave.amplitude = burst * (1.0 - p);
        })
        // Handoff: the host owns the envelope from here.
        .call(|stage: &mut Stage| {
            stage.wave.interactive = true;
            log::info!("flag intro complete; wave control released to host");
        })
        .build()
}

fn build_glow_sequence(config: &FlagConfig) -> Timeline<Stage> {
    let target_intensity = config.glow_intensity;

    Timeline::once()
        // Capture the intensities the ramp starts from.
        .call(|stage: &mut Stage| {
            let Stage {
                scene,
                flag,
                glow_from,
                ..
            } = stage;
            glow_from.clear();
            let Some(rig) = flag.as_ref() else { return };
            for target in rig.targets.iter() {
                let intensity = scene
                    .meshes
                    .get(target.mesh)
                    .and_then(|m| m.material)
                    .and_then(|key| scene.materials.get(key))
                    .map_or(1.0, |m| m.emissive_intensity);
                glow_from.push(intensity);
            }
        })
        .wait(config.glow_delay)
        .tween(config.glow_duration, Ease::Out, move |stage, p| {
            let Stage {
                scene,
                flag,
                glow_from,
                ..
            } = stage;
            let Some(rig) = flag.as_ref() else { return };
            for (i, target) in rig.targets.iter().enumerate() {
                let from = glow_from.get(i).copied().unwrap_or(target_intensity);
                let material_key = scene.meshes.get(target.mesh).and_then(|m| m.material);
                if let Some(key) = material_key
                    && let Some(material) = scene.materials.get_mut(key)
                {
                    material.emissive_intensity = from + (target_intensity - from) * p;
                }
            }
        })
        .build()
}

fn build_mascot_sequences(
    config: &MascotConfig,
    has_neck: bool,
) -> (Timeline<Stage>, Timeline<Stage>) {
    // The first half-cycle blends out of the rest pose instead of
    // snapping to an extreme.
    let mut first_cycle = true;
    let legs = Timeline::looped()
        .tween(config.half_step, Ease::InOut, move |stage: &mut Stage, p| {
            drive_legs(stage, p, true, first_cycle);
            if p >= 1.0 {
                first_cycle = false;
            }
        })
        .tween(config.half_step, Ease::InOut, |stage: &mut Stage, p| {
            drive_legs(stage, p, false, false);
        })
        .build();

    let axis = config.walk_axis;
    let distance = config.walk_distance;
    let viewer_pose = config.viewer_pose;

    let mut sequence = Timeline::once()
        .wait(config.walk_start_delay)
        // Capture the walk origin and set the legs going.
        .call(|stage: &mut Stage| {
            let Stage {
                scene,
                mascot,
                legs,
                ..
            } = stage;
            if let Some(state) = mascot.as_mut() {
                if let Some(node) = scene.get_node(state.rig.root) {
                    state.walk_from = node.transform.position;
                }
                legs.play();
                log::info!("mascot walk started");
            }
        })
        .tween(config.walk_duration, Ease::InOut, move |stage, p| {
            let Stage { scene, mascot, .. } = stage;
            let Some(state) = mascot.as_ref() else { return };
            if let Some(node) = scene.get_node_mut(state.rig.root) {
                node.transform.position = state.walk_from + axis * (distance * p);
                node.transform.mark_dirty();
            }
        })
        // Freeze the gait wherever it stands.
        .call(|stage: &mut Stage| {
            stage.legs.pause();
            log::info!("mascot walk finished");
        });

    if has_neck {
        sequence = sequence
            .call(|stage: &mut Stage| {
                let Stage { scene, mascot, .. } = stage;
                if let Some(state) = mascot.as_mut()
                    && let Some(neck) = state.rig.neck
                    && let Some(node) = scene.get_node(neck)
                {
                    state.neck_from = node.transform.rotation;
                }
            })
            .tween(config.turn_duration, Ease::Out, move |stage, p| {
                let Stage { scene, mascot, .. } = stage;
                let Some(state) = mascot.as_ref() else { return };
                let Some(neck) = state.rig.neck else { return };
                if let Some(node) = scene.get_node_mut(neck) {
                    node.transform.rotation = PoseBlend::new(state.neck_from, viewer_pose).at(p);
                    node.transform.mark_dirty();
                }
            });
    }

    (sequence.build(), legs)
}

/// Writes one gait frame to all four legs.
///
/// `left_forward` selects the half-cycle: left legs travelling to
/// their forward extreme while right legs travel backward, or the
/// reverse. `from_rest` blends out of the rest pose instead, used for
/// the very first half-cycle.
fn drive_legs(stage: &mut Stage, progress: f32, left_forward: bool, from_rest: bool) {
    let Stage { scene, mascot, .. } = stage;
    let Some(state) = mascot.as_ref() else { return };

    for leg in &state.rig.legs {
        let to_forward = matches!(
            (leg.side, left_forward),
            (Side::Left, true) | (Side::Right, false)
        );

        let swing = PoseBlend::new(leg.pose.backward, leg.pose.forward);
        let mut blend = if to_forward { swing } else { swing.reversed() };
        if from_rest {
            blend.from = Quat::IDENTITY;
        }

        if let Some(node) = scene.get_node_mut(leg.node) {
            node.transform.rotation = blend.at(progress);
            node.transform.mark_dirty();
        }
    }
}
