#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod choreo;
pub mod deform;
pub mod errors;
pub mod scene;
pub mod utils;

pub use animation::{Ease, PlayMode, PlayState, PoseBlend, Timeline, TimelineBuilder};
pub use choreo::{Director, FlagConfig, LegJoint, LegPose, MascotConfig, Side, Stage};
pub use choreo::{FlagRig, MascotRig};
pub use deform::{DeformTarget, DeformTargets, EMISSIVE_BOOST, MAX_TARGETS, Ripple, WaveState};
pub use errors::{Result, SetupError};
pub use scene::primitives::{PlaneOptions, create_plane};
pub use scene::{Geometry, Material, Mesh, Node, NodeBuilder, Scene, Transform};
pub use utils::Timer;
