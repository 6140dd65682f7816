//! Scripted intro choreography.
//!
//! Configuration ([`FlagConfig`], [`MascotConfig`]), rig resolution
//! ([`FlagRig`], [`MascotRig`]) and the per-frame [`Director`] that
//! runs the sequences.

pub mod config;
pub mod director;
pub mod rig;

pub use config::{FlagConfig, LegJoint, LegPose, MascotConfig, Side};
pub use director::{Director, MascotState, Stage};
pub use rig::{FlagRig, MascotRig, ResolvedLeg};
