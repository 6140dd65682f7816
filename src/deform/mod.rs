//! Per-vertex surface deformation.
//!
//! Splits cleanly into three pieces:
//! - [`Ripple`]: the pure displacement function
//! - [`DeformTargets`]: which meshes get displaced, with their rest
//!   snapshots
//! - [`WaveState`]: the shared amplitude envelope the choreography and
//!   the host both drive

pub mod ripple;
pub mod targets;
pub mod wave;

pub use ripple::Ripple;
pub use targets::{DeformTarget, DeformTargets, EMISSIVE_BOOST, MAX_TARGETS};
pub use wave::WaveState;
