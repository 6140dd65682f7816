//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`SetupError`] covers the failure modes of rig
//! resolution:
//! - Named scene nodes that cannot be found
//! - Surface groups with too few deformable meshes
//! - Missing required skeleton joints
//!
//! # Usage
//!
//! Rig setup APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, SetupError>`.
//!
//! ```rust,ignore
//! use pennant::errors::{Result, SetupError};
//!
//! fn resolve_rig() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The error type for rig and deformation setup.
///
/// Each variant names the scene content that failed to resolve so the
/// host can log a useful diagnostic and fall back to a static scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    // ========================================================================
    // Node Resolution Errors
    // ========================================================================
    /// No node with the requested name exists in the scene.
    #[error("Node not found: {name}")]
    NodeNotFound {
        /// The name that failed to resolve
        name: String,
    },

    // ========================================================================
    // Surface Classification Errors
    // ========================================================================
    /// A surface group held fewer meshes than deformation requires.
    #[error("Surface group '{group}' has too few meshes: found {found}, need at least 2")]
    TooFewSurfaces {
        /// Name of the group node that was scanned
        group: String,
        /// Number of meshes actually found under it
        found: usize,
    },

    // ========================================================================
    // Skeleton Resolution Errors
    // ========================================================================
    /// A required skeleton joint was not found under the model root.
    #[error("Joint not found: {name}")]
    JointNotFound {
        /// The joint name that failed to resolve
        name: String,
    },
}

/// Alias for `Result<T, SetupError>`.
pub type Result<T> = std::result::Result<T, SetupError>;
