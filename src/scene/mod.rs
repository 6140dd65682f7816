//! Scene graph module.
//!
//! Manages the scene hierarchy and its components:
//! - Node: scene node (parent-child relations and a transform)
//! - Transform: TRS component with cached matrices
//! - Scene: scene container and component pools
//! - Geometry / Mesh / Material: renderable surface data
//! - TransformSystem: decoupled world matrix update

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod node;
pub mod primitives;
pub mod scene;
pub mod transform;
pub mod transform_system;

// Re-export common types
pub use geometry::Geometry;
pub use material::Material;
pub use mesh::Mesh;
pub use node::Node;
pub use scene::{NodeBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct MaterialKey;
}
