use crate::scene::MaterialKey;
use crate::scene::geometry::Geometry;

/// A renderable surface: geometry plus an optional material reference.
///
/// Geometry is owned by the mesh because deformation rewrites it per
/// instance. Materials live in the scene's shared pool and are
/// referenced by key so several meshes can share one.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    // === Resources ===
    pub geometry: Geometry,
    pub material: Option<MaterialKey>,

    // === Instance render settings ===
    pub visible: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(name: &str, geometry: Geometry) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material: None,
            visible: true,
        }
    }

    /// Sets the material reference (builder).
    #[must_use]
    pub fn with_material(mut self, material: MaterialKey) -> Self {
        self.material = Some(material);
        self
    }
}
