use glam::{Vec3, Vec4};

/// Shading parameters shared between meshes.
///
/// Kept renderer-agnostic: base color plus an emissive term. Hosts map
/// these onto whatever shading model they run.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,

    /// Base color (RGBA).
    pub base_color: Vec4,
    /// Emissive color.
    pub emissive: Vec3,
    /// Emissive intensity.
    pub emissive_intensity: f32,
}

impl Material {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_color: Vec4::ONE,
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
        }
    }

    // -- Builder pattern (chainable at construction time) --

    /// Sets the base color (builder).
    #[must_use]
    pub fn with_base_color(mut self, color: Vec4) -> Self {
        self.base_color = color;
        self
    }

    /// Sets the emissive color (builder).
    #[must_use]
    pub fn with_emissive(mut self, emissive: Vec3) -> Self {
        self.emissive = emissive;
        self
    }

    /// Sets the emissive intensity (builder).
    #[must_use]
    pub fn with_emissive_intensity(mut self, intensity: f32) -> Self {
        self.emissive_intensity = intensity;
        self
    }
}
