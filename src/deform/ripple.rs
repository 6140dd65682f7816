use glam::Vec3;

/// Travelling sine wave evaluated per vertex from rest positions.
///
/// Displacement is a pure function of rest position, elapsed time and
/// amplitude. Vertices are never integrated frame to frame, which keeps
/// the deformation stable at any frame rate and lets several surfaces
/// share one set of parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Temporal frequency of the wave, in radians per second.
    pub wave_speed: f32,
    /// Spatial frequency along the surface, in radians per unit.
    pub wave_length: f32,
    /// Base displacement height at full amplitude, in scene units.
    pub base_height: f32,
    /// Half of the surface extent along the wave axis. Vertices at
    /// `-half_width` sit on the anchored edge.
    pub half_width: f32,
    /// Full surface extent along the wave axis.
    pub width: f32,
}

impl Default for Ripple {
    fn default() -> Self {
        Self {
            wave_speed: 4.2,
            wave_length: 2.0,
            base_height: 0.15,
            half_width: 2.0,
            width: 4.0,
        }
    }
}

impl Ripple {
    /// Lateral falloff factor for a vertex at `x` along the wave axis.
    ///
    /// 0 on the anchored edge, ramping linearly to 1 on the free edge.
    /// Clamped, so vertices outside the nominal extent stay in range.
    #[must_use]
    pub fn edge_factor(&self, x: f32) -> f32 {
        ((x + self.half_width) / self.width).clamp(0.0, 1.0)
    }

    /// Displaced position for a vertex resting at `rest`.
    ///
    /// The same wave term is added to both Y and Z, producing the
    /// diagonal flutter of cloth pinned along one edge.
    #[must_use]
    pub fn displace(&self, rest: Vec3, time: f32, amplitude: f32) -> Vec3 {
        let edge = self.edge_factor(rest.x);
        let wave =
            (time * self.wave_speed + rest.x * self.wave_length).sin() * self.base_height * amplitude * edge;
        Vec3::new(rest.x, rest.y + wave, rest.z + wave)
    }
}
