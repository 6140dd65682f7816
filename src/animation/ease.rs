/// Easing curve applied to normalized tween progress.
///
/// Progress is clamped to `[0, 1]` before the curve is evaluated, so
/// every curve maps 0 to 0 and 1 to 1 exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    /// Constant rate.
    #[default]
    Linear,
    /// Smoothstep: accelerate in, decelerate out.
    InOut,
    /// Quadratic deceleration toward the end.
    Out,
}

impl Ease {
    /// Evaluates the curve at normalized progress `t`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOut => t * t * (3.0 - 2.0 * t),
            Self::Out => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}
