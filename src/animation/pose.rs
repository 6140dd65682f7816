use glam::Quat;

/// A pair of joint orientations with spherical interpolation between
/// them.
///
/// Tween callbacks hold one of these and sample it with the eased
/// progress they receive, so a whole gait phase is just a handful of
/// `at` calls per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseBlend {
    pub from: Quat,
    pub to: Quat,
}

impl PoseBlend {
    #[must_use]
    pub fn new(from: Quat, to: Quat) -> Self {
        Self { from, to }
    }

    /// Samples the blend at progress `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn at(&self, t: f32) -> Quat {
        self.from.slerp(self.to, t.clamp(0.0, 1.0))
    }

    /// The same blend travelled in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}
