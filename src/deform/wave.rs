/// Shared wave envelope state.
///
/// The choreography writes `amplitude` (its tweens own the envelope
/// during the intro) and flips `interactive` once control is handed
/// over to the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveState {
    /// Current wave amplitude multiplier. Zero disables deformation.
    pub amplitude: f32,
    /// True once the scripted intro has released the envelope to the
    /// host.
    pub interactive: bool,
}

impl WaveState {
    /// Whether the wave currently displaces anything.
    #[inline]
    #[must_use]
    pub fn active(&self) -> bool {
        self.amplitude > 0.0
    }
}
