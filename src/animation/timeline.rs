//! Step-sequenced timelines.
//!
//! A [`Timeline`] owns an ordered list of steps (tweens, waits, calls)
//! and consumes real frame time across them. Steps never overlap: a
//! step must finish before the next one starts, and leftover time from
//! a finished step carries into the following step within the same
//! update. This keeps phase boundaries exact regardless of frame rate.
//!
//! Timelines are generic over a context type `C`. Every callback
//! receives `&mut C`, so all mutable state a sequence touches lives in
//! one place and the borrow checker stays satisfied.

use crate::animation::ease::Ease;

/// Progress callback of a tween step. Receives eased progress in `[0, 1]`.
pub type TweenFn<C> = Box<dyn FnMut(&mut C, f32)>;

/// Callback of a call step.
pub type CallFn<C> = Box<dyn FnMut(&mut C)>;

/// A single step in a timeline.
pub enum Step<C> {
    /// Interpolates for `duration` seconds, reporting eased progress.
    Tween {
        duration: f32,
        ease: Ease,
        update: TweenFn<C>,
    },
    /// Consumes `duration` seconds without side effects.
    Wait { duration: f32 },
    /// Fires once, consuming no time.
    Call { run: CallFn<C> },
}

/// Whether a timeline plays its steps once or repeats them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    Once,
    Loop,
}

/// Lifecycle state of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Built but not started.
    Idle,
    /// Consuming time.
    Playing,
    /// Frozen mid-sequence; resumable via [`Timeline::play`].
    Paused,
    /// A `Once` timeline that ran to the end. Terminal.
    Complete,
    /// Stopped and released. Terminal.
    Killed,
}

/// An ordered sequence of steps driven by frame time.
pub struct Timeline<C> {
    mode: PlayMode,
    state: PlayState,
    steps: Vec<Step<C>>,
    cursor: usize,
    step_elapsed: f32,
}

impl<C> Default for Timeline<C> {
    /// An empty idle timeline. Useful as a placeholder that never fires.
    fn default() -> Self {
        Self {
            mode: PlayMode::Once,
            state: PlayState::Idle,
            steps: Vec::new(),
            cursor: 0,
            step_elapsed: 0.0,
        }
    }
}

impl<C> Timeline<C> {
    /// Starts building a timeline that plays its steps once.
    #[must_use]
    pub fn once() -> TimelineBuilder<C> {
        TimelineBuilder::new(PlayMode::Once)
    }

    /// Starts building a timeline that repeats its steps until paused
    /// or killed.
    #[must_use]
    pub fn looped() -> TimelineBuilder<C> {
        TimelineBuilder::new(PlayMode::Loop)
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == PlayState::Complete
    }

    /// Starts an idle timeline, or resumes a paused one.
    ///
    /// No-op in any other state: completed and killed timelines never
    /// come back, and playing ones are unaffected.
    pub fn play(&mut self) {
        match self.state {
            PlayState::Idle | PlayState::Paused => self.state = PlayState::Playing,
            PlayState::Playing | PlayState::Complete | PlayState::Killed => {}
        }
    }

    /// Freezes the timeline mid-step. Resume with [`Timeline::play`];
    /// progress within the current step is preserved.
    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    /// Stops the timeline permanently and drops its callbacks.
    ///
    /// Idempotent. A completed timeline stays `Complete`.
    pub fn kill(&mut self) {
        if matches!(self.state, PlayState::Killed | PlayState::Complete) {
            return;
        }
        self.state = PlayState::Killed;
        self.steps.clear();
        self.cursor = 0;
        self.step_elapsed = 0.0;
    }

    /// Consumes `dt` seconds of frame time.
    ///
    /// Steps run strictly in order. When a step finishes with time left
    /// over, the remainder flows into the next step immediately, so one
    /// large `dt` can cross several step boundaries. A finishing tween
    /// always reports progress exactly 1.0; a tween reached mid-update
    /// renders at its current eased progress.
    pub fn advance(&mut self, dt: f32, ctx: &mut C) {
        if self.state != PlayState::Playing {
            return;
        }

        let mut remaining = dt.max(0.0);
        // Trips the degenerate-loop guard when a full pass over a Loop
        // timeline consumes no time at all.
        let mut consumed_since_wrap = false;

        loop {
            if self.cursor >= self.steps.len() {
                match self.mode {
                    PlayMode::Once => {
                        self.state = PlayState::Complete;
                        self.steps.clear();
                        self.cursor = 0;
                        self.step_elapsed = 0.0;
                        return;
                    }
                    PlayMode::Loop => {
                        if !consumed_since_wrap {
                            log::warn!(
                                "loop timeline made a full pass without consuming time; pausing"
                            );
                            self.state = PlayState::Paused;
                            return;
                        }
                        self.cursor = 0;
                        self.step_elapsed = 0.0;
                        consumed_since_wrap = false;
                        continue;
                    }
                }
            }

            match &mut self.steps[self.cursor] {
                Step::Call { run } => {
                    run(ctx);
                    self.cursor += 1;
                    self.step_elapsed = 0.0;
                }
                Step::Wait { duration } => {
                    let needed = *duration - self.step_elapsed;
                    if needed > remaining {
                        self.step_elapsed += remaining;
                        return;
                    }
                    remaining -= needed.max(0.0);
                    if *duration > 0.0 {
                        consumed_since_wrap = true;
                    }
                    self.cursor += 1;
                    self.step_elapsed = 0.0;
                }
                Step::Tween {
                    duration,
                    ease,
                    update,
                } => {
                    let needed = *duration - self.step_elapsed;
                    if needed > remaining {
                        // needed > 0 here, so duration is nonzero
                        self.step_elapsed += remaining;
                        let progress = ease.apply(self.step_elapsed / *duration);
                        update(ctx, progress);
                        return;
                    }
                    remaining -= needed.max(0.0);
                    update(ctx, ease.apply(1.0));
                    if *duration > 0.0 {
                        consumed_since_wrap = true;
                    }
                    self.cursor += 1;
                    self.step_elapsed = 0.0;
                }
            }
        }
    }
}

/// Chainable builder for [`Timeline`].
///
/// Steps run in the order they are appended. The built timeline starts
/// [`PlayState::Idle`]; call [`Timeline::play`] to arm it.
pub struct TimelineBuilder<C> {
    mode: PlayMode,
    steps: Vec<Step<C>>,
}

impl<C> TimelineBuilder<C> {
    fn new(mode: PlayMode) -> Self {
        Self {
            mode,
            steps: Vec::new(),
        }
    }

    /// Appends a tween step.
    #[must_use]
    pub fn tween(
        mut self,
        duration: f32,
        ease: Ease,
        update: impl FnMut(&mut C, f32) + 'static,
    ) -> Self {
        self.steps.push(Step::Tween {
            duration,
            ease,
            update: Box::new(update),
        });
        self
    }

    /// Appends a wait step.
    #[must_use]
    pub fn wait(mut self, duration: f32) -> Self {
        self.steps.push(Step::Wait { duration });
        self
    }

    /// Appends a call step.
    #[must_use]
    pub fn call(mut self, run: impl FnMut(&mut C) + 'static) -> Self {
        self.steps.push(Step::Call { run: Box::new(run) });
        self
    }

    /// Finishes the build.
    #[must_use]
    pub fn build(self) -> Timeline<C> {
        Timeline {
            mode: self.mode,
            state: PlayState::Idle,
            steps: self.steps,
            cursor: 0,
            step_elapsed: 0.0,
        }
    }
}
