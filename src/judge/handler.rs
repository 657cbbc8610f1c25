use crate::config::JudgeTuning;
use crate::input::{InputFrame, InputFrameBuilder};
use crate::judge::color_lock::ColorLockRegistry;
use crate::judge::{arc, tap};
use crate::model::{ArcRequest, ArcTapRequest, LaneHoldRequest, LaneTapRequest, Timing};
use crate::traits::feedback::InputFeedback;
use crate::traits::signal::SignalSource;

/// One controller judgement session: owns the signal source, the feedback
/// sink, the frame builder's edge state, the color lock registry, and the
/// external lock-duration formula.
///
/// Per simulation frame, call in this order:
/// [`poll_input`](Self::poll_input) →
/// [`resolve_taps`](Self::resolve_taps) →
/// [`resolve_holds`](Self::resolve_holds) →
/// [`resolve_arcs`](Self::resolve_arcs).
/// The request queues stay owned by the scheduler and are only borrowed for
/// the duration of a call; matchers remove resolved requests in place.
pub struct ControllerJudge<S, F> {
    signals: S,
    feedback: F,
    builder: InputFrameBuilder,
    locks: ColorLockRegistry,
    tuning: JudgeTuning,
    lock_duration: Box<dyn Fn(f32) -> Timing>,
}

impl<S: SignalSource, F: InputFeedback> ControllerJudge<S, F> {
    /// Create a session. `lock_duration` maps an arc's judgement tick
    /// interval to the misinput lock length.
    pub fn new(
        signals: S,
        feedback: F,
        tuning: JudgeTuning,
        lock_duration: impl Fn(f32) -> Timing + 'static,
    ) -> Self {
        Self {
            signals,
            feedback,
            builder: InputFrameBuilder::new(),
            locks: ColorLockRegistry::new(),
            tuning,
            lock_duration: Box::new(lock_duration),
        }
    }

    /// Sample the signal source into a fresh input frame. Run once per
    /// frame, before any matcher.
    pub fn poll_input(&mut self) {
        self.signals.begin_frame();
        self.builder.poll(&self.signals, &mut self.feedback);
    }

    /// The frame produced by the most recent poll.
    pub fn frame(&self) -> &InputFrame {
        self.builder.frame()
    }

    /// Match this frame's presses against pending tap requests.
    pub fn resolve_taps<P>(
        &self,
        current_timing: Timing,
        lane_taps: &mut Vec<LaneTapRequest<P>>,
        arc_taps: &mut Vec<ArcTapRequest<P>>,
    ) {
        tap::resolve_taps(
            current_timing,
            lane_taps,
            arc_taps,
            self.builder.frame().pressed(),
        );
    }

    /// Match this frame's held sides against pending hold requests.
    pub fn resolve_holds<P>(&self, current_timing: Timing, holds: &mut Vec<LaneHoldRequest<P>>) {
        tap::resolve_holds(current_timing, holds, self.builder.frame().held());
    }

    /// Match this frame's joystick state against pending arc requests and
    /// push the per-color red values.
    pub fn resolve_arcs<P>(&mut self, current_timing: Timing, arcs: &mut Vec<ArcRequest<P>>) {
        arc::resolve_arcs(
            current_timing,
            arcs,
            self.builder.frame(),
            &mut self.locks,
            &self.tuning,
            self.lock_duration.as_ref(),
            &mut self.feedback,
        );
    }

    /// Clear all cross-frame judgement state (retry/restart), zeroing the
    /// red value of every known color.
    pub fn reset_judgement(&mut self) {
        self.locks.reset_all(&mut self.feedback);
    }

    pub fn locks(&self) -> &ColorLockRegistry {
        &self.locks
    }

    pub fn signals_mut(&mut self) -> &mut S {
        &mut self.signals
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }
}
