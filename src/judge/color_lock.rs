use std::rc::Rc;

use tracing::debug;

use crate::model::Timing;
use crate::model::arc::ArcGeometry;
use crate::traits::feedback::InputFeedback;

/// Upper bound on arc color channels; charts never come close.
pub const MAX_COLOR_CHANNELS: usize = 32;

/// Misinput lock and continuity state of one arc color channel.
#[derive(Clone, Default)]
pub struct ColorLockState {
    /// Locked while the frame timing is at or before this; `None` = never
    /// locked.
    lock_until: Option<Timing>,
    /// Most recently judged arc on this channel and whether it was accepted.
    previous: Option<(Rc<dyn ArcGeometry>, bool)>,
}

impl ColorLockState {
    pub fn is_locked(&self, frame_timing: Timing) -> bool {
        self.lock_until.is_some_and(|until| frame_timing <= until)
    }

    /// Red tint to show for this channel: 1 while locked, 0 otherwise.
    pub fn red_value(&self, frame_timing: Timing) -> f32 {
        if self.is_locked(frame_timing) { 1.0 } else { 0.0 }
    }

    /// Start a forced-rejection window of `duration` from `frame_timing`.
    pub fn lock(&mut self, frame_timing: Timing, duration: Timing) {
        self.lock_until = Some(frame_timing + duration);
    }

    pub fn unlock(&mut self) {
        self.lock_until = None;
    }

    /// Continuity pair for the correction heuristic.
    pub fn previous_judgement(&self) -> Option<(Rc<dyn ArcGeometry>, bool)> {
        self.previous.clone()
    }

    /// Upsert the continuity pair after a directional judgement.
    pub fn record_judgement(&mut self, arc: Rc<dyn ArcGeometry>, accepted: bool) {
        self.previous = Some((arc, accepted));
    }
}

/// Lock state for every arc color channel, created lazily by index.
///
/// `new_frame` must run once per frame before any lock query; all
/// comparisons use that frame timestamp.
pub struct ColorLockRegistry {
    frame_timing: Timing,
    channels: Vec<ColorLockState>,
}

impl ColorLockRegistry {
    pub fn new() -> Self {
        Self {
            frame_timing: Timing::MIN,
            channels: Vec::new(),
        }
    }

    /// Set the frame timestamp used by all lock comparisons.
    pub fn new_frame(&mut self, timing: Timing) {
        self.frame_timing = timing;
    }

    pub fn frame_timing(&self) -> Timing {
        self.frame_timing
    }

    /// Number of channels referenced so far.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Lock state for a color, created on first reference.
    ///
    /// # Panics
    ///
    /// On a negative color or one beyond [`MAX_COLOR_CHANNELS`]; both are
    /// contract violations by the caller, not runtime conditions.
    pub fn get(&mut self, color: i32) -> &mut ColorLockState {
        assert!(color >= 0, "arc color must be non-negative, got {color}");
        let index = color as usize;
        assert!(
            index < MAX_COLOR_CHANNELS,
            "arc color {color} exceeds the supported {MAX_COLOR_CHANNELS} channels"
        );
        while self.channels.len() <= index {
            self.channels.push(ColorLockState::default());
        }
        &mut self.channels[index]
    }

    /// Lock a channel and log the transition.
    pub fn lock(&mut self, color: i32, duration: Timing) {
        let frame_timing = self.frame_timing;
        self.get(color).lock(frame_timing, duration);
        debug!("Arc color {} locked for {}ms", color, duration);
    }

    /// Push every channel's current red value to the feedback sink.
    pub fn apply_red_values(&self, feedback: &mut dyn InputFeedback) {
        for (color, channel) in self.channels.iter().enumerate() {
            feedback.apply_red_arc_value(color as i32, channel.red_value(self.frame_timing));
        }
    }

    /// Drop all channels, pushing a final zero red value for each.
    pub fn reset_all(&mut self, feedback: &mut dyn InputFeedback) {
        for color in 0..self.channels.len() {
            feedback.apply_red_arc_value(color as i32, 0.0);
        }
        self.channels.clear();
    }
}

impl Default for ColorLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
