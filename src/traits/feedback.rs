/// Feedback hooks the judgement loop drives on the presentation layer.
/// Implementations: the game's skin/audio services, NullFeedback,
/// RecordingFeedback (testing).
pub trait InputFeedback {
    /// Pulse the visual feedback of a lane that is actively held.
    fn lane_feedback(&mut self, lane: i32);

    /// Drive the red misinput tint of an arc color, in `[0, 1]`.
    fn apply_red_arc_value(&mut self, color: i32, value: f32);
}

/// Feedback sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl InputFeedback for NullFeedback {
    fn lane_feedback(&mut self, _lane: i32) {}

    fn apply_red_arc_value(&mut self, _color: i32, _value: f32) {}
}

/// Records every feedback call, for assertions in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    pub lanes: Vec<i32>,
    pub red_values: Vec<(i32, f32)>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lanes.clear();
        self.red_values.clear();
    }

    /// Most recent red value pushed for `color`, if any.
    pub fn last_red(&self, color: i32) -> Option<f32> {
        self.red_values
            .iter()
            .rev()
            .find(|(c, _)| *c == color)
            .map(|(_, value)| *value)
    }
}

impl InputFeedback for RecordingFeedback {
    fn lane_feedback(&mut self, lane: i32) {
        self.lanes.push(lane);
    }

    fn apply_red_arc_value(&mut self, color: i32, value: f32) {
        self.red_values.push((color, value));
    }
}
