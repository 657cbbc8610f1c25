use crate::input::edge::LinearInput;
use crate::input::frame::{InputFrame, JoystickState};
use crate::model::NoteSide;
use crate::model::side::{LANE_FROM, LANE_TO};
use crate::traits::feedback::InputFeedback;
use crate::traits::signal::{InputAxis, InputButton, SignalSource};

/// Trigger axes count as active above this value.
const TRIGGER_THRESHOLD: f32 = 0.5;

/// Derives a semantic [`InputFrame`] from the raw signal source once per
/// frame. Owns the cross-frame edge-detection state for every analog signal
/// that is read like a button.
#[derive(Debug, Default)]
pub struct InputFrameBuilder {
    frame: InputFrame,
    lane1: LinearInput,
    lane2: LinearInput,
    lane3_alternate: LinearInput,
    lane4_alternate: LinearInput,
    trigger_left: LinearInput,
    trigger_right: LinearInput,
}

impl InputFrameBuilder {
    pub fn new() -> Self {
        Self {
            frame: InputFrame::new(),
            ..Self::default()
        }
    }

    /// The frame produced by the most recent [`poll`](Self::poll).
    pub fn frame(&self) -> &InputFrame {
        &self.frame
    }

    /// Sample all signals and rebuild the frame. Always succeeds; all-zero
    /// input yields an empty frame. Emits a lane-feedback pulse for every
    /// held side.
    pub fn poll<S: SignalSource>(
        &mut self,
        signals: &S,
        feedback: &mut dyn InputFeedback,
    ) -> &InputFrame {
        self.frame.clear();

        // Joystick vectors are captured verbatim; the arc matcher applies
        // its own sensitivity threshold.
        self.frame.left_stick = JoystickState::new(
            signals.axis(InputAxis::LeftHorizontal),
            signals.axis(InputAxis::LeftVertical),
        );
        self.frame.right_stick = JoystickState::new(
            signals.axis(InputAxis::RightHorizontal),
            signals.axis(InputAxis::RightVertical),
        );

        // Lanes 3/4 have no axis of their own; they mirror lanes 1/2 negated.
        let lane1 = signals.axis(InputAxis::Lane1);
        let lane2 = signals.axis(InputAxis::Lane2);
        let lane3_alternate = -lane1;
        let lane4_alternate = -lane2;
        let trigger_left = signals.axis(InputAxis::LeftArcTapAlternate);
        let trigger_right = signals.axis(InputAxis::RightArcTapAlternate);

        self.lane1.update(lane1);
        self.lane2.update(lane2);
        self.lane3_alternate.update(lane3_alternate);
        self.lane4_alternate.update(lane4_alternate);
        self.trigger_left.update(trigger_left);
        self.trigger_right.update(trigger_right);

        // Arc taps
        if signals.button_down(InputButton::LeftArcTap) {
            self.frame.add_pressed(NoteSide::Left);
        }
        if signals.button_down(InputButton::RightArcTap) {
            self.frame.add_pressed(NoteSide::Right);
        }
        if self.trigger_left.just_changed() && trigger_left > TRIGGER_THRESHOLD {
            self.frame.add_pressed(NoteSide::Left);
        }
        if self.trigger_right.just_changed() && trigger_right > TRIGGER_THRESHOLD {
            self.frame.add_pressed(NoteSide::Right);
        }

        if signals.button_held(InputButton::LeftArcTap) {
            self.frame.add_held(NoteSide::Left);
        }
        if signals.button_held(InputButton::RightArcTap) {
            self.frame.add_held(NoteSide::Right);
        }
        if trigger_left > TRIGGER_THRESHOLD {
            self.frame.add_held(NoteSide::Left);
        }
        if trigger_right > TRIGGER_THRESHOLD {
            self.frame.add_held(NoteSide::Right);
        }

        // Lane buttons
        if self.lane1.just_changed() && lane1 < 0.0 {
            self.frame.add_pressed(NoteSide::Left);
        }
        if self.lane2.just_changed() && lane2 > 0.0 {
            self.frame.add_pressed(NoteSide::Left);
        }
        if signals.button_down(InputButton::Lane3) {
            self.frame.add_pressed(NoteSide::Right);
        }
        if signals.button_down(InputButton::Lane4) {
            self.frame.add_pressed(NoteSide::Right);
        }

        if lane1 < 0.0 {
            self.frame.add_held(NoteSide::Left);
        }
        if lane2 > 0.0 {
            self.frame.add_held(NoteSide::Left);
        }
        if signals.button_held(InputButton::Lane3) {
            self.frame.add_held(NoteSide::Right);
        }
        if signals.button_held(InputButton::Lane4) {
            self.frame.add_held(NoteSide::Right);
        }

        // Alternate lane bindings
        if self.lane3_alternate.just_changed() && lane3_alternate < 0.0 {
            self.frame.add_pressed(NoteSide::Right);
        }
        if self.lane4_alternate.just_changed() && lane4_alternate > 0.0 {
            self.frame.add_pressed(NoteSide::Right);
        }
        if signals.button_down(InputButton::Lane1Alternate) {
            self.frame.add_pressed(NoteSide::Left);
        }
        if signals.button_down(InputButton::Lane2Alternate) {
            self.frame.add_pressed(NoteSide::Left);
        }

        if lane3_alternate < 0.0 {
            self.frame.add_held(NoteSide::Right);
        }
        if lane4_alternate > 0.0 {
            self.frame.add_held(NoteSide::Right);
        }
        if signals.button_held(InputButton::Lane1Alternate) {
            self.frame.add_held(NoteSide::Left);
        }
        if signals.button_held(InputButton::Lane2Alternate) {
            self.frame.add_held(NoteSide::Left);
        }

        for side in self.frame.held() {
            lane_feedback(feedback, *side);
        }

        &self.frame
    }
}

/// Pulse every lane covered by a held side.
fn lane_feedback(feedback: &mut dyn InputFeedback, side: NoteSide) {
    match side {
        NoteSide::Left => {
            for lane in LANE_FROM..=2 {
                feedback.lane_feedback(lane);
            }
        }
        NoteSide::Right => {
            for lane in 3..=LANE_TO {
                feedback.lane_feedback(lane);
            }
        }
        NoteSide::Middle | NoteSide::Undefined => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::feedback::{NullFeedback, RecordingFeedback};
    use crate::traits::signal::MockSignalSource;

    #[test]
    fn all_zero_input_yields_empty_frame() {
        let mut builder = InputFrameBuilder::new();
        let signals = MockSignalSource::new();
        let frame = builder.poll(&signals, &mut NullFeedback);

        assert!(frame.pressed().is_empty());
        assert!(frame.held().is_empty());
        assert_eq!(frame.left_stick, JoystickState::default());
    }

    #[test]
    fn joystick_axes_captured_verbatim() {
        let mut builder = InputFrameBuilder::new();
        let mut signals = MockSignalSource::new();
        signals.set_axis(InputAxis::LeftHorizontal, 0.05);
        signals.set_axis(InputAxis::LeftVertical, -0.02);
        signals.set_axis(InputAxis::RightHorizontal, 1.0);

        let frame = builder.poll(&signals, &mut NullFeedback);
        // No deadzone at this stage.
        assert_eq!(frame.left_stick, JoystickState::new(0.05, -0.02));
        assert_eq!(frame.right_stick, JoystickState::new(1.0, 0.0));
    }

    #[test]
    fn dpad_lane_press_fires_on_edge_only() {
        let mut builder = InputFrameBuilder::new();
        let mut signals = MockSignalSource::new();
        signals.set_axis(InputAxis::Lane1, -1.0);

        let frame = builder.poll(&signals, &mut NullFeedback);
        assert_eq!(frame.pressed(), &[NoteSide::Left]);
        assert_eq!(frame.held(), &[NoteSide::Left]);

        // Same value next frame: held but no new press.
        let frame = builder.poll(&signals, &mut NullFeedback);
        assert!(frame.pressed().is_empty());
        assert_eq!(frame.held(), &[NoteSide::Left]);
    }

    #[test]
    fn dpad_lane_sign_selects_side() {
        let mut builder = InputFrameBuilder::new();
        let mut signals = MockSignalSource::new();
        // Lane 1 owns the negative half of the axis; the positive half is
        // the negated lane 3 alternate.
        signals.set_axis(InputAxis::Lane1, -1.0);
        let frame = builder.poll(&signals, &mut NullFeedback);
        assert_eq!(frame.pressed(), &[NoteSide::Left]);

        signals.set_axis(InputAxis::Lane1, 1.0);
        let frame = builder.poll(&signals, &mut NullFeedback);
        assert_eq!(frame.pressed(), &[NoteSide::Right]);
    }

    #[test]
    fn lane2_positive_presses_left_and_negative_presses_right() {
        let mut builder = InputFrameBuilder::new();
        let mut signals = MockSignalSource::new();
        signals.set_axis(InputAxis::Lane2, 1.0);
        let frame = builder.poll(&signals, &mut NullFeedback);
        assert_eq!(frame.pressed(), &[NoteSide::Left]);

        signals.set_axis(InputAxis::Lane2, -1.0);
        let frame = builder.poll(&signals, &mut NullFeedback);
        // -lane2 = +1 drives the lane 4 alternate.
        assert_eq!(frame.pressed(), &[NoteSide::Right]);
    }

    #[test]
    fn primary_and_alternate_bindings_union() {
        let mut builder = InputFrameBuilder::new();
        let mut signals = MockSignalSource::new();
        signals.press(InputButton::LeftArcTap);
        signals.press(InputButton::Lane1Alternate);
        signals.set_axis(InputAxis::Lane1, -1.0);

        let frame = builder.poll(&signals, &mut NullFeedback);
        // Three Left sources deduplicate into one event.
        assert_eq!(frame.pressed(), &[NoteSide::Left]);
        assert_eq!(frame.held(), &[NoteSide::Left]);
    }

    #[test]
    fn trigger_requires_edge_and_threshold() {
        let mut builder = InputFrameBuilder::new();
        let mut signals = MockSignalSource::new();

        signals.set_axis(InputAxis::LeftArcTapAlternate, 0.4);
        let frame = builder.poll(&signals, &mut NullFeedback);
        assert!(frame.pressed().is_empty());
        assert!(frame.held().is_empty());

        signals.set_axis(InputAxis::LeftArcTapAlternate, 0.9);
        let frame = builder.poll(&signals, &mut NullFeedback);
        assert_eq!(frame.pressed(), &[NoteSide::Left]);
        assert_eq!(frame.held(), &[NoteSide::Left]);

        // Still held, but the edge is gone.
        let frame = builder.poll(&signals, &mut NullFeedback);
        assert!(frame.pressed().is_empty());
        assert_eq!(frame.held(), &[NoteSide::Left]);
    }

    #[test]
    fn held_sides_pulse_their_lanes() {
        let mut builder = InputFrameBuilder::new();
        let mut signals = MockSignalSource::new();
        let mut feedback = RecordingFeedback::new();
        signals.press(InputButton::LeftArcTap);
        signals.press(InputButton::Lane3);

        builder.poll(&signals, &mut feedback);
        assert_eq!(feedback.lanes, vec![1, 2, 3, 4]);
    }
}
