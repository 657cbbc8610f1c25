use crate::model::NoteSide;
use crate::util::math::direction_angle;

/// Raw axis pair of one physical joystick, captured verbatim each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JoystickState {
    pub horizontal: f32,
    pub vertical: f32,
}

impl JoystickState {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Whether the vector is long enough to carry a direction.
    pub fn is_valid(&self, sensitivity: f32) -> bool {
        (self.horizontal.powi(2) + self.vertical.powi(2)).sqrt() >= sensitivity
    }

    /// Direction implied by the stick in degrees `[0, 360)`, or `None`
    /// below the sensitivity threshold.
    pub fn direction_angle(&self, sensitivity: f32) -> Option<f32> {
        if !self.is_valid(sensitivity) {
            return None;
        }
        Some(direction_angle(self.horizontal, self.vertical))
    }
}

/// Semantic input state derived from raw signals for one frame.
///
/// Rebuilt from scratch every poll; only the builder's edge-detection state
/// survives across frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pressed: Vec<NoteSide>,
    held: Vec<NoteSide>,
    pub left_stick: JoystickState,
    pub right_stick: JoystickState,
}

impl InputFrame {
    pub fn new() -> Self {
        Self {
            pressed: Vec::with_capacity(4),
            held: Vec::with_capacity(4),
            left_stick: JoystickState::default(),
            right_stick: JoystickState::default(),
        }
    }

    /// Sides that transitioned to active this frame, deduplicated.
    pub fn pressed(&self) -> &[NoteSide] {
        &self.pressed
    }

    /// Sides currently active this frame, deduplicated.
    pub fn held(&self) -> &[NoteSide] {
        &self.held
    }

    /// Stick assigned to an arc color channel; colors beyond the two
    /// physical sticks have none.
    pub fn stick_for_color(&self, color: i32) -> Option<JoystickState> {
        match color {
            0 => Some(self.left_stick),
            1 => Some(self.right_stick),
            _ => None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.pressed.clear();
        self.held.clear();
        self.left_stick = JoystickState::default();
        self.right_stick = JoystickState::default();
    }

    pub(crate) fn add_pressed(&mut self, side: NoteSide) {
        if !self.pressed.contains(&side) {
            self.pressed.push(side);
        }
    }

    pub(crate) fn add_held(&mut self, side: NoteSide) {
        if !self.held.contains(&side) {
            self.held.push(side);
        }
    }
}
