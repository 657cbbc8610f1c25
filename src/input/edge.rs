use crate::util::math::approximately;

/// Edge detector for an analog signal driven like a button (d-pad lane axes,
/// triggers). Keeps the previous frame's raw value across frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInput {
    just_changed: bool,
    previous: f32,
}

impl LinearInput {
    /// Feed this frame's raw value. Call exactly once per frame.
    pub fn update(&mut self, value: f32) {
        self.just_changed = !approximately(value, self.previous);
        self.previous = value;
    }

    /// Whether the value changed between the previous frame and this one.
    pub fn just_changed(&self) -> bool {
        self.just_changed
    }
}
