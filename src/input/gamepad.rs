use anyhow::{Result, anyhow};
use gilrs::{Axis, Button, EventType, Gilrs};
use tracing::debug;

use crate::config::ControllerBindings;
use crate::traits::signal::{InputAxis, InputButton, SignalSource};

/// State of one bound digital signal.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonState {
    pressed: bool,
    just_pressed: bool,
}

/// Gamepad-backed signal source using gilrs.
///
/// Drains the event queue once per frame in [`SignalSource::begin_frame`];
/// between drains all readings are stable, so the judgement core sees one
/// consistent physical state per frame.
pub struct GamepadSignalSource {
    gilrs: Gilrs,
    bindings: ControllerBindings,
    buttons: [ButtonState; InputButton::COUNT],
    axes: [f32; InputAxis::COUNT],
}

impl GamepadSignalSource {
    /// Create a signal source with the given bindings.
    pub fn new(bindings: ControllerBindings) -> Result<Self> {
        let gilrs =
            Gilrs::new().map_err(|e| anyhow!("failed to initialize gamepad support: {e}"))?;
        Ok(Self {
            gilrs,
            bindings,
            buttons: [ButtonState::default(); InputButton::COUNT],
            axes: [0.0; InputAxis::COUNT],
        })
    }

    pub fn bindings(&self) -> &ControllerBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: ControllerBindings) {
        self.bindings = bindings;
    }
}

impl SignalSource for GamepadSignalSource {
    fn begin_frame(&mut self) {
        for state in &mut self.buttons {
            state.just_pressed = false;
        }

        while let Some(event) = self.gilrs.next_event() {
            match event.event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(signal) = self.bindings.button_signal(button_name(button)) {
                        let state = &mut self.buttons[signal.index()];
                        if !state.pressed {
                            state.pressed = true;
                            state.just_pressed = true;
                        }
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(signal) = self.bindings.button_signal(button_name(button)) {
                        self.buttons[signal.index()].pressed = false;
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    if let Some(signal) = self.bindings.axis_signal(axis_name(axis)) {
                        self.axes[signal.index()] = value;
                    }
                }
                EventType::Connected => {
                    debug!("Gamepad connected: {:?}", event.id);
                }
                EventType::Disconnected => {
                    debug!("Gamepad disconnected: {:?}", event.id);
                }
                _ => {}
            }
        }
    }

    fn button_down(&self, button: InputButton) -> bool {
        self.buttons[button.index()].just_pressed
    }

    fn button_held(&self, button: InputButton) -> bool {
        self.buttons[button.index()].pressed
    }

    fn axis(&self, axis: InputAxis) -> f32 {
        self.axes[axis.index()]
    }
}

/// Convert Button to its name for comparison with bindings.
fn button_name(button: Button) -> &'static str {
    match button {
        Button::South => "South",
        Button::East => "East",
        Button::North => "North",
        Button::West => "West",
        Button::C => "C",
        Button::Z => "Z",
        Button::LeftTrigger => "LeftTrigger",
        Button::LeftTrigger2 => "LeftTrigger2",
        Button::RightTrigger => "RightTrigger",
        Button::RightTrigger2 => "RightTrigger2",
        Button::Select => "Select",
        Button::Start => "Start",
        Button::Mode => "Mode",
        Button::LeftThumb => "LeftThumb",
        Button::RightThumb => "RightThumb",
        Button::DPadUp => "DPadUp",
        Button::DPadDown => "DPadDown",
        Button::DPadLeft => "DPadLeft",
        Button::DPadRight => "DPadRight",
        Button::Unknown => "Unknown",
    }
}

/// Convert Axis to its name for comparison with bindings.
fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::LeftStickX => "LeftStickX",
        Axis::LeftStickY => "LeftStickY",
        Axis::LeftZ => "LeftZ",
        Axis::RightStickX => "RightStickX",
        Axis::RightStickY => "RightStickY",
        Axis::RightZ => "RightZ",
        Axis::DPadX => "DPadX",
        Axis::DPadY => "DPadY",
        Axis::Unknown => "Unknown",
    }
}
