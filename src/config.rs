use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::traits::signal::{InputAxis, InputButton};

const CONTROLLER_CONFIG_FILE: &str = "controller.json";

/// Tunable thresholds for directional arc judgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JudgeTuning {
    /// Maximum deviation (degrees) between stick direction and arc cap
    /// direction for a raw accept.
    pub judgement_threshold: f32,
    /// Minimum tangent change (degrees) across a stitch point for the
    /// continuity correction to fire.
    pub active_correction_threshold: f32,
    /// Minimum stick magnitude for the vector to carry a direction.
    pub joystick_sensitivity: f32,
}

impl Default for JudgeTuning {
    fn default() -> Self {
        Self {
            judgement_threshold: 40.0,
            active_correction_threshold: 90.0 - 22.5,
            joystick_sensitivity: 0.125,
        }
    }
}

/// Gamepad bindings for every signal the judgement core reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControllerBindings {
    /// gilrs button name per digital signal, indexed by `InputButton::index()`.
    pub buttons: Vec<String>,
    /// gilrs axis name per analog signal, indexed by `InputAxis::index()`.
    /// `None` leaves the signal unbound.
    pub axes: Vec<Option<String>>,
}

impl Default for ControllerBindings {
    fn default() -> Self {
        Self {
            buttons: vec![
                "LeftTrigger".to_string(),  // Left arc tap - LB
                "RightTrigger".to_string(), // Right arc tap - RB
                "South".to_string(),        // Lane 3 - A/Cross
                "East".to_string(),         // Lane 4 - B/Circle
                "West".to_string(),         // Lane 1 alternate - X/Square
                "North".to_string(),        // Lane 2 alternate - Y/Triangle
            ],
            axes: vec![
                Some("LeftStickX".to_string()),
                Some("LeftStickY".to_string()),
                Some("RightStickX".to_string()),
                Some("RightStickY".to_string()),
                Some("DPadX".to_string()), // Lane 1 / negated lane 3
                Some("DPadY".to_string()), // Lane 2 / negated lane 4
                Some("LeftZ".to_string()), // Left arc tap alternate trigger
                Some("RightZ".to_string()),
            ],
        }
    }
}

impl ControllerBindings {
    /// Signal bound to a gilrs button name, if any.
    pub fn button_signal(&self, name: &str) -> Option<InputButton> {
        InputButton::all()
            .iter()
            .copied()
            .find(|button| self.buttons.get(button.index()).map(String::as_str) == Some(name))
    }

    /// Signal bound to a gilrs axis name, if any.
    pub fn axis_signal(&self, name: &str) -> Option<InputAxis> {
        InputAxis::all().iter().copied().find(|axis| {
            self.axes.get(axis.index()).and_then(|binding| binding.as_deref()) == Some(name)
        })
    }
}

/// Complete controller configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ControllerConfig {
    pub tuning: JudgeTuning,
    pub bindings: ControllerBindings,
}

impl ControllerConfig {
    /// Load configuration from the default file.
    pub fn load() -> Result<Self> {
        Self::load_from(CONTROLLER_CONFIG_FILE)
    }

    /// Load configuration from a specific path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)?;
        config.normalize();
        Ok(config)
    }

    /// Save configuration to the default file.
    pub fn save(&self) -> Result<()> {
        self.save_to(CONTROLLER_CONFIG_FILE)
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn normalize(&mut self) {
        let defaults = ControllerBindings::default();

        if self.bindings.buttons.len() < InputButton::COUNT {
            let start = self.bindings.buttons.len();
            self.bindings
                .buttons
                .extend_from_slice(&defaults.buttons[start..InputButton::COUNT]);
        } else if self.bindings.buttons.len() > InputButton::COUNT {
            self.bindings.buttons.truncate(InputButton::COUNT);
        }

        if self.bindings.axes.len() < InputAxis::COUNT {
            let start = self.bindings.axes.len();
            self.bindings
                .axes
                .extend_from_slice(&defaults.axes[start..InputAxis::COUNT]);
        } else if self.bindings.axes.len() > InputAxis::COUNT {
            self.bindings.axes.truncate(InputAxis::COUNT);
        }
    }
}
