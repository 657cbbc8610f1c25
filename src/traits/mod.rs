//! Seams to the crate's external collaborators.
//!
//! - [`SignalSource`]: named digital/analog controller signals
//! - [`InputFeedback`]: lane pulses and the red arc tint

pub mod feedback;
pub mod signal;

pub use feedback::{InputFeedback, NullFeedback, RecordingFeedback};
pub use signal::{InputAxis, InputButton, MockSignalSource, SignalSource};
