//! Frame-stepped judgement of pending note requests.
//!
//! This module provides:
//! - [`resolve_taps`] / [`resolve_holds`]: discrete and continual lane matching
//! - [`resolve_arcs`]: directional arc matching with continuity correction
//! - [`ColorLockRegistry`]: per-color misinput lock state
//! - [`ControllerJudge`]: session object sequencing one frame of judgement

mod arc;
mod color_lock;
mod handler;
mod tap;

pub use arc::resolve_arcs;
pub use color_lock::{ColorLockRegistry, ColorLockState, MAX_COLOR_CHANNELS};
pub use handler::ControllerJudge;
pub use tap::{resolve_holds, resolve_taps};
