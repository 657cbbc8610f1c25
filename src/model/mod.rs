// Data model for judgement requests, sides, and arc geometry.

pub mod arc;
pub mod request;
pub mod side;

pub use arc::{ArcGeometry, ArcSegment, connected_loosely};
pub use request::{
    ArcRequest, ArcTapRequest, LaneHoldRequest, LaneTapRequest, SustainJudgement, SustainReceiver,
    TapReceiver,
};
pub use side::NoteSide;

/// Chart-relative timestamp in milliseconds.
pub type Timing = i32;
