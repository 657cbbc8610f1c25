use std::rc::Rc;

use crate::model::Timing;
use crate::model::arc::ArcGeometry;

/// Outcome delivered to hold and arc receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SustainJudgement {
    /// Whether the request resolved at or past its expiry timing.
    pub is_late: bool,
    /// Forwarded from the request; marks ticks that contribute to scoring.
    pub is_judgement: bool,
}

/// Receiver for tap requests, called with the signed timing error
/// (positive = late press) and the request's payload.
pub type TapReceiver<P> = Box<dyn FnOnce(Timing, P)>;

/// Receiver for hold and arc requests.
pub type SustainReceiver<P> = Box<dyn FnOnce(SustainJudgement, P)>;

/// Pending judgement for a tap note on a lane.
///
/// Requests live in scheduler-owned queues until a matcher removes them or
/// the scheduler expires them; each receiver runs at most once.
pub struct LaneTapRequest<P> {
    pub lane: i32,
    pub start_at_timing: Timing,
    pub expire_at_timing: Timing,
    /// Timing at which a perfectly accurate hit occurs.
    pub auto_at_timing: Timing,
    pub receiver: TapReceiver<P>,
    pub properties: P,
}

/// Pending judgement for a floating arc tap.
pub struct ArcTapRequest<P> {
    /// World x of the tap, used to derive its side.
    pub x: f32,
    pub width: f32,
    pub start_at_timing: Timing,
    pub expire_at_timing: Timing,
    pub auto_at_timing: Timing,
    pub receiver: TapReceiver<P>,
    pub properties: P,
}

/// Pending judgement tick for a lane hold note.
pub struct LaneHoldRequest<P> {
    pub lane: i32,
    pub start_at_timing: Timing,
    pub expire_at_timing: Timing,
    pub is_judgement: bool,
    pub receiver: SustainReceiver<P>,
    pub properties: P,
}

/// Pending judgement tick for a directional arc.
pub struct ArcRequest<P> {
    pub arc: Rc<dyn ArcGeometry>,
    pub start_at_timing: Timing,
    pub expire_at_timing: Timing,
    pub is_judgement: bool,
    pub receiver: SustainReceiver<P>,
    pub properties: P,
}
