use crate::model::Timing;
use crate::util::math::{approximately, direction_angle};

/// Maximum timing gap between two arcs that still read as one stroke.
pub const LOOSE_CONNECTION_GAP: Timing = 10;
/// Maximum per-axis endpoint distance for the same.
pub const LOOSE_CONNECTION_DISTANCE: f32 = 0.1;

/// Cap travel over one linear slice of an arc, as track-space deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub dx: f32,
    pub dy: f32,
}

impl ArcSegment {
    /// Direction of cap travel in degrees `[0, 360)`, or `None` when the
    /// slice is too short to define one.
    pub fn cap_angle(&self) -> Option<f32> {
        if approximately(self.dx, 0.0) && approximately(self.dy, 0.0) {
            return None;
        }
        Some(direction_angle(self.dx, self.dy))
    }
}

/// Geometry of a single arc as supplied by the chart.
///
/// The judgement core only reads: the color channel, the overall span and
/// endpoints, the judgement tick interval, and the cap direction at a
/// timestamp. How the chart stores and interpolates arcs is its own business.
pub trait ArcGeometry {
    fn color(&self) -> i32;
    fn timing(&self) -> Timing;
    fn end_timing(&self) -> Timing;
    fn x_start(&self) -> f32;
    fn y_start(&self) -> f32;
    fn x_end(&self) -> f32;
    fn y_end(&self) -> f32;
    /// Interval between judgement ticks along this arc.
    fn time_increment(&self) -> f32;
    /// Cap travel at `timing`; `None` outside the arc's span.
    fn segment_at(&self, timing: Timing) -> Option<ArcSegment>;

    /// Whether start and end coincide, i.e. the arc never travels.
    fn is_stationary(&self) -> bool {
        approximately(self.x_start(), self.x_end()) && approximately(self.y_start(), self.y_end())
    }
}

/// Whether `next` starts close enough to where `prev` ended, in both time and
/// position, to be played as a single continuous stroke.
pub fn connected_loosely(prev: &dyn ArcGeometry, next: &dyn ArcGeometry) -> bool {
    (next.timing() - prev.end_timing()).abs() < LOOSE_CONNECTION_GAP
        && (next.x_start() - prev.x_end()).abs() < LOOSE_CONNECTION_DISTANCE
        && (next.y_start() - prev.y_end()).abs() < LOOSE_CONNECTION_DISTANCE
}
