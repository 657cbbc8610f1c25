//! Float and angle helpers shared by input sampling and arc judgement.

use std::f32::consts::FRAC_PI_2;

/// Tolerant float equality for values near zero or near each other.
pub fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}

/// Compass-style direction of a 2D vector in degrees `[0, 360)`:
/// 0 = up, 90 = right, 180 = down, 270 = left.
///
/// Callers must reject zero-magnitude vectors first; `(0, 0)` has no
/// direction and yields NaN.
pub fn direction_angle(h: f32, v: f32) -> f32 {
    let mut degrees = (FRAC_PI_2 - (v / h).atan()).to_degrees();
    if h < 0.0 {
        degrees += 180.0;
    }
    degrees.rem_euclid(360.0)
}

/// Circular distance between two directions in degrees, in `[0, 180]`.
/// Both inputs are expected in `[0, 360)`.
pub fn angle_deviation(a: f32, b: f32) -> f32 {
    let d = (b - a).abs();
    d.min(360.0 - d)
}
