//! Bearing Projection
//!
//! Maps own heading plus a target's bearing (and, for projected reticles,
//! distance and altitude delta) to screen offsets.
//!
//! Known gap: the projected position ignores own roll, and the vertical
//! angle compares altitudes that may not share a pressure reference.

use nalgebra::Vector2;

/// Altitude band in feet inside which traffic is treated as above us
pub const BELOW_HYSTERESIS_FEET: f64 = 100.0;

/// Horizontal pixel position of a heading bug on a 360-degree-wide strip.
///
/// Dead ahead (bearing == heading) lands at 180 degrees, the strip's middle.
/// One wrap in each direction is applied, enough for headings and bearings
/// in [0, 360).
pub fn heading_bug_x(heading: f64, bearing: f64, pixels_per_degree_x: f64) -> i32 {
    let mut delta = bearing - heading + 180.0;
    if delta < 0.0 {
        delta += 360.0;
    }
    if delta > 360.0 {
        delta -= 360.0;
    }

    (delta * pixels_per_degree_x) as i32
}

/// Screen offset of a target relative to the screen center, y down.
///
/// `distance` must be non-zero.
pub fn onscreen_traffic_projection(
    heading: f64,
    pitch: f64,
    bearing: f64,
    distance: f64,
    altitude_delta: f64,
    pixels_per_degree: f64,
) -> Vector2<f64> {
    debug_assert!(distance != 0.0, "projection needs a non-zero distance");

    // TODO: rotate by own roll once the AHRS supplies a roll-stable reference
    let vertical_degrees = (altitude_delta / distance).atan().to_degrees() - pitch;
    let horizontal_degrees = bearing - heading;

    Vector2::new(
        horizontal_degrees * pixels_per_degree,
        -vertical_degrees * pixels_per_degree,
    )
}

/// True when the target sits more than the hysteresis band below us
pub fn is_below(own_altitude: f64, traffic_altitude: f64) -> bool {
    own_altitude - BELOW_HYSTERESIS_FEET > traffic_altitude
}
