//! Traffic Bug Layout
//!
//! Turns one [`TrafficReport`] into a positioned, scaled and colored reticle.
//!
//! # Features
//!
//! - Heading bugs pinned to the top/bottom border at the bearing's x
//! - Projected reticles placed by bearing and elevation angle
//! - Distance-driven reticle scale with clamped ends
//! - Above/below selection with a 100 ft hysteresis band
//!
//! # Example
//!
//! ```rust,ignore
//! use aerohud_core::traffic::TrafficSymbology;
//!
//! let symbology = TrafficSymbology::new(&geometry, &config);
//! match symbology.bug(&angles, heading, &orientation, &report) {
//!     Ok(bug) => primitives.push(bug.primitive()),
//!     Err(e) => log::debug!("dropping report: {}", e),
//! }
//! ```

mod projection;
mod reticle;

pub use projection::{
    heading_bug_x, is_below, onscreen_traffic_projection, BELOW_HYSTERESIS_FEET,
};
pub use reticle::{ReticleBorders, ReticleGeometry, ReticleKind, ReticleScaler};

use thiserror::Error;

use crate::angle::{normalize, AngleMath};
use crate::config::{HudConfig, TrafficMode};
use crate::primitive::Primitive;
use crate::screen::{Color, ScreenGeometry, ScreenPoint};
use crate::state::{Orientation, TrafficReport};

/// Why a single traffic report produced no reticle
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BugError {
    #[error("Bearing {0} is not a number")]
    InvalidBearing(f64),
    #[error("Distance {0} is not a positive number")]
    InvalidDistance(f64),
    #[error("Altitude {0} is not a number")]
    InvalidAltitude(f64),
    #[error("Projected position is not a number")]
    InvalidProjection,
}

/// A laid-out traffic reticle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficBug {
    pub reticle: ReticleGeometry,
    pub kind: ReticleKind,
    pub scale: f64,
    pub color: Color,
}

impl TrafficBug {
    pub fn primitive(&self) -> Primitive {
        Primitive::Polygon {
            points: self.reticle.points,
            fill: self.color,
        }
    }
}

/// Precomputed per-screen state for traffic reticles
#[derive(Debug, Clone, Copy)]
pub struct TrafficSymbology {
    scaler: ReticleScaler,
    borders: ReticleBorders,
    mode: TrafficMode,
    center: ScreenPoint,
    pixels_per_degree_x: f64,
    pixels_per_degree_y: f64,
}

impl TrafficSymbology {
    pub fn new(geometry: &ScreenGeometry, config: &HudConfig) -> Self {
        TrafficSymbology {
            scaler: ReticleScaler::from_config(config),
            borders: ReticleBorders::new(geometry),
            mode: config.traffic_mode,
            center: geometry.center,
            pixels_per_degree_x: geometry.pixels_per_degree_x,
            pixels_per_degree_y: geometry.pixels_per_degree_y,
        }
    }

    pub fn scaler(&self) -> &ReticleScaler {
        &self.scaler
    }

    /// Lay out one report against the current heading.
    ///
    /// The bearing is converted to magnetic while `heading` is used as
    /// given, so with a non-zero declination a target dead ahead sits
    /// `declination` degrees off the center of the strip.
    pub fn bug(
        &self,
        angles: &AngleMath,
        heading: f64,
        orientation: &Orientation,
        report: &TrafficReport,
    ) -> Result<TrafficBug, BugError> {
        if !report.bearing.is_finite() {
            return Err(BugError::InvalidBearing(report.bearing));
        }
        if !(report.distance.is_finite() && report.distance > 0.0) {
            return Err(BugError::InvalidDistance(report.distance));
        }
        if !report.altitude.is_finite() {
            return Err(BugError::InvalidAltitude(report.altitude));
        }

        let scale = self.scaler.reticle_size(report.distance);
        let bearing = angles.apply_declination(report.bearing);
        // TODO: compare pressure altitude to pressure altitude once ownship data carries it
        let kind = if is_below(orientation.altitude, report.altitude) {
            ReticleKind::Below
        } else {
            ReticleKind::Above
        };

        let reticle = match self.mode {
            TrafficMode::HeadingBugs => {
                let x = heading_bug_x(heading, bearing, self.pixels_per_degree_x);
                self.borders.heading_bug(kind, x, scale)
            }
            TrafficMode::Projected => {
                if !report.altitude_delta.is_finite() {
                    return Err(BugError::InvalidAltitude(report.altitude_delta));
                }
                let offset = onscreen_traffic_projection(
                    heading,
                    orientation.pitch,
                    nearest_bearing(heading, bearing),
                    report.distance,
                    report.altitude_delta,
                    self.pixels_per_degree_y,
                );
                if !(offset.x.is_finite() && offset.y.is_finite()) {
                    return Err(BugError::InvalidProjection);
                }
                let center = ScreenPoint::new(
                    self.center.x + offset.x as i32,
                    self.center.y + offset.y as i32,
                );
                self.borders.centered_on(kind, center, scale)
            }
        };

        Ok(TrafficBug {
            reticle,
            kind,
            scale,
            color: if report.on_ground {
                Color::Blue
            } else {
                Color::Red
            },
        })
    }
}

/// `bearing` shifted by whole turns so it lies within half a turn of
/// `heading`, in [heading - 180, heading + 180)
fn nearest_bearing(heading: f64, bearing: f64) -> f64 {
    heading + normalize(bearing - heading + 180.0) - 180.0
}
