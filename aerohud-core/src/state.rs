//! Frame Input Snapshots
//!
//! Immutable per-frame values handed in by the orientation (AHRS) and
//! traffic (ADS-B) collaborators. The engine only reads them.

use serde::{Deserialize, Serialize};

/// Own-aircraft orientation for one frame
///
/// Headings are `None` while the source reports them unavailable (sensor
/// dropout, no GPS fix).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orientation {
    /// Bank angle in degrees, right wing down positive
    pub roll: f64,
    /// Pitch in degrees, nose up positive
    pub pitch: f64,
    /// True heading in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    /// Heading adjusted for on-screen centering (true, degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_heading: Option<f64>,
    /// GPS ground track (true, degrees)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_heading: Option<f64>,
    /// Own altitude in feet
    pub altitude: f64,
}

impl Orientation {
    /// The heading used to center the display: the projection heading when
    /// present, otherwise the raw heading. Non-finite values count as
    /// unavailable.
    pub fn display_heading(&self) -> Option<f64> {
        self.projection_heading
            .or(self.heading)
            .filter(|heading| heading.is_finite())
    }

    /// The GPS heading, if it is a usable number
    pub fn track(&self) -> Option<f64> {
        self.gps_heading.filter(|heading| heading.is_finite())
    }
}

/// One traffic target, already filtered and deduplicated upstream
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficReport {
    /// True bearing from own aircraft in degrees
    pub bearing: f64,
    /// Distance from own aircraft in feet
    pub distance: f64,
    /// Absolute altitude in feet
    pub altitude: f64,
    /// Altitude relative to own aircraft in feet, positive above
    pub altitude_delta: f64,
    /// Target reports being on the ground
    pub on_ground: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_heading_prefers_projection() {
        let orientation = Orientation {
            heading: Some(90.0),
            projection_heading: Some(92.0),
            ..Orientation::default()
        };
        assert_eq!(orientation.display_heading(), Some(92.0));

        let orientation = Orientation {
            heading: Some(90.0),
            ..Orientation::default()
        };
        assert_eq!(orientation.display_heading(), Some(90.0));
    }

    #[test]
    fn test_non_finite_heading_is_unavailable() {
        let orientation = Orientation {
            projection_heading: Some(f64::NAN),
            gps_heading: Some(f64::INFINITY),
            ..Orientation::default()
        };
        assert_eq!(orientation.display_heading(), None);
        assert_eq!(orientation.track(), None);
    }

    #[test]
    fn test_orientation_deserialize_without_headings() {
        let orientation: Orientation =
            serde_json::from_str(r#"{ "roll": 5.0, "pitch": -2.0, "altitude": 3500.0 }"#).unwrap();
        assert_eq!(orientation.display_heading(), None);
        assert_eq!(orientation.altitude, 3500.0);
    }
}
