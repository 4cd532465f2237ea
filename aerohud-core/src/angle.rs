//! Angle Math
//!
//! Angle normalization, magnetic declination and precomputed trigonometry
//! for integer degrees.
//!
//! All stored angles (table keys, displayed headings) go through
//! [`normalize`] first, so nothing negative or at/above 360 is ever used as
//! a key.

use crate::error::HudError;

/// Lowest integer degree held in the trig tables
pub const TRIG_TABLE_MIN_DEGREES: i32 = -360;

/// Highest integer degree held in the trig tables
pub const TRIG_TABLE_MAX_DEGREES: i32 = 360;

/// Wrap an angle into [0, 360)
pub fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an integer angle into [0, 360)
pub fn normalize_degrees(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Integer lookup key in [0, 360] for a heading.
///
/// Rounding can produce 360 for headings just below north, which is why
/// heading tables carry 361 entries.
pub fn heading_key(heading: f64) -> usize {
    normalize(heading).round() as usize
}

/// Process-wide angle helpers: declination plus sin/cos tables.
///
/// Built once by the engine and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AngleMath {
    declination: f64,
    sin: Box<[f64]>,
    cos: Box<[f64]>,
}

impl AngleMath {
    /// Build the trig tables for the given magnetic declination (degrees,
    /// signed, added to true headings).
    pub fn new(declination: f64) -> Result<Self, HudError> {
        if !declination.is_finite() || !(-180.0..=180.0).contains(&declination) {
            return Err(HudError::config(
                "declination",
                format!("{declination} is outside [-180, 180]"),
            ));
        }

        let (sin, cos): (Vec<f64>, Vec<f64>) = (TRIG_TABLE_MIN_DEGREES..=TRIG_TABLE_MAX_DEGREES)
            .map(|degrees| (degrees as f64).to_radians().sin_cos())
            .unzip();

        log::debug!(
            "Built trig tables for [{}, {}] degrees, declination {}",
            TRIG_TABLE_MIN_DEGREES,
            TRIG_TABLE_MAX_DEGREES,
            declination
        );

        Ok(AngleMath {
            declination,
            sin: sin.into_boxed_slice(),
            cos: cos.into_boxed_slice(),
        })
    }

    /// The configured declination in degrees
    pub fn declination(&self) -> f64 {
        self.declination
    }

    /// Convert a true heading or bearing to magnetic, in [0, 360)
    pub fn apply_declination(&self, true_heading: f64) -> f64 {
        normalize(true_heading + self.declination)
    }

    /// Sine of an integer angle in degrees.
    ///
    /// Table lookup inside [-360, 360], direct computation outside.
    pub fn sin(&self, degrees: i32) -> f64 {
        match Self::table_index(degrees) {
            Some(index) => self.sin[index],
            None => (degrees as f64).to_radians().sin(),
        }
    }

    /// Cosine of an integer angle in degrees.
    ///
    /// Table lookup inside [-360, 360], direct computation outside.
    pub fn cos(&self, degrees: i32) -> f64 {
        match Self::table_index(degrees) {
            Some(index) => self.cos[index],
            None => (degrees as f64).to_radians().cos(),
        }
    }

    fn table_index(degrees: i32) -> Option<usize> {
        if (TRIG_TABLE_MIN_DEGREES..=TRIG_TABLE_MAX_DEGREES).contains(&degrees) {
            Some((degrees - TRIG_TABLE_MIN_DEGREES) as usize)
        } else {
            None
        }
    }
}
