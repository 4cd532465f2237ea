//! HUD Configuration
//!
//! Settings read once at startup by the host application. The core never
//! loads files itself; hosts deserialize a [`HudConfig`] from whatever source
//! they use and hand it to [`HudEngine::new`](crate::HudEngine::new).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::HudError;

/// Yards in a statute mile; the reticle distance bands are expressed in it
pub const YARDS_PER_STATUTE_MILE: f64 = 1760.0;

/// Default number of traffic reticles laid out per frame
pub const DEFAULT_MAX_TARGET_BUGS: usize = 25;

bitflags! {
    /// Symbology layers to lay out each frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Elements: u8 {
        /// Traffic reticles
        const TRAFFIC = 0b0000_0001;
        /// Compass heading strip along the top
        const HEADING_STRIP = 0b0000_0010;
        /// Magnetic / GPS heading readout box
        const HEADING_BOX = 0b0000_0100;
        /// Roll arc, bank ticks and live roll marker
        const ROLL_INDICATOR = 0b0000_1000;
        /// Pitch / roll text readout
        const ATTITUDE_TEXT = 0b0001_0000;
    }
}

impl Default for Elements {
    fn default() -> Self {
        Elements::all()
    }
}

/// Where traffic reticles are placed on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrafficMode {
    /// Pinned to the top (above) or bottom (below) border at the bearing's x
    #[default]
    HeadingBugs,
    /// Placed at the projected bearing / elevation relative to screen center
    Projected,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HudConfig {
    /// Magnetic declination in degrees, added to true headings
    pub declination: f64,
    /// Degrees of pitch visible across the screen height
    pub degrees_of_pitch: f64,
    /// Multiplier applied to the vertical pixels-per-degree
    pub pitch_degrees_display_scaler: f64,
    /// Maximum traffic reticles per frame
    pub max_target_bugs: usize,
    /// Reticle scale for targets at or beyond the faraway distance
    pub min_reticle_scale: f64,
    /// Reticle scale for targets at or inside the superclose distance
    pub max_reticle_scale: f64,
    /// Distance (feet) at or below which reticles use the maximum scale
    pub superclose_distance: f64,
    /// Distance (feet) at or above which reticles use the minimum scale
    pub faraway_distance: f64,
    /// Vertical squash of the roll arc
    pub arc_squash: f64,
    /// Reticle placement
    pub traffic_mode: TrafficMode,
    /// Enabled symbology layers
    pub elements: Elements,
}

impl Default for HudConfig {
    fn default() -> Self {
        HudConfig {
            declination: 0.0,
            degrees_of_pitch: 90.0,
            pitch_degrees_display_scaler: 2.0,
            max_target_bugs: DEFAULT_MAX_TARGET_BUGS,
            min_reticle_scale: 0.05,
            max_reticle_scale: 0.20,
            superclose_distance: YARDS_PER_STATUTE_MILE / 8.0,
            faraway_distance: YARDS_PER_STATUTE_MILE * 5.0,
            arc_squash: 0.75,
            traffic_mode: TrafficMode::HeadingBugs,
            elements: Elements::all(),
        }
    }
}

impl HudConfig {
    /// Check every value against its domain
    pub fn validate(&self) -> Result<(), HudError> {
        if !self.declination.is_finite() || !(-180.0..=180.0).contains(&self.declination) {
            return Err(HudError::config(
                "declination",
                format!("{} is outside [-180, 180]", self.declination),
            ));
        }
        if !(self.degrees_of_pitch.is_finite() && self.degrees_of_pitch > 0.0) {
            return Err(HudError::config("degreesOfPitch", "must be positive"));
        }
        if !(self.pitch_degrees_display_scaler.is_finite()
            && self.pitch_degrees_display_scaler > 0.0)
        {
            return Err(HudError::config(
                "pitchDegreesDisplayScaler",
                "must be positive",
            ));
        }
        if !(self.min_reticle_scale > 0.0 && self.min_reticle_scale <= self.max_reticle_scale)
            || !self.max_reticle_scale.is_finite()
        {
            return Err(HudError::config(
                "minReticleScale",
                format!(
                    "need 0 < min <= max, got {} and {}",
                    self.min_reticle_scale, self.max_reticle_scale
                ),
            ));
        }
        if !(self.superclose_distance >= 0.0 && self.superclose_distance < self.faraway_distance)
            || !self.faraway_distance.is_finite()
        {
            return Err(HudError::config(
                "supercloseDistance",
                format!(
                    "need 0 <= superclose < faraway, got {} and {}",
                    self.superclose_distance, self.faraway_distance
                ),
            ));
        }
        if !(self.arc_squash > 0.0 && self.arc_squash <= 1.0) {
            return Err(HudError::config("arcSquash", "must be in (0, 1]"));
        }
        Ok(())
    }
}
