//! Traffic Reticles
//!
//! Distance-driven reticle scaling and the triangle shapes used for targets
//! above and below own aircraft.

use serde::{Deserialize, Serialize};

use crate::config::HudConfig;
use crate::screen::{ScreenGeometry, ScreenPoint};

/// Portion of the screen height reserved below the lowest reticle
const BOTTOM_MARGIN: f64 = 0.1;

/// Maps target distance to an on-screen reticle scale.
///
/// Closer targets get larger reticles. The scale is flat at both ends and
/// linear between the superclose and faraway distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReticleScaler {
    superclose: f64,
    faraway: f64,
    min_scale: f64,
    max_scale: f64,
}

impl ReticleScaler {
    pub fn new(superclose: f64, faraway: f64, min_scale: f64, max_scale: f64) -> Self {
        ReticleScaler {
            superclose,
            faraway,
            min_scale,
            max_scale,
        }
    }

    pub fn from_config(config: &HudConfig) -> Self {
        Self::new(
            config.superclose_distance,
            config.faraway_distance,
            config.min_reticle_scale,
            config.max_reticle_scale,
        )
    }

    /// Reticle scale (fraction of screen height) for a distance in feet
    pub fn reticle_size(&self, distance: f64) -> f64 {
        self.reticle_size_between(distance, self.min_scale, self.max_scale)
    }

    /// Reticle scale using explicit scale bounds
    pub fn reticle_size_between(&self, distance: f64, min_scale: f64, max_scale: f64) -> f64 {
        if distance <= self.superclose {
            max_scale
        } else if distance >= self.faraway {
            min_scale
        } else {
            let ratio = (distance - self.superclose) / (self.faraway - self.superclose);
            min_scale + (max_scale - min_scale) * (1.0 - ratio)
        }
    }
}

/// Whether a reticle marks traffic above or below own aircraft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReticleKind {
    Above,
    Below,
}

/// A reticle polygon plus the y of its flat edge, where labels attach
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReticleGeometry {
    pub points: [ScreenPoint; 3],
    pub edge_y: i32,
}

impl ReticleGeometry {
    /// Triangle with its apex at `apex`, pointing up for targets above and
    /// down for targets below, `size` pixels tall and wide.
    pub fn pointing(kind: ReticleKind, apex: ScreenPoint, size: i32) -> Self {
        let half = (size >> 1).max(1);
        let edge_y = match kind {
            ReticleKind::Above => apex.y + size,
            ReticleKind::Below => apex.y - size,
        };

        ReticleGeometry {
            points: [
                apex,
                ScreenPoint::new(apex.x - half, edge_y),
                ScreenPoint::new(apex.x + half, edge_y),
            ],
            edge_y,
        }
    }
}

/// Screen bands that heading-bug reticles are pinned to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReticleBorders {
    pub top: i32,
    pub bottom: i32,
    pub screen_height: i32,
}

impl ReticleBorders {
    pub fn new(geometry: &ScreenGeometry) -> Self {
        ReticleBorders {
            top: 0,
            bottom: geometry.height - (geometry.height as f64 * BOTTOM_MARGIN) as i32,
            screen_height: geometry.height,
        }
    }

    /// Reticle size in pixels for a scale
    pub fn size_for(&self, scale: f64) -> i32 {
        ((scale * self.screen_height as f64) as i32).max(1)
    }

    /// Reticle pinned to the top border (above) or bottom border (below)
    pub fn heading_bug(&self, kind: ReticleKind, x: i32, scale: f64) -> ReticleGeometry {
        let apex_y = match kind {
            ReticleKind::Above => self.top,
            ReticleKind::Below => self.bottom,
        };
        ReticleGeometry::pointing(kind, ScreenPoint::new(x, apex_y), self.size_for(scale))
    }

    /// Reticle centered on a projected screen position
    pub fn centered_on(
        &self,
        kind: ReticleKind,
        center: ScreenPoint,
        scale: f64,
    ) -> ReticleGeometry {
        let size = self.size_for(scale);
        let half = size >> 1;
        let apex_y = match kind {
            ReticleKind::Above => center.y - half,
            ReticleKind::Below => center.y + half,
        };
        ReticleGeometry::pointing(kind, ScreenPoint::new(center.x, apex_y), size)
    }
}
