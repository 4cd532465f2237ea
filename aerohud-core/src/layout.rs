//! Symbology Layout
//!
//! The per-frame orchestrator. [`HudEngine`] owns every precomputed table
//! and is immutable once built, so one engine can be shared behind an `Arc`
//! by any number of renderers. [`SymbologyLayout`] holds what a single
//! renderer carries from frame to frame: the last usable heading and
//! attitude, and a reusable output buffer.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aerohud_core::{HudConfig, HudEngine, SymbologyLayout};
//!
//! let engine = Arc::new(HudEngine::new(800, 480, HudConfig::default())?);
//! let mut layout = SymbologyLayout::new(engine);
//!
//! // once per frame
//! for primitive in layout.layout(&orientation, &traffic) {
//!     renderer.draw(primitive);
//! }
//! ```

use std::sync::Arc;

use crate::angle::AngleMath;
use crate::attitude::AttitudeArcGeometry;
use crate::config::{Elements, HudConfig};
use crate::error::HudError;
use crate::heading::{HeadingReadout, HeadingSymbology};
use crate::primitive::{CachedText, Primitive};
use crate::screen::ScreenGeometry;
use crate::state::{Orientation, TrafficReport};
use crate::traffic::{TrafficBug, TrafficSymbology};

/// All precomputed, read-only symbology state for one screen
#[derive(Debug)]
pub struct HudEngine {
    config: HudConfig,
    geometry: ScreenGeometry,
    angles: AngleMath,
    traffic: TrafficSymbology,
    heading: HeadingSymbology,
    attitude: AttitudeArcGeometry,
}

impl HudEngine {
    /// Build every table for a `width` x `height` framebuffer
    pub fn new(width: i32, height: i32, config: HudConfig) -> Result<Self, HudError> {
        let geometry = ScreenGeometry::new(width, height, &config)?;
        let angles = AngleMath::new(config.declination)?;
        let traffic = TrafficSymbology::new(&geometry, &config);
        let heading = HeadingSymbology::new(&geometry, &angles);
        let attitude = AttitudeArcGeometry::new(&geometry, config.arc_squash);

        log::info!(
            "HUD engine ready for {}x{}, elements {:?}, traffic {:?}",
            width,
            height,
            config.elements,
            config.traffic_mode
        );

        Ok(HudEngine {
            config,
            geometry,
            angles,
            traffic,
            heading,
            attitude,
        })
    }

    pub fn config(&self) -> &HudConfig {
        &self.config
    }

    pub fn geometry(&self) -> &ScreenGeometry {
        &self.geometry
    }

    pub fn angles(&self) -> &AngleMath {
        &self.angles
    }

    pub fn traffic(&self) -> &TrafficSymbology {
        &self.traffic
    }

    pub fn heading(&self) -> &HeadingSymbology {
        &self.heading
    }

    pub fn attitude(&self) -> &AttitudeArcGeometry {
        &self.attitude
    }

    /// Reticles for up to `max_target_bugs` reports, in input order.
    ///
    /// Reports whose geometry cannot be computed are logged and skipped.
    pub fn traffic_bugs<'a>(
        &'a self,
        heading: f64,
        orientation: &'a Orientation,
        traffic: &'a [TrafficReport],
    ) -> impl Iterator<Item = TrafficBug> + 'a {
        traffic
            .iter()
            .take(self.config.max_target_bugs)
            .enumerate()
            .filter_map(move |(index, report)| {
                match self.traffic.bug(&self.angles, heading, orientation, report) {
                    Ok(bug) => Some(bug),
                    Err(e) => {
                        log::debug!("Dropping traffic report {}: {}", index, e);
                        None
                    }
                }
            })
    }
}

/// Counts from the most recent layout pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Reticles emitted
    pub reticles: usize,
    /// Reports dropped because their geometry failed
    pub dropped: usize,
    /// Traffic layout skipped because the heading was unavailable
    pub traffic_skipped: bool,
}

/// Per-renderer frame state
///
/// Readout labels are cached here, so frames whose displayed values did not
/// change reuse the previous strings.
#[derive(Debug)]
pub struct SymbologyLayout {
    engine: Arc<HudEngine>,
    last_heading: Option<f64>,
    last_attitude: Option<(f64, f64)>,
    heading_text: CachedText<HeadingReadout>,
    attitude_text: CachedText<(i32, i32)>,
    primitives: Vec<Primitive>,
    stats: FrameStats,
}

impl SymbologyLayout {
    pub fn new(engine: Arc<HudEngine>) -> Self {
        SymbologyLayout {
            engine,
            last_heading: None,
            last_attitude: None,
            heading_text: CachedText::new(),
            attitude_text: CachedText::new(),
            primitives: Vec::new(),
            stats: FrameStats::default(),
        }
    }

    pub fn engine(&self) -> &Arc<HudEngine> {
        &self.engine
    }

    /// Counts from the last call to [`layout`](Self::layout)
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Primitives from the last call to [`layout`](Self::layout)
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Lay out one frame.
    ///
    /// Primitives come out as traffic reticles, heading strip marks, the
    /// heading readout box, roll arcs and finally the attitude readout.
    /// Layers that need an unavailable input fall back to the last usable
    /// value, or are skipped when there has never been one. Traffic is the
    /// exception: it is only laid out against a current heading.
    pub fn layout(&mut self, orientation: &Orientation, traffic: &[TrafficReport]) -> &[Primitive] {
        let engine = Arc::clone(&self.engine);
        let elements = engine.config.elements;
        self.primitives.clear();
        self.stats = FrameStats::default();

        let heading = orientation.display_heading();
        if heading.is_some() {
            self.last_heading = heading;
        }
        if orientation.pitch.is_finite() && orientation.roll.is_finite() {
            self.last_attitude = Some((orientation.pitch, orientation.roll));
        }

        if elements.contains(Elements::TRAFFIC) {
            match heading {
                Some(heading) => self.layout_traffic(&engine, heading, orientation, traffic),
                None => {
                    log::trace!("Heading unavailable, skipping {} traffic reports", traffic.len());
                    self.stats.traffic_skipped = true;
                }
            }
        }

        if let Some(last_heading) = self.last_heading {
            if elements.contains(Elements::HEADING_STRIP) {
                engine.heading.strip_primitives(last_heading, &mut self.primitives);
            }
        }

        if elements.contains(Elements::HEADING_BOX) {
            engine.heading.readout_primitives(
                &engine.angles,
                heading,
                orientation,
                &mut self.heading_text,
                &mut self.primitives,
            );
        }

        if let Some((pitch, roll)) = self.last_attitude {
            if elements.contains(Elements::ROLL_INDICATOR) {
                engine.attitude.primitives(roll, &mut self.primitives);
            }
            if elements.contains(Elements::ATTITUDE_TEXT) {
                let attitude = Orientation {
                    pitch,
                    roll,
                    ..*orientation
                };
                self.primitives.push(
                    engine
                        .attitude
                        .readout_primitive(&attitude, &mut self.attitude_text),
                );
            }
        }

        &self.primitives
    }

    fn layout_traffic(
        &mut self,
        engine: &HudEngine,
        heading: f64,
        orientation: &Orientation,
        traffic: &[TrafficReport],
    ) {
        let considered = traffic.len().min(engine.config.max_target_bugs);
        let before = self.primitives.len();

        self.primitives.extend(
            engine
                .traffic_bugs(heading, orientation, traffic)
                .map(|bug| bug.primitive()),
        );

        self.stats.reticles = self.primitives.len() - before;
        self.stats.dropped = considered - self.stats.reticles;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrafficMode;
    use crate::screen::{Color, ScreenPoint};

    fn layout_with(config: HudConfig) -> SymbologyLayout {
        SymbologyLayout::new(Arc::new(HudEngine::new(800, 480, config).unwrap()))
    }

    fn traffic_only() -> HudConfig {
        HudConfig {
            elements: Elements::TRAFFIC,
            ..HudConfig::default()
        }
    }

    fn orientation(heading: Option<f64>) -> Orientation {
        Orientation {
            roll: 0.0,
            pitch: 0.0,
            heading,
            projection_heading: heading,
            gps_heading: heading,
            altitude: 3000.0,
        }
    }

    fn reports(count: usize) -> Vec<TrafficReport> {
        (0..count)
            .map(|i| TrafficReport {
                bearing: (i * 10 % 360) as f64,
                distance: 500.0 + 100.0 * i as f64,
                altitude: 3500.0,
                altitude_delta: 500.0,
                on_ground: i % 2 == 0,
            })
            .collect()
    }

    fn polygons(primitives: &[Primitive]) -> Vec<([ScreenPoint; 3], Color)> {
        primitives
            .iter()
            .filter_map(|primitive| match primitive {
                Primitive::Polygon { points, fill } => Some((*points, *fill)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_all_reports_in_input_order() {
        let mut layout = layout_with(traffic_only());
        let traffic = reports(25);
        let primitives = layout.layout(&orientation(Some(0.0)), &traffic).to_vec();

        let bugs = polygons(&primitives);
        assert_eq!(bugs.len(), 25);
        assert_eq!(layout.stats().reticles, 25);

        let expected: Vec<_> = layout
            .engine()
            .traffic_bugs(0.0, &orientation(Some(0.0)), &traffic)
            .map(|bug| (bug.reticle.points, bug.color))
            .collect();
        assert_eq!(bugs, expected);
        assert_eq!(bugs[0].1, Color::Blue);
        assert_eq!(bugs[1].1, Color::Red);
    }

    #[test]
    fn test_reports_capped_at_max() {
        let mut layout = layout_with(HudConfig {
            max_target_bugs: 10,
            ..traffic_only()
        });
        let primitives = layout.layout(&orientation(Some(0.0)), &reports(25));

        assert_eq!(polygons(primitives).len(), 10);
        assert_eq!(layout.stats().dropped, 0);
    }

    #[test]
    fn test_zero_distance_report_is_dropped() {
        let mut layout = layout_with(traffic_only());
        let mut traffic = reports(5);
        traffic[2].distance = 0.0;

        let primitives = layout.layout(&orientation(Some(90.0)), &traffic).to_vec();
        assert_eq!(polygons(&primitives).len(), 4);
        assert_eq!(
            layout.stats(),
            FrameStats {
                reticles: 4,
                dropped: 1,
                traffic_skipped: false
            }
        );
    }

    #[test]
    fn test_zero_distance_in_projected_mode() {
        let mut layout = layout_with(HudConfig {
            traffic_mode: TrafficMode::Projected,
            ..traffic_only()
        });
        let mut traffic = reports(3);
        traffic[0].distance = 0.0;
        traffic[1].altitude_delta = f64::NAN;

        let primitives = layout.layout(&orientation(Some(90.0)), &traffic);
        assert_eq!(polygons(primitives).len(), 1);
        assert_eq!(layout.stats().dropped, 2);
    }

    #[test]
    fn test_heading_dropout_skips_traffic_only() {
        let mut layout = layout_with(HudConfig::default());
        let traffic = reports(3);

        let with_heading = layout.layout(&orientation(Some(45.0)), &traffic).to_vec();
        assert_eq!(polygons(&with_heading).len(), 3);

        let dropout = layout.layout(&orientation(None), &traffic).to_vec();
        assert!(polygons(&dropout).is_empty());
        assert!(layout.stats().traffic_skipped);

        // the strip keeps the last known heading
        let strip_lines = |primitives: &[Primitive]| {
            primitives
                .iter()
                .filter(|primitive| matches!(primitive, Primitive::Line { width: 4, .. }))
                .cloned()
                .collect::<Vec<_>>()
        };
        assert!(!strip_lines(&dropout).is_empty());
        assert_eq!(strip_lines(&dropout), strip_lines(&with_heading));
    }

    #[test]
    fn test_no_heading_ever_skips_strip() {
        let mut layout = layout_with(HudConfig {
            elements: Elements::HEADING_STRIP,
            ..HudConfig::default()
        });
        assert!(layout.layout(&orientation(None), &[]).is_empty());
    }

    #[test]
    fn test_empty_traffic() {
        let mut layout = layout_with(traffic_only());
        assert!(layout.layout(&orientation(Some(0.0)), &[]).is_empty());
        assert_eq!(layout.stats(), FrameStats::default());
    }

    #[test]
    fn test_frame_order() {
        let mut layout = layout_with(HudConfig::default());
        let primitives = layout.layout(&orientation(Some(0.0)), &reports(2)).to_vec();
        let kinds: Vec<&str> = primitives.iter().map(Primitive::kind).collect();

        // 2 reticles, 4 strip marks (line + label), readout text + 4 box lines,
        // reference arc + 11 ticks + roll marker, attitude text
        assert_eq!(kinds.len(), 2 + 8 + 5 + 13 + 1);
        assert_eq!(&kinds[..2], &["polygon", "polygon"]);
        assert_eq!(&kinds[2..4], &["line", "text"]);
        assert_eq!(kinds[10], "text");
        assert!(kinds[11..15].iter().all(|kind| *kind == "line"));
        assert!(kinds[15..28].iter().all(|kind| *kind == "arc"));
        assert_eq!(kinds[28], "text");
    }

    #[test]
    fn test_non_finite_attitude_uses_last_known() {
        let mut layout = layout_with(HudConfig {
            elements: Elements::ATTITUDE_TEXT,
            ..HudConfig::default()
        });
        let mut current = orientation(Some(0.0));
        current.pitch = 4.0;
        current.roll = -7.0;
        layout.layout(&current, &[]);

        current.roll = f64::NAN;
        let primitives = layout.layout(&current, &[]);
        match &primitives[0] {
            Primitive::Text { text, .. } => assert_eq!(&**text, "+  4 |  -7"),
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn test_engine_rejects_bad_config() {
        assert!(HudEngine::new(
            800,
            480,
            HudConfig {
                declination: 400.0,
                ..HudConfig::default()
            }
        )
        .is_err());
        assert!(HudEngine::new(0, 0, HudConfig::default()).is_err());
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HudEngine>();
    }

    #[test]
    fn test_steady_frames_reuse_readout_text() {
        let mut layout = layout_with(HudConfig {
            elements: Elements::HEADING_BOX | Elements::ATTITUDE_TEXT,
            ..HudConfig::default()
        });
        let texts = |primitives: &[Primitive]| -> Vec<Arc<str>> {
            primitives
                .iter()
                .filter_map(|primitive| match primitive {
                    Primitive::Text { text, .. } => Some(Arc::clone(text)),
                    _ => None,
                })
                .collect()
        };

        let first = texts(layout.layout(&orientation(Some(10.2)), &[]));
        let second = texts(layout.layout(&orientation(Some(10.8)), &[]));
        assert_eq!(first.len(), 2);
        assert!(first
            .iter()
            .zip(&second)
            .all(|(before, after)| Arc::ptr_eq(before, after)));

        let turned = texts(layout.layout(&orientation(Some(11.0)), &[]));
        assert_eq!(&*turned[0], " 11 |  11");
        assert!(Arc::ptr_eq(&first[1], &turned[1]));
    }
}
