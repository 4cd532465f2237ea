//! Attitude Indicator
//!
//! Roll arc geometry and the pitch/roll text readout.
//!
//! The reference arc, its tick marks at standard bank angles and all arc
//! boxes are fixed for a screen and built once. Per frame only the live roll
//! marker and the readout text change.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::primitive::{ArcBox, ArcSpec, CachedText, Primitive};
use crate::screen::{Color, ScreenGeometry, ScreenPoint};
use crate::state::Orientation;

/// Bank angles marked with short ticks
pub const MINOR_BANK_ANGLES: [i32; 4] = [-30, -15, 15, 30];

/// Bank angles marked with long ticks
pub const MAJOR_BANK_ANGLES: [i32; 7] = [-90, -60, -45, 0, 45, 60, 90];

/// Half the angular width of every tick and of the roll marker, radians
pub const TICK_HALF_WIDTH_RADIANS: f64 = 0.03;

/// Radians trimmed from each end of the reference arc
const REFERENCE_ARC_TRIM: f64 = PI / 8.0;

/// Multiple of the line width used for long ticks
const REFERENCE_LINE_MULTIPLIER: i32 = 5;

/// Static roll arc geometry for one screen
#[derive(Debug, Clone)]
pub struct AttitudeArcGeometry {
    arc_box: ArcBox,
    reference_arc: ArcSpec,
    minor_ticks: Vec<ArcSpec>,
    major_ticks: Vec<ArcSpec>,
    reference_line_size: i32,
    center: ScreenPoint,
}

impl AttitudeArcGeometry {
    pub fn new(geometry: &ScreenGeometry, squash: f64) -> Self {
        let center = geometry.center;
        let radius = geometry.height / 3;
        let arc_box = ArcBox {
            x: center.x - radius,
            y: center.y - (radius >> 1),
            width: radius << 1,
            height: (radius << 1) as f64 * squash,
        };

        let reference_line_size = geometry.line_width * REFERENCE_LINE_MULTIPLIER;
        let long_tick_box = Self::inset(&arc_box, reference_line_size);
        let short_tick_box = Self::inset(&arc_box, reference_line_size >> 1);

        let ticks = |bounds: ArcBox, angles: &[i32], width: i32| -> Vec<ArcSpec> {
            angles
                .iter()
                .map(|bank| {
                    ArcSpec::centered(
                        bounds,
                        Self::bank_to_arc_angle(*bank as f64),
                        TICK_HALF_WIDTH_RADIANS,
                        width,
                    )
                })
                .collect()
        };

        AttitudeArcGeometry {
            arc_box,
            reference_arc: ArcSpec {
                bounds: arc_box,
                start_angle: REFERENCE_ARC_TRIM,
                end_angle: PI - REFERENCE_ARC_TRIM,
                width: geometry.line_width,
            },
            minor_ticks: ticks(short_tick_box, &MINOR_BANK_ANGLES, reference_line_size >> 1),
            major_ticks: ticks(long_tick_box, &MAJOR_BANK_ANGLES, reference_line_size),
            reference_line_size,
            center,
        }
    }

    /// Raise the top edge and shrink the height by `margin` pixels
    fn inset(bounds: &ArcBox, margin: i32) -> ArcBox {
        ArcBox {
            x: bounds.x,
            y: bounds.y - margin,
            width: bounds.width,
            height: bounds.height - margin as f64,
        }
    }

    /// Arc angle in radians for a bank angle in degrees; zero bank points up
    pub fn bank_to_arc_angle(bank_degrees: f64) -> f64 {
        (bank_degrees + 90.0).to_radians()
    }

    pub fn arc_box(&self) -> ArcBox {
        self.arc_box
    }

    pub fn reference_arc(&self) -> ArcSpec {
        self.reference_arc
    }

    pub fn minor_ticks(&self) -> &[ArcSpec] {
        &self.minor_ticks
    }

    pub fn major_ticks(&self) -> &[ArcSpec] {
        &self.major_ticks
    }

    /// Highlighted arc at the current roll, centered on 90 degrees minus roll
    pub fn roll_arc(&self, roll_degrees: f64) -> ArcSpec {
        ArcSpec::centered(
            self.arc_box,
            FRAC_PI_2 - roll_degrees.to_radians(),
            TICK_HALF_WIDTH_RADIANS,
            self.reference_line_size * 2,
        )
    }

    /// Reference arc, ticks and live roll marker, in drawing order
    pub fn primitives(&self, roll_degrees: f64, out: &mut Vec<Primitive>) {
        let statics = std::iter::once(&self.reference_arc)
            .chain(self.minor_ticks.iter())
            .chain(self.major_ticks.iter());
        for arc in statics {
            out.push(Primitive::Arc {
                arc: *arc,
                color: Color::Green,
            });
        }

        out.push(Primitive::Arc {
            arc: self.roll_arc(roll_degrees),
            color: Color::Yellow,
        });
    }

    /// Pitch/roll readout centered on the screen, reformatted only when the
    /// integer pitch or roll changes
    pub fn readout_primitive(
        &self,
        orientation: &Orientation,
        text: &mut CachedText<(i32, i32)>,
    ) -> Primitive {
        let degrees = (orientation.pitch as i32, orientation.roll as i32);
        Primitive::Text {
            text: text.get(degrees, |(pitch, roll)| {
                attitude_text(pitch as f64, roll as f64)
            }),
            center: self.center,
            foreground: Color::Black,
            background: Some(Color::White),
        }
    }
}

/// "+pp | rrr" style readout, integer degrees, "+" only on positive pitch
pub fn attitude_text(pitch: f64, roll: f64) -> String {
    let pitch = pitch as i32;
    let roll = roll as i32;
    let sign = if pitch > 0 { "+" } else { "" };
    format!("{sign}{pitch:3} | {roll:3}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HudConfig;

    fn geometry() -> AttitudeArcGeometry {
        let screen = ScreenGeometry::new(800, 480, &HudConfig::default()).unwrap();
        AttitudeArcGeometry::new(&screen, 0.75)
    }

    #[test]
    fn test_arc_boxes() {
        let attitude = geometry();
        // radius 160 around (400, 240)
        assert_eq!(
            attitude.arc_box(),
            ArcBox {
                x: 240,
                y: 160,
                width: 320,
                height: 240.0
            }
        );

        // line width 4, long ticks inset by 20, short by 10
        let long = attitude.major_ticks()[0].bounds;
        assert_eq!((long.y, long.height), (140, 220.0));
        let short = attitude.minor_ticks()[0].bounds;
        assert_eq!((short.y, short.height), (150, 230.0));
    }

    #[test]
    fn test_reference_arc_span() {
        let arc = geometry().reference_arc();
        assert_eq!(arc.start_angle, PI / 8.0);
        assert_eq!(arc.end_angle, PI - PI / 8.0);
        assert_eq!(arc.width, 4);
    }

    #[test]
    fn test_tick_sets() {
        let attitude = geometry();
        assert_eq!(attitude.minor_ticks().len(), 4);
        assert_eq!(attitude.major_ticks().len(), 7);

        // zero bank points straight up
        let level = attitude.major_ticks()[3];
        assert!((level.center_angle() - FRAC_PI_2).abs() < 1e-12);
        assert!((level.end_angle - level.start_angle - 0.06).abs() < 1e-12);
        assert_eq!(level.width, 20);
        assert_eq!(attitude.minor_ticks()[0].width, 10);
    }

    #[test]
    fn test_roll_arc() {
        let attitude = geometry();
        let level = attitude.roll_arc(0.0);
        assert!((level.center_angle() - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(level.width, 40);

        let banked = attitude.roll_arc(30.0);
        assert!((banked.center_angle() - 60f64.to_radians()).abs() < 1e-12);
        assert_eq!(banked.bounds, attitude.arc_box());
    }

    #[test]
    fn test_primitives_order() {
        let attitude = geometry();
        let mut out = Vec::new();
        attitude.primitives(10.0, &mut out);

        assert_eq!(out.len(), 1 + 4 + 7 + 1);
        assert!(matches!(
            out.last(),
            Some(Primitive::Arc {
                color: Color::Yellow,
                ..
            })
        ));
        assert!(out[..12].iter().all(|primitive| matches!(
            primitive,
            Primitive::Arc {
                color: Color::Green,
                ..
            }
        )));
    }

    #[test]
    fn test_attitude_text() {
        assert_eq!(attitude_text(5.4, -12.9), "+  5 | -12");
        assert_eq!(attitude_text(-5.0, 0.0), " -5 |   0");
        assert_eq!(attitude_text(0.0, 180.0), "  0 | 180");
    }

    #[test]
    fn test_readout_is_centered() {
        let attitude = geometry();
        let orientation = Orientation {
            pitch: 12.0,
            roll: 3.0,
            ..Orientation::default()
        };
        match attitude.readout_primitive(&orientation, &mut CachedText::new()) {
            Primitive::Text { text, center, .. } => {
                assert_eq!(&*text, "+ 12 |   3");
                assert_eq!(center, ScreenPoint::new(400, 240));
            }
            other => panic!("unexpected primitive {other:?}"),
        }
    }
}
