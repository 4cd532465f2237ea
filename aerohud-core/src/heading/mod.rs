//! Compass Heading Strip
//!
//! A horizontally scrolling compass tape along the top of the screen, plus
//! the boxed magnetic/GPS heading readout below it.
//!
//! The strip for every integer heading 0..=360 is generated once at
//! construction. Each frame only looks up the rounded heading, so there is
//! no per-frame angle math beyond one normalization.

mod strip;

pub use strip::{HeadingStripEntry, HeadingStripGenerator, STRIP_HALF_WIDTH_DEGREES};

use std::sync::Arc;

use crate::angle::AngleMath;
use crate::primitive::{CachedText, Primitive};
use crate::screen::{Color, ScreenGeometry, ScreenPoint};
use crate::state::Orientation;

/// Fraction of the screen height covered by a strip tick
const TICK_HEIGHT_PROPORTION: f64 = 0.2;

/// Stroke width of strip ticks
const TICK_WIDTH: i32 = 4;

/// Stroke width of the readout box outline
const BOX_LINE_WIDTH: i32 = 2;

/// Shown in the readout when a heading is unavailable
const UNAVAILABLE: &str = "---";

/// Screen placement of the strip ticks, labels and readout box
#[derive(Debug, Clone)]
pub struct HeadingSymbology {
    strip: HeadingStripGenerator,
    tick_height: i32,
    label_y: i32,
    readout_center: ScreenPoint,
    box_corners: [ScreenPoint; 4],
}

impl HeadingSymbology {
    pub fn new(geometry: &ScreenGeometry, angles: &AngleMath) -> Self {
        let strip = HeadingStripGenerator::new(geometry, angles);

        let label_y = geometry.font_height;
        let readout_y = label_y as f64 + 1.5 * geometry.font_height as f64;
        let border_vertical_size = geometry.font_half_height() + (geometry.font_height >> 2);
        let half_width = ((geometry.text_width("360") >> 1) as f64 * 3.5) as i32;
        let center_x = geometry.center.x;
        let top = readout_y as i32 - border_vertical_size;
        let bottom = readout_y as i32 + border_vertical_size;

        HeadingSymbology {
            strip,
            tick_height: (geometry.height as f64 * TICK_HEIGHT_PROPORTION) as i32,
            label_y,
            readout_center: ScreenPoint::new(center_x, readout_y as i32),
            box_corners: [
                ScreenPoint::new(center_x - half_width, top),
                ScreenPoint::new(center_x + half_width, top),
                ScreenPoint::new(center_x + half_width, bottom),
                ScreenPoint::new(center_x - half_width, bottom),
            ],
        }
    }

    pub fn strip(&self) -> &HeadingStripGenerator {
        &self.strip
    }

    /// Tick line and label for every strip mark visible at `heading`
    pub fn strip_primitives(&self, heading: f64, out: &mut Vec<Primitive>) {
        for entry in self.strip.entries_for(heading) {
            out.push(Primitive::Line {
                start: ScreenPoint::new(entry.screen_x, self.tick_height),
                end: ScreenPoint::new(entry.screen_x, 0),
                color: Color::Green,
                width: TICK_WIDTH,
            });
            out.push(Primitive::Text {
                text: Arc::clone(&entry.label),
                center: ScreenPoint::new(entry.screen_x, self.label_y),
                foreground: Color::Black,
                background: Some(Color::Yellow),
            });
        }
    }

    /// Boxed "magnetic | GPS" heading readout.
    ///
    /// The text is only reformatted when one of the displayed integer
    /// headings changes.
    pub fn readout_primitives(
        &self,
        angles: &AngleMath,
        heading: Option<f64>,
        orientation: &Orientation,
        text: &mut CachedText<HeadingReadout>,
        out: &mut Vec<Primitive>,
    ) {
        let readout = HeadingReadout {
            magnetic: heading.map(|heading| Self::readout_degrees(angles, heading)),
            track: orientation
                .track()
                .map(|track| Self::readout_degrees(angles, track)),
        };
        out.push(Primitive::Text {
            text: text.get(readout, HeadingReadout::text),
            center: self.readout_center,
            foreground: Color::Green,
            background: None,
        });

        for (index, start) in self.box_corners.iter().enumerate() {
            let end = self.box_corners[(index + 1) % self.box_corners.len()];
            out.push(Primitive::Line {
                start: *start,
                end,
                color: Color::Green,
                width: BOX_LINE_WIDTH,
            });
        }
    }

    fn readout_degrees(angles: &AngleMath, heading: f64) -> i32 {
        angles.apply_declination(heading) as i32
    }
}

/// Integer degrees shown in the heading readout box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingReadout {
    pub magnetic: Option<i32>,
    pub track: Option<i32>,
}

impl HeadingReadout {
    pub fn text(self) -> String {
        fn value(degrees: Option<i32>) -> String {
            match degrees {
                Some(degrees) => format!("{:>3}", degrees),
                None => UNAVAILABLE.to_string(),
            }
        }
        format!("{} | {}", value(self.magnetic), value(self.track))
    }
}
