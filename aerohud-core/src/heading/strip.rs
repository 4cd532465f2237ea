//! Heading strip table generation

use std::sync::Arc;

use crate::angle::{heading_key, normalize_degrees, AngleMath};
use crate::error::HudError;
use crate::screen::ScreenGeometry;

/// Degrees visible on each side of the strip center
pub const STRIP_HALF_WIDTH_DEGREES: i32 = 180;

/// Number of heading keys, 0 through 360 inclusive
const HEADING_KEYS: usize = 361;

/// Interval between strip marks in degrees
const MARK_INTERVAL_DEGREES: i32 = 90;

/// One mark on the compass strip
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingStripEntry {
    /// Pixel x of the mark
    pub screen_x: i32,
    /// Heading at the mark, wrapped into [0, 360)
    pub displayed_heading: i32,
    /// Magnetic label text for the mark
    pub label: Arc<str>,
}

/// Precomputed strip marks for every integer heading
#[derive(Debug, Clone)]
pub struct HeadingStripGenerator {
    strips: Vec<Vec<HeadingStripEntry>>,
}

impl HeadingStripGenerator {
    pub fn new(geometry: &ScreenGeometry, angles: &AngleMath) -> Self {
        let offsets: Vec<i32> = (0..=STRIP_HALF_WIDTH_DEGREES)
            .map(|degrees| (geometry.pixels_per_degree_x * degrees as f64) as i32)
            .collect();
        let labels: Vec<Arc<str>> = (0..360)
            .map(|heading| Arc::from(heading.to_string()))
            .collect();

        let strips: Vec<_> = (0..HEADING_KEYS as i32)
            .map(|heading| Self::generate(heading, geometry.center.x, &offsets, &labels, angles))
            .collect();

        log::debug!(
            "Generated heading strips for {} headings, {} marks",
            strips.len(),
            strips.iter().map(Vec::len).sum::<usize>()
        );

        HeadingStripGenerator { strips }
    }

    fn generate(
        heading: i32,
        center_x: i32,
        offsets: &[i32],
        labels: &[Arc<str>],
        angles: &AngleMath,
    ) -> Vec<HeadingStripEntry> {
        let entry = |screen_x: i32, displayed_heading: i32| {
            let magnetic = angles.apply_declination(displayed_heading as f64) as usize;
            HeadingStripEntry {
                screen_x,
                displayed_heading,
                label: Arc::clone(&labels[magnetic % labels.len()]),
            }
        };

        let mut marks = Vec::new();
        for (offset_degrees, offset_x) in offsets.iter().enumerate() {
            let to_the_left = heading - offset_degrees as i32;
            let to_the_right = heading + offset_degrees as i32;

            // cardinal test on the unwrapped value, display on the wrapped one
            let wrapped_left = normalize_degrees(to_the_left);
            let wrapped_right = normalize_degrees(to_the_right);

            if to_the_left == 0 || to_the_left % MARK_INTERVAL_DEGREES == 0 {
                marks.push(entry(center_x - offset_x, wrapped_left));
            }

            if wrapped_left == wrapped_right {
                continue;
            }

            if to_the_right % MARK_INTERVAL_DEGREES == 0 {
                marks.push(entry(center_x + offset_x, wrapped_right));
            }
        }
        marks
    }

    /// Marks for an integer heading key in [0, 360]
    pub fn entries(&self, key: i32) -> Result<&[HeadingStripEntry], HudError> {
        usize::try_from(key)
            .ok()
            .and_then(|index| self.strips.get(index))
            .map(Vec::as_slice)
            .ok_or(HudError::OutOfDomain {
                table: "heading strip",
                key,
                min: 0,
                max: HEADING_KEYS as i32 - 1,
            })
    }

    /// Marks for any heading, rounded to the nearest key
    pub fn entries_for(&self, heading: f64) -> &[HeadingStripEntry] {
        // heading_key is always within [0, 360]
        &self.strips[heading_key(heading)]
    }

    /// Number of precomputed heading keys
    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }
}
