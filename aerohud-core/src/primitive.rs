//! Primitive Descriptors
//!
//! The output of a layout pass: an ordered list of drawing instructions the
//! renderer paints as-is. Angles are radians, counter-clockwise from the
//! positive x axis, the convention of most 2-D arc APIs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::screen::{Color, ScreenPoint};

/// Bounding box of an ellipse, top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: f64,
}

/// An elliptical arc segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSpec {
    pub bounds: ArcBox,
    pub start_angle: f64,
    pub end_angle: f64,
    pub width: i32,
}

impl ArcSpec {
    /// Arc of `half_width` radians on each side of `center_angle`
    pub fn centered(bounds: ArcBox, center_angle: f64, half_width: f64, width: i32) -> Self {
        ArcSpec {
            bounds,
            start_angle: center_angle - half_width,
            end_angle: center_angle + half_width,
            width,
        }
    }

    /// Angle halfway between start and end
    pub fn center_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// One drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Primitive {
    /// Filled polygon, closed from the last point back to the first
    Polygon { points: [ScreenPoint; 3], fill: Color },
    /// Straight line segment
    Line {
        start: ScreenPoint,
        end: ScreenPoint,
        color: Color,
        width: i32,
    },
    /// Elliptical arc
    Arc { arc: ArcSpec, color: Color },
    /// Text centered on a position
    Text {
        text: Arc<str>,
        center: ScreenPoint,
        foreground: Color,
        background: Option<Color>,
    },
}

impl Primitive {
    /// Short name of the primitive kind, for logging and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Polygon { .. } => "polygon",
            Primitive::Line { .. } => "line",
            Primitive::Arc { .. } => "arc",
            Primitive::Text { .. } => "text",
        }
    }
}

/// A formatted label reused until the value it was formatted from changes.
///
/// Readouts change far less often than frames are drawn, so holding the
/// last label keeps steady-state frames free of string allocation.
#[derive(Debug, Clone)]
pub struct CachedText<K> {
    key: Option<K>,
    text: Arc<str>,
}

impl<K: Copy + PartialEq> CachedText<K> {
    pub fn new() -> Self {
        CachedText {
            key: None,
            text: Arc::from(""),
        }
    }

    /// The label for `key`, formatting it only when `key` differs from the
    /// last one seen
    pub fn get(&mut self, key: K, format: impl FnOnce(K) -> String) -> Arc<str> {
        if self.key != Some(key) {
            self.text = format(key).into();
            self.key = Some(key);
        }
        Arc::clone(&self.text)
    }
}

impl<K: Copy + PartialEq> Default for CachedText<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_arc() {
        let bounds = ArcBox {
            x: 0,
            y: 0,
            width: 100,
            height: 75.0,
        };
        let arc = ArcSpec::centered(bounds, 1.0, 0.25, 3);
        assert_eq!(arc.start_angle, 0.75);
        assert_eq!(arc.end_angle, 1.25);
        assert_eq!(arc.center_angle(), 1.0);
        assert_eq!(arc.width, 3);
    }

    #[test]
    fn test_primitive_json_shape() {
        let line = Primitive::Line {
            start: ScreenPoint::new(1, 2),
            end: ScreenPoint::new(3, 4),
            color: Color::Green,
            width: 4,
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["kind"], "line");
        assert_eq!(value["color"], "green");
        assert_eq!(value["start"], serde_json::json!([1, 2]));
        assert_eq!(line.kind(), "line");
    }

    #[test]
    fn test_cached_text_formats_once_per_key() {
        let mut cache = CachedText::new();
        let mut formatted = 0;

        let first = cache.get(7, |n| {
            formatted += 1;
            n.to_string()
        });
        let again = cache.get(7, |n| {
            formatted += 1;
            n.to_string()
        });
        assert_eq!(formatted, 1);
        assert!(Arc::ptr_eq(&first, &again));

        let changed = cache.get(8, |n| {
            formatted += 1;
            n.to_string()
        });
        assert_eq!(formatted, 2);
        assert_eq!(&*changed, "8");
    }
}
