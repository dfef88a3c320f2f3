//! Conversion of layout entries into fractional positions within a window.

use chrono::Duration;
use serde::Serialize;

use super::packing::LayoutEntry;
use super::window::TimeWindow;

/// Position and size of an entry as fractions of the window, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub top_fraction: f64,
    pub height_fraction: f64,
    pub left_fraction: f64,
    pub width_fraction: f64,
}

/// A geometry scaled to a concrete grid size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Scale to a grid of `width` by `height` units (pixels, rows, ...).
    pub fn to_rect(&self, width: f64, height: f64) -> Rect {
        Rect {
            x: self.left_fraction * width,
            y: self.top_fraction * height,
            width: self.width_fraction * width,
            height: self.height_fraction * height,
        }
    }

    pub fn bottom_fraction(&self) -> f64 {
        self.top_fraction + self.height_fraction
    }
}

/// Map an entry onto `window`.
///
/// The vertical extent is measured on the visible part of the event, so an
/// event that starts before the window is pinned to the top and one that runs
/// past the end is cut at the bottom. Horizontally the window is split into
/// `total_columns` equal lanes.
pub fn map_to_geometry(entry: &LayoutEntry<'_>, window: &TimeWindow) -> Geometry {
    let span = window.duration();
    let visible_start = entry.event.start.max(window.start());
    let visible_end = entry.event.end.min(window.end());

    let top_fraction = fraction(visible_start - window.start(), span);
    let height_fraction = if visible_end > visible_start {
        fraction(visible_end - visible_start, span).min(1.0 - top_fraction)
    } else {
        0.0
    };

    let total_columns = entry.total_columns.max(1) as f64;
    Geometry {
        top_fraction,
        height_fraction,
        left_fraction: entry.column as f64 / total_columns,
        width_fraction: 1.0 / total_columns,
    }
}

fn fraction(part: Duration, whole: Duration) -> f64 {
    let whole_ms = whole.num_milliseconds();
    if whole_ms <= 0 {
        return 0.0;
    }
    (part.num_milliseconds() as f64 / whole_ms as f64).clamp(0.0, 1.0)
}
