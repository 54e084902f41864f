// crates/quicktrim-core/src/helpers/timeline.rs
//
// Pixel ↔ time mapping for the on-frame timeline bar.
//
// Both the overlay (marker placement) and the interaction controller
// (click/drag scrubbing) go through these two functions. Nothing else is
// allowed to compute a marker x position on its own; if the two sides ever
// disagree the playhead visibly jumps when the user grabs it.

use crate::helpers::geometry::{Point, Rect};

/// Left/right inset of the timeline bar from the frame edges, in frame pixels.
pub const TIMELINE_MARGIN: f32 = 10.0;
/// Top edge of the timeline bar, in frame pixels.
pub const TIMELINE_Y: f32 = 130.0;
/// Height of the timeline bar, in frame pixels.
pub const TIMELINE_HEIGHT: f32 = 50.0;

/// Map a horizontal pixel coordinate to a playback timestamp.
///
/// The ratio is clamped to `[0, 1]`, so clicks left of the bar land on 0 and
/// clicks right of it land on `total_duration`. A zero or negative width
/// returns 0 instead of dividing by zero.
pub fn pixel_to_time(x: f64, origin_x: f64, width_px: f64, total_duration: f64) -> f64 {
    if width_px <= 0.0 {
        return 0.0;
    }
    ((x - origin_x) / width_px).clamp(0.0, 1.0) * total_duration
}

/// Map a playback timestamp to a horizontal pixel coordinate.
///
/// Inverse of [`pixel_to_time`] for values inside the bar. Returns `origin_x`
/// when the duration is unknown (≤ 0) so markers collapse onto the left edge
/// rather than producing NaN.
pub fn time_to_pixel(time: f64, origin_x: f64, width_px: f64, total_duration: f64) -> f64 {
    if total_duration <= 0.0 {
        return origin_x;
    }
    origin_x + (time / total_duration) * width_px
}

/// Position of the timeline bar inside a frame of a given width.
///
/// Derived every frame from the frame that is actually on screen — never
/// stored — so a file switch to a different resolution can't leave a stale
/// geometry behind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineGeometry {
    pub origin_x: f32,
    pub width_px: f32,
    pub top:      f32,
    pub height:   f32,
}

impl TimelineGeometry {
    pub fn for_frame_width(frame_width: f32) -> Self {
        Self {
            origin_x: TIMELINE_MARGIN,
            width_px: frame_width - 2.0 * TIMELINE_MARGIN,
            top:      TIMELINE_Y,
            height:   TIMELINE_HEIGHT,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Full bar rectangle in frame pixels.
    pub fn bar(&self) -> Rect {
        Rect::from_corners(self.origin_x, self.top, self.origin_x + self.width_px, self.bottom())
    }

    /// True when `p` is inside the timeline's vertical band.
    ///
    /// Only the y range is checked: a press anywhere across the band starts a
    /// drag, and x outside the bar simply clamps to the nearest end.
    pub fn in_band(&self, p: Point) -> bool {
        p.y >= self.top && p.y <= self.bottom()
    }

    pub fn pixel_to_time(&self, x: f32, total_duration: f64) -> f64 {
        pixel_to_time(x as f64, self.origin_x as f64, self.width_px as f64, total_duration)
    }

    pub fn time_to_pixel(&self, time: f64, total_duration: f64) -> f32 {
        time_to_pixel(time, self.origin_x as f64, self.width_px as f64, total_duration) as f32
    }
}
