// crates/quicktrim-core/src/overlay.rs
//
// OverlayRenderer: turns the current TrimState into a display list of shapes
// in frame pixels. The UI paints the list over the frame texture through its
// ViewTransform, so nothing here knows about egui or the window size.
//
// Draw order (later shapes paint over earlier ones):
//   1. opaque time / metadata bar
//   2. Start / End / Save buttons and their labels
//   3. marking status text
//   4. timeline bar, playhead line, start–end range outline
//   5. key help line along the bottom edge

use crate::helpers::geometry::{Point, Rect, END_BUTTON, SAVE_BUTTON, START_BUTTON};
use crate::helpers::time::format_hms;
use crate::helpers::timeline::TimelineGeometry;
use crate::trim::TrimState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const RED:   Rgb = Rgb(255, 0, 0);
pub const BLUE:  Rgb = Rgb(0, 0, 255);
pub const GREY:  Rgb = Rgb(200, 200, 200);

/// Text height in frame pixels.
pub const TEXT_SIZE: f32 = 20.0;
/// Stroke width for the playhead and range outline, in frame pixels.
pub const MARKER_WIDTH: f32 = 2.0;

pub const HELP_TEXT: &str =
    "Press 'n' for next video, 'p' for previous video, space to pause/play";

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayShape {
    FilledRect { rect: Rect, color: Rgb },
    StrokeRect { rect: Rect, color: Rgb, width: f32 },
    Line       { from: Point, to: Point, color: Rgb, width: f32 },
    /// `anchor` is the bottom-left corner of the text run.
    Text       { anchor: Point, text: String, color: Rgb, size: f32 },
}

/// Where the current file sits in the playlist, for the metadata bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaylistPosition<'a> {
    /// Zero-based index of the current entry.
    pub index: usize,
    pub len:   usize,
    pub name:  &'a str,
}

pub fn build_overlay(
    frame_size: (u32, u32),
    trim:       &TrimState,
    playlist:   Option<PlaylistPosition<'_>>,
) -> Vec<OverlayShape> {
    let (w, h) = (frame_size.0 as f32, frame_size.1 as f32);
    let mut shapes = Vec::with_capacity(16);

    // ── Time / metadata bar ───────────────────────────────────────────────────
    shapes.push(OverlayShape::FilledRect {
        rect:  Rect::from_corners(10.0, 10.0, w - 10.0, 40.0),
        color: BLACK,
    });
    let time = format_hms(trim.current_time());
    let header = match playlist {
        Some(p) => format!("Time: {time} | Video [{}/{}]: {}", p.index + 1, p.len, p.name),
        None    => format!("Time: {time}"),
    };
    shapes.push(text(15.0, 30.0, header, WHITE));

    // ── Buttons ───────────────────────────────────────────────────────────────
    for (rect, color, label, label_x) in [
        (START_BUTTON, GREEN, "Start", 30.0),
        (END_BUTTON,   RED,   "End",   150.0),
        (SAVE_BUTTON,  BLUE,  "Save",  260.0),
    ] {
        shapes.push(OverlayShape::FilledRect { rect, color });
        shapes.push(text(label_x, 80.0, label.to_string(), BLACK));
    }

    // ── Status ────────────────────────────────────────────────────────────────
    let status = if trim.is_marking() { "Trimming" } else { "Not Trimming" };
    shapes.push(text(15.0, 120.0, format!("Status: {status}"), WHITE));

    // ── Timeline ──────────────────────────────────────────────────────────────
    let tl    = TimelineGeometry::for_frame_width(w);
    let total = trim.total_duration();
    shapes.push(OverlayShape::FilledRect { rect: tl.bar(), color: GREY });

    let marker_x = tl.time_to_pixel(trim.current_time(), total);
    shapes.push(OverlayShape::Line {
        from:  Point::new(marker_x, tl.top),
        to:    Point::new(marker_x, tl.bottom()),
        color: RED,
        width: MARKER_WIDTH,
    });

    let start_x = tl.time_to_pixel(trim.start_time(), total);
    let end_x   = tl.time_to_pixel(trim.end_time(), total);
    shapes.push(OverlayShape::StrokeRect {
        rect:  Rect::from_corners(start_x.min(end_x), tl.top, start_x.max(end_x), tl.bottom()),
        color: GREEN,
        width: MARKER_WIDTH,
    });

    // ── Help line ─────────────────────────────────────────────────────────────
    shapes.push(text(15.0, h - 10.0, HELP_TEXT.to_string(), WHITE));

    shapes
}

fn text(x: f32, y: f32, text: String, color: Rgb) -> OverlayShape {
    OverlayShape::Text { anchor: Point::new(x, y), text, color, size: TEXT_SIZE }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(shapes: &[OverlayShape]) -> Vec<&str> {
        shapes.iter().filter_map(|s| match s {
            OverlayShape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }).collect()
    }

    #[test]
    fn header_includes_playlist_position() {
        let mut trim = TrimState::new(7200.0);
        trim.set_current_time(3661.5);
        let pos = PlaylistPosition { index: 1, len: 3, name: "b.mp4" };
        let shapes = build_overlay((1280, 720), &trim, Some(pos));
        assert_eq!(texts(&shapes)[0], "Time: 01:01:01 | Video [2/3]: b.mp4");
    }

    #[test]
    fn header_without_playlist_is_time_only() {
        let shapes = build_overlay((640, 360), &TrimState::new(10.0), None);
        assert_eq!(texts(&shapes)[0], "Time: 00:00:00");
    }

    #[test]
    fn status_follows_marking_flag() {
        let mut trim = TrimState::new(10.0);
        assert!(texts(&build_overlay((640, 360), &trim, None)).contains(&"Status: Not Trimming"));
        trim.mark_start();
        assert!(texts(&build_overlay((640, 360), &trim, None)).contains(&"Status: Trimming"));
    }

    #[test]
    fn markers_use_timeline_mapping() {
        let mut trim = TrimState::new(10.0);
        trim.set_current_time(2.0);
        trim.mark_start();
        trim.set_current_time(7.0);
        trim.mark_end().unwrap();
        trim.set_current_time(5.0);

        let shapes = build_overlay((1280, 720), &trim, None);
        let tl = TimelineGeometry::for_frame_width(1280.0);

        let line_x = shapes.iter().find_map(|s| match s {
            OverlayShape::Line { from, .. } => Some(from.x),
            _ => None,
        }).unwrap();
        assert_eq!(line_x, tl.time_to_pixel(5.0, 10.0));

        let range = shapes.iter().find_map(|s| match s {
            OverlayShape::StrokeRect { rect, .. } => Some(*rect),
            _ => None,
        }).unwrap();
        assert_eq!(range.min.x, tl.time_to_pixel(2.0, 10.0));
        assert_eq!(range.max.x, tl.time_to_pixel(7.0, 10.0));
        assert_eq!(range.min.y, tl.top);
    }

    #[test]
    fn bar_spans_frame_width_minus_margins() {
        let shapes = build_overlay((800, 600), &TrimState::new(10.0), None);
        match &shapes[0] {
            OverlayShape::FilledRect { rect, color } => {
                assert_eq!(*color, BLACK);
                assert_eq!(rect.max.x, 790.0);
            }
            other => panic!("first shape should be the header bar, got {other:?}"),
        }
    }

    #[test]
    fn help_line_sits_on_bottom_edge() {
        let shapes = build_overlay((800, 600), &TrimState::new(10.0), None);
        match shapes.last() {
            Some(OverlayShape::Text { anchor, text, .. }) => {
                assert_eq!(text, HELP_TEXT);
                assert_eq!(anchor.y, 590.0);
            }
            other => panic!("expected help text last, got {other:?}"),
        }
    }

    #[test]
    fn rendering_does_not_touch_state() {
        let mut trim = TrimState::new(10.0);
        trim.set_current_time(3.0);
        trim.mark_start();
        let before = trim.clone();
        let _ = build_overlay((1280, 720), &trim, None);
        assert_eq!(trim, before);
    }
}
