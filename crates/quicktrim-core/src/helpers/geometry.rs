// crates/quicktrim-core/src/helpers/geometry.rs
//
// Frame-space geometry: points, rectangles, the fixed button layout and the
// transform between frame pixels and on-screen pixels.
//
// Everything the overlay draws and everything the interaction controller
// hit-tests is expressed in *frame* pixels (the decoded frame's own
// resolution). The UI shows the frame scaled into whatever rect the window
// gives it, so pointer positions must go through `ViewTransform::to_frame`
// before they reach the controller.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. Containment is inclusive on every edge, matching
/// how the button regions were always hit-tested.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { min: Point::new(x0, y0), max: Point::new(x1, y1) }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

// ── Button layout ─────────────────────────────────────────────────────────────
// Fixed frame-pixel positions, independent of frame size.

pub const START_BUTTON: Rect = Rect::from_corners(10.0, 50.0, 110.0, 90.0);
pub const END_BUTTON:   Rect = Rect::from_corners(120.0, 50.0, 220.0, 90.0);
pub const SAVE_BUTTON:  Rect = Rect::from_corners(230.0, 50.0, 330.0, 90.0);

// ── Letterboxing + view transform ─────────────────────────────────────────────

/// Largest rect with the frame's aspect ratio that fits centred in `available`.
pub fn fit_rect(frame_size: (u32, u32), available: Rect) -> Rect {
    let (fw, fh) = (frame_size.0.max(1) as f32, frame_size.1.max(1) as f32);
    let ratio = fw / fh;
    let (aw, ah) = (available.width().max(0.0), available.height().max(0.0));
    let (w, h) = if aw / ratio <= ah { (aw, aw / ratio) } else { (ah * ratio, ah) };
    let c = available.center();
    Rect::from_corners(c.x - w * 0.5, c.y - h * 0.5, c.x + w * 0.5, c.y + h * 0.5)
}

/// Maps between frame pixels and the on-screen rect the frame is shown in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    frame_w: f32,
    frame_h: f32,
    display: Rect,
}

impl ViewTransform {
    pub fn new(frame_size: (u32, u32), display: Rect) -> Self {
        Self {
            frame_w: frame_size.0.max(1) as f32,
            frame_h: frame_size.1.max(1) as f32,
            display,
        }
    }

    pub fn display(&self) -> Rect {
        self.display
    }

    /// Screen pixels per frame pixel, per axis.
    pub fn scale(&self) -> (f32, f32) {
        (self.display.width() / self.frame_w, self.display.height() / self.frame_h)
    }

    /// Screen position → frame pixels. A degenerate (zero-size) display
    /// maps everything onto the frame origin.
    pub fn to_frame(&self, screen: Point) -> Point {
        let (sx, sy) = self.scale();
        if sx <= 0.0 || sy <= 0.0 {
            return Point::default();
        }
        Point::new(
            (screen.x - self.display.min.x) / sx,
            (screen.y - self.display.min.y) / sy,
        )
    }

    /// Frame pixels → screen position.
    pub fn to_screen(&self, frame: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(self.display.min.x + frame.x * sx, self.display.min.y + frame.y * sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_inclusive() {
        assert!(START_BUTTON.contains(Point::new(10.0, 50.0)));
        assert!(START_BUTTON.contains(Point::new(110.0, 90.0)));
        assert!(!START_BUTTON.contains(Point::new(110.5, 90.0)));
    }

    #[test]
    fn buttons_do_not_overlap() {
        let gap = Point::new(115.0, 70.0);
        assert!(!START_BUTTON.contains(gap));
        assert!(!END_BUTTON.contains(gap));
    }

    #[test]
    fn fit_rect_letterboxes_wide_frames() {
        let avail = Rect::from_corners(0.0, 0.0, 1000.0, 1000.0);
        let r = fit_rect((1280, 720), avail);
        assert!((r.width() - 1000.0).abs() < 1e-3);
        assert!((r.height() - 562.5).abs() < 1e-3);
        assert!((r.center().y - 500.0).abs() < 1e-3);
    }

    #[test]
    fn fit_rect_pillarboxes_tall_frames() {
        let avail = Rect::from_corners(0.0, 0.0, 1000.0, 500.0);
        let r = fit_rect((720, 1280), avail);
        assert!((r.height() - 500.0).abs() < 1e-3);
        assert!((r.width() - 281.25).abs() < 1e-3);
    }

    #[test]
    fn transform_round_trips() {
        let vt = ViewTransform::new((1280, 720), Rect::from_corners(100.0, 50.0, 740.0, 410.0));
        let f = Point::new(60.0, 70.0);
        let s = vt.to_screen(f);
        assert!((s.x - 130.0).abs() < 1e-3);
        assert!((s.y - 85.0).abs() < 1e-3);
        let back = vt.to_frame(s);
        assert!((back.x - f.x).abs() < 1e-3 && (back.y - f.y).abs() < 1e-3);
    }

    #[test]
    fn half_scale_click_lands_on_start_button() {
        // Frame shown at half size: a click at screen (30, 35) is frame (60, 70).
        let vt = ViewTransform::new((1280, 720), Rect::from_corners(0.0, 0.0, 640.0, 360.0));
        assert!(START_BUTTON.contains(vt.to_frame(Point::new(30.0, 35.0))));
    }

    #[test]
    fn degenerate_display_maps_to_origin() {
        let vt = ViewTransform::new((1280, 720), Rect::from_corners(5.0, 5.0, 5.0, 5.0));
        assert_eq!(vt.to_frame(Point::new(100.0, 100.0)), Point::default());
    }
}
