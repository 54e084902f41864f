// crates/quicktrim-ui/src/modules/player.rs
//
// PlayerModule: the frame, the trim overlay on top of it, and input capture.
//
// The overlay and all hit-testing live in frame pixels. The frame is
// letterboxed into whatever space the central panel has, so a ViewTransform
// maps overlay shapes to the screen and pointer positions back into the frame
// before they reach the InteractionController.

use egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, StrokeKind, Ui};

use quicktrim_core::helpers::geometry::{fit_rect, Point, Rect, ViewTransform};
use quicktrim_core::input::{InputEvent, InteractionController, PointerButton};
use quicktrim_core::overlay::{build_overlay, OverlayShape};
use quicktrim_core::{Session, TrimCommand};

use super::TrimModule;
use crate::theme::{overlay_color, DARK_BORDER, DARK_TEXT_DIM};

pub struct PlayerModule {
    /// Texture of the frame on screen, set by app.rs before ui() each tick.
    pub current_frame: Option<egui::TextureHandle>,
    pub frame_size:    Option<(u32, u32)>,
    controller:        InteractionController,
}

impl PlayerModule {
    pub fn new() -> Self {
        Self { current_frame: None, frame_size: None, controller: InteractionController::new() }
    }

    /// Called when a new file starts loading; a drag never carries over.
    pub fn cancel_drag(&mut self) {
        self.controller.cancel_drag();
    }
}

impl TrimModule for PlayerModule {
    fn name(&self) -> &str { "player" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, cmd: &mut Vec<TrimCommand>) {
        // Keys act with or without a frame on screen.
        let keyboard_free = !ui.ctx().wants_keyboard_input();
        let events = ui.input(|i| i.events.clone());
        dispatch_keys(&events, keyboard_free, &mut self.controller, cmd);

        let (canvas, _resp) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(canvas);
        painter.rect_filled(canvas, 0.0, Color32::BLACK);

        let (Some(tex), Some(size)) = (&self.current_frame, self.frame_size) else {
            let hint = if session.playlist().is_empty() {
                "Open a video file or load a folder to start"
            } else {
                "Loading…"
            };
            painter.text(canvas.center(), Align2::CENTER_CENTER, hint,
                FontId::proportional(14.0), DARK_TEXT_DIM);
            return;
        };

        let display = fit_rect(size, to_rect(canvas));
        let view    = ViewTransform::new(size, display);
        let screen  = to_egui(display);

        painter.image(tex.id(), screen,
            egui::Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE);
        painter.rect_stroke(screen.expand(1.0), 0.0, Stroke::new(1.0, DARK_BORDER), StrokeKind::Outside);

        // ── Overlay ──────────────────────────────────────────────────────────
        let (sx, sy) = view.scale();
        for shape in build_overlay(size, session.trim(), session.playlist_position()) {
            match shape {
                OverlayShape::FilledRect { rect, color } => {
                    painter.rect_filled(to_egui(map_rect(&view, rect)), 0.0, overlay_color(color));
                }
                OverlayShape::StrokeRect { rect, color, width } => {
                    painter.rect_stroke(
                        to_egui(map_rect(&view, rect)), 0.0,
                        Stroke::new(width * sx, overlay_color(color)),
                        StrokeKind::Middle,
                    );
                }
                OverlayShape::Line { from, to, color, width } => {
                    painter.line_segment(
                        [to_pos(view.to_screen(from)), to_pos(view.to_screen(to))],
                        Stroke::new(width * sx, overlay_color(color)),
                    );
                }
                OverlayShape::Text { anchor, text, color, size } => {
                    painter.text(to_pos(view.to_screen(anchor)), Align2::LEFT_BOTTOM, text,
                        FontId::proportional(size * sy), overlay_color(color));
                }
            }
        }

        // ── Input ────────────────────────────────────────────────────────────
        let total = session.trim().total_duration();
        for event in &events {
            if let Some(ev) = translate_pointer(event, &view) {
                if let Some(c) = self.controller.handle(ev, size.0 as f32, total) {
                    cmd.push(c);
                }
            }
        }
    }
}

/// Run every bound key press in `events` through the controller.
pub fn dispatch_keys(
    events:        &[egui::Event],
    keyboard_free: bool,
    controller:    &mut InteractionController,
    cmd:           &mut Vec<TrimCommand>,
) {
    for event in events {
        if let Some(ev) = translate_key(event, keyboard_free) {
            // Key bindings do not depend on frame geometry.
            if let Some(c) = controller.handle(ev, 0.0, 0.0) {
                cmd.push(c);
            }
        }
    }
}

/// egui pointer event → frame-space InputEvent.
///
/// Presses only count inside the displayed frame; moves and releases are
/// always forwarded so a drag can leave the frame and still end cleanly.
pub fn translate_pointer(event: &egui::Event, view: &ViewTransform) -> Option<InputEvent> {
    match event {
        egui::Event::PointerButton { pos, button, pressed, .. } => {
            let button = match button {
                egui::PointerButton::Primary   => PointerButton::Primary,
                egui::PointerButton::Secondary => PointerButton::Secondary,
                egui::PointerButton::Middle    => PointerButton::Middle,
                _ => return None,
            };
            if *pressed {
                let screen = to_point(*pos);
                if !view.display().contains(screen) {
                    return None;
                }
                Some(InputEvent::PointerDown { pos: view.to_frame(screen), button })
            } else {
                Some(InputEvent::PointerUp { button })
            }
        }
        egui::Event::PointerMoved(pos) => {
            Some(InputEvent::PointerMove { pos: view.to_frame(to_point(*pos)) })
        }
        _ => None,
    }
}

/// Bound key press → InputEvent. Ignored while a text field has focus.
pub fn translate_key(event: &egui::Event, keyboard_free: bool) -> Option<InputEvent> {
    match event {
        egui::Event::Key { key, pressed: true, repeat: false, modifiers, .. }
            if keyboard_free && !modifiers.command && !modifiers.alt =>
        {
            let c = match key {
                egui::Key::Q     => 'q',
                egui::Key::N     => 'n',
                egui::Key::P     => 'p',
                egui::Key::Space => ' ',
                _ => return None,
            };
            Some(InputEvent::Key(c))
        }
        _ => None,
    }
}

// ── Rect / point conversion ──────────────────────────────────────────────────

fn to_point(p: Pos2) -> Point { Point::new(p.x, p.y) }
fn to_pos(p: Point) -> Pos2 { Pos2::new(p.x, p.y) }

fn to_rect(r: egui::Rect) -> Rect {
    Rect::from_corners(r.min.x, r.min.y, r.max.x, r.max.y)
}

fn to_egui(r: Rect) -> egui::Rect {
    egui::Rect::from_min_max(to_pos(r.min), to_pos(r.max))
}

fn map_rect(view: &ViewTransform, r: Rect) -> Rect {
    let a = view.to_screen(r.min);
    let b = view.to_screen(r.max);
    Rect::from_corners(a.x, a.y, b.x, b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Modifiers;

    /// 1280×720 frame shown at half size with its top-left at (100, 50).
    fn view() -> ViewTransform {
        ViewTransform::new((1280, 720), Rect::from_corners(100.0, 50.0, 740.0, 410.0))
    }

    fn press(x: f32, y: f32) -> egui::Event {
        egui::Event::PointerButton {
            pos:       Pos2::new(x, y),
            button:    egui::PointerButton::Primary,
            pressed:   true,
            modifiers: Modifiers::NONE,
        }
    }

    fn key(key: egui::Key) -> egui::Event {
        egui::Event::Key { key, physical_key: None, pressed: true, repeat: false, modifiers: Modifiers::NONE }
    }

    #[test]
    fn press_is_mapped_into_frame_space() {
        match translate_pointer(&press(130.0, 85.0), &view()) {
            Some(InputEvent::PointerDown { pos, button: PointerButton::Primary }) => {
                assert!((pos.x - 60.0).abs() < 1e-3);
                assert!((pos.y - 70.0).abs() < 1e-3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn press_on_start_button_marks_start() {
        let ev = translate_pointer(&press(130.0, 85.0), &view()).unwrap();
        let mut c = InteractionController::new();
        assert_eq!(c.handle(ev, 1280.0, 10.0), Some(TrimCommand::MarkStart));
    }

    #[test]
    fn press_outside_frame_is_ignored() {
        assert_eq!(translate_pointer(&press(20.0, 120.0), &view()), None);
    }

    #[test]
    fn release_outside_frame_still_ends_drag() {
        let ev = egui::Event::PointerButton {
            pos:       Pos2::new(5.0, 5.0),
            button:    egui::PointerButton::Primary,
            pressed:   false,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(
            translate_pointer(&ev, &view()),
            Some(InputEvent::PointerUp { button: PointerButton::Primary }),
        );
    }

    #[test]
    fn bound_keys_translate() {
        assert_eq!(translate_key(&key(egui::Key::Q), true), Some(InputEvent::Key('q')));
        assert_eq!(translate_key(&key(egui::Key::Space), true), Some(InputEvent::Key(' ')));
        assert_eq!(translate_key(&key(egui::Key::A), true), None);
    }

    #[test]
    fn keys_are_ignored_while_a_text_field_has_focus() {
        assert_eq!(translate_key(&key(egui::Key::N), false), None);
    }

    #[test]
    fn keys_dispatch_without_a_frame() {
        let mut c = InteractionController::new();
        let mut cmd = Vec::new();
        let events = vec![key(egui::Key::N), key(egui::Key::Space), key(egui::Key::Q)];
        dispatch_keys(&events, true, &mut c, &mut cmd);
        assert_eq!(cmd, vec![TrimCommand::NextItem, TrimCommand::TogglePause, TrimCommand::Quit]);
    }

    #[test]
    fn pointer_events_are_not_keys() {
        let mut c = InteractionController::new();
        let mut cmd = Vec::new();
        dispatch_keys(&[press(130.0, 85.0)], true, &mut c, &mut cmd);
        assert!(cmd.is_empty());
    }
}
