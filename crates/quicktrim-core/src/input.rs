// crates/quicktrim-core/src/input.rs
//
// InteractionController: pointer/keyboard events in, TrimCommands out.
//
// No rendering, no I/O, no access to TrimState — the only thing it remembers
// between events is whether a timeline drag is in progress. Positions must
// already be in frame pixels (see ViewTransform::to_frame).

use crate::commands::TrimCommand;
use crate::helpers::geometry::{Point, END_BUTTON, SAVE_BUTTON, START_BUTTON};
use crate::helpers::timeline::TimelineGeometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Point, button: PointerButton },
    PointerMove { pos: Point },
    PointerUp   { button: PointerButton },
    /// A typed character. Only `q`, `n`, `p` and space are bound.
    Key(char),
}

#[derive(Debug, Default)]
pub struct InteractionController {
    dragging: bool,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Drop an in-progress drag, e.g. when the source is swapped mid-drag.
    pub fn cancel_drag(&mut self) {
        self.dragging = false;
    }

    /// Map one event to at most one command.
    ///
    /// `frame_width` is the width of the frame currently on screen; the
    /// timeline geometry is derived from it on every call.
    pub fn handle(
        &mut self,
        event:          InputEvent,
        frame_width:    f32,
        total_duration: f64,
    ) -> Option<TrimCommand> {
        let timeline = TimelineGeometry::for_frame_width(frame_width);
        match event {
            InputEvent::PointerDown { pos, button: PointerButton::Primary } => {
                // Priority order matters only if regions ever overlap:
                // Start > End > Save > timeline.
                if START_BUTTON.contains(pos) {
                    Some(TrimCommand::MarkStart)
                } else if END_BUTTON.contains(pos) {
                    Some(TrimCommand::MarkEnd)
                } else if SAVE_BUTTON.contains(pos) {
                    Some(TrimCommand::Export)
                } else if timeline.in_band(pos) {
                    self.dragging = true;
                    Some(TrimCommand::Seek(timeline.pixel_to_time(pos.x, total_duration)))
                } else {
                    None
                }
            }
            InputEvent::PointerDown { .. } => None,
            InputEvent::PointerMove { pos } if self.dragging => {
                Some(TrimCommand::Seek(timeline.pixel_to_time(pos.x, total_duration)))
            }
            InputEvent::PointerMove { .. } => None,
            InputEvent::PointerUp { button: PointerButton::Primary } => {
                self.dragging = false;
                None
            }
            InputEvent::PointerUp { .. } => None,
            InputEvent::Key(c) => match c {
                'q' => Some(TrimCommand::Quit),
                'n' => Some(TrimCommand::NextItem),
                'p' => Some(TrimCommand::PreviousItem),
                ' ' => Some(TrimCommand::TogglePause),
                _   => None,
            },
        }
    }
}
