// crates/quicktrim-ui/src/modules/status.rs
//
// Bottom bar: last status message on the left, playback + export state on
// the right.

use egui::{Align, Layout, RichText, Ui};

use quicktrim_core::helpers::time::format_hms;
use quicktrim_core::{Session, TrimCommand};

use super::TrimModule;
use crate::theme::{severity_color, ACCENT, DARK_TEXT_DIM};

#[derive(Default)]
pub struct StatusModule {
    /// Exports currently running, set by app.rs before ui().
    pub exporting: usize,
}

impl TrimModule for StatusModule {
    fn name(&self) -> &str { "status" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, _cmd: &mut Vec<TrimCommand>) {
        ui.horizontal_centered(|ui| {
            match session.status() {
                Some(line) => {
                    ui.label(RichText::new(&line.text).size(12.0).color(severity_color(line.severity)));
                }
                None => {
                    ui.label(RichText::new("Ready").size(12.0).color(DARK_TEXT_DIM));
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if session.is_loaded() {
                    let trim = session.trim();
                    ui.label(RichText::new(format!(
                        "{} / {}",
                        format_hms(trim.current_time()),
                        format_hms(trim.total_duration()),
                    )).monospace().size(12.0));
                    ui.separator();
                    ui.label(RichText::new(format!(
                        "In {}  Out {}",
                        format_hms(trim.start_time()),
                        format_hms(trim.end_time()),
                    )).size(11.0).color(DARK_TEXT_DIM));
                    ui.separator();
                    let state = if session.is_playing() { "Playing" } else { "Paused" };
                    ui.label(RichText::new(state).size(11.0));
                }
                if self.exporting > 0 {
                    ui.separator();
                    ui.spinner();
                    ui.label(RichText::new(format!("Exporting ({})", self.exporting)).size(11.0).color(ACCENT));
                }
            });
        });
    }
}
