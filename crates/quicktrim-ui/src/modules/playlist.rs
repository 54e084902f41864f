// crates/quicktrim-ui/src/modules/playlist.rs
use egui::{Align, Layout, RichText, Ui};
use rfd::FileDialog;

use quicktrim_core::playlist::VIDEO_EXTENSIONS;
use quicktrim_core::{Session, TrimCommand};

use super::TrimModule;
use crate::helpers::format::fit_label;
use crate::theme::{DARK_BG_2, DARK_TEXT_DIM};

pub struct PlaylistModule;

impl TrimModule for PlaylistModule {
    fn name(&self) -> &str { "playlist" }

    fn ui(&mut self, ui: &mut Ui, session: &Session, cmd: &mut Vec<TrimCommand>) {
        ui.vertical(|ui| {
            // ── Sources ──────────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(egui::Margin { left: 8, right: 8, top: 6, bottom: 6 })
                .show(ui, |ui| {
                    ui.with_layout(Layout::top_down_justified(Align::Center), |ui| {
                        if ui.button("Load Video Folder").clicked() {
                            if let Some(dir) = FileDialog::new().pick_folder() {
                                cmd.push(TrimCommand::LoadFolder(dir));
                            }
                        }
                        if ui.button("Open Video File").clicked() {
                            if let Some(path) = FileDialog::new()
                                .add_filter("Video", &VIDEO_EXTENSIONS)
                                .pick_file()
                            {
                                cmd.push(TrimCommand::OpenFile(path));
                            }
                        }
                        if ui.button("Select Save Folder").clicked() {
                            if let Some(dir) = FileDialog::new().pick_folder() {
                                cmd.push(TrimCommand::SetSaveDir(dir));
                            }
                        }
                    });
                });

            let save_label = match session.save_dir() {
                Some(dir) => format!("Save to: {}", dir.display()),
                None      => "Save to: (not selected)".to_string(),
            };
            ui.label(RichText::new(save_label).size(10.0).color(DARK_TEXT_DIM))
                .on_hover_text("Trimmed clips are written here");

            ui.separator();

            // ── Entries ──────────────────────────────────────────────────────
            let playlist = session.playlist();
            if playlist.is_empty() {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("No videos loaded").size(11.0).color(DARK_TEXT_DIM));
                });
                return;
            }

            ui.label(RichText::new(format!("{} videos", playlist.len())).size(10.0).color(DARK_TEXT_DIM));
            let max_px = ui.available_width() - 12.0;
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (i, path) in playlist.entries().iter().enumerate() {
                    let name = path.file_name().unwrap_or_default().to_string_lossy();
                    let selected = i == playlist.index();
                    let resp = ui.selectable_label(selected, fit_label(&name, max_px))
                        .on_hover_text(path.display().to_string());
                    if resp.clicked() && !selected {
                        cmd.push(TrimCommand::SelectItem(i));
                    }
                }
            });
        });
    }
}
