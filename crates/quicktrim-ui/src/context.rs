// crates/quicktrim-ui/src/context.rs
//
// AppContext owns the runtime handles that are not part of the Session:
// the media worker and the GPU texture of the frame on screen. Everything
// that talks to the worker goes through here.

use std::time::Duration;

use eframe::egui;
use tracing::{debug, info};

use quicktrim_core::{Effect, MediaResult, Session};
use quicktrim_media::{MediaWorker, PlaybackCmd};

pub struct AppContext {
    pub media_worker: MediaWorker,
    /// Texture of the last accepted frame. Cleared on every load so a frame
    /// from the previous file is never shown under the new file's name.
    pub frame_texture: Option<egui::TextureHandle>,
    /// Pixel size of `frame_texture`; the overlay's coordinate space.
    pub frame_size:    Option<(u32, u32)>,
}

impl AppContext {
    pub fn new(media_worker: MediaWorker) -> Self {
        Self { media_worker, frame_texture: None, frame_size: None }
    }

    fn clear_frame(&mut self) {
        self.frame_texture = None;
        self.frame_size    = None;
    }

    // ── Worker → session ──────────────────────────────────────────────────────

    /// Dispatch every queued open / export result into the session.
    pub fn ingest_media_results(&mut self, session: &mut Session) {
        let results: Vec<MediaResult> = self.media_worker.rx.try_iter().collect();
        for result in results {
            match result {
                MediaResult::Opened { id, path, info } => {
                    debug!("[media] opened {} as {id}", path.display());
                    session.on_opened(id, &info);
                }
                MediaResult::OpenFailed { id, error } => {
                    if session.media_id() == Some(id) {
                        self.clear_frame();
                    }
                    session.on_open_failed(id, &error);
                }
                MediaResult::ExportDone { output, .. } => session.on_export_done(&output),
                MediaResult::ExportFailed { error, .. } => session.report(&error),
            }
        }
    }

    /// Take the newest decoded frame and upload it if the session accepts it.
    pub fn poll_frame(&mut self, session: &mut Session, ctx: &egui::Context) {
        let Some(frame) = self.media_worker.take_frame() else { return };
        if !session.on_frame(frame.id, frame.serial, frame.timestamp) {
            return;
        }
        let size  = [frame.width as usize, frame.height as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.data);
        // Same size: overwrite in place instead of allocating a new texture.
        match self.frame_texture.as_mut().filter(|t| t.size() == size) {
            Some(tex) => tex.set(image, egui::TextureOptions::LINEAR),
            None => {
                let tex = ctx.load_texture("quicktrim_frame", image, egui::TextureOptions::LINEAR);
                self.frame_texture = Some(tex);
            }
        }
        self.frame_size = Some((frame.width, frame.height));
    }

    // ── Session → worker ──────────────────────────────────────────────────────

    pub fn execute(&mut self, effect: Effect, ctx: &egui::Context) {
        match effect {
            Effect::Load { id, path } => {
                info!("[app] loading {}", path.display());
                self.clear_frame();
                self.media_worker.send(PlaybackCmd::Open { id, path });
            }
            Effect::Seek { serial, time } => {
                self.media_worker.send(PlaybackCmd::Seek { serial, time });
            }
            Effect::SetPlaying(playing) => {
                self.media_worker.send(PlaybackCmd::SetPlaying(playing));
            }
            Effect::Export(req) => {
                self.media_worker.start_export(req);
            }
            Effect::Quit => {
                self.media_worker.send(PlaybackCmd::Close);
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    /// How soon the UI must tick again to pick up worker output.
    pub fn repaint_interval(&self, session: &Session) -> Duration {
        if session.is_playing() && session.is_loaded() {
            Duration::from_millis(5)
        } else if self.media_worker.exports_in_flight() > 0 || !session.is_loaded() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(30)
        }
    }

    pub fn shutdown(&self) {
        self.media_worker.send(PlaybackCmd::Close);
        self.media_worker.shutdown();
    }
}
