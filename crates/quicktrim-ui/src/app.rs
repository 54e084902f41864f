// crates/quicktrim-ui/src/app.rs
use eframe::egui;
use tracing::info;

use quicktrim_core::{Session, TrimCommand};
use quicktrim_media::MediaWorker;

use crate::config::Config;
use crate::context::AppContext;
use crate::modules::{
    TrimModule,
    player::PlayerModule,
    playlist::PlaylistModule,
    status::StatusModule,
};
use crate::theme::configure_style;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct QuickTrimApp {
    session:      Session,
    context:      AppContext,
    playlist:     PlaylistModule,
    player:       PlayerModule,
    status:       StatusModule,
    /// Commands emitted by modules each frame, processed after the UI pass.
    pending_cmds: Vec<TrimCommand>,
}

impl QuickTrimApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        configure_style(&cc.egui_ctx);
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let playing = !config.paused;
        let worker  = MediaWorker::new(config.encoder_settings(), config.preview_width, playing);

        Self {
            session:      Session::new(playing),
            context:      AppContext::new(worker),
            playlist:     PlaylistModule,
            player:       PlayerModule::new(),
            status:       StatusModule::default(),
            pending_cmds: config.startup_commands(),
        }
    }

    /// Apply one command and carry out the effects it produced.
    fn process_command(&mut self, cmd: TrimCommand, ctx: &egui::Context) {
        for effect in self.session.apply(cmd) {
            if matches!(effect, quicktrim_core::Effect::Load { .. }) {
                self.player.cancel_drag();
            }
            self.context.execute(effect, ctx);
        }
    }

    fn poll_media(&mut self, ctx: &egui::Context) {
        self.context.ingest_media_results(&mut self.session);
        self.context.poll_frame(&mut self.session, ctx);
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for QuickTrimApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("[app] shutting down");
        self.context.shutdown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Window close behaves exactly like `q`.
        if ctx.input(|i| i.viewport().close_requested()) && !self.session.should_quit() {
            self.pending_cmds.push(TrimCommand::Quit);
        }

        self.poll_media(ctx);

        egui::SidePanel::left(self.playlist.name())
            .resizable(true)
            .default_width(220.0)
            .min_width(160.0)
            .show(ctx, |ui| {
                self.playlist.ui(ui, &self.session, &mut self.pending_cmds);
            });

        self.status.exporting = self.context.media_worker.exports_in_flight();
        egui::TopBottomPanel::bottom(self.status.name())
            .exact_height(28.0)
            .show(ctx, |ui| {
                self.status.ui(ui, &self.session, &mut self.pending_cmds);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                self.player.current_frame = self.context.frame_texture.clone();
                self.player.frame_size    = self.context.frame_size;
                self.player.ui(ui, &self.session, &mut self.pending_cmds);
            });

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<TrimCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd, ctx);
        }

        ctx.request_repaint_after(self.context.repaint_interval(&self.session));
    }
}
