#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod context;
mod helpers;
mod modules;
mod theme;

use anyhow::anyhow;
use clap::Parser;
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    helpers::log::init();
    let config = config::Config::parse();
    info!("[app] starting with {config:?}");

    quicktrim_media::init().map_err(|e| anyhow!("FFmpeg init failed: {e}"))?;

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("QuickTrim")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "QuickTrim",
        native_options,
        Box::new(|cc| Ok(Box::new(app::QuickTrimApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("window: {e}"))
}
