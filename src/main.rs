mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::WineAnalyzerApp;
use clap::Parser;
use config::{AppConfig, Cli};
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli).context("loading configuration")?;
    log::info!("Dataset path: {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can fetch and decode the remote pictures.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(WineAnalyzerApp::new(config)))
        }),
    )
    .map_err(|e| anyhow!("running the UI: {e}"))
}
