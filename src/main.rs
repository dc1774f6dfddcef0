//! Main application for the YouTube Downloader GUI

// Window, widgets and event glue
mod app;
// Persisted language/theme settings
mod config;
// ffmpeg / yt-dlp discovery
mod deps;
// yt-dlp process driver
mod downloader;
// Error types for startup, validation and yt-dlp runs
mod error;
// Fallback font so Arabic text renders
mod fonts;
// Interface string tables
mod i18n;
// Single-download orchestration with format fallback
mod job;
// tracing subscriber setup
mod logging;
// Data models for requests and progress
mod model;
// Progress parsing and formatting
mod progress;
// UI state independent of egui
mod state;
// Light/dark palettes
mod theme;

use app::DownloaderApp;
use config::ConfigStore;
use downloader::YtDlp;
use error::StartupError;
use state::AppState;

use std::path::Path;

use eframe::egui;
use tokio::runtime::Runtime;
use tracing::{error, info};

/// Program entry point: checks dependencies, loads settings and launches the GUI
fn main() -> Result<(), StartupError> {
    logging::init_tracing();

    let tools = match deps::check() {
        Ok(tools) => tools,
        Err(missing) => {
            error!(missing = ?missing.missing, "required tools not found");
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Missing Dependencies")
                .set_description(&missing.to_string())
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
            return Err(missing.into());
        }
    };

    let store = ConfigStore::locate();
    let settings = store.load();
    info!(config = %store.config_path().display(), ?settings, "settings loaded");

    // Download jobs run here, off the UI thread
    let runtime = Runtime::new().map_err(StartupError::Runtime)?;
    let fetcher = YtDlp::new(&tools, store.cookies_path().map(Path::to_path_buf));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([550.0, 400.0])
            .with_title(settings.language.strings().title.as_str()),
        ..Default::default()
    };
    eframe::run_native(
        "yt-dlp-gui",
        options,
        Box::new(move |cc| {
            Box::new(DownloaderApp::new(
                cc,
                AppState::new(settings),
                store,
                runtime,
                fetcher,
            ))
        }),
    )?;
    Ok(())
}
