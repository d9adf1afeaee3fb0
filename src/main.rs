use std::fs;
use std::rc::Rc;
use std::sync::Arc;

use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fittrack::app::FitTrackApp;
use fittrack::config::AppConfig;
use fittrack::storage::FileStore;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fittrack=debug")),
        )
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("using default configuration: {}", e);
        AppConfig::default()
    });
    info!(storage = %config.storage_dir.display(), "starting FitTrack");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "FitTrack",
        options,
        Box::new(move |cc| {
            if let Some(path) = &config.font_path {
                match fs::read(path) {
                    Ok(font_data) => install_font(&cc.egui_ctx, font_data),
                    Err(e) => warn!("failed to open font file {}: {}", path.display(), e),
                }
            }

            let store = Rc::new(FileStore::new(config.storage_dir.clone()));
            let ctx = cc.egui_ctx.clone();
            let waker = Arc::new(move || ctx.request_repaint());
            Ok(Box::new(FitTrackApp::new(&config, store, waker)))
        }),
    )
}

fn install_font(ctx: &egui::Context, font_data: Vec<u8>) {
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        "custom".to_owned(),
        Arc::from(egui::FontData::from_owned(font_data)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, "custom".to_owned());
    }
    ctx.set_fonts(fonts);
}
