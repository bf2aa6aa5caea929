// Scribble: a small freehand bitmap editor.
// Usage: scribble-ui [IMAGE]   (RUST_LOG and SCRIBBLE_CONFIG are honoured)

mod editor;

use anyhow::Context;
use scribble_canvas::{Action, Document, EditorConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::editor::ScribbleApp;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = EditorConfig::from_env().context("load editor config")?;
    let mut document = Document::new(&config);
    let mut status = None;

    if let Some(path) = std::env::args_os().nth(1) {
        if let Err(e) = document.apply(Action::Open(path.into())) {
            warn!("Could not open startup image: {}", e);
            status = Some(e.to_string());
        }
    }

    let canvas_size = egui::vec2(config.canvas_width as f32, config.canvas_height as f32);
    let window_size = canvas_size + egui::vec2(16.0, 72.0);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(document.title())
            .with_inner_size(window_size)
            .with_min_inner_size(window_size),
        ..Default::default()
    };

    info!("Starting Scribble");
    eframe::run_native(
        "Scribble",
        options,
        Box::new(move |cc| Ok(Box::new(ScribbleApp::new(cc, document, status)))),
    )
    .map_err(|e| anyhow::anyhow!("run editor window: {e}"))
}
