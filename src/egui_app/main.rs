/**
 * Poetica Desktop App - Main Entry Point
 *
 * Starts the native egui client. The API server URL comes from
 * `POETICA_API_URL` (default `http://127.0.0.1:3000`).
 */
use eframe::egui;
use poetica::egui_app::PoeticaApp;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Poetica"),
        ..Default::default()
    };
    eframe::run_native(
        "Poetica",
        options,
        Box::new(|cc| Ok(Box::new(PoeticaApp::new(cc)))),
    )
}
