#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod logger;
mod views;

fn main() -> anyhow::Result<()> {
    let app_log = logger::AppLogger::new(256);
    app_log.clone().init()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Press Proof"),
        ..Default::default()
    };

    eframe::run_native(
        "Press Proof",
        options,
        Box::new(move |cc| Ok(Box::new(app::ProofApp::new(cc, app_log)))),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with an error: {err}"))
}
