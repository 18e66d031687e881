#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod app;

use circle_cropper::cli::CliArgs;
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let config = match args.crop_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Ignoring crop settings: {err}");
            Default::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Circle Cropper",
        options,
        Box::new(move |cc| Ok(Box::new(app::CircleCropper::new(cc, config, args.image)))),
    )
}
