#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod cli;
mod config;
mod io;
mod model;
mod render;
mod ui;

use clap::Parser;

fn main() -> eframe::Result<()> {
    let args = cli::Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .filter_module("egui", log::LevelFilter::Info)
        .filter_module("eframe", log::LevelFilter::Info)
        .format_timestamp_millis()
        .init();

    log::info!("Tamil Timeline {} starting", env!("CARGO_PKG_VERSION"));
    log::debug!("Command-line args: {:?}", args);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("Tamil Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Tamil Timeline",
        options,
        Box::new(move |cc| Ok(Box::new(app::TimelineApp::new(cc, &args)))),
    )
}
