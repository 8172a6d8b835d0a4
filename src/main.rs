// Keep Windows release builds from opening a console next to the viewer window.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

mod config;
mod controller;
mod error;
mod image_handle;
mod save_request;
mod state;
mod ui;

use log::info;

fn main() -> Result<(), slint::PlatformError> {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let viewer = AppWindow::new()?;

    // Starts with no image: every run begins empty, nothing is restored from disk
    ui::setup_handlers(&viewer, state::AppState::new());

    viewer.run()?;
    info!("Viewer closed");

    Ok(())
}
