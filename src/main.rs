pub mod assets;
pub mod config;
pub mod controller;
pub mod render;
pub mod shell;

use crate::config::Config;
use color_eyre::{eyre::eyre, Result};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    setup()?;

    let config = Config::load_default_location().map_err(|e| eyre!("Failed to load config: {}", e))?;
    info!("Starting padview with {:?} display mode", config.display.mode);

    if let Err(e) = shell::run(config) {
        error!("Failed to init! {}", e);
        return Err(eyre!("padview stopped: {}", e));
    }

    info!("Window closed, exiting");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
