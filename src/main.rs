use env_logger::Builder;
use log::{LevelFilter, error, info};
use std::path::Path;
use std::process::ExitCode;

use crate::config::{AnimationConfig, CONFIG_FILE};

mod config;
mod render;
mod results;

fn main() -> ExitCode {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("elastic_wave_animator"), LevelFilter::Debug)
        .init();

    let config = AnimationConfig::load_or_default(Path::new(CONFIG_FILE));
    info!("Reading results from {}", config.input_path.display());

    let blocks = results::process_data(&config.input_path);
    if blocks.is_empty() {
        error!("Nothing to animate. Could not build the animation, check the processing output above.");
        return ExitCode::FAILURE;
    }

    if let Err(e) = render::create_animation(&blocks, &config) {
        error!("Error while saving the GIF: {:#}", e);
        error!(
            "Check that {} is writable and that the `image` crate is built with its `gif` feature.",
            config.output_path.display()
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
