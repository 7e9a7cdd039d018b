//! Main application entry point.

use tactile_app::{App, AppConfig};

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_scene_path(path),
        None => AppConfig::default(),
    };
    log::info!("Starting {} with {}", config.title, config.scene_path.display());

    let mut app = match App::load(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let frames = app.run();
    let transitions: usize = frames.iter().map(|frame| frame.fired.len()).sum();
    let messages: usize = frames.iter().map(|frame| frame.messages.len()).sum();
    println!(
        "{} frames, {} transitions, {} messages",
        frames.len(),
        transitions,
        messages
    );
}
