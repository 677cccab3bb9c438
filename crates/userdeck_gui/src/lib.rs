//! Native desktop client for a remote users resource.

mod app;
/// Worker thread and HTTP store behind the UI.
pub mod backend;

use app::UserDeckApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;
use userdeck_core::Config;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("userdeck=info,userdeck_gui=info"));

    // Another binary may have installed one already.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Reads [`Config`] from the environment and runs the window until it closes.
///
/// # Errors
/// Fails when eframe cannot start or the configured API URL is unusable.
pub fn run() -> eframe::Result<()> {
    init_tracing();

    let config = Config::from_env();
    let app = UserDeckApp::new(&config).map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("UserDeck"),
        ..Default::default()
    };

    eframe::run_native("UserDeck", options, Box::new(|_cc| Ok(Box::new(app))))
}
