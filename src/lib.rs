pub mod core;

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::core::error::LauncherError;
use crate::core::protocol::{DefaultRegistry, Listener};
use crate::core::settings::LauncherSettings;

/// Read the launch script from stdin and run it. Returns the process exit code.
pub fn run(settings_path: Option<&Path>, log_level: Option<&str>) -> i32 {
    let loaded = LauncherSettings::load(settings_path);

    let fallback_filter = match (&loaded, log_level) {
        (_, Some(level)) => level.to_string(),
        (Ok(settings), None) => settings.log_filter().to_string(),
        (Err(_), None) => crate::core::settings::DEFAULT_LOG_FILTER.to_string(),
    };
    init_logging(&fallback_filter);

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => return report(e),
    };

    tracing::info!("OneSix launch helper starting...");
    tracing::debug!("Java binary: {}", settings.java_binary().display());

    let stdin = std::io::stdin();
    Listener::new(DefaultRegistry::new(settings)).listen(stdin.lock())
}

// Initialize structured logging on stderr; stdout belongs to the game.
fn init_logging(fallback_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::core::settings::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn report(e: LauncherError) -> i32 {
    tracing::error!("{}", e);
    e.exit_code()
}
