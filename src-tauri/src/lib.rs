mod commands;
mod error;
pub mod prefs;
pub mod telemetry;

use std::sync::Arc;

use commands::PanelState;
use prefs::SyncConfig;
use telemetry::{HttpEmitter, LogEmitter, TelemetryEmitter};

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let data_file = prefs::paths::preference_file()
        .expect("could not resolve a per-user data directory");

    // Builds without a baked-in ingest endpoint log consent events locally
    // instead of posting them.
    let emitter: Arc<dyn TelemetryEmitter> = match option_env!("FORGEMATE_TELEMETRY_URL") {
        Some(url) => Arc::new(HttpEmitter::new(url.to_string())),
        None => Arc::new(LogEmitter),
    };

    tauri::Builder::default()
        .manage(PanelState {
            data_file,
            config: SyncConfig::bundled(env!("CARGO_PKG_VERSION")),
            emitter,
        })
        .invoke_handler(tauri::generate_handler![
            commands::consent::get_telemetry_consent,
            commands::consent::set_telemetry_consent,
            commands::config::get_preference,
            commands::config::set_preference,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
