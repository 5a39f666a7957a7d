pub mod config;
pub mod consent;

use std::path::PathBuf;
use std::sync::Arc;

use crate::prefs::SyncConfig;
use crate::telemetry::TelemetryEmitter;

/// Managed state backing the settings panel commands.
pub struct PanelState {
    /// Fixed per-user path of the preference document.
    pub data_file: PathBuf,
    pub config: SyncConfig,
    pub emitter: Arc<dyn TelemetryEmitter>,
}
