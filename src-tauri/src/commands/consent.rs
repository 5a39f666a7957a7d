use tauri::State;
use tracing::{info, warn};

use super::PanelState;
use crate::error::ForgeMateError;
use crate::prefs::sync;

/// Initial checkbox state for the telemetry section of the settings panel.
#[tauri::command]
pub fn get_telemetry_consent(state: State<'_, PanelState>) -> bool {
    info!("Loading telemetry consent state");
    sync::initial_state(&state.data_file)
}

/// Commit the telemetry checkbox state.
///
/// On failure the error message is returned to the frontend, which keeps
/// the panel open and shows it to the user.
#[tauri::command]
pub fn set_telemetry_consent(state: State<'_, PanelState>, enabled: bool) -> Result<(), String> {
    info!("Committing telemetry consent: {}", enabled);
    sync::commit(
        &state.data_file,
        enabled,
        &state.config,
        state.emitter.as_ref(),
    )
    .map_err(|e| {
        warn!("Failed to save telemetry preference: {:#}", e);
        ForgeMateError::Preferences(format!("Could not save your preferences: {}", e)).into()
    })
}
