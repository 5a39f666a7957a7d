use tauri::State;
use tracing::{info, warn};

use super::PanelState;
use crate::prefs::{reader, sync, writer};

/// Read a named preference from the document. Empty values and a missing
/// file both read as `None`.
#[tauri::command]
pub fn get_preference(state: State<'_, PanelState>, key: &str) -> Result<Option<String>, String> {
    info!("Getting preference: {}", key);
    if !state.data_file.exists() {
        return Ok(None);
    }
    let doc = reader::read_document(&state.data_file).map_err(|e| {
        warn!("Failed to read preference document: {:#}", e);
        e.to_string()
    })?;
    Ok(doc
        .get(key)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string()))
}

/// Write a named preference to the document, creating it from the bundled
/// template first if absent.
#[tauri::command]
pub fn set_preference(state: State<'_, PanelState>, key: &str, value: &str) -> Result<(), String> {
    info!("Setting preference: {} = {}", key, value);
    if !state.data_file.exists() {
        sync::create_from_template(&state.data_file, &state.config.template_xml).map_err(|e| {
            warn!("Failed to create preference document: {:#}", e);
            e.to_string()
        })?;
    }
    let mut doc = reader::read_document(&state.data_file).map_err(|e| {
        warn!("Failed to read preference document: {:#}", e);
        e.to_string()
    })?;
    doc.set(key, value.to_string());
    writer::write_document_atomic(&doc, &state.data_file).map_err(|e| {
        warn!("Failed to save preference document: {:#}", e);
        e.to_string()
    })
}
