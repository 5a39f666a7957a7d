use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

use super::document::{INST_ID, PLUGIN_VERSION, PREF_VAL};
use super::{reader, writer};
use crate::telemetry::{self, instance_id, ConsentEvent, TelemetryEmitter};

/// Bundled preference document template, copied to the per-user path on
/// first save.
pub const BUNDLED_TEMPLATE: &str = include_str!("../../templates/data.xml");

/// Explicit configuration for the preference sync sequence.
pub struct SyncConfig {
    /// Version written into `pluginVersion` when the document has none.
    pub plugin_version: String,
    /// Template XML used to create the document when the file is absent.
    pub template_xml: String,
}

impl SyncConfig {
    /// Config using the bundled template.
    pub fn bundled(plugin_version: impl Into<String>) -> Self {
        Self {
            plugin_version: plugin_version.into(),
            template_xml: BUNDLED_TEMPLATE.to_string(),
        }
    }
}

/// Initial checkbox state for the settings panel.
///
/// Checked only when the preference file exists and `prefVal` is textually
/// `"true"`. A missing or unreadable file is not an error at init; the
/// checkbox simply starts unchecked.
pub fn initial_state(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    match reader::read_document(path) {
        Ok(doc) => doc.pref_val() == Some("true"),
        Err(e) => {
            warn!("Could not read preference document at init (ignored): {}", e);
            false
        }
    }
}

/// Commit the checkbox state to the preference document and fire the
/// consent-transition event.
///
/// When the file is absent the bundled template is copied into place and the
/// first-save branch runs: `pluginVersion`, a freshly generated `instID`
/// (unconditionally), and `prefVal` are all written. Otherwise the existing
/// document is updated in place: `prefVal` is always rewritten, while
/// `pluginVersion` and a validly formatted `instID` are left untouched and
/// only backfilled when absent, empty, or (for the ID) invalid in format.
///
/// Any I/O, parse, or serialize failure aborts the commit; nothing already
/// mutated in memory is rolled back, and no event fires.
pub fn commit(
    path: &Path,
    checked: bool,
    config: &SyncConfig,
    emitter: &dyn TelemetryEmitter,
) -> Result<()> {
    if path.exists() {
        let mut doc = reader::read_document(path)?;

        // Capture the prior value before mutation; the transition decides
        // which event fires after the save. Only the literals "true" and
        // "false" count as a prior state; any other non-empty text never
        // fires an event.
        let old_pref = match doc.pref_val() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(_) => Some(checked),
            None => None,
        };

        doc.set(PREF_VAL, checked.to_string());

        let plugin_version = match doc.plugin_version().map(str::to_string) {
            Some(v) => v,
            None => {
                debug!("Backfilling pluginVersion with {}", config.plugin_version);
                doc.set(PLUGIN_VERSION, config.plugin_version.clone());
                config.plugin_version.clone()
            }
        };

        let instance = match doc.instance_id().map(str::to_string) {
            Some(id) if instance_id::is_valid_format(&id) => id,
            existing => {
                if existing.is_some() {
                    warn!("Stored instance id has invalid format, regenerating");
                }
                let fresh = instance_id::generate();
                doc.set(INST_ID, fresh.clone());
                fresh
            }
        };

        writer::write_document_atomic(&doc, path)?;
        notify(old_pref, checked, &instance, &plugin_version, emitter);
    } else {
        info!("Preference file absent, creating from bundled template");
        create_from_template(path, &config.template_xml)?;
        first_save(path, checked, config, emitter)?;
    }

    Ok(())
}

/// First-save branch, run right after the template is copied into place.
///
/// Writes all three properties unconditionally, including a fresh instance
/// id regardless of what the template carries.
fn first_save(
    path: &Path,
    checked: bool,
    config: &SyncConfig,
    emitter: &dyn TelemetryEmitter,
) -> Result<()> {
    let mut doc = reader::read_document(path)?;

    let instance = instance_id::generate();
    doc.set(PLUGIN_VERSION, config.plugin_version.clone());
    doc.set(INST_ID, instance.clone());
    doc.set(PREF_VAL, checked.to_string());

    writer::write_document_atomic(&doc, path)?;
    notify(None, checked, &instance, &config.plugin_version, emitter);
    Ok(())
}

/// Copy the bundled template to the preference file path.
pub(crate) fn create_from_template(path: &Path, template_xml: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, template_xml)?;
    Ok(())
}

/// Fire the consent-transition event, if the transition warrants one.
/// Emission is fire-and-forget; it cannot fail the commit. The id and
/// version are the values just persisted, both guaranteed non-empty.
fn notify(
    old: Option<bool>,
    new: bool,
    instance: &str,
    plugin_version: &str,
    emitter: &dyn TelemetryEmitter,
) {
    if let Some(kind) = telemetry::transition_event(old, new) {
        let event = ConsentEvent::new(kind, instance.to_string(), plugin_version.to_string());
        debug!("Consent transition fires {}", kind.event_name());
        emitter.emit(event);
    }
}
