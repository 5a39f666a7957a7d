use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::debug;

const APP_DIR: &str = "ForgeMate";
const DATA_FILE: &str = "data.xml";

/// Resolve the fixed per-user path of the preference document.
///
/// Maps to `~/Library/Application Support/ForgeMate/data.xml` on macOS,
/// `%APPDATA%\ForgeMate\data.xml` on Windows and `~/.local/share/ForgeMate/
/// data.xml` on Linux. The file itself may not exist yet; callers copy the
/// bundled template on first save.
pub fn preference_file() -> Result<PathBuf> {
    if let Some(data_dir) = dirs::data_dir() {
        let path = data_dir.join(APP_DIR).join(DATA_FILE);
        debug!("Resolved preference file path {:?} (via dirs::data_dir)", path);
        return Ok(path);
    }

    // Fallback: hidden directory under the home dir
    if let Some(home) = dirs::home_dir() {
        let path = home.join(".forgemate").join(DATA_FILE);
        debug!(
            "Resolved preference file path {:?} (via home_dir fallback)",
            path
        );
        return Ok(path);
    }

    bail!("Could not determine a per-user data directory")
}
