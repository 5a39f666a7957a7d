use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use super::document::PrefsDocument;

/// Write the preference document to disk atomically.
///
/// Uses a temporary file in the same directory as `target_path`, writes the
/// XML content, then atomically renames the temp file to the target. An
/// interrupted write never leaves a partial document behind.
pub fn write_document_atomic(doc: &PrefsDocument, target_path: &Path) -> Result<()> {
    let xml = doc.to_xml()?;

    let parent = target_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Target path has no parent directory: {:?}", target_path))?;

    // Ensure the parent directory exists
    std::fs::create_dir_all(parent)?;

    // Create temp file in the same directory (same filesystem for atomic rename)
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(xml.as_bytes())?;
    temp.flush()?;

    // Atomic rename
    temp.persist(target_path)?;

    info!("Wrote preference document to {:?}", target_path);
    Ok(())
}
