use anyhow::Result;
use std::path::Path;
use tracing::debug;

use super::document::PrefsDocument;

/// Read the preference document from an XML file on disk.
pub fn read_document(path: &Path) -> Result<PrefsDocument> {
    let content = std::fs::read_to_string(path)?;
    let doc = PrefsDocument::from_xml(&content)?;

    debug!(
        "Read preference document with {} properties from {:?}",
        doc.property_count(),
        path
    );

    Ok(doc)
}
