use anyhow::{bail, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

/// Property key for the telemetry opt-in flag ("true"/"false" as text).
pub const PREF_VAL: &str = "prefVal";
/// Property key for the plugin version recorded at save time.
pub const PLUGIN_VERSION: &str = "pluginVersion";
/// Property key for the pseudonymous installation identifier.
pub const INST_ID: &str = "instID";

/// The Forge Studio preference document (`data.xml`).
///
/// Wraps a flat, ordered list of named string properties so unknown keys
/// written by other panels survive a read-modify-write cycle untouched.
/// Typed accessors are provided for the properties ForgeMate manipulates.
pub struct PrefsDocument {
    props: Vec<(String, String)>,
}

impl PrefsDocument {
    /// Parse a preference document from an XML string.
    ///
    /// Expected shape is a `<data>` root containing empty `<property>`
    /// elements with `name` and `value` attributes. Anything else in the
    /// document (text, comments, unknown elements) is ignored on read.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut props = Vec::new();
        let mut saw_root = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) => {
                    match e.name().as_ref() {
                        b"data" => saw_root = true,
                        b"property" => {
                            let mut name = None;
                            let mut value = None;
                            for attr in e.attributes() {
                                let attr = attr?;
                                match attr.key.as_ref() {
                                    b"name" => name = Some(attr.unescape_value()?.into_owned()),
                                    b"value" => value = Some(attr.unescape_value()?.into_owned()),
                                    _ => {}
                                }
                            }
                            if let (Some(name), Some(value)) = (name, value) {
                                props.push((name, value));
                            }
                        }
                        _ => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            bail!("preference document has no <data> root element");
        }

        Ok(Self { props })
    }

    /// Serialize back to XML with 4-space indentation and a trailing newline.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("data")))?;
        for (name, value) in &self.props {
            let mut el = BytesStart::new("property");
            el.push_attribute(("name", name.as_str()));
            el.push_attribute(("value", value.as_str()));
            writer.write_event(Event::Empty(el))?;
        }
        writer.write_event(Event::End(BytesEnd::new("data")))?;

        let mut s = String::from_utf8(writer.into_inner())?;
        if !s.ends_with('\n') {
            s.push('\n');
        }
        Ok(s)
    }

    // --- Generic access ---

    /// Get a property value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Set a property, replacing an existing entry or appending a new one.
    pub fn set(&mut self, key: &str, value: String) {
        if let Some(entry) = self.props.iter_mut().find(|(name, _)| name == key) {
            entry.1 = value;
        } else {
            self.props.push((key.to_string(), value));
        }
    }

    // --- Typed accessors ---

    /// The raw telemetry opt-in text, if present and non-empty.
    pub fn pref_val(&self) -> Option<&str> {
        self.get(PREF_VAL).filter(|v| !v.is_empty())
    }

    /// The recorded plugin version, if present and non-empty.
    pub fn plugin_version(&self) -> Option<&str> {
        self.get(PLUGIN_VERSION).filter(|v| !v.is_empty())
    }

    /// The installation identifier, if present and non-empty.
    pub fn instance_id(&self) -> Option<&str> {
        self.get(INST_ID).filter(|v| !v.is_empty())
    }

    /// Number of properties in the document.
    pub fn property_count(&self) -> usize {
        self.props.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<data>
    <property name="prefVal" value="true"/>
    <property name="pluginVersion" value="0.1.0"/>
    <property name="instID" value=""/>
</data>
"#;

    #[test]
    fn parses_flat_properties() {
        let doc = PrefsDocument::from_xml(SAMPLE).unwrap();
        assert_eq!(doc.property_count(), 3);
        assert_eq!(doc.get(PREF_VAL), Some("true"));
        assert_eq!(doc.get(PLUGIN_VERSION), Some("0.1.0"));
        assert_eq!(doc.get(INST_ID), Some(""));
    }

    #[test]
    fn empty_values_read_as_none_through_typed_accessors() {
        let doc = PrefsDocument::from_xml(SAMPLE).unwrap();
        assert_eq!(doc.instance_id(), None);
        assert_eq!(doc.plugin_version(), Some("0.1.0"));
    }

    #[test]
    fn set_replaces_in_place_and_appends_new_keys() {
        let mut doc = PrefsDocument::from_xml(SAMPLE).unwrap();
        doc.set(PREF_VAL, "false".to_string());
        assert_eq!(doc.get(PREF_VAL), Some("false"));
        assert_eq!(doc.property_count(), 3);

        doc.set("theme", "dark".to_string());
        assert_eq!(doc.get("theme"), Some("dark"));
        assert_eq!(doc.property_count(), 4);
    }

    #[test]
    fn round_trip_preserves_keys_and_order() {
        let doc = PrefsDocument::from_xml(SAMPLE).unwrap();
        let xml = doc.to_xml().unwrap();
        let reparsed = PrefsDocument::from_xml(&xml).unwrap();
        assert_eq!(reparsed.property_count(), doc.property_count());
        assert_eq!(reparsed.get(PREF_VAL), Some("true"));
        // prefVal stays the first property after a round trip
        assert!(xml.find("prefVal").unwrap() < xml.find("pluginVersion").unwrap());
    }

    #[test]
    fn attribute_values_are_escaped_on_write() {
        let mut doc = PrefsDocument::from_xml(SAMPLE).unwrap();
        doc.set("note", "a \"quoted\" <value>".to_string());
        let xml = doc.to_xml().unwrap();
        let reparsed = PrefsDocument::from_xml(&xml).unwrap();
        assert_eq!(reparsed.get("note"), Some("a \"quoted\" <value>"));
    }

    #[test]
    fn rejects_document_without_data_root() {
        assert!(PrefsDocument::from_xml("<other/>").is_err());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(PrefsDocument::from_xml("<data><property name=").is_err());
    }
}
