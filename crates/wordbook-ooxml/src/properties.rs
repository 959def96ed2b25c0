//! Core document properties (docProps/core.xml)

use quick_xml::events::Event;
use quick_xml::Reader;

/// Metadata from the package's core properties part
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreProperties {
    /// `dc:title`
    pub title: Option<String>,
    /// `dc:subject`
    pub subject: Option<String>,
    /// `dc:creator`
    pub creator: Option<String>,
}

impl CoreProperties {
    /// Parse core properties
    ///
    /// Metadata is optional, so a malformed part yields whatever was read
    /// before the error instead of failing.
    pub fn parse(xml: &[u8]) -> Self {
        let mut properties = CoreProperties::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current: Option<Vec<u8>> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => current = Some(e.local_name().as_ref().to_vec()),
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map(|t| t.trim().to_string()).unwrap_or_default();
                    if text.is_empty() {
                        buf.clear();
                        continue;
                    }
                    match current.as_deref() {
                        Some(b"title") => properties.title = Some(text),
                        Some(b"subject") => properties.subject = Some(text),
                        Some(b"creator") => properties.creator = Some(text),
                        _ => {}
                    }
                }
                Ok(Event::End(_)) => current = None,
                Ok(Event::Eof) => break,
                Err(e) => {
                    tracing::debug!("Stopped reading core properties: {}", e);
                    break;
                }
                _ => {}
            }
            buf.clear();
        }

        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_core_properties() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
    xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:title>Operations &amp; Maintenance</dc:title>
  <dc:subject>Runbook</dc:subject>
  <dc:creator>Ops Team</dc:creator>
  <cp:revision>4</cp:revision>
</cp:coreProperties>"#;

        let props = CoreProperties::parse(xml);
        assert_eq!(props.title.as_deref(), Some("Operations & Maintenance"));
        assert_eq!(props.subject.as_deref(), Some("Runbook"));
        assert_eq!(props.creator.as_deref(), Some("Ops Team"));
    }

    #[test]
    fn test_blank_title_ignored() {
        let xml = br#"<cp:coreProperties xmlns:cp="x" xmlns:dc="y"><dc:title>   </dc:title></cp:coreProperties>"#;
        assert_eq!(CoreProperties::parse(xml).title, None);
    }

    #[test]
    fn test_malformed_is_lenient() {
        let xml = br#"<cp:coreProperties xmlns:cp="x" xmlns:dc="y"><dc:title>Kept</dc:title><dc:subject></cp:coreProperties>"#;
        let props = CoreProperties::parse(xml);
        assert_eq!(props.title.as_deref(), Some("Kept"));
        assert_eq!(props.subject, None);
    }
}
