//! Relationships parsing for OOXML documents
//!
//! OOXML uses relationship files (`_rels/*.rels`) to map IDs to targets.
//! The main document refers to its images through these IDs
//! (`r:embed` on DrawingML blips, `r:id` on VML image data).

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::archive::DOCUMENT_RELS_PART;
use crate::error::{OoxmlError, Result};

/// Parsed relationships from a .rels file
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    map: HashMap<String, RelationshipTarget>,
}

/// A relationship target with its type and mode
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipTarget {
    /// The target URL or path
    pub target: String,
    /// The relationship type URI
    pub rel_type: String,
    /// Target mode: "External" for URLs, None for package parts
    pub target_mode: Option<String>,
}

impl Relationships {
    /// Image relationship type
    pub const TYPE_IMAGE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    /// Parse relationships from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut map = HashMap::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;
                    let mut target_mode = None;

                    for attr in e.attributes().filter_map(|a| a.ok()) {
                        let value = attr.unescape_value().ok().map(|s| s.to_string());
                        match attr.key.as_ref() {
                            b"Id" => id = value,
                            b"Target" => target = value,
                            b"Type" => rel_type = value,
                            b"TargetMode" => target_mode = value,
                            _ => {}
                        }
                    }

                    if let (Some(id), Some(target)) = (id, target) {
                        map.insert(
                            id,
                            RelationshipTarget {
                                target,
                                rel_type: rel_type.unwrap_or_default(),
                                target_mode,
                            },
                        );
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::xml(DOCUMENT_RELS_PART, e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { map })
    }

    /// Get the full relationship target for an ID
    pub fn get_target(&self, id: &str) -> Option<&RelationshipTarget> {
        self.map.get(id)
    }

    /// Check if a relationship points outside the package
    pub fn is_external(&self, id: &str) -> bool {
        self.map
            .get(id)
            .and_then(|r| r.target_mode.as_deref())
            .map(|mode| mode.eq_ignore_ascii_case("External"))
            .unwrap_or(false)
    }

    /// Get the number of relationships
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="https://example.com/a.png" TargetMode="External"/>
  <Relationship Id="rId10" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_relationships() {
        let rels = Relationships::parse(RELS).unwrap();

        assert_eq!(rels.len(), 4);
        assert_eq!(rels.get_target("rId5").unwrap().target, "media/image1.png");
        assert_eq!(rels.get_target("rId5").unwrap().rel_type, Relationships::TYPE_IMAGE);
        assert!(rels.get_target("rId404").is_none());
    }

    #[test]
    fn test_external_targets() {
        let rels = Relationships::parse(RELS).unwrap();

        assert!(rels.is_external("rId9"));
        assert!(!rels.is_external("rId5"));
        let link = rels.get_target("rId10").unwrap();
        assert_eq!(link.target, "https://example.com/?a=1&b=2");
        assert!(link.rel_type.ends_with("/hyperlink"));
    }

    #[test]
    fn test_empty_relationships() {
        let rels = Relationships::parse(
            br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#,
        )
        .unwrap();
        assert!(rels.is_empty());
    }
}
