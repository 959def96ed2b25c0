//! Style definitions parsing (word/styles.xml)
//!
//! Paragraphs reference styles by ID (`w:pStyle`). Heading detection needs
//! the style's display name and its outline level, which may be inherited
//! through the `w:basedOn` chain.

use std::collections::{HashMap, HashSet};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::archive::STYLES_PART;
use crate::document::get_attr;
use crate::error::{OoxmlError, Result};

/// Collection of styles from a document
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// All styles, keyed by style ID
    styles: HashMap<String, Style>,
}

/// A Word style definition
#[derive(Debug, Clone)]
pub struct Style {
    /// Style ID (used in document references)
    pub id: String,
    /// Display name
    pub name: String,
    /// Style type
    pub style_type: StyleType,
    /// Base style ID (for inheritance)
    pub based_on: Option<String>,
    /// Outline level declared directly on this style (0-8, 0 = Heading 1)
    pub outline_level: Option<u8>,
}

/// Type of style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    /// Paragraph style
    Paragraph,
    /// Character (run) style
    Character,
    /// Table style
    Table,
    /// Numbering style
    Numbering,
}

impl StyleSheet {
    /// Parse styles from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut stylesheet = StyleSheet::default();
        let mut buf = Vec::new();
        let mut current: Option<StyleBuilder> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let name = e.local_name();
                    match (name.as_ref(), current.as_mut()) {
                        (b"style", _) => {
                            current = Some(StyleBuilder {
                                id: get_attr(e, b"styleId"),
                                style_type: get_attr(e, b"type").map(|t| match t.as_str() {
                                    "character" => StyleType::Character,
                                    "table" => StyleType::Table,
                                    "numbering" => StyleType::Numbering,
                                    _ => StyleType::Paragraph,
                                }),
                                ..Default::default()
                            });
                        }
                        (b"name", Some(builder)) => builder.name = get_attr(e, b"val"),
                        (b"basedOn", Some(builder)) => builder.based_on = get_attr(e, b"val"),
                        (b"outlineLvl", Some(builder)) => {
                            builder.outline_level =
                                get_attr(e, b"val").and_then(|v| v.parse().ok());
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) if e.local_name().as_ref() == b"style" => {
                    if let Some(builder) = current.take() {
                        if let Some(style) = builder.build() {
                            stylesheet.styles.insert(style.id.clone(), style);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::xml(STYLES_PART, e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(stylesheet)
    }

    /// Get a style by ID
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Number of styles defined
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if no styles are defined
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Display name for a style ID, falling back to the ID itself
    pub fn display_name<'a>(&'a self, style_id: &'a str) -> &'a str {
        self.get(style_id).map(|s| s.name.as_str()).unwrap_or(style_id)
    }

    /// Outline level of a style, inherited through `basedOn`
    ///
    /// Levels of 9 or more mean "body text" in Word and are reported as `None`.
    pub fn outline_level(&self, style_id: &str) -> Option<u8> {
        self.resolve_chain(style_id)
            .into_iter()
            .find_map(|s| s.outline_level)
            .filter(|level| *level < 9)
    }

    /// Resolve the full inheritance chain for a style
    pub fn resolve_chain(&self, style_id: &str) -> Vec<&Style> {
        let mut chain = Vec::new();
        let mut current = style_id;
        let mut seen = HashSet::new();

        while let Some(style) = self.get(current) {
            if !seen.insert(style.id.as_str()) {
                break;
            }
            chain.push(style);
            match style.based_on {
                Some(ref base) => current = base,
                None => break,
            }
        }

        chain
    }
}

#[derive(Default)]
struct StyleBuilder {
    id: Option<String>,
    name: Option<String>,
    style_type: Option<StyleType>,
    based_on: Option<String>,
    outline_level: Option<u8>,
}

impl StyleBuilder {
    fn build(self) -> Option<Style> {
        let id = self.id?;
        Some(Style {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            style_type: self.style_type.unwrap_or(StyleType::Paragraph),
            based_on: self.based_on,
            outline_level: self.outline_level,
        })
    }
}
