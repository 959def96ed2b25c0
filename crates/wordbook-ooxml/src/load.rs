//! Loading a DOCX package into source elements
//!
//! Ties the archive, style sheet, relationships and body parser together
//! and produces the `wordbook_ast::source` stream consumed by the book
//! pipeline: style IDs become display names, image relationship IDs become
//! bytes.

use std::path::Path;

use tracing::{debug, warn};
use wordbook_ast::{
    SourceCell, SourceElement, SourceImage, SourceParagraph, SourceRun, SourceTable, TextRun,
};

use crate::archive::OoxmlArchive;
use crate::document::{BodyElement, Document, Paragraph, ParagraphChild, Table};
use crate::error::Result;
use crate::image::{extension_of, Image};
use crate::properties::CoreProperties;
use crate::relationships::Relationships;
use crate::styles::StyleSheet;

/// A DOCX package read into source elements
#[derive(Debug, Clone, Default)]
pub struct LoadedDocument {
    /// Body elements in document order
    pub elements: Vec<SourceElement>,
    /// Core properties (title, subject, creator)
    pub properties: CoreProperties,
    /// Recoverable problems found while loading
    pub warnings: Vec<String>,
}

/// Reads source elements from an unpacked DOCX archive
pub struct SourceLoader<'a> {
    archive: &'a OoxmlArchive,
    styles: StyleSheet,
    relationships: Relationships,
    warnings: Vec<String>,
}

impl<'a> SourceLoader<'a> {
    /// Prepare a loader, parsing the style sheet and document relationships
    pub fn new(archive: &'a OoxmlArchive) -> Result<Self> {
        let styles = match archive.styles_xml() {
            Some(xml) => StyleSheet::parse(xml)?,
            None => StyleSheet::default(),
        };
        let relationships = match archive.document_rels_xml() {
            Some(xml) => Relationships::parse(xml)?,
            None => Relationships::default(),
        };
        debug!(
            "Loaded {} styles and {} relationships",
            styles.len(),
            relationships.len()
        );

        Ok(Self {
            archive,
            styles,
            relationships,
            warnings: Vec::new(),
        })
    }

    /// Parse the main document part and resolve it into source elements
    pub fn load(mut self) -> Result<LoadedDocument> {
        let document = Document::parse(self.archive.document_xml()?)?;

        let elements = document
            .blocks
            .iter()
            .map(|block| match block {
                BodyElement::Paragraph(p) => SourceElement::Paragraph(self.paragraph(p)),
                BodyElement::Table(t) => SourceElement::Table(self.table(t)),
            })
            .collect();

        let properties = self
            .archive
            .core_properties_xml()
            .map(CoreProperties::parse)
            .unwrap_or_default();

        Ok(LoadedDocument {
            elements,
            properties,
            warnings: self.warnings,
        })
    }

    fn paragraph(&mut self, para: &Paragraph) -> SourceParagraph {
        let style_id = para.style_id.as_deref();
        let mut runs = Vec::with_capacity(para.children.len());

        for child in &para.children {
            match child {
                ParagraphChild::Run(run) => runs.push(SourceRun::Text(TextRun {
                    text: run.text.clone(),
                    bold: run.bold,
                    italic: run.italic,
                    underline: run.underline,
                })),
                ParagraphChild::Image(image) => {
                    if let Some(image) = self.image(image) {
                        runs.push(SourceRun::Image(image));
                    }
                }
            }
        }

        SourceParagraph {
            style_name: style_id.map(|id| self.styles.display_name(id).to_string()),
            outline_level: style_id.and_then(|id| self.styles.outline_level(id)),
            runs,
        }
    }

    fn table(&mut self, table: &Table) -> SourceTable {
        SourceTable {
            rows: table
                .rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(|cell| SourceCell {
                            paragraphs: cell.paragraphs.iter().map(|p| self.paragraph(p)).collect(),
                        })
                        .collect()
                })
                .collect(),
        }
    }

    /// Resolve an image reference to its bytes, recording a warning on failure
    fn image(&mut self, image: &Image) -> Option<SourceImage> {
        let Some(rel) = self.relationships.get_target(&image.rel_id) else {
            self.warn(format!(
                "Image relationship {} is not defined; image skipped",
                image.rel_id
            ));
            return None;
        };

        let target = rel.target.clone();

        if self.relationships.is_external(&image.rel_id) {
            self.warn(format!(
                "Linked image {} is not embedded in the document; image skipped",
                target
            ));
            return None;
        }

        let Some(bytes) = self.archive.document_part(&target) else {
            self.warn(format!("Image part {} is missing; image skipped", target));
            return None;
        };

        Some(SourceImage {
            reference: image.rel_id.clone(),
            bytes: bytes.to_vec(),
            format_hint: extension_of(&target),
            alt: image.alt.clone(),
        })
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Load a DOCX file from disk
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<LoadedDocument> {
    let archive = OoxmlArchive::open(path)?;
    SourceLoader::new(&archive)?.load()
}

/// Load a DOCX held in memory
pub fn load_bytes(bytes: &[u8]) -> Result<LoadedDocument> {
    let archive = OoxmlArchive::from_bytes(bytes)?;
    SourceLoader::new(&archive)?.load()
}
