//! Source elements produced by a document reader
//!
//! This is the only contract between a document parser (such as
//! `wordbook-ooxml`) and the conversion pipeline: an ordered list of
//! paragraphs and tables, with inline images carried inside paragraph runs.

use serde::{Deserialize, Serialize};

/// A top-level element of the source document body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceElement {
    /// A paragraph
    Paragraph(SourceParagraph),
    /// A table
    Table(SourceTable),
}

/// A paragraph with its style and runs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceParagraph {
    /// Display name of the paragraph style (e.g. "heading 1", "Normal")
    pub style_name: Option<String>,
    /// Outline level declared by the style (0-based, 0 = top level)
    pub outline_level: Option<u8>,
    /// Ordered runs
    pub runs: Vec<SourceRun>,
}

/// A run inside a paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceRun {
    /// Formatted text
    Text(TextRun),
    /// An embedded image
    Image(SourceImage),
}

/// A run of text with its formatting flags
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,
    /// Whether the text is bold
    pub bold: bool,
    /// Whether the text is italic
    pub italic: bool,
    /// Whether the text is underlined
    pub underline: bool,
}

/// An embedded image with its raw bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceImage {
    /// Reference inside the source document (relationship id)
    pub reference: String,
    /// Raw image bytes
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Declared format (content type or file extension), if any
    pub format_hint: Option<String>,
    /// Alternative text
    pub alt: Option<String>,
}

/// A table: rows of cells
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceTable {
    /// Ordered rows of ordered cells
    pub rows: Vec<Vec<SourceCell>>,
}

/// A table cell: a list of paragraphs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceCell {
    /// Paragraphs in this cell
    pub paragraphs: Vec<SourceParagraph>,
}

impl TextRun {
    /// Create an unformatted text run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a bold text run
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Default::default()
        }
    }
}

impl SourceParagraph {
    /// Create a paragraph with a style name and runs
    pub fn styled(style_name: impl Into<String>, runs: Vec<SourceRun>) -> Self {
        Self {
            style_name: Some(style_name.into()),
            outline_level: None,
            runs,
        }
    }

    /// Create an unstyled paragraph
    pub fn plain(runs: Vec<SourceRun>) -> Self {
        Self {
            style_name: None,
            outline_level: None,
            runs,
        }
    }

    /// Plain text of all text runs
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .filter_map(|run| match run {
                SourceRun::Text(t) => Some(t.text.as_str()),
                SourceRun::Image(_) => None,
            })
            .collect()
    }

    /// All images in this paragraph, in run order
    pub fn images(&self) -> impl Iterator<Item = &SourceImage> {
        self.runs.iter().filter_map(|run| match run {
            SourceRun::Image(img) => Some(img),
            SourceRun::Text(_) => None,
        })
    }
}

impl SourceCell {
    /// Cell text with paragraphs separated by `\n`
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<TextRun> for SourceRun {
    fn from(run: TextRun) -> Self {
        SourceRun::Text(run)
    }
}

impl From<SourceImage> for SourceRun {
    fn from(image: SourceImage) -> Self {
        SourceRun::Image(image)
    }
}
