//! Block-level elements for document structure
//!
//! A normalized document is an ordered `Vec<Block>`. Order is significant
//! and preserved through every stage of the conversion.

use serde::{Deserialize, Serialize};

use crate::inline::{plain_text, Span};

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A section heading
    Heading(Heading),
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A table (text content only)
    Table(Table),
    /// A reference to an extracted image asset
    Image(ImageRef),
}

/// A section heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-6, where 1 is the highest)
    pub level: u8,
    /// Plain heading text on a single line
    pub text: String,
    /// Formatted content
    pub spans: Vec<Span>,
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content within the paragraph
    pub spans: Vec<Span>,
}

/// A table
///
/// Each cell holds its text content. Paragraph boundaries inside a cell
/// are kept as `\n`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table rows, each an ordered list of cell texts
    pub rows: Vec<Vec<String>>,
}

/// Reference from the block stream to an extracted asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Sequential asset id (starts at 1)
    pub asset_id: u32,
    /// Alternative text from the source document
    pub alt: Option<String>,
}

impl Block {
    /// Heading level if this block is a heading
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading(h) => Some(h.level),
            _ => None,
        }
    }

    /// Whether this block opens a new chapter
    pub fn is_chapter_start(&self) -> bool {
        self.heading_level() == Some(1)
    }
}

impl Heading {
    /// Create a heading from formatted spans, deriving its plain text
    ///
    /// Line breaks and runs of whitespace collapse to single spaces.
    pub fn new(level: u8, spans: Vec<Span>) -> Self {
        let text = plain_text(&spans)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        Self { level, text, spans }
    }
}

impl Paragraph {
    /// Create a paragraph from spans
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Plain text of this paragraph
    pub fn plain_text(&self) -> String {
        plain_text(&self.spans)
    }
}

impl Table {
    /// Number of columns (width of the widest row)
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Check if the table has no cells at all
    pub fn is_empty(&self) -> bool {
        self.column_count() == 0
    }
}
