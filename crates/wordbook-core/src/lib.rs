//! wordbook-core - Word documents as Markdown books
//!
//! Turns the source elements read from a DOCX into a GitBook-style book:
//! chapter files split at level-1 headings, a nested `SUMMARY.md`, a
//! `README.md`, `book.json` and the extracted images.
//!
//! The pipeline runs in one direction:
//!
//! 1. [`blocks`] builds the block model and extracts [`assets`] in one pass
//! 2. [`chapters`] splits the blocks at level-1 headings
//! 3. [`toc`] builds the heading tree and anchors
//! 4. [`render`] writes Markdown, using [`inline`] for emphasis
//!
//! [`book::convert`] ties the steps together.
//!
//! # Example
//!
//! ```
//! use wordbook_ast::{SourceElement, SourceParagraph, TextRun};
//! use wordbook_core::{convert, BookConfig};
//! use wordbook_ooxml::LoadedDocument;
//!
//! let document = LoadedDocument {
//!     elements: vec![
//!         SourceElement::Paragraph(SourceParagraph::styled(
//!             "heading 1",
//!             vec![TextRun::plain("Intro").into()],
//!         )),
//!         SourceElement::Paragraph(SourceParagraph::plain(vec![
//!             TextRun::plain("Hello ").into(),
//!             TextRun::bold("world").into(),
//!         ])),
//!     ],
//!     ..Default::default()
//! };
//!
//! let book = convert(document, &BookConfig::default()).unwrap();
//! let chapter = book.file("chapter1.md").and_then(|f| f.as_str()).unwrap();
//! assert_eq!(chapter, "# Intro\n\nHello **world**\n");
//! ```

pub mod assets;
pub mod blocks;
pub mod book;
pub mod chapters;
pub mod classify;
pub mod config;
pub mod error;
pub mod inline;
pub mod render;
pub mod toc;

pub use assets::{AssetCatalog, AssetExtractor};
pub use blocks::{build_blocks, BlockModel, BlockModelBuilder};
pub use book::{convert, convert_bytes, convert_file, Book, ConversionReport, OutputFile};
pub use chapters::{split_chapters, Chapter};
pub use classify::{
    ChainClassifier, HeadingClassifier, OutlineLevelClassifier, StyleNameClassifier,
};
pub use config::BookConfig;
pub use error::{BookError, Result};
pub use render::{render_summary, MarkdownRenderer};
pub use toc::{build_toc, Toc, TocNode};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
