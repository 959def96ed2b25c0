//! # wordbook-ooxml
//!
//! Reads DOCX (Office Open XML) packages for wordbook.
//!
//! This crate provides functionality to:
//! - Unpack a DOCX archive and look up its parts
//! - Parse paragraphs, runs, tables and images from `word/document.xml`
//! - Resolve style display names and image relationships
//! - Produce the ordered [`wordbook_ast::SourceElement`] stream
//!
//! ## Example: Loading a Document
//!
//! ```no_run
//! use wordbook_ooxml::load_file;
//!
//! let loaded = load_file("document.docx")?;
//! for element in &loaded.elements {
//!     println!("{:?}", element);
//! }
//! for warning in &loaded.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! # Ok::<(), wordbook_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod document;
pub mod error;
pub mod image;
pub mod load;
pub mod properties;
pub mod relationships;
pub mod styles;

#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;

pub use archive::OoxmlArchive;
pub use document::{
    BodyElement, Document, Paragraph, ParagraphChild, Run, Table, TableCell, TableRow,
};
pub use error::{OoxmlError, Result};
pub use image::Image;
pub use load::{load_bytes, load_file, LoadedDocument, SourceLoader};
pub use properties::CoreProperties;
pub use relationships::Relationships;
pub use styles::{Style, StyleSheet, StyleType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
