//! wordbook-ast - Document model definitions
//!
//! This crate provides the types shared by the document reader and the
//! book conversion pipeline:
//!
//! - [`source`]: the ordered element stream a reader produces
//! - [`block`] and [`inline`]: the normalized block model
//! - [`asset`]: extracted images

pub mod asset;
pub mod block;
pub mod inline;
pub mod source;

pub use asset::{Asset, ImageFormat};
pub use block::{Block, Heading, ImageRef, Paragraph, Table};
pub use inline::{Flags, Span};
pub use source::{
    SourceCell, SourceElement, SourceImage, SourceParagraph, SourceRun, SourceTable, TextRun,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
