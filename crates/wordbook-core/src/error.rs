//! Error types for book conversion

use thiserror::Error;
use wordbook_ooxml::OoxmlError;

/// Errors that can occur while converting a document into a book
#[derive(Error, Debug)]
pub enum BookError {
    /// The source document could not be read
    #[error("Failed to read document: {0}")]
    Parse(#[from] OoxmlError),

    /// An embedded image is not in a supported format
    ///
    /// Recoverable: the image is skipped and the message becomes a warning.
    #[error("Unsupported image format for {reference}: {detail}")]
    UnsupportedAssetFormat {
        /// Source reference of the image (relationship id)
        reference: String,
        /// What was found instead
        detail: String,
    },

    /// A chapter could not be rendered
    #[error("Failed to render {chapter} (block {block}): {reason}")]
    Render {
        /// Chapter file name
        chapter: String,
        /// Index of the offending block within the chapter
        block: usize,
        /// Description of the problem
        reason: String,
    },

    /// Invalid configuration value or file
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// `book.json` could not be serialized
    #[error("Failed to write book metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Result type for book conversion
pub type Result<T> = std::result::Result<T, BookError>;
