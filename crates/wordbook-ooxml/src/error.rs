//! Error types for OOXML operations

use thiserror::Error;

/// Errors that can occur while reading a DOCX package
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error in {part}: {source}")]
    Xml {
        /// Package part being parsed
        part: String,
        /// Underlying parser error
        #[source]
        source: quick_xml::Error,
    },

    /// Required file not found in archive
    #[error("Required file not found: {0}")]
    MissingFile(String),
}

impl OoxmlError {
    /// Wrap an XML parser error with the name of the part being read
    pub fn xml(part: impl Into<String>, source: quick_xml::Error) -> Self {
        OoxmlError::Xml {
            part: part.into(),
            source,
        }
    }
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
