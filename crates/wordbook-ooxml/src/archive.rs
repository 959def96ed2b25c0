//! Archive handling for DOCX files
//!
//! DOCX files are ZIP archives containing XML parts and media resources.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::read::ZipArchive;

use crate::error::{OoxmlError, Result};

/// Main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Style definitions part
pub const STYLES_PART: &str = "word/styles.xml";
/// Relationships of the main document part
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
/// Core document properties (title, creator, ...)
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// Represents an unpacked DOCX package
#[derive(Debug)]
pub struct OoxmlArchive {
    /// All files in the archive, keyed by path
    files: HashMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    /// Open and unpack a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Unpack a DOCX held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        Ok(Self { files })
    }

    /// Get a file's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get the main document content (word/document.xml)
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_PART)
            .ok_or_else(|| OoxmlError::MissingFile(DOCUMENT_PART.to_string()))
    }

    /// Get the styles definition (word/styles.xml), if present
    pub fn styles_xml(&self) -> Option<&[u8]> {
        self.get(STYLES_PART)
    }

    /// Get the document relationships (word/_rels/document.xml.rels)
    pub fn document_rels_xml(&self) -> Option<&[u8]> {
        self.get(DOCUMENT_RELS_PART)
    }

    /// Get the core properties (docProps/core.xml)
    pub fn core_properties_xml(&self) -> Option<&[u8]> {
        self.get(CORE_PROPERTIES_PART)
    }

    /// Resolve a relationship target of the main document to its bytes
    ///
    /// Targets are relative to `word/` (e.g. `media/image1.png`), or
    /// absolute within the package (e.g. `/word/media/image1.png`).
    pub fn document_part(&self, target: &str) -> Option<&[u8]> {
        self.get(&resolve_part_path("word", target))
    }
}

/// Resolve a relationship target against the directory of its source part
pub fn resolve_part_path(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::DocxBuilder;

    #[test]
    fn test_open_from_bytes() {
        let bytes = DocxBuilder::new()
            .body(r#"<w:p><w:r><w:t>Hi</w:t></w:r></w:p>"#)
            .build();
        let archive = OoxmlArchive::from_bytes(&bytes).unwrap();

        assert!(archive.document_xml().is_ok());
        assert!(archive.get("[Content_Types].xml").is_some());
        assert!(archive.styles_xml().is_none());
    }

    #[test]
    fn test_missing_document_xml() {
        let archive = OoxmlArchive {
            files: HashMap::new(),
        };
        match archive.document_xml() {
            Err(OoxmlError::MissingFile(path)) => assert_eq!(path, DOCUMENT_PART),
            other => panic!("expected MissingFile, got {:?}", other),
        }
        assert!(archive.styles_xml().is_none());
    }

    #[test]
    fn test_not_a_zip() {
        let result = OoxmlArchive::from_bytes(b"this is not a zip file");
        assert!(matches!(result, Err(OoxmlError::Archive(_))));
    }

    #[test]
    fn test_resolve_part_path() {
        assert_eq!(resolve_part_path("word", "media/image1.png"), "word/media/image1.png");
        assert_eq!(resolve_part_path("word", "./media/a.gif"), "word/media/a.gif");
        assert_eq!(resolve_part_path("word", "../media/a.gif"), "media/a.gif");
        assert_eq!(resolve_part_path("word", "/word/media/b.png"), "word/media/b.png");
    }

    #[test]
    fn test_document_part_lookup() {
        let mut files = HashMap::new();
        files.insert("word/media/image1.png".to_string(), vec![1, 2, 3]);
        let archive = OoxmlArchive { files };

        assert_eq!(archive.document_part("media/image1.png"), Some(&[1u8, 2, 3][..]));
        assert_eq!(archive.document_part("media/missing.png"), None);
    }
}
