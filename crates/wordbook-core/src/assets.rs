//! Asset extraction
//!
//! Assigns each supported embedded image a sequential id in document order
//! and records its format. Unsupported images are skipped with a warning and
//! consume no id. The same source reference always maps to the same asset.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};
use wordbook_ast::{Asset, ImageFormat, SourceImage};

use crate::error::{BookError, Result};

/// Extracted assets, in id order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssetCatalog {
    /// Assets ordered by id (ids start at 1 and have no gaps)
    pub assets: Vec<Asset>,
    /// Id the next extracted asset would receive
    pub next_id: u32,
}

impl AssetCatalog {
    /// Look up an asset by id
    pub fn get(&self, id: u32) -> Option<&Asset> {
        id.checked_sub(1)
            .and_then(|index| self.assets.get(index as usize))
            .filter(|asset| asset.id == id)
    }

    /// Number of assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if no assets were extracted
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Collects assets during the forward pass over the document
#[derive(Debug)]
pub struct AssetExtractor {
    assets: Vec<Asset>,
    by_reference: HashMap<String, u32>,
    rejected: HashSet<String>,
    next_id: u32,
    warnings: Vec<String>,
}

impl Default for AssetExtractor {
    fn default() -> Self {
        Self {
            assets: Vec::new(),
            by_reference: HashMap::new(),
            rejected: HashSet::new(),
            next_id: 1,
            warnings: Vec::new(),
        }
    }
}

impl AssetExtractor {
    /// Create an extractor whose first asset gets id 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image and return its asset id, or `None` if it was skipped
    pub fn extract(&mut self, image: &SourceImage) -> Option<u32> {
        if let Some(&id) = self.by_reference.get(&image.reference) {
            return Some(id);
        }
        if self.rejected.contains(&image.reference) {
            return None;
        }

        match detect_format(&image.reference, image.format_hint.as_deref(), &image.bytes) {
            Ok((format, extension)) => {
                let id = self.next_id;
                self.next_id += 1;
                let asset = Asset {
                    id,
                    format,
                    extension,
                    bytes: image.bytes.clone(),
                };
                debug!("Extracted {} from {}", asset.file_name(), image.reference);
                self.assets.push(asset);
                self.by_reference.insert(image.reference.clone(), id);
                Some(id)
            }
            Err(err) => {
                warn!("{}", err);
                self.warnings.push(err.to_string());
                self.rejected.insert(image.reference.clone());
                None
            }
        }
    }

    /// Warnings recorded so far
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Finish extraction, returning the catalog and the recorded warnings
    pub fn finish(self) -> (AssetCatalog, Vec<String>) {
        (
            AssetCatalog {
                assets: self.assets,
                next_id: self.next_id,
            },
            self.warnings,
        )
    }
}

/// Decide the format and file extension of an image
///
/// A declared format decides on its own, so an unsupported hint is rejected
/// even when the bytes look like a supported image. The bytes are sniffed
/// only when no format was declared.
pub fn detect_format(
    reference: &str,
    hint: Option<&str>,
    bytes: &[u8],
) -> Result<(ImageFormat, String)> {
    let detail = match hint.map(str::trim).filter(|h| !h.is_empty()) {
        Some(hint) => match format_from_hint(hint) {
            Some((format, extension)) => return Ok((format, extension.to_string())),
            None => format!("declared as {:?}", hint),
        },
        None => match sniff_format(bytes) {
            Some(format) => return Ok((format, format.extension().to_string())),
            None if bytes.is_empty() => "image data is empty".to_string(),
            None => "unrecognized image data".to_string(),
        },
    };
    Err(BookError::UnsupportedAssetFormat {
        reference: reference.to_string(),
        detail: format!("{} (supported: png, jpg, jpeg, gif, bmp)", detail),
    })
}

/// Map a content type or file extension to a supported format
///
/// The extension spelling of the hint is kept (`jpeg` stays `jpeg`).
fn format_from_hint(hint: &str) -> Option<(ImageFormat, &'static str)> {
    let hint = hint.trim().to_ascii_lowercase();
    let hint = hint.trim_start_matches('.');
    let hint = hint.strip_prefix("image/").unwrap_or(hint);

    match hint {
        "png" => Some((ImageFormat::Png, "png")),
        "jpg" => Some((ImageFormat::Jpeg, "jpg")),
        "jpeg" | "pjpeg" => Some((ImageFormat::Jpeg, "jpeg")),
        "gif" => Some((ImageFormat::Gif, "gif")),
        "bmp" | "x-bmp" | "x-ms-bmp" => Some((ImageFormat::Bmp, "bmp")),
        _ => None,
    }
}

/// Detect a supported image format from magic bytes
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(ImageFormat::Png)
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageFormat::Jpeg)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(ImageFormat::Gif)
    } else if bytes.starts_with(b"BM") && bytes.len() >= 14 {
        Some(ImageFormat::Bmp)
    } else {
        None
    }
}
