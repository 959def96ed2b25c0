//! Extracted media assets

use serde::{Deserialize, Serialize};

/// Image formats that can be written into a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG (`.jpg` or `.jpeg`)
    Jpeg,
    /// Graphics Interchange Format
    Gif,
    /// Windows bitmap
    Bmp,
}

impl ImageFormat {
    /// Canonical file extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
        }
    }

    /// MIME content type for this format
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
        }
    }
}

/// An extracted image with a stable sequential file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Sequential id in document order, starting at 1
    pub id: u32,
    /// Detected format
    pub format: ImageFormat,
    /// File extension without the dot (`jpg` and `jpeg` are both kept)
    pub extension: String,
    /// Raw image bytes
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Asset {
    /// File name inside the assets directory, e.g. `image_001.png`
    pub fn file_name(&self) -> String {
        format!("image_{:03}.{}", self.id, self.extension)
    }

    /// Path relative to the book root, e.g. `assets/image_001.png`
    pub fn relative_path(&self, assets_dir: &str) -> String {
        format!("{}/{}", assets_dir.trim_end_matches('/'), self.file_name())
    }
}
