//! Image references in OOXML documents
//!
//! Images reach a Word body in two shapes:
//!
//! ```xml
//! <!-- DrawingML -->
//! <w:drawing>
//!   <wp:inline|wp:anchor>
//!     <wp:extent cx="..." cy="..."/>
//!     <wp:docPr id="..." name="..." descr="..."/>
//!     <a:graphic> ... <a:blip r:embed="rIdNN"/> ... </a:graphic>
//!   </wp:inline|wp:anchor>
//! </w:drawing>
//!
//! <!-- Legacy VML -->
//! <w:pict>
//!   <v:shape> <v:imagedata r:id="rIdNN" o:title="..."/> </v:shape>
//! </w:pict>
//! ```
//!
//! Both resolve through the document relationships to a part under
//! `word/media/`.

/// An image referenced from a paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Relationship ID (e.g., "rId11")
    pub rel_id: String,
    /// Alt text / description
    pub alt: Option<String>,
}

/// File extension of a part path, lowercased
///
/// ```
/// use wordbook_ooxml::image::extension_of;
///
/// assert_eq!(extension_of("media/image1.PNG").as_deref(), Some("png"));
/// assert_eq!(extension_of("media/blob"), None);
/// ```
pub fn extension_of(target: &str) -> Option<String> {
    let file_name = target.rsplit('/').next().unwrap_or(target);
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("media/image1.jpeg").as_deref(), Some("jpeg"));
        assert_eq!(extension_of("../media/x.y.gif").as_deref(), Some("gif"));
        assert_eq!(extension_of("media/.hidden"), None);
        assert_eq!(extension_of("media/trailing."), None);
    }
}
