//! Shared test utilities for wordbook crates
//!
//! Builds small in-memory DOCX packages for unit and integration tests.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

use crate::relationships::Relationships;

const DOCUMENT_NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:v="urn:schemas-microsoft-com:vml" "#,
    r#"xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006""#,
);

/// Minimal PNG signature followed by filler bytes
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n-png-body";
/// Minimal JPEG signature followed by filler bytes
pub const JPEG_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0-jpeg-body";
/// Minimal WebP signature
pub const WEBP_BYTES: &[u8] = b"RIFF\x00\x00\x00\x00WEBPVP8 ";

/// Builder for an in-memory DOCX package
///
/// # Example
/// ```ignore
/// use wordbook_ooxml::test_utils::{heading, paragraph, DocxBuilder};
///
/// let docx = DocxBuilder::new()
///     .with_heading_styles()
///     .body(&heading(1, "Intro"))
///     .body(&paragraph("Hello"))
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct DocxBuilder {
    body: String,
    styles: Option<String>,
    relationships: Vec<(String, String, String)>,
    media: Vec<(String, Vec<u8>)>,
    title: Option<String>,
}

impl DocxBuilder {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw WordprocessingML to the document body
    pub fn body(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// Use custom `<w:style>` definitions for styles.xml
    pub fn styles(mut self, style_elements: &str) -> Self {
        self.styles = Some(style_elements.to_string());
        self
    }

    /// Add the built-in Normal and "heading 1".."heading 6" styles
    pub fn with_heading_styles(self) -> Self {
        let mut styles = String::from(
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>"#,
        );
        for level in 1..=6 {
            styles.push_str(&format!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="{outline}"/></w:pPr></w:style>"#,
                level = level,
                outline = level - 1
            ));
        }
        self.styles(&styles)
    }

    /// Add an image part and its relationship
    pub fn image(mut self, rel_id: &str, target: &str, bytes: &[u8]) -> Self {
        self.relationships.push((
            rel_id.to_string(),
            Relationships::TYPE_IMAGE.to_string(),
            target.to_string(),
        ));
        self.media.push((format!("word/{}", target), bytes.to_vec()));
        self
    }

    /// Add a relationship without a backing part (`http` targets are external)
    pub fn relationship(mut self, rel_id: &str, rel_type: &str, target: &str) -> Self {
        self.relationships
            .push((rel_id.to_string(), rel_type.to_string(), target.to_string()));
        self
    }

    /// Set the dc:title core property
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Build the DOCX bytes
    pub fn build(self) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#,
        )
        .unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#,
        )
        .unwrap();

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, rel_type, target) in &self.relationships {
            let mode = if target.starts_with("http") {
                r#" TargetMode="External""#
            } else {
                ""
            };
            rels.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                id, rel_type, target, mode
            ));
        }
        rels.push_str("</Relationships>");
        zip.start_file("word/_rels/document.xml.rels", options)
            .unwrap();
        zip.write_all(rels.as_bytes()).unwrap();

        if let Some(styles) = &self.styles {
            zip.start_file("word/styles.xml", options).unwrap();
            zip.write_all(
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{}</w:styles>"#,
                    styles
                )
                .as_bytes(),
            )
            .unwrap();
        }

        if let Some(title) = &self.title {
            zip.start_file("docProps/core.xml", options).unwrap();
            zip.write_all(
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?><cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title></cp:coreProperties>"#,
                    title
                )
                .as_bytes(),
            )
            .unwrap();
        }

        for (path, bytes) in &self.media {
            zip.start_file(path.as_str(), options).unwrap();
            zip.write_all(bytes).unwrap();
        }

        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><w:document {}><w:body>{}</w:body></w:document>"#,
                DOCUMENT_NAMESPACES, self.body
            )
            .as_bytes(),
        )
        .unwrap();

        zip.finish().unwrap();
        buffer.into_inner()
    }
}

/// A paragraph using the `Heading{level}` style
pub fn heading(level: u8, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading{}"/></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
        level, text
    )
}

/// An unstyled single-run paragraph
pub fn paragraph(text: &str) -> String {
    format!(
        r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        text
    )
}

/// A paragraph holding one inline DrawingML picture
pub fn image_paragraph(rel_id: &str, alt: &str) -> String {
    format!(
        r#"<w:p><w:r><w:drawing><wp:inline><wp:extent cx="952500" cy="952500"/><wp:docPr id="1" name="Picture 1" descr="{}"/><a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="{}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
        alt, rel_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::OoxmlArchive;

    #[test]
    fn test_builder_produces_valid_zip() {
        let docx = DocxBuilder::new()
            .with_heading_styles()
            .image("rId5", "media/image1.png", PNG_BYTES)
            .title("Sample")
            .body(&heading(1, "Intro"))
            .build();

        let archive = OoxmlArchive::from_bytes(&docx).unwrap();
        assert!(archive.document_xml().is_ok());
        assert!(archive.styles_xml().is_some());
        assert!(archive.core_properties_xml().is_some());
        assert_eq!(archive.document_part("media/image1.png"), Some(PNG_BYTES));
    }
}
