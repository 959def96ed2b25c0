//! DOCX Loading Tests
//!
//! End-to-end tests for `load_file` / `load_bytes` on in-memory packages.

use std::fs;

use tempfile::TempDir;
use wordbook_ast::{SourceElement, SourceRun};
use wordbook_ooxml::test_utils::{
    heading, image_paragraph, paragraph, DocxBuilder, JPEG_BYTES, PNG_BYTES,
};
use wordbook_ooxml::{load_bytes, load_file, OoxmlError};

fn paragraphs(elements: &[SourceElement]) -> Vec<&wordbook_ast::SourceParagraph> {
    elements
        .iter()
        .filter_map(|e| match e {
            SourceElement::Paragraph(p) => Some(p),
            SourceElement::Table(_) => None,
        })
        .collect()
}

// =============================================================================
// File handling
// =============================================================================

#[test]
fn test_load_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.docx");
    let docx = DocxBuilder::new()
        .with_heading_styles()
        .body(&heading(1, "Intro"))
        .body(&paragraph("Hello"))
        .build();
    fs::write(&path, docx).unwrap();

    let loaded = load_file(&path).unwrap();
    assert_eq!(loaded.elements.len(), 2);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = load_file(dir.path().join("nope.docx"));
    assert!(matches!(result, Err(OoxmlError::Io(_))));
}

#[test]
fn test_load_not_a_docx() {
    let result = load_bytes(b"PK but not really");
    assert!(matches!(result, Err(OoxmlError::Archive(_))));
}

#[test]
fn test_load_zip_without_document_part() {
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        zip.start_file("readme.txt", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"hello").unwrap();
        zip.finish().unwrap();
    }

    let result = load_bytes(&buffer.into_inner());
    assert!(matches!(result, Err(OoxmlError::MissingFile(ref p)) if p == "word/document.xml"));
}

// =============================================================================
// Content
// =============================================================================

#[test]
fn test_mixed_formatting_runs() {
    let docx = DocxBuilder::new()
        .body(
            r#"<w:p>
                <w:r><w:t xml:space="preserve">Hello </w:t></w:r>
                <w:r><w:rPr><w:b/></w:rPr><w:t>world</w:t></w:r>
                <w:r><w:rPr><w:i/><w:u w:val="single"/></w:rPr><w:t>!</w:t></w:r>
            </w:p>"#,
        )
        .build();

    let loaded = load_bytes(&docx).unwrap();
    let paras = paragraphs(&loaded.elements);
    let runs: Vec<_> = paras[0]
        .runs
        .iter()
        .filter_map(|r| match r {
            SourceRun::Text(t) => Some(t),
            SourceRun::Image(_) => None,
        })
        .collect();

    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].text, "Hello ");
    assert!(!runs[0].bold);
    assert!(runs[1].bold);
    assert!(runs[2].italic && runs[2].underline);
}

#[test]
fn test_images_in_document_order() {
    let docx = DocxBuilder::new()
        .with_heading_styles()
        .image("rId10", "media/image1.png", PNG_BYTES)
        .image("rId11", "media/image2.jpeg", JPEG_BYTES)
        .body(&heading(1, "Pictures"))
        .body(&image_paragraph("rId11", "Second file, first use"))
        .body(&image_paragraph("rId10", ""))
        .build();

    let loaded = load_bytes(&docx).unwrap();
    let images: Vec<_> = paragraphs(&loaded.elements)
        .into_iter()
        .flat_map(|p| p.images())
        .collect();

    assert_eq!(images.len(), 2);
    assert_eq!(images[0].reference, "rId11");
    assert_eq!(images[0].format_hint.as_deref(), Some("jpeg"));
    assert_eq!(images[0].bytes, JPEG_BYTES);
    assert_eq!(images[1].reference, "rId10");
    assert_eq!(images[1].alt, None);
    assert!(loaded.warnings.is_empty());
}

#[test]
fn test_localized_style_names() {
    let docx = DocxBuilder::new()
        .styles(
            r#"<w:style w:type="paragraph" w:styleId="1"><w:name w:val="标题 1"/></w:style>
               <w:style w:type="paragraph" w:styleId="berschrift2"><w:name w:val="Überschrift 2"/></w:style>"#,
        )
        .body(r#"<w:p><w:pPr><w:pStyle w:val="1"/></w:pPr><w:r><w:t>概述</w:t></w:r></w:p>"#)
        .body(r#"<w:p><w:pPr><w:pStyle w:val="berschrift2"/></w:pPr><w:r><w:t>Einleitung</w:t></w:r></w:p>"#)
        .build();

    let loaded = load_bytes(&docx).unwrap();
    let names: Vec<_> = paragraphs(&loaded.elements)
        .iter()
        .map(|p| p.style_name.clone().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["标题 1", "Überschrift 2"]);
}

#[test]
fn test_external_image_is_warning() {
    let docx = DocxBuilder::new()
        .relationship(
            "rId3",
            wordbook_ooxml::Relationships::TYPE_IMAGE,
            "https://example.com/logo.png",
        )
        .body(&image_paragraph("rId3", "Logo"))
        .build();

    let loaded = load_bytes(&docx).unwrap();
    assert_eq!(loaded.warnings.len(), 1);
    assert!(loaded.warnings[0].contains("not embedded"));
    assert_eq!(paragraphs(&loaded.elements)[0].images().count(), 0);
}
