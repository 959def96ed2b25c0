//! End-to-end conversion tests
//!
//! Each test builds a DOCX in memory and runs the full pipeline.

use wordbook_core::{convert_bytes, convert_file, Book, BookConfig, BookError};
use wordbook_ooxml::test_utils::{
    heading, image_paragraph, paragraph, DocxBuilder, JPEG_BYTES, PNG_BYTES, WEBP_BYTES,
};

fn text<'a>(book: &'a Book, path: &str) -> &'a str {
    book.file(path)
        .and_then(|f| f.as_str())
        .unwrap_or_else(|| panic!("missing {}", path))
}

fn paths(book: &Book) -> Vec<&str> {
    book.files().iter().map(|f| f.path.as_str()).collect()
}

// =============================================================================
// Chapters and TOC
// =============================================================================

#[test]
fn test_intro_background_setup() {
    let docx = DocxBuilder::new()
        .with_heading_styles()
        .body(&heading(1, "Intro"))
        .body(
            r#"<w:p><w:r><w:t xml:space="preserve">Hello </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>world</w:t></w:r></w:p>"#,
        )
        .body(&heading(2, "Background"))
        .body(&heading(1, "Setup"))
        .build();

    let book = convert_bytes(&docx, &BookConfig::default()).unwrap();

    assert_eq!(book.report.chapters, 2);
    assert_eq!(book.report.toc_entries, 3);
    assert_eq!(
        text(&book, "chapter1.md"),
        "# Intro\n\nHello **world**\n\n<a id=\"background\"></a>\n## Background\n"
    );
    assert_eq!(text(&book, "chapter2.md"), "# Setup\n");
    assert_eq!(
        text(&book, "SUMMARY.md"),
        "# Summary\n\n- [Introduction](README.md)\n- [Intro](chapter1.md)\n  - [Background](chapter1.md#background)\n- [Setup](chapter2.md)\n"
    );
}

#[test]
fn test_heading_with_line_break_stays_on_one_line() {
    let docx = DocxBuilder::new()
        .with_heading_styles()
        .body(&heading(1, "Intro"))
        .body(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Part one</w:t><w:br/><w:t>Part two</w:t></w:r></w:p>"#,
        )
        .build();

    let book = convert_bytes(&docx, &BookConfig::default()).unwrap();
    assert_eq!(
        text(&book, "chapter1.md"),
        "# Intro\n\n<a id=\"part-one-part-two\"></a>\n## Part one Part two\n"
    );
    assert!(text(&book, "SUMMARY.md")
        .ends_with("  - [Part one Part two](chapter1.md#part-one-part-two)\n"));
}

#[test]
fn test_deep_headings_rendered_but_not_listed() {
    let docx = DocxBuilder::new()
        .with_heading_styles()
        .body(&heading(1, "Top"))
        .body(&heading(2, "Two"))
        .body(&heading(3, "Three"))
        .body(&heading(4, "Four"))
        .build();

    let mut config = BookConfig::default();
    config.toc.max_level = 2;
    let book = convert_bytes(&docx, &config).unwrap();

    assert!(book.toc.depth() <= 2);
    assert_eq!(book.report.toc_entries, 2);
    let chapter = text(&book, "chapter1.md");
    assert!(chapter.contains("### Three\n"));
    assert!(chapter.contains("#### Four\n"));
    assert!(!text(&book, "SUMMARY.md").contains("Three"));
}

#[test]
fn test_no_headings_single_chapter() {
    let docx = DocxBuilder::new()
        .body(&paragraph("First"))
        .body(&paragraph("Second"))
        .build();

    let book = convert_bytes(&docx, &BookConfig::default()).unwrap();
    assert_eq!(book.report.chapters, 1);
    assert_eq!(text(&book, "chapter1.md"), "First\n\nSecond\n");
    assert!(text(&book, "SUMMARY.md").ends_with("- [Preface](chapter1.md)\n"));
}

#[test]
fn test_localized_heading_styles() {
    let docx = DocxBuilder::new()
        .styles(
            r#"<w:style w:type="paragraph" w:styleId="1"><w:name w:val="标题 1"/></w:style>
               <w:style w:type="paragraph" w:styleId="2"><w:name w:val="标题 2"/></w:style>"#,
        )
        .body(r#"<w:p><w:pPr><w:pStyle w:val="1"/></w:pPr><w:r><w:t>概述</w:t></w:r></w:p>"#)
        .body(r#"<w:p><w:pPr><w:pStyle w:val="2"/></w:pPr><w:r><w:t>背景</w:t></w:r></w:p>"#)
        .build();

    let book = convert_bytes(&docx, &BookConfig::default()).unwrap();
    assert_eq!(
        text(&book, "chapter1.md"),
        "# 概述\n\n<a id=\"背景\"></a>\n## 背景\n"
    );
}

// =============================================================================
// Assets
// =============================================================================

#[test]
fn test_webp_skipped_next_image_gets_first_id() {
    let docx = DocxBuilder::new()
        .with_heading_styles()
        .image("rId20", "media/image1.webp", WEBP_BYTES)
        .image("rId21", "media/image2.png", PNG_BYTES)
        .body(&heading(1, "Gallery"))
        .body(&image_paragraph("rId20", "Unsupported"))
        .body(&image_paragraph("rId21", "Logo"))
        .build();

    let book = convert_bytes(&docx, &BookConfig::default()).unwrap();

    assert_eq!(book.report.assets, 1);
    assert_eq!(book.report.warnings.len(), 1);
    assert!(book.report.warnings[0].contains("rId20"));
    assert_eq!(
        text(&book, "chapter1.md"),
        "# Gallery\n\n![Logo](assets/image_001.png)\n"
    );
    assert_eq!(
        book.file("assets/image_001.png").map(|f| f.contents.as_slice()),
        Some(PNG_BYTES)
    );
}

#[test]
fn test_asset_ids_follow_document_order() {
    let docx = DocxBuilder::new()
        .image("rId1", "media/a.png", PNG_BYTES)
        .image("rId2", "media/b.jpeg", JPEG_BYTES)
        .body(&image_paragraph("rId2", ""))
        .body(&image_paragraph("rId1", ""))
        .body(&image_paragraph("rId2", ""))
        .build();

    let mut config = BookConfig::default();
    config.assets.dir = "images".to_string();
    let book = convert_bytes(&docx, &config).unwrap();

    assert_eq!(
        paths(&book),
        vec![
            "README.md",
            "SUMMARY.md",
            "book.json",
            "chapter1.md",
            "images/image_001.jpeg",
            "images/image_002.png"
        ]
    );
    assert_eq!(
        text(&book, "chapter1.md"),
        "![image](images/image_001.jpeg)\n\n![image](images/image_002.png)\n\n![image](images/image_001.jpeg)\n"
    );
}

// =============================================================================
// Tables
// =============================================================================

#[test]
fn test_table_rendering() {
    let docx = DocxBuilder::new()
        .body(
            r#"<w:tbl>
                <w:tr>
                    <w:tc><w:p><w:r><w:t>Name</w:t></w:r></w:p></w:tc>
                    <w:tc><w:p><w:r><w:t>Notes</w:t></w:r></w:p></w:tc>
                </w:tr>
                <w:tr>
                    <w:tc><w:p><w:r><w:t>a|b</w:t></w:r></w:p></w:tc>
                    <w:tc><w:p><w:r><w:t>one</w:t></w:r></w:p><w:p><w:r><w:t>two</w:t></w:r></w:p></w:tc>
                </w:tr>
                <w:tr>
                    <w:tc><w:p><w:r><w:t>short</w:t></w:r></w:p></w:tc>
                </w:tr>
            </w:tbl>"#,
        )
        .build();

    let book = convert_bytes(&docx, &BookConfig::default()).unwrap();
    assert_eq!(
        text(&book, "chapter1.md"),
        "| Name | Notes |\n| --- | --- |\n| a\\|b | one<br>two |\n| short |  |\n"
    );
}

// =============================================================================
// Metadata and determinism
// =============================================================================

#[test]
fn test_readme_and_book_json_use_document_title() {
    let docx = DocxBuilder::new().title("Operations Manual").build();
    let book = convert_bytes(&docx, &BookConfig::default()).unwrap();

    assert!(text(&book, "README.md").starts_with("# Operations Manual\n\n文档描述\n\n"));
    let json: serde_json::Value = serde_json::from_str(text(&book, "book.json")).unwrap();
    assert_eq!(json["title"], "Operations Manual");
    assert_eq!(json["language"], "zh-hans");
}

#[test]
fn test_conversion_is_deterministic() {
    let docx = DocxBuilder::new()
        .with_heading_styles()
        .image("rId3", "media/image1.png", PNG_BYTES)
        .body(&heading(1, "A"))
        .body(&heading(2, "Same"))
        .body(&heading(2, "Same"))
        .body(&image_paragraph("rId3", "pic"))
        .body(&heading(1, "B"))
        .build();

    let first = convert_bytes(&docx, &BookConfig::default()).unwrap();
    let second = convert_bytes(&docx, &BookConfig::default()).unwrap();
    assert_eq!(first.files(), second.files());
    assert!(text(&first, "chapter1.md").contains("<a id=\"same-1\"></a>"));
}

#[test]
fn test_convert_file_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = convert_file(dir.path().join("missing.docx"), &BookConfig::default());
    assert!(matches!(missing, Err(BookError::Parse(_))));

    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"not a zip").unwrap();
    assert!(matches!(
        convert_file(&path, &BookConfig::default()),
        Err(BookError::Parse(_))
    ));
}
