//! Book assembly
//!
//! Runs the whole pipeline in memory. A [`Book`] holds every output file,
//! so a failed conversion leaves nothing half-written.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};
use wordbook_ooxml::{load_bytes, load_file, LoadedDocument};

use crate::blocks::BlockModelBuilder;
use crate::chapters::{split_chapters, Chapter};
use crate::config::{BookConfig, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
use crate::error::Result;
use crate::render::{render_readme, render_summary, MarkdownRenderer};
use crate::toc::{build_toc, Toc};

/// Name of the book landing page
pub const README_FILE: &str = "README.md";
/// Name of the navigation file
pub const SUMMARY_FILE: &str = "SUMMARY.md";
/// Name of the book metadata file
pub const BOOK_JSON_FILE: &str = "book.json";

/// Plugins disabled in the generated `book.json`
pub const DEFAULT_PLUGINS: [&str; 3] = ["-sharing", "-fontsettings", "-livereload"];

/// A file of the generated book
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    /// Path relative to the book root, `/`-separated
    pub path: String,
    /// File contents
    pub contents: Vec<u8>,
}

impl OutputFile {
    fn text(path: impl Into<String>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents: contents.into_bytes(),
        }
    }

    /// Contents as UTF-8 text, if they are text
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }
}

/// Summary of a successful conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Number of chapter files
    pub chapters: usize,
    /// Number of extracted images
    pub assets: usize,
    /// Number of table of contents entries
    pub toc_entries: usize,
    /// Recoverable problems (skipped images)
    pub warnings: Vec<String>,
}

/// A converted book, ready to be written
#[derive(Debug, Clone)]
pub struct Book {
    /// Resolved title
    pub title: String,
    /// Resolved description
    pub description: String,
    /// Language code
    pub language: String,
    /// Chapters in order
    pub chapters: Vec<Chapter>,
    /// Table of contents
    pub toc: Toc,
    /// Conversion summary
    pub report: ConversionReport,
    files: Vec<OutputFile>,
}

impl Book {
    /// All output files: README, SUMMARY, book.json, chapters, then assets
    pub fn files(&self) -> &[OutputFile] {
        &self.files
    }

    /// Look up an output file by its relative path
    pub fn file(&self, path: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

#[derive(Serialize)]
struct BookJson<'a> {
    title: &'a str,
    description: &'a str,
    language: &'a str,
    plugins: &'a [&'a str],
    #[serde(rename = "pluginsConfig")]
    plugins_config: serde_json::Map<String, serde_json::Value>,
}

/// Convert a DOCX file
pub fn convert_file<P: AsRef<Path>>(path: P, config: &BookConfig) -> Result<Book> {
    convert(load_file(path)?, config)
}

/// Convert a DOCX held in memory
pub fn convert_bytes(bytes: &[u8], config: &BookConfig) -> Result<Book> {
    convert(load_bytes(bytes)?, config)
}

/// Convert a loaded document into a book
pub fn convert(document: LoadedDocument, config: &BookConfig) -> Result<Book> {
    config.validate()?;
    let classifier = config.classifier()?;

    let model = BlockModelBuilder::new(&classifier).build(&document.elements);
    let chapters = split_chapters(&model.blocks);
    let toc = build_toc(&chapters, config.toc.max_level);
    let assets_dir = config.assets_dir();

    let title = resolve(
        config.book.title.as_deref(),
        document.properties.title.as_deref(),
        DEFAULT_TITLE,
    );
    let description = resolve(
        config.book.description.as_deref(),
        document.properties.subject.as_deref(),
        DEFAULT_DESCRIPTION,
    );
    let language = config.book.language.clone();

    let mut files = Vec::with_capacity(3 + chapters.len() + model.assets.len());
    files.push(OutputFile::text(README_FILE, render_readme(&title, &description)));
    files.push(OutputFile::text(SUMMARY_FILE, render_summary(&toc)));

    let mut book_json = serde_json::to_string_pretty(&BookJson {
        title: &title,
        description: &description,
        language: &language,
        plugins: &DEFAULT_PLUGINS,
        plugins_config: serde_json::Map::new(),
    })?;
    book_json.push('\n');
    files.push(OutputFile::text(BOOK_JSON_FILE, book_json));

    let renderer = MarkdownRenderer::new(&model.assets, &toc, assets_dir);
    for chapter in &chapters {
        files.push(OutputFile::text(
            chapter.file_name.clone(),
            renderer.render_chapter(chapter)?,
        ));
    }

    for asset in &model.assets.assets {
        debug!("Asset {} ({})", asset.file_name(), asset.format.mime_type());
        files.push(OutputFile {
            path: asset.relative_path(assets_dir),
            contents: asset.bytes.clone(),
        });
    }

    let mut warnings = document.warnings;
    warnings.extend(model.warnings);

    let report = ConversionReport {
        chapters: chapters.len(),
        assets: model.assets.len(),
        toc_entries: toc.entry_count(),
        warnings,
    };
    info!(
        "Converted {:?}: {} chapters, {} images, {} TOC entries, {} warnings",
        title,
        report.chapters,
        report.assets,
        report.toc_entries,
        report.warnings.len()
    );

    Ok(Book {
        title,
        description,
        language,
        chapters,
        toc,
        report,
        files,
    })
}

fn resolve(configured: Option<&str>, from_document: Option<&str>, default: &str) -> String {
    configured
        .into_iter()
        .chain(from_document)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}
