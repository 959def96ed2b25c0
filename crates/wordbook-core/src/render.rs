//! Markdown rendering
//!
//! Renders chapters, `SUMMARY.md` and `README.md`. Every rendered file ends
//! with exactly one newline.

use tracing::debug;
use wordbook_ast::{Block, Heading, ImageRef, Table};

use crate::assets::AssetCatalog;
use crate::chapters::Chapter;
use crate::error::{BookError, Result};
use crate::inline::render_spans;
use crate::toc::Toc;

/// Heading of the README section describing where the book came from
pub const README_ABOUT_HEADING: &str = "## 关于本文档";

/// Body of the README section describing where the book came from
pub const README_ABOUT_TEXT: &str = "本文档由Word文档自动转换生成，使用GitBook格式展示。";

/// Link text of the README entry in `SUMMARY.md`
pub const README_TITLE: &str = "Introduction";

/// Renders chapter blocks as Markdown
pub struct MarkdownRenderer<'a> {
    assets: &'a AssetCatalog,
    toc: &'a Toc,
    assets_dir: &'a str,
}

impl<'a> MarkdownRenderer<'a> {
    /// Create a renderer resolving images against `assets` stored in `assets_dir`
    pub fn new(assets: &'a AssetCatalog, toc: &'a Toc, assets_dir: &'a str) -> Self {
        Self {
            assets,
            toc,
            assets_dir,
        }
    }

    /// Render one chapter
    pub fn render_chapter(&self, chapter: &Chapter) -> Result<String> {
        let mut parts = Vec::with_capacity(chapter.blocks.len());

        for (index, block) in chapter.blocks.iter().enumerate() {
            let text = match block {
                Block::Heading(h) => self.heading(h, self.toc.anchor(chapter, index)),
                Block::Paragraph(p) => render_spans(&p.spans).trim().to_string(),
                Block::Table(t) => render_table(t),
                Block::Image(image) => self.image(image).ok_or_else(|| BookError::Render {
                    chapter: chapter.file_name.clone(),
                    block: index,
                    reason: format!("unknown asset id {}", image.asset_id),
                })?,
            };
            if !text.is_empty() {
                parts.push(text);
            }
        }

        debug!("Rendered {} ({} blocks)", chapter.file_name, chapter.blocks.len());
        Ok(finish(parts.join("\n\n")))
    }

    fn heading(&self, heading: &Heading, anchor: Option<&str>) -> String {
        let marker = "#".repeat(heading.level as usize);
        match anchor {
            Some(anchor) => format!("<a id=\"{}\"></a>\n{} {}", anchor, marker, heading.text),
            None => format!("{} {}", marker, heading.text),
        }
    }

    fn image(&self, image: &ImageRef) -> Option<String> {
        let asset = self.assets.get(image.asset_id)?;
        let alt = image
            .alt
            .as_deref()
            .map(|alt| alt.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| "image".to_string());
        Some(format!(
            "![{}]({})",
            escape_link_text(&alt),
            asset.relative_path(self.assets_dir)
        ))
    }
}

/// Render a pipe table; the first row is the header
///
/// ```
/// use wordbook_ast::Table;
/// use wordbook_core::render::render_table;
///
/// let table = Table { rows: vec![vec!["A".into(), "B".into()], vec!["1".into()]] };
/// assert_eq!(render_table(&table), "| A | B |\n| --- | --- |\n| 1 |  |");
/// ```
pub fn render_table(table: &Table) -> String {
    let columns = table.column_count();
    if columns == 0 {
        return String::new();
    }

    let row_line = |row: &[String]| {
        let mut line = String::from("|");
        for col in 0..columns {
            let cell = row.get(col).map(|c| escape_cell(c)).unwrap_or_default();
            line.push(' ');
            line.push_str(&cell);
            line.push_str(" |");
        }
        line
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    for (i, row) in table.rows.iter().enumerate() {
        lines.push(row_line(row.as_slice()));
        if i == 0 {
            lines.push(format!("|{}", " --- |".repeat(columns)));
        }
    }
    lines.join("\n")
}

fn escape_cell(text: &str) -> String {
    text.trim()
        .replace('|', "\\|")
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

fn finish(mut text: String) -> String {
    let trimmed = text.trim_end_matches('\n').len();
    text.truncate(trimmed);
    text.push('\n');
    text
}

/// Render `SUMMARY.md`
///
/// The README is always the first entry.
pub fn render_summary(toc: &Toc) -> String {
    let mut out = String::from("# Summary\n\n");
    out.push_str(&format!("- [{}](README.md)\n", README_TITLE));
    toc.walk(|node, depth| {
        out.push_str(&"  ".repeat(depth - 1));
        out.push_str(&format!("- [{}]({})\n", escape_link_text(&node.title), node.link()));
    });
    out
}

/// Render `README.md`
pub fn render_readme(title: &str, description: &str) -> String {
    let mut out = format!("# {}\n\n", title);
    if !description.trim().is_empty() {
        out.push_str(description.trim());
        out.push_str("\n\n");
    }
    out.push_str(README_ABOUT_HEADING);
    out.push_str("\n\n");
    out.push_str(README_ABOUT_TEXT);
    out.push('\n');
    out
}
