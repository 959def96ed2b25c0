//! Chapter splitting
//!
//! Every level-1 heading opens a chapter. Content before the first one
//! becomes a leading chapter titled [`DEFAULT_CHAPTER_TITLE`].

use serde::Serialize;
use wordbook_ast::Block;

/// Title of a chapter that does not start with a heading
///
/// Differs from the README entry of `SUMMARY.md` so the two stay apart.
pub const DEFAULT_CHAPTER_TITLE: &str = "Preface";

/// A contiguous run of blocks written to one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    /// 1-based position in the book
    pub index: usize,
    /// File name, e.g. `chapter1.md`
    pub file_name: String,
    /// Display title
    pub title: String,
    /// True when the chapter does not begin with its own level-1 heading
    pub synthetic: bool,
    /// Blocks in document order
    #[serde(skip)]
    pub blocks: Vec<Block>,
}

impl Chapter {
    fn new(index: usize, title: String, synthetic: bool, blocks: Vec<Block>) -> Self {
        Self {
            index,
            file_name: chapter_file_name(index),
            title,
            synthetic,
            blocks,
        }
    }
}

/// File name of the chapter at a 1-based index
pub fn chapter_file_name(index: usize) -> String {
    format!("chapter{}.md", index)
}

/// Split blocks into chapters at level-1 headings
pub fn split_chapters(blocks: &[Block]) -> Vec<Chapter> {
    if blocks.is_empty() {
        return Vec::new();
    }

    if !blocks.iter().any(Block::is_chapter_start) {
        let title = blocks
            .iter()
            .find_map(|b| match b {
                Block::Heading(h) => Some(h.text.clone()),
                _ => None,
            })
            .unwrap_or_else(|| DEFAULT_CHAPTER_TITLE.to_string());
        return vec![Chapter::new(1, title, true, blocks.to_vec())];
    }

    let mut chapters: Vec<Chapter> = Vec::new();
    let mut leading: Vec<Block> = Vec::new();

    for block in blocks {
        match block {
            Block::Heading(h) if h.level == 1 => {
                if !leading.is_empty() {
                    let content = std::mem::take(&mut leading);
                    let title = DEFAULT_CHAPTER_TITLE.to_string();
                    chapters.push(Chapter::new(1, title, true, content));
                }
                let index = chapters.len() + 1;
                chapters.push(Chapter::new(index, h.text.clone(), false, vec![block.clone()]));
            }
            _ => match chapters.last_mut() {
                Some(chapter) => chapter.blocks.push(block.clone()),
                None => leading.push(block.clone()),
            },
        }
    }

    chapters
}
