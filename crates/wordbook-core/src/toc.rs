//! Table of contents
//!
//! Builds the heading forest shown in `SUMMARY.md` and assigns the in-file
//! anchors the renderer writes before sub-chapter headings.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, instrument};
use wordbook_ast::Block;

use crate::chapters::Chapter;

/// Anchor used when a heading's text has no alphanumeric characters
pub const FALLBACK_ANCHOR: &str = "section";

/// One entry of the table of contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocNode {
    /// Display text
    pub title: String,
    /// Chapter file the entry points to
    pub file: String,
    /// In-chapter anchor, absent for a chapter's own top heading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// Heading level of the source heading
    pub level: u8,
    /// Nested entries
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocNode>,
}

impl TocNode {
    fn new(title: &str, file: &str, anchor: Option<String>, level: u8) -> Self {
        Self {
            title: title.to_string(),
            file: file.to_string(),
            anchor,
            level,
            children: Vec::new(),
        }
    }

    /// Link target, e.g. `chapter1.md#background`
    pub fn link(&self) -> String {
        match &self.anchor {
            Some(anchor) => format!("{}#{}", self.file, anchor),
            None => self.file.clone(),
        }
    }

    /// Depth of the subtree rooted here (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TocNode::depth).max().unwrap_or(0)
    }

    /// Number of entries in the subtree rooted here
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TocNode::count).sum::<usize>()
    }
}

/// The table of contents of a book
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Toc {
    /// Top-level entries in document order
    pub roots: Vec<TocNode>,
    /// Anchors keyed by (chapter index, block index)
    #[serde(skip)]
    anchors: HashMap<(usize, usize), String>,
}

impl Toc {
    /// Anchor assigned to a heading block of a chapter
    pub fn anchor(&self, chapter: &Chapter, block: usize) -> Option<&str> {
        self.anchors
            .get(&(chapter.index, block))
            .map(String::as_str)
    }

    /// Total number of entries
    pub fn entry_count(&self) -> usize {
        self.roots.iter().map(TocNode::count).sum()
    }

    /// Depth of the deepest entry (0 for an empty table)
    pub fn depth(&self) -> usize {
        self.roots.iter().map(TocNode::depth).max().unwrap_or(0)
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Visit entries depth-first with their depth (roots have depth 1)
    pub fn walk(&self, mut visit: impl FnMut(&TocNode, usize)) {
        fn go(node: &TocNode, depth: usize, visit: &mut dyn FnMut(&TocNode, usize)) {
            visit(node, depth);
            for child in &node.children {
                go(child, depth + 1, visit);
            }
        }
        for root in &self.roots {
            go(root, 1, &mut visit);
        }
    }
}

/// Anchor for a heading text
///
/// ```
/// use wordbook_core::toc::anchor_for;
///
/// assert_eq!(anchor_for("Getting Started!"), "getting-started");
/// assert_eq!(anchor_for("2.1 安装 / Setup"), "2-1-安装-setup");
/// ```
pub fn anchor_for(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !anchor.is_empty() {
                anchor.push('-');
            }
            pending_dash = false;
            anchor.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    anchor
}

/// Build the table of contents for the given chapters
#[instrument(skip_all, fields(chapters = chapters.len(), max_level = max_level))]
pub fn build_toc(chapters: &[Chapter], max_level: u8) -> Toc {
    let mut toc = Toc::default();

    for chapter in chapters {
        let top = top_heading(chapter);
        let mut used = HashSet::new();
        let mut stack: Vec<TocNode> = Vec::new();

        if top.is_none() {
            toc.roots
                .push(TocNode::new(&chapter.title, &chapter.file_name, None, 1));
        }

        for (index, block) in chapter.blocks.iter().enumerate() {
            let Block::Heading(heading) = block else {
                continue;
            };
            let is_top = top == Some(index);
            if heading.level > max_level && !is_top {
                continue;
            }

            let anchor = if is_top {
                None
            } else {
                let anchor = unique_anchor(anchor_for(&heading.text), &mut used);
                toc.anchors.insert((chapter.index, index), anchor.clone());
                Some(anchor)
            };

            close_until(&mut stack, &mut toc.roots, heading.level);
            stack.push(TocNode::new(
                &heading.text,
                &chapter.file_name,
                anchor,
                heading.level,
            ));
        }

        close_until(&mut stack, &mut toc.roots, 0);
    }

    debug!(
        entries = toc.entry_count(),
        depth = toc.depth(),
        "table of contents built"
    );
    toc
}

/// Block index of the heading that names the chapter, if any
fn top_heading(chapter: &Chapter) -> Option<usize> {
    chapter
        .blocks
        .iter()
        .position(|b| matches!(b, Block::Heading(_)))
        .filter(|&index| match &chapter.blocks[index] {
            Block::Heading(h) => h.text == chapter.title,
            _ => false,
        })
}

/// Close every open entry whose level is not shallower than `level`
fn close_until(stack: &mut Vec<TocNode>, roots: &mut Vec<TocNode>, level: u8) {
    while stack.last().is_some_and(|open| open.level >= level) {
        if let Some(node) = stack.pop() {
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => roots.push(node),
            }
        }
    }
}

fn unique_anchor(base: String, used: &mut HashSet<String>) -> String {
    let base = if base.is_empty() {
        FALLBACK_ANCHOR.to_string()
    } else {
        base
    };
    if used.insert(base.clone()) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}", base, n);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::split_chapters;
    use wordbook_ast::{Heading, Paragraph, Span};

    fn h(level: u8, text: &str) -> Block {
        Block::Heading(Heading::new(level, vec![Span::plain(text)]))
    }

    fn p(text: &str) -> Block {
        Block::Paragraph(Paragraph::new(vec![Span::plain(text)]))
    }

    fn toc_for(blocks: &[Block], max_level: u8) -> (Vec<Chapter>, Toc) {
        let chapters = split_chapters(blocks);
        let toc = build_toc(&chapters, max_level);
        (chapters, toc)
    }

    #[test]
    fn test_anchor_rules() {
        assert_eq!(anchor_for("Background"), "background");
        assert_eq!(anchor_for("  What's   new?? "), "what-s-new");
        assert_eq!(anchor_for("--a--b--"), "a-b");
        assert_eq!(anchor_for("Überblick"), "überblick");
        assert_eq!(anchor_for("!!!"), "");
    }

    #[test]
    fn test_intro_background_setup() {
        let (chapters, toc) = toc_for(
            &[h(1, "Intro"), p("Hello"), h(2, "Background"), h(1, "Setup")],
            3,
        );

        assert_eq!(toc.roots.len(), 2);
        let intro = &toc.roots[0];
        assert_eq!(intro.title, "Intro");
        assert_eq!(intro.link(), "chapter1.md");
        assert_eq!(intro.children.len(), 1);
        assert_eq!(intro.children[0].link(), "chapter1.md#background");
        assert_eq!(toc.roots[1].link(), "chapter2.md");

        assert_eq!(toc.anchor(&chapters[0], 0), None);
        assert_eq!(toc.anchor(&chapters[0], 2), Some("background"));
        assert_eq!(toc.entry_count(), 3);
    }

    #[test]
    fn test_depth_bounded_by_max_level() {
        let blocks = vec![
            h(1, "A"),
            h(2, "B"),
            h(3, "C"),
            h(4, "D"),
            h(5, "E"),
            h(2, "F"),
        ];
        for max in 1..=6u8 {
            let (_, toc) = toc_for(&blocks, max);
            assert!(toc.depth() <= max as usize, "max {}", max);
        }

        let (chapters, toc) = toc_for(&blocks, 2);
        assert_eq!(toc.entry_count(), 3);
        assert_eq!(toc.anchor(&chapters[0], 3), None);
    }

    #[test]
    fn test_level_jump_nests_directly() {
        let (_, toc) = toc_for(&[h(1, "Top"), h(3, "Deep"), h(2, "Mid")], 3);
        let top = &toc.roots[0];
        assert_eq!(top.children.len(), 2);
        assert_eq!(top.children[0].title, "Deep");
        assert_eq!(top.children[1].title, "Mid");
    }

    #[test]
    fn test_orphan_heading_in_leading_chapter_is_root() {
        let (_, toc) = toc_for(&[p("Opening"), h(3, "Orphan"), h(1, "One")], 3);
        let titles: Vec<_> = toc.roots.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Preface", "Orphan", "One"]);
        assert_eq!(toc.roots[0].link(), "chapter1.md");
        assert_eq!(toc.roots[1].link(), "chapter1.md#orphan");
        assert_eq!(toc.roots[2].link(), "chapter2.md");
    }

    #[test]
    fn test_stack_resets_per_chapter() {
        let (_, toc) = toc_for(&[h(1, "One"), h(2, "A"), h(1, "Two"), h(2, "B")], 3);
        assert_eq!(toc.roots.len(), 2);
        assert_eq!(toc.roots[1].children[0].title, "B");
        assert_eq!(toc.roots[1].children[0].file, "chapter2.md");
    }

    #[test]
    fn test_duplicate_anchors_suffixed() {
        let (chapters, toc) = toc_for(
            &[h(1, "Guide"), h(2, "Usage"), h(3, "Usage"), h(2, "Usage"), h(2, "???")],
            3,
        );
        assert_eq!(toc.anchor(&chapters[0], 1), Some("usage"));
        assert_eq!(toc.anchor(&chapters[0], 2), Some("usage-1"));
        assert_eq!(toc.anchor(&chapters[0], 3), Some("usage-2"));
        assert_eq!(toc.anchor(&chapters[0], 4), Some("section"));
    }

    #[test]
    fn test_anchors_scoped_to_chapter() {
        let (chapters, toc) = toc_for(&[h(1, "A"), h(2, "Notes"), h(1, "B"), h(2, "Notes")], 3);
        assert_eq!(toc.anchor(&chapters[0], 1), Some("notes"));
        assert_eq!(toc.anchor(&chapters[1], 1), Some("notes"));
    }

    #[test]
    fn test_single_synthetic_chapter_titled_by_heading() {
        let (chapters, toc) = toc_for(&[h(2, "Overview"), p("x"), h(3, "Detail")], 3);
        assert_eq!(chapters.len(), 1);
        assert_eq!(toc.roots.len(), 1);
        assert_eq!(toc.roots[0].title, "Overview");
        assert_eq!(toc.roots[0].anchor, None);
        assert_eq!(toc.roots[0].children[0].link(), "chapter1.md#detail");
    }

    #[test]
    fn test_walk_depths() {
        let (_, toc) = toc_for(&[h(1, "A"), h(2, "B"), h(3, "C"), h(1, "D")], 3);
        let mut seen = Vec::new();
        toc.walk(|node, depth| seen.push((node.title.clone(), depth)));
        assert_eq!(
            seen,
            vec![
                ("A".to_string(), 1),
                ("B".to_string(), 2),
                ("C".to_string(), 3),
                ("D".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_serializes_without_empty_fields() {
        let (_, toc) = toc_for(&[h(1, "Only")], 3);
        let json = serde_json::to_value(&toc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"roots": [{"title": "Only", "file": "chapter1.md", "level": 1}]})
        );
    }
}
