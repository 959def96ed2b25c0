//! Heading detection
//!
//! A [`HeadingClassifier`] decides whether a source paragraph is a heading
//! and at which level. Levels outside 1..=6 are reported as 6.

use std::sync::OnceLock;

use regex::Regex;
use wordbook_ast::SourceParagraph;

use crate::error::{BookError, Result};

/// Deepest heading level a book supports
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Decides the heading level of a paragraph, if it is a heading
pub trait HeadingClassifier {
    /// Heading level (1..=6) or `None` for body paragraphs
    fn heading_level(&self, paragraph: &SourceParagraph) -> Option<u8>;
}

/// Clamp a raw level into the supported range
pub fn clamp_level(level: u32) -> u8 {
    if (1..=MAX_HEADING_LEVEL as u32).contains(&level) {
        level as u8
    } else {
        MAX_HEADING_LEVEL
    }
}

/// Recognizes "Heading N" style names, plus localized prefixes
///
/// ```
/// use wordbook_ast::SourceParagraph;
/// use wordbook_core::classify::{HeadingClassifier, StyleNameClassifier};
///
/// let classifier = StyleNameClassifier::with_prefixes(&["标题"]).unwrap();
/// assert_eq!(classifier.heading_level(&SourceParagraph::styled("heading 2", vec![])), Some(2));
/// assert_eq!(classifier.heading_level(&SourceParagraph::styled("标题 1", vec![])), Some(1));
/// assert_eq!(classifier.heading_level(&SourceParagraph::styled("Normal", vec![])), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StyleNameClassifier {
    localized: Vec<Regex>,
}

impl StyleNameClassifier {
    /// Classifier for the built-in English style names only
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier that also accepts `<prefix><optional space><digits>`
    pub fn with_prefixes<S: AsRef<str>>(prefixes: &[S]) -> Result<Self> {
        let localized = prefixes
            .iter()
            .map(|p| p.as_ref().trim())
            .filter(|p| !p.is_empty())
            .map(|prefix| {
                Regex::new(&format!(r"(?i)^{}\s*([0-9]+)$", regex::escape(prefix))).map_err(
                    |e| BookError::Config(format!("invalid heading prefix {:?}: {}", prefix, e)),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { localized })
    }

    /// Level encoded in a style name, if any
    pub fn level_for_style(&self, style_name: &str) -> Option<u8> {
        static HEADING_RE: OnceLock<Regex> = OnceLock::new();
        let builtin = HEADING_RE.get_or_init(|| Regex::new(r"(?i)^heading\s*([0-9]+)$").unwrap());

        let name = style_name.trim();
        std::iter::once(builtin)
            .chain(self.localized.iter())
            .find_map(|re| re.captures(name))
            .map(|caps| clamp_level(caps[1].parse().unwrap_or(u32::MAX)))
    }
}

impl HeadingClassifier for StyleNameClassifier {
    fn heading_level(&self, paragraph: &SourceParagraph) -> Option<u8> {
        paragraph
            .style_name
            .as_deref()
            .and_then(|name| self.level_for_style(name))
    }
}

/// Uses the outline level a style declares (0-based in the source)
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineLevelClassifier;

impl HeadingClassifier for OutlineLevelClassifier {
    fn heading_level(&self, paragraph: &SourceParagraph) -> Option<u8> {
        paragraph
            .outline_level
            .map(|level| clamp_level(level as u32 + 1))
    }
}

/// Tries classifiers in order and returns the first level found
#[derive(Default)]
pub struct ChainClassifier {
    classifiers: Vec<Box<dyn HeadingClassifier>>,
}

impl ChainClassifier {
    /// Create an empty chain (classifies nothing as a heading)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a classifier to the chain
    pub fn with(mut self, classifier: impl HeadingClassifier + 'static) -> Self {
        self.classifiers.push(Box::new(classifier));
        self
    }

    /// Number of classifiers in the chain
    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    /// Check if the chain has no classifiers
    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }
}

impl HeadingClassifier for ChainClassifier {
    fn heading_level(&self, paragraph: &SourceParagraph) -> Option<u8> {
        self.classifiers
            .iter()
            .find_map(|c| c.heading_level(paragraph))
    }
}
