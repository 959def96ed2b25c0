//! Inline elements for block content
//!
//! A block's text is a sequence of [`Span`]s, each carrying one set of
//! formatting [`Flags`].

use serde::{Deserialize, Serialize};

/// Formatting flag set for a span
///
/// The flags form a set: any combination of bold, italic and underline is
/// allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Flags {
    /// Strong emphasis
    pub bold: bool,
    /// Emphasis
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Flags {
    /// No formatting
    pub const PLAIN: Flags = Flags {
        bold: false,
        italic: false,
        underline: false,
    };

    /// Create a flag set from individual flags
    pub fn new(bold: bool, italic: bool, underline: bool) -> Self {
        Self {
            bold,
            italic,
            underline,
        }
    }

    /// Return a copy with bold set
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Return a copy with italic set
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Return a copy with underline set
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check whether no flag is set
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline
    }
}

/// A contiguous run of text sharing one flag set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Formatting applied to the whole span
    pub flags: Flags,
}

impl Span {
    /// Create a span with explicit flags
    pub fn new(text: impl Into<String>, flags: Flags) -> Self {
        Self {
            text: text.into(),
            flags,
        }
    }

    /// Create an unformatted span
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Flags::PLAIN)
    }

    /// Create a bold span
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, Flags::PLAIN.with_bold())
    }

    /// Create an italic span
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, Flags::PLAIN.with_italic())
    }

    /// Create an underlined span
    pub fn underline(text: impl Into<String>) -> Self {
        Self::new(text, Flags::PLAIN.with_underline())
    }
}

/// Concatenate the text of a span list, ignoring formatting
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}
