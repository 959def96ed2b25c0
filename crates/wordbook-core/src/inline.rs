//! Inline formatting resolution
//!
//! Turns the formatted runs of one paragraph into the minimal list of
//! [`Span`]s (adjacent runs with identical flags merged, empty runs dropped)
//! and renders spans as Markdown emphasis.

use wordbook_ast::{Flags, SourceRun, Span};

/// Build resolved spans from a paragraph's runs (images are ignored)
pub fn spans_from_runs(runs: &[SourceRun]) -> Vec<Span> {
    merge_spans(runs.iter().filter_map(|run| match run {
        SourceRun::Text(t) => Some(Span::new(
            t.text.clone(),
            Flags::new(t.bold, t.italic, t.underline),
        )),
        SourceRun::Image(_) => None,
    }))
}

/// Merge adjacent spans with identical flags and drop empty ones
///
/// Idempotent: merging an already merged list returns it unchanged.
pub fn merge_spans(spans: impl IntoIterator<Item = Span>) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::new();
    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.flags == span.flags => last.text.push_str(&span.text),
            _ => merged.push(span),
        }
    }
    merged
}

/// Render spans as Markdown text
pub fn render_spans(spans: &[Span]) -> String {
    spans.iter().map(render_span).collect()
}

/// Render one span, keeping edge whitespace outside the emphasis markers
///
/// ```
/// use wordbook_ast::Span;
/// use wordbook_core::inline::render_span;
///
/// assert_eq!(render_span(&Span::bold("world ")), "**world** ");
/// ```
pub fn render_span(span: &Span) -> String {
    let text = span.text.as_str();
    if span.flags.is_plain() {
        return text.to_string();
    }

    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }
    let start = text.len() - text.trim_start().len();
    let end = start + core.len();

    let (open, close) = markers(span.flags);
    format!("{}{}{}{}{}", &text[..start], open, core, close, &text[end..])
}

/// Opening and closing markers, bold outermost then italic then underline
fn markers(flags: Flags) -> (String, String) {
    let mut open = String::new();
    let mut close = String::new();
    if flags.bold {
        open.push_str("**");
    }
    if flags.italic {
        open.push('*');
    }
    if flags.underline {
        open.push_str("<u>");
        close.push_str("</u>");
    }
    if flags.italic {
        close.push('*');
    }
    if flags.bold {
        close.push_str("**");
    }
    (open, close)
}
