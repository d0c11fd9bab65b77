//! Marker-delimited region merging.
//!
//! A region is the span between a start and an end marker inside a
//! hand-maintained file. Its interior belongs to the generator and is
//! rewritten wholesale; every byte outside the first matching marker pair
//! is preserved.

use regex::{Regex, RegexBuilder};

const COMMENT_PREFIX: &str = "// --- AUTO-GENERATED";
const MARKUP_PREFIX: &str = "<!-- AUTO-GENERATED";

/// A named start/end marker pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    name: String,
    start: String,
    end: String,
}

impl Region {
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// `// --- AUTO-GENERATED START` / `// --- AUTO-GENERATED END`
    pub fn default_block() -> Self {
        Self::new(
            "DEFAULT",
            format!("{COMMENT_PREFIX} START"),
            format!("{COMMENT_PREFIX} END"),
        )
    }

    /// `// --- AUTO-GENERATED <NAME> START` / `... <NAME> END`
    pub fn comment(name: &str) -> Self {
        Self::new(
            name,
            format!("{COMMENT_PREFIX} {name} START"),
            format!("{COMMENT_PREFIX} {name} END"),
        )
    }

    /// `<!-- AUTO-GENERATED <NAME> START -->` / `<!-- ... <NAME> END -->`
    pub fn markup(name: &str) -> Self {
        Self::new(
            name,
            format!("{MARKUP_PREFIX} {name} START -->"),
            format!("{MARKUP_PREFIX} {name} END -->"),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Merge `lines` into this region, or `None` when the markers are absent.
    pub fn try_apply(&self, content: &str, lines: &[String]) -> Option<String> {
        try_replace(content, &self.start, &self.end, lines)
    }
}

/// Replace the first `start ... end` span of `content` with freshly joined
/// `lines`. Content is returned unchanged when no such span exists.
pub fn replace(content: &str, start: &str, end: &str, lines: &[String]) -> String {
    try_replace(content, start, end, lines).unwrap_or_else(|| content.to_string())
}

/// Like [`replace`], but reports a missing region as `None`.
///
/// The match is the shortest span from the first start marker to the next
/// end marker. A start marker without a following end marker counts as
/// missing.
pub fn try_replace(content: &str, start: &str, end: &str, lines: &[String]) -> Option<String> {
    let span = marker_pattern(start, end).find(content)?;

    let mut merged = String::with_capacity(content.len() + lines.len() * 32);
    merged.push_str(&content[..span.start()]);
    merged.push_str(&render_block(start, end, lines));
    merged.push_str(&content[span.end()..]);
    Some(merged)
}

/// The replacement text for a region, markers included.
pub fn render_block(start: &str, end: &str, lines: &[String]) -> String {
    format!("{start}\n{}\n\n{end}", lines.join("\n"))
}

fn marker_pattern(start: &str, end: &str) -> Regex {
    let pattern = format!("{}.*?{}", regex::escape(start), regex::escape(end));
    // Both markers are escaped literals, so the pattern is always well formed.
    RegexBuilder::new(&pattern)
        .dot_matches_new_line(true)
        .build()
        .expect("escaped marker literals form a valid pattern")
}
