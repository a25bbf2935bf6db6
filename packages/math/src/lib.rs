//! Splits text runs into literal text and LaTeX math segments.
//!
//! A run is scanned in exactly one mode. If it contains `$$` anywhere, only
//! `$$...$$` spans are recognized; otherwise, if it contains `$`, only `$...$`
//! spans are. A run holding both kinds is therefore scanned for block math
//! alone, and `$x$` next to `$$y$$` stays literal. There is no escape for a
//! literal dollar sign.
//!
//! Unterminated delimiters never match, so malformed math degrades to plain
//! text.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_MATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\$[^$]+\$\$").unwrap());

static INLINE_MATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$[^$]+\$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathMode {
    /// `$...$`, typeset within the line.
    Inline,
    /// `$$...$$`, typeset as its own block.
    Block,
}

impl MathMode {
    /// Source delimiter on each side of the expression.
    pub fn delimiter(self) -> &'static str {
        match self {
            MathMode::Inline => "$",
            MathMode::Block => "$$",
        }
    }

    /// Delimiters understood by KaTeX auto-render, which does not treat a
    /// bare `$` as math by default.
    pub fn tex_delimiters(self) -> (&'static str, &'static str) {
        match self {
            MathMode::Inline => ("\\(", "\\)"),
            MathMode::Block => ("\\[", "\\]"),
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            MathMode::Inline => &*INLINE_MATH,
            MathMode::Block => &*BLOCK_MATH,
        }
    }
}

/// A piece of a text run, borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Math { expression: &'a str, mode: MathMode },
}

impl<'a> Segment<'a> {
    pub fn is_math(&self) -> bool {
        matches!(self, Segment::Math { .. })
    }

    /// Literal text, or the expression without delimiters.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Segment::Text(text) => text,
            Segment::Math { expression, .. } => expression,
        }
    }
}

/// The mode a run would be scanned in, if any.
pub fn detect_mode(content: &str) -> Option<MathMode> {
    if content.contains("$$") {
        Some(MathMode::Block)
    } else if content.contains('$') {
        Some(MathMode::Inline)
    } else {
        None
    }
}

/// Split `content` into literal and math segments, in source order.
///
/// Empty literal pieces between or around math spans are not emitted. Content
/// without any recognized span comes back as a single literal segment.
pub fn split_math(content: &str) -> Vec<Segment<'_>> {
    match detect_mode(content) {
        Some(mode) => split_with(content, mode),
        None => vec![Segment::Text(content)],
    }
}

fn split_with(content: &str, mode: MathMode) -> Vec<Segment<'_>> {
    let delimiter = mode.delimiter().len();
    let mut segments = Vec::new();
    let mut cursor = 0;

    for span in mode.pattern().find_iter(content) {
        if span.start() > cursor {
            segments.push(Segment::Text(&content[cursor..span.start()]));
        }
        segments.push(Segment::Math {
            expression: &content[span.start() + delimiter..span.end() - delimiter],
            mode,
        });
        cursor = span.end();
    }

    if cursor == 0 {
        return vec![Segment::Text(content)];
    }
    if cursor < content.len() {
        segments.push(Segment::Text(&content[cursor..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(expression: &str) -> Segment<'_> {
        Segment::Math {
            expression,
            mode: MathMode::Inline,
        }
    }

    fn block(expression: &str) -> Segment<'_> {
        Segment::Math {
            expression,
            mode: MathMode::Block,
        }
    }

    #[test]
    fn test_plain_text_is_one_segment() {
        let content = "No math here, just prose.";
        assert_eq!(split_math(content), vec![Segment::Text(content)]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(split_math(""), vec![Segment::Text("")]);
    }

    #[test]
    fn test_inline_math() {
        assert_eq!(
            split_math("Area is $x^2$ units"),
            vec![Segment::Text("Area is "), inline("x^2"), Segment::Text(" units")]
        );
    }

    #[test]
    fn test_multiple_inline_spans() {
        assert_eq!(
            split_math("$a$ and $b$"),
            vec![inline("a"), Segment::Text(" and "), inline("b")]
        );
    }

    #[test]
    fn test_adjacent_inline_spans() {
        assert_eq!(split_math("$a$$b$"), vec![Segment::Text("$a$$b$")]);
    }

    #[test]
    fn test_block_math() {
        assert_eq!(split_math("$$E=mc^2$$"), vec![block("E=mc^2")]);
    }

    #[test]
    fn test_block_math_with_text() {
        assert_eq!(
            split_math("Energy: $$E=mc^2$$ holds."),
            vec![Segment::Text("Energy: "), block("E=mc^2"), Segment::Text(" holds.")]
        );
    }

    #[test]
    fn test_unterminated_inline() {
        let content = "$x^2 no close";
        assert_eq!(split_math(content), vec![Segment::Text(content)]);
    }

    #[test]
    fn test_unterminated_block() {
        let content = "$$x^2 no close";
        assert_eq!(split_math(content), vec![Segment::Text(content)]);
    }

    #[test]
    fn test_empty_delimiters_stay_literal() {
        assert_eq!(split_math("$$"), vec![Segment::Text("$$")]);
        assert_eq!(split_math("a $ b"), vec![Segment::Text("a $ b")]);
    }

    #[test]
    fn test_mixed_modes_scan_block_only() {
        assert_eq!(
            split_math("$x$ then $$y$$"),
            vec![Segment::Text("$x$ then "), block("y")]
        );
    }

    #[test]
    fn test_currency_pair_reads_as_math() {
        // No escaping: two prices form one inline span.
        assert_eq!(
            split_math("from $5 to $10"),
            vec![Segment::Text("from "), inline("5 to "), Segment::Text("10")]
        );
    }

    #[test]
    fn test_detect_mode() {
        assert_eq!(detect_mode("plain"), None);
        assert_eq!(detect_mode("$x$"), Some(MathMode::Inline));
        assert_eq!(detect_mode("$x$ $$y$$"), Some(MathMode::Block));
    }

    #[test]
    fn test_segment_accessors() {
        let segments = split_math("Area is $x^2$");
        assert!(!segments[0].is_math());
        assert!(segments[1].is_math());
        assert_eq!(segments[1].as_str(), "x^2");
    }
}
