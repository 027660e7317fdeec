//! Core data types shared by the dispatcher, handlers and scanner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leading glyph of every failure envelope. Callers tell success from
/// failure by inspecting it.
pub const ERROR_GLYPH: &str = "❌";

/// Leading glyph of confirmation messages from the write-to-disk tools.
pub const SUCCESS_GLYPH: &str = "✅";

/// One block of a tool result. Only text blocks exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Uniform result envelope returned by every tool call.
///
/// `content` is never empty: both constructors produce exactly one block.
/// `is_error` is internal bookkeeping; it is not part of the wire format,
/// where failures are only distinguishable by [`ERROR_GLYPH`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(skip)]
    pub is_error: bool,
}

impl ToolResult {
    /// A successful result holding a single text block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: false,
        }
    }

    /// A failure encoded as `❌ <LABEL> ERROR: <message>`.
    #[must_use]
    pub fn failure(label: &str, message: impl fmt::Display) -> Self {
        Self {
            content: vec![ContentBlock::text(format!(
                "{ERROR_GLYPH} {label} ERROR: {message}"
            ))],
            is_error: true,
        }
    }

    /// Text of the first block.
    #[must_use]
    pub fn first_text(&self) -> &str {
        self.content.first().map_or("", ContentBlock::as_text)
    }

    /// Whether the envelope encodes a failure, judged by its leading glyph.
    #[must_use]
    pub fn is_failure_text(&self) -> bool {
        self.first_text().starts_with(ERROR_GLYPH)
    }
}

/// Marker token recognised by the pattern scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkerKind {
    Todo,
    Fixme,
    Hack,
    Note,
    Bug,
    Xxx,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 6] = [
        Self::Todo,
        Self::Fixme,
        Self::Hack,
        Self::Note,
        Self::Bug,
        Self::Xxx,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Fixme => "FIXME",
            Self::Hack => "HACK",
            Self::Note => "NOTE",
            Self::Bug => "BUG",
            Self::Xxx => "XXX",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MarkerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown marker: {s}"))
    }
}

/// A single marker occurrence found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationRecord {
    /// Path relative to the scan root, `/`-separated.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    pub kind: MarkerKind,
    /// Trimmed text following the marker, up to the next marker on the line.
    pub comment: String,
    pub raw_line: String,
}

impl AnnotationRecord {
    /// The comment, or the trimmed raw line when the marker had no trailing text.
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.comment.is_empty() {
            self.raw_line.trim()
        } else {
            &self.comment
        }
    }
}

// Compile-time assertions for thread safety.
#[cfg(test)]
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<ToolResult>();
    assert_send_sync::<AnnotationRecord>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope_format() {
        let result = ToolResult::failure("TODO SCAN", "boom");
        assert_eq!(result.content.len(), 1);
        assert_eq!(result.first_text(), "❌ TODO SCAN ERROR: boom");
        assert!(result.is_error);
        assert!(result.is_failure_text());
    }

    #[test]
    fn test_content_block_serializes_with_type_tag() {
        let json = serde_json::to_value(ToolResult::text("hi")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "content": [{ "type": "text", "text": "hi" }] })
        );
    }

    #[test]
    fn test_marker_kind_parse_case_insensitive() {
        assert_eq!("fixme".parse::<MarkerKind>().unwrap(), MarkerKind::Fixme);
        assert_eq!("Xxx".parse::<MarkerKind>().unwrap(), MarkerKind::Xxx);
        assert!("later".parse::<MarkerKind>().is_err());
    }

    #[test]
    fn test_display_text_falls_back_to_raw_line() {
        let record = AnnotationRecord {
            file: "a.js".into(),
            line: 3,
            kind: MarkerKind::Todo,
            comment: String::new(),
            raw_line: "   // TODO   ".into(),
        };
        assert_eq!(record.display_text(), "// TODO");
    }
}
