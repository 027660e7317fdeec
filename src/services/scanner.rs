//! Marker-comment scanner.
//!
//! Resolves candidate files through a [`FileSelector`], reads each one as
//! UTF-8 text and extracts every `TODO`/`FIXME`/`HACK`/`NOTE`/`BUG`/`XXX`
//! occurrence (case-insensitive, whole word) line by line.
//!
//! Files are read sequentially. Unreadable or non-UTF-8 files are skipped and
//! only counted; they never fail a scan.

use crate::error::ScanResult;
use crate::services::glob::{FileSelector, ScanConfig};
use crate::types::{AnnotationRecord, MarkerKind};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Marker token followed by an optional run of `:`, `|` or whitespace.
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(TODO|FIXME|HACK|NOTE|BUG|XXX)\b[:|\s]*").expect("marker regex is valid")
});

/// Outcome of a scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Annotations in file order, then line order, then left to right.
    pub annotations: Vec<AnnotationRecord>,
    /// Number of candidate files resolved by the glob.
    pub files_scanned: usize,
    /// Candidates that could not be read as text.
    pub files_skipped: usize,
}

/// Scans `root` for marker comments in files matching `include` but none of `excludes`.
///
/// # Errors
///
/// Returns `ScanError::InvalidGlob` if any pattern fails to compile.
pub fn scan<S: AsRef<str>>(root: &Path, include: &str, excludes: &[S]) -> ScanResult<ScanReport> {
    scan_with_config(root, include, excludes, ScanConfig::default())
}

/// [`scan`] with explicit walk configuration.
///
/// # Errors
///
/// Returns `ScanError::InvalidGlob` if any pattern fails to compile.
pub fn scan_with_config<S: AsRef<str>>(
    root: &Path,
    include: &str,
    excludes: &[S],
    config: ScanConfig,
) -> ScanResult<ScanReport> {
    let selector = FileSelector::with_config(include, excludes, config)?;
    let files = selector.resolve(root);

    let mut report = ScanReport {
        files_scanned: files.len(),
        ..ScanReport::default()
    };

    for file in &files {
        let content = match fs::read_to_string(root.join(file)) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", file, e);
                report.files_skipped += 1;
                continue;
            }
        };

        for (index, line) in content.lines().enumerate() {
            annotate_line(file, index + 1, line, &mut report.annotations);
        }
    }

    Ok(report)
}

/// Appends one record per marker found on `line`.
///
/// Each marker's comment runs up to the start of the next marker, so
/// `TODO: a HACK: b` yields `a` and `b`.
pub fn annotate_line(file: &str, line_number: usize, line: &str, out: &mut Vec<AnnotationRecord>) {
    // (marker start, kind, comment start)
    let mut hits: Vec<(usize, MarkerKind, usize)> = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = MARKER.captures_at(line, cursor) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if let Ok(kind) = token.as_str().parse() {
            hits.push((token.start(), kind, whole.end()));
        }
        cursor = whole.end();
    }

    for (i, &(_, kind, comment_start)) in hits.iter().enumerate() {
        let comment_end = hits.get(i + 1).map_or(line.len(), |next| next.0);
        out.push(AnnotationRecord {
            file: file.to_string(),
            line: line_number,
            kind,
            comment: line[comment_start..comment_end].trim().to_string(),
            raw_line: line.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotate(line: &str) -> Vec<AnnotationRecord> {
        let mut out = Vec::new();
        annotate_line("f.js", 7, line, &mut out);
        out
    }

    #[test]
    fn test_colon_and_space_separators() {
        let records = annotate("// TODO: fix this");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, MarkerKind::Todo);
        assert_eq!(records[0].comment, "fix this");
        assert_eq!(records[0].line, 7);

        let records = annotate("// FIXME implement");
        assert_eq!(records[0].kind, MarkerKind::Fixme);
        assert_eq!(records[0].comment, "implement");
    }

    #[test]
    fn test_every_marker_on_a_line_is_extracted() {
        let records = annotate("// TODO: a HACK: b");
        let pairs: Vec<_> = records
            .iter()
            .map(|r| (r.kind, r.comment.as_str(), r.line))
            .collect();
        assert_eq!(
            pairs,
            vec![(MarkerKind::Todo, "a", 7), (MarkerKind::Hack, "b", 7)]
        );
    }

    #[test]
    fn test_adjacent_markers_leave_empty_comment() {
        let records = annotate("# XXX FIXME: later");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, MarkerKind::Xxx);
        assert_eq!(records[0].comment, "");
        assert_eq!(records[0].display_text(), "# XXX FIXME: later");
        assert_eq!(records[1].comment, "later");
    }

    #[test]
    fn test_case_insensitive_kind_is_normalized() {
        let records = annotate("/* note: cache is per process */");
        assert_eq!(records[0].kind, MarkerKind::Note);
        assert_eq!(records[0].comment, "cache is per process */");
    }

    #[test]
    fn test_marker_at_end_of_line() {
        let records = annotate("    return x; // BUG");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].comment, "");
        assert_eq!(records[0].display_text(), "return x; // BUG");
    }

    #[test]
    fn test_marker_inside_identifier_is_ignored() {
        assert!(annotate("log::debug!(\"denoted\");").is_empty());
        assert!(annotate("let todos = vec![];").is_empty());
    }

    #[test]
    fn test_marker_must_be_a_whole_word() {
        for line in [
            "// NOTES: x",
            "// TODOs for later",
            "// BUGFIX: handled upstream",
            "// TODO_later cleanup",
        ] {
            assert!(annotate(line).is_empty(), "{line}");
        }
        assert_eq!(annotate("// NOTE: x")[0].kind, MarkerKind::Note);
    }

    #[test]
    fn test_pipe_separator_is_consumed() {
        let records = annotate("// HACK | temporary");
        assert_eq!(records[0].comment, "temporary");
    }
}
