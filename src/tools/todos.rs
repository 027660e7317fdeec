//! Marker-comment inventory tool.

use super::{parse_args, ToolArgs, ToolContext};
use crate::catalog::{FieldDefault, FieldSpec, ToolDescriptor};
use crate::error::HandlerResult;
use crate::services::{scanner, ScanReport, DEFAULT_EXCLUDES};
use crate::templates;
use crate::types::ToolResult;
use serde::Deserialize;

/// Include glob used when the caller gives none.
pub const DEFAULT_FILE_PATTERN: &str = "**/*.{js,ts,jsx,tsx,md,py,java,c,cpp,h}";

pub const FIND_TODOS: ToolDescriptor = ToolDescriptor {
    name: "find_todos",
    description: "Scan codebase for TODO, FIXME, HACK comments and prioritize them",
    fields: &[
        FieldSpec::string(
            "projectRoot",
            "Root directory to scan (defaults to current directory)",
        )
        .with_default(FieldDefault::Dynamic("current working directory")),
        FieldSpec::string(
            "filePattern",
            "Glob pattern for files to scan (defaults to \"**/*.{js,ts,jsx,tsx,md,py,java,c,cpp,h}\")",
        )
        .with_default(FieldDefault::Str(DEFAULT_FILE_PATTERN)),
        FieldSpec::string_list(
            "excludePatterns",
            "Extra glob patterns to skip, added to node_modules, .git, dist and build",
        ),
    ],
    error_label: "TODO SCAN",
};

/// Input for the find_todos tool.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindTodosInput {
    #[serde(default)]
    pub project_root: Option<String>,
    #[serde(default)]
    pub file_pattern: Option<String>,
    #[serde(default)]
    pub exclude_patterns: Option<Vec<String>>,
}

impl FindTodosInput {
    fn file_pattern(&self) -> &str {
        match self.file_pattern.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_FILE_PATTERN,
        }
    }

    /// Default excludes followed by the caller's extras.
    fn excludes(&self) -> Vec<String> {
        DEFAULT_EXCLUDES
            .iter()
            .map(|s| (*s).to_string())
            .chain(self.exclude_patterns.iter().flatten().cloned())
            .collect()
    }
}

/// Executes the find_todos tool.
///
/// # Errors
///
/// Returns `ToolError::Scan` when a glob fails to compile.
pub fn execute_find_todos(args: &ToolArgs, ctx: &ToolContext) -> HandlerResult<ToolResult> {
    let input: FindTodosInput = parse_args(&FIND_TODOS, args)?;
    let root = ctx.project_root(input.project_root.as_deref());
    let report = scanner::scan(&root, input.file_pattern(), &input.excludes())?;

    tracing::debug!(
        "Found {} annotations in {} files ({} skipped)",
        report.annotations.len(),
        report.files_scanned,
        report.files_skipped
    );

    Ok(ToolResult::text(render_report(&report)))
}

/// One `**KIND** in `file:line` - text` line per annotation.
#[must_use]
pub fn summary_lines(report: &ScanReport) -> String {
    report
        .annotations
        .iter()
        .map(|a| {
            format!(
                "**{}** in `{}:{}` - {}",
                a.kind,
                a.file,
                a.line,
                a.display_text()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_report(report: &ScanReport) -> String {
    templates::TODO_ANALYSIS.render(&[
        ("item_count", &report.annotations.len().to_string()),
        ("file_count", &report.files_scanned.to_string()),
        ("summary", &summary_lines(report)),
    ])
}
