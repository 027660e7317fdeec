//! Human-friendly CLI output formatters.
//!
//! Each `fmt_*` function formats one command's output for terminal display.
//! When `color` is true, ANSI escape codes are emitted via `owo_colors`.

use crate::catalog::{FieldDefault, ToolDescriptor};
use crate::services::ScanReport;
use crate::types::{MarkerKind, ToolResult};
use owo_colors::OwoColorize;
use std::io::{self, Write};

// ── tools ───────────────────────────────────────────────────────────────────

fn default_label(default: FieldDefault) -> Option<String> {
    match default {
        FieldDefault::None => None,
        FieldDefault::Str(s) => Some(format!("\"{s}\"")),
        FieldDefault::Integer(n) => Some(n.to_string()),
        FieldDefault::Bool(b) => Some(b.to_string()),
        FieldDefault::Dynamic(doc) => Some(format!("<{doc}>")),
    }
}

pub fn fmt_tools<'a>(
    w: &mut impl Write,
    tools: impl IntoIterator<Item = &'a ToolDescriptor>,
    color: bool,
) -> io::Result<()> {
    for (i, tool) in tools.into_iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        if color {
            writeln!(w, "{}  {}", tool.name.bold(), tool.description.dimmed())?;
        } else {
            writeln!(w, "{}  {}", tool.name, tool.description)?;
        }

        for field in tool.fields {
            let flag = if field.required { "required" } else { "optional" };
            let default = default_label(field.default)
                .map(|d| format!(" = {d}"))
                .unwrap_or_default();

            if color {
                let flag = if field.required {
                    flag.yellow().to_string()
                } else {
                    flag.dimmed().to_string()
                };
                writeln!(
                    w,
                    "  {:<24} {:<8} {}{}",
                    field.name.cyan(),
                    field.kind.json_type(),
                    flag,
                    default
                )?;
            } else {
                writeln!(
                    w,
                    "  {:<24} {:<8} {}{}",
                    field.name,
                    field.kind.json_type(),
                    flag,
                    default
                )?;
            }
        }
    }

    Ok(())
}

// ── todos ───────────────────────────────────────────────────────────────────

pub fn fmt_todos(w: &mut impl Write, report: &ScanReport, color: bool) -> io::Result<()> {
    let mut current_file = "";

    for a in &report.annotations {
        // Group header when file changes
        if a.file != current_file {
            if !current_file.is_empty() {
                writeln!(w)?;
            }
            if color {
                writeln!(w, "{}", a.file.bold())?;
            } else {
                writeln!(w, "{}", a.file)?;
            }
            current_file = &a.file;
        }

        if color {
            let kind = format!("{:<6}", a.kind.as_str());
            let kind = match a.kind {
                MarkerKind::Fixme | MarkerKind::Bug => kind.red().to_string(),
                MarkerKind::Hack | MarkerKind::Xxx => kind.yellow().to_string(),
                MarkerKind::Todo => kind.blue().to_string(),
                MarkerKind::Note => kind.green().to_string(),
            };
            writeln!(
                w,
                "  {} {}{}",
                kind,
                format_args!("{:>5}│ ", a.line).dimmed(),
                a.display_text()
            )?;
        } else {
            writeln!(w, "  {:<6} {:>5}│ {}", a.kind, a.line, a.display_text())?;
        }
    }

    if !report.annotations.is_empty() {
        writeln!(w)?;
    }
    let footer = format!(
        "{} items across {} files ({} skipped)",
        report.annotations.len(),
        report.files_scanned,
        report.files_skipped
    );
    if color {
        writeln!(w, "{}", footer.dimmed())?;
    } else {
        writeln!(w, "{footer}")?;
    }

    Ok(())
}

// ── call ────────────────────────────────────────────────────────────────────

pub fn fmt_result(w: &mut impl Write, result: &ToolResult, color: bool) -> io::Result<()> {
    for block in &result.content {
        if color && result.is_error {
            writeln!(w, "{}", block.as_text().red())?;
        } else {
            writeln!(w, "{}", block.as_text())?;
        }
    }
    Ok(())
}
