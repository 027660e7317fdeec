//! Pattern codification tools.
//!
//! `codify` wraps a source file in an extraction prompt; the caller's model
//! analyses it and hands the findings back to `write_codified_patterns`,
//! which appends them to `.github/copilot-instructions.md`.

use super::{ensure_dir, non_empty, parse_args, today, SourceFile, ToolArgs, ToolContext};
use crate::catalog::{FieldDefault, FieldSpec, ToolDescriptor};
use crate::error::{HandlerResult, ToolError};
use crate::templates;
use crate::types::{ToolResult, SUCCESS_GLYPH};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Instructions file location, relative to the project root.
pub const INSTRUCTIONS_DIR: &str = ".github";
pub const INSTRUCTIONS_FILE: &str = "copilot-instructions.md";

pub const CODIFY: ToolDescriptor = ToolDescriptor {
    name: "codify",
    description: "Read a file and return its content for AI analysis and codification of patterns/practices",
    fields: &[
        FieldSpec::string("filePath", "Path to the file to analyze").required(),
        FieldSpec::string(
            "analysisPrompt",
            "Optional: Specific analysis instructions (defaults to general pattern extraction)",
        )
        .with_default(FieldDefault::Dynamic("general pattern-extraction prompt")),
    ],
    error_label: "CODIFY",
};

pub const WRITE_CODIFIED_PATTERNS: ToolDescriptor = ToolDescriptor {
    name: "write_codified_patterns",
    description: "Write analyzed patterns and practices to .github/copilot-instructions.md (GitHub Copilot standard location)",
    fields: &[
        FieldSpec::string(
            "patterns",
            "The analyzed patterns and practices in markdown format",
        )
        .required(),
        FieldSpec::string("fileName", "Name of the file that was analyzed").required(),
        FieldSpec::string("projectRoot", "Root directory of the project (optional)")
            .with_default(FieldDefault::Dynamic("current working directory")),
    ],
    error_label: "WRITE",
};

/// Input for the codify tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodifyInput {
    pub file_path: String,
    #[serde(default)]
    pub analysis_prompt: Option<String>,
}

/// Input for the write_codified_patterns tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritePatternsInput {
    pub patterns: String,
    pub file_name: String,
    #[serde(default)]
    pub project_root: Option<String>,
}

/// Executes the codify tool.
///
/// # Errors
///
/// Missing `filePath`, a path that is not a readable file, or a read failure.
pub fn execute_codify(args: &ToolArgs, _ctx: &ToolContext) -> HandlerResult<ToolResult> {
    let input: CodifyInput = parse_args(&CODIFY, args)?;
    let source = SourceFile::load(&input.file_path)?;

    let prompt = non_empty(input.analysis_prompt).unwrap_or_else(|| {
        templates::CODIFY_DEFAULT_PROMPT.render(&[
            ("language", &source.language()),
            ("file_name", &source.file_name),
        ])
    });

    Ok(ToolResult::text(templates::CODIFY.render(&[
        ("prompt", &prompt),
        ("extension", &source.extension),
        ("content", &source.content),
    ])))
}

/// Executes the write_codified_patterns tool.
///
/// # Errors
///
/// Missing `patterns`/`fileName`, or a failure creating or writing the
/// instructions file.
pub fn execute_write_patterns(args: &ToolArgs, ctx: &ToolContext) -> HandlerResult<ToolResult> {
    let input: WritePatternsInput = parse_args(&WRITE_CODIFIED_PATTERNS, args)?;
    let root = ctx.project_root(input.project_root.as_deref());
    let path = append_patterns(&root, &input.file_name, &input.patterns, &today())?;

    tracing::info!("Appended patterns for {} to {}", input.file_name, path.display());

    Ok(ToolResult::text(format!(
        "{SUCCESS_GLYPH} CODIFIED: Successfully analyzed {} and updated {INSTRUCTIONS_DIR}/{INSTRUCTIONS_FILE} with AI-extracted patterns and practices.",
        input.file_name
    )))
}

/// Appends a dated section to the instructions file under `root`, writing the
/// fixed header first when the file is missing or blank. Returns the file path.
fn append_patterns(
    root: &Path,
    file_name: &str,
    patterns: &str,
    date: &str,
) -> HandlerResult<std::path::PathBuf> {
    let dir = root.join(INSTRUCTIONS_DIR);
    ensure_dir(&dir)?;
    let path = dir.join(INSTRUCTIONS_FILE);

    let mut document = if path.exists() {
        fs::read_to_string(&path).map_err(|e| ToolError::io(&path, e))?
    } else {
        String::new()
    };

    if document.trim().is_empty() {
        document = templates::INSTRUCTIONS_HEADER.render(&[]);
    }

    document.push_str(&templates::INSTRUCTIONS_SECTION.render(&[
        ("file_name", file_name),
        ("date", date),
        ("patterns", patterns),
    ]));

    fs::write(&path, document).map_err(|e| ToolError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_header_once() {
        let dir = TempDir::new().unwrap();

        append_patterns(dir.path(), "a.rs", "- use thiserror", "2026-01-02").unwrap();
        let path = append_patterns(dir.path(), "b.rs", "- log to stderr", "2026-01-03").unwrap();

        let document = fs::read_to_string(path).unwrap();
        assert!(document.starts_with("# GitHub Copilot Instructions\n"));
        assert_eq!(document.matches("# GitHub Copilot Instructions").count(), 1);
        assert!(document.contains("\n## Analysis of a.rs (2026-01-02)\n\n- use thiserror\n\n---\n"));
        assert!(document.ends_with("## Analysis of b.rs (2026-01-03)\n\n- log to stderr\n\n---\n\n"));
        assert!(document.find("a.rs").unwrap() < document.find("b.rs").unwrap());
    }

    #[test]
    fn test_blank_existing_file_gets_header() {
        let dir = TempDir::new().unwrap();
        let github = dir.path().join(INSTRUCTIONS_DIR);
        fs::create_dir_all(&github).unwrap();
        fs::write(github.join(INSTRUCTIONS_FILE), "  \n\n").unwrap();

        let path = append_patterns(dir.path(), "x.py", "body", "2026-05-06").unwrap();
        let document = fs::read_to_string(path).unwrap();
        assert!(document.starts_with("# GitHub Copilot Instructions"));
    }

    #[test]
    fn test_existing_content_is_preserved() {
        let dir = TempDir::new().unwrap();
        let github = dir.path().join(INSTRUCTIONS_DIR);
        fs::create_dir_all(&github).unwrap();
        fs::write(github.join(INSTRUCTIONS_FILE), "# Team rules\n").unwrap();

        let path = append_patterns(dir.path(), "x.py", "body", "2026-05-06").unwrap();
        let document = fs::read_to_string(path).unwrap();
        assert!(document.starts_with("# Team rules\n\n## Analysis of x.py (2026-05-06)"));
        assert!(!document.contains("GitHub Copilot Instructions"));
    }
}
