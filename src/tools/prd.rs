//! Project requirements document tools.
//!
//! `generate_prd` returns a PRD-writing prompt and the path the document will
//! land at; `save_prd` writes the caller's finished document there.

use super::{ensure_dir, non_empty, parse_args, today, ToolArgs, ToolContext};
use crate::catalog::{FieldDefault, FieldSpec, ToolDescriptor};
use crate::error::{HandlerResult, ToolError};
use crate::templates;
use crate::types::{ToolResult, SUCCESS_GLYPH};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the project root that receives PRDs.
pub const DOCS_DIR: &str = "docs";

pub const GENERATE_PRD: ToolDescriptor = ToolDescriptor {
    name: "generate_prd",
    description: "Generate a comprehensive Project Requirements Document using industry-standard template and output to /docs folder",
    fields: &[
        FieldSpec::string("projectName", "Name of the project for the PRD").required(),
        FieldSpec::string(
            "projectDescription",
            "Brief description of what the project does",
        )
        .required(),
        FieldSpec::string(
            "projectRoot",
            "Root directory of the project (defaults to current directory)",
        )
        .with_default(FieldDefault::Dynamic("current working directory")),
        FieldSpec::string(
            "customRequirements",
            "Optional: Additional specific requirements or context for the project",
        ),
    ],
    error_label: "PRD GENERATION",
};

pub const SAVE_PRD: ToolDescriptor = ToolDescriptor {
    name: "save_prd",
    description: "Save generated PRD content to /docs folder",
    fields: &[
        FieldSpec::string("prdContent", "The complete PRD content in Markdown format").required(),
        FieldSpec::string("projectName", "Name of the project (used for filename)").required(),
        FieldSpec::string("projectRoot", "Root directory of the project (optional)")
            .with_default(FieldDefault::Dynamic("current working directory")),
    ],
    error_label: "PRD SAVE",
};

/// Input for the generate_prd tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePrdInput {
    pub project_name: String,
    pub project_description: String,
    #[serde(default)]
    pub project_root: Option<String>,
    #[serde(default)]
    pub custom_requirements: Option<String>,
}

/// Input for the save_prd tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePrdInput {
    pub prd_content: String,
    pub project_name: String,
    #[serde(default)]
    pub project_root: Option<String>,
}

/// Executes the generate_prd tool. Creates `docs/` so the follow-up save
/// cannot fail on a missing directory.
///
/// # Errors
///
/// Missing name/description, or a failure creating the docs directory.
pub fn execute_generate_prd(args: &ToolArgs, ctx: &ToolContext) -> HandlerResult<ToolResult> {
    let input: GeneratePrdInput = parse_args(&GENERATE_PRD, args)?;
    let docs = ctx.project_root(input.project_root.as_deref()).join(DOCS_DIR);
    ensure_dir(&docs)?;

    let date = today();
    let prd_path = docs.join(format!("prd-{date}.md"));
    let custom = non_empty(input.custom_requirements)
        .map(|r| format!("**Additional Requirements**: {r}"))
        .unwrap_or_default();

    let prompt = templates::PRD_PROMPT.render(&[
        ("project_name", &input.project_name),
        ("project_description", &input.project_description),
        ("custom_requirements", &custom),
        ("date", &date),
    ]);

    Ok(ToolResult::text(templates::PRD_GENERATE.render(&[
        ("prompt", &prompt),
        ("prd_path", &prd_path.display().to_string()),
    ])))
}

/// Executes the save_prd tool. An existing file for the same name and day is
/// overwritten.
///
/// # Errors
///
/// Missing content/name, or a failure creating the directory or file.
pub fn execute_save_prd(args: &ToolArgs, ctx: &ToolContext) -> HandlerResult<ToolResult> {
    let input: SavePrdInput = parse_args(&SAVE_PRD, args)?;
    let root = ctx.project_root(input.project_root.as_deref());
    let path = write_prd(&root, &input.project_name, &input.prd_content, &today())?;

    tracing::info!("Saved PRD for {} to {}", input.project_name, path.display());

    let body = templates::PRD_SAVED.render(&[("prd_path", &path.display().to_string())]);
    Ok(ToolResult::text(format!("{SUCCESS_GLYPH} PRD SAVED: {body}")))
}

/// Lowercases `name` and replaces every character outside `[a-z0-9]` with `-`.
#[must_use]
pub fn sanitize_project_name(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect()
}

fn write_prd(root: &Path, project_name: &str, content: &str, date: &str) -> HandlerResult<PathBuf> {
    let docs = root.join(DOCS_DIR);
    ensure_dir(&docs)?;

    let path = docs.join(format!("prd-{}-{date}.md", sanitize_project_name(project_name)));
    fs::write(&path, content).map_err(|e| ToolError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_project_name() {
        assert_eq!(sanitize_project_name("My App 2.0"), "my-app-2-0");
        assert_eq!(sanitize_project_name("already-fine"), "already-fine");
        assert_eq!(sanitize_project_name("Café"), "caf-");
        assert_eq!(sanitize_project_name(""), "");
    }

    #[test]
    fn test_write_prd_creates_docs_and_overwrites() {
        let dir = TempDir::new().unwrap();

        let first = write_prd(dir.path(), "Demo App", "v1", "2026-02-03").unwrap();
        let second = write_prd(dir.path(), "Demo App", "v2", "2026-02-03").unwrap();

        assert_eq!(first, second);
        assert_eq!(first, dir.path().join("docs").join("prd-demo-app-2026-02-03.md"));
        assert_eq!(fs::read_to_string(first).unwrap(), "v2");
    }

    #[test]
    fn test_write_prd_fails_when_docs_is_a_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DOCS_DIR), "not a directory").unwrap();

        let err = write_prd(dir.path(), "x", "body", "2026-02-03").unwrap_err();
        assert_eq!(err.code(), "IO_ERROR");
    }
}
