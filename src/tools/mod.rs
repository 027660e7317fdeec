//! MCP tool implementations.
//!
//! Each submodule exports `const` descriptors and `execute_*` handlers that
//! [`crate::catalog`] wires together. Handlers are plain functions of their
//! arguments, the [`ToolContext`] and the filesystem; they keep no state.

pub mod codify;
pub mod prd;
pub mod review;
pub mod todos;

use crate::catalog::ToolDescriptor;
use crate::error::{HandlerResult, ToolError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw tool arguments as received from the caller.
pub type ToolArgs = serde_json::Map<String, Value>;

/// Read-only configuration shared by all handlers.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Project root used when a call omits `projectRoot`.
    pub default_root: PathBuf,
}

impl ToolContext {
    #[must_use]
    pub fn new(default_root: PathBuf) -> Self {
        Self { default_root }
    }

    /// Context rooted at the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the working directory cannot be determined.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The caller's `projectRoot`, or the default root when absent or empty.
    #[must_use]
    pub fn project_root(&self, requested: Option<&str>) -> PathBuf {
        match requested {
            Some(root) if !root.is_empty() => PathBuf::from(root),
            _ => self.default_root.clone(),
        }
    }
}

/// Checks required fields against `descriptor`, then decodes `args` into `T`.
///
/// A required field that is absent or `null` yields `MissingField`; a value of
/// the wrong shape yields `InvalidArguments`. Undeclared fields are ignored.
pub(crate) fn parse_args<T: DeserializeOwned>(
    descriptor: &ToolDescriptor,
    args: &ToolArgs,
) -> HandlerResult<T> {
    for field in descriptor.required_fields() {
        if args.get(field.name).is_none_or(Value::is_null) {
            return Err(ToolError::MissingField { field: field.name });
        }
    }

    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Treats an empty optional string as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// A source file loaded for one of the single-file prompt tools.
#[derive(Debug, Clone)]
pub(crate) struct SourceFile {
    /// Last path component.
    pub file_name: String,
    /// Text after the last `.` of the file name (the whole name if it has none).
    pub extension: String,
    pub content: String,
}

impl SourceFile {
    /// Loads `path`, decoding its bytes as UTF-8 lossily.
    ///
    /// # Errors
    ///
    /// `FileNotFound` if `path` is not an existing regular file, `Io` if it
    /// cannot be read.
    pub fn load(path: &str) -> HandlerResult<Self> {
        let full = Path::new(path);
        if !full.is_file() {
            return Err(ToolError::FileNotFound {
                path: full.to_path_buf(),
            });
        }

        let bytes = fs::read(full).map_err(|e| ToolError::io(full, e))?;
        let file_name = full
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());
        let extension = file_name
            .rsplit('.')
            .next()
            .unwrap_or(file_name.as_str())
            .to_string();

        Ok(Self {
            file_name,
            extension,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Upper-cased extension, used to name the language in prompts.
    #[must_use]
    pub fn language(&self) -> String {
        self.extension.to_uppercase()
    }
}

/// Today's date (UTC) as `YYYY-MM-DD`.
pub(crate) fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Creates `dir` (and parents) if it does not exist.
pub(crate) fn ensure_dir(dir: &Path) -> HandlerResult<()> {
    fs::create_dir_all(dir).map_err(|e| ToolError::io(dir, e))
}
