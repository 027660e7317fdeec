//! Error types for codify-mcp.
//!
//! Uses thiserror for ergonomic error handling with proper
//! error chain propagation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the MCP client as protocol errors rather than tool text.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

/// Errors raised while resolving or executing a single tool call.
///
/// Only [`ToolError::UnknownTool`] ever leaves the dispatcher; every other
/// variant is folded into the text envelope of the call's result.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Missing required argument: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Handler panicked: {0}")]
    Panicked(String),
}

/// Pattern scanner errors.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },
}

/// Result type alias for tool handlers.
pub type HandlerResult<T> = std::result::Result<T, ToolError>;

/// Result type alias for scan operations.
pub type ScanResult<T> = std::result::Result<T, ScanError>;

// Error code implementations for machine-readable error responses
impl ToolError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool { .. } => "UNKNOWN_TOOL",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::InvalidArguments(_) => "INVALID_ARGUMENTS",
            Self::FileNotFound { .. } => "FILE_NOT_FOUND",
            Self::Io { .. } => "IO_ERROR",
            Self::Scan(e) => e.code(),
            Self::Panicked(_) => "HANDLER_PANIC",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl ScanError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidGlob { .. } => "INVALID_GLOB",
        }
    }
}

// Conversion to rmcp protocol errors
impl From<ServerError> for rmcp::ErrorData {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Tool(ToolError::UnknownTool { name }) => {
                rmcp::ErrorData::invalid_params(format!("Unknown tool: {name}"), None)
            }
            other => rmcp::ErrorData::internal_error(other.to_string(), None),
        }
    }
}
