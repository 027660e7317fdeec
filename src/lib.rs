//! codify-mcp: MCP server that turns source files into review prompts.
//!
//! This library exposes a fixed catalog of eight tools that read project
//! files and wrap their literal content in structured prompts for an external
//! model. It never analyses code itself:
//! - Pattern extraction into `.github/copilot-instructions.md`
//! - Code roasts, bug prediction and complexity review of single files
//! - TODO/FIXME/HACK/NOTE/BUG/XXX inventories across a project
//! - PRD drafting and saving under `docs/`
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              MCP Server (rmcp)              │
//! │         JSON-RPC over stdin/stdout          │
//! └─────────────────┬───────────────────────────┘
//!                   │ spawn_blocking
//! ┌─────────────────▼───────────────────────────┐
//! │                Dispatcher                    │
//! │   catalog lookup, panic capture, envelopes   │
//! └─────────────────┬───────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────┐
//! │               Tool handlers                  │
//! │  codify, review, todos, prd  +  templates    │
//! └───────────────────────┬─────────────────────┘
//!                         │
//!                  ┌──────▼──────┐
//!                  │   Scanner   │
//!                  │ globset +   │
//!                  │ ignore walk │
//!                  └─────────────┘
//! ```

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod fmt;
pub mod server;
pub mod services;
pub mod templates;
pub mod tools;
pub mod types;

pub use dispatch::Dispatcher;
pub use error::{ServerError, ToolError};
pub use server::CodifyServer;
pub use tools::{ToolArgs, ToolContext};
pub use types::{AnnotationRecord, MarkerKind, ToolResult};
