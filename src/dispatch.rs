//! Tool dispatch.
//!
//! Resolves a tool name against the static catalog, runs its handler and
//! folds every handler outcome into a [`ToolResult`]. The only error that
//! crosses [`Dispatcher::dispatch`] is [`ToolError::UnknownTool`].

use crate::catalog::{self, ToolEntry};
use crate::error::ToolError;
use crate::tools::{ToolArgs, ToolContext};
use crate::types::ToolResult;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Routes tool calls to catalog handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    ctx: ToolContext,
}

impl Dispatcher {
    #[must_use]
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Runs the tool called `name` with `args`.
    ///
    /// Handler failures and panics are encoded as
    /// `❌ <LABEL> ERROR: <message>` text results.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] if `name` is not in the catalog.
    pub fn dispatch(&self, name: &str, args: &ToolArgs) -> Result<ToolResult, ToolError> {
        let Some(entry) = catalog::find(name) else {
            tracing::warn!("Unknown tool requested: {}", name);
            return Err(ToolError::UnknownTool {
                name: name.to_string(),
            });
        };

        tracing::info!("Calling tool {}", name);
        let start = Instant::now();
        let result = self.run(entry, args);
        tracing::debug!("Tool {} finished in {:?}", name, start.elapsed());

        Ok(result)
    }

    fn run(&self, entry: &ToolEntry, args: &ToolArgs) -> ToolResult {
        let label = entry.descriptor.error_label;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (entry.handler)(args, &self.ctx)))
            .unwrap_or_else(|payload| Err(ToolError::Panicked(panic_message(payload.as_ref()))));

        match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    "Tool {} failed [{}]: {}",
                    entry.descriptor.name,
                    e.code(),
                    e
                );
                ToolResult::failure(label, e)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
