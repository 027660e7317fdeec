//! Common test utilities for codify-mcp integration tests.
//!
//! Provides `TestEnv` for setting up an isolated project directory with a
//! dispatcher rooted at it.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use codify_mcp::{Dispatcher, ToolArgs, ToolContext, ToolResult};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary project plus a dispatcher whose default root is that project.
pub struct TestEnv {
    pub dir: TempDir,
    pub dispatcher: Dispatcher,
}

impl TestEnv {
    /// Creates a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let dispatcher = Dispatcher::new(ToolContext::new(dir.path().to_path_buf()));
        Self { dir, dispatcher }
    }

    /// Writes a file to the test directory.
    pub fn write_file(&self, name: &str, content: impl AsRef<[u8]>) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write test file");
    }

    /// Gets the full path to a file in the test directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Full path as a string, for `filePath`/`projectRoot` arguments.
    pub fn path_str(&self, name: &str) -> String {
        self.path(name).to_string_lossy().into_owned()
    }

    /// The project root as a string.
    pub fn root_str(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Dispatches a catalog tool; panics on `UnknownTool`.
    pub fn call(&self, tool: &str, args: Value) -> ToolResult {
        self.dispatcher
            .dispatch(tool, &to_args(args))
            .expect("tool should be in the catalog")
    }

    /// Dispatches a catalog tool and returns the text of its single block.
    pub fn call_text(&self, tool: &str, args: Value) -> String {
        let result = self.call(tool, args);
        assert_eq!(result.content.len(), 1, "{tool} must return one block");
        result.first_text().to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a `json!({...})` literal to tool arguments.
pub fn to_args(value: Value) -> ToolArgs {
    match value {
        Value::Object(map) => map,
        other => panic!("tool arguments must be an object, got {other}"),
    }
}

/// A small mixed-language project with marker comments.
pub fn annotated_project() -> TestEnv {
    let env = TestEnv::new();

    env.write_file(
        "src/app.js",
        "// TODO: add auth\nconst x = 1;\n// FIXME broken edge case\n",
    );
    env.write_file(
        "src/util.py",
        "def f():\n    pass  # HACK: temporary\n# NOTE: keep sorted\n",
    );
    env.write_file("README.md", "# Demo\n\nXXX review wording\n");
    env.write_file("node_modules/lib/index.js", "// TODO: vendored, never reported\n");
    env.write_file("build/out.js", "// BUG: generated\n");
    env.write_file("src/main.rs", "// TODO: not matched by the default pattern\n");

    env
}
