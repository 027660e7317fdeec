//! Core services: glob resolution and marker scanning.

pub mod glob;
pub mod scanner;

pub use glob::{FileSelector, ScanConfig, DEFAULT_EXCLUDES};
pub use scanner::{annotate_line, scan, scan_with_config, ScanReport};
