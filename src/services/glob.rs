//! Include/exclude glob resolution over a directory tree.
//!
//! Walks the root with `ignore::WalkBuilder` (sequentially, sorted by file
//! name) and keeps every file (or symlink to one) whose root-relative path matches the
//! include glob and none of the exclude globs. Globs support `*`, `**`, `?`,
//! character classes and `{a,b}` alternation; `*` never crosses a `/`.

use crate::error::{ScanError, ScanResult};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Directory trees that are never scanned: version control metadata,
/// dependency caches and build output.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/node_modules/**",
    "**/.git/**",
    "**/dist/**",
    "**/build/**",
];

/// Walk behaviour for candidate resolution.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Match dot-files and descend into dot-directories
    pub include_hidden: bool,
    /// Descend into symlinked directories. Symlinked files are always candidates.
    pub follow_symlinks: bool,
    /// Honour `.gitignore` / `.ignore` files
    pub respect_gitignore: bool,
}

/// A compiled include pattern plus exclude set.
#[derive(Debug, Clone)]
pub struct FileSelector {
    include: globset::GlobMatcher,
    exclude: GlobSet,
    config: ScanConfig,
}

impl FileSelector {
    /// Compiles `include` and `excludes`.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidGlob` naming the first pattern that fails to parse.
    pub fn new<S: AsRef<str>>(include: &str, excludes: &[S]) -> ScanResult<Self> {
        Self::with_config(include, excludes, ScanConfig::default())
    }

    /// Like [`FileSelector::new`] with explicit walk configuration.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidGlob` naming the first pattern that fails to parse.
    pub fn with_config<S: AsRef<str>>(
        include: &str,
        excludes: &[S],
        config: ScanConfig,
    ) -> ScanResult<Self> {
        let include = compile(include)?.compile_matcher();

        let mut builder = GlobSetBuilder::new();
        for pattern in excludes {
            builder.add(compile(pattern.as_ref())?);
        }
        let exclude = builder.build().map_err(|e| ScanError::InvalidGlob {
            pattern: excludes
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", "),
            reason: e.to_string(),
        })?;

        Ok(Self {
            include,
            exclude,
            config,
        })
    }

    /// Whether a root-relative, `/`-separated path is selected.
    #[must_use]
    pub fn is_selected(&self, relative: &str) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }

    /// Resolves the selector against `root`, returning relative paths in walk order.
    ///
    /// A root that does not exist resolves to nothing. Walk errors on
    /// individual entries are skipped.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> Vec<String> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .hidden(!self.config.include_hidden)
            .follow_links(self.config.follow_symlinks)
            .git_ignore(self.config.respect_gitignore)
            .git_exclude(self.config.respect_gitignore)
            .ignore(self.config.respect_gitignore)
            .parents(self.config.respect_gitignore)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker.filter_map(Result::ok) {
            if !is_candidate(&entry) {
                continue;
            }

            let Some(relative) = relative_path(root, entry.path()) else {
                continue;
            };

            if self.is_selected(&relative) {
                files.push(relative);
            }
        }

        tracing::debug!(
            "Resolved {} candidate files under {}",
            files.len(),
            root.display()
        );
        files
    }
}

/// Regular files, plus symlinks that resolve to one. Symlinked directories
/// are only descended when `follow_symlinks` is set.
fn is_candidate(entry: &ignore::DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        Some(ft) if ft.is_symlink() => entry.path().is_file(),
        _ => false,
    }
}

fn compile(pattern: &str) -> ScanResult<Glob> {
    let trimmed = pattern.trim();
    let normalized = trimmed.strip_prefix("./").unwrap_or(trimmed);
    GlobBuilder::new(normalized)
        .literal_separator(true)
        .build()
        .map_err(|e| ScanError::InvalidGlob {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })
}

/// Root-relative path with `/` separators, or `None` for the root itself.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative: PathBuf = path.strip_prefix(root).ok()?.to_path_buf();
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}
