//! Directory traversal for project description files.
//!
//! This module walks directory trees depth-first and collects every regular
//! file whose extension is in the allow-list. Dependency caches and build
//! output directories are pruned by name before they are entered, so nothing
//! below them is ever visited.
//!
//! Any traversal error (an unreadable root, a permission-denied
//! subdirectory, an entry that vanishes mid-walk) aborts the whole scan.
//! Partial candidate lists are never returned.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use walkdir::{DirEntry, WalkDir};

use crate::{config::ScanOptions, error::ScanError};

/// Directory scanner for project description files.
#[derive(Debug)]
pub struct Scanner {
    /// Extension allow-list, extra prune names and verbosity
    scan_options: ScanOptions,

    /// When `true`, suppresses the progress spinner (used by `--json` mode).
    quiet: bool,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    #[must_use]
    pub const fn new(scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses progress spinner).
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Find every candidate project file under `root`.
    ///
    /// Candidates come back in traversal order, which is depth-first with
    /// siblings sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Walk`] as soon as any entry, including the root
    /// itself, cannot be read.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let progress = self.spinner();
        let result = self.walk(root, &progress);
        progress.finish_and_clear();
        result
    }

    /// Scan several roots and merge the candidates.
    ///
    /// The merged list is sorted by path and free of duplicates, so
    /// overlapping roots do not report a project twice.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] hit in any root.
    pub fn scan_directories(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
        let mut candidates = Vec::new();
        for root in roots {
            candidates.extend(self.scan_directory(root)?);
        }
        candidates.sort();
        candidates.dedup();
        Ok(candidates)
    }

    fn walk(&self, root: &Path, progress: &ProgressBar) -> Result<Vec<PathBuf>, ScanError> {
        let mut candidates = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.should_prune(entry));

        for result in walker {
            let entry = result?;

            if !entry.file_type().is_file() {
                continue;
            }

            if matches_extension(entry.path(), &self.scan_options.extensions) {
                tracing::debug!(path = %entry.path().display(), "found project file");
                candidates.push(entry.into_path());
                progress.set_message(format!("Scanning... {} found", candidates.len()));
            }
        }

        tracing::info!(
            root = %root.display(),
            count = candidates.len(),
            "directory scan complete"
        );
        Ok(candidates)
    }

    /// Directory-name check applied before a directory is entered.
    fn should_prune(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }

        let pruned = entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.scan_options.is_pruned(name));

        if pruned {
            tracing::debug!(path = %entry.path().display(), "pruning directory");
        }
        pruned
    }

    fn spinner(&self) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Scanning...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Find candidate project files under `root` with the default prune list.
///
/// # Errors
///
/// Returns [`ScanError::Walk`] if any part of the traversal fails.
pub fn find_project_files<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
) -> Result<Vec<PathBuf>, ScanError> {
    let options = ScanOptions {
        extensions: extensions.iter().map(|e| e.as_ref().to_string()).collect(),
        ..ScanOptions::default()
    };
    Scanner::new(options).with_quiet(true).scan_directory(root)
}

/// Whether the file's extension exactly matches one of `extensions`.
///
/// The comparison is case-sensitive and includes the leading dot.
#[must_use]
pub fn matches_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    dotted_extension(path).is_some_and(|ext| extensions.iter().any(|e| e.as_ref() == ext))
}

/// The extension of `path` including its leading dot.
///
/// This is everything from the last `.` of the file name, so `.proj` has
/// the extension `.proj` and `README` has none.
fn dotted_extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|idx| &name[idx..])
}
