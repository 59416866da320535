//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control how directories are scanned
//! and how many workers parse the discovered project files.

/// Directory names that are never descended into.
///
/// Dependency caches and MSBuild intermediate output directories.
pub const DEFAULT_PRUNED_DIRS: &[&str] = &["node_modules", "obj", "objd"];

/// Configuration for directory scanning behavior.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Whether to show verbose output including skipped project files
    pub verbose: bool,

    /// Number of parse workers (0 = one per core)
    pub threads: usize,

    /// File extensions to accept, leading dot included
    pub extensions: Vec<String>,

    /// Directory names pruned in addition to [`DEFAULT_PRUNED_DIRS`]
    pub skip: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            threads: 0,
            extensions: crate::config::ProjectFilter::All.extensions(),
            skip: Vec::new(),
        }
    }
}

impl ScanOptions {
    /// Whether a directory with this base name must be pruned.
    #[must_use]
    pub fn is_pruned(&self, dir_name: &str) -> bool {
        DEFAULT_PRUNED_DIRS.contains(&dir_name) || self.skip.iter().any(|s| s == dir_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_options_default() {
        let scan_opts = ScanOptions::default();

        assert!(!scan_opts.verbose);
        assert_eq!(scan_opts.threads, 0);
        assert_eq!(scan_opts.extensions, vec![".vcxproj", ".csproj", ".proj"]);
        assert!(scan_opts.skip.is_empty());
    }

    #[test]
    fn test_default_pruned_dirs() {
        let scan_opts = ScanOptions::default();

        assert!(scan_opts.is_pruned("node_modules"));
        assert!(scan_opts.is_pruned("obj"));
        assert!(scan_opts.is_pruned("objd"));
        assert!(!scan_opts.is_pruned("Obj"));
        assert!(!scan_opts.is_pruned("src"));
    }

    #[test]
    fn test_extra_skip_names() {
        let scan_opts = ScanOptions {
            skip: vec!["third_party".to_string()],
            ..ScanOptions::default()
        };

        assert!(scan_opts.is_pruned("third_party"));
        assert!(scan_opts.is_pruned("obj"));
    }
}
