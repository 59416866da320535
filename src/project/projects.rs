//! The aggregate result of a tree scan.
//!
//! This module provides [`ProjectEntry`], one successfully parsed project as
//! handed to the result sink, and [`ScanResult`], the collection of entries
//! in the order the sink received them.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    path::PathBuf,
};

use colored::Colorize;
use serde::Serialize;

use crate::config::{SortCriteria, SortOptions};

use super::{ProjectDescription, ProjectKind, project::directory_of};

/// One row of the scan report.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ProjectEntry {
    /// Display name computed by the classifier
    pub display_name: String,

    /// Directory containing the description file
    pub directory: PathBuf,

    /// The description file itself
    pub file_path: PathBuf,

    /// Build-output category
    pub kind: ProjectKind,

    /// Compiled source references, as declared
    pub compiled_files: Vec<String>,
}

impl ProjectEntry {
    /// Build a report entry from any parsed project description.
    #[must_use]
    pub fn from_description(description: &impl ProjectDescription) -> Self {
        let file_path = description.file_path().to_path_buf();
        Self {
            display_name: description.display_name(),
            directory: directory_of(&file_path),
            kind: description.kind(),
            compiled_files: description.compiled_files().to_vec(),
            file_path,
        }
    }
}

impl Display for ProjectEntry {
    /// `<display name> <directory>`
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.display_name, self.directory.display())
    }
}

/// Every project that parsed successfully during one scan.
///
/// Entries are kept in sink-arrival order until [`sort`](Self::sort) is
/// called; arrival order depends on worker timing and is not stable across
/// runs.
#[derive(Debug, Default)]
pub struct ScanResult(Vec<ProjectEntry>);

impl From<Vec<ProjectEntry>> for ScanResult {
    fn from(entries: Vec<ProjectEntry>) -> Self {
        Self(entries)
    }
}

impl IntoIterator for ScanResult {
    type Item = ProjectEntry;
    type IntoIter = std::vec::IntoIter<ProjectEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl ScanResult {
    /// Number of projects in the result.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no project was collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the entries.
    #[must_use]
    pub fn as_slice(&self) -> &[ProjectEntry] {
        &self.0
    }

    /// Append a single entry.
    pub fn push(&mut self, entry: ProjectEntry) {
        self.0.push(entry);
    }

    /// Order the entries for deterministic output.
    ///
    /// `Name` orders by display name then directory, `Path` by description
    /// file path. With no criterion the arrival order is kept, and
    /// `reverse` alone flips it.
    pub fn sort(&mut self, options: &SortOptions) {
        match options.criteria {
            Some(SortCriteria::Name) => self.0.sort_by(|a, b| {
                a.display_name
                    .cmp(&b.display_name)
                    .then_with(|| a.directory.cmp(&b.directory))
            }),
            Some(SortCriteria::Path) => self.0.sort_by(|a, b| a.file_path.cmp(&b.file_path)),
            None => {}
        }

        if options.reverse {
            self.0.reverse();
        }
    }

    /// Number of entries per [`ProjectKind`].
    #[must_use]
    pub fn count_by_kind(&self) -> BTreeMap<ProjectKind, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.0 {
            *counts.entry(entry.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Print a per-kind breakdown to stderr.
    ///
    /// # Output Format
    ///
    /// ```text
    ///   3 applications
    ///   2 static libraries
    ///   Total: 5 projects
    /// ```
    pub fn print_summary(&self) {
        for (kind, count) in self.count_by_kind() {
            eprintln!("  {} {}", count.to_string().bright_white(), kind.label());
        }

        eprintln!(
            "  Total: {} projects",
            self.len().to_string().bright_green().bold()
        );
    }
}
