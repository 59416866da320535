//! Structured JSON output for scripting and piping.
//!
//! When the `--json` flag is passed, these structures are serialized to
//! stdout as a single JSON object, replacing the line-per-project report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::project::{ProjectEntry, ProjectKind, ScanResult};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// Every project that parsed successfully, in report order.
    pub projects: Vec<JsonProjectEntry>,

    /// Aggregated summary statistics.
    pub summary: JsonSummary,
}

/// A single project entry in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonProjectEntry {
    /// Display name, e.g. `"Alpha exe"`.
    pub name: String,

    /// Directory containing the project file.
    pub directory: String,

    /// Path of the project file.
    pub file: String,

    /// Build-output category (`"application"`, `"static_library"`, ...).
    #[serde(rename = "type")]
    pub kind: ProjectKind,

    /// Compiled source references, as declared.
    pub compiled_files: Vec<String>,
}

/// Aggregated summary across all collected projects.
#[derive(Serialize, Debug)]
pub struct JsonSummary {
    /// Number of candidate files that were dispatched for parsing.
    pub candidates: usize,

    /// Number of projects that parsed successfully.
    pub total_projects: usize,

    /// Candidates that failed to parse and were skipped.
    pub skipped: usize,

    /// Per-type project counts (key is the serialized type name).
    pub by_type: BTreeMap<String, usize>,
}

impl JsonProjectEntry {
    fn from_entry(entry: &ProjectEntry) -> Self {
        Self {
            name: entry.display_name.clone(),
            directory: entry.directory.display().to_string(),
            file: entry.file_path.display().to_string(),
            kind: entry.kind,
            compiled_files: entry.compiled_files.clone(),
        }
    }
}

impl JsonOutput {
    /// Build the JSON document for a finished scan.
    ///
    /// `candidates` is the number of files dispatched to the collector.
    #[must_use]
    pub fn from_scan(result: &ScanResult, candidates: usize) -> Self {
        let by_type = result
            .count_by_kind()
            .into_iter()
            .map(|(kind, count)| (kind_key(kind), count))
            .collect();

        Self {
            projects: result
                .as_slice()
                .iter()
                .map(JsonProjectEntry::from_entry)
                .collect(),
            summary: JsonSummary {
                candidates,
                total_projects: result.len(),
                skipped: candidates.saturating_sub(result.len()),
                by_type,
            },
        }
    }
}

fn kind_key(kind: ProjectKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(ToString::to_string))
        .unwrap_or_else(|| format!("{kind:?}"))
}
