//! Configuration types for scanning, reporting and the config file.

pub mod file;
pub mod filter;
pub mod scan;

pub use file::FileConfig;
pub use filter::{ProjectFilter, SortCriteria, SortOptions};
pub use scan::{DEFAULT_PRUNED_DIRS, ScanOptions};

/// Options controlling how the report is rendered.
#[derive(Clone, Debug, Default)]
pub struct ReportOptions {
    /// Emit a single JSON document instead of report lines
    pub json: bool,

    /// List compiled files under each project line
    pub files: bool,

    /// Ordering of the report
    pub sort: SortOptions,
}
