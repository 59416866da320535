//! Project type selection and report ordering.
//!
//! This module defines which description-file extensions a scan looks for
//! and how the collected projects are ordered in the output.

use clap::ValueEnum;

/// Extension of Visual C++ project files.
pub const VCXPROJ: &str = ".vcxproj";

/// Extension of C# project files.
pub const CSPROJ: &str = ".csproj";

/// Extension of generic MSBuild project files (including `dirs.proj`).
pub const PROJ: &str = ".proj";

/// Enumeration of supported project type filters.
///
/// Each filter maps to the set of file extensions the scanner accepts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum ProjectFilter {
    /// Every MSBuild dialect (`.vcxproj`, `.csproj`, `.proj`)
    #[default]
    All,

    /// Only Visual C++ projects (`.vcxproj`)
    Vcxproj,

    /// Only C# projects (`.csproj`)
    Csproj,

    /// Only generic MSBuild projects (`.proj`)
    Proj,
}

impl ProjectFilter {
    /// The extensions, leading dot included, accepted by this filter.
    #[must_use]
    pub fn extensions(self) -> Vec<String> {
        let exts: &[&str] = match self {
            Self::All => &[VCXPROJ, CSPROJ, PROJ],
            Self::Vcxproj => &[VCXPROJ],
            Self::Csproj => &[CSPROJ],
            Self::Proj => &[PROJ],
        };
        exts.iter().map(ToString::to_string).collect()
    }
}

/// Enumeration of supported sorting criteria for the report.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum SortCriteria {
    /// Sort by display name, then directory
    Name,

    /// Sort by description file path
    Path,
}

/// Configuration for report ordering.
///
/// When `criteria` is `None`, projects are reported in the order the
/// workers finished parsing them.
#[derive(Clone, Debug, Default)]
pub struct SortOptions {
    /// The sorting criterion to apply, or `None` to keep arrival order
    pub criteria: Option<SortCriteria>,

    /// Whether to reverse the order
    pub reverse: bool,
}

impl SortOptions {
    /// Whether entries must be buffered before printing.
    #[must_use]
    pub const fn requires_buffering(&self) -> bool {
        self.criteria.is_some() || self.reverse
    }
}
