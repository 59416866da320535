//! Core project data structures and types.
//!
//! This module defines the record produced by parsing one project description
//! file, the configuration-type hint it carries, and the
//! [`ProjectDescription`] trait every description dialect implements.

use std::{
    fmt::{Display, Formatter, Result},
    path::{Path, PathBuf},
};

use serde::Serialize;

use super::classify;

/// The `ConfigurationType` hint declared by an MSBuild project.
///
/// Values are matched exactly and case-sensitively; anything that is not one
/// of the well-known values is preserved verbatim in [`Other`](Self::Other).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ConfigurationType {
    /// `StaticLibrary`: a `.lib` archive
    StaticLibrary,

    /// `DynamicLibrary`: a `.dll`
    DynamicLibrary,

    /// `Library`: treated the same as a dynamic library
    Library,

    /// `Application`: an executable
    Application,

    /// `Driver`: a kernel-mode driver
    Driver,

    /// Any other non-empty value (e.g. `Utility`, `Makefile`)
    Other(String),
}

impl ConfigurationType {
    /// Interpret a raw `ConfigurationType` value.
    ///
    /// Returns `None` for an empty string, which is treated the same as an
    /// absent element.
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        let kind = match raw {
            "" => return None,
            "StaticLibrary" => Self::StaticLibrary,
            "DynamicLibrary" => Self::DynamicLibrary,
            "Library" => Self::Library,
            "Application" => Self::Application,
            "Driver" => Self::Driver,
            other => Self::Other(other.to_string()),
        };
        Some(kind)
    }

    /// The value as written in the project file.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::StaticLibrary => "StaticLibrary",
            Self::DynamicLibrary => "DynamicLibrary",
            Self::Library => "Library",
            Self::Application => "Application",
            Self::Driver => "Driver",
            Self::Other(raw) => raw,
        }
    }
}

/// Coarse build-output category used for display suffixes and summaries.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    /// Static library (`lib` suffix)
    StaticLibrary,

    /// Dynamic library (`dll` suffix)
    DynamicLibrary,

    /// Executable (`exe` suffix)
    Application,

    /// Driver (`drv` suffix)
    Driver,

    /// Directory aggregation project (`dirs.proj`)
    Directory,

    /// Anything else, including a missing configuration type
    Unknown,
}

impl ProjectKind {
    /// Human-readable plural label used in summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StaticLibrary => "static libraries",
            Self::DynamicLibrary => "dynamic libraries",
            Self::Application => "applications",
            Self::Driver => "drivers",
            Self::Directory => "directory projects",
            Self::Unknown => "projects of unknown type",
        }
    }
}

/// A project description format that can name itself and list its sources.
///
/// The scanner and collector only talk to projects through this trait, so
/// a new description dialect only needs a record type and a parser.
pub trait ProjectDescription {
    /// Path of the description file this project was read from.
    fn file_path(&self) -> &Path;

    /// Display name: resolved identifier followed by a type suffix.
    fn display_name(&self) -> String;

    /// Compiled source references, in declaration order.
    fn compiled_files(&self) -> &[String];

    /// Build-output category.
    fn kind(&self) -> ProjectKind;
}

/// One parsed MSBuild project file.
///
/// A record is built once by the parser and never mutated afterwards.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProjectRecord {
    /// The description file this record was parsed from
    pub file_path: PathBuf,

    /// `PropertyGroup>TargetName`
    pub target_name: Option<String>,

    /// `PropertyGroup>ProjectName`
    pub project_name: Option<String>,

    /// `PropertyGroup>RootNamespace`
    pub root_namespace: Option<String>,

    /// `PropertyGroup>ConfigurationType`
    pub configuration_type: Option<ConfigurationType>,

    /// `Include` attributes of `ItemGroup>ClCompile`, duplicates kept
    pub compiled_files: Vec<String>,
}

impl ProjectRecord {
    /// Create a record with no metadata for the given file.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            target_name: None,
            project_name: None,
            root_namespace: None,
            configuration_type: None,
            compiled_files: Vec::new(),
        }
    }

    /// Directory containing the description file.
    ///
    /// A bare file name yields `.`.
    #[must_use]
    pub fn directory(&self) -> PathBuf {
        directory_of(&self.file_path)
    }
}

impl ProjectDescription for ProjectRecord {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn display_name(&self) -> String {
        classify::display_name(self)
    }

    fn compiled_files(&self) -> &[String] {
        &self.compiled_files
    }

    fn kind(&self) -> ProjectKind {
        classify::kind(self)
    }
}

impl Display for ProjectRecord {
    /// Formats the record as a report line: `<display name> <directory>`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} {}", self.display_name(), self.directory().display())
    }
}

/// Parent directory of `path`, or `.` when it has none.
#[must_use]
pub fn directory_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
