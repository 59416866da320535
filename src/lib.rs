//! # msproj-scan
//!
//! Library side of the `msproj-scan` CLI: find MSBuild project files in a
//! source tree, parse them in parallel and report each project's display
//! name and directory.
//!
//! ## Pipeline
//!
//! 1. [`scanner::Scanner`] walks the roots, pruning `node_modules`, `obj`
//!    and `objd`, and returns candidate files matching the extension list
//! 2. [`collector::Collector`] parses the candidates on a bounded worker
//!    pool and hands every success to a single consumer
//! 3. [`project::classify`] turns each record into its display name
//!
//! [`preprocess::Preprocessor`] can flatten one project through
//! `msbuild /pp:` before it is parsed.

pub mod collector;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod preprocess;
pub mod project;
pub mod scanner;

pub use collector::Collector;
pub use config::{ReportOptions, ScanOptions};
pub use error::{ParseError, PreprocessError, ScanError};
pub use parser::{DescriptionParser, MsBuildParser};
pub use project::{ProjectDescription, ProjectEntry, ProjectRecord, ScanResult};
pub use scanner::Scanner;
