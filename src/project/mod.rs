//! Project records and their classification.
//!
//! ## Main Parts
//!
//! - [`ProjectRecord`] - One parsed MSBuild project file
//! - [`ProjectDescription`] - The name-and-files interface every description dialect implements
//! - [`classify`] - Display name and type suffix resolution
//! - [`ScanResult`] - The projects collected by one scan

pub mod classify;
#[allow(clippy::module_inception)]
// This is acceptable as it is the main module for project records
pub mod project;
pub mod projects;

pub use project::{ConfigurationType, ProjectDescription, ProjectKind, ProjectRecord};
pub use projects::{ProjectEntry, ScanResult};
