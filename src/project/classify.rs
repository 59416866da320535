//! Display-name resolution for parsed projects.
//!
//! Everything here is pure: the result depends only on the record's fields
//! and file name.

use std::path::Path;

use super::{ConfigurationType, ProjectKind, ProjectRecord};

/// File name of the directory aggregation project.
pub const DIRECTORY_MARKER: &str = "dirs.proj";

/// Label returned for every [`DIRECTORY_MARKER`] file.
pub const DIRECTORY_LABEL: &str = "dir dir";

/// Compute the display name of a project.
///
/// The base identifier is the first non-empty of `TargetName`, `ProjectName`
/// and `RootNamespace`, falling back to the file name without its extension.
/// A suffix derived from the configuration type is appended.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use msproj_scan::project::{ProjectRecord, classify};
/// let mut record = ProjectRecord::new(PathBuf::from("proj/X.vcxproj"));
/// record.project_name = Some("Foo".to_string());
/// assert_eq!(classify::display_name(&record), "Foo unknown");
/// ```
#[must_use]
pub fn display_name(record: &ProjectRecord) -> String {
    if is_directory_marker(&record.file_path) {
        return DIRECTORY_LABEL.to_string();
    }

    let suffix = suffix(kind(record));
    format!("{} {suffix}", base_identifier(record))
}

/// Classify a record into a [`ProjectKind`].
#[must_use]
pub fn kind(record: &ProjectRecord) -> ProjectKind {
    if is_directory_marker(&record.file_path) {
        return ProjectKind::Directory;
    }

    match record.configuration_type {
        Some(ConfigurationType::StaticLibrary) => ProjectKind::StaticLibrary,
        Some(ConfigurationType::DynamicLibrary | ConfigurationType::Library) => {
            ProjectKind::DynamicLibrary
        }
        Some(ConfigurationType::Application) => ProjectKind::Application,
        Some(ConfigurationType::Driver) => ProjectKind::Driver,
        Some(ConfigurationType::Other(_)) | None => ProjectKind::Unknown,
    }
}

/// Whether `path` names the directory aggregation project.
#[must_use]
pub fn is_directory_marker(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == DIRECTORY_MARKER)
}

const fn suffix(kind: ProjectKind) -> &'static str {
    match kind {
        ProjectKind::StaticLibrary => "lib",
        ProjectKind::DynamicLibrary => "dll",
        ProjectKind::Application => "exe",
        ProjectKind::Driver => "drv",
        ProjectKind::Directory => "dir",
        ProjectKind::Unknown => "unknown",
    }
}

fn base_identifier(record: &ProjectRecord) -> String {
    [
        &record.target_name,
        &record.project_name,
        &record.root_namespace,
    ]
    .into_iter()
    .flatten()
    .find(|name| !name.is_empty())
    .cloned()
    .unwrap_or_else(|| file_stem(&record.file_path))
}

/// The file name up to its last `.`, so `.proj` has an empty stem.
fn file_stem(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    name.rfind('.')
        .map_or_else(|| name.to_string(), |idx| name[..idx].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(path: &str) -> ProjectRecord {
        ProjectRecord::new(PathBuf::from(path))
    }

    fn with_type(path: &str, configuration_type: &str) -> ProjectRecord {
        let mut rec = record(path);
        rec.target_name = Some("Core".to_string());
        rec.configuration_type = ConfigurationType::from_raw(configuration_type);
        rec
    }

    #[test]
    fn test_suffix_for_every_known_configuration_type() {
        let cases = [
            ("StaticLibrary", "Core lib"),
            ("DynamicLibrary", "Core dll"),
            ("Library", "Core dll"),
            ("Application", "Core exe"),
            ("Driver", "Core drv"),
        ];

        for (configuration_type, expected) in cases {
            assert_eq!(
                display_name(&with_type("a/Core.vcxproj", configuration_type)),
                expected,
                "configuration type {configuration_type}"
            );
        }
    }

    #[test]
    fn test_unknown_suffix_for_other_empty_and_absent() {
        for configuration_type in ["Utility", "Makefile", "application", ""] {
            assert_eq!(
                display_name(&with_type("a/Core.vcxproj", configuration_type)),
                "Core unknown"
            );
        }

        let mut absent = record("a/Core.vcxproj");
        absent.target_name = Some("Core".to_string());
        assert_eq!(display_name(&absent), "Core unknown");
    }

    #[test]
    fn test_project_name_wins_over_root_namespace_and_file_name() {
        let mut rec = record("src/X.vcxproj");
        rec.target_name = Some(String::new());
        rec.project_name = Some("Foo".to_string());
        rec.root_namespace = Some("Bar".to_string());
        rec.configuration_type = Some(ConfigurationType::StaticLibrary);

        assert_eq!(display_name(&rec), "Foo lib");
    }

    #[test]
    fn test_target_name_wins_over_everything() {
        let mut rec = record("src/X.vcxproj");
        rec.target_name = Some("Alpha".to_string());
        rec.project_name = Some("Foo".to_string());
        rec.root_namespace = Some("Bar".to_string());

        assert_eq!(display_name(&rec), "Alpha unknown");
    }

    #[test]
    fn test_root_namespace_used_when_names_empty() {
        let mut rec = record("src/X.vcxproj");
        rec.target_name = Some(String::new());
        rec.project_name = Some(String::new());
        rec.root_namespace = Some("Bar".to_string());

        assert_eq!(display_name(&rec), "Bar unknown");
    }

    #[test]
    fn test_empty_names_fall_through_to_file_stem() {
        let mut rec = record("src/Widget.vcxproj");
        rec.target_name = Some(String::new());
        rec.project_name = Some(String::new());
        rec.root_namespace = Some(String::new());
        rec.configuration_type = Some(ConfigurationType::Driver);

        assert_eq!(display_name(&rec), "Widget drv");
    }

    #[test]
    fn test_file_stem_strips_only_last_extension() {
        assert_eq!(
            display_name(&record("x/my.tool.csproj")),
            "my.tool unknown"
        );
    }

    #[test]
    fn test_file_named_only_extension_has_empty_stem() {
        assert_eq!(display_name(&record("x/.proj")), " unknown");
        assert_eq!(display_name(&record("x/Makefile")), "Makefile unknown");
    }

    #[test]
    fn test_directory_marker_ignores_fields() {
        let mut rec = record("src/dirs.proj");
        rec.target_name = Some("Alpha".to_string());
        rec.configuration_type = Some(ConfigurationType::Application);

        assert_eq!(display_name(&rec), DIRECTORY_LABEL);
        assert_eq!(kind(&rec), ProjectKind::Directory);
    }

    #[test]
    fn test_directory_marker_requires_exact_name() {
        assert!(is_directory_marker(Path::new("a/b/dirs.proj")));
        assert!(is_directory_marker(Path::new("dirs.proj")));
        assert!(!is_directory_marker(Path::new("a/Dirs.proj")));
        assert!(!is_directory_marker(Path::new("a/mydirs.proj")));
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            kind(&with_type("a.vcxproj", "Library")),
            ProjectKind::DynamicLibrary
        );
        assert_eq!(
            kind(&with_type("a.vcxproj", "StaticLibrary")),
            ProjectKind::StaticLibrary
        );
        assert_eq!(kind(&with_type("a.vcxproj", "Utility")), ProjectKind::Unknown);
    }
}
