//! Preprocessing a project through MSBuild.
//!
//! `msbuild /pp:<file>` expands every import and property into a single
//! flattened project file. The flattened file is read back with the regular
//! [`parser`](crate::parser), so names and compiled files declared in
//! imported `.props`/`.targets` files become visible.

use std::{path::Path, process::Command};

use crate::{
    error::PreprocessError,
    parser::parse_project,
    project::{ProjectRecord, project::directory_of},
};

/// Tool invoked when none is configured.
pub const DEFAULT_TOOL: &str = "msbuild";

/// File name of the flattened project inside the temporary directory.
pub const PREPROCESSED_FILE_NAME: &str = "preprocessed.vcxproj";

/// Runs the external preprocessor and parses its output.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    tool: String,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

impl Preprocessor {
    /// Create a preprocessor that runs `tool` (a name on `PATH` or a path).
    #[must_use]
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    /// The tool this preprocessor invokes.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Flatten `project` and parse the result.
    ///
    /// The tool runs in the project's directory as
    /// `<tool> /pp:<tmp>/preprocessed.vcxproj <project file name>`. The
    /// temporary directory is removed before this returns. The returned
    /// record's `file_path` is the original project, not the temporary file.
    ///
    /// # Errors
    ///
    /// - [`PreprocessError::InvalidPath`] if `project` has no file name
    /// - [`PreprocessError::Spawn`] if the tool cannot be started
    /// - [`PreprocessError::ToolFailed`] if it exits unsuccessfully
    /// - [`PreprocessError::Parse`] if the flattened file is unreadable
    pub fn preprocess(&self, project: &Path) -> Result<ProjectRecord, PreprocessError> {
        let file_name = project
            .file_name()
            .ok_or_else(|| PreprocessError::InvalidPath(project.to_path_buf()))?;
        let working_dir = directory_of(project);

        let tmp = tempfile::Builder::new()
            .prefix("msbuild")
            .tempdir()
            .map_err(PreprocessError::TempDir)?;
        let output_path = tmp.path().join(PREPROCESSED_FILE_NAME);

        tracing::info!(
            project = %project.display(),
            output = %output_path.display(),
            tool = %self.tool,
            "preprocessing project"
        );

        let output = Command::new(&self.tool)
            .arg(format!("/pp:{}", output_path.display()))
            .arg(file_name)
            .current_dir(&working_dir)
            .output()
            .map_err(|source| PreprocessError::Spawn {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PreprocessError::ToolFailed {
                tool: self.tool.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let mut record = parse_project(&output_path)?;
        record.file_path = project.to_path_buf();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectDescription;

    #[test]
    fn test_default_tool() {
        assert_eq!(Preprocessor::default().tool(), "msbuild");
    }

    #[test]
    fn test_missing_tool_is_spawn_error() {
        let tmp = tempfile::tempdir().unwrap();
        let project = tmp.path().join("A.vcxproj");
        std::fs::write(&project, "<Project/>").unwrap();

        let err = Preprocessor::new("msproj-scan-no-such-tool")
            .preprocess(&project)
            .unwrap_err();
        assert!(matches!(err, PreprocessError::Spawn { .. }));
    }

    #[test]
    fn test_path_without_file_name_is_invalid() {
        let err = Preprocessor::default()
            .preprocess(Path::new("/"))
            .unwrap_err();
        assert!(matches!(err, PreprocessError::InvalidPath(_)));
    }

    #[cfg(unix)]
    fn fake_tool(dir: &Path, script: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-msbuild");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[test]
    fn test_preprocess_parses_tool_output() {
        let tools = tempfile::tempdir().unwrap();
        // Copies the project named by $2 to the /pp: target.
        let tool = fake_tool(
            tools.path(),
            "#!/bin/sh\nout=\"${1#/pp:}\"\ncp \"$2\" \"$out\"\n",
        );

        let src = tempfile::tempdir().unwrap();
        let project = src.path().join("Core.vcxproj");
        std::fs::write(
            &project,
            r#"<Project>
                <PropertyGroup><ConfigurationType>StaticLibrary</ConfigurationType></PropertyGroup>
                <ItemGroup><ClCompile Include="core.c"/><ClCompile Include="io.c"/></ItemGroup>
            </Project>"#,
        )
        .unwrap();

        let record = Preprocessor::new(tool).preprocess(&project).unwrap();

        assert_eq!(record.file_path, project);
        assert_eq!(record.display_name(), "Core lib");
        assert_eq!(record.compiled_files, vec!["core.c", "io.c"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_tool_reports_stderr() {
        let tools = tempfile::tempdir().unwrap();
        let tool = fake_tool(
            tools.path(),
            "#!/bin/sh\necho 'MSB1009: Project file does not exist.' >&2\nexit 1\n",
        );

        let src = tempfile::tempdir().unwrap();
        let project = src.path().join("A.vcxproj");
        std::fs::write(&project, "<Project/>").unwrap();

        let err = Preprocessor::new(tool).preprocess(&project).unwrap_err();
        match err {
            PreprocessError::ToolFailed { stderr, .. } => {
                assert_eq!(stderr, "MSB1009: Project file does not exist.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_without_output_is_parse_error() {
        let tools = tempfile::tempdir().unwrap();
        let tool = fake_tool(tools.path(), "#!/bin/sh\nexit 0\n");

        let src = tempfile::tempdir().unwrap();
        let project = src.path().join("A.vcxproj");
        std::fs::write(&project, "<Project/>").unwrap();

        let err = Preprocessor::new(tool).preprocess(&project).unwrap_err();
        assert!(matches!(err, PreprocessError::Parse(_)));
    }
}
