//! Configuration file support for persistent settings.
//!
//! This module loads configuration from a TOML file located at
//! `~/.config/msproj-scan/config.toml` (or the platform-specific equivalent).
//! Configuration file values serve as defaults that can be overridden by
//! CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! project_type = "vcxproj"
//! dirs = ["~/src/client", "~/src/shared"]
//!
//! [scanning]
//! threads = 8
//! verbose = true
//! extensions = [".vcxproj", ".vcproj"]
//! skip = ["third_party"]
//!
//! [report]
//! sort = "name"
//! reverse = false
//! files = false
//!
//! [preprocess]
//! msbuild = "C:/Program Files/Microsoft Visual Studio/2022/BuildTools/MSBuild/Current/Bin/MSBuild.exe"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Default project type filter (`"all"`, `"vcxproj"`, `"csproj"`, `"proj"`)
    pub project_type: Option<String>,

    /// Default directories to scan
    pub dirs: Option<Vec<PathBuf>>,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,

    /// Report options
    #[serde(default)]
    pub report: FileReportConfig,

    /// Preprocessing options
    #[serde(default)]
    pub preprocess: FilePreprocessConfig,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileScanConfig {
    /// Number of parse workers
    pub threads: Option<usize>,

    /// Whether to show verbose output
    pub verbose: Option<bool>,

    /// Explicit extension allow-list; overrides `project_type`
    pub extensions: Option<Vec<String>>,

    /// Extra directory names to prune
    pub skip: Option<Vec<String>>,
}

/// Report options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileReportConfig {
    /// Sort criterion (`"name"`, `"path"`)
    pub sort: Option<String>,

    /// Whether to reverse the sort order
    pub reverse: Option<bool>,

    /// Whether to list compiled files under each project
    pub files: Option<bool>,
}

/// Preprocessing options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FilePreprocessConfig {
    /// Path or name of the MSBuild executable
    pub msbuild: Option<String>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// `<config_dir>/msproj-scan/config.toml`, where `<config_dir>` is the
    /// platform-specific configuration directory.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("msproj-scan").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// contains invalid TOML.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}
