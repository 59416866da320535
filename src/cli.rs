//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and subcommands
//! using the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use msproj_scan::config::file::{FileConfig, expand_tilde};
use msproj_scan::config::{ProjectFilter, ReportOptions, ScanOptions, SortCriteria, SortOptions};
use msproj_scan::preprocess::DEFAULT_TOOL;

/// Command-line arguments for directory scanning and parsing.
#[derive(Parser)]
struct ScanningArgs {
    /// Project file extension to look for, leading dot included
    ///
    /// Can be specified multiple times. When given, replaces the extension
    /// set implied by `--project-type`. Matching is case-sensitive.
    #[arg(short = 'e', long = "ext", action = clap::ArgAction::Append)]
    extensions: Vec<String>,

    /// The number of worker threads used to parse project files
    ///
    /// A value of 0 uses one worker per CPU core.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Log every scanning and parsing decision to stderr
    ///
    /// Includes project files that were skipped because they could not be
    /// parsed. `RUST_LOG` overrides this.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Directory names to prune in addition to `node_modules`, `obj` and `objd`
    ///
    /// Matched against the base name of each directory at any depth. Can be
    /// specified multiple times.
    #[arg(long, action = clap::ArgAction::Append)]
    skip: Vec<String>,
}

/// Command-line arguments for shaping the report.
#[derive(Parser)]
struct ReportArgs {
    /// Sort projects before printing (name, path)
    ///
    /// Without this, projects are printed as soon as they are parsed, in
    /// no particular order.
    #[arg(long, value_enum)]
    sort: Option<SortCriteria>,

    /// Reverse the report order
    #[arg(long)]
    reverse: bool,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, colors and the progress spinner are suppressed and a
    /// single JSON document is printed to stdout.
    #[arg(long)]
    json: bool,

    /// List the compiled source files under each project
    #[arg(short = 'f', long)]
    files: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Flatten one project through `msbuild /pp:` and report it
    Preprocess {
        /// The project file to preprocess
        project: PathBuf,

        /// MSBuild executable to run (name on PATH or full path)
        #[arg(long)]
        msbuild: Option<String>,
    },

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "msproj-scan")]
#[command(about = "List the MSBuild projects in a source tree with their build output type")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `preprocess`, `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// One or more directories to search for project files
    ///
    /// Defaults to the current directory if not specified.
    /// Multiple directories can be provided: `msproj-scan ~/src/client ~/src/shared`
    #[arg(num_args = 0..)]
    dirs: Vec<PathBuf>,

    /// Project type to look for (all, vcxproj, csproj, proj)
    #[arg(short = 'p', long)]
    project_type: Option<ProjectFilter>,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,

    /// Report options
    #[command(flatten)]
    report: ReportArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.report.json
    }

    /// Resolve the root directories from CLI args, config file, or default.
    ///
    /// Priority: CLI arguments > config file `dirs` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn directories(&self, config: &FileConfig) -> Vec<PathBuf> {
        if !self.dirs.is_empty() {
            return self.dirs.clone();
        }

        if let Some(ref dirs) = config.dirs
            && !dirs.is_empty()
        {
            return dirs.iter().map(|d| expand_tilde(d)).collect();
        }

        vec![PathBuf::from(".")]
    }

    /// Extract the project filter from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > default (`All`).
    #[must_use]
    pub fn project_filter(&self, config: &FileConfig) -> ProjectFilter {
        self.project_type
            .or_else(|| {
                config
                    .project_type
                    .as_ref()
                    .and_then(|s| ProjectFilter::from_str(s, true).ok())
            })
            .unwrap_or_default()
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **extensions**: CLI `--ext` > config `extensions` > project filter
    /// - **threads**: CLI > config > `0` (default)
    /// - **verbose**: CLI flag `||` config value `||` `false`
    /// - **skip**: merged from both sources (config values first, then CLI)
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        let mut skip = config.scanning.skip.clone().unwrap_or_default();
        skip.extend(self.scanning.skip.iter().cloned());

        let extensions = if self.scanning.extensions.is_empty() {
            config
                .scanning
                .extensions
                .clone()
                .filter(|exts| !exts.is_empty())
                .unwrap_or_else(|| self.project_filter(config).extensions())
        } else {
            self.scanning.extensions.clone()
        };

        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            threads: self
                .scanning
                .threads
                .or(config.scanning.threads)
                .unwrap_or(0),
            extensions,
            skip,
        }
    }

    /// Extract sorting options from CLI args and config file.
    ///
    /// Priority: CLI argument > config file > default (arrival order).
    #[must_use]
    pub fn sort_options(&self, config: &FileConfig) -> SortOptions {
        SortOptions {
            criteria: self.report.sort.or_else(|| {
                config
                    .report
                    .sort
                    .as_ref()
                    .and_then(|s| SortCriteria::from_str(s, true).ok())
            }),
            reverse: self.report.reverse || config.report.reverse.unwrap_or(false),
        }
    }

    /// Extract report options from CLI args and config file.
    #[must_use]
    pub fn report_options(&self, config: &FileConfig) -> ReportOptions {
        ReportOptions {
            json: self.report.json,
            files: self.report.files || config.report.files.unwrap_or(false),
            sort: self.sort_options(config),
        }
    }

    /// The MSBuild executable for `preprocess`.
    ///
    /// Priority: `--msbuild` > config `[preprocess] msbuild` > `msbuild`.
    #[must_use]
    pub fn msbuild_tool(&self, config: &FileConfig) -> String {
        let cli_tool = match &self.subcommand {
            Some(Commands::Preprocess { msbuild, .. }) => msbuild.clone(),
            _ => None,
        };

        cli_tool
            .or_else(|| config.preprocess.msbuild.clone())
            .unwrap_or_else(|| DEFAULT_TOOL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use msproj_scan::config::file::{
        FilePreprocessConfig, FileReportConfig, FileScanConfig,
    };

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["msproj-scan"]);
        let config = FileConfig::default();

        assert_eq!(args.directories(&config), vec![PathBuf::from(".")]);
        assert_eq!(args.project_filter(&config), ProjectFilter::All);

        let scan_opts = args.scan_options(&config);
        assert!(!scan_opts.verbose);
        assert_eq!(scan_opts.threads, 0);
        assert_eq!(scan_opts.extensions, vec![".vcxproj", ".csproj", ".proj"]);
        assert!(scan_opts.skip.is_empty());

        let report_opts = args.report_options(&config);
        assert!(!report_opts.json);
        assert!(!report_opts.files);
        assert_eq!(report_opts.sort.criteria, None);
        assert!(!report_opts.sort.reverse);

        assert_eq!(args.msbuild_tool(&config), "msbuild");
    }

    #[test]
    fn test_project_filters() {
        let config = FileConfig::default();

        let args = Cli::parse_from(["msproj-scan", "--project-type", "vcxproj"]);
        assert_eq!(args.project_filter(&config), ProjectFilter::Vcxproj);
        assert_eq!(args.scan_options(&config).extensions, vec![".vcxproj"]);

        let args = Cli::parse_from(["msproj-scan", "--project-type", "csproj"]);
        assert_eq!(args.scan_options(&config).extensions, vec![".csproj"]);

        let args = Cli::parse_from(["msproj-scan", "-p", "proj"]);
        assert_eq!(args.scan_options(&config).extensions, vec![".proj"]);
    }

    #[test]
    fn test_explicit_extensions_replace_project_filter() {
        let config = FileConfig::default();
        let args = Cli::parse_from([
            "msproj-scan",
            "-p",
            "csproj",
            "--ext",
            ".vcxproj",
            "-e",
            ".vcproj",
        ]);

        assert_eq!(
            args.scan_options(&config).extensions,
            vec![".vcxproj", ".vcproj"]
        );
    }

    #[test]
    fn test_config_extensions_override_project_type() {
        let args = Cli::parse_from(["msproj-scan", "-p", "csproj"]);
        let config = FileConfig {
            scanning: FileScanConfig {
                extensions: Some(vec![".vcxproj".to_string()]),
                ..FileScanConfig::default()
            },
            ..FileConfig::default()
        };

        assert_eq!(args.scan_options(&config).extensions, vec![".vcxproj"]);
    }

    #[test]
    fn test_empty_config_extensions_fall_back_to_filter() {
        let args = Cli::parse_from(["msproj-scan"]);
        let config = FileConfig {
            project_type: Some("vcxproj".to_string()),
            scanning: FileScanConfig {
                extensions: Some(Vec::new()),
                ..FileScanConfig::default()
            },
            ..FileConfig::default()
        };

        assert_eq!(args.scan_options(&config).extensions, vec![".vcxproj"]);
    }

    #[test]
    fn test_scanning_options() {
        let config = FileConfig::default();
        let args = Cli::parse_from([
            "msproj-scan",
            "--threads",
            "4",
            "--verbose",
            "--skip",
            "third_party",
            "--skip",
            "out",
        ]);
        let scan_opts = args.scan_options(&config);

        assert_eq!(scan_opts.threads, 4);
        assert!(scan_opts.verbose);
        assert_eq!(scan_opts.skip, vec!["third_party", "out"]);
    }

    #[test]
    fn test_short_flags() {
        let config = FileConfig::default();
        let args = Cli::parse_from(["msproj-scan", "-t", "2", "-v", "-f"]);

        let scan_opts = args.scan_options(&config);
        assert_eq!(scan_opts.threads, 2);
        assert!(scan_opts.verbose);
        assert!(args.report_options(&config).files);
    }

    #[test]
    fn test_multiple_directories() {
        let config = FileConfig::default();
        let args = Cli::parse_from(["msproj-scan", "/src/a", "/src/b"]);

        assert_eq!(
            args.directories(&config),
            vec![PathBuf::from("/src/a"), PathBuf::from("/src/b")]
        );
    }

    #[test]
    fn test_config_dirs_used_when_cli_absent() {
        let args = Cli::parse_from(["msproj-scan"]);
        let config = FileConfig {
            dirs: Some(vec![PathBuf::from("/config/a"), PathBuf::from("/config/b")]),
            ..FileConfig::default()
        };

        assert_eq!(
            args.directories(&config),
            vec![PathBuf::from("/config/a"), PathBuf::from("/config/b")]
        );
    }

    #[test]
    fn test_cli_dirs_override_config_dirs() {
        let args = Cli::parse_from(["msproj-scan", "/cli"]);
        let config = FileConfig {
            dirs: Some(vec![PathBuf::from("/config")]),
            ..FileConfig::default()
        };

        assert_eq!(args.directories(&config), vec![PathBuf::from("/cli")]);
    }

    #[test]
    fn test_config_dir_with_tilde_expansion() {
        let args = Cli::parse_from(["msproj-scan"]);
        let config = FileConfig {
            dirs: Some(vec![PathBuf::from("~/src")]),
            ..FileConfig::default()
        };

        let dirs = args.directories(&config);
        if let Some(home) = dirs::home_dir() {
            assert_eq!(dirs, vec![home.join("src")]);
        }
    }

    #[test]
    fn test_config_values_used_when_cli_absent() {
        let args = Cli::parse_from(["msproj-scan"]);
        let config = FileConfig {
            project_type: Some("csproj".to_string()),
            scanning: FileScanConfig {
                threads: Some(8),
                verbose: Some(true),
                skip: Some(vec!["vendor".to_string()]),
                ..FileScanConfig::default()
            },
            report: FileReportConfig {
                sort: Some("path".to_string()),
                reverse: Some(true),
                files: Some(true),
            },
            ..FileConfig::default()
        };

        assert_eq!(args.project_filter(&config), ProjectFilter::Csproj);

        let scan_opts = args.scan_options(&config);
        assert_eq!(scan_opts.threads, 8);
        assert!(scan_opts.verbose);
        assert_eq!(scan_opts.skip, vec!["vendor"]);
        assert_eq!(scan_opts.extensions, vec![".csproj"]);

        let report_opts = args.report_options(&config);
        assert!(report_opts.files);
        assert_eq!(report_opts.sort.criteria, Some(SortCriteria::Path));
        assert!(report_opts.sort.reverse);
    }

    #[test]
    fn test_cli_overrides_config_values() {
        let args = Cli::parse_from([
            "msproj-scan",
            "-p",
            "proj",
            "--threads",
            "2",
            "--sort",
            "name",
        ]);
        let config = FileConfig {
            project_type: Some("csproj".to_string()),
            scanning: FileScanConfig {
                threads: Some(8),
                ..FileScanConfig::default()
            },
            report: FileReportConfig {
                sort: Some("path".to_string()),
                ..FileReportConfig::default()
            },
            ..FileConfig::default()
        };

        assert_eq!(args.project_filter(&config), ProjectFilter::Proj);
        assert_eq!(args.scan_options(&config).threads, 2);
        assert_eq!(
            args.sort_options(&config).criteria,
            Some(SortCriteria::Name)
        );
    }

    #[test]
    fn test_skip_dirs_merged_from_both_sources() {
        let args = Cli::parse_from(["msproj-scan", "--skip", "cli_skip"]);
        let config = FileConfig {
            scanning: FileScanConfig {
                skip: Some(vec!["config_skip".to_string()]),
                ..FileScanConfig::default()
            },
            ..FileConfig::default()
        };

        assert_eq!(
            args.scan_options(&config).skip,
            vec!["config_skip", "cli_skip"]
        );
    }

    #[test]
    fn test_config_project_type_case_insensitive() {
        let args = Cli::parse_from(["msproj-scan"]);
        let config = FileConfig {
            project_type: Some("VcxProj".to_string()),
            ..FileConfig::default()
        };

        assert_eq!(args.project_filter(&config), ProjectFilter::Vcxproj);
    }

    #[test]
    fn test_invalid_config_values_fall_back_to_defaults() {
        let args = Cli::parse_from(["msproj-scan"]);
        let config = FileConfig {
            project_type: Some("makefile".to_string()),
            report: FileReportConfig {
                sort: Some("size".to_string()),
                ..FileReportConfig::default()
            },
            ..FileConfig::default()
        };

        assert_eq!(args.project_filter(&config), ProjectFilter::All);
        assert_eq!(args.sort_options(&config).criteria, None);
    }

    #[test]
    fn test_reverse_only_keeps_arrival_criteria() {
        let args = Cli::parse_from(["msproj-scan", "--reverse"]);
        let sort_opts = args.sort_options(&FileConfig::default());

        assert_eq!(sort_opts.criteria, None);
        assert!(sort_opts.reverse);
        assert!(sort_opts.requires_buffering());
    }

    #[test]
    fn test_json_flag() {
        let args = Cli::parse_from(["msproj-scan", "--json"]);

        assert!(args.json());
        assert!(args.report_options(&FileConfig::default()).json);
    }

    #[test]
    fn test_preprocess_subcommand() {
        let args = Cli::parse_from(["msproj-scan", "preprocess", "src/App.vcxproj"]);

        match &args.subcommand {
            Some(Commands::Preprocess { project, msbuild }) => {
                assert_eq!(project, &PathBuf::from("src/App.vcxproj"));
                assert!(msbuild.is_none());
            }
            _ => panic!("expected preprocess subcommand"),
        }
    }

    #[test]
    fn test_msbuild_tool_priority() {
        let config = FileConfig {
            preprocess: FilePreprocessConfig {
                msbuild: Some("/opt/msbuild/MSBuild.exe".to_string()),
            },
            ..FileConfig::default()
        };

        let args = Cli::parse_from(["msproj-scan", "preprocess", "A.vcxproj"]);
        assert_eq!(args.msbuild_tool(&config), "/opt/msbuild/MSBuild.exe");

        let args = Cli::parse_from([
            "msproj-scan",
            "preprocess",
            "A.vcxproj",
            "--msbuild",
            "dotnet-msbuild",
        ]);
        assert_eq!(args.msbuild_tool(&config), "dotnet-msbuild");
    }

    #[test]
    fn test_config_subcommands() {
        for (name, check) in [
            ("show", 0_u8),
            ("init", 1),
            ("path", 2),
        ] {
            let args = Cli::parse_from(["msproj-scan", "config", name]);
            let got = match args.subcommand {
                Some(Commands::Config {
                    command: ConfigCommand::Show,
                }) => 0,
                Some(Commands::Config {
                    command: ConfigCommand::Init,
                }) => 1,
                Some(Commands::Config {
                    command: ConfigCommand::Path,
                }) => 2,
                _ => u8::MAX,
            };
            assert_eq!(got, check, "config {name}");
        }
    }
}
