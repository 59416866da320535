//! # msproj-scan
//!
//! A fast CLI tool that walks a source tree, finds every MSBuild project file
//! and prints one line per project: its display name (base name plus build
//! output type) and the directory it lives in.
//!
//! ## Features
//!
//! - `.vcxproj`, `.csproj` and `.proj` discovery with `node_modules`/`obj`/`objd` pruning
//! - Parallel parsing on a bounded worker pool
//! - Streaming output, or sorted and JSON output
//! - `msbuild /pp:` preprocessing of a single project
//! - Persistent configuration via `~/.config/msproj-scan/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Scan the current directory
//! msproj-scan
//!
//! # Only C++ projects, sorted, with their compiled files
//! msproj-scan ~/src -p vcxproj --sort name --files
//!
//! # Flatten imports before reading a project
//! msproj-scan preprocess ~/src/app/App.vcxproj
//! ```

mod cli;

use std::{
    io::{self, Write},
    path::PathBuf,
    process::exit,
    sync::atomic::Ordering,
};

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use msproj_scan::{
    collector::Collector,
    config::{FileConfig, ReportOptions},
    output::JsonOutput,
    preprocess::Preprocessor,
    project::{ProjectDescription, ProjectEntry, ScanResult},
    scanner::Scanner,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Entry point for the msproj-scan application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// # Errors
///
/// Returns errors from config handling, preprocessing, thread-pool
/// construction, directory traversal, writing the report, or JSON
/// serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);
    let scan_options = args.scan_options(&file_config);
    init_tracing(scan_options.verbose, json_mode);

    if let Some(Commands::Preprocess { project, .. }) = &args.subcommand {
        return run_preprocess(project, &args.msbuild_tool(&file_config));
    }

    let roots = args.directories(&file_config);
    let report_options = args.report_options(&file_config);
    let threads = scan_options.threads;

    let scanner = Scanner::new(scan_options).with_quiet(json_mode);
    let candidates = scanner.scan_directories(&roots)?;

    if candidates.is_empty() {
        return print_empty_result(json_mode);
    }

    let collector = Collector::new(threads)?;
    tracing::debug!(
        candidates = candidates.len(),
        workers = collector.worker_count(),
        "parsing project files"
    );

    let found = if report_options.json || report_options.sort.requires_buffering() {
        report_buffered(&collector, &candidates, &report_options)?
    } else {
        report_streaming(&collector, &candidates, report_options.files)?
    };

    if !json_mode {
        eprintln!(
            "{} {} of {} candidate files",
            "Found".bold(),
            format!("{found} projects").bright_white(),
            candidates.len()
        );
    }

    Ok(())
}

/// Initialise the `tracing` subscriber on stderr.
///
/// `RUST_LOG` always wins; otherwise [`log_directive`] decides.
fn init_tracing(verbose: bool, json_mode: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(verbose, json_mode)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

/// Default log filter: errors only, this crate's debug output when verbose
/// (from `--verbose` or the config file), nothing at all in `--json` mode.
const fn log_directive(verbose: bool, json_mode: bool) -> &'static str {
    match (json_mode, verbose) {
        (true, _) => "off",
        (false, true) => "error,msproj_scan=debug",
        (false, false) => "error",
    }
}

// ── Scan report ─────────────────────────────────────────────────────────

/// Print each project the moment it is parsed.
///
/// A failed write to stdout (for example a closed pipe) cancels the
/// remaining parse tasks and is returned once the collector has drained.
fn report_streaming(
    collector: &Collector,
    candidates: &[PathBuf],
    files: bool,
) -> Result<usize> {
    let cancel = collector.cancel_handle();
    let mut stdout = io::stdout().lock();
    let mut write_error: Option<io::Error> = None;

    let delivered = collector.collect_into(candidates, |entry| {
        if write_error.is_some() {
            return;
        }
        if let Err(err) = write_entry(&mut stdout, &entry, files) {
            cancel.store(true, Ordering::Relaxed);
            write_error = Some(err);
        }
    });

    if let Some(err) = write_error {
        return Err(err.into());
    }
    stdout.flush()?;
    Ok(delivered)
}

/// Collect everything, then order and print it (or emit JSON).
fn report_buffered(
    collector: &Collector,
    candidates: &[PathBuf],
    options: &ReportOptions,
) -> Result<usize> {
    let mut result = collector.collect_all(candidates);
    result.sort(&options.sort);

    if options.json {
        let output = JsonOutput::from_scan(&result, candidates.len());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(result.len());
    }

    print_result(&result, options.files)?;
    result.print_summary();
    Ok(result.len())
}

fn print_result(result: &ScanResult, files: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for entry in result.as_slice() {
        write_entry(&mut stdout, entry, files)?;
    }
    stdout.flush()?;
    Ok(())
}

/// Write `<display name> <directory>`, optionally followed by the
/// compiled files indented beneath it.
fn write_entry(out: &mut impl Write, entry: &ProjectEntry, files: bool) -> io::Result<()> {
    writeln!(out, "{entry}")?;
    if files {
        for file in &entry.compiled_files {
            writeln!(out, "    {file}")?;
        }
    }
    Ok(())
}

/// Emit an empty result in JSON or human-readable form.
fn print_empty_result(json_mode: bool) -> Result<()> {
    if json_mode {
        let output = JsonOutput::from_scan(&ScanResult::default(), 0);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        eprintln!("{}", "No project files found.".green());
    }
    Ok(())
}

// ── Preprocess subcommand ───────────────────────────────────────────────

/// Flatten one project through MSBuild and print its name and compiled files.
fn run_preprocess(project: &std::path::Path, tool: &str) -> Result<()> {
    let record = Preprocessor::new(tool).preprocess(project)?;

    println!("{}", record.display_name());
    for file in record.compiled_files() {
        println!("    {file}");
    }
    Ok(())
}

// ── Config subcommand ───────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# msproj-scan configuration
# All values shown are their defaults. Uncomment and change as needed.

# Project type to look for (all, vcxproj, csproj, proj)
# project_type = "all"

# Directories to scan (defaults to the current directory when not set)
# dirs = ["."]

[scanning]
# Number of parse workers (0 = one per CPU core)
# threads = 0

# Log scanning and parsing decisions, including skipped project files
# verbose = false

# Explicit extension list; replaces the one implied by project_type
# extensions = [".vcxproj", ".csproj", ".proj"]

# Directory names pruned in addition to node_modules, obj and objd
# skip = []

[report]
# Sort output by: name, path (unset = print as parsed)
# sort = "name"

# Reverse the report order
# reverse = false

# List compiled files under each project
# files = false

[preprocess]
# MSBuild executable used by `msproj-scan preprocess`
# msbuild = "msbuild"
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| format!("\"{v}\""))
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_list<T: std::fmt::Display>(val: Option<&[T]>, default: &str) -> String {
        match val {
            Some(v) if !v.is_empty() => {
                let items: Vec<String> = v.iter().map(|s| format!("\"{s}\"")).collect();
                format!("[{}]", items.join(", "))
            }
            _ => format!("{default}  (default)"),
        }
    }

    let dirs: Option<Vec<String>> = config
        .dirs
        .as_ref()
        .map(|d| d.iter().map(|p| p.display().to_string()).collect());

    format!(
        "\
project_type = {project_type}
dirs         = {dirs}

[scanning]
threads      = {threads}
verbose      = {verbose}
extensions   = {extensions}
skip         = {skip}

[report]
sort         = {sort}
reverse      = {reverse}
files        = {files}

[preprocess]
msbuild      = {msbuild}",
        project_type = show_str(config.project_type.as_deref(), "\"all\""),
        dirs = show_list(dirs.as_deref(), "[\".\"]"),
        threads = config
            .scanning
            .threads
            .map_or_else(|| "0 (all cores)  (default)".to_string(), |v| v.to_string()),
        verbose = show_bool(config.scanning.verbose, false),
        extensions = show_list(config.scanning.extensions.as_deref(), "(from project_type)"),
        skip = show_list(config.scanning.skip.as_deref(), "[]"),
        sort = show_str(config.report.sort.as_deref(), "(none)"),
        reverse = show_bool(config.report.reverse, false),
        files = show_bool(config.report.files, false),
        msbuild = show_str(config.preprocess.msbuild.as_deref(), "\"msbuild\""),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}
