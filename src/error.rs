//! Error types for scanning, parsing and preprocessing.
//!
//! # Error Recovery Strategy
//!
//! - **Walk errors** ([`ScanError::Walk`]): fatal, the whole scan is aborted
//! - **Parse errors** ([`ParseError`]): scoped to one file, the collector
//!   logs and skips them
//! - **Preprocess errors** ([`PreprocessError`]): fatal for the single
//!   project being preprocessed

use std::path::{Path, PathBuf};

/// Errors that abort a whole tree scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Traversal failed on the root or on any entry below it.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The bounded worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors produced while decoding a single project description file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The project file that couldn't be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed markup document.
    #[error("malformed project file {}: {message}", path.display())]
    Format {
        /// The project file that couldn't be decoded.
        path: PathBuf,
        /// Description of the syntax or encoding problem.
        message: String,
    },
}

impl ParseError {
    /// Creates a new [`ParseError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ParseError::Format`] error.
    #[inline]
    pub fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the project file this error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Format { path, .. } => path,
        }
    }
}

/// Errors from running the external preprocessing tool.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    /// The project path has no file name or no parent directory.
    #[error("invalid project path: {}", _0.display())]
    InvalidPath(PathBuf),

    /// The temporary output directory could not be created.
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    /// The tool binary could not be started.
    #[error("failed to run `{tool}`: {source}")]
    Spawn {
        /// The tool that was invoked.
        tool: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but exited unsuccessfully.
    #[error("`{tool}` exited with {status}: {stderr}")]
    ToolFailed {
        /// The tool that was invoked.
        tool: String,
        /// Exit status description.
        status: String,
        /// Captured standard error output.
        stderr: String,
    },

    /// The preprocessed output could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
