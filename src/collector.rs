//! Parallel parsing of candidate project files.
//!
//! The [`Collector`] parses every candidate on a bounded rayon pool and
//! funnels successful results through an `mpsc` channel to exactly one
//! consumer, which runs on the calling thread.
//!
//! # Completion
//!
//! Producers run inside a scoped thread that owns the only original
//! [`Sender`](std::sync::mpsc::Sender). Each rayon split gets its own clone,
//! and all of them are dropped once the pool has joined every task. Only then
//! does the channel close, which ends the consumer loop. The consumer can
//! neither exit while a task is outstanding nor wait on a result that will
//! never arrive.
//!
//! # Failures
//!
//! A file that fails to parse is logged and dropped. It never produces an
//! entry and never stops the other tasks.

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
};

use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use crate::{
    error::ScanError,
    parser::{DescriptionParser, MsBuildParser},
    project::{ProjectEntry, ScanResult},
};

/// Parses candidate files in parallel and hands results to a single sink.
#[derive(Debug)]
pub struct Collector<P = MsBuildParser> {
    parser: P,
    pool: ThreadPool,
    cancelled: Arc<AtomicBool>,
}

impl Collector<MsBuildParser> {
    /// Create a collector for MSBuild projects.
    ///
    /// `threads` bounds the worker pool; 0 means one worker per core.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ThreadPool`] if the pool cannot be built.
    pub fn new(threads: usize) -> Result<Self, ScanError> {
        Self::with_parser(MsBuildParser, threads)
    }
}

impl<P: DescriptionParser> Collector<P> {
    /// Create a collector for an arbitrary description dialect.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::ThreadPool`] if the pool cannot be built.
    pub fn with_parser(parser: P, threads: usize) -> Result<Self, ScanError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("msproj-parse-{i}"))
            .build()?;

        Ok(Self {
            parser,
            pool,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Number of worker threads in the pool.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Shared flag that stops tasks which have not started yet.
    ///
    /// Setting it does not interrupt a parse already in progress; tasks that
    /// observe it afterwards return without producing an entry.
    #[must_use]
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Parse every path and collect the successful entries.
    ///
    /// Entries appear in the order workers finished, not in path order. The
    /// result holds between 0 and `paths.len()` entries.
    #[must_use]
    pub fn collect_all(&self, paths: &[PathBuf]) -> ScanResult {
        let mut result = ScanResult::default();
        self.collect_into(paths, |entry| result.push(entry));
        result
    }

    /// Parse every path, handing each successful entry to `sink`.
    ///
    /// `sink` is the single consumer: it runs on the calling thread, one
    /// entry at a time, and this method returns only after every task has
    /// finished and every entry has been handed over.
    ///
    /// Returns the number of entries delivered.
    pub fn collect_into<F>(&self, paths: &[PathBuf], mut sink: F) -> usize
    where
        F: FnMut(ProjectEntry),
    {
        let (tx, rx) = mpsc::channel::<ProjectEntry>();
        let mut delivered = 0;

        thread::scope(|scope| {
            scope.spawn(move || {
                self.pool.install(|| {
                    paths
                        .par_iter()
                        .for_each_with(tx, |tx, path| self.run_task(path, tx));
                });
            });

            for entry in rx {
                sink(entry);
                delivered += 1;
            }
        });

        tracing::info!(
            candidates = paths.len(),
            parsed = delivered,
            skipped = paths.len() - delivered,
            "collection complete"
        );
        delivered
    }

    fn run_task(&self, path: &Path, tx: &mpsc::Sender<ProjectEntry>) {
        if self.is_cancelled() {
            return;
        }

        match self.parser.parse(path) {
            Ok(description) => {
                let entry = ProjectEntry::from_description(&description);
                // The receiver outlives every sender, so this cannot fail.
                let _ = tx.send(entry);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping project file");
            }
        }
    }
}
