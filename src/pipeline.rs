//! Concurrent per-document extraction.
//!
//! Documents are independent, so each one is read and extracted on its own
//! task with at most `concurrency` in flight. Parsing is CPU-bound and runs
//! on tokio's blocking pool under a per-document time bound. Results are
//! collected with `buffered`, which keeps them in traversal order.

use crate::extract::extract_record;
use crate::models::{NewsRecord, READ_FAILURE, TIMEOUT_FAILURE};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

/// Error indicator for an extraction task that panicked or was cancelled.
const TASK_FAILURE: &str = "Extraction task failed";

/// Tuning for [`extract_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Maximum number of documents processed at once.
    pub concurrency: usize,
    /// Upper bound on parsing and extracting a single document.
    pub parse_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            concurrency: 12,
            parse_timeout: Duration::from_secs(30),
        }
    }
}

/// Extract one record per file, in the order the files were given.
#[instrument(level = "info", skip_all, fields(files = files.len()))]
pub async fn extract_all(files: Vec<PathBuf>, options: PipelineOptions) -> Vec<NewsRecord> {
    let total = files.len();
    info!(
        concurrency = options.concurrency,
        timeout_secs = options.parse_timeout.as_secs(),
        "Starting extraction"
    );

    let records: Vec<NewsRecord> = stream::iter(files)
        .map(|path| process_file(path, options.parse_timeout))
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    let failed = records.iter().filter(|r| r.is_failed()).count();
    info!(total, successful = total - failed, failed, "Completed extraction");
    records
}

/// Read and extract a single document. Never fails: problems become error records.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
async fn process_file(path: PathBuf, parse_timeout: Duration) -> NewsRecord {
    let source = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read document");
            return NewsRecord::failed(path, READ_FAILURE);
        }
    };

    let task_path = path.clone();
    run_bounded(path, parse_timeout, move || extract_record(&task_path, &source)).await
}

/// Run `job` on the blocking pool, turning a timeout or a failed task into an
/// error record for `path`.
async fn run_bounded<F>(path: PathBuf, parse_timeout: Duration, job: F) -> NewsRecord
where
    F: FnOnce() -> NewsRecord + Send + 'static,
{
    let task = tokio::task::spawn_blocking(job);

    // A timed-out blocking task keeps running to completion; its result is dropped.
    match timeout(parse_timeout, task).await {
        Ok(Ok(record)) => record,
        Ok(Err(e)) => {
            error!(path = %path.display(), error = %e, "Extraction task failed");
            NewsRecord::failed(path, TASK_FAILURE)
        }
        Err(_) => {
            warn!(
                path = %path.display(),
                timeout_ms = parse_timeout.as_millis() as u64,
                "Extraction timed out"
            );
            NewsRecord::failed(path, TIMEOUT_FAILURE)
        }
    }
}
