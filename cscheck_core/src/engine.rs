//! Streaming digest engine
//!
//! Reads one file in fixed-size chunks, feeds the chunks to the selected
//! hasher, reports progress after every read and compares the finished
//! digest with the reference hash. Cancellation is polled before each read.

use crate::buffer::{allocate_buffer, buffer_size_for};
use crate::cancel::CancellationFlag;
use crate::comparator::{Comparison, compare};
use crate::error::IoError;
use crate::hashing::{AlgorithmRegistry, HashAlgorithm, StreamingHasher};
use crate::progress::{ProgressProvider, ProgressSnapshot, ProgressUpdate};
use crate::timing::{INTERRUPTED_MESSAGE, bytes_read_message, completion_message};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Terminal result of one job: a report, or the error that ended it
pub type JobResult = Result<HashReport>;

/// A request to hash one file and compare it with a reference hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashJob {
    pub reference_hash: String,
    pub path: PathBuf,
    pub algorithm: HashAlgorithm,
}

impl HashJob {
    pub fn new(
        reference_hash: impl Into<String>,
        path: impl Into<PathBuf>,
        algorithm: HashAlgorithm,
    ) -> Self {
        Self {
            reference_hash: reference_hash.into(),
            path: path.into(),
            algorithm,
        }
    }
}

/// How a job ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Match,
    Mismatch,
    Cancelled,
}

impl Outcome {
    /// Numeric code: 1 match, 0 mismatch, -1 cancelled
    pub fn code(self) -> i32 {
        match self {
            Outcome::Match => 1,
            Outcome::Mismatch => 0,
            Outcome::Cancelled => -1,
        }
    }

    /// Upper-case label for display
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Match => "MATCH",
            Outcome::Mismatch => "MISMATCH",
            Outcome::Cancelled => "CANCELLED",
        }
    }
}

impl From<Comparison> for Outcome {
    fn from(comparison: Comparison) -> Self {
        match comparison {
            Comparison::Match => Outcome::Match,
            Comparison::Mismatch => Outcome::Mismatch,
        }
    }
}

/// Terminal state of a job that ran to completion or was cancelled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HashReport {
    pub path: PathBuf,
    pub algorithm: HashAlgorithm,
    pub reference_hash: String,
    pub outcome: Outcome,
    /// Lower-case hex digest; `None` when cancelled
    pub generated_digest: Option<String>,
    pub bytes_read: u64,
    pub total_bytes: u64,
    pub buffer_size: usize,
    pub elapsed: Duration,
}

/// Streams files through the hash providers of a registry
#[derive(Clone)]
pub struct DigestEngine {
    registry: Arc<AlgorithmRegistry>,
}

impl std::fmt::Debug for DigestEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestEngine")
            .field("algorithms", &self.registry.list())
            .finish()
    }
}

impl Default for DigestEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestEngine {
    /// Create an engine over the built-in algorithm registry
    pub fn new() -> Self {
        Self::with_registry(AlgorithmRegistry::global())
    }

    /// Create an engine over a custom registry
    pub fn with_registry(registry: Arc<AlgorithmRegistry>) -> Self {
        Self { registry }
    }

    /// Run one job to its terminal state.
    ///
    /// Errors are logged and reported as a timing status before being
    /// returned; they never panic the calling thread.
    pub fn run(
        &self,
        job: &HashJob,
        cancel: &CancellationFlag,
        progress: &dyn ProgressProvider,
    ) -> JobResult {
        let result = self.digest_file(job, cancel, progress);
        report_failure(job, progress, result)
    }

    fn digest_file(
        &self,
        job: &HashJob,
        cancel: &CancellationFlag,
        progress: &dyn ProgressProvider,
    ) -> JobResult {
        let hasher = self.registry.provider(job.algorithm)?.create_hasher();

        let file = open_for_read(&job.path)?;
        let total_bytes = file
            .metadata()
            .map_err(|e| IoError::from_std(e).with_path(&job.path))?
            .len();

        // Bounded to the length captured at open, so bytes_read <= total_bytes
        self.digest_reader(job, hasher, file.take(total_bytes), total_bytes, cancel, progress)
    }

    /// Stream `reader` through `hasher`, polling `cancel` before each read
    fn digest_reader<R: Read>(
        &self,
        job: &HashJob,
        mut hasher: Box<dyn StreamingHasher>,
        mut reader: R,
        total_bytes: u64,
        cancel: &CancellationFlag,
        progress: &dyn ProgressProvider,
    ) -> JobResult {
        let buffer_size = buffer_size_for(total_bytes);

        log::info!("File path: {}", job.path.display());
        log::info!("File length: {total_bytes} bytes");
        log::info!("Buffer size: {buffer_size} bytes");

        progress.report(ProgressUpdate::Snapshot(ProgressSnapshot::starting(
            total_bytes,
        )));

        let start = Instant::now();
        let mut buffer = allocate_buffer(total_bytes);
        let mut bytes_read = 0u64;

        loop {
            if cancel.is_cancelled() {
                return Ok(self.cancelled(
                    job,
                    bytes_read,
                    total_bytes,
                    buffer_size,
                    start,
                    progress,
                ));
            }

            let n = match reader.read(&mut buffer) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(IoError::from_std(e).with_path(&job.path))),
            };

            if n == 0 {
                break;
            }

            hasher.update(&buffer[..n]);
            bytes_read += n as u64;

            progress.report(ProgressUpdate::Snapshot(ProgressSnapshot::new(
                bytes_read,
                total_bytes,
            )));

            if bytes_read == total_bytes {
                break;
            }
        }

        let generated = hex::encode(hasher.finalize());
        let elapsed = start.elapsed();
        let outcome = Outcome::from(compare(&job.reference_hash, &generated));

        log::info!("Given hash: {}", job.reference_hash);
        log::info!("Gen {}: {generated}", job.algorithm);
        log::info!("Bytes read: {bytes_read} / {total_bytes}");
        log::info!("Result: {}", outcome.label());

        progress.report(ProgressUpdate::BytesStatus {
            message: bytes_read_message(bytes_read, total_bytes),
        });
        progress.report(ProgressUpdate::Digest {
            value: generated.clone(),
        });
        progress.report(ProgressUpdate::TimingStatus {
            message: completion_message(elapsed),
        });

        Ok(HashReport {
            path: job.path.clone(),
            algorithm: job.algorithm,
            reference_hash: job.reference_hash.clone(),
            outcome,
            generated_digest: Some(generated),
            bytes_read,
            total_bytes,
            buffer_size,
            elapsed,
        })
    }

    fn cancelled(
        &self,
        job: &HashJob,
        bytes_read: u64,
        total_bytes: u64,
        buffer_size: usize,
        start: Instant,
        progress: &dyn ProgressProvider,
    ) -> HashReport {
        log::info!(
            "Operation cancelled after {bytes_read} / {total_bytes} bytes of {}",
            job.path.display()
        );

        progress.report(ProgressUpdate::BytesStatus {
            message: bytes_read_message(bytes_read, total_bytes),
        });
        progress.report(ProgressUpdate::TimingStatus {
            message: INTERRUPTED_MESSAGE.to_string(),
        });

        HashReport {
            path: job.path.clone(),
            algorithm: job.algorithm,
            reference_hash: job.reference_hash.clone(),
            outcome: Outcome::Cancelled,
            generated_digest: None,
            bytes_read,
            total_bytes,
            buffer_size,
            elapsed: start.elapsed(),
        }
    }
}

/// Log a failed job and report it as the final timing status
fn report_failure(job: &HashJob, progress: &dyn ProgressProvider, result: JobResult) -> JobResult {
    if let Err(err) = &result {
        log::error!("Hashing {} failed: {err}", job.path.display());
        progress.report(ProgressUpdate::TimingStatus {
            message: format!("Operation failed: {err}"),
        });
    }

    result
}

/// Open a regular file for sequential reading, mapping failures to `IoError`
fn open_for_read(path: &Path) -> Result<File> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IoError::file_not_found(path),
        ErrorKind::PermissionDenied => IoError::permission_denied(path, e),
        _ => IoError::from_std(e).with_path(path),
    })?;

    let metadata = file
        .metadata()
        .map_err(|e| IoError::from_std(e).with_path(path))?;
    if !metadata.is_file() {
        return Err(Error::Io(IoError::not_a_file(path)));
    }

    Ok(file)
}
