//! Progress reporting abstractions
//!
//! The digest engine reports through a `ProgressProvider` without knowing
//! who listens. The job runner forwards updates over a channel; tests and
//! one-shot callers can collect or discard them.

use serde::Serialize;

/// Fraction reported before the first read, meaning "starting"
pub const STARTING_FRACTION: f64 = -1.0;

/// Core trait for progress reporting
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Signal that no further updates will be reported
    fn complete(&self);
}

/// Point-in-time view of how far a job has read its file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// `bytes_read / total_bytes`, or [`STARTING_FRACTION`] before any read
    pub fraction: f64,
    pub bytes_read: u64,
    pub total_bytes: u64,
}

impl ProgressSnapshot {
    /// Snapshot emitted once before the first read
    pub fn starting(total_bytes: u64) -> Self {
        Self {
            fraction: STARTING_FRACTION,
            bytes_read: 0,
            total_bytes,
        }
    }

    /// Snapshot after `bytes_read` of `total_bytes` have been hashed
    pub fn new(bytes_read: u64, total_bytes: u64) -> Self {
        let fraction = if total_bytes == 0 {
            1.0
        } else {
            bytes_read as f64 / total_bytes as f64
        };

        Self {
            fraction,
            bytes_read,
            total_bytes,
        }
    }

    /// Whether this is the pre-read sentinel
    pub fn is_starting(&self) -> bool {
        self.fraction < 0.0
    }

    /// Whether the whole file has been read
    pub fn is_done(&self) -> bool {
        self.fraction >= 1.0
    }
}

/// Unified progress update type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProgressUpdate {
    /// Fraction of the file read so far
    Snapshot(ProgressSnapshot),

    /// Byte-count status, e.g. `"Bytes read: 5 / 5"`
    BytesStatus { message: String },

    /// Timing or outcome status, e.g. `"Operation achieved in 0.004s"`
    TimingStatus { message: String },

    /// Generated digest, lower-case hex
    Digest { value: String },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {}

    fn complete(&self) {}
}
