//! cscheck core library
//!
//! Verifies files against reference checksums: resolves a digest algorithm,
//! streams the file through it with adaptive buffering, reports progress
//! and timing, and supports cooperative cancellation from another task.

pub mod buffer;
pub mod cancel;
pub mod comparator;
pub mod engine;
pub mod error;
pub mod hashing;
pub mod progress;
pub mod runner;
pub mod timing;

// Re-export main types
pub use buffer::{allocate_buffer, buffer_size_for, expected_reads};
pub use cancel::CancellationFlag;
pub use comparator::{Comparison, compare};
pub use engine::{DigestEngine, HashJob, HashReport, JobResult, Outcome};
pub use error::{Error, Result};
pub use hashing::{AlgorithmRegistry, HashAlgorithm, digest_bytes};
pub use progress::{NullProvider, ProgressProvider, ProgressSnapshot, ProgressUpdate};
pub use runner::{JobEvent, JobHandle, JobRunner};
pub use timing::format_elapsed;
