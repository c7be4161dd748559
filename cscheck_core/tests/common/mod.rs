//! Common test utilities for integration tests

#![allow(dead_code)]

use cscheck_core::progress::{ProgressProvider, ProgressSnapshot, ProgressUpdate};
use cscheck_core::CancellationFlag;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Provider that records every update it receives
#[derive(Default)]
pub struct RecordingProvider {
    updates: Mutex<Vec<ProgressUpdate>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn snapshots(&self) -> Vec<ProgressSnapshot> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                ProgressUpdate::Snapshot(snapshot) => Some(snapshot),
                _ => None,
            })
            .collect()
    }

    pub fn timing_statuses(&self) -> Vec<String> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                ProgressUpdate::TimingStatus { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl ProgressProvider for RecordingProvider {
    fn report(&self, update: ProgressUpdate) {
        self.updates.lock().unwrap().push(update);
    }

    fn complete(&self) {}
}

/// Provider that raises a cancellation flag once `after` reads have been reported
pub struct CancelAfterReads {
    flag: CancellationFlag,
    after: usize,
    reads: Mutex<usize>,
    pub recorder: RecordingProvider,
}

impl CancelAfterReads {
    pub fn new(flag: CancellationFlag, after: usize) -> Self {
        Self {
            flag,
            after,
            reads: Mutex::new(0),
            recorder: RecordingProvider::new(),
        }
    }
}

impl ProgressProvider for CancelAfterReads {
    fn report(&self, update: ProgressUpdate) {
        if let ProgressUpdate::Snapshot(snapshot) = &update
            && !snapshot.is_starting()
        {
            let mut reads = self.reads.lock().unwrap();
            *reads += 1;
            if *reads == self.after {
                self.flag.cancel();
            }
        }
        self.recorder.report(update);
    }

    fn complete(&self) {}
}

/// Deterministic, non-uniform content of the given length
pub fn patterned_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Write `content` to `dir/name` and return the path
pub fn write_fixture(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
