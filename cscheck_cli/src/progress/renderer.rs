//! Progress rendering for the CLI
//!
//! Turns the engine's progress updates into an indicatif bar on stderr and
//! keeps the status lines the job reported for the final summary.

use colored::*;
use cscheck_core::progress::{ProgressSnapshot, ProgressUpdate};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str = "{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% | {bytes}/{total_bytes} | {bytes_per_sec} | ETA: {eta}";

/// Status lines reported by a job, in the form the engine produced them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLines {
    /// `"Bytes read: R / T"`
    pub bytes: Option<String>,
    /// Completion time, interruption or failure
    pub timing: Option<String>,
    /// Generated digest; absent when cancelled or failed
    pub digest: Option<String>,
}

/// Progress renderer that manages visual progress display
pub struct ProgressRenderer {
    bar: ProgressBar,
    label: String,
    status: StatusLines,
}

impl ProgressRenderer {
    /// Create a renderer that draws to stderr
    pub fn new(label: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        Self::with_bar(bar, label)
    }

    /// Create a renderer that tracks updates without drawing
    pub fn hidden(label: impl Into<String>) -> Self {
        Self::with_bar(ProgressBar::hidden(), label)
    }

    fn with_bar(bar: ProgressBar, label: impl Into<String>) -> Self {
        let label = label.into();
        bar.set_message(format!("{} {}", "Starting".bold(), label.cyan()));

        Self {
            bar,
            label,
            status: StatusLines::default(),
        }
    }

    /// Handle a progress update
    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::Snapshot(snapshot) => self.update_snapshot(snapshot),
            ProgressUpdate::BytesStatus { message } => {
                log::debug!("{message}");
                self.bar.set_message(message.clone());
                self.status.bytes = Some(message);
            }
            ProgressUpdate::TimingStatus { message } => {
                log::debug!("{message}");
                self.bar.set_message(message.clone());
                self.status.timing = Some(message);
            }
            ProgressUpdate::Digest { value } => self.status.digest = Some(value),
        }
    }

    fn update_snapshot(&mut self, snapshot: ProgressSnapshot) {
        if snapshot.is_starting() {
            self.bar.set_length(snapshot.total_bytes);
            self.bar.set_style(
                ProgressStyle::default_bar()
                    .template(BAR_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            self.bar
                .set_message(format!("{} {}", "Hashing".bold(), self.label.cyan()));
            return;
        }

        self.bar.set_position(snapshot.bytes_read);
        if snapshot.is_done() {
            self.bar
                .set_message(format!("{} {}", "Finalizing".bold(), self.label.cyan()));
        }
    }

    /// Status lines received so far
    pub fn status(&self) -> &StatusLines {
        &self.status
    }

    /// Current bar message
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_statuses() {
        let mut renderer = ProgressRenderer::hidden("hello.txt");

        renderer.handle_update(ProgressUpdate::Snapshot(ProgressSnapshot::starting(5)));
        renderer.handle_update(ProgressUpdate::Snapshot(ProgressSnapshot::new(5, 5)));
        renderer.handle_update(ProgressUpdate::BytesStatus {
            message: "Bytes read: 5 / 5".to_string(),
        });
        renderer.handle_update(ProgressUpdate::Digest {
            value: "abc".to_string(),
        });
        renderer.handle_update(ProgressUpdate::TimingStatus {
            message: "Operation achieved in 0.001s".to_string(),
        });
        renderer.finish();

        let status = renderer.status();
        assert_eq!(status.bytes.as_deref(), Some("Bytes read: 5 / 5"));
        assert_eq!(status.digest.as_deref(), Some("abc"));
        assert_eq!(status.timing.as_deref(), Some("Operation achieved in 0.001s"));
    }

    #[test]
    fn test_bar_message_follows_statuses() {
        let mut renderer = ProgressRenderer::hidden("disk.iso");

        renderer.handle_update(ProgressUpdate::Snapshot(ProgressSnapshot::starting(10)));
        assert!(renderer.message().contains("disk.iso"));

        renderer.handle_update(ProgressUpdate::TimingStatus {
            message: "Operation failed: I/O error".to_string(),
        });
        assert_eq!(renderer.message(), "Operation failed: I/O error");
    }

    #[test]
    fn test_starting_sentinel_records_nothing() {
        let mut renderer = ProgressRenderer::hidden("empty.bin");
        renderer.handle_update(ProgressUpdate::Snapshot(ProgressSnapshot::starting(0)));

        assert_eq!(renderer.status(), &StatusLines::default());
    }
}
