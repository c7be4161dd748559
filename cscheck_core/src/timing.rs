//! Elapsed time formatting for status messages

use std::time::Duration;

/// Timing status emitted when a job is cancelled
pub const INTERRUPTED_MESSAGE: &str = "Operation interrupted";

/// Format an elapsed duration as `"{m}min{s}s"` or `"{s}.{ms}s"`.
///
/// Units are truncated, never rounded.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_seconds = elapsed.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;

    if minutes > 0 {
        format!("{minutes}min{seconds}s")
    } else {
        format!("{seconds}.{:03}s", elapsed.subsec_millis())
    }
}

/// Timing status emitted when a job runs to completion
pub fn completion_message(elapsed: Duration) -> String {
    format!("Operation achieved in {}", format_elapsed(elapsed))
}

/// Byte-count status emitted at the end of a job
pub fn bytes_read_message(bytes_read: u64, total_bytes: u64) -> String {
    format!("Bytes read: {bytes_read} / {total_bytes}")
}
