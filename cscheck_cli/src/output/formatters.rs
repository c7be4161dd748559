use super::OutputFormatter;
use crate::progress::{StatusLines, format_bytes};
use anyhow::Result;
use colored::*;
use cscheck_core::{HashReport, Outcome};
use serde_json::json;

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn outcome_label(&self, outcome: Outcome) -> String {
        match outcome {
            Outcome::Match => self.colorize(outcome.label(), |s| s.green().bold()),
            Outcome::Mismatch => self.colorize(outcome.label(), |s| s.red().bold()),
            Outcome::Cancelled => self.colorize(outcome.label(), |s| s.yellow().bold()),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, report: &HashReport, status: &StatusLines) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("File: {}\n", report.path.display()));
        output.push_str(&format!(
            "Size: {} ({})\n",
            format_bytes(report.total_bytes),
            report.total_bytes
        ));
        output.push_str(&format!(
            "Algorithm: {}\n",
            self.colorize(report.algorithm.name(), |s| s.yellow())
        ));
        output.push_str(&format!("Given hash: {}\n", report.reference_hash));

        if let Some(digest) = &status.digest {
            output.push_str(&format!(
                "Generated hash: {}\n",
                self.colorize(digest, |s| s.cyan())
            ));
        }

        for line in [&status.bytes, &status.timing].into_iter().flatten() {
            output.push_str(&format!("{line}\n"));
        }
        output.push_str(&format!("Result: {}\n", self.outcome_label(report.outcome)));

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &HashReport, status: &StatusLines) -> Result<String> {
        let json_result = json!({
            "path": report.path.to_string_lossy(),
            "algorithm": report.algorithm.name(),
            "reference_hash": report.reference_hash,
            "generated_hash": report.generated_digest,
            "result": report.outcome.label().to_lowercase(),
            "code": report.outcome.code(),
            "bytes_read": report.bytes_read,
            "total_bytes": report.total_bytes,
            "buffer_size": report.buffer_size,
            "elapsed_ms": report.elapsed.as_millis() as u64,
            "bytes_status": status.bytes,
            "timing_status": status.timing,
        });

        if self.pretty {
            Ok(serde_json::to_string_pretty(&json_result)?)
        } else {
            Ok(serde_json::to_string(&json_result)?)
        }
    }
}
