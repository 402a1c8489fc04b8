//! Output formatting for user-facing status lines
//!
//! Two formatters share one trait: human output with check marks on
//! stdout and warnings on stderr, or JSON objects for scripting.
//! [`ConsoleObserver`] routes copy events from the use cases through a
//! formatter, and [`print_report`] renders the final [`CopyReport`].

use drivemirror_core::domain::{
    BucketName, CopyError, DestinationPath, Handling, RemoteEntry, WalkMode,
};
use drivemirror_core::ports::{ICopyObserver, SkipReason};
use drivemirror_core::usecases::CopyReport;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

/// Trait for formatting CLI output
pub trait OutputFormatter: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
}

/// Human-readable output formatter with checkmarks and indentation
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn print_json(&self, _value: &serde_json::Value) {
        // Human formatter doesn't print JSON
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn error(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "error": message})
        );
    }
    fn warn(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"level": "warning", "message": message})
        );
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter)
    }
}

// ============================================================================
// ConsoleObserver
// ============================================================================

/// Prints copy events as they happen
///
/// In JSON mode only isolated errors are reported (on stderr) so stdout
/// carries nothing but the final report.
pub struct ConsoleObserver {
    formatter: Box<dyn OutputFormatter>,
    format: OutputFormat,
    quiet: bool,
}

impl ConsoleObserver {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self {
            formatter: get_formatter(format.is_json()),
            format,
            quiet,
        }
    }

    fn chatty(&self) -> bool {
        !self.quiet && !self.format.is_json()
    }
}

impl ICopyObserver for ConsoleObserver {
    fn on_entry(&self, entry: &RemoteEntry, destination: &DestinationPath) {
        if self.chatty() {
            self.formatter.info(&entry_line(entry, destination));
        }
    }

    fn on_progress(&self, destination: &DestinationPath, fraction: f64) {
        if self.chatty() {
            self.formatter
                .info(&format!("  {} {}", percent(fraction), destination));
        }
    }

    fn on_uploaded(&self, bucket: &BucketName, destination: &DestinationPath, bytes: usize) {
        if self.chatty() {
            self.formatter.success(&format!(
                "Uploaded '{}' to {} ({} bytes)",
                destination,
                gs_url(bucket, destination),
                bytes
            ));
        }
    }

    fn on_skipped(&self, entry: &RemoteEntry, reason: SkipReason) {
        if self.chatty() {
            self.formatter
                .info(&format!("Skipped '{}' ({})", entry.name, reason));
        }
    }

    fn on_isolated_error(&self, error: &CopyError) {
        self.formatter.warn(&error.to_string());
    }
}

/// Status line announcing an entry, folders and skipped types included
pub fn entry_line(entry: &RemoteEntry, destination: &DestinationPath) -> String {
    let kind = match entry.handling() {
        Handling::Folder => "folder",
        _ => "file",
    };
    format!(
        "Processing {} '{}' ({}) -> {}",
        kind, entry.name, entry.content_type, destination
    )
}

/// Formats a download fraction as a whole percentage
pub fn percent(fraction: f64) -> String {
    format!("{:>3}%", (fraction.clamp(0.0, 1.0) * 100.0).round() as u32)
}

/// `gs://bucket/path` for an object
pub fn gs_url(bucket: &BucketName, destination: &DestinationPath) -> String {
    format!("gs://{}/{}", bucket, destination)
}

// ============================================================================
// Report
// ============================================================================

/// JSON rendering of a finished run
pub fn report_json(mode: WalkMode, bucket: &BucketName, report: &CopyReport) -> serde_json::Value {
    let errors: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
    serde_json::json!({
        "success": report.is_clean(),
        "mode": mode.to_string(),
        "bucket": bucket.as_str(),
        "files_copied": report.files_copied,
        "bytes_uploaded": report.bytes_uploaded,
        "folders_visited": report.folders_visited,
        "skipped": report.skipped,
        "errors": errors,
        "started_at": report.started_at.to_rfc3339(),
        "duration_ms": report.duration_ms,
    })
}

/// Prints the summary of a finished run
pub fn print_report(
    formatter: &dyn OutputFormatter,
    format: OutputFormat,
    mode: WalkMode,
    bucket: &BucketName,
    report: &CopyReport,
) {
    if format.is_json() {
        formatter.print_json(&report_json(mode, bucket, report));
        return;
    }

    formatter.success(&format!(
        "Copied {} file{} ({} bytes) to gs://{} in {} ms",
        report.files_copied,
        if report.files_copied == 1 { "" } else { "s" },
        report.bytes_uploaded,
        bucket,
        report.duration_ms
    ));
    if mode == WalkMode::Recursive {
        formatter.info(&format!("Folders visited: {}", report.folders_visited));
    }
    if report.skipped > 0 {
        formatter.info(&format!("Skipped:         {}", report.skipped));
    }
    if !report.is_clean() {
        formatter.warn(&format!(
            "{} error{} isolated during the copy:",
            report.errors.len(),
            if report.errors.len() == 1 { "" } else { "s" }
        ));
        for error in &report.errors {
            formatter.info(&format!("  {}", error));
        }
    }
}
