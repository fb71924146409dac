//! CLI output formatting
//!
//! Human and JSON presentation for command results. Commands hand the
//! formatter structured values (archive listings, archived report documents,
//! plain status lines); the formatter owns the layout, so `--json` switches
//! every command uniformly.

use faultline_capture::ArchiveEntry;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
    /// Renders the archive index (`faultline report list`).
    fn archive_listing(&self, entries: &[ArchiveEntry]);
    /// Renders one archived report document (`faultline report view`).
    fn report_document(&self, value: &serde_json::Value);
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn print_json(&self, _value: &serde_json::Value) {
        // Human formatter doesn't print JSON
    }
    fn archive_listing(&self, entries: &[ArchiveEntry]) {
        println!("{:<12} {:<12} {:>10}", "ID", "Date", "Size");
        println!("{}", "-".repeat(36));
        for entry in entries {
            println!(
                "{:<12} {:<12} {:>10}",
                entry.id,
                entry.date,
                format_size(entry.size_bytes),
            );
        }
        println!();
        println!("Total: {} report(s)", entries.len());
    }
    fn report_document(&self, value: &serde_json::Value) {
        // Header fields first, then the rendered report body.
        for key in ["id", "timestamp", "kind", "file", "line", "severity"] {
            if let Some(val) = value.get(key) {
                println!("{}: {}", key, display_value(val));
            }
        }
        if let Some(report) = value.get("report").and_then(|r| r.as_str()) {
            println!();
            println!("{}", report);
        }
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
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
    fn archive_listing(&self, entries: &[ArchiveEntry]) {
        let items: Vec<serde_json::Value> = entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id,
                    "date": e.date,
                    "size_bytes": e.size_bytes,
                })
            })
            .collect();
        self.print_json(&serde_json::json!(items));
    }
    fn report_document(&self, value: &serde_json::Value) {
        self.print_json(value);
    }
}

pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter)
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
