//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use modforge_core::Error;
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print an indented detail line under a status message
    pub fn detail(message: &str) {
        println!("  {}", message.dimmed());
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.len()));
    }
}

/// Print a structured error with its context and recovery suggestion
pub fn print_error(err: &Error) {
    Status::error(&format!("{} {}", err.code.dimmed(), err.message));
    if let Some(context) = &err.context {
        Status::detail(context);
    }
    if let Some(suggestion) = &err.suggestion {
        Status::detail(&format!("hint: {}", suggestion));
    }
}

/// Format a byte count for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(512), "512 B");
    }

    #[test]
    fn test_format_size_kb() {
        assert_eq!(format_size(4096), "4.00 KB");
    }

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "module", "modules"), "1 module");
        assert_eq!(format_count(4, "module", "modules"), "4 modules");
    }
}
