//! Table formatting utilities for CLI output.

/// Truncates a string to a maximum length, adding "..." if needed.
///
/// Counts characters, so multi-byte names are never split mid-codepoint.
///
/// # Examples
///
/// ```rust
/// use flinkenv_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("flink", 10), "flink");
/// assert_eq!(truncate_string("flink-1.13.2", 8), "flink...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: &Option<T>, default: &str) -> String {
    value
        .as_ref()
        .map_or_else(|| default.to_string(), ToString::to_string)
}
