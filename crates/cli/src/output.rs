//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
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

/// Wrap the given half-open char ranges of `text` with `mark`.
///
/// Ranges must be sorted and non-overlapping; out-of-range ends are clamped.
pub fn mark_ranges(text: &str, ranges: &[(usize, usize)], mark: impl Fn(&str) -> String) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for &(start, end) in ranges {
        let start = start.clamp(cursor, chars.len());
        let end = end.clamp(start, chars.len());
        out.extend(&chars[cursor..start]);
        if start < end {
            let piece: String = chars[start..end].iter().collect();
            out.push_str(&mark(&piece));
        }
        cursor = end;
    }

    out.extend(&chars[cursor..]);
    out
}

/// Highlight matched char ranges in bold yellow
pub fn highlight(text: &str, ranges: &[(usize, usize)]) -> String {
    mark_ranges(text, ranges, |piece| piece.yellow().bold().to_string())
}

/// One ranked result line: rank, score, type label and title
pub fn result_line(rank: usize, score: u32, kind: &str, title: &str) -> String {
    format!(
        "{} {} {} {}",
        format!("{:>3}.", rank).dimmed(),
        format!("{:>4}", score).cyan(),
        format!("[{}]", kind).dimmed(),
        title
    )
}
