//! Badge markdown rendering

/// Percentage written when coverage is complete (or assumed complete)
pub const FULL_PERCENT: &str = "100";

const BADGE_BASE_URL: &str = "https://img.shields.io/badge";

/// Format a coverage percentage for a badge.
///
/// Anything at or above 100 is `"100"`; otherwise one decimal place with the
/// trailing zero and dot stripped (`97.50` -> `"97.5"`, `83.0` -> `"83"`).
pub fn format_percent(value: f64) -> String {
    if value >= 100.0 {
        return FULL_PERCENT.to_string();
    }
    let rendered = format!("{:.1}", value);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Build the one-line pair of test and doc coverage badges
pub fn build_badge_line(test_percent: &str, doc_percent: &str) -> String {
    let test_badge = format!(
        "![Test Coverage]({}/test%20coverage-{}%25-brightgreen)",
        BADGE_BASE_URL, test_percent
    );
    let doc_badge = format!(
        "![Doc Coverage]({}/doc%20coverage-{}%25-brightgreen)",
        BADGE_BASE_URL, doc_percent
    );
    format!("{} {}", test_badge, doc_badge)
}
