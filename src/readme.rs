//! README badge block patching
//!
//! The badge block is three lines:
//!
//! ```text
//! <!-- coverage-badges:start -->
//! ![Test Coverage](...) ![Doc Coverage](...)
//! <!-- coverage-badges:end -->
//! ```
//!
//! An existing block is replaced in place. Without one, a new block goes
//! under a `Title` / `=====` header when the document opens with one, and at
//! the very top otherwise.

use crate::error::{BadgeError, Result};
use std::path::Path;
use tracing::{debug, warn};

pub const BADGE_START: &str = "<!-- coverage-badges:start -->";
pub const BADGE_END: &str = "<!-- coverage-badges:end -->";

/// Outcome of a README update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadmeStatus {
    /// Content changed and was written to disk
    Updated,
    /// Content changed but the write was suppressed (check mode)
    Stale,
    /// Badges were already current
    Unchanged,
}

fn render_block(badge_line: &str) -> String {
    format!("{}\n{}\n{}", BADGE_START, badge_line, BADGE_END)
}

/// Line content without its `\n` / `\r\n` terminator
fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Indices of the first end marker line that follows a start marker, paired
/// with the nearest start marker above it.
///
/// A stray start marker earlier in the document never widens the span.
fn find_block(lines: &[&str]) -> Option<(usize, usize)> {
    let mut start = None;
    for (i, line) in lines.iter().enumerate() {
        match strip_terminator(line) {
            BADGE_START => start = Some(i),
            BADGE_END => {
                if let Some(start) = start {
                    return Some((start, i));
                }
            }
            _ => {}
        }
    }
    None
}

fn is_title_underline(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '=')
}

/// Insert a fresh block near the top of `content`
fn insert_block(content: &str, block: &str) -> String {
    let mut lines: Vec<&str> = content.lines().collect();

    let mut insert_at = 0;
    if lines.len() >= 2 && is_title_underline(lines[1]) {
        insert_at = 2;
    }
    if insert_at > 0 && !lines[insert_at - 1].trim().is_empty() {
        lines.insert(insert_at, "");
        insert_at += 1;
    }
    lines.insert(insert_at, block);
    insert_at += 1;
    if insert_at < lines.len() && !lines[insert_at].trim().is_empty() {
        lines.insert(insert_at, "");
    }

    let mut updated = lines.join("\n");
    if !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated
}

/// Return `content` with the badge block set to `badge_line`.
///
/// Only the delimited span changes when a start/end pair exists; every other
/// byte is preserved. Applying the same badge line twice is a no-op.
pub fn patch_badges(content: &str, badge_line: &str) -> String {
    let block = render_block(badge_line);
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    match find_block(&lines) {
        Some((start, end)) => {
            debug!("Replacing badge block on lines {}-{}", start + 1, end + 1);
            let end_line = lines[end];
            let terminator = &end_line[strip_terminator(end_line).len()..];

            let mut updated = String::with_capacity(content.len() + block.len());
            lines[..start].iter().for_each(|l| updated.push_str(l));
            updated.push_str(&block);
            updated.push_str(terminator);
            lines[end + 1..].iter().for_each(|l| updated.push_str(l));
            updated
        }
        None => {
            if lines
                .iter()
                .any(|l| matches!(strip_terminator(l), BADGE_START | BADGE_END))
            {
                warn!("Unpaired coverage badge marker found; inserting a new block");
            }
            insert_block(content, &block)
        }
    }
}

/// Patch the README at `path`, writing only when the content changes.
///
/// With `write == false` the file is never touched and a would-be change is
/// reported as [`ReadmeStatus::Stale`].
pub fn update_readme(path: &Path, badge_line: &str, write: bool) -> Result<ReadmeStatus> {
    if !path.is_file() {
        return Err(BadgeError::ReadmeNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| BadgeError::io(path, e))?;
    let updated = patch_badges(&content, badge_line);

    if updated == content {
        return Ok(ReadmeStatus::Unchanged);
    }
    if !write {
        return Ok(ReadmeStatus::Stale);
    }
    std::fs::write(path, updated).map_err(|e| BadgeError::io(path, e))?;
    Ok(ReadmeStatus::Updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badges::build_badge_line;
    use tempfile::tempdir;

    fn badge() -> String {
        build_badge_line("100", "100")
    }

    fn block(line: &str) -> String {
        format!("{}\n{}\n{}", BADGE_START, line, BADGE_END)
    }

    #[test]
    fn test_insert_after_title_underline() {
        let content = "Project\n=======\nSome intro.\n";
        let updated = patch_badges(content, &badge());
        assert_eq!(
            updated,
            format!("Project\n=======\n\n{}\n\nSome intro.\n", block(&badge()))
        );
    }

    #[test]
    fn test_insert_after_title_keeps_existing_blank_line() {
        let content = "Project\n=======\n\nSome intro.\n";
        let updated = patch_badges(content, &badge());
        assert_eq!(
            updated,
            format!("Project\n=======\n\n{}\n\nSome intro.\n", block(&badge()))
        );
    }

    #[test]
    fn test_insert_at_top_without_title_convention() {
        let content = "# Project\n\nIntro.\n";
        let updated = patch_badges(content, &badge());
        assert_eq!(updated, format!("{}\n\n# Project\n\nIntro.\n", block(&badge())));
    }

    #[test]
    fn test_insert_at_top_before_blank_line() {
        let content = "\nIntro.";
        let updated = patch_badges(content, &badge());
        assert_eq!(updated, format!("{}\n\nIntro.\n", block(&badge())));
    }

    #[test]
    fn test_insert_into_empty_document() {
        assert_eq!(patch_badges("", &badge()), format!("{}\n", block(&badge())));
    }

    #[test]
    fn test_title_only_document() {
        let updated = patch_badges("Project\n===\n", &badge());
        assert_eq!(updated, format!("Project\n===\n\n{}\n", block(&badge())));
    }

    #[test]
    fn test_mixed_underline_is_not_a_title() {
        let content = "Project\n==-==\n";
        let updated = patch_badges(content, &badge());
        assert!(updated.starts_with(BADGE_START));
    }

    #[test]
    fn test_replace_existing_block_preserves_surroundings() {
        let old = build_badge_line("87.5", "100");
        let content = format!("Title\n=====\n\n{}\n\nBody text\nmore\n", block(&old));
        let updated = patch_badges(&content, &badge());
        assert_eq!(
            updated,
            format!("Title\n=====\n\n{}\n\nBody text\nmore\n", block(&badge()))
        );
    }

    #[test]
    fn test_replace_spans_arbitrary_inner_lines() {
        let content = format!(
            "intro\n{}\nstale line one\nstale line two\n{}\noutro",
            BADGE_START, BADGE_END
        );
        let updated = patch_badges(&content, &badge());
        assert_eq!(updated, format!("intro\n{}\noutro", block(&badge())));
    }

    #[test]
    fn test_replace_only_first_block() {
        let content = format!(
            "{}\nold\n{}\n{}\nsecond\n{}\n",
            BADGE_START, BADGE_END, BADGE_START, BADGE_END
        );
        let updated = patch_badges(&content, &badge());
        assert_eq!(
            updated,
            format!("{}\n{}\nsecond\n{}\n", block(&badge()), BADGE_START, BADGE_END)
        );
    }

    #[test]
    fn test_replace_keeps_crlf_outside_block() {
        let content = format!("Title\r\n{}\r\nold\r\n{}\r\nBody\r\n", BADGE_START, BADGE_END);
        let updated = patch_badges(&content, &badge());
        assert_eq!(updated, format!("Title\r\n{}\r\nBody\r\n", block(&badge())));
    }

    #[test]
    fn test_start_without_end_falls_back_to_insert() {
        let content = format!("Intro\n{}\nleft over\n", BADGE_START);
        let updated = patch_badges(&content, &badge());
        assert!(updated.starts_with(&format!("{}\n\nIntro\n", block(&badge()))));
        assert!(updated.ends_with(&format!("{}\nleft over\n", BADGE_START)));
    }

    #[test]
    fn test_end_before_start_falls_back_to_insert() {
        let content = format!("{}\nmiddle\n{}\n", BADGE_END, BADGE_START);
        let updated = patch_badges(&content, &badge());
        assert!(updated.starts_with(&format!("{}\n\n{}", block(&badge()), BADGE_END)));
    }

    #[test]
    fn test_stray_start_pairs_with_nearest_end() {
        let content = format!("{}\nkeep\n{}\nold\n{}\nBody\n", BADGE_START, BADGE_START, BADGE_END);
        let updated = patch_badges(&content, &badge());
        assert_eq!(updated, format!("{}\nkeep\n{}\nBody\n", BADGE_START, block(&badge())));
    }

    #[test]
    fn test_markers_must_be_whole_lines() {
        let content = format!("see `{}` and `{}`\n", BADGE_START, BADGE_END);
        let updated = patch_badges(&content, &badge());
        assert!(updated.starts_with(&block(&badge())));
        assert!(updated.ends_with(&content));
    }

    #[test]
    fn test_patch_is_idempotent() {
        let stray_start = format!("{}\n=====\nBody\n", BADGE_START);
        for content in [
            "Project\n=======\nIntro\n",
            "# Heading\nBody",
            "",
            "Solo",
            stray_start.as_str(),
        ] {
            let once = patch_badges(content, &badge());
            let twice = patch_badges(&once, &badge());
            assert_eq!(once, twice, "not idempotent for {:?}", content);
        }
    }

    #[test]
    fn test_update_readme_writes_only_on_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "Project\n=======\n").unwrap();

        assert_eq!(update_readme(&path, &badge(), true).unwrap(), ReadmeStatus::Updated);
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains(&badge()));

        assert_eq!(update_readme(&path, &badge(), true).unwrap(), ReadmeStatus::Unchanged);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_update_readme_check_mode_never_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "Project\n").unwrap();

        let status = update_readme(&path, &badge(), false).unwrap();
        assert_eq!(status, ReadmeStatus::Stale);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Project\n");
    }

    #[test]
    fn test_update_readme_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        match update_readme(&path, &badge(), true) {
            Err(BadgeError::ReadmeNotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected ReadmeNotFound, got {:?}", other),
        }
    }
}
