//! Line-oriented ATX heading extraction.

use crate::frontmatter::locate_frontmatter;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

/// A heading found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading depth (1..=6).
    pub level: u8,
    /// Heading text with surrounding whitespace trimmed.
    pub text: String,
    /// Zero-based index of the heading line in the document.
    pub line_index: usize,
}

/// Matches a single raw line against the heading pattern.
///
/// Returns the `#` run length and the untrimmed remainder captured after the
/// separator whitespace.
pub fn parse_heading_line(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING_RE.captures(line)?;
    let hashes = caps.get(1)?.as_str();
    let rest = caps.get(2)?.as_str();
    Some((hashes.len() as u8, rest))
}

/// Extracts every heading in document order.
pub fn extract_headings(lines: &[&str]) -> Vec<Heading> {
    extract_where(lines, |_| true)
}

/// Extracts headings outside the front-matter block.
///
/// Line indices still refer to positions in `lines`.
pub fn extract_body_headings(lines: &[&str]) -> Vec<Heading> {
    match locate_frontmatter(lines) {
        Some(span) => extract_where(lines, |index| !span.contains(index)),
        None => extract_headings(lines),
    }
}

fn extract_where(lines: &[&str], keep: impl Fn(usize) -> bool) -> Vec<Heading> {
    lines
        .iter()
        .enumerate()
        .filter(|&(index, _)| keep(index))
        .filter_map(|(line_index, line)| {
            parse_heading_line(line).map(|(level, rest)| Heading {
                level,
                text: rest.trim().to_string(),
                line_index,
            })
        })
        .collect()
}
