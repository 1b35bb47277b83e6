//! Heading hierarchy repair.
//!
//! Headings may return to any shallower level, but may only go one level
//! deeper than the heading before them. Deeper jumps are clamped.

use crate::heading::{Heading, extract_body_headings, parse_heading_line};
use std::borrow::Cow;

/// Computes the normalized level for each heading, in order.
pub fn normalize_levels(headings: &[Heading]) -> Vec<u8> {
    let mut expected_level = 1u8;
    headings
        .iter()
        .map(|heading| {
            let level = if heading.level > expected_level + 1 {
                expected_level + 1
            } else {
                heading.level
            };
            expected_level = level;
            level
        })
        .collect()
}

/// Rewrites heading levels in `input` so depth never jumps by more than one.
///
/// Only the leading `#` run of a clamped heading changes. Lines in the
/// front-matter block are left alone and do not take part in the sequence.
pub fn normalize_hierarchy(input: &str) -> String {
    let lines: Vec<&str> = input.split('\n').collect();
    let headings = extract_body_headings(&lines);
    if headings.is_empty() {
        return input.to_string();
    }

    let levels = normalize_levels(&headings);
    let mut output: Vec<Cow<'_, str>> = lines.iter().copied().map(Cow::Borrowed).collect();
    let mut clamped = 0usize;
    for (heading, level) in headings.iter().zip(levels) {
        if level == heading.level {
            continue;
        }
        let line = lines[heading.line_index];
        if let Some((old_level, _)) = parse_heading_line(line) {
            let tail = &line[usize::from(old_level)..];
            log::trace!(
                "clamping heading '{}' on line {} from h{} to h{}",
                heading.text,
                heading.line_index + 1,
                old_level,
                level
            );
            let hashes = "#".repeat(level.into());
            output[heading.line_index] = Cow::Owned(format!("{hashes}{tail}"));
            clamped += 1;
        }
    }

    log::debug!("normalized {} heading(s), {} clamped", headings.len(), clamped);
    output.join("\n")
}
