//! Removal of decorative horizontal rules and redundant blank lines.

use crate::frontmatter::locate_frontmatter;

/// Returns true for a line made only of three or more `-` or `*` characters,
/// optionally surrounded by whitespace.
pub fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(marker @ ('-' | '*')) => trimmed.len() >= 3 && chars.all(|c| c == marker),
        _ => false,
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Drops horizontal rules and collapses blank-line runs in a single scan.
///
/// The first two `---` lines, wherever they occur, bound the front-matter
/// block; they and everything between them are kept verbatim.
pub fn remove_noise_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let frontmatter = locate_frontmatter(lines);
    let mut cleaned: Vec<&'a str> = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().copied().enumerate() {
        if frontmatter.is_some_and(|span| span.contains(index)) {
            cleaned.push(line);
            continue;
        }

        if is_horizontal_rule(line) {
            continue;
        }

        if is_blank(line) && cleaned.last().is_some_and(|prev| is_blank(prev)) {
            continue;
        }

        cleaned.push(line);
    }

    log::debug!(
        "noise removal kept {} of {} line(s)",
        cleaned.len(),
        lines.len()
    );
    cleaned
}

/// Text-level wrapper around [`remove_noise_lines`].
pub fn remove_noise(input: &str) -> String {
    let lines: Vec<&str> = input.split('\n').collect();
    remove_noise_lines(&lines).join("\n")
}
