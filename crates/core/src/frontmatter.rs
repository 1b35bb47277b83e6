use serde_json::Value as JsonValue;
use thiserror::Error;

/// Delimiter line that opens and closes a front-matter block.
pub const FENCE: &str = "---";

/// Line positions of the front-matter block: the first two fence lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterSpan {
    /// Index of the opening `---` line.
    pub open: usize,
    /// Index of the closing `---` line.
    pub close: usize,
}

impl FrontmatterSpan {
    /// Returns true if `index` is a delimiter or lies between them.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.open && index <= self.close
    }
}

/// A document split into its leading front-matter block and the body after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// Raw block contents between the delimiters, when a block was found.
    pub block: Option<&'a str>,
    /// Text following the closing delimiter with leading newlines removed,
    /// or the whole input when there is no block.
    pub body: &'a str,
}

/// Errors emitted while parsing frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Finds the front-matter span: the first `---` line anywhere in `lines`
/// and the next `---` line after it.
///
/// An opening fence without a matching closing fence is not front-matter.
pub fn locate_frontmatter(lines: &[&str]) -> Option<FrontmatterSpan> {
    let mut fences = lines
        .iter()
        .enumerate()
        .filter(|&(index, &line)| {
            let line = if index == 0 { strip_bom(line).0 } else { line };
            is_fence(line)
        })
        .map(|(index, _)| index);
    let open = fences.next()?;
    let close = fences.next()?;
    Some(FrontmatterSpan { open, close })
}

/// Splits a front-matter block that opens on the first line off `input`.
///
/// Unterminated blocks are treated as body text.
pub fn split_frontmatter(input: &str) -> FrontmatterSplit<'_> {
    match find_yaml_block(input) {
        Some((block, body_start)) => FrontmatterSplit {
            block: Some(block),
            body: input[body_start..].trim_start_matches('\n'),
        },
        None => FrontmatterSplit {
            block: None,
            body: input,
        },
    }
}

/// Parses the raw contents of a front-matter block into a JSON mapping.
pub fn parse_yaml_block(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(JsonValue::Object(Default::default()));
    }

    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    let json_value =
        serde_json::to_value(yaml_value).map_err(|err| FrontmatterError::Parse(err.to_string()))?;

    match json_value {
        JsonValue::Null => Ok(JsonValue::Object(Default::default())),
        JsonValue::Object(_) => Ok(json_value),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

fn find_yaml_block(input: &str) -> Option<(&str, usize)> {
    let (without_bom, bom_len) = strip_bom(input);
    let (first, block_start) = next_line(without_bom, 0)?;
    if !is_fence(first) {
        return None;
    }

    let mut scan_cursor = block_start;
    while let Some((line, next_cursor)) = next_line(without_bom, scan_cursor) {
        if is_fence(line) {
            let block = without_bom[block_start..scan_cursor].trim_end_matches(['\r', '\n']);
            return Some((block, bom_len + next_cursor));
        }
        scan_cursor = next_cursor;
    }
    None
}

fn strip_bom(input: &str) -> (&str, usize) {
    if let Some(stripped) = input.strip_prefix('\u{feff}') {
        (stripped, '\u{feff}'.len_utf8())
    } else {
        (input, 0)
    }
}

fn next_line(input: &str, start: usize) -> Option<(&str, usize)> {
    if start >= input.len() {
        return None;
    }

    let bytes = &input.as_bytes()[start..];
    if let Some(pos) = bytes.iter().position(|b| *b == b'\n') {
        let line_end = start + pos;
        Some((&input[start..line_end], line_end + 1))
    } else {
        Some((&input[start..], input.len()))
    }
}

/// Returns true for a line whose trimmed content is exactly `---`.
pub fn is_fence(line: &str) -> bool {
    line.trim() == FENCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_leading_block() {
        let lines = ["---", "title: x", "---", "# Body"];
        let span = locate_frontmatter(&lines).expect("block");
        assert_eq!(span, FrontmatterSpan { open: 0, close: 2 });
        assert!(span.contains(0));
        assert!(span.contains(2));
        assert!(!span.contains(3));
    }

    #[test]
    fn locates_block_after_other_lines() {
        let lines = ["# Title", "---", "text", "---", "more", "---"];
        let span = locate_frontmatter(&lines).expect("block");
        assert_eq!(span, FrontmatterSpan { open: 1, close: 3 });
        assert!(!span.contains(0));
        assert!(span.contains(2));
        assert!(!span.contains(5));
    }

    #[test]
    fn ignores_unterminated_block() {
        let lines = ["intro", "---", "title: x", "# Body"];
        assert_eq!(locate_frontmatter(&lines), None);
    }

    #[test]
    fn fence_after_bom_opens_the_block() {
        let lines = ["\u{feff}---", "a: 1", "---"];
        assert_eq!(
            locate_frontmatter(&lines),
            Some(FrontmatterSpan { open: 0, close: 2 })
        );
    }

    #[test]
    fn split_discards_block_and_leading_newlines() {
        let split = split_frontmatter("---\ntitle: old\n---\n\n\n# Body\ntext");
        assert_eq!(split.block, Some("title: old"));
        assert_eq!(split.body, "# Body\ntext");
    }

    #[test]
    fn split_only_takes_a_leading_block() {
        let input = "# Body\n---\nkey: v\n---\nmore";
        let split = split_frontmatter(input);
        assert_eq!(split.block, None);
        assert_eq!(split.body, input);
    }

    #[test]
    fn split_keeps_unterminated_block_as_body() {
        let input = "---\ntitle: test";
        assert_eq!(split_frontmatter(input).block, None);
        assert_eq!(split_frontmatter(input).body, input);
    }

    #[test]
    fn split_handles_empty_block_and_bom() {
        let split = split_frontmatter("\u{feff}---\n---\nBody");
        assert_eq!(split.block, Some(""));
        assert_eq!(split.body, "Body");
    }

    #[test]
    fn parses_basic_yaml() {
        let value = parse_yaml_block("title: Example\ntags:\n  - rust\n  - markdown")
            .expect("yaml should parse");
        let title = value
            .get("title")
            .and_then(JsonValue::as_str)
            .expect("title should exist");
        assert_eq!(title, "Example");
        assert_eq!(value["tags"][1], "markdown");
    }

    #[test]
    fn empty_block_is_an_empty_mapping() {
        let value = parse_yaml_block("  \n").expect("empty block should parse");
        assert_eq!(value, JsonValue::Object(Default::default()));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let err = parse_yaml_block("invalid: [unterminated").unwrap_err();
        assert!(matches!(err, FrontmatterError::Parse(_)), "{err:?}");
    }

    #[test]
    fn errors_on_non_mapping_root() {
        let err = parse_yaml_block("- a\n- b").unwrap_err();
        assert!(matches!(err, FrontmatterError::InvalidRootType));
    }
}
