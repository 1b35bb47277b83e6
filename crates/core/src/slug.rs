/// Builds the TOC anchor for a heading.
///
/// 1. Lowercase
/// 2. Drop everything except word characters, whitespace, and hyphens
/// 3. Collapse each run of whitespace and hyphens into a single hyphen
///
/// ```
/// use mdopt_core::slug::anchor;
///
/// assert_eq!(anchor("Getting Started!"), "getting-started");
/// assert_eq!(anchor("A -- B"), "a-b");
/// ```
pub fn anchor(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_separator {
                slug.push('-');
                pending_separator = false;
            }
            slug.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
        // Punctuation and symbols are dropped without breaking a run.
    }

    if pending_separator {
        slug.push('-');
    }
    slug
}
